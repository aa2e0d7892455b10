// src/core/html.rs
//! Low-level tag scanning over raw HTML text.
//!
//! Deliberately naive: no DOM, no attribute parsing beyond quote skipping.
//! Tag names are matched case-insensitively on ASCII. Byte offsets returned
//! here always index the original string.

/// One tag found by [`next_tag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// ASCII-lowercased tag name (`td`, `table`, `br`, …). Empty for `<!…>` / `<?…>`.
    pub name: String,
    pub closing: bool,
    /// Byte offset of `<`.
    pub start: usize,
    /// Byte offset one past `>`.
    pub end: usize,
}

impl Tag {
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

/// ASCII-only lowercasing. Keeps byte offsets aligned with the input.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Find the next tag at or after `from`.
///
/// Comments (`<!-- … -->`) are returned as a nameless tag spanning the whole
/// comment, so callers can skip them like any other tag. A `<` that does not
/// start a tag (`a < b`) is ignored.
pub fn next_tag(s: &str, from: usize) -> Option<Tag> {
    let b = s.as_bytes();
    let n = b.len();
    let mut i = from;

    while i < n {
        let lt = i + b.get(i..)?.iter().position(|&c| c == b'<')?;
        let after = lt + 1;
        if after >= n {
            return None;
        }

        if s[after..].starts_with("!--") {
            let close = s[after + 3..].find("-->").map(|p| after + 3 + p + 3).unwrap_or(n);
            return Some(Tag { name: String::new(), closing: false, start: lt, end: close });
        }

        let (closing, name_from) = if b[after] == b'/' { (true, after + 1) } else { (false, after) };
        let first = b.get(name_from).copied().unwrap_or(b' ');
        if !(first.is_ascii_alphabetic() || first == b'!' || first == b'?') {
            i = after;
            continue;
        }

        let mut name_end = name_from;
        while name_end < n && b[name_end].is_ascii_alphanumeric() {
            name_end += 1;
        }
        let end = skip_tag_body(b, name_end)?;
        let name = s[name_from..name_end].to_ascii_lowercase();
        return Some(Tag { name, closing, start: lt, end });
    }
    None
}

/// Walk to one past the `>` that ends a tag, honouring quoted attribute values.
fn skip_tag_body(b: &[u8], mut i: usize) -> Option<usize> {
    let mut in_s = false; // '
    let mut in_d = false; // "
    while i < b.len() {
        match b[i] {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return Some(i + 1),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Byte offset of the closing tag `</name` at or after `from`, case-insensitive.
/// Used to jump over raw-text elements (`script`, `style`).
pub fn find_close_ci(s: &str, name: &str, from: usize) -> Option<usize> {
    let lc = to_lower(s.get(from..)?);
    let needle = format!("</{name}");
    lc.find(&needle).map(|p| from + p)
}
