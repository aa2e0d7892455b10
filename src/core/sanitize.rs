// src/core/sanitize.rs

/// Decode the entities these pages actually use, plus numeric references.
/// Unknown named entities are left as-is.
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').filter(|&semi| semi <= 10) {
            Some(semi) => {
                let body = &tail[1..semi];
                match decode_entity(body) {
                    Some(ch) => out.push(ch),
                    None => out.push_str(&tail[..=semi]),
                }
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(body: &str) -> Option<char> {
    match body {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = body.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            // no-break space folds to a plain space like &nbsp;
            if code == 0xA0 { Some(' ') } else { char::from_u32(code) }
        }
    }
}

/// Collapse runs of whitespace (including no-break space) into one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Cells that stand for "no value" on the site.
pub fn is_placeholder(s: &str) -> bool {
    matches!(s.trim(), "" | "-" | "–" | "—")
}

/// First maximal run of ASCII digits, parsed. `None` if there is none or it overflows.
pub fn first_digit_run(s: &str) -> Option<u64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let run = &s[start..];
    let len = run.find(|c: char| !c.is_ascii_digit()).unwrap_or(run.len());
    run[..len].parse().ok()
}

/// True if the text has at least one letter and no digit.
pub fn is_alphabetic_text(s: &str) -> bool {
    s.chars().any(char::is_alphabetic) && !s.chars().any(|c| c.is_ascii_digit())
}

const GROUP_SEPS: [char; 5] = [' ', '\u{a0}', ',', '.', '\''];

/// Money-style amount: `10 000 000`, `1,250,000 €`, `2.5 mil`, `300 хиляди`.
///
/// Digit groups are joined across a single thousands separator when exactly
/// three digits follow it. A trailing 1–2 digit fraction is kept only when a
/// unit follows. `units` are `(lowercase word or prefix, multiplier)`, first match
/// wins; a unit only counts when no letter follows it, so `Kč` or `max` is not `k`/`m`.
pub fn parse_amount(s: &str, units: &[(String, u64)]) -> Option<u64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let text = &s[start..];
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0usize;

    let mut int_digits = String::new();
    while i < chars.len() && chars[i].is_ascii_digit() {
        int_digits.push(chars[i]);
        i += 1;
    }

    // thousands groups
    while i < chars.len() && GROUP_SEPS.contains(&chars[i]) {
        let run = digit_run_len(&chars, i + 1);
        if run != 3 {
            break;
        }
        int_digits.extend(&chars[i + 1..i + 4]);
        i += 4;
    }

    // short fraction
    let mut frac_digits = String::new();
    if i < chars.len() && (chars[i] == '.' || chars[i] == ',') {
        let run = digit_run_len(&chars, i + 1);
        if run == 1 || run == 2 {
            frac_digits.extend(&chars[i + 1..i + 1 + run]);
            i += 1 + run;
        }
    }

    let whole: u64 = int_digits.parse().ok()?;
    let rest: String = chars[i..].iter().collect::<String>().trim_start().to_lowercase();
    let unit = units.iter().find(|(u, _)| is_unit_word(&rest, u));

    match unit {
        Some((_, mult)) => {
            let mut amount = whole.checked_mul(*mult)?;
            if !frac_digits.is_empty() {
                let scale = 10u64.pow(frac_digits.len() as u32);
                let frac: u64 = frac_digits.parse().ok()?;
                amount = amount.checked_add(frac.checked_mul(*mult)? / scale)?;
            }
            Some(amount)
        }
        None => Some(whole),
    }
}

fn is_unit_word(rest: &str, unit: &str) -> bool {
    !unit.is_empty()
        && rest
            .strip_prefix(unit)
            .is_some_and(|after| !after.starts_with(char::is_alphabetic))
}

fn digit_run_len(chars: &[char], from: usize) -> usize {
    chars.get(from..).map_or(0, |tail| tail.iter().take_while(|c| c.is_ascii_digit()).count())
}
