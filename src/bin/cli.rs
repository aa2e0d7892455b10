// src/bin/cli.rs
use arena_scout::cli;

fn main() {
    if let Err(e) = cli::run() {
        // debug form keeps the wrapped cause chain
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}
