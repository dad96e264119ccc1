//! Print dates in the page's display format.
//!
//! Usage:
//!   cargo run --bin convert-date -- 2025.10.3 2025-10-03 2025年10月3日
//!   cargo run --bin convert-date -- --decorate 2025.10.3
//!
//! Unrecognized dates are reported on stderr and make the command fail.

use anyhow::Result;
use intro_page::date::{decorate_date, ParsedDate};

fn main() -> Result<()> {
    let decorate = std::env::args().any(|arg| arg == "--decorate");
    let mut failed = 0;

    for arg in std::env::args().skip(1).filter(|arg| arg != "--decorate") {
        match arg.parse::<ParsedDate>() {
            Ok(date) if decorate => println!("{}", decorate_date(&date.to_string())),
            Ok(date) => println!("{}", date),
            Err(e) => {
                eprintln!("{}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} date(s) could not be converted", failed);
    }
    Ok(())
}
