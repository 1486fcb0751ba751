use std::io::{self, BufRead, Write};

use anyhow::Context;
use colored::*;
use tracing::debug;

use crate::commands::lookup;
use crate::terminal::{colors, print};
use tagscope_common::config::Config;
use tagscope_core::matcher::RangeTable;

const EXIT_WORDS: &[&str] = &["exit", "quit"];

/// Interactive lookup loop. Ends on `exit`, `quit` or end of input.
pub fn shell(table: &RangeTable, cfg: &Config) -> anyhow::Result<()> {
    print::header("interactive lookup", cfg.quiet);
    print::print_status("Enter an IP address per line, 'exit' to quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut idx: usize = 0;

    loop {
        prompt()?;

        let Some(line) = lines.next() else {
            debug!("End of input");
            break;
        };
        let line = line.context("failed to read from stdin")?;
        let query = line.trim();

        if query.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&query.to_ascii_lowercase().as_str()) {
            break;
        }

        lookup::show_result(table, query, idx, cfg);
        idx += 1;
    }

    if cfg.quiet == 0 {
        print::fat_separator();
    }
    Ok(())
}

fn prompt() -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{} ", "ip>".color(colors::PRIMARY).bold())?;
    stdout.flush()?;
    Ok(())
}
