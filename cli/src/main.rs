mod commands;
mod terminal;

use commands::{CommandLine, Commands, lookup, shell, stats};
use tagscope_common::config::Config;
use terminal::{logging, print};
use tracing::Level;

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    if commands.no_color {
        colored::control::set_override(false);
    }

    let level: Level = match commands.quiet {
        0 => Level::INFO,
        _ => Level::WARN,
    };
    logging::init_logging(level);

    let cfg = Config {
        data_path: commands.data,
        quiet: commands.quiet,
    };

    print::header("loading dataset", cfg.quiet);
    let report = commands::load_table(&cfg)?;

    match commands.command {
        Commands::Lookup { ips } => lookup::lookup(&report.table, &ips, &cfg),
        Commands::Shell => shell::shell(&report.table, &cfg),
        Commands::Stats => stats::stats(&report, &cfg),
    }
}
