mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::compare::CompareArgs;
use commands::sip::SipArgs;
use commands::swp::SwpArgs;
use commands::tvm::TvmArgs;

/// Investor planning calculators with decimal precision
#[derive(Parser)]
#[command(
    name = "ivc",
    version,
    about = "Investor planning calculators (SIP, SWP, TVM)",
    long_about = "A CLI for investor planning arithmetic with decimal precision. \
                  Projects SIP wealth accumulation with annual step-up, simulates \
                  SWP corpus depletion month by month, and solves any one of the \
                  five time-value-of-money variables from the other four."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a systematic investment plan with annual step-up
    Sip(SipArgs),
    /// Simulate systematic withdrawal until depletion or horizon
    Swp(SwpArgs),
    /// Solve one time-value-of-money variable from the other four
    Tvm(TvmArgs),
    /// Run a batch of plans through one calculator and show the history
    Compare(CompareArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Sip(args) => commands::sip::run_sip(args),
        Commands::Swp(args) => commands::swp::run_swp(args),
        Commands::Tvm(args) => commands::tvm::run_tvm(args),
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::Version => {
            println!("ivc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
