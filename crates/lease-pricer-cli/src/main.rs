mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::lease::{QuoteArgs, ValidateBuyoutArgs};

/// Finance-lease installment calculator
#[derive(Parser)]
#[command(
    name = "leasecalc",
    version,
    about = "Finance-lease installment calculator",
    long_about = "Computes the monthly installment, total cost and cost ratio of a \
                  finance lease from price, down payment, term and buyout, and checks \
                  the buyout against the permitted range for the term. The annual \
                  rate is read from LEASE_RRSO (default 8.5%)."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug events to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a lease: installment, total cost, cost ratio and buyout check
    Quote(QuoteArgs),
    /// Check a buyout percentage against the permitted range for a term
    ValidateBuyout(ValidateBuyoutArgs),
    /// List the permitted buyout ranges per term
    Rules,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Quote(args) => commands::lease::run_quote(args),
        Commands::ValidateBuyout(args) => commands::lease::run_validate_buyout(args),
        Commands::Rules => commands::lease::run_rules(),
        Commands::Version => {
            println!("leasecalc {}", env!("CARGO_PKG_VERSION"));
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
