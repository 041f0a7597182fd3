mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::format::{CurrencyArgs, PercentageArgs};
use commands::loan::{
    AnalyzeArgs, BalanceArgs, BreakdownArgs, EarlyPayoffArgs, LoanArgs, ScheduleArgs,
};

/// Loan amortization calculations
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Loan amortization calculations",
    long_about = "A CLI for loan amortization with decimal precision. Computes level \
                  monthly payments, full payment schedules, loan summaries, remaining \
                  balances and early-payoff projections."
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
    /// Level monthly payment for a loan
    Payment(LoanArgs),
    /// Monthly payment, total payment and total interest
    Summary(LoanArgs),
    /// Full month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Balance reported after a number of completed payments
    Balance(BalanceArgs),
    /// Principal / interest split of a single payment
    Breakdown(BreakdownArgs),
    /// Due date of the final payment
    PayoffDate(LoanArgs),
    /// Project the effect of a fixed extra monthly payment
    EarlyPayoff(EarlyPayoffArgs),
    /// Summary, schedule and optional early-payoff projection in one run
    Analyze(AnalyzeArgs),
    /// Format an amount as currency
    FormatCurrency(CurrencyArgs),
    /// Format a percentage
    FormatPercentage(PercentageArgs),
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

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Summary(args) => commands::loan::run_summary(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Balance(args) => commands::loan::run_balance(args),
        Commands::Breakdown(args) => commands::loan::run_breakdown(args),
        Commands::PayoffDate(args) => commands::loan::run_payoff_date(args),
        Commands::EarlyPayoff(args) => commands::loan::run_early_payoff(args),
        Commands::Analyze(args) => commands::loan::run_analyze(args),
        Commands::FormatCurrency(args) => commands::format::run_format_currency(args),
        Commands::FormatPercentage(args) => commands::format::run_format_percentage(args),
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
