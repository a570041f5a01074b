use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use entity_core::TaxEngine;
use entity_cli::{report, utils};
use entity_data::{TableFiles, TaxTableLoader};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compares LLC and S-Corp taxes for a small business.
///
/// Uses the built-in 2024 federal brackets, state rates and payroll
/// constants unless replacement CSV files are given.
#[derive(Debug, Parser)]
#[command(name = "entity-compare", version, about)]
struct Cli {
    #[command(flatten)]
    tables: TableArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct TableArgs {
    /// Federal brackets CSV (`min_income,max_income,rate`).
    #[arg(long, global = true)]
    brackets: Option<PathBuf>,

    /// State rates CSV (`state,rate`).
    #[arg(long, global = true)]
    state_rates: Option<PathBuf>,

    /// Single-row tax year config CSV.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

impl From<TableArgs> for TableFiles {
    fn from(args: TableArgs) -> Self {
        Self {
            brackets: args.brackets,
            state_rates: args.state_rates,
            config: args.config,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare total tax as an LLC and as an S-Corp.
    Compare {
        /// Total net business income, e.g. `100,000`.
        #[arg(long, value_parser = utils::parse_decimal)]
        income: Decimal,

        /// Salary paid to the owner; capped at income.
        #[arg(long, value_parser = utils::parse_decimal)]
        salary: Decimal,

        /// Two-letter state code, e.g. `CA`.
        #[arg(long)]
        state: String,

        /// Print the result as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Evaluate the S-Corp path across salary levels.
    Sweep {
        #[arg(long, value_parser = utils::parse_decimal)]
        income: Decimal,

        #[arg(long)]
        state: String,

        /// Salary increment between rows.
        #[arg(long, default_value = "1000", value_parser = utils::parse_decimal)]
        step: Decimal,
    },

    /// List state codes and their rates.
    States,

    /// List the federal income tax brackets.
    Brackets,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn load_engine(files: TableFiles) -> anyhow::Result<TaxEngine> {
    if files.is_empty() {
        debug!("using built-in 2024 tables");
        return Ok(TaxEngine::tax_year_2024());
    }
    let tables = TaxTableLoader::load(&files).context("Failed to load tax tables")?;
    Ok(TaxEngine::new(tables))
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let engine = load_engine(cli.tables.into())?;

    match cli.command {
        Command::Compare {
            income,
            salary,
            state,
            json,
        } => {
            let result = engine
                .compare(income, salary, &state)
                .context("Comparison failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", report::render_comparison(&result, &state));
            }
        }
        Command::Sweep {
            income,
            state,
            step,
        } => {
            let points = engine
                .salary_sweep(income, &state, step)
                .context("Salary sweep failed")?;
            println!("{}", report::render_sweep(&points));
        }
        Command::States => {
            println!("{}", report::render_states(engine.tables().state_rates()));
        }
        Command::Brackets => {
            println!(
                "Federal income tax brackets, tax year {}",
                engine.tables().config().tax_year
            );
            println!("{}", report::render_brackets(engine.tables().brackets()));
        }
    }

    Ok(())
}
