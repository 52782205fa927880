//! lumen - pixel signal chain calculator
//! Command-line interface over `lumen-core`: scene lighting in, electrons and noise out

mod params;
mod plot;
mod report;
mod sweep;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use lumen_core::{run_full_chain, ChainInputs};
use params::ParamArgs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "lumen")]
#[command(author = "SIL Contributors")]
#[command(version = "2026.1.16")]
#[command(about = "Scene-to-electron signal and noise for a camera pixel", long_about = None)]
struct Cli {
    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full chain once and print the report
    Run {
        #[command(flatten)]
        params: ParamArgs,

        /// Print the result bundle as JSON
        #[arg(long)]
        json: bool,

        /// Reject parameters outside their physical range
        #[arg(long)]
        strict: bool,
    },

    /// Run the chain over a range of one parameter
    Sweep {
        #[command(flatten)]
        params: ParamArgs,

        /// Parameter to vary (e.g. f_number, exposure_time)
        #[arg(short, long, value_name = "NAME")]
        param: String,

        /// First value
        #[arg(long)]
        from: f64,

        /// Last value
        #[arg(long)]
        to: f64,

        /// Number of values, both ends included
        #[arg(long, default_value_t = 10)]
        steps: usize,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the log-scale stage series
    Plot {
        #[command(flatten)]
        params: ParamArgs,

        /// Print the series as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default parameter file
    Defaults,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "lumen=debug,lumen_core=debug"
    } else {
        "lumen=info,lumen_core=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            params,
            json,
            strict,
        } => run_command(&params, json, strict),

        Commands::Sweep {
            params,
            param,
            from,
            to,
            steps,
            json,
        } => sweep_command(&params, &param, from, to, steps, json),

        Commands::Plot { params, json } => plot_command(&params, json),

        Commands::Defaults => defaults_command(),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Resolve inputs and report range problems
fn resolve_inputs(params: &ParamArgs, strict: bool) -> Result<ChainInputs> {
    let inputs = params.resolve().context("could not load chain parameters")?;

    if strict {
        inputs.validate()?;
    } else {
        for v in inputs.range_violations() {
            tracing::warn!(
                field = v.field,
                value = v.value,
                expected = v.expected,
                "parameter outside physical range"
            );
        }
    }

    Ok(inputs)
}

fn run_command(params: &ParamArgs, json: bool, strict: bool) -> Result<()> {
    let inputs = resolve_inputs(params, strict)?;
    let bundle = run_full_chain(&inputs);

    if json {
        println!("{}", report::render_json(&bundle)?);
    } else {
        print!("{}", report::Report(&bundle));
    }
    Ok(())
}

fn sweep_command(
    params: &ParamArgs,
    param: &str,
    from: f64,
    to: f64,
    steps: usize,
    json: bool,
) -> Result<()> {
    let base = resolve_inputs(params, false)?;
    let rows = sweep::sweep(&base, param, from, to, steps)
        .with_context(|| format!("sweep over '{}' failed", param))?;
    tracing::info!(param, steps = rows.len(), "sweep finished");

    if json {
        let bundles: Vec<_> = rows.iter().map(|(_, bundle)| bundle).collect();
        println!("{}", serde_json::to_string_pretty(&bundles)?);
    } else {
        print!("{}", sweep::render_table(param, &rows));
    }
    Ok(())
}

fn plot_command(params: &ParamArgs, json: bool) -> Result<()> {
    let inputs = resolve_inputs(params, false)?;
    let points = plot::step_series(&run_full_chain(&inputs));

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
    } else {
        print!("{}", plot::render_bars(&points));
    }
    Ok(())
}

fn defaults_command() -> Result<()> {
    print!("{}", params::to_toml(&ChainInputs::default())?);
    Ok(())
}
