//! Hybrid Circuit Command-Line Interface
//!
//! `hybridc` reads a JSON (or YAML) circuit description, runs the wire-type
//! and measurement-schema analysis, and emits OpenQASM 3.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{analyze, emit};

/// hybridc - static analysis and OpenQASM emission for hybrid qubit/qumode circuits
#[derive(Parser)]
#[command(name = "hybridc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a circuit: wire types, readout schemas and execution groups
    Analyze {
        /// Input circuit description (JSON or YAML)
        #[arg(short, long)]
        input: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Check against a backend (qubit, hybrid, fock, or a profile file)
        #[arg(short, long)]
        backend: Option<String>,
    },

    /// Emit OpenQASM 3 for a circuit
    Emit {
        /// Input circuit description (JSON or YAML)
        #[arg(short, long)]
        input: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Emitter configuration file (YAML or JSON)
        #[arg(short, long, env = "HYBRIDC_CONFIG")]
        config: Option<String>,

        /// Strict OpenQASM 3: erase qumode syntax
        #[arg(long)]
        strict: bool,

        /// Skip diagonalizing operations before readout
        #[arg(long)]
        no_rotations: bool,

        /// Decimal places for real parameters
        #[arg(long)]
        precision: Option<usize>,

        /// Width of Fock-number results
        #[arg(long)]
        int_bits: Option<u32>,

        /// Width of homodyne/heterodyne results
        #[arg(long)]
        float_bits: Option<u32>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Analyze {
            input,
            format,
            backend,
        } => analyze::execute(&input, &format, backend.as_deref()),
        Commands::Emit {
            input,
            output,
            config,
            strict,
            no_rotations,
            precision,
            int_bits,
            float_bits,
        } => {
            let overrides = emit::Overrides {
                strict,
                no_rotations,
                precision,
                int_bits,
                float_bits,
            };
            emit::execute(&input, output.as_deref(), config.as_deref(), &overrides)
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
