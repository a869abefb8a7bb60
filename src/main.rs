//! MysticLang VM - CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mysticvm::util::{config, logger};
use mysticvm::{dump_file, run_file, solve_stdin, NAME, VERSION};
use std::path::PathBuf;

/// MysticLang byte-code virtual machine and challenge batch solver
#[derive(Parser, Debug)]
#[command(name = "mysticvm")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log every executed instruction
    #[arg(long)]
    trace: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a base64 challenge payload read from stdin
    Solve {
        /// Solve cases sequentially instead of in parallel
        #[arg(long)]
        sequential: bool,
    },

    /// Execute a raw bytecode file and print one memory cell
    Run {
        /// Program file to execute
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Memory cell to report after the run
        #[arg(short, long, default_value_t = 0)]
        address: i64,
    },

    /// Print a disassembly listing of a bytecode file
    Dump {
        /// Program file to disassemble
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose || args.trace {
        logger::init_debug();
    } else {
        logger::init_cli();
    }

    if args.verbose {
        eprintln!("mysticvm version: {}", VERSION);
        eprintln!("Host: {}", std::env::consts::OS);
    }

    let user_config = config::load_user_config().unwrap_or_default();
    let mut vm_config = user_config.vm.to_vm_config();
    if args.trace {
        vm_config.trace = true;
    }

    match args.command {
        Commands::Solve { sequential } => {
            let parallel = user_config.solver.parallel && !sequential;
            solve_stdin(&vm_config, parallel).context("Failed to solve payload")?;
        }
        Commands::Run { file, address } => {
            let result = run_file(&file, address, vm_config)
                .with_context(|| format!("Failed to run: {}", file.display()))?;
            println!("{}", result);
        }
        Commands::Dump { file } => {
            dump_file(&file).with_context(|| format!("Failed to dump: {}", file.display()))?;
        }
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
        }
    }

    Ok(())
}
