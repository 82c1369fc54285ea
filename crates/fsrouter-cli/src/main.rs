mod commands;

#[cfg(feature = "dev")]
mod dev;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fsrouter")]
#[command(version, about = "fsrouter CLI - file-based routes for Hono", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the routing module
    Generate {
        /// Project root (defaults to the current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Output file, overriding `[output] file` from fsrouter.toml
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print the module instead of writing it
        #[arg(long, conflicts_with = "check")]
        stdout: bool,

        /// Fail if the output file is out of date
        #[arg(long)]
        check: bool,
    },

    /// Print the route table in registration order
    Routes {
        /// Project root (defaults to the current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// Watch the routes directory and regenerate on changes
    Dev {
        /// Project root (defaults to the current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    match cli.command {
        Commands::Generate {
            root,
            out,
            stdout,
            check,
        } => {
            commands::generate::execute(root.as_deref(), out.as_deref(), stdout, check)?;
        }
        Commands::Routes { root } => {
            commands::routes::execute(root.as_deref())?;
        }
        Commands::Dev { root } => {
            commands::dev::execute(root.as_deref())?;
        }
    }

    Ok(())
}
