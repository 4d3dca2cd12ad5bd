//! QUADRAX•ML assistant: the main entry point.
//!
//! Commands:
//! - `serve`: Start the HTTP edge service
//! - `ask`: Route a message locally and print the template
//! - `generate`: One completion for a free-form prompt
//! - `analyze`: Workstation configuration recommendations
//! - `taxonomy`: Print the fastener or screw reference table
//! - `doctor`: Diagnose configuration

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "quadrax",
    about = "QUADRAX•ML assistant edge service",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP edge service
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask the keyword-routed assistant (no network)
    Ask {
        /// The message to route
        message: String,
    },

    /// Generate a completion for a prompt
    Generate {
        /// Free-form prompt
        prompt: String,
    },

    /// Get configuration recommendations for a workstation
    Analyze {
        /// What the workstation is for
        #[arg(short, long)]
        description: String,

        /// Function type, e.g. "training" or "inference"
        #[arg(short, long)]
        function_type: String,

        /// Workload traits; repeat the flag or separate with commas
        #[arg(short, long, value_delimiter = ',')]
        nature: Vec<String>,
    },

    /// Print a reference taxonomy
    Taxonomy {
        /// `fasteners` or `screws`
        kind: String,
    },

    /// Diagnose configuration
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Ask { message } => commands::ask::run(&message)?,
        Commands::Generate { prompt } => commands::generate::run(&prompt).await?,
        Commands::Analyze {
            description,
            function_type,
            nature,
        } => commands::analyze::run(description, function_type, nature).await?,
        Commands::Taxonomy { kind } => commands::taxonomy::run(&kind)?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
