//! CLI entry point for greetings-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use greetings_rs::content::{Audience, FormData};

#[derive(Parser)]
#[command(name = "greetings-rs")]
#[command(version)]
#[command(about = "Personalized greeting-card content server", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config and create the data/public directories
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Start the content server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (overrides config)
        #[arg(short, long)]
        ip: Option<String>,

        /// Keep content in memory only
        #[arg(long)]
        memory: bool,
    },

    /// List stored content
    List {
        /// Only show the shuffled selection for this audience (couple, friends)
        #[arg(short, long)]
        audience: Option<Audience>,
    },

    /// Show the personalized slideshow for an audience
    Preview {
        /// Audience (couple, friends)
        #[arg(short, long)]
        audience: Audience,

        #[arg(long)]
        name1: String,

        #[arg(long)]
        name2: String,

        #[arg(short, long, default_value = "")]
        relationship: String,

        /// Favorite memory, fills {memory}
        #[arg(long)]
        memory: Option<String>,

        /// Personal message, fills {message}
        #[arg(long)]
        message: Option<String>,
    },

    /// Delete the content database
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "greetings_rs=debug,tower_http=debug,info"
    } else {
        "greetings_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            greetings_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized greetings site in {:?}", target_dir);
        }

        Commands::Serve { port, ip, memory } => {
            let app = greetings_rs::Greetings::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| app.config.server.ip.clone());
            let port = port.unwrap_or(app.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            greetings_rs::server::start(&app, &ip, port, memory).await?;
        }

        Commands::List { audience } => {
            let app = greetings_rs::Greetings::new(&base_dir)?;
            greetings_rs::commands::list::run(&app, audience)?;
        }

        Commands::Preview {
            audience,
            name1,
            name2,
            relationship,
            memory,
            message,
        } => {
            let app = greetings_rs::Greetings::new(&base_dir)?;
            let form = FormData {
                favorite_memory: memory,
                message,
                ..FormData::new(name1, name2, relationship)
            };
            greetings_rs::commands::preview::run(&app, audience, &form)?;
        }

        Commands::Clean => {
            let app = greetings_rs::Greetings::new(&base_dir)?;
            tracing::info!("Removing content database...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("greetings-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
