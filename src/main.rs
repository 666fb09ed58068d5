//! CLI entry point for octavo

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "octavo")]
#[command(version)]
#[command(about = "A static blog generator driven by a headless CMS", long_about = None)]
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
    /// Initialize a new octavo site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Generate static files from the CMS
    #[command(alias = "g")]
    Generate {
        /// Refetch from the CMS even if the cache is fresh
        #[arg(short, long)]
        force: bool,
    },

    /// Start a local preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Serve without regenerating first
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder and cache
    Clean,

    /// List posts from the CMS
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "octavo=debug,info"
    } else {
        "octavo=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing octavo site in {:?}", target_dir);
            octavo::commands::init::init_site(&target_dir)?;
            println!("Initialized empty octavo site in {:?}", target_dir);
        }

        Commands::Generate { force } => {
            let octavo = octavo::Octavo::new(&base_dir)?;
            tracing::info!("Generating static files...");
            octavo::commands::generate::run(&octavo, force).await?;
            println!("Generated successfully!");
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let octavo = octavo::Octavo::new(&base_dir)?;

            if !r#static {
                tracing::info!("Generating static files...");
                octavo.generate().await?;
            }

            tracing::info!("Starting server at http://{}:{}", ip, port);
            octavo::server::start(&octavo, &ip, port, open).await?;
        }

        Commands::Clean => {
            let octavo = octavo::Octavo::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            octavo.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let octavo = octavo::Octavo::new(&base_dir)?;
            octavo::commands::list::run(&octavo).await?;
        }

        Commands::Version => {
            println!("octavo version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
