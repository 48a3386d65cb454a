//! CLI entry point for plasticluv

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plasticluv::locale::Locale;

#[derive(Parser)]
#[command(name = "plasticluv")]
#[command(version)]
#[command(about = "Content engine and API server for a localized clinic blog", long_about = None)]
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
    /// Start the API server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List site content
    List {
        /// Locale to list content for
        #[arg(short, long, default_value = "en")]
        locale: String,

        /// Type of content to list (post, category, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "plasticluv=debug,info"
    } else {
        "plasticluv=info"
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

    let site = plasticluv::Site::new(&base_dir)?;

    match cli.command {
        Commands::Serve { port, ip } => {
            let port = port.unwrap_or(site.config.server.port);
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());
            tracing::info!("Starting server at http://{}:{}", ip, port);
            plasticluv::server::start(&site, &ip, port).await?;
        }

        Commands::List { locale, r#type } => {
            let locale: Locale = locale.parse()?;
            plasticluv::commands::list::run(&site, locale, &r#type)?;
        }
    }

    Ok(())
}
