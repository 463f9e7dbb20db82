//! CLI entry point for devfolio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devfolio::content::ContentType;
use devfolio::Site;

#[derive(Parser)]
#[command(name = "devfolio")]
#[command(version)]
#[command(about = "A developer blog and portfolio generator with design tokens", long_about = None)]
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new blog post or project
    New {
        /// Content type (blog, projects)
        #[arg(short = 't', long = "type", default_value = "blog")]
        content_type: ContentType,

        /// Title of the new item
        title: String,

        /// File name to use instead of the slugified title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Generate static files
    #[command(alias = "generate", alias = "g")]
    Build {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Build the site and serve it locally
    #[command(alias = "s", alias = "server")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Disable file watching and live reload
        #[arg(long)]
        r#static: bool,
    },

    /// Generate design tokens from the styling configuration
    Tokens,

    /// List site content (blog, projects, tags)
    List {
        #[arg(default_value = "blog")]
        r#type: String,
    },

    /// Remove the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "devfolio=debug,info"
    } else {
        "devfolio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            devfolio::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            content_type,
            title,
            slug,
        } => {
            let site = Site::new(&base_dir)?;
            let path =
                devfolio::commands::new::create_item(&site, &title, content_type, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Build { watch } => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.build()?;
            println!("Generated successfully!");

            if watch {
                tokio::task::spawn_blocking(move || {
                    devfolio::commands::generate::watch(&site, |_| {
                        println!("Regenerated successfully!");
                    })
                })
                .await??;
            }
        }

        Commands::Serve { port, ip, r#static } => {
            let site = Site::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            site.build()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            devfolio::server::start(&site, &ip, port, !r#static).await?;
        }

        Commands::Tokens => {
            let site = Site::new(&base_dir)?;
            devfolio::commands::tokens::run(&site)?;
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            devfolio::commands::list::run(&site, &r#type)?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("devfolio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
