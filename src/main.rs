//! indexctl CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use indexctl::{
    backend::BackendClient,
    commands::{
        cmd_build_index, cmd_delete_collection, cmd_describe_collection, cmd_list_artifacts,
        cmd_status, print_artifacts, print_collections, print_outcome, print_status, IndexOptions,
    },
    config::Config,
    error::Result,
    providers::{self, Platform},
    session::Session,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "indexctl")]
#[command(version, about = "Vector store indexing console", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// List embedding artifacts available for indexing
    Artifacts,

    /// List vector store providers usable on this platform
    Providers,

    /// List collections for a provider
    Collections {
        /// Provider id (defaults to the configured provider)
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// Build an index from an embedding artifact
    Index {
        /// Embedding artifact (file name) to index
        file: String,

        /// Target provider (defaults to the configured provider)
        #[arg(short, long)]
        provider: Option<String>,

        /// Index mode (defaults to the provider's default mode)
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// Show details of a collection
    Show {
        /// Collection name
        collection: String,

        /// Provider id (defaults to the configured provider)
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// Delete a collection
    Delete {
        /// Collection name
        collection: String,

        /// Provider id (defaults to the configured provider)
        #[arg(short, long)]
        provider: Option<String>,

        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show backend and provider status
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Handle commands that don't need config or a backend client
    if let Commands::Init { force } = cli.command {
        return handle_init(cli.config, force);
    }

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "indexctl", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load_or_default(cli.config.as_deref())?;
    let platform = Platform::current();

    if let Commands::Providers = cli.command {
        print_providers(platform, cli.json)?;
        return Ok(());
    }

    let client = BackendClient::from_config(&config)?;
    let mut session = Session::with_default_provider(platform, &config.default_provider);

    match cli.command {
        Commands::Init { .. } | Commands::Completions { .. } | Commands::Providers => {
            unreachable!()
        }

        Commands::Artifacts => {
            let artifacts = cmd_list_artifacts(&client).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&artifacts)?);
            } else {
                print_artifacts(&artifacts);
            }
        }

        Commands::Collections { provider } => {
            // A provider switch refreshes the listing on its own.
            match provider {
                Some(provider) => session.select_provider(&client, &provider).await?,
                None => session.refresh_collections(&client).await,
            }
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&session.collections)?);
            } else {
                print_collections(&session.selection.provider_id, &session.collections);
            }
        }

        Commands::Index {
            file,
            provider,
            mode,
        } => {
            let options = IndexOptions {
                artifact: file,
                provider,
                mode,
            };

            let outcome = cmd_build_index(&mut session, &client, options).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                if let Some(status) = session.status() {
                    println!("{}", status);
                }
                print_outcome(&outcome);
            }
        }

        Commands::Show {
            collection,
            provider,
        } => {
            if let Some(provider) = provider {
                session.select_provider(&client, &provider).await?;
            }
            let outcome = cmd_describe_collection(&mut session, &client, &collection).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_outcome(&outcome);
            }
        }

        Commands::Delete {
            collection,
            provider,
            yes,
        } => {
            if let Some(provider) = provider {
                session.select_provider(&client, &provider).await?;
            }

            let confirmed = yes || confirm_delete(&collection);
            let deleted =
                cmd_delete_collection(&mut session, &client, &collection, confirmed).await?;
            if deleted {
                println!("✓ Collection '{}' deleted", collection);
            } else {
                println!("Deletion cancelled");
            }
        }

        Commands::Status => {
            let status = cmd_status(&config, &client, platform).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }
    }

    Ok(())
}

fn handle_init(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::default_config_path);

    if config_path.exists() && !force {
        eprintln!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            config_path.display()
        );
        std::process::exit(1);
    }

    Config::default().save(&config_path)?;

    println!("✓ indexctl initialized successfully");
    println!("  Config: {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit the config file to point at your indexing backend");
    println!("  2. List embedding artifacts: indexctl artifacts");
    println!("  3. Build an index: indexctl index <file> --provider qdrant");

    Ok(())
}

fn print_providers(platform: Platform, json: bool) -> Result<()> {
    let available = providers::available_providers(platform);

    if json {
        println!("{}", serde_json::to_string_pretty(&available)?);
        return Ok(());
    }

    println!("\nAvailable Providers\n");
    for provider in available {
        println!(
            "• {} [{}]: {}",
            provider.name,
            provider.id,
            provider.modes.join(", ")
        );
    }
    Ok(())
}

/// Ask the operator to confirm an irreversible deletion.
fn confirm_delete(collection_name: &str) -> bool {
    eprint!(
        "Are you sure you want to delete collection \"{}\"? [y/N] ",
        collection_name
    );
    std::io::stderr().flush().ok();

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
