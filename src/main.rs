use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use swipedeck::config::{Config, ConfigStore};
use swipedeck::logging;
use swipedeck::proxy::ProxyServer;

#[derive(Parser)]
#[command(name = "swipedeck", version)]
#[command(about = "Swipe through a deck of profiles and collect preferences")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service (preferences and chat)
    Serve {
        /// Port to listen on, overrides the config and PORT
        #[arg(long)]
        port: Option<u16>,
        /// Preference log file
        #[arg(long)]
        preferences: Option<PathBuf>,
    },
    /// Swipe through a deck in the terminal
    Swipe {
        /// Deck file with [[items]] entries (defaults to the sample deck)
        #[arg(long)]
        deck: Option<PathBuf>,
    },
    /// Print the default config file location
    ConfigPath,
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(Config::config_path);
    let config = Config::load_from(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    Ok((config, path))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, preferences } => {
            logging::init_stdout();
            let (mut config, path) = load_config(cli.config)?;
            if let Some(port) = port {
                config.set_port(port);
            }
            if let Some(preferences) = preferences {
                config.server.preferences_path = preferences;
            }
            config.validate()?;

            let mut server = ProxyServer::new(ConfigStore::new(config, path))?;
            let addr = server.bind().await?;
            println!("swipedeck listening on http://{}", addr);
            server.run().await
        }
        Commands::Swipe { deck } => {
            logging::init_file();
            let (mut config, _) = load_config(cli.config)?;
            if deck.is_some() {
                config.terminal.deck_path = deck;
            }

            let decisions = swipedeck::ui::run(config).await?;
            for decision in &decisions {
                println!("{} {}", decision.outcome, decision.item.id);
            }
            Ok(())
        }
        Commands::ConfigPath => {
            println!("{}", Config::config_path().display());
            Ok(())
        }
    }
}
