mod fetch;
mod parser;
mod result;
mod sources;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::result::{art_now, ResultDocument};
use crate::sources::{GameSpec, QUINI6, QUINIELA};

#[derive(Parser)]
#[command(name = "quiniela_scraper", about = "Argentine lottery results as normalized JSON")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Pretty-print the JSON output
    #[arg(short, long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the regional quiniela draws and print the result document
    Quiniela,
    /// Fetch the Quini 6 draw and print the result document
    Quini6,
    /// Parse a saved HTML file through one source's pipeline (debug aid)
    Parse {
        /// Game the file belongs to: quiniela or quini6
        game: String,
        /// Path to the saved HTML document
        file: PathBuf,
        /// Source id whose vocabulary to use (default: the game's first)
        #[arg(short, long)]
        source: Option<String>,
    },
    /// List configured games, sources and vocabularies
    Sources,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Quiniela => {
            let doc = fetch::fetch_game(&QUINIELA).await?;
            print_doc(&doc, cli.pretty)?;
        }
        Commands::Quini6 => {
            let doc = fetch::fetch_game(&QUINI6).await?;
            print_doc(&doc, cli.pretty)?;
        }
        Commands::Parse { game, file, source } => {
            let game = game_by_name(&game)?;
            let spec = match source.as_deref() {
                Some(id) => game
                    .sources
                    .iter()
                    .find(|s| s.id == id)
                    .ok_or_else(|| anyhow::anyhow!("unknown source '{}' for {}", id, game.name))?,
                None => &game.sources[0],
            };
            let html = std::fs::read_to_string(&file)?;
            let mut doc = ResultDocument::skeleton(game, art_now());
            doc.merge(spec.id, Ok(parser::parse_source(&html, spec, game)));
            print_doc(&doc, cli.pretty)?;
        }
        Commands::Sources => {
            for game in [&QUINIELA, &QUINI6] {
                println!("{}", game.name);
                for source in game.sources {
                    println!("  {:<18} {}", source.id, source.url);
                    for cat in source.categories {
                        println!("    {:<14} \"{}\"", cat.key, cat.label);
                    }
                }
                let sessions: Vec<&str> = game.sessions.iter().map(|s| s.key).collect();
                println!("  sessions: {}", sessions.join(", "));
            }
        }
    }

    Ok(())
}

fn game_by_name(name: &str) -> Result<&'static GameSpec> {
    match name {
        "quiniela" => Ok(&QUINIELA),
        "quini6" => Ok(&QUINI6),
        other => bail!("unknown game '{}' (expected quiniela or quini6)", other),
    }
}

fn print_doc(doc: &ResultDocument, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(doc)?
    } else {
        serde_json::to_string(doc)?
    };
    println!("{}", json);
    Ok(())
}
