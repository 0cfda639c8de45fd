use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{info, warn};

use crate::parser;
use crate::result::{art_now, ResultDocument};
use crate::sources::GameSpec;

const FETCH_TIMEOUT: Duration = Duration::from_secs(12);
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub fn client() -> Result<Client> {
    Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

/// Fetch one page with the browser-like headers the sources expect. A
/// timeout or non-success status is an ordinary error for the caller to
/// record per source, never retried here.
pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let start = Instant::now();
    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "text/html,application/xhtml+xml")
        .header("Accept-Language", "es-AR,es;q=0.9")
        .header("Referer", "https://www.google.com/")
        .send()
        .await
        .with_context(|| format!("Request to {} failed", url))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("{} returned status {}", url, status);
    }

    let html = response
        .text()
        .await
        .with_context(|| format!("Failed to read body from {}", url))?;
    info!(
        "Fetched {} ({} bytes in {} ms)",
        url,
        html.len(),
        start.elapsed().as_millis()
    );
    Ok(html)
}

/// Run every source pipeline of a game concurrently and assemble one
/// document: fire all fetches in parallel so total latency is bounded by
/// the slowest source, then merge in source order so fills stay
/// deterministic. A source that fails (timeout included) lands in
/// `perSourceErrors` without touching its siblings.
pub async fn fetch_game(game: &'static GameSpec) -> Result<ResultDocument> {
    let client = client()?;

    let mut handles = Vec::with_capacity(game.sources.len());
    for source in game.sources {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let html = fetch_html(&client, source.url).await?;
            Ok::<_, anyhow::Error>(parser::parse_source(&html, source, game))
        }));
    }

    let mut doc = ResultDocument::skeleton(game, art_now());
    for (source, handle) in game.sources.iter().zip(handles) {
        let outcome = match handle.await {
            Ok(result) => result,
            Err(e) => {
                warn!("Task for {} aborted: {}", source.id, e);
                Err(anyhow::anyhow!("task aborted: {}", e))
            }
        };
        doc.merge(source.id, outcome);
    }
    Ok(doc)
}
