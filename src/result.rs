use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use tracing::warn;

use crate::parser::ParsedSource;
use crate::sources::GameSpec;

/// One winning number at a ranked position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordEntry {
    pub pos: u32,
    pub num: String,
}

/// Results of one category/session slot. Starts at its default (today's
/// date, no entries) and is only ever replaced whole: a slot is either the
/// default or a complete parsed block, never a partial mix.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResult {
    pub date: String,
    pub entries: Vec<RecordEntry>,
}

/// The normalized response body: always carries the complete category ×
/// session skeleton, with leaf data degrading to defaults and per-source
/// diagnostics attached on the side. Serialized verbatim by the transport
/// adapter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDocument {
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_draw_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jackpot: Option<String>,
    pub categories: BTreeMap<String, BTreeMap<String, CategoryResult>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub per_source_errors: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_excerpt: Option<String>,
}

impl ResultDocument {
    /// Pre-seed every (category, session) slot of the game with the default
    /// empty result so the response shape is complete before any parsing
    /// happens. The clock is injected: the core never reads wall time.
    pub fn skeleton(game: &GameSpec, now: DateTime<FixedOffset>) -> Self {
        let today = now.format("%d/%m/%Y").to_string();
        let mut categories = BTreeMap::new();
        for cat in game.categories() {
            let sessions: BTreeMap<String, CategoryResult> = game
                .sessions
                .iter()
                .map(|s| {
                    (
                        s.key.to_string(),
                        CategoryResult { date: today.clone(), entries: Vec::new() },
                    )
                })
                .collect();
            categories.insert(cat.key.to_string(), sessions);
        }

        ResultDocument {
            generated_at: now.format("%d/%m/%Y %H:%M:%S").to_string(),
            draw_number: None,
            draw_date: None,
            next_draw_date: None,
            jackpot: None,
            categories,
            per_source_errors: BTreeMap::new(),
            debug_excerpt: None,
        }
    }

    /// Fold one source's outcome into the document. A failed source records
    /// its message under `perSourceErrors` and nothing else changes; a
    /// parsed source fills empty slots atomically (first source with data
    /// wins, in source order) and contributes draw metadata. One upstream
    /// outage degrades one slice of the result, never the whole response.
    pub fn merge(&mut self, source_id: &str, outcome: anyhow::Result<ParsedSource>) {
        let parsed = match outcome {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("{}: {:#}", source_id, err);
                self.per_source_errors.insert(source_id.to_string(), err.to_string());
                return;
            }
        };

        for slot in parsed.slots {
            let Some(current) = self
                .categories
                .get_mut(slot.category)
                .and_then(|sessions| sessions.get_mut(slot.session))
            else {
                continue;
            };
            if slot.entries.is_empty() || !current.entries.is_empty() {
                continue;
            }
            let date = slot.date.unwrap_or_else(|| current.date.clone());
            *current = CategoryResult { date, entries: slot.entries };
        }

        if self.draw_number.is_none() {
            self.draw_number = parsed.meta.draw_number;
        }
        if self.draw_date.is_none() {
            self.draw_date = parsed.meta.draw_date;
        }
        if self.next_draw_date.is_none() {
            self.next_draw_date = parsed.meta.next_draw_date;
        }
        if self.jackpot.is_none() {
            self.jackpot = parsed.meta.jackpot;
        }

        if self.debug_excerpt.is_none() {
            self.debug_excerpt = parsed.excerpt;
        }
    }
}

/// Current time in the Argentine timezone (fixed UTC-3, no DST).
pub fn art_now() -> DateTime<FixedOffset> {
    let art = FixedOffset::west_opt(3 * 3600).unwrap();
    Utc::now().with_timezone(&art)
}

// ── Tests ──
