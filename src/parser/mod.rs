pub mod anchors;
pub mod meta;
pub mod normalize;
pub mod records;

use tracing::warn;

use crate::result::RecordEntry;
use crate::sources::{GameSpec, SourceSpec};

/// How much raw normalized text to attach when a source yields nothing,
/// so operators can see what the page turned into.
const EXCERPT_LEN: usize = 1500;

/// Everything one source's HTML parsed into. Slots cover only the blocks
/// that were located and yielded records; missing (category, session) pairs
/// stay at their defaults in the assembled document.
#[derive(Debug)]
pub struct ParsedSource {
    pub slots: Vec<ParsedSlot>,
    pub meta: meta::DrawMeta,
    pub excerpt: Option<String>,
}

#[derive(Debug)]
pub struct ParsedSlot {
    pub category: &'static str,
    pub session: &'static str,
    /// `DD/MM/YYYY` (or the raw anchor token when unparsable); `None` for
    /// games whose anchors carry no date.
    pub date: Option<String>,
    pub entries: Vec<RecordEntry>,
}

/// Full per-source pipeline: raw HTML → normalized text → located blocks →
/// extracted records. Pure and synchronous; a page that matches nothing
/// parses to an empty slot list with a diagnostic excerpt, never an error.
pub fn parse_source(html: &str, source: &SourceSpec, game: &GameSpec) -> ParsedSource {
    let text = normalize::normalize(html);
    let blocks = anchors::locate(&text, source.categories, game.sessions);

    let mut slots = Vec::new();
    for block in blocks {
        match records::extract(block.span, &game.rules) {
            records::Extraction::Found(entries) => slots.push(ParsedSlot {
                category: block.category,
                session: block.session,
                date: block.date.as_deref().map(anchors::normalize_date),
                entries,
            }),
            records::Extraction::NotFound => {
                if records::looks_like_running_index(block.span, &game.rules) {
                    warn!(
                        "{}: positions do not restart at 1 in {}/{}, block skipped",
                        source.id, block.category, block.session
                    );
                }
            }
        }
    }

    let meta = if game.draw_meta {
        meta::extract_draw_meta(&text)
    } else {
        meta::DrawMeta::default()
    };
    let excerpt = if slots.is_empty() {
        Some(text.chars().take(EXCERPT_LEN).collect())
    } else {
        None
    };

    ParsedSource { slots, meta, excerpt }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{QUINI6, QUINIELA};

    #[test]
    fn anchor_date_and_pairs_extract_together() {
        let source = &QUINIELA.sources[0];
        let parsed = parse_source(
            "Quiniela Nacional Previa27-02-2026\n1\n1860\n2\n9999\nEOCZ",
            source,
            &QUINIELA,
        );
        assert_eq!(parsed.slots.len(), 1);
        let slot = &parsed.slots[0];
        assert_eq!(slot.category, "nacional");
        assert_eq!(slot.session, "previa");
        assert_eq!(slot.date.as_deref(), Some("27/02/2026"));
        let nums: Vec<(u32, &str)> = slot.entries.iter().map(|e| (e.pos, e.num.as_str())).collect();
        assert_eq!(nums, vec![(1, "1860"), (2, "9999")]);
    }

    #[test]
    fn scoped_vocabulary_sees_only_its_category() {
        let regional = &QUINIELA.sources[1];
        let html = "Quiniela Nacional Previa27-02-2026\n1\n1860\nQuiniela Entre Ríos Previa27-02-2026\n1\n0042";
        let parsed = parse_source(html, regional, &QUINIELA);
        assert_eq!(parsed.slots.len(), 1);
        assert_eq!(parsed.slots[0].category, "entrerrios");
    }

    #[test]
    fn unmatched_page_yields_excerpt_not_error() {
        let parsed = parse_source(
            "<html><body>rediseño total</body></html>",
            &QUINIELA.sources[0],
            &QUINIELA,
        );
        assert!(parsed.slots.is_empty());
        assert!(parsed.excerpt.as_deref().unwrap().contains("rediseño"));
    }

    #[test]
    fn quiniela_fixture_end_to_end() {
        let html = std::fs::read_to_string("tests/fixtures/quiniela.html").unwrap();
        let parsed = parse_source(&html, &QUINIELA.sources[0], &QUINIELA);

        let slot = |cat: &str, ses: &str| {
            parsed
                .slots
                .iter()
                .find(|s| s.category == cat && s.session == ses)
                .unwrap_or_else(|| panic!("missing slot {}/{}", cat, ses))
        };

        let previa = slot("nacional", "previa");
        assert_eq!(previa.date.as_deref(), Some("27/02/2026"));
        assert_eq!(previa.entries.len(), 3);
        assert_eq!(previa.entries[0].num, "1860");
        // 3-digit head number padded to 4
        assert_eq!(previa.entries[2].num, "0042");

        let bsas = slot("bsas", "matutina");
        assert_eq!(bsas.entries.len(), 2);

        // The page has no nocturna block yet; nothing should pretend it does
        assert!(!parsed.slots.iter().any(|s| s.session == "nocturna"));
        assert!(parsed.excerpt.is_none());
    }

    #[test]
    fn quini6_fixture_end_to_end() {
        let html = std::fs::read_to_string("tests/fixtures/quini6.html").unwrap();
        let parsed = parse_source(&html, &QUINI6.sources[0], &QUINI6);

        let slot = |cat: &str| {
            parsed
                .slots
                .iter()
                .find(|s| s.category == cat)
                .unwrap_or_else(|| panic!("missing modality {}", cat))
        };

        let trad = slot("tradicional");
        let values: Vec<&str> = trad.entries.iter().map(|e| e.num.as_str()).collect();
        assert_eq!(values, vec!["39", "00", "45", "27", "36", "05"]);

        // The 88 in the page is not a legal ball and must be dropped
        let seg = slot("segunda");
        assert!(seg.entries.iter().all(|e| e.num.parse::<u32>().unwrap() <= 45));
        assert_eq!(seg.entries.len(), 6);

        assert_eq!(parsed.meta.draw_number.as_deref(), Some("3350"));
        assert_eq!(parsed.meta.draw_date.as_deref(), Some("22 de febrero de 2026"));
        assert_eq!(parsed.meta.next_draw_date.as_deref(), Some("25/02/2026"));
        assert_eq!(parsed.meta.jackpot.as_deref(), Some("$3.150 millones"));
    }

    #[test]
    fn running_index_block_is_skipped_not_misread() {
        // Numbers continuing a page-wide count must not become entries
        // starting at position 1.
        let html = "Quiniela Nacional Previa27-02-2026\n7\n1860\n8\n0042";
        let parsed = parse_source(html, &QUINIELA.sources[0], &QUINIELA);
        assert!(parsed.slots.is_empty());
        assert!(parsed.excerpt.is_some());
    }

    #[test]
    fn pending_session_with_stray_number_stays_empty() {
        let html = "Quiniela Nacional Nocturna27-02-2026\nSorteo pendiente hasta las 2030 horas";
        let parsed = parse_source(html, &QUINIELA.sources[0], &QUINIELA);
        assert!(parsed.slots.is_empty());
    }

    #[test]
    fn script_noise_never_reaches_records() {
        let html = "<script>var nums = '1 1860 2 9999';</script>\
                    <div>Quiniela Nacional Previa27-02-2026</div><div>1</div><div>0100</div>";
        let parsed = parse_source(html, &QUINIELA.sources[0], &QUINIELA);
        assert_eq!(parsed.slots.len(), 1);
        assert_eq!(parsed.slots[0].entries.len(), 1);
        assert_eq!(parsed.slots[0].entries[0].num, "0100");
    }
}
