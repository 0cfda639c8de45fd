use regex::Regex;

use crate::sources::{Category, Session};

/// One category/session block found in normalized text: the anchor's parsed
/// fields plus the span of text running up to the next anchor (or the end of
/// the document).
#[derive(Debug)]
pub struct LocatedBlock<'a> {
    pub category: &'static str,
    pub session: &'static str,
    /// Raw date token as matched (`27-02-2026` or `27/02/2026`); absent for
    /// games whose anchors are a bare category heading.
    pub date: Option<String>,
    pub span: &'a str,
}

/// Scan normalized text for category/session anchors and return the blocks
/// in document order, first occurrence winning per (category, session) pair.
///
/// The pattern is built from the caller's vocabularies, never inferred from
/// the page: `<category> <session><date>` with any amount of whitespace
/// between category and session but none between session and date: the
/// sources render those as concatenated text nodes, so assuming a separator
/// there would be wrong. When every session label is empty the game has a
/// single unnamed slot and bare category headings anchor the blocks.
///
/// No match is not an error: an empty result propagates as default/empty
/// category results upstream.
pub fn locate<'a>(
    text: &'a str,
    categories: &'static [Category],
    sessions: &'static [Session],
) -> Vec<LocatedBlock<'a>> {
    if categories.is_empty() {
        return Vec::new();
    }

    let cat_alt = alternation(categories.iter().map(|c| c.label));
    let dated = sessions.iter().any(|s| !s.label.is_empty());
    let pattern = if dated {
        let ses_alt = alternation(sessions.iter().map(|s| s.label).filter(|l| !l.is_empty()));
        format!(r"(?i)(?P<cat>{cat_alt})\s*(?P<ses>{ses_alt})(?P<date>\d{{2}}[-/]\d{{2}}[-/]\d{{4}})")
    } else {
        format!(r"(?i)(?P<cat>{cat_alt})")
    };
    let re = Regex::new(&pattern).unwrap();

    // First pass: every anchor occurrence, in order. Duplicates are dropped
    // below but still delimit the preceding span, so a repeated label never
    // lets one block bleed into the next.
    struct Hit {
        category: &'static str,
        session: &'static str,
        date: Option<String>,
        start: usize,
        end: usize,
    }
    let mut hits: Vec<Hit> = Vec::new();
    for caps in re.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        let Some(category) = key_for_label(categories.iter().map(|c| (c.key, c.label)), &caps["cat"])
        else {
            continue;
        };
        let session = if dated {
            match key_for_label(sessions.iter().map(|s| (s.key, s.label)), &caps["ses"]) {
                Some(key) => key,
                None => continue,
            }
        } else {
            sessions.first().map(|s| s.key).unwrap_or("sorteo")
        };
        let date = caps.name("date").map(|m| m.as_str().to_string());
        hits.push(Hit {
            category,
            session,
            date,
            start: whole.start(),
            end: whole.end(),
        });
    }

    let mut blocks = Vec::new();
    for (i, hit) in hits.iter().enumerate() {
        let taken = blocks
            .iter()
            .any(|b: &LocatedBlock| b.category == hit.category && b.session == hit.session);
        if taken {
            continue;
        }
        let span_end = hits.get(i + 1).map(|next| next.start).unwrap_or(text.len());
        blocks.push(LocatedBlock {
            category: hit.category,
            session: hit.session,
            date: hit.date.clone(),
            span: &text[hit.end..span_end],
        });
    }
    blocks
}

/// Render an anchor date token with `/` separators; an unparsable token is
/// carried through raw rather than dropped.
pub fn normalize_date(raw: &str) -> String {
    let candidate = raw.replace('-', "/");
    match chrono::NaiveDate::parse_from_str(&candidate, "%d/%m/%Y") {
        Ok(_) => candidate,
        Err(_) => raw.to_string(),
    }
}

/// Alternation of escaped labels, longest first so that a label never
/// shadows a longer one sharing its prefix.
fn alternation<'l>(labels: impl Iterator<Item = &'l str>) -> String {
    let mut escaped: Vec<String> = labels.map(regex::escape).collect();
    escaped.sort_by_key(|l| std::cmp::Reverse(l.len()));
    escaped.join("|")
}

fn key_for_label<'l>(
    vocab: impl Iterator<Item = (&'static str, &'l str)>,
    matched: &str,
) -> Option<&'static str> {
    let matched = matched.to_lowercase();
    for (key, label) in vocab {
        if label.to_lowercase() == matched {
            return Some(key);
        }
    }
    None
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const CATS: &[Category] = &[
        Category { key: "nacional", label: "Quiniela Nacional" },
        Category { key: "bsas", label: "Quiniela Buenos Aires" },
    ];
    const SESSIONS: &[Session] = &[
        Session { key: "previa", label: "Previa" },
        Session { key: "primera", label: "Primera" },
        Session { key: "nocturna", label: "Nocturna" },
    ];
    const BARE: &[Session] = &[Session { key: "sorteo", label: "" }];

    #[test]
    fn anchors_in_document_order_with_spans() {
        let text = "Quiniela Nacional Previa27-02-2026\n1\n1860\nQuiniela Nacional Nocturna27-02-2026\n1\n0042\nresto";
        let blocks = locate(text, CATS, SESSIONS);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].session, "previa");
        assert!(blocks[0].span.contains("1860"));
        assert!(!blocks[0].span.contains("0042"));
        assert_eq!(blocks[1].session, "nocturna");
        assert!(blocks[1].span.contains("resto"));
    }

    #[test]
    fn whitespace_between_category_and_session_is_free() {
        for gap in ["", " ", "   \n"] {
            let text = format!("Quiniela Nacional{gap}Previa27-02-2026\n1\n1860");
            let blocks = locate(&text, CATS, SESSIONS);
            assert_eq!(blocks.len(), 1, "gap {:?}", gap);
        }
    }

    #[test]
    fn separator_between_session_and_date_does_not_match() {
        let text = "Quiniela Nacional Previa 27-02-2026\n1\n1860";
        assert!(locate(text, CATS, SESSIONS).is_empty());
    }

    #[test]
    fn slash_dates_match_too() {
        let text = "Quiniela Buenos Aires Primera27/02/2026\n1\n0100";
        let blocks = locate(text, CATS, SESSIONS);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].date.as_deref(), Some("27/02/2026"));
    }

    #[test]
    fn repeated_label_first_occurrence_wins_but_still_delimits() {
        let text = "Quiniela Nacional Previa27-02-2026\n1\n1860\nQuiniela Nacional Previa26-02-2026\n1\n9999";
        let blocks = locate(text, CATS, SESSIONS);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].date.as_deref(), Some("27-02-2026"));
        // The duplicate anchor still terminates the first span.
        assert!(!blocks[0].span.contains("9999"));
    }

    #[test]
    fn case_insensitive_labels() {
        let text = "QUINIELA NACIONAL PREVIA27-02-2026\n1\n1860";
        let blocks = locate(text, CATS, SESSIONS);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].category, "nacional");
    }

    #[test]
    fn bare_headings_anchor_sessionless_games() {
        const MODS: &[Category] = &[
            Category { key: "tradicional", label: "Tradicional" },
            Category { key: "segunda", label: "La Segunda" },
        ];
        let text = "Tradicional\n39\n00\nLa Segunda\n12\n45";
        let blocks = locate(text, MODS, BARE);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].category, "tradicional");
        assert_eq!(blocks[0].session, "sorteo");
        assert!(blocks[0].date.is_none());
        assert!(!blocks[0].span.contains("45"));
    }

    #[test]
    fn no_anchor_is_empty_not_error() {
        assert!(locate("página vacía o rediseñada", CATS, SESSIONS).is_empty());
    }

    #[test]
    fn date_renders_with_slashes() {
        assert_eq!(normalize_date("27-02-2026"), "27/02/2026");
        assert_eq!(normalize_date("27/02/2026"), "27/02/2026");
        // Nonsense tokens pass through raw.
        assert_eq!(normalize_date("99-99-2026"), "99-99-2026");
    }
}
