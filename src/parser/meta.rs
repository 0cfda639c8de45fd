use std::sync::LazyLock;

use regex::Regex;

static DRAW_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Sorteo\s*#(\d+)\s+realizado el\s+[a-záéíóúñ]+\s+(\d{1,2} de [a-záéíóúñ]+ de \d{4})")
        .unwrap()
});
static NEXT_DRAW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Pr[oó]ximo Sorteo[\s\S]{0,200}?(\d{1,2}/\d{2}/\d{4})").unwrap());
static JACKPOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s*(\d[\d.,]*(?:\s*millones?)?)").unwrap());

/// Draw-level metadata printed around the number blocks: draw id and date
/// from the page header, next-draw date and jackpot from the footer promo.
/// Everything is optional; a page without them parses to an empty value.
#[derive(Debug, Default)]
pub struct DrawMeta {
    pub draw_number: Option<String>,
    pub draw_date: Option<String>,
    pub next_draw_date: Option<String>,
    pub jackpot: Option<String>,
}

/// Scan normalized text for the "Sorteo #NNNN realizado el ..." header, the
/// next-draw announcement and the advertised jackpot.
pub fn extract_draw_meta(text: &str) -> DrawMeta {
    let mut meta = DrawMeta::default();

    if let Some(caps) = DRAW_HEADER_RE.captures(text) {
        meta.draw_number = Some(caps[1].to_string());
        meta.draw_date = Some(caps[2].to_string());
    }
    if let Some(caps) = NEXT_DRAW_RE.captures(text) {
        meta.next_draw_date = Some(caps[1].to_string());
    }
    if let Some(caps) = JACKPOT_RE.captures(text) {
        meta.jackpot = Some(format!("${}", caps[1].trim()));
    }

    meta
}

// ── Tests ──
