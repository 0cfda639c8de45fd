use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").unwrap());
static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:div|p|li|ul|ol|table|tr|td|th|span|h[1-6]|br)\b[^>]*/?>").unwrap()
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").unwrap());
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&#?[a-zA-Z0-9]{2,8};").unwrap());
static HSPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\r]+").unwrap());
static LINE_EDGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" *\n *").unwrap());
static BLANKS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Reduce an HTML document to a plain-text view whose line structure follows
/// the page's visual block structure. Block-boundary tags become newlines so
/// that visually separate numbers stay on separate lines; inline tags vanish
/// so that adjacent text nodes concatenate (how the sources render
/// label+date anchors). Never fails: malformed HTML degrades to whatever
/// text survives stripping.
pub fn normalize(html: &str) -> String {
    let text = SCRIPT_STYLE_RE.replace_all(html, "");
    let text = BLOCK_TAG_RE.replace_all(&text, "\n");
    let text = TAG_RE.replace_all(&text, "");
    let text = ENTITY_RE.replace_all(&text, |caps: &regex::Captures| decode_entity(&caps[0]));
    let text = HSPACE_RE.replace_all(&text, " ");
    let text = LINE_EDGE_RE.replace_all(&text, "\n");
    let text = BLANKS_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Minimal entity set for the domain content; anything else degrades to a
/// single space rather than failing. Angle-bracket entities are deliberately
/// not decoded: entities resolve after tag stripping, so a literal `<` here
/// would read as markup on a second pass and the output would no longer be a
/// fixed point of this function.
fn decode_entity(entity: &str) -> String {
    match entity.to_ascii_lowercase().as_str() {
        "&nbsp;" | "&#160;" => " ",
        "&amp;" | "&#38;" => "&",
        "&quot;" => "\"",
        // Accented labels ("Córdoba", "Entre Ríos") must survive intact or
        // the anchor vocabularies stop matching.
        "&aacute;" => "á",
        "&eacute;" => "é",
        "&iacute;" => "í",
        "&oacute;" => "ó",
        "&uacute;" => "ú",
        "&ntilde;" => "ñ",
        _ => " ",
    }
    .to_string()
}

// ── Tests ──
