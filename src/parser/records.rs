use crate::result::RecordEntry;

/// Shape of the numeric records a game's blocks carry.
#[derive(Debug)]
pub struct ExtractRules {
    /// 6 for lottery-ball modalities, 20 for ranked-prize draws.
    pub max_entries: usize,
    pub min_digits: usize,
    pub max_digits: usize,
    pub pad_width: usize,
    /// Highest legal value (45 for Quini 6 balls); tokens above it are
    /// dropped silently, the rest of the block is kept.
    pub max_value: Option<u32>,
    /// Whether the game renders values without position numbers (Quini 6
    /// ball lists). Games with numbered positions must never fall back to
    /// positional-only capture: a pending session with a stray numeric
    /// token, or a block whose indices continue a page-wide count, would
    /// turn into fabricated results.
    pub allow_unnumbered: bool,
}

/// Outcome of one extraction strategy. Absence is data, not an error: the
/// assembler falls through to the next strategy on `NotFound` and keeps the
/// slot's default on a full miss.
#[derive(Debug, PartialEq, Eq)]
pub enum Extraction {
    Found(Vec<RecordEntry>),
    NotFound,
}

/// Extract the ordered (position, value) records of one block span. Tries
/// the strict numbered scan first; the positional-only fallback is only in
/// the chain for games that print values without position numbers. Never
/// errors and never panics; a span with no usable records yields `NotFound`.
///
/// Guarantee: a `Found` sequence always has positions exactly `1..=k`.
pub fn extract(span: &str, rules: &ExtractRules) -> Extraction {
    if let Extraction::Found(entries) = numbered(span, rules) {
        return Extraction::Found(entries);
    }
    if rules.allow_unnumbered {
        return bare(span, rules);
    }
    Extraction::NotFound
}

/// Line-oriented two-token scan: a line holding exactly the next expected
/// position followed by a line holding an in-range value appends one record.
/// Noise before the first pair is skipped freely; once records have started,
/// only a known lottery-code trailer may be skipped; anything else ends the
/// scan so a broken sequence never bleeds into the adjacent block.
fn numbered(span: &str, rules: &ExtractRules) -> Extraction {
    let lines: Vec<&str> = span.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let mut entries: Vec<RecordEntry> = Vec::new();
    let mut i = 0;

    while i + 1 < lines.len() && entries.len() < rules.max_entries {
        let expected = entries.len() as u32 + 1;
        let position_matches = lines[i].parse::<u32>().ok() == Some(expected);
        if position_matches {
            if let Some(num) = value_token(lines[i + 1], rules) {
                entries.push(RecordEntry { pos: expected, num });
                i += 2;
                continue;
            }
        }
        if entries.is_empty() {
            i += 1;
            continue;
        }
        if is_lottery_code(lines[i]) {
            i += 1;
            continue;
        }
        break;
    }

    if entries.is_empty() {
        Extraction::NotFound
    } else {
        Extraction::Found(entries)
    }
}

/// Positional-only capture for blocks without position numbering: every
/// in-range numeric token is taken in order and assigned positions 1..k.
/// Out-of-range values are dropped without ending the capture; the first
/// non-numeric token after capture begins ends it.
fn bare(span: &str, rules: &ExtractRules) -> Extraction {
    let mut entries: Vec<RecordEntry> = Vec::new();
    let mut started = false;

    'scan: for line in span.lines().map(str::trim).filter(|l| !l.is_empty()) {
        for token in line.split_whitespace() {
            if entries.len() >= rules.max_entries {
                break 'scan;
            }
            let numeric = token.chars().all(|c| c.is_ascii_digit())
                && token.len() >= rules.min_digits
                && token.len() <= rules.max_digits;
            if numeric {
                started = true;
                if value_token(token, rules).is_some() {
                    entries.push(RecordEntry {
                        pos: entries.len() as u32 + 1,
                        num: pad(token, rules.pad_width),
                    });
                }
                continue;
            }
            if started {
                break 'scan;
            }
        }
    }

    if entries.is_empty() {
        Extraction::NotFound
    } else {
        Extraction::Found(entries)
    }
}

/// True when a numbered span looks like a continuation of a page-wide
/// running index (first candidate pair starts above 1). The caller logs
/// these instead of silently misparsing them.
pub fn looks_like_running_index(span: &str, rules: &ExtractRules) -> bool {
    let lines: Vec<&str> = span.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    for pair in lines.windows(2) {
        if let Ok(pos) = pair[0].parse::<u32>() {
            if pos as usize <= rules.max_entries && value_token(pair[1], rules).is_some() {
                return pos > 1;
            }
        }
    }
    false
}

/// Padded value if the token is an in-range numeric value, else `None`.
fn value_token(token: &str, rules: &ExtractRules) -> Option<String> {
    if !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if token.len() < rules.min_digits || token.len() > rules.max_digits {
        return None;
    }
    if let Some(max) = rules.max_value {
        if token.parse::<u32>().ok()? > max {
            return None;
        }
    }
    Some(pad(token, rules.pad_width))
}

fn pad(token: &str, width: usize) -> String {
    format!("{:0>width$}", token)
}

/// Internal lottery code trailer like "EOCZ": 3-5 uppercase letters.
fn is_lottery_code(line: &str) -> bool {
    (3..=5).contains(&line.len()) && line.chars().all(|c| c.is_ascii_uppercase())
}

// ── Tests ──
