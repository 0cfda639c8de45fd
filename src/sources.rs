use crate::parser::records::ExtractRules;

/// A lottery game/region whose block we look for, with the label the source
/// sites print for it. Adapting to an upstream label change is a data edit
/// here, not a new code path.
#[derive(Debug)]
pub struct Category {
    pub key: &'static str,
    pub label: &'static str,
}

/// A draw time-slot within a day. An empty label means the game has a single
/// unnamed slot and its anchors carry no session/date suffix.
#[derive(Debug)]
pub struct Session {
    pub key: &'static str,
    pub label: &'static str,
}

/// One upstream page: where to fetch it and which categories it enumerates.
/// A page scoped to a single region gets a single-entry vocabulary.
#[derive(Debug)]
pub struct SourceSpec {
    pub id: &'static str,
    pub url: &'static str,
    pub categories: &'static [Category],
}

#[derive(Debug)]
pub struct GameSpec {
    pub name: &'static str,
    pub sessions: &'static [Session],
    pub sources: &'static [SourceSpec],
    pub rules: ExtractRules,
    /// Whether the game's pages carry draw-level metadata (draw number,
    /// next draw, jackpot) worth scanning for.
    pub draw_meta: bool,
}

impl GameSpec {
    /// Union of the categories across all of this game's sources, first
    /// source wins on duplicates.
    pub fn categories(&self) -> Vec<&'static Category> {
        let mut seen = Vec::new();
        for source in self.sources {
            for cat in source.categories {
                if !seen.iter().any(|c: &&Category| c.key == cat.key) {
                    seen.push(cat);
                }
            }
        }
        seen
    }
}

pub const QUINIELA_SESSIONS: &[Session] = &[
    Session { key: "previa", label: "Previa" },
    Session { key: "primera", label: "Primera" },
    Session { key: "matutina", label: "Matutina" },
    Session { key: "vespertina", label: "Vespertina" },
    Session { key: "nocturna", label: "Nocturna" },
];

const QUINIELA_CATEGORIES: &[Category] = &[
    Category { key: "nacional", label: "Quiniela Nacional" },
    Category { key: "bsas", label: "Quiniela Buenos Aires" },
    Category { key: "cordoba", label: "Quiniela Córdoba" },
    Category { key: "entrerrios", label: "Quiniela Entre Ríos" },
    Category { key: "santafe", label: "Quiniela Santa Fe" },
    Category { key: "montevideo", label: "Quiniela Montevideo" },
];

const ENTRE_RIOS_ONLY: &[Category] =
    &[Category { key: "entrerrios", label: "Quiniela Entre Ríos" }];

const QUINI6_MODALITIES: &[Category] = &[
    Category { key: "tradicional", label: "Tradicional" },
    Category { key: "segunda", label: "La Segunda" },
    Category { key: "revancha", label: "Revancha" },
    Category { key: "siempre_sale", label: "Siempre Sale" },
];

/// Regional quinielas: 20 ranked prize positions of 3-4 digit numbers,
/// rendered zero-padded to 4. The mainland page enumerates every province;
/// the Entre Ríos page covers only its own draw, so it carries a one-entry
/// vocabulary and fills whatever the mainland page missed.
pub const QUINIELA: GameSpec = GameSpec {
    name: "quiniela",
    sessions: QUINIELA_SESSIONS,
    sources: &[
        SourceSpec {
            id: "loteriasmundiales",
            url: "https://www.loteriasmundiales.com.ar/",
            categories: QUINIELA_CATEGORIES,
        },
        SourceSpec {
            id: "entrerios",
            url: "https://www.loteriasmundiales.com.ar/Quinielas/entre-rios",
            categories: ENTRE_RIOS_ONLY,
        },
    ],
    rules: ExtractRules {
        max_entries: 20,
        min_digits: 3,
        max_digits: 4,
        pad_width: 4,
        max_value: None,
        allow_unnumbered: false,
    },
    draw_meta: false,
};

/// Quini 6: four modalities of six lottery balls each, values 00-45. The
/// single unnamed session means modality headings alone anchor the blocks.
pub const QUINI6: GameSpec = GameSpec {
    name: "quini6",
    sessions: &[Session { key: "sorteo", label: "" }],
    sources: &[SourceSpec {
        id: "quiniya",
        url: "https://quiniya.com.ar/",
        categories: QUINI6_MODALITIES,
    }],
    rules: ExtractRules {
        max_entries: 6,
        min_digits: 1,
        max_digits: 2,
        pad_width: 2,
        max_value: Some(45),
        allow_unnumbered: true,
    },
    draw_meta: true,
};

// ── Tests ──
