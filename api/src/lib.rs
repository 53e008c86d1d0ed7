pub mod client;
pub mod gviz;
pub mod standings;
pub mod table;

use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the gviz wire format
// ---------------------------------------------------------------------------

/// One league member from the Jogadores tab. The parser already filters
/// to active players, so `active` is true for every row it returns.
#[derive(Debug, Clone, Default)]
pub struct Player {
    pub name: String,
    /// Normalized photo URL. Drive share links are rewritten to the
    /// thumbnail endpoint; anything else passes through. May be empty.
    pub photo_url: String,
    pub role: String,
    pub active: bool,
}

/// Per-player score map from the Rodadas tab, keyed by canonical round
/// label ("R1", "R2", ...). A missing key means the player has no finite
/// score for that round — never stored as zero.
#[derive(Debug, Clone, Default)]
pub struct RoundRecord {
    pub player: String,
    pub scores: HashMap<String, f64>,
}

impl RoundRecord {
    pub fn score(&self, round: &str) -> Option<f64> {
        self.scores.get(round).copied()
    }
}

/// One curated entry from the Zoeira tab.
#[derive(Debug, Clone, Default)]
pub struct HighlightItem {
    pub round: String,
    pub kind: String,
    pub player: String,
    pub text: String,
    pub link: Option<String>,
}

/// One historical result from the CampeoesData tab.
#[derive(Debug, Clone, Default)]
pub struct ChampionEntry {
    pub year: String,
    pub competition: String,
    /// Finishing position. Unparsable positions are kept as 999 so the
    /// row still renders, sorted last.
    pub position: f64,
    pub team: String,
    pub player: Option<String>,
    pub points: Option<f64>,
    pub link: Option<String>,
}

/// Derived ranking line: Player joined with its RoundRecord.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingRow {
    pub name: String,
    pub photo_url: String,
    pub role: String,
    pub total: f64,
    pub average: f64,
    pub rounds_played: usize,
}

/// Parsed Zoeira tab: items plus the distinct round labels present,
/// sorted by round number ascending.
#[derive(Debug, Clone, Default)]
pub struct Highlights {
    pub items: Vec<HighlightItem>,
    pub rounds: Vec<String>,
}

/// Parsed CampeoesData tab: entries plus the distinct years present,
/// sorted descending.
#[derive(Debug, Clone, Default)]
pub struct ChampionsHistory {
    pub entries: Vec<ChampionEntry>,
    pub years: Vec<String>,
}

// ---------------------------------------------------------------------------
// Soft-failure result for optional tabs
// ---------------------------------------------------------------------------

/// Outcome of parsing a tab whose absence is an expected configuration
/// state, not an error. Missing Zoeira/CampeoesData headers produce
/// `NotConfigured` with a remediation hint listing the expected header
/// row; transport failures still surface as `ApiError`.
#[derive(Debug, Clone)]
pub enum TabData<T> {
    Ready(T),
    NotConfigured { message: String },
}

impl<T> TabData<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, TabData::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            TabData::Ready(data) => Some(data),
            TabData::NotConfigured { .. } => None,
        }
    }
}

impl<T: Default> Default for TabData<T> {
    fn default() -> Self {
        TabData::Ready(T::default())
    }
}

// ---------------------------------------------------------------------------
// Champions category
// ---------------------------------------------------------------------------

/// Competition bucket for the champions view. Anything that is not
/// recognizably a cup counts as league play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    #[default]
    Liga,
    Copa,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Liga => "Liga dos Mestres",
            Category::Copa => "Copa dos Mestres",
        }
    }

    /// Normalize a free-form competition name by substring match.
    pub fn from_competition(raw: &str) -> Self {
        let folded = table::fold(raw);
        if folded.contains("copa") {
            Category::Copa
        } else {
            Category::Liga
        }
    }
}
