use crate::app::MenuItem;
use crate::state::messages::Dashboard;
use liga_api::standings::{self, ChampionGroup, HighlightGroup};
use liga_api::{RankingRow, TabData};

// ---------------------------------------------------------------------------
// Dashboard data + derived views
// ---------------------------------------------------------------------------

/// The loaded snapshot plus everything derived from it. Rebuilt in one
/// shot on every DashboardLoaded, so the derived views can never drift
/// from the raw data.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub loaded: bool,
    pub dashboard: Dashboard,
    pub ranking: Vec<RankingRow>,
    pub round_labels: Vec<String>,
    pub latest_round: Option<u32>,
    pub highlight_groups: Vec<HighlightGroup>,
    pub champion_groups: Vec<ChampionGroup>,
}

impl DashboardState {
    pub fn load(&mut self, dashboard: Dashboard) {
        self.ranking = standings::compute_ranking(&dashboard.players, &dashboard.rounds);
        self.round_labels = standings::round_labels(&dashboard.rounds);
        self.latest_round = standings::latest_round(&dashboard.rounds);

        self.highlight_groups = match &dashboard.highlights {
            TabData::Ready(h) => standings::group_highlights(&h.items),
            TabData::NotConfigured { .. } => Vec::new(),
        };
        self.champion_groups = match &dashboard.champions {
            TabData::Ready(c) => standings::group_champions(&c.entries),
            TabData::NotConfigured { .. } => Vec::new(),
        };

        self.dashboard = dashboard;
        self.loaded = true;
    }

    pub fn champion_years(&self) -> &[String] {
        match &self.dashboard.champions {
            TabData::Ready(c) => &c.years,
            TabData::NotConfigured { .. } => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Per-tab view state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RankingViewState {
    pub scroll_offset: u16,
}

#[derive(Debug, Default)]
pub struct RoundsViewState {
    /// Index into DashboardState::round_labels.
    pub selected: usize,
    pub scroll_offset: u16,
}

impl RoundsViewState {
    pub fn select_next(&mut self, label_count: usize) {
        if self.selected + 1 < label_count {
            self.selected += 1;
            self.scroll_offset = 0;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.scroll_offset = 0;
        }
    }
}

#[derive(Debug, Default)]
pub struct HighlightsViewState {
    pub scroll_offset: u16,
}

#[derive(Debug, Default)]
pub struct ChampionsViewState {
    /// None shows every year; Some(i) filters to champion_years()[i].
    pub year_filter: Option<usize>,
    pub scroll_offset: u16,
}

impl ChampionsViewState {
    /// Cycle Todos → years[0] → years[1] → ... → Todos.
    pub fn cycle_year_next(&mut self, year_count: usize) {
        self.year_filter = match self.year_filter {
            None if year_count > 0 => Some(0),
            Some(i) if i + 1 < year_count => Some(i + 1),
            _ => None,
        };
        self.scroll_offset = 0;
    }

    pub fn cycle_year_prev(&mut self, year_count: usize) {
        self.year_filter = match self.year_filter {
            None if year_count > 0 => Some(year_count - 1),
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
        self.scroll_offset = 0;
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub data: DashboardState,
    pub ranking: RankingViewState,
    pub rounds: RoundsViewState,
    pub highlights: HighlightsViewState,
    pub champions: ChampionsViewState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
