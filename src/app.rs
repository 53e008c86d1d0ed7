use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::Dashboard;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Ranking,
    Rounds,
    Highlights,
    Champions,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_dashboard_loaded(&mut self, dashboard: Dashboard) {
        self.state.last_error = None;
        self.state.data.load(dashboard);

        // Every load jumps the rounds view to the most recent round,
        // matching how the league reads the sheet week to week.
        let label_count = self.state.data.round_labels.len();
        self.state.rounds.selected = label_count.saturating_sub(1);
        self.state.rounds.scroll_offset = 0;

        // Drop a stale year filter when the year disappeared from the data.
        if let Some(i) = self.state.champions.year_filter {
            if i >= self.state.data.champion_years().len() {
                self.state.champions.year_filter = None;
            }
        }
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Navigation — per-tab view state
    // -----------------------------------------------------------------------

    pub fn rounds_next(&mut self) {
        let count = self.state.data.round_labels.len();
        self.state.rounds.select_next(count);
    }

    pub fn rounds_prev(&mut self) {
        self.state.rounds.select_prev();
    }

    pub fn champions_year_next(&mut self) {
        let count = self.state.data.champion_years().len();
        self.state.champions.cycle_year_next(count);
    }

    pub fn champions_year_prev(&mut self) {
        let count = self.state.data.champion_years().len();
        self.state.champions.cycle_year_prev(count);
    }

    pub fn scroll_down(&mut self) {
        let offset = self.active_scroll_offset();
        *offset = offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        let offset = self.active_scroll_offset();
        *offset = offset.saturating_sub(1);
    }

    fn active_scroll_offset(&mut self) -> &mut u16 {
        match self.state.active_tab {
            MenuItem::Rounds => &mut self.state.rounds.scroll_offset,
            MenuItem::Highlights => &mut self.state.highlights.scroll_offset,
            MenuItem::Champions => &mut self.state.champions.scroll_offset,
            MenuItem::Ranking | MenuItem::Help => &mut self.state.ranking.scroll_offset,
        }
    }

    /// Round label the rounds tab is currently showing.
    pub fn selected_round_label(&self) -> Option<&str> {
        self.state
            .data
            .round_labels
            .get(self.state.rounds.selected)
            .map(String::as_str)
    }
}
