use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use liga_api::{ChampionsHistory, Highlights, Player, RoundRecord, TabData};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    /// Fetch all four tabs concurrently and replace the snapshot.
    LoadDashboard,
}

/// One complete, immutable data snapshot. Produced fresh on every load;
/// the app swaps it in wholesale so a stale in-flight response can never
/// write into a view that has moved on.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub players: Vec<Player>,
    pub rounds: Vec<RoundRecord>,
    pub highlights: TabData<Highlights>,
    pub champions: TabData<ChampionsHistory>,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    DashboardLoaded { dashboard: Dashboard },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
