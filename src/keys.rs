use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Ranking),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Rounds),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Highlights),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Champions),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Manual reload — the only retry path; the core never retries.
        (_, Char('R'), _) => {
            drop(guard);
            let _ = network_requests.send(NetworkRequest::LoadDashboard).await;
            return;
        }

        // Round selection
        (MenuItem::Rounds, Char('l') | KeyCode::Right, _) => guard.rounds_next(),
        (MenuItem::Rounds, Char('h') | KeyCode::Left, _) => guard.rounds_prev(),

        // Champions year filter
        (MenuItem::Champions, Char('l') | KeyCode::Right, _) => guard.champions_year_next(),
        (MenuItem::Champions, Char('h') | KeyCode::Left, _) => guard.champions_year_prev(),

        // Scrolling
        (_, Char('j') | KeyCode::Down, _) => guard.scroll_down(),
        (_, Char('k') | KeyCode::Up, _) => guard.scroll_up(),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
