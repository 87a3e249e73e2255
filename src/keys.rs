use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crate::state::network::send_requests;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

const GAMES_PAGE: u16 = 10;

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let mut requests = Vec::new();

    // Digits and '.' belong to the focused predictor text field.
    if guard.state.active_tab == MenuItem::Predictor
        && guard.state.predictor.focus.is_text()
        && let Char(ch) = key_event.code
        && (ch.is_ascii_digit() || ch == '.')
        && !key_event.modifiers.contains(KeyModifiers::CONTROL)
    {
        guard.predictor_type(ch);
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1') | KeyCode::F(1), _) => requests = guard.update_tab(MenuItem::Predictor),
        (_, Char('2') | KeyCode::F(2), _) => requests = guard.update_tab(MenuItem::Brands),
        (_, Char('3') | KeyCode::F(3), _) => requests = guard.update_tab(MenuItem::Weekly),
        (_, Char('4') | KeyCode::F(4), _) => requests = guard.update_tab(MenuItem::Model),
        (_, Char('?'), _) => requests = guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Predictor form
        (MenuItem::Predictor, KeyCode::Tab | KeyCode::Down | Char('j'), _) => {
            guard.predictor_focus_next()
        }
        (MenuItem::Predictor, KeyCode::BackTab | KeyCode::Up | Char('k'), _) => {
            guard.predictor_focus_prev()
        }
        (MenuItem::Predictor, KeyCode::Right | Char('l'), _) => guard.predictor_cycle(true),
        (MenuItem::Predictor, KeyCode::Left | Char('h'), _) => guard.predictor_cycle(false),
        (MenuItem::Predictor, KeyCode::Backspace, _) => guard.predictor_backspace(),
        (MenuItem::Predictor, KeyCode::Delete, _) => guard.predictor_clear(),
        (MenuItem::Predictor, KeyCode::Enter, _) => requests = guard.submit_prediction(),

        // Brand rankings
        (MenuItem::Brands, KeyCode::Right | Char('l'), _) => {
            requests = guard.brands_cycle_year(true)
        }
        (MenuItem::Brands, KeyCode::Left | Char('h'), _) => {
            requests = guard.brands_cycle_year(false)
        }
        (MenuItem::Brands, KeyCode::Down | Char('j'), _) => guard.state.brands.scroll_down(),
        (MenuItem::Brands, KeyCode::Up | Char('k'), _) => guard.state.brands.scroll_up(),
        (MenuItem::Brands, Char('r'), _) => requests = guard.brands_refresh(),

        // Weekly predictions
        (MenuItem::Weekly, KeyCode::Down | Char('j'), _) => guard.state.weekly.cursor_down(),
        (MenuItem::Weekly, KeyCode::Up | Char('k'), _) => guard.state.weekly.cursor_up(),
        (MenuItem::Weekly, KeyCode::Enter | Char(' '), _) => guard.weekly_toggle_selected(),
        (MenuItem::Weekly, Char('r'), _) => requests = guard.weekly_reload(),
        (MenuItem::Weekly, KeyCode::PageDown, _) => guard.state.weekly.scroll_games_down(GAMES_PAGE),
        (MenuItem::Weekly, KeyCode::PageUp, _) => guard.state.weekly.scroll_games_up(GAMES_PAGE),
        (MenuItem::Weekly, Char('J'), _) => guard.state.weekly.scroll_games_down(1),
        (MenuItem::Weekly, Char('K'), _) => guard.state.weekly.scroll_games_up(1),

        // Model explanation
        (MenuItem::Model, KeyCode::Down | Char('j'), _) => guard.explanation_scroll_down(),
        (MenuItem::Model, KeyCode::Up | Char('k'), _) => guard.explanation_scroll_up(),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);
    send_requests(network_requests, requests).await;
}
