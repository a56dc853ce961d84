use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen, InputState};
use crossterm::event::KeyCode;

pub fn handle_entries_input(app: &mut App, key: KeyCode) {
    if app.input_state.is_text_entry() {
        handle_text_input(app, key);
        return;
    }

    let len = app.entries.len();
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.selected_entry_index = wrap_decrement(app.selected_entry_index, len);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.selected_entry_index = wrap_increment(app.selected_entry_index, len);
        }
        KeyCode::Char('a') => app.begin_input(InputState::AddingEntry),
        KeyCode::Char('b') => app.begin_input(InputState::AddingBulk),
        KeyCode::Char('g') => app.begin_input(InputState::EnteringRange),
        KeyCode::Enter if len > 0 => {
            app.begin_input(InputState::EditingEntry(app.selected_entry_index));
        }
        KeyCode::Char('d') | KeyCode::Delete if len > 0 => app.remove_selected(),
        KeyCode::Char('c') => app.clear_entries(),
        KeyCode::Char('r') => app.reset_to_roulette(),
        KeyCode::Char(' ') => app.spin(),
        KeyCode::Esc | KeyCode::Tab | KeyCode::Char('w') => {
            app.screen = AppScreen::Wheel;
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        _ => {}
    }
}

fn handle_text_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c) => app.current_input.push(c),
        KeyCode::Backspace => {
            app.current_input.pop();
        }
        KeyCode::Enter => app.submit_input(),
        KeyCode::Esc => app.cancel_input(),
        _ => {}
    }
}
