use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_wheel_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(' ') | KeyCode::Enter => app.spin(),
        KeyCode::Char('e' | 'E') | KeyCode::Tab => {
            app.status_message.clear();
            app.screen = AppScreen::Entries;
        }
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => {
            app.running = false;
        }
        _ => {}
    }
}
