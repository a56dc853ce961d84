use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod entries;
mod help;
mod wheel;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Wheel => wheel::handle_wheel_input(app, key),
        AppScreen::Entries => entries::handle_entries_input(app, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::InputState;
    use crate::config::AppConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use spinny_core::entries::parse_entries;

    fn app_with(entries: &str) -> App {
        let config = AppConfig {
            initial_entries: parse_entries(entries),
            ..AppConfig::default()
        };
        App::with_rng(config, StdRng::seed_from_u64(3))
    }

    fn press_all(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            dispatch_input(app, *key);
        }
    }

    #[test]
    fn space_starts_a_spin_and_q_quits() {
        let mut app = app_with("A\nB");
        dispatch_input(&mut app, KeyCode::Char(' '));
        assert!(app.wheel.is_spinning());
        dispatch_input(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = app_with("A");
        dispatch_input(&mut app, KeyCode::F(1));
        assert!(app.show_help);
        dispatch_input(&mut app, KeyCode::Char(' '));
        assert!(!app.wheel.is_spinning());
        dispatch_input(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn typing_an_entry_on_the_entries_screen() {
        let mut app = app_with("A");
        press_all(
            &mut app,
            &[
                KeyCode::Char('e'),
                KeyCode::Char('a'),
                KeyCode::Char('q'),
                KeyCode::Char('!'),
                KeyCode::Backspace,
                KeyCode::Enter,
            ],
        );
        assert_eq!(app.screen, AppScreen::Entries);
        assert!(app.running);
        assert_eq!(app.input_state, InputState::Browsing);
        assert_eq!(app.entries.get(1).map(ToString::to_string), Some("q".to_string()));
    }

    #[test]
    fn escape_cancels_prompt_then_leaves_screen() {
        let mut app = app_with("A\nB");
        press_all(&mut app, &[KeyCode::Char('e'), KeyCode::Char('b'), KeyCode::Char('x')]);
        assert_eq!(app.input_state, InputState::AddingBulk);
        dispatch_input(&mut app, KeyCode::Esc);
        assert_eq!(app.input_state, InputState::Browsing);
        assert_eq!(app.entries.len(), 2);
        dispatch_input(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, AppScreen::Wheel);
    }

    #[test]
    fn selection_wraps_and_delete_removes() {
        let mut app = app_with("A\nB\nC");
        press_all(&mut app, &[KeyCode::Char('e'), KeyCode::Up]);
        assert_eq!(app.selected_entry_index, 2);
        dispatch_input(&mut app, KeyCode::Char('d'));
        assert_eq!(app.entries.len(), 2);
        assert_eq!(app.selected_entry_index, 1);
        press_all(&mut app, &[KeyCode::Char('c')]);
        assert!(app.entries.is_empty());
        dispatch_input(&mut app, KeyCode::Char('r'));
        assert_eq!(app.entries.len(), 37);
    }
}
