// UI module for spinny_wheel
// Draws the wheel, the entry editor and the help overlay

pub mod effects;
pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    if app.show_help {
        screens::help::render_help(f);
        return;
    }

    match app.screen {
        AppScreen::Wheel => screens::wheel::render_wheel_screen(app, f),
        AppScreen::Entries => screens::entries::render_entries_screen(app, f),
    }
}
