// App module for spinny_wheel
// Holds the session state and turns key presses into wheel and entry actions

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, AppScreen, InputState};
