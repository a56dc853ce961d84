pub mod history;
pub mod popup;
pub mod wheel;
