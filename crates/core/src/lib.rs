//! Wheel geometry, spin resolution and entry policy shared by the Spinny
//! Wheel front ends.

pub mod entries;
pub mod geometry;
pub mod history;
pub mod palette;
pub mod spin;
pub mod wheel;

pub use entries::{Entry, EntryError, EntryList, EntryPolicy};
pub use history::{WinnerHistory, WinnerRecord};
pub use palette::Rgb;
pub use spin::SpinOutcome;
pub use wheel::{
    Celebration, IgnoredReason, SpinCompletion, SpinRequest, SpinStarted, SpinState, Wheel,
    WheelOptions,
};
