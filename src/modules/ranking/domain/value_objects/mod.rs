mod display_score;
mod time_window;

pub use display_score::{round_half_up, DisplayScore, DISPLAY_DIGITS};
pub use time_window::TimeWindow;
