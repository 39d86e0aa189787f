pub mod constants;
pub mod string_utils;
pub mod time_format;

pub use constants::*;
pub use string_utils::{safe_truncate_chars, truncate_with_ellipsis};
pub use time_format::{format_clock, percent_of, rounded_percent};
