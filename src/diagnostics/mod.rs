mod format;
mod location;

pub use format::{format_report, preview};
pub use location::{Location, is_multiline, locate};
