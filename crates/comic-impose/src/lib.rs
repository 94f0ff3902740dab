pub mod constants;
pub mod impose;
pub mod layout;
mod options;
pub mod prepare;
pub mod render;
mod stats;
mod types;

pub use impose::{BookletOutput, create_booklet, list_stream, plan_booklet};
pub use options::*;
pub use prepare::{PrepareReport, prepare};
pub use stats::calculate_statistics;
pub use types::*;
