mod engine;
mod types;

pub use engine::{project, run_projection, summarize};
pub use types::{Inputs, Projection, SAFE_WITHDRAWAL_RATE, Summary, YearlyRecord};
