mod engine;
mod types;

pub use engine::{
    PROJECTION_YEARS, REFERENCE_BASE, annual_growth, projection_row, run_projection,
    savings_summary, starting_aum,
};
pub use types::{Inputs, ProjectionResult, ProjectionRow, SavingsSummary};
