// Monitor Application Layer

pub mod commands;
pub mod error;
pub mod metrics;
pub mod report;
pub mod state;

pub use error::AppError;
pub use metrics::Metrics;
pub use report::PassSummary;
pub use state::AppState;
