//! Scenario-based cash-flow projection.

pub mod cache;
pub mod error;
pub mod projector;
pub mod scenario;
pub mod types;


pub use cache::{ProjectionCache, ProjectionKey};
pub use error::ProjectionError;
pub use projector::{CashFlowProjector, DEFAULT_LOOKBACK_MONTHS, MAX_PROJECTION_MONTHS};
pub use scenario::Scenario;
pub use types::{CashFlowProjection, HistoricalBaseline, ScenarioProjections};
