//! Core types: keyword ideas, queries, tracing setup

pub mod keyword;
pub mod query;
pub mod tracing;

pub use keyword::{CompetitionLevel, KeywordIdea, MonthlyVolume};
pub use query::{KeywordQuery, ValidationError};
pub use tracing::{LogFormat, TracingConfig, TracingError, init_tracing};
