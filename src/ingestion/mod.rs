//! Ingestion implementations.
//!
//! Most callers should use [`crate::trips::load_data`], which reads a city's CSV file with
//! the trip schema, runs the cleaning pipeline, applies filters, and reports the outcome to
//! an optional [`IngestionObserver`].
//!
//! The schema-driven CSV reader is available directly under [`csv`].

pub mod csv;
pub mod observability;

pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    TracingObserver,
};
