//! Observability for the FitCoach client: subscriber setup and span names.

pub mod attrs;
pub mod tracing_setup;
