// Resume vs. job description analysis.
// Implements: the guarded analysis run, chart series, and the HTTP handlers.

pub mod analyzer;
pub mod charts;
pub mod handlers;
