pub mod aggregation;
pub mod filter;
pub mod metrics;
pub mod report;
pub mod service;
