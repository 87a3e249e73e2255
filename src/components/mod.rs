pub mod explanation;
pub mod metrics;
pub mod week_table;
