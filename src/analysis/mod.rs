// Analysis — accuracy aggregation and concept/application gap detection.

pub mod aggregate;
pub mod gap;
