// gapscan: concept vs application gap detection for student answer data.
//
// This is the library root. Each module corresponds to one stage or surface
// of the analysis pipeline.

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod info;
pub mod model;
pub mod output;
pub mod pipeline;

#[cfg(feature = "web")]
pub mod web;
