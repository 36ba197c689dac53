pub mod app;
pub mod chart;
pub mod cli;
pub mod colors;
pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod repolist;
pub mod snapshot;
pub mod stats;
pub mod totals;

pub use error::{Result, TopLangsError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;
