pub mod config;
pub mod deploy;
pub mod domain;
pub mod error;
pub mod git;
pub mod hooks;
pub mod logs;
pub mod store;
pub mod tags;
pub mod ui;
pub mod versioning;

pub use error::{Result, VersionHookError};
