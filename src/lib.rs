pub mod analyzer;
pub mod commits;
pub mod config;
pub mod diagnostic;
pub mod domain;
pub mod error;
pub mod git;
pub mod rules;
pub mod tags;
pub mod ui;

pub use error::{Result, TagBumpError};
