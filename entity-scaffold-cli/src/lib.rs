//! entity-scaffold CLI library

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod commands;
pub mod output;

pub use commands::{GenerateCommand, OutputArgs, ScaffoldCommand, ValidateCommand};
pub use output::{Emit, OutputTarget};
