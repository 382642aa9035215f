//! # cgraph
//!
//! Generates a weekly commit bar chart for a GitHub organization's public
//! repositories.
//!
//! This is the binary crate that loads configuration, initializes logging,
//! and runs one aggregation and render pass.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;

pub use app::*;
pub use error::*;
