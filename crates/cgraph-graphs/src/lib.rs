//! # cgraph Graphs
//!
//! Collects commits from the GitHub REST API, sums them into Monday-aligned
//! weekly buckets, and renders the totals as a PNG bar chart with plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod chart;
pub mod github;
pub mod manager;
pub mod pacing;
pub mod source;
pub mod traits;
pub mod window;

pub use aggregator::*;
pub use chart::*;
pub use github::*;
pub use manager::*;
pub use pacing::*;
pub use source::*;
pub use traits::*;
pub use window::*;
