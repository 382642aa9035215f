//! # cgraph Common
//!
//! Shared types, errors, and the logging bootstrap used by every crate in
//! the cgraph workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{CgraphError, Result};
pub use logging::{init_default_logging, init_logging, LoggingConfig};
pub use types::*;
pub use utils::*;
