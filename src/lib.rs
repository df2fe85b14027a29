// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod duration;
pub mod error;
pub mod history;
pub mod logging;
pub mod mood;
pub mod points;
pub mod runtime;
pub mod session;
pub mod timer;

pub use error::{Error, Result};
