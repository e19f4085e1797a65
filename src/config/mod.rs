//! Configuration loading for the availability engine.
//!
//! Engine settings (timezone, output format) come from `engine.yaml`; a
//! roster snapshot of salon data can be loaded from `roster.yaml` into a
//! [`MemoryStore`](crate::store::MemoryStore).
//!
//! # Example
//!
//! ```no_run
//! use salon_availability::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/salon").unwrap();
//! println!("Operating in {}", config.zone().name());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, RosterSnapshot};
