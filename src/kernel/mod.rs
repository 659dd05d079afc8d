//! Headless preset core (config → options / mappings / autocommands).

pub mod basics;
pub mod services;

pub use basics::{ApplyReport, Basics, BasicsError, CommandOutcome};
pub use services::adapters::MemoryHost;
pub use services::ports::{BasicsConfig, EditorHost, HostVersion};
