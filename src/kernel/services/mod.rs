//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types the preset layer talks to (host capabilities, config).
//! - `adapters`: concrete hosts and OS specific helpers (settings file, log dir).

pub mod adapters;
pub mod ports;
