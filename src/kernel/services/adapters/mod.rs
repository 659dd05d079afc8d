//! Service adapters: host implementations and OS specific helpers.

pub mod memory;
pub mod settings;

pub use memory::{AutocmdSnapshot, GroupSnapshot, HostSnapshot, MemoryHost};
pub use settings::{
    ensure_log_dir, get_log_dir, get_settings_path, load_overrides, load_overrides_from,
};
