//! Service ports: traits + data contracts.

pub mod autocmd;
pub mod config;
pub mod host;
pub mod keymap;
pub mod option;

pub use autocmd::{AutocmdCallback, AutocmdEvent, AutocmdPattern, Autocommand, EventArgs, GroupId};
pub use config::{
    AutocommandsConfig, BasicsConfig, ConfigError, MappingsConfig, OptionsConfig, WinBorders,
};
pub use host::{
    BufferId, BufferType, DeferredCallback, EditorHost, HostError, HostResult, HostVersion,
    WindowId,
};
pub use keymap::{
    canonical_lhs, BasicsCommand, Keymap, KeymapRhs, LineDirection, Mode, ToggleTarget,
};
pub use option::OptionValue;
