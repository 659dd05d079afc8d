use rustc_hash::FxHashMap;

use crate::kernel::services::ports::{BufferId, EditorHost};

pub const ENABLED_TEXT: &str = "  diagnostic";
pub const DISABLED_TEXT: &str = "nodiagnostic";

/// 按缓冲区记录的诊断开关；缺省视为开启
///
/// 条目在首次切换时创建，之后不主动移除。
#[derive(Debug, Default)]
pub struct DiagnosticToggles {
    states: FxHashMap<BufferId, bool>,
}

impl DiagnosticToggles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, buf: BufferId) -> bool {
        self.states.get(&buf).copied().unwrap_or(true)
    }

    pub fn toggle(&mut self, host: &mut dyn EditorHost) -> String {
        let buf = host.current_buffer();
        let enabled = !self.is_enabled(buf);

        host.set_diagnostics_enabled(buf, enabled);
        self.states.insert(buf, enabled);
        tracing::debug!(?buf, enabled, "diagnostic toggled");

        let text = if enabled { ENABLED_TEXT } else { DISABLED_TEXT };
        text.to_string()
    }
}
