//! 宿主能力端口
//!
//! 预设层不直接接触编辑器，所有读写都经过 `EditorHost`：
//! - 选项读写与 "是否已被用户设置" 查询
//! - 按模式查询/设置快捷键
//! - 自动命令组的创建、清空与注册
//! - 缓冲区/窗口身份、延迟回调、诊断开关
//!
//! 所有回调都在宿主的单线程事件循环中执行，因此实现无需同步原语。

use serde::Serialize;
use slotmap::new_key_type;
use std::fmt;

use super::autocmd::{Autocommand, GroupId};
use super::keymap::{canonical_lhs, BasicsCommand, Keymap, Mode};
use super::option::OptionValue;

new_key_type! {
    pub struct BufferId;
    pub struct WindowId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct HostVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl HostVersion {
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn at_least(&self, major: u16, minor: u16) -> bool {
        (self.major, self.minor) >= (major, minor)
    }

    /// 解析 `0.10.2`、`v0.9`、`0.11` 等写法
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let value = value.strip_prefix('v').unwrap_or(value);
        let mut parts = value.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next().map(str::parse).transpose().ok()?.unwrap_or(0);
        let patch = parts.next().map(str::parse).transpose().ok()?.unwrap_or(0);
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(major, minor, patch))
    }
}

impl Default for HostVersion {
    fn default() -> Self {
        Self::new(0, 10, 0)
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BufferType {
    Normal,
    Terminal,
}

#[derive(Debug)]
pub enum HostError {
    UnknownOption(String),
    UnsupportedOption { name: String, since: HostVersion },
    InvalidPattern { pattern: String, reason: String },
    InvalidKeymap(String),
    UnknownBuffer,
    UnknownWindow,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::UnknownOption(name) => write!(f, "unknown option: {}", name),
            HostError::UnsupportedOption { name, since } => {
                write!(f, "option '{}' requires host {} or newer", name, since)
            }
            HostError::InvalidPattern { pattern, reason } => {
                write!(f, "invalid autocommand pattern '{}': {}", pattern, reason)
            }
            HostError::InvalidKeymap(lhs) => write!(f, "invalid key sequence: {:?}", lhs),
            HostError::UnknownBuffer => write!(f, "buffer does not exist"),
            HostError::UnknownWindow => write!(f, "window does not exist"),
        }
    }
}

impl std::error::Error for HostError {}

pub type HostResult<T> = std::result::Result<T, HostError>;

pub type DeferredCallback = Box<dyn FnOnce(&mut dyn EditorHost)>;

pub trait EditorHost {
    fn version(&self) -> HostVersion;

    // ==================== 选项 ====================
    fn get_option(&self, name: &str) -> Option<OptionValue>;
    fn set_option(&mut self, name: &str, value: OptionValue) -> HostResult<()>;
    /// 该选项是否已被用户或启动脚本显式设置过
    fn was_explicitly_set(&self, name: &str) -> bool;
    fn get_local_option(&self, win: WindowId, name: &str) -> Option<OptionValue>;
    fn set_local_option(&mut self, win: WindowId, name: &str, value: OptionValue)
        -> HostResult<()>;

    fn get_var(&self, name: &str) -> Option<OptionValue>;
    fn set_var(&mut self, name: &str, value: OptionValue);

    fn enable_filetype_plugins(&mut self);
    fn syntax_enabled(&self) -> bool;
    fn enable_syntax(&mut self);

    // ==================== 快捷键 ====================
    /// 某模式下的全局映射（不含缓冲区局部映射）
    fn get_keymaps(&self, mode: Mode) -> Vec<Keymap>;
    fn set_keymap(&mut self, mode: Mode, keymap: Keymap) -> HostResult<()>;

    fn find_keymap(&self, mode: Mode, lhs: &str) -> Option<Keymap> {
        let lhs = canonical_lhs(lhs);
        self.get_keymaps(mode)
            .into_iter()
            .find(|map| canonical_lhs(&map.lhs) == lhs)
    }

    // ==================== 自动命令 ====================
    /// `clear` 为 true 时清空同名组已有的注册
    fn create_autocommand_group(&mut self, name: &str, clear: bool) -> GroupId;
    fn register_autocommand(&mut self, group: GroupId, autocmd: Autocommand) -> HostResult<()>;
    /// 推迟到事件循环的下一个安全点执行
    fn defer_callback(&mut self, callback: DeferredCallback);

    // ==================== 缓冲区/窗口 ====================
    fn current_buffer(&self) -> BufferId;
    fn current_window(&self) -> WindowId;
    fn buffer_type(&self, buf: BufferId) -> Option<BufferType>;
    /// 当前模式字符串，如 `n`、`V`、`\x16`
    fn mode(&self) -> String;
    /// 当前窗口光标所在行（1 起始）
    fn cursor_line(&self) -> usize;
    /// 当前计数参数，至少为 1
    fn count1(&self) -> usize;
    /// 在第 `after_line` 行之后插入 `count` 个空行；0 表示插在首行之前
    fn append_lines(&mut self, buf: BufferId, after_line: usize, count: usize) -> HostResult<()>;
    fn set_operator_func(&mut self, command: BasicsCommand);
    fn start_insert(&mut self);
    fn highlight_yank(&mut self);
    fn set_diagnostics_enabled(&mut self, buf: BufferId, enabled: bool);
}
