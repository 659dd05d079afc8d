//! zcode-basics - 编辑器基础预设库
//!
//! 模块结构：
//! - kernel::services::ports: 宿主能力 trait 与数据契约（选项、快捷键、自动命令、配置）
//! - kernel::services::adapters: 内存宿主、配置文件与日志目录
//! - kernel::basics: 条件预设（只在用户未设置时生效）

pub mod kernel;

pub use kernel::{ApplyReport, Basics, BasicsConfig, BasicsError, EditorHost, HostVersion};
