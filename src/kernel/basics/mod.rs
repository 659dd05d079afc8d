//! 条件预设：选项、快捷键、自动命令
//!
//! 三遍依次应用，每一遍都不覆盖用户已有的设置：
//! - 选项：宿主报告 "已显式设置" 则跳过
//! - 快捷键：同模式同 lhs 已有全局映射则跳过（已知的宿主默认映射除外）
//! - 自动命令：整组清空后重建
//!
//! 配置校验在任何宿主调用之前完成。

pub mod autocmds;
pub mod borders;
pub mod diagnostic;
pub mod empty_line;
pub mod error;
pub mod mappings;
pub mod options;
pub mod toggles;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::kernel::services::ports::{BasicsCommand, BasicsConfig, EditorHost, LineDirection};

pub use diagnostic::DiagnosticToggles;
pub use empty_line::{EmptyLineOperator, EmptyLineState};
pub use error::{BasicsError, Result};

/// 一次应用的结果汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub options_set: Vec<String>,
    pub options_skipped: Vec<String>,
    pub keymaps_set: Vec<String>,
    pub keymaps_skipped: Vec<String>,
    pub autocommands: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// 已完成；附带可选的反馈文本
    Done(Option<String>),
    /// 宿主需以当前行为目标调用 operatorfunc（相当于 `g@l`）
    Operator,
}

pub struct Basics {
    config: BasicsConfig,
    diagnostics: DiagnosticToggles,
    empty_line: EmptyLineOperator,
    report: ApplyReport,
}

impl Basics {
    pub fn new(config: BasicsConfig) -> Self {
        Self {
            config,
            diagnostics: DiagnosticToggles::new(),
            empty_line: EmptyLineOperator::new(),
            report: ApplyReport::default(),
        }
    }

    /// 合并覆盖配置、校验，然后应用到宿主
    pub fn setup(host: &mut dyn EditorHost, overrides: Option<&Value>) -> Result<Self> {
        let config = BasicsConfig::from_overrides(overrides)?;
        let mut basics = Self::new(config);
        basics.apply(host)?;
        Ok(basics)
    }

    /// 以新配置重新应用；按缓冲区的诊断状态保留
    pub fn reconfigure(
        &mut self,
        host: &mut dyn EditorHost,
        overrides: Option<&Value>,
    ) -> Result<()> {
        self.config = BasicsConfig::from_overrides(overrides)?;
        self.apply(host)?;
        Ok(())
    }

    pub fn apply(&mut self, host: &mut dyn EditorHost) -> Result<&ApplyReport> {
        let mut report = ApplyReport::default();

        options::apply(host, &self.config.options, &mut report)?;
        info!(
            set = report.options_set.len(),
            skipped = report.options_skipped.len(),
            "options applied"
        );

        mappings::apply(host, &self.config, &mut report)?;
        info!(
            set = report.keymaps_set.len(),
            skipped = report.keymaps_skipped.len(),
            "mappings applied"
        );

        autocmds::apply(host, &self.config.autocommands, &mut report)?;
        info!(registered = report.autocommands, "autocommands applied");

        self.report = report;
        Ok(&self.report)
    }

    pub fn config(&self) -> &BasicsConfig {
        &self.config
    }

    pub fn report(&self) -> &ApplyReport {
        &self.report
    }

    pub fn diagnostics(&self) -> &DiagnosticToggles {
        &self.diagnostics
    }

    pub fn empty_line_state(&self) -> EmptyLineState {
        self.empty_line.state()
    }

    /// 切换当前缓冲区的诊断，返回状态文本（不受 `silent` 影响）
    pub fn toggle_diagnostic(&mut self, host: &mut dyn EditorHost) -> String {
        self.diagnostics.toggle(host)
    }

    /// `Some(direction)` 为第一阶段；`None` 为宿主回调的第二阶段
    pub fn put_empty_line(
        &mut self,
        host: &mut dyn EditorHost,
        direction: Option<LineDirection>,
    ) -> Result<CommandOutcome> {
        match direction {
            Some(direction) => {
                self.empty_line.arm(host, direction);
                Ok(CommandOutcome::Operator)
            }
            None => {
                self.empty_line.apply(host)?;
                Ok(CommandOutcome::Done(None))
            }
        }
    }

    pub fn execute(
        &mut self,
        host: &mut dyn EditorHost,
        command: BasicsCommand,
    ) -> Result<CommandOutcome> {
        match command {
            BasicsCommand::Toggle(target) => {
                let text = toggles::run(host, target, &mut self.diagnostics)?;
                let feedback = (!self.config.silent && !text.is_empty()).then_some(text);
                Ok(CommandOutcome::Done(feedback))
            }
            BasicsCommand::PutEmptyLine(direction) => self.put_empty_line(host, Some(direction)),
            BasicsCommand::PutEmptyLineApply => self.put_empty_line(host, None),
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/basics/mod.rs"]
mod tests;
