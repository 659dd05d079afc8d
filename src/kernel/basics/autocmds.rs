//! 自动命令预设：统一放在一个组里，每次应用先清空再重建

use tracing::warn;

use super::ApplyReport;
use crate::kernel::services::ports::{
    AutocmdEvent, Autocommand, AutocommandsConfig, BufferType, EditorHost, GroupId, HostResult,
    OptionValue,
};

pub const GROUP_NAME: &str = "ZcodeBasicsAutocommands";

/// 进入行/块可视模式
pub const ENTER_LINEWISE_VISUAL: &str = "*:[V\u{16}]*";
/// 离开行/块可视模式
pub const LEAVE_LINEWISE_VISUAL: &str = "[V\u{16}]*:*";

pub(super) fn apply(
    host: &mut dyn EditorHost,
    config: &AutocommandsConfig,
    report: &mut ApplyReport,
) -> HostResult<()> {
    let group = host.create_autocommand_group(GROUP_NAME, true);

    if config.basic {
        register(
            host,
            group,
            Autocommand::new(
                AutocmdEvent::TextYankPost,
                "*",
                "Highlight yanked text",
                |host, _| host.highlight_yank(),
            ),
            report,
        )?;
        register(
            host,
            group,
            Autocommand::new(
                AutocmdEvent::TermOpen,
                "term://*",
                "Start builtin terminal in Insert mode",
                |host, args| {
                    let buf = args.buf;
                    host.defer_callback(Box::new(move |host: &mut dyn EditorHost| {
                        // 终端可能在回调执行前已被关闭或切走
                        let still_current = host.current_buffer() == buf
                            && host.buffer_type(buf) == Some(BufferType::Terminal);
                        if still_current {
                            host.start_insert();
                        }
                    }));
                },
            ),
            report,
        )?;
    }

    if config.relnum_in_visual_mode {
        register(
            host,
            group,
            Autocommand::new(
                AutocmdEvent::ModeChanged,
                ENTER_LINEWISE_VISUAL,
                "Show relative line numbers",
                |host, _| set_relative_number(host, true),
            ),
            report,
        )?;
        register(
            host,
            group,
            Autocommand::new(
                AutocmdEvent::ModeChanged,
                LEAVE_LINEWISE_VISUAL,
                "Hide relative line numbers",
                |host, _| {
                    // `V` 与 `^V` 之间切换时保持显示
                    let still_visual = host.mode().starts_with(['V', '\u{16}']);
                    set_relative_number(host, still_visual);
                },
            ),
            report,
        )?;
    }

    Ok(())
}

fn register(
    host: &mut dyn EditorHost,
    group: GroupId,
    autocmd: Autocommand,
    report: &mut ApplyReport,
) -> HostResult<()> {
    tracing::debug!(event = ?autocmd.event, pattern = %autocmd.pattern, "register autocommand");
    host.register_autocommand(group, autocmd)?;
    report.autocommands += 1;
    Ok(())
}

fn set_relative_number(host: &mut dyn EditorHost, on: bool) {
    let win = host.current_window();
    if let Err(e) = host.set_local_option(win, "relativenumber", OptionValue::Bool(on)) {
        warn!(error = %e, "set relativenumber failed");
    }
}
