//! 选项切换快捷键：`前缀 + 单字符`

use super::diagnostic::DiagnosticToggles;
use crate::kernel::services::ports::{
    BasicsCommand, EditorHost, HostResult, Keymap, OptionValue, ToggleTarget,
};

pub const TOGGLES: &[(char, ToggleTarget, &str)] = &[
    ('b', ToggleTarget::Background, "Toggle 'background'"),
    ('c', ToggleTarget::CursorLine, "Toggle 'cursorline'"),
    ('C', ToggleTarget::CursorColumn, "Toggle 'cursorcolumn'"),
    ('d', ToggleTarget::Diagnostic, "Toggle diagnostic"),
    ('h', ToggleTarget::SearchHighlight, "Toggle search highlight"),
    ('i', ToggleTarget::IgnoreCase, "Toggle 'ignorecase'"),
    ('l', ToggleTarget::List, "Toggle 'list'"),
    ('n', ToggleTarget::Number, "Toggle 'number'"),
    ('r', ToggleTarget::RelativeNumber, "Toggle 'relativenumber'"),
    ('s', ToggleTarget::Spell, "Toggle 'spell'"),
    ('w', ToggleTarget::Wrap, "Toggle 'wrap'"),
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scope {
    Global,
    Window,
}

fn option_of(target: ToggleTarget) -> Option<(&'static str, Scope)> {
    let option = match target {
        ToggleTarget::CursorLine => ("cursorline", Scope::Window),
        ToggleTarget::CursorColumn => ("cursorcolumn", Scope::Window),
        ToggleTarget::IgnoreCase => ("ignorecase", Scope::Global),
        ToggleTarget::List => ("list", Scope::Window),
        ToggleTarget::Number => ("number", Scope::Window),
        ToggleTarget::RelativeNumber => ("relativenumber", Scope::Window),
        ToggleTarget::Spell => ("spell", Scope::Window),
        ToggleTarget::Wrap => ("wrap", Scope::Window),
        ToggleTarget::Background | ToggleTarget::Diagnostic | ToggleTarget::SearchHighlight => {
            return None
        }
    };
    Some(option)
}

pub fn keymaps(prefix: &str) -> Vec<Keymap> {
    if prefix.is_empty() {
        return Vec::new();
    }

    TOGGLES
        .iter()
        .map(|&(suffix, target, desc)| {
            let lhs = format!("{}{}", prefix, suffix);
            Keymap::command(&lhs, BasicsCommand::Toggle(target)).with_desc(desc)
        })
        .collect()
}

/// 执行切换，返回宿主 `:set name?` 形式的状态文本
pub fn run(
    host: &mut dyn EditorHost,
    target: ToggleTarget,
    diagnostics: &mut DiagnosticToggles,
) -> HostResult<String> {
    match target {
        ToggleTarget::Diagnostic => Ok(diagnostics.toggle(host)),
        ToggleTarget::Background => {
            let dark = host
                .get_option("background")
                .is_some_and(|v| v.as_str() == Some("dark"));
            let next = if dark { "light" } else { "dark" };
            host.set_option("background", OptionValue::from(next))?;
            Ok(next.to_string())
        }
        ToggleTarget::SearchHighlight => {
            let on = host
                .get_var("v:hlsearch")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            host.set_var("v:hlsearch", OptionValue::Int(if on { 0 } else { 1 }));
            Ok(status_text("hlsearch", !on))
        }
        other => {
            let Some((name, scope)) = option_of(other) else {
                return Ok(String::new());
            };
            let win = host.current_window();
            let current = match scope {
                Scope::Window => host.get_local_option(win, name),
                Scope::Global => host.get_option(name),
            };
            let next = !current.and_then(|v| v.as_bool()).unwrap_or(false);
            match scope {
                Scope::Window => host.set_local_option(win, name, next.into())?,
                Scope::Global => host.set_option(name, next.into())?,
            }
            Ok(status_text(name, next))
        }
    }
}

fn status_text(name: &str, on: bool) -> String {
    if on {
        format!("  {}", name)
    } else {
        format!("no{}", name)
    }
}
