//! 选项预设
//!
//! 每个选项写入前先询问宿主是否已被显式设置，已设置则跳过。
//! `shortmess` 与 `fillchars`（边框字形）是追加式的，不做跳过判断。

use tracing::debug;

use super::borders;
use super::ApplyReport;
use crate::kernel::services::ports::option::{append_flags, append_map_entries};
use crate::kernel::services::ports::{
    EditorHost, HostResult, HostVersion, OptionValue, OptionsConfig,
};

#[derive(Clone, Copy)]
enum Preset {
    Bool(bool),
    Int(i64),
    Str(&'static str),
}

impl From<Preset> for OptionValue {
    fn from(value: Preset) -> Self {
        match value {
            Preset::Bool(v) => OptionValue::Bool(v),
            Preset::Int(v) => OptionValue::Int(v),
            Preset::Str(v) => OptionValue::Str(v.to_string()),
        }
    }
}

const BASIC: &[(&str, Preset)] = &[
    // ==================== 通用 ====================
    ("undofile", Preset::Bool(true)),
    ("backup", Preset::Bool(false)),
    ("writebackup", Preset::Bool(false)),
    ("mouse", Preset::Str("a")),
    // ==================== 外观 ====================
    ("breakindent", Preset::Bool(true)),
    ("cursorline", Preset::Bool(true)),
    ("linebreak", Preset::Bool(true)),
    ("number", Preset::Bool(true)),
    ("splitbelow", Preset::Bool(true)),
    ("splitright", Preset::Bool(true)),
    ("ruler", Preset::Bool(false)),
    ("showmode", Preset::Bool(false)),
    ("wrap", Preset::Bool(false)),
    ("signcolumn", Preset::Str("yes")),
    ("fillchars", Preset::Str("eob: ")),
    // ==================== 编辑 ====================
    ("ignorecase", Preset::Bool(true)),
    ("incsearch", Preset::Bool(true)),
    ("infercase", Preset::Bool(true)),
    ("smartcase", Preset::Bool(true)),
    ("smartindent", Preset::Bool(true)),
    ("completeopt", Preset::Str("menuone,noinsert,noselect")),
    ("virtualedit", Preset::Str("block")),
    ("formatoptions", Preset::Str("qjl1")),
];

const EXTRA_UI: &[(&str, Preset)] = &[
    ("pumblend", Preset::Int(10)),
    ("pumheight", Preset::Int(10)),
    ("winblend", Preset::Int(10)),
    ("listchars", Preset::Str("tab:> ,extends:…,precedes:…,nbsp:␣")),
    ("list", Preset::Bool(true)),
];

/// 只在部分宿主版本上写入的基础选项
fn versioned_basic(version: HostVersion) -> Vec<(&'static str, Preset)> {
    let mut presets = Vec::new();
    if version.at_least(0, 9) {
        presets.push(("splitkeep", Preset::Str("screen")));
    }
    // 0.10 起宿主会自动检测真彩色
    if !version.at_least(0, 10) {
        presets.push(("termguicolors", Preset::Bool(true)));
    }
    presets
}

/// 预设中由是否已设置决定写入与否的选项名（含该版本特有的选项）
pub fn preset_option_names(config: &OptionsConfig, version: HostVersion) -> Vec<&'static str> {
    let mut names = Vec::new();
    if config.basic {
        names.extend(BASIC.iter().map(|(name, _)| *name));
        names.extend(versioned_basic(version).into_iter().map(|(name, _)| name));
    }
    if config.extra_ui {
        names.extend(EXTRA_UI.iter().map(|(name, _)| *name));
    }
    names
}

/// 该选项在当前宿主版本下的预设值
pub fn preset_value(name: &str, host: &dyn EditorHost) -> Option<OptionValue> {
    versioned_basic(host.version())
        .into_iter()
        .chain(BASIC.iter().chain(EXTRA_UI).copied())
        .find(|(n, _)| *n == name)
        .map(|(_, v)| OptionValue::from(v))
}

pub(super) fn apply(
    host: &mut dyn EditorHost,
    config: &OptionsConfig,
    report: &mut ApplyReport,
) -> HostResult<()> {
    if config.basic {
        apply_basic(host, report)?;
    }

    if config.extra_ui {
        apply_extra_ui(host, report)?;
    }

    if let Some(glyphs) = borders::fillchars(config.win_borders) {
        append_option(host, "fillchars", glyphs, append_map_entries)?;
        debug!(style = config.win_borders.name(), "window border glyphs appended");
    }

    Ok(())
}

fn apply_basic(host: &mut dyn EditorHost, report: &mut ApplyReport) -> HostResult<()> {
    if host.get_var("mapleader").is_none() {
        host.set_var("mapleader", OptionValue::from(" "));
    }

    for &(name, value) in BASIC {
        set_default(host, name, value.into(), report)?;
    }
    host.enable_filetype_plugins();

    let version = host.version();
    let flags = if version.at_least(0, 9) { "WcC" } else { "Wc" };
    append_option(host, "shortmess", flags, append_flags)?;

    for (name, value) in versioned_basic(version) {
        set_default(host, name, value.into(), report)?;
    }

    Ok(())
}

fn apply_extra_ui(host: &mut dyn EditorHost, report: &mut ApplyReport) -> HostResult<()> {
    for &(name, value) in EXTRA_UI {
        set_default(host, name, value.into(), report)?;
    }

    if !host.syntax_enabled() {
        host.enable_syntax();
    }

    Ok(())
}

fn set_default(
    host: &mut dyn EditorHost,
    name: &str,
    value: OptionValue,
    report: &mut ApplyReport,
) -> HostResult<()> {
    if host.was_explicitly_set(name) {
        debug!(option = name, "option already set, skipping");
        report.options_skipped.push(name.to_string());
        return Ok(());
    }

    debug!(option = name, value = %value, "set option");
    host.set_option(name, value)?;
    report.options_set.push(name.to_string());
    Ok(())
}

fn append_option(
    host: &mut dyn EditorHost,
    name: &str,
    addition: &str,
    merge: fn(&str, &str) -> String,
) -> HostResult<()> {
    let current = host
        .get_option(name)
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    let next = merge(&current, addition);
    if next != current {
        host.set_option(name, OptionValue::Str(next))?;
    }
    Ok(())
}
