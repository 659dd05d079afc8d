//! 快捷键预设
//!
//! 按模式逐个检查：该模式下已有同 lhs 的全局映射则跳过，
//! 除非它是宿主自带的、已知可覆盖的默认映射。

use tracing::debug;

use super::toggles;
use super::ApplyReport;
use crate::kernel::services::ports::{
    canonical_lhs, BasicsCommand, BasicsConfig, EditorHost, HostResult, HostVersion, Keymap,
    LineDirection, Mode,
};

use crate::kernel::services::ports::Mode::{CommandLine, Insert, Normal, Terminal, Visual};

/// 宿主自带的默认映射特征（按引入版本）
struct KnownDefault {
    mode: Mode,
    lhs: &'static str,
    since: HostVersion,
    matches: fn(&Keymap) -> bool,
}

fn is_redraw_and_nohl(map: &Keymap) -> bool {
    map.rhs.text().contains("nohl")
}

fn is_signature_help(map: &Keymap) -> bool {
    map.desc.as_deref().is_some_and(|d| d.contains("signature"))
}

fn is_search_forward(map: &Keymap) -> bool {
    map.rhs.text() == r#"y/\V<C-R>"<CR>"#
}

fn is_search_backward(map: &Keymap) -> bool {
    map.rhs.text() == r#"y?\V<C-R>"<CR>"#
}

const KNOWN_DEFAULTS: &[KnownDefault] = &[
    KnownDefault {
        mode: Normal,
        lhs: "<C-L>",
        since: HostVersion::new(0, 6, 0),
        matches: is_redraw_and_nohl,
    },
    KnownDefault {
        mode: Visual,
        lhs: "*",
        since: HostVersion::new(0, 8, 0),
        matches: is_search_forward,
    },
    KnownDefault {
        mode: Visual,
        lhs: "#",
        since: HostVersion::new(0, 8, 0),
        matches: is_search_backward,
    },
    KnownDefault {
        mode: Insert,
        lhs: "<C-S>",
        since: HostVersion::new(0, 11, 0),
        matches: is_signature_help,
    },
];

/// 已存在的映射是否为可覆盖的宿主默认映射
pub fn is_known_default(version: HostVersion, mode: Mode, existing: &Keymap) -> bool {
    KNOWN_DEFAULTS.iter().any(|known| {
        known.mode == mode
            && canonical_lhs(&existing.lhs) == known.lhs
            && version >= known.since
            && (known.matches)(existing)
    })
}

type Entry = (&'static [Mode], Keymap);

fn entry(modes: &'static [Mode], keymap: Keymap) -> Entry {
    (modes, keymap)
}

pub fn basic_keymaps() -> Vec<Entry> {
    vec![
        // 无计数时按屏幕行移动
        entry(
            &[Normal, Visual],
            Keymap::expr("j", "v:count == 0 ? 'gj' : 'j'").with_desc("Move down by visible lines"),
        ),
        entry(
            &[Normal, Visual],
            Keymap::expr("k", "v:count == 0 ? 'gk' : 'k'").with_desc("Move up by visible lines"),
        ),
        entry(
            &[Normal, Visual],
            Keymap::keys("gy", "\"+y").with_desc("Copy to system clipboard"),
        ),
        entry(
            &[Normal],
            Keymap::keys("gp", "\"+p").with_desc("Paste from system clipboard"),
        ),
        // Visual 下用 `P` 粘贴，不覆盖寄存器
        entry(
            &[Visual],
            Keymap::keys("gp", "\"+P").with_desc("Paste from system clipboard"),
        ),
        entry(
            &[Normal],
            Keymap::expr("gV", "\"`[\" . strpart(getregtype(), 0, 1) . \"`]\"")
                .with_desc("Visually select changed text"),
        ),
        entry(
            &[Visual],
            Keymap::keys("g/", "<Esc>/\\%V")
                .with_desc("Search inside visual selection")
                .loud(),
        ),
        entry(
            &[Visual],
            Keymap::keys("*", r#"y/\V<C-R>=escape(@", '/\')<CR><CR>"#).with_desc("Search forward"),
        ),
        entry(
            &[Visual],
            Keymap::keys("#", r#"y?\V<C-R>=escape(@", '?\')<CR><CR>"#).with_desc("Search backward"),
        ),
        entry(
            &[Normal],
            Keymap::command("go", BasicsCommand::PutEmptyLine(LineDirection::Below))
                .with_desc("Put empty line below"),
        ),
        entry(
            &[Normal],
            Keymap::command("gO", BasicsCommand::PutEmptyLine(LineDirection::Above))
                .with_desc("Put empty line above"),
        ),
        entry(
            &[Normal, Insert, Visual],
            Keymap::keys("<C-S>", "<Esc><Cmd>silent! update | redraw<CR>").with_desc("Save"),
        ),
        entry(
            &[Normal],
            Keymap::keys("<C-Z>", "[s1z=").with_desc("Correct latest misspelled word"),
        ),
        entry(
            &[Insert],
            Keymap::keys("<C-Z>", "<C-g>u<Esc>[s1z=`]a<C-g>u")
                .with_desc("Correct latest misspelled word"),
        ),
    ]
}

pub fn window_keymaps() -> Vec<Entry> {
    vec![
        entry(&[Normal], Keymap::keys("<C-H>", "<C-w>h").with_desc("Focus on left window")),
        entry(&[Normal], Keymap::keys("<C-J>", "<C-w>j").with_desc("Focus on below window")),
        entry(&[Normal], Keymap::keys("<C-K>", "<C-w>k").with_desc("Focus on above window")),
        entry(&[Normal], Keymap::keys("<C-L>", "<C-w>l").with_desc("Focus on right window")),
        // 调整大小时尊重计数
        entry(
            &[Normal],
            Keymap::expr("<C-Left>", "\"<Cmd>vertical resize -\" . v:count1 . \"<CR>\"")
                .with_desc("Decrease window width"),
        ),
        entry(
            &[Normal],
            Keymap::expr("<C-Down>", "\"<Cmd>resize -\" . v:count1 . \"<CR>\"")
                .with_desc("Decrease window height"),
        ),
        entry(
            &[Normal],
            Keymap::expr("<C-Up>", "\"<Cmd>resize +\" . v:count1 . \"<CR>\"")
                .with_desc("Increase window height"),
        ),
        entry(
            &[Normal],
            Keymap::expr("<C-Right>", "\"<Cmd>vertical resize +\" . v:count1 . \"<CR>\"")
                .with_desc("Increase window width"),
        ),
    ]
}

pub fn move_with_alt_keymaps() -> Vec<Entry> {
    vec![
        entry(&[CommandLine], Keymap::keys("<M-h>", "<Left>").with_desc("Left").loud()),
        entry(&[CommandLine], Keymap::keys("<M-l>", "<Right>").with_desc("Right").loud()),
        entry(&[Insert, Terminal], Keymap::keys("<M-h>", "<Left>").with_desc("Left").remap()),
        entry(&[Insert, Terminal], Keymap::keys("<M-j>", "<Down>").with_desc("Down").remap()),
        entry(&[Insert, Terminal], Keymap::keys("<M-k>", "<Up>").with_desc("Up").remap()),
        entry(&[Insert, Terminal], Keymap::keys("<M-l>", "<Right>").with_desc("Right").remap()),
    ]
}

pub(super) fn apply(
    host: &mut dyn EditorHost,
    config: &BasicsConfig,
    report: &mut ApplyReport,
) -> HostResult<()> {
    let mappings = &config.mappings;

    if mappings.basic {
        for (modes, keymap) in basic_keymaps() {
            map_unless_bound(host, modes, keymap, report)?;
        }
    }

    for keymap in toggles::keymaps(&mappings.option_toggle_prefix) {
        map_unless_bound(host, &[Normal], keymap, report)?;
    }

    if mappings.windows {
        for (modes, keymap) in window_keymaps() {
            map_unless_bound(host, modes, keymap, report)?;
        }
    }

    if mappings.move_with_alt {
        for (modes, keymap) in move_with_alt_keymaps() {
            map_unless_bound(host, modes, keymap, report)?;
        }
    }

    Ok(())
}

fn map_unless_bound(
    host: &mut dyn EditorHost,
    modes: &[Mode],
    keymap: Keymap,
    report: &mut ApplyReport,
) -> HostResult<()> {
    if keymap.lhs.is_empty() {
        return Ok(());
    }

    let version = host.version();
    for &mode in modes {
        let label = format!("{} {}", mode.short_name(), keymap.lhs);
        if let Some(existing) = host.find_keymap(mode, &keymap.lhs) {
            if !is_known_default(version, mode, &existing) {
                debug!(keymap = %label, "key already mapped, skipping");
                report.keymaps_skipped.push(label);
                continue;
            }
            debug!(keymap = %label, "overriding host default mapping");
        }

        host.set_keymap(mode, keymap.clone())?;
        report.keymaps_set.push(label);
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/basics/mappings.rs"]
mod tests;
