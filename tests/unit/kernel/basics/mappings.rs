use super::*;
use crate::kernel::services::ports::KeymapRhs;

fn existing(lhs: &str, rhs: &str) -> Keymap {
    Keymap::keys(lhs, rhs)
}

#[test]
fn host_redraw_mapping_is_overridable() {
    let map = existing("<C-L>", "<Cmd>nohlsearch|diffupdate|normal! <C-L><CR>");
    assert!(is_known_default(HostVersion::new(0, 10, 0), Normal, &map));
}

#[test]
fn known_default_matches_non_canonical_lhs() {
    let mut map = existing("x", "<Cmd>nohlsearch|diffupdate|normal! <C-L><CR>");
    map.lhs = "<c-l>".into();
    assert!(is_known_default(HostVersion::new(0, 10, 0), Normal, &map));
}

#[test]
fn user_redraw_mapping_is_not_overridable() {
    let map = existing("<C-L>", ":redraw!<CR>");
    assert!(!is_known_default(HostVersion::new(0, 10, 0), Normal, &map));
}

#[test]
fn known_default_requires_matching_mode() {
    let map = existing("<C-L>", "<Cmd>nohlsearch<CR>");
    assert!(!is_known_default(HostVersion::new(0, 10, 0), Insert, &map));
}

#[test]
fn visual_search_defaults_match_exactly() {
    let version = HostVersion::new(0, 9, 0);
    assert!(is_known_default(version, Visual, &existing("*", r#"y/\V<C-R>"<CR>"#)));
    assert!(is_known_default(version, Visual, &existing("#", r#"y?\V<C-R>"<CR>"#)));
    assert!(!is_known_default(version, Visual, &existing("*", "y/foo<CR>")));
}

#[test]
fn signature_help_default_only_on_newer_hosts() {
    let map = existing("<C-S>", "<Cmd>lua vim.lsp.buf.signature_help()<CR>")
        .with_desc("vim.lsp.buf.signature_help()");
    assert!(is_known_default(HostVersion::new(0, 11, 0), Insert, &map));
    assert!(!is_known_default(HostVersion::new(0, 10, 2), Insert, &map));
}

#[test]
fn put_empty_line_bindings_are_commands() {
    let maps = basic_keymaps();
    let go = maps.iter().find(|(_, m)| m.lhs == "go").unwrap();
    assert_eq!(
        go.1.rhs,
        KeymapRhs::Command(BasicsCommand::PutEmptyLine(LineDirection::Below))
    );
    let g_o = maps.iter().find(|(_, m)| m.lhs == "gO").unwrap();
    assert_eq!(
        g_o.1.rhs,
        KeymapRhs::Command(BasicsCommand::PutEmptyLine(LineDirection::Above))
    );
}

#[test]
fn catalogs_use_canonical_lhs() {
    let all = basic_keymaps()
        .into_iter()
        .chain(window_keymaps())
        .chain(move_with_alt_keymaps());
    for (modes, map) in all {
        assert!(!modes.is_empty());
        assert_eq!(map.lhs, crate::kernel::services::ports::canonical_lhs(&map.lhs));
    }
}

#[test]
fn search_in_selection_is_not_silent() {
    let maps = basic_keymaps();
    let (_, map) = maps.iter().find(|(_, m)| m.lhs == "g/").unwrap();
    assert!(!map.silent);
}
