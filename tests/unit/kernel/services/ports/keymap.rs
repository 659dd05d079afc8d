use super::*;

#[test]
fn ctrl_letters_are_uppercased() {
    assert_eq!(canonical_lhs("<c-l>"), "<C-L>");
    assert_eq!(canonical_lhs("<C-s>"), "<C-S>");
}

#[test]
fn alt_keeps_letter_case() {
    assert_eq!(canonical_lhs("<m-h>"), "<M-h>");
    assert_eq!(canonical_lhs("<A-H>"), "<M-H>");
}

#[test]
fn named_keys_use_host_spelling() {
    assert_eq!(canonical_lhs("<c-up>"), "<C-Up>");
    assert_eq!(canonical_lhs("<cr>"), "<CR>");
    assert_eq!(canonical_lhs("<esc>"), "<Esc>");
    assert_eq!(canonical_lhs("<leader>w"), "<Leader>w");
    assert_eq!(canonical_lhs("<f12>"), "<F12>");
}

#[test]
fn plain_sequences_are_untouched() {
    assert_eq!(canonical_lhs("gO"), "gO");
    assert_eq!(canonical_lhs("\\w"), "\\w");
    assert_eq!(canonical_lhs("a<b"), "a<b");
}

#[test]
fn keymap_constructor_canonicalizes_lhs() {
    let map = Keymap::keys("<c-h>", "<C-w>h");
    assert_eq!(map.lhs, "<C-H>");
    assert!(map.silent);
    assert!(map.noremap);
}
