use super::*;

#[test]
fn star_matches_everything() {
    let pattern = AutocmdPattern::new("*").unwrap();
    assert!(pattern.matches(""));
    assert!(pattern.matches("anything"));
}

#[test]
fn terminal_pattern_requires_scheme() {
    let pattern = AutocmdPattern::new("term://*").unwrap();
    assert!(pattern.matches("term://~//1001:/bin/sh"));
    assert!(!pattern.matches("/tmp/term://x"));
}

#[test]
fn mode_change_into_linewise_or_blockwise_visual() {
    let pattern = AutocmdPattern::new("*:[V\u{16}]*").unwrap();
    assert!(pattern.matches("n:V"));
    assert!(pattern.matches("n:\u{16}"));
    assert!(!pattern.matches("n:v"));
    assert!(!pattern.matches("V:n"));
}

#[test]
fn mode_change_out_of_linewise_visual() {
    let pattern = AutocmdPattern::new("[V\u{16}]*:*").unwrap();
    assert!(pattern.matches("V:n"));
    assert!(pattern.matches("\u{16}:V"));
    assert!(!pattern.matches("n:V"));
}

#[test]
fn regex_metacharacters_are_literal() {
    let pattern = AutocmdPattern::new("*.rs").unwrap();
    assert!(pattern.matches("main.rs"));
    assert!(!pattern.matches("mainxrs"));
    assert_eq!(pattern.as_str(), "*.rs");
}

#[test]
fn class_ranges_and_negation() {
    let digits = AutocmdPattern::new("[0-9]").unwrap();
    assert!(digits.matches("7"));
    assert!(!digits.matches("-"));

    let not_n = AutocmdPattern::new("[^n]:*").unwrap();
    assert!(not_n.matches("i:n"));
    assert!(!not_n.matches("n:i"));
}
