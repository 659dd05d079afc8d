use super::*;

#[test]
fn set_option_marks_was_set() {
    let mut host = MemoryHost::default();
    assert!(!host.was_explicitly_set("number"));
    host.user_set("number", true).unwrap();
    assert!(host.was_explicitly_set("number"));
    assert_eq!(host.get_option("number"), Some(OptionValue::Bool(true)));
}

#[test]
fn unknown_option_is_an_error() {
    let mut host = MemoryHost::default();
    let err = host.set_option("nosuchoption", OptionValue::Bool(true)).unwrap_err();
    assert!(matches!(err, HostError::UnknownOption(_)));
}

#[test]
fn newer_option_is_unsupported_on_old_host() {
    let mut host = MemoryHost::new(HostVersion::new(0, 8, 3));
    assert_eq!(host.get_option("splitkeep"), None);
    let err = host.set_option("splitkeep", OptionValue::from("screen")).unwrap_err();
    assert!(matches!(err, HostError::UnsupportedOption { .. }));
}

#[test]
fn local_option_falls_back_to_global() {
    let mut host = MemoryHost::default();
    let first = host.current_window();
    host.set_local_option(first, "wrap", OptionValue::Bool(false)).unwrap();

    let second = host.split_window();
    host.set_local_option(second, "wrap", OptionValue::Bool(true)).unwrap();

    assert_eq!(host.get_local_option(first, "wrap"), Some(OptionValue::Bool(false)));
    assert_eq!(host.get_local_option(second, "wrap"), Some(OptionValue::Bool(true)));
    assert_eq!(host.get_option("wrap"), Some(OptionValue::Bool(true)));
    assert!(!host.was_explicitly_set("wrap"));
}

#[test]
fn default_keymaps_depend_on_version() {
    let old = MemoryHost::new(HostVersion::new(0, 7, 0));
    assert!(old.find_keymap(Mode::Normal, "<C-L>").is_some());
    assert!(old.find_keymap(Mode::Visual, "*").is_none());

    let new = MemoryHost::new(HostVersion::new(0, 11, 0));
    assert!(new.find_keymap(Mode::Visual, "*").is_some());
    assert!(new.find_keymap(Mode::Insert, "<c-s>").is_some());
}

#[test]
fn find_keymap_compares_canonical_lhs() {
    let mut host = MemoryHost::default();
    host.user_map(Mode::Normal, Keymap::keys("<c-h>", ":echo<CR>"))
        .unwrap();
    assert!(host.find_keymap(Mode::Normal, "<C-H>").is_some());
    assert!(host.find_keymap(Mode::Insert, "<C-H>").is_none());
}

#[test]
fn set_keymap_stores_canonical_lhs() {
    let mut host = MemoryHost::default();
    let mut raw = Keymap::keys("x", "<C-w>l");
    raw.lhs = "<c-l>".into();
    host.set_keymap(Mode::Normal, raw).unwrap();

    let maps: Vec<_> = host
        .get_keymaps(Mode::Normal)
        .into_iter()
        .filter(|m| canonical_lhs(&m.lhs) == "<C-L>")
        .collect();
    assert_eq!(maps.len(), 1);
    assert_eq!(maps[0].lhs, "<C-L>");
    assert_eq!(maps[0].rhs.text(), "<C-w>l");
}

#[test]
fn empty_lhs_is_rejected() {
    let mut host = MemoryHost::default();
    let err = host.set_keymap(Mode::Normal, Keymap::keys("", "x")).unwrap_err();
    assert!(matches!(err, HostError::InvalidKeymap(_)));
}

#[test]
fn autocommand_group_clear_drops_previous_registrations() {
    let mut host = MemoryHost::default();
    let group = host.create_autocommand_group("G", true);
    host.register_autocommand(
        group,
        Autocommand::new(AutocmdEvent::TextYankPost, "*", "yank", |h, _| {
            h.highlight_yank()
        }),
    )
    .unwrap();
    host.yank();
    assert_eq!(host.yank_highlights(), 1);

    let again = host.create_autocommand_group("G", true);
    assert_eq!(again, group);
    host.yank();
    assert_eq!(host.yank_highlights(), 1);
    assert!(host.snapshot().autocommand_groups[0].autocommands.is_empty());
}

#[test]
fn invalid_group_is_an_error() {
    let mut host = MemoryHost::default();
    let err = host
        .register_autocommand(
            GroupId(7),
            Autocommand::new(AutocmdEvent::TermOpen, "*", "x", |_, _| {}),
        )
        .unwrap_err();
    assert!(matches!(err, HostError::InvalidPattern { .. }));
}

#[test]
fn append_lines_shifts_cursor_below_insertion() {
    let mut host = MemoryHost::default();
    let buf = host.new_buffer(&["a", "b", "c"]);
    host.switch_to_buffer(buf).unwrap();
    host.set_cursor_line(2);

    host.append_lines(buf, 1, 2).unwrap();
    assert_eq!(host.lines(buf), vec!["a", "", "", "b", "c"]);
    assert_eq!(host.cursor_line(), 4);

    host.append_lines(buf, 5, 1).unwrap();
    assert_eq!(host.lines(buf), vec!["a", "", "", "b", "c", ""]);
    assert_eq!(host.cursor_line(), 4);
}

#[test]
fn append_lines_before_first_line() {
    let mut host = MemoryHost::default();
    let buf = host.new_buffer(&["only"]);
    host.append_lines(buf, 0, 1).unwrap();
    assert_eq!(host.lines(buf), vec!["", "only"]);
}

#[test]
fn empty_buffer_has_one_line() {
    let host = MemoryHost::default();
    assert_eq!(host.lines(host.current_buffer()), vec![""]);
}

#[test]
fn deferred_callbacks_run_in_order() {
    let mut host = MemoryHost::default();
    host.defer_callback(Box::new(|h: &mut dyn EditorHost| {
        h.set_var("order", OptionValue::from("first"))
    }));
    host.defer_callback(Box::new(|h: &mut dyn EditorHost| {
        h.set_var("order", OptionValue::from("second"))
    }));
    assert_eq!(host.pending_deferred(), 2);

    host.run_deferred();
    assert_eq!(host.pending_deferred(), 0);
    assert_eq!(host.get_var("order"), Some(OptionValue::from("second")));
}

#[test]
fn start_insert_in_terminal_enters_terminal_mode() {
    let mut host = MemoryHost::default();
    let buf = host.open_terminal();
    assert_eq!(host.buffer_type(buf), Some(BufferType::Terminal));
    assert!(host.buffer_name(buf).is_some_and(|n| n.starts_with("term://")));
    host.start_insert();
    assert_eq!(host.mode(), "t");
}

#[test]
fn mode_change_reports_old_and_new_mode() {
    let mut host = MemoryHost::default();
    let group = host.create_autocommand_group("G", true);
    host.register_autocommand(
        group,
        Autocommand::new(AutocmdEvent::ModeChanged, "n:*", "record", |h, args| {
            h.set_var("last_change", OptionValue::from(args.matched.as_str()))
        }),
    )
    .unwrap();

    host.set_mode("V");
    assert_eq!(host.get_var("last_change"), Some(OptionValue::from("n:V")));
    host.set_mode("n");
    assert_eq!(host.get_var("last_change"), Some(OptionValue::from("n:V")));
}

#[test]
fn snapshot_is_stable_for_identical_state() {
    let a = MemoryHost::default();
    let b = MemoryHost::default();
    assert_eq!(a.snapshot(), b.snapshot());
}
