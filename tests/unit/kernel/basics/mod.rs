use super::*;
use crate::kernel::services::adapters::MemoryHost;
use crate::kernel::services::ports::{HostError, HostVersion, Mode, OptionValue, ToggleTarget};
use serde_json::json;

fn setup(host: &mut MemoryHost, overrides: serde_json::Value) -> Basics {
    Basics::setup(host, Some(&overrides)).unwrap()
}

#[test]
fn invalid_config_fails_before_touching_host() {
    let mut host = MemoryHost::default();
    let before = host.snapshot();

    let err = Basics::setup(&mut host, Some(&json!({ "silent": 1 }))).err().unwrap();
    assert!(matches!(err, BasicsError::Config(_)));
    assert_eq!(host.snapshot(), before);
}

#[test]
fn basic_options_respect_user_settings() {
    let mut host = MemoryHost::default();
    host.user_set("number", false).unwrap();
    host.user_set("mouse", "").unwrap();

    let basics = Basics::setup(&mut host, None).unwrap();

    assert_eq!(host.get_option("number"), Some(OptionValue::Bool(false)));
    assert_eq!(host.get_option("mouse"), Some(OptionValue::from("")));
    assert_eq!(host.get_option("cursorline"), Some(OptionValue::Bool(true)));
    assert!(basics.report().options_skipped.contains(&"number".to_string()));
    assert!(basics.report().options_set.contains(&"cursorline".to_string()));
}

#[test]
fn leader_is_only_set_when_undefined() {
    let mut host = MemoryHost::default();
    Basics::setup(&mut host, None).unwrap();
    assert_eq!(host.get_var("mapleader"), Some(OptionValue::from(" ")));

    let mut host = MemoryHost::default();
    host.set_var("mapleader", OptionValue::from(","));
    Basics::setup(&mut host, None).unwrap();
    assert_eq!(host.get_var("mapleader"), Some(OptionValue::from(",")));
}

#[test]
fn version_dependent_options() {
    let mut old = MemoryHost::new(HostVersion::new(0, 8, 0));
    Basics::setup(&mut old, None).unwrap();
    assert_eq!(old.get_option("shortmess"), Some(OptionValue::from("ltToOCFWc")));
    assert_eq!(old.get_option("termguicolors"), Some(OptionValue::Bool(true)));
    assert_eq!(old.get_option("splitkeep"), None);

    let mut mid = MemoryHost::new(HostVersion::new(0, 9, 5));
    Basics::setup(&mut mid, None).unwrap();
    assert_eq!(mid.get_option("shortmess"), Some(OptionValue::from("ltToOCFWc")));
    assert_eq!(mid.get_option("splitkeep"), Some(OptionValue::from("screen")));
    assert_eq!(mid.get_option("termguicolors"), Some(OptionValue::Bool(true)));

    let mut new = MemoryHost::new(HostVersion::new(0, 10, 0));
    Basics::setup(&mut new, None).unwrap();
    assert_eq!(new.get_option("termguicolors"), Some(OptionValue::Bool(false)));
    assert!(!new.was_explicitly_set("termguicolors"));
}

#[test]
fn extra_ui_enables_syntax_once() {
    let mut host = MemoryHost::default();
    setup(&mut host, json!({ "options": { "extra_ui": true } }));
    assert!(host.syntax_enabled());
    assert_eq!(host.get_option("pumblend"), Some(OptionValue::Int(10)));
    assert_eq!(host.get_option("list"), Some(OptionValue::Bool(true)));
    assert!(host.filetype_plugins_enabled());
}

#[test]
fn disabled_groups_leave_host_untouched() {
    let mut host = MemoryHost::default();
    let before = host.snapshot();
    setup(
        &mut host,
        json!({
            "options": { "basic": false },
            "mappings": { "basic": false, "option_toggle_prefix": "" },
            "autocommands": { "basic": false }
        }),
    );
    let after = host.snapshot();
    assert_eq!(after.options, before.options);
    assert_eq!(after.keymaps, before.keymaps);
    assert_eq!(after.autocommand_groups.len(), 1);
    assert!(after.autocommand_groups[0].autocommands.is_empty());
}

#[test]
fn toggle_feedback_is_suppressed_when_silent() {
    let mut host = MemoryHost::default();
    let mut basics = setup(&mut host, json!({ "silent": true }));
    let outcome = basics
        .execute(&mut host, BasicsCommand::Toggle(ToggleTarget::Number))
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Done(None));
}

#[test]
fn background_toggle_reports_new_value() {
    let mut host = MemoryHost::default();
    let mut basics = setup(&mut host, json!({}));
    let outcome = basics
        .execute(&mut host, BasicsCommand::Toggle(ToggleTarget::Background))
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Done(Some("light".to_string())));
    assert_eq!(host.get_option("background"), Some(OptionValue::from("light")));
}

#[test]
fn search_highlight_toggle_flips_variable() {
    let mut host = MemoryHost::default();
    let mut basics = setup(&mut host, json!({}));
    let cmd = BasicsCommand::Toggle(ToggleTarget::SearchHighlight);

    assert_eq!(
        basics.execute(&mut host, cmd).unwrap(),
        CommandOutcome::Done(Some("  hlsearch".to_string()))
    );
    assert_eq!(
        basics.execute(&mut host, cmd).unwrap(),
        CommandOutcome::Done(Some("nohlsearch".to_string()))
    );
}

#[test]
fn window_local_toggle_leaves_other_windows() {
    let mut host = MemoryHost::default();
    let mut basics = setup(&mut host, json!({}));
    let first = host.current_window();
    let second = host.split_window();

    basics
        .execute(&mut host, BasicsCommand::Toggle(ToggleTarget::Spell))
        .unwrap();
    assert_eq!(host.get_local_option(second, "spell"), Some(OptionValue::Bool(true)));
    assert_eq!(host.get_local_option(first, "spell"), Some(OptionValue::Bool(false)));
}

#[test]
fn empty_line_state_machine_arms_then_idles() {
    let mut host = MemoryHost::default();
    let mut basics = setup(&mut host, json!({}));
    assert_eq!(basics.empty_line_state(), EmptyLineState::Idle);

    let outcome = basics
        .put_empty_line(&mut host, Some(LineDirection::Below))
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Operator);
    assert_eq!(
        basics.empty_line_state(),
        EmptyLineState::Armed(LineDirection::Below)
    );

    basics.put_empty_line(&mut host, None).unwrap();
    assert_eq!(basics.empty_line_state(), EmptyLineState::Idle);
    assert_eq!(host.lines(host.current_buffer()), vec!["", ""]);
}

#[test]
fn second_phase_without_first_is_noop() {
    let mut host = MemoryHost::default();
    let mut basics = setup(&mut host, json!({}));
    basics.put_empty_line(&mut host, None).unwrap();
    assert_eq!(host.lines(host.current_buffer()), vec![""]);
}

#[test]
fn reconfigure_keeps_diagnostic_state() {
    let mut host = MemoryHost::default();
    let mut basics = setup(&mut host, json!({}));
    let buf = host.current_buffer();
    basics.toggle_diagnostic(&mut host);
    assert!(!basics.diagnostics().is_enabled(buf));

    basics
        .reconfigure(&mut host, Some(&json!({ "mappings": { "windows": true } })))
        .unwrap();
    assert!(basics.config().mappings.windows);
    assert!(!basics.diagnostics().is_enabled(buf));
    assert!(host.find_keymap(Mode::Normal, "<C-H>").is_some());
}

#[test]
fn host_errors_propagate() {
    let mut host = MemoryHost::default();
    host.remove_option("virtualedit");

    let err = Basics::setup(&mut host, None).err().unwrap();
    match err {
        BasicsError::Host(HostError::UnknownOption(name)) => assert_eq!(name, "virtualedit"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failed_insert_is_not_remembered_for_repeat() {
    let mut host = MemoryHost::default();
    let mut basics = Basics::setup(&mut host, None).unwrap();
    let doomed = host.new_buffer(&["a"]);
    host.switch_to_buffer(doomed).unwrap();

    basics
        .put_empty_line(&mut host, Some(LineDirection::Above))
        .unwrap();
    assert!(host.wipe_buffer(doomed));
    let err = basics.put_empty_line(&mut host, None).err().unwrap();
    assert!(matches!(err, BasicsError::Host(HostError::UnknownBuffer)));
    assert_eq!(basics.empty_line_state(), EmptyLineState::Idle);

    let buf = host.new_buffer(&["b"]);
    host.switch_to_buffer(buf).unwrap();
    let outcome = basics.put_empty_line(&mut host, None).unwrap();
    assert_eq!(outcome, CommandOutcome::Done(None));
    assert_eq!(host.lines(buf), vec!["b"]);
}
