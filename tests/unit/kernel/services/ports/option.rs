use super::*;

#[test]
fn append_flags_adds_only_missing_flags() {
    assert_eq!(append_flags("ltToOCF", "WcC"), "ltToOCFWc");
    assert_eq!(append_flags("ltToOCFWc", "WcC"), "ltToOCFWc");
    assert_eq!(append_flags("", "Wc"), "Wc");
}

#[test]
fn append_map_entries_keeps_other_cells() {
    let merged = append_map_entries("eob: ,fold:-", "vert:║,horiz:═");
    assert_eq!(merged, "eob: ,fold:-,vert:║,horiz:═");
}

#[test]
fn append_map_entries_replaces_same_cell_in_place() {
    let merged = append_map_entries("vert:|,eob: ", "vert:┃");
    assert_eq!(merged, "vert:┃,eob: ");
}

#[test]
fn append_map_entries_is_idempotent() {
    let once = append_map_entries("eob: ", "vert:│,horiz:─");
    let twice = append_map_entries(&once, "vert:│,horiz:─");
    assert_eq!(once, twice);
}

#[test]
fn split_entries_preserves_space_values() {
    let entries = split_entries("vert: ,eob: ");
    assert_eq!(
        entries,
        vec![
            ("vert".to_string(), " ".to_string()),
            ("eob".to_string(), " ".to_string())
        ]
    );
}

#[test]
fn option_value_accessors() {
    assert_eq!(OptionValue::Int(0).as_bool(), Some(false));
    assert_eq!(OptionValue::from("dark").as_str(), Some("dark"));
    assert_eq!(OptionValue::Bool(true).as_str(), None);
    assert_eq!(OptionValue::Int(10).to_string(), "10");
}
