#![forbid(unsafe_code)]
use staffgrid::io::{export_roster_json, import_staff_csv, write_roster_csv};
use staffgrid::{Day, JsonStorage, RosterInputs, RosterResult, Slot, StaffAssignment, Storage};
use std::collections::BTreeSet;
use std::fs;
use tempfile::tempdir;

fn sample_result() -> RosterResult {
    RosterResult {
        days: vec![Day::Monday, Day::Tuesday],
        roster: vec![
            StaffAssignment::new("alice", vec![Slot::from("L1"), Slot::Oof]),
            StaffAssignment::new("bob", vec![Slot::Fixed, Slot::from("L2")]),
        ],
        is_valid: true,
        empty_locations: Vec::new(),
        impossible_days: Vec::new(),
        message: "Success: All locations have at least one person assigned.".into(),
        stats: Default::default(),
    }
}

#[test]
fn import_staff_with_oof_days() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.csv");
    fs::write(&path, "name,oof_days\nalice,Monday;fri\nbob,\ncarol\n").unwrap();

    let records = import_staff_csv(&path).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].name, "alice");
    assert_eq!(records[0].oof_days, BTreeSet::from([Day::Monday, Day::Friday]));
    assert!(records[1].oof_days.is_empty());
    assert_eq!(records[2].name, "carol");
}

#[test]
fn import_rejects_weekend_days() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("staff.csv");
    fs::write(&path, "name,oof_days\ndave,Saturday\n").unwrap();
    assert!(import_staff_csv(&path).is_err());
}

#[test]
fn csv_export_layout() {
    let mut out = Vec::new();
    write_roster_csv(&mut out, &sample_result()).unwrap();
    let text = String::from_utf8(out).unwrap();
    insta::assert_snapshot!(text.trim_end(), @r"
    staff,Monday,Tuesday
    alice,L1,OOF
    bob,X,L2
    ");
}

#[test]
fn json_export_uses_plain_slot_strings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.json");
    export_roster_json(&path, &sample_result()).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"OOF\""));
    assert!(raw.contains("\"X\""));
    let back: RosterResult = serde_json::from_str(&raw).unwrap();
    assert_eq!(back.roster[1].assignment[0], Slot::Fixed);
}

#[test]
fn storage_saves_and_loads_inputs() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("inputs.json")).unwrap();
    assert_eq!(storage.load_or_default().unwrap(), RosterInputs::default());

    let mut inputs = RosterInputs {
        staff: vec!["alice".into(), "bob".into()],
        locations: vec!["L1".into(), "L2".into()],
        weekly_locations_required: 2,
        fixed_day: Some(Day::Thursday),
        fixed_day_location: Some("L1".into()),
        ..RosterInputs::default()
    };
    inputs
        .oof_preferences
        .insert("bob".into(), BTreeSet::from([Day::Tuesday]));
    storage.save(&inputs).unwrap();

    assert_eq!(storage.load().unwrap(), inputs);
}
