// Roster integration tests
// Store + flat file behaviour through the public Roster API

use roster_core::{FieldUpdate, Grade, Roster, RosterError, StorageConfig};
use std::fs;
use tempfile::TempDir;

fn open_roster(dir: &TempDir) -> Roster {
    Roster::open(StorageConfig::at(dir.path().join("students.txt"))).unwrap()
}

fn file_content(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("students.txt")).unwrap()
}

#[test]
fn test_alice_scenario_persists_each_state() {
    let dir = TempDir::new().unwrap();
    let mut roster = open_roster(&dir);
    assert!(roster.is_empty());

    let alice = roster.add("Alice", "R1", "CS", 95.0, "1234567890").unwrap();
    assert_eq!(alice.grade(), Grade::APlus);
    assert_eq!(file_content(&dir), "Alice,R1,CS,95,1234567890\n");

    let result = roster.add("Bob", "R1", "EE", 70.0, "2345678901");
    assert!(matches!(result, Err(RosterError::DuplicateKey(k)) if k == "R1"));
    assert_eq!(roster.len(), 1);
    assert_eq!(file_content(&dir), "Alice,R1,CS,95,1234567890\n");

    let alice = roster.update("R1", FieldUpdate::Marks(55.0)).unwrap();
    assert_eq!(alice.grade(), Grade::D);
    assert_eq!(file_content(&dir), "Alice,R1,CS,55,1234567890\n");

    let removed = roster.delete("R1").unwrap();
    assert_eq!(removed.name(), "Alice");
    assert!(roster.is_empty());
    assert_eq!(file_content(&dir), "");
}

#[test]
fn test_reopen_restores_records_in_order() {
    let dir = TempDir::new().unwrap();
    {
        let mut roster = open_roster(&dir);
        roster.add("Carol", "R3", "ME", 72.5, "3456789012").unwrap();
        roster.add("Alice", "R1", "CS", 95.0, "1234567890").unwrap();
        roster.add("Bob", "R2", "EE", 65.0, "2345678901").unwrap();
        roster
            .update("R2", FieldUpdate::Contact("5555555555".to_string()))
            .unwrap();
        roster.delete("R1").unwrap();
    }

    let roster = open_roster(&dir);
    let rolls: Vec<&str> = roster.list_all().iter().map(|s| s.roll_no()).collect();
    assert_eq!(rolls, vec!["R3", "R2"]);

    let carol = roster.get("R3").unwrap();
    assert_eq!(carol.marks(), 72.5);
    assert_eq!(carol.grade(), Grade::B);
    assert_eq!(roster.get("R2").unwrap().contact(), "5555555555");
}

#[test]
fn test_failed_mutation_does_not_touch_file() {
    let dir = TempDir::new().unwrap();
    let mut roster = open_roster(&dir);
    roster.add("Alice", "R1", "CS", 95.0, "1234567890").unwrap();

    assert!(roster.update("R1", FieldUpdate::Marks(-1.0)).is_err());
    assert!(roster.delete("R9").is_err());
    assert!(roster.add("Eve", "R5", "CS", 50.0, "12345").is_err());

    assert_eq!(file_content(&dir), "Alice,R1,CS,95,1234567890\n");
}

#[test]
fn test_save_failure_is_reported_and_retryable() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("data");
    let mut roster = Roster::open(StorageConfig::at(blocker.join("students.txt"))).unwrap();

    // A plain file where the data directory should be
    fs::write(&blocker, "not a directory").unwrap();

    let err = roster
        .add("Alice", "R1", "CS", 95.0, "1234567890")
        .unwrap_err();
    assert!(matches!(err, RosterError::Persistence(_)));
    assert!(err.needs_save());
    assert_eq!(roster.len(), 1);

    fs::remove_file(&blocker).unwrap();
    roster.save().unwrap();
    assert_eq!(
        fs::read_to_string(blocker.join("students.txt")).unwrap(),
        "Alice,R1,CS,95,1234567890\n"
    );
}

#[test]
fn test_open_rejects_duplicate_roll_numbers() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("students.txt"),
        "Alice,R1,CS,95,1234567890\nBob,R1,EE,65,2345678901\n",
    )
    .unwrap();

    let result = Roster::open(StorageConfig::at(dir.path().join("students.txt")));
    assert!(matches!(result, Err(RosterError::DuplicateKey(k)) if k == "R1"));
}

#[test]
fn test_open_strict_rejects_invalid_contact() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("students.txt"), "Bob,R2,EE,65,phone\n").unwrap();

    let result = Roster::open(StorageConfig::at(dir.path().join("students.txt")));
    assert!(matches!(result, Err(RosterError::Persistence(_))));
}

#[test]
fn test_lenient_record_fails_next_contact_check_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.txt");
    fs::write(&path, "Bob,R2,EE,65,phone\n").unwrap();

    let mut roster = Roster::open(StorageConfig {
        path,
        validate_on_load: false,
    })
    .unwrap();
    assert_eq!(roster.get("R2").unwrap().contact(), "phone");

    // Unrelated field updates still work on the loaded record
    roster
        .update("R2", FieldUpdate::Name("Robert".to_string()))
        .unwrap();
    assert!(roster
        .update("R2", FieldUpdate::Contact("phone2".to_string()))
        .is_err());
    assert_eq!(roster.get("R2").unwrap().name(), "Robert");
}
