use gamestat_core::db::migrations::latest_version;
use gamestat_core::db::open_db_in_memory;
use gamestat_core::{
    CharacterDraft, CharacterRepository, RepoError, RosterService, SqliteCharacterRepository,
};
use rusqlite::Connection;

fn draft(name: &str, weapon: &str, level: u32, realm: &str) -> CharacterDraft {
    CharacterDraft::from_input(name, weapon, level, realm)
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    let created = repo.create(&draft("War", "Chaoseater", 5, "Earth")).unwrap();
    assert_eq!(created.id, 1);

    let loaded = repo.get(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "War");
    assert_eq!(loaded.weapon, "Chaoseater");
    assert_eq!(loaded.level, 5);
    assert_eq!(loaded.realm, "Earth");
}

#[test]
fn create_assigns_fresh_monotonic_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    let first = repo.create(&draft("War", "Chaoseater", 5, "Earth")).unwrap();
    let second = repo.create(&draft("Death", "Harvester", 9, "Kingdom of the Dead")).unwrap();

    assert!(second.id > first.id);
}

#[test]
fn deleted_ids_are_never_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    let first = repo.create(&draft("War", "Chaoseater", 5, "Earth")).unwrap();
    assert!(repo.delete(first.id).unwrap());

    let second = repo.create(&draft("Strife", "Mercy", 3, "Haven")).unwrap();
    assert!(second.id > first.id);
}

#[test]
fn list_all_orders_by_id_ascending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    let a = repo.create(&draft("War", "Chaoseater", 5, "Earth")).unwrap();
    let b = repo.create(&draft("Death", "Harvester", 9, "Kingdom of the Dead")).unwrap();
    let c = repo.create(&draft("Fury", "Scorn", 7, "Haven")).unwrap();

    let all = repo.list_all().unwrap();
    let ids: Vec<_> = all.iter().map(|character| character.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
}

#[test]
fn update_existing_character_overwrites_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    let created = repo.create(&draft("War", "Chaoseater", 5, "Earth")).unwrap();
    let updated = repo
        .update(created.id, &draft("War", "Tremor Gauntlet", 6, "The Void"))
        .unwrap();

    assert_eq!(updated.id, created.id);
    let loaded = repo.get(created.id).unwrap().unwrap();
    assert_eq!(loaded.weapon, "Tremor Gauntlet");
    assert_eq!(loaded.level, 6);
    assert_eq!(loaded.realm, "The Void");
}

#[test]
fn update_not_found_leaves_collection_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    repo.create(&draft("War", "Chaoseater", 5, "Earth")).unwrap();

    let err = repo.update(999, &draft("Nobody", "Stick", 1, "Nowhere")).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(999)));

    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "War");
}

#[test]
fn delete_existing_removes_exactly_that_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    let keep = repo.create(&draft("War", "Chaoseater", 5, "Earth")).unwrap();
    let remove = repo.create(&draft("Death", "Harvester", 9, "Kingdom of the Dead")).unwrap();

    assert!(repo.delete(remove.id).unwrap());

    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, keep.id);
    assert!(repo.get(remove.id).unwrap().is_none());
}

#[test]
fn delete_missing_returns_false_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    repo.create(&draft("War", "Chaoseater", 5, "Earth")).unwrap();

    assert!(!repo.delete(42).unwrap());
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn level_zero_is_accepted_and_persisted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();

    let created = repo.create(&draft("Strife", "Redemption", 0, "Haven")).unwrap();
    assert_eq!(repo.get(created.id).unwrap().unwrap().level, 0);
}

#[test]
fn storage_rejects_negative_level_rows() {
    let conn = open_db_in_memory().unwrap();

    let result = conn.execute(
        "INSERT INTO characters (name, weapon, level, realm)
         VALUES ('Broken', 'None', -3, 'Nowhere');",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn service_validation_blocks_blank_fields_before_persistence() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();
    let service = RosterService::new(repo);

    let err = service.create_character("   ", "Chaoseater", 5, "Earth").unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(service.list_characters().unwrap().is_empty());

    let created = service.create_character("War", "Chaoseater", 5, "Earth").unwrap();
    let err = service
        .update_character(created.id, "War", "", 6, "Earth")
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(
        service.get_character(created.id).unwrap().unwrap().weapon,
        "Chaoseater"
    );
}

#[test]
fn service_trims_text_fields_before_persistence() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();
    let service = RosterService::new(repo);

    let created = service
        .create_character("  Fury ", " Chaoseater ", 5, " Earth ")
        .unwrap();
    assert_eq!(created.name, "Fury");
    assert_eq!(created.weapon, "Chaoseater");
    assert_eq!(created.realm, "Earth");
}

#[test]
fn full_crud_cycle_matches_expected_scenario() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();
    let service = RosterService::new(repo);

    let created = service.create_character("Fury", "Chaoseater", 5, "Earth").unwrap();
    assert_eq!(created.id, 1);

    let all = service.list_characters().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, 1);
    assert_eq!(all[0].name, "Fury");
    assert_eq!(all[0].level, 5);

    let updated = service.update_character(1, "Fury", "Chaoseater", 6, "Earth").unwrap();
    assert_eq!(updated.level, 6);
    assert_eq!(service.get_character(1).unwrap().unwrap().level, 6);

    assert!(service.delete_character(1).unwrap());
    assert!(service.list_characters().unwrap().is_empty());
    assert!(!service.delete_character(1).unwrap());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteCharacterRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_characters_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteCharacterRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("characters"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE characters (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            weapon TEXT NOT NULL,
            level INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteCharacterRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "characters",
            column: "realm"
        })
    ));
}
