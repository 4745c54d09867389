use rusqlite::Connection;
use texnote_core::db::migrations::latest_version;
use texnote_core::db::open_db_in_memory;
use texnote_core::{NewNote, Note, NoteRepository, RepoError, SqliteNoteRepository};
use uuid::Uuid;

fn note(id: &str, title: &str, subject: &str, content: &str) -> Note {
    NewNote::new(title, subject)
        .with_content(content)
        .into_note(Uuid::parse_str(id).unwrap())
        .unwrap()
}

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let draft = note(
        "00000000-0000-4000-8000-000000000001",
        "Derivatives",
        "Math",
        "$\\frac{d}{dx} x^2 = 2x$",
    );
    let id = repo.insert_note(&draft).unwrap();

    let loaded = repo.get_note(id).unwrap().unwrap();
    assert_eq!(loaded.id, draft.id);
    assert_eq!(loaded.title, "Derivatives");
    assert_eq!(loaded.subject, "Math");
    assert_eq!(loaded.content, "$\\frac{d}{dx} x^2 = 2x$");
    assert!(loaded.created_at > 0);
    assert_eq!(loaded.created_at, loaded.updated_at);
}

#[test]
fn get_missing_note_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    assert!(repo.get_note(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn update_replaces_fields_and_missing_note_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let draft = note("00000000-0000-4000-8000-000000000002", "a", "b", "c");
    repo.insert_note(&draft).unwrap();

    repo.update_note(draft.id, " New ", "Physics", "").unwrap();
    let loaded = repo.get_note(draft.id).unwrap().unwrap();
    assert_eq!(loaded.title, "New");
    assert_eq!(loaded.subject, "Physics");
    assert_eq!(loaded.content, "");
    assert!(loaded.updated_at >= loaded.created_at);

    let missing = Uuid::new_v4();
    let err = repo.update_note(missing, "t", "s", "").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn blank_required_fields_are_rejected_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let mut draft = note("00000000-0000-4000-8000-000000000003", "a", "b", "");
    draft.subject = "  ".to_string();

    let err = repo.insert_note(&draft).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn delete_removes_row_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let draft = note("00000000-0000-4000-8000-000000000004", "a", "b", "");
    repo.insert_note(&draft).unwrap();

    repo.delete_note(draft.id).unwrap();
    assert!(repo.get_note(draft.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_note(draft.id).unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn list_orders_by_updated_at_desc_then_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let a = note("00000000-0000-4000-8000-00000000000a", "a", "s", "");
    let b = note("00000000-0000-4000-8000-00000000000b", "b", "s", "");
    let c = note("00000000-0000-4000-8000-00000000000c", "c", "s", "");
    for item in [&c, &a, &b] {
        repo.insert_note(item).unwrap();
    }

    conn.execute("UPDATE notes SET updated_at = 1000;", []).unwrap();
    conn.execute(
        "UPDATE notes SET updated_at = 2000 WHERE uuid = ?1;",
        [c.id.to_string()],
    )
    .unwrap();

    let ids: Vec<_> = repo.list_notes().unwrap().into_iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![c.id, a.id, b.id]);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteNoteRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_notes_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteNoteRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("notes"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE notes (
            uuid TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            subject TEXT NOT NULL,
            content TEXT NOT NULL DEFAULT ''
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteNoteRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "notes",
            column: "created_at"
        })
    ));
}

#[test]
fn corrupt_uuid_row_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO notes (uuid, title, subject) VALUES ('not-a-uuid', 't', 's');",
        [],
    )
    .unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    assert!(matches!(
        repo.list_notes().unwrap_err(),
        RepoError::InvalidData(_)
    ));
}
