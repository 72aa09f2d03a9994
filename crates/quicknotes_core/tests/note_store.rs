use quicknotes_core::db::{open_db, open_db_in_memory};
use quicknotes_core::{
    KeyValueStore, MemoryKvStore, Note, NoteStore, NoteStoreError, NoteValidationError,
    SqliteKvStore, DEFAULT_STORAGE_KEY, UNTITLED,
};

fn sorted_by_id(notes: &[Note]) -> Vec<Note> {
    let mut notes = notes.to_vec();
    notes.sort_by(|a, b| a.id.cmp(&b.id));
    notes
}

#[test]
fn persist_then_load_reproduces_notes() {
    let mut store = NoteStore::with_default_key(MemoryKvStore::new());
    let first = store.create("first", "one").unwrap();
    let second = store.create("", "two").unwrap();
    store.create("third", "").unwrap();
    store.update(&first.id, "first edited", "uno").unwrap();
    store.delete(&second.id);
    store.persist();

    let expected = sorted_by_id(store.list());
    let mut reloaded = NoteStore::with_default_key(store.into_storage());
    reloaded.load();
    assert_eq!(sorted_by_id(reloaded.list()), expected);
}

#[test]
fn persist_then_load_roundtrips_through_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quicknotes.db");

    let expected = {
        let conn = open_db(&path).unwrap();
        let mut store = NoteStore::with_default_key(SqliteKvStore::try_new(&conn).unwrap());
        store.create("a", "alpha").unwrap();
        store.create("b", "beta").unwrap();
        store.list().to_vec()
    };

    let conn = open_db(&path).unwrap();
    let mut store = NoteStore::with_default_key(SqliteKvStore::try_new(&conn).unwrap());
    store.load();
    assert_eq!(store.list(), expected.as_slice());
}

#[test]
fn create_rejects_blank_note_without_mutation() {
    let mut kv = MemoryKvStore::new();
    let mut store = NoteStore::with_default_key(&mut kv);
    store.create("kept", "").unwrap();
    let before = store.list().to_vec();

    let err = store.create("", "").unwrap_err();
    assert_eq!(err, NoteStoreError::Validation(NoteValidationError::EmptyNote));
    let err = store.create("  ", "\n").unwrap_err();
    assert!(matches!(err, NoteStoreError::Validation(_)));
    assert_eq!(store.list(), before.as_slice());
}

#[test]
fn create_with_title_only_sets_equal_timestamps() {
    let mut store = NoteStore::with_default_key(MemoryKvStore::new());
    let created = store.create("Title", "").unwrap();

    let listed = &store.list()[0];
    assert_eq!(listed, &created);
    assert_eq!(listed.title, "Title");
    assert_eq!(listed.content, "");
    assert_eq!(listed.created_at, listed.updated_at);
}

#[test]
fn create_trims_input_and_defaults_title() {
    let mut store = NoteStore::with_default_key(MemoryKvStore::new());
    let created = store.create("   ", "  body  ").unwrap();
    assert_eq!(created.title, UNTITLED);
    assert_eq!(created.content, "body");
}

#[test]
fn newest_note_comes_first_with_distinct_ids() {
    let mut store = NoteStore::with_default_key(MemoryKvStore::new());
    let first = store.create("first", "").unwrap();
    let second = store.create("second", "").unwrap();

    assert_ne!(first.id, second.id);
    let ids: Vec<&str> = store.list().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
}

#[test]
fn many_creates_keep_ids_unique() {
    let mut store = NoteStore::with_default_key(MemoryKvStore::new());
    for idx in 0..200 {
        store.create(&format!("note {idx}"), "").unwrap();
    }
    let mut ids: Vec<&str> = store.list().iter().map(|n| n.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}

#[test]
fn update_defaults_title_and_advances_updated_at_in_place() {
    let mut store = NoteStore::with_default_key(MemoryKvStore::new());
    let target = store.create("old", "old content").unwrap();
    store.create("newer", "").unwrap();

    let updated = store.update(&target.id, "", "New content").unwrap();
    assert_eq!(updated.title, UNTITLED);
    assert_eq!(updated.content, "New content");
    assert!(updated.updated_at > target.updated_at);
    assert_eq!(updated.created_at, target.created_at);
    assert_eq!(store.list()[1], updated);
    assert_eq!(store.get(&target.id), Some(&updated));
}

#[test]
fn update_unknown_id_is_not_found_and_leaves_list_unchanged() {
    let mut store = NoteStore::with_default_key(MemoryKvStore::new());
    store.create("only", "").unwrap();
    let before = store.list().to_vec();

    let err = store.update("nonexistent-id", "x", "y").unwrap_err();
    assert_eq!(err, NoteStoreError::NotFound("nonexistent-id".to_string()));
    assert_eq!(store.list(), before.as_slice());
}

#[test]
fn update_with_blank_input_is_rejected() {
    let mut store = NoteStore::with_default_key(MemoryKvStore::new());
    let note = store.create("keep", "me").unwrap();

    let err = store.update(&note.id, " ", "").unwrap_err();
    assert!(matches!(err, NoteStoreError::Validation(_)));
    assert_eq!(store.get(&note.id), Some(&note));
}

#[test]
fn delete_removes_note_and_persists() {
    let mut store = NoteStore::with_default_key(MemoryKvStore::new());
    let gone = store.create("gone", "").unwrap();
    let kept = store.create("kept", "").unwrap();

    assert_eq!(store.delete(&gone.id), Some(gone.clone()));
    assert_eq!(store.list(), &[kept.clone()]);

    let raw = store.storage().raw(DEFAULT_STORAGE_KEY).unwrap();
    assert!(!raw.contains(&gone.id));
    assert!(raw.contains(&kept.id));
}

#[test]
fn delete_unknown_id_is_noop() {
    let mut store = NoteStore::with_default_key(MemoryKvStore::new());
    store.create("stay", "").unwrap();
    let before = store.list().to_vec();

    assert_eq!(store.delete("nonexistent-id"), None);
    assert_eq!(store.list(), before.as_slice());
}

#[test]
fn load_treats_corrupted_data_as_empty() {
    for raw in ["not json at all", "{\"id\":\"x\"}", "\"text\"", "42", ""] {
        let mut kv = MemoryKvStore::new();
        kv.set_item(DEFAULT_STORAGE_KEY, raw).unwrap();
        let mut store = NoteStore::with_default_key(kv);
        store.load();
        assert!(store.is_empty(), "expected empty list for {raw:?}");
        assert_eq!(store.storage().raw(DEFAULT_STORAGE_KEY), Some(raw));
    }
}

#[test]
fn load_without_saved_data_is_empty_and_idempotent() {
    let mut store = NoteStore::with_default_key(MemoryKvStore::new());
    store.load();
    store.load();
    assert!(store.list().is_empty());
}

#[test]
fn load_reads_browser_written_data() {
    let raw = r#"[{"id":"lq2x1k-ab12cd","title":"Groceries","content":"milk","createdAt":"2024-03-01T09:30:00.000Z","updatedAt":"2024-03-02T10:00:00.000Z"}]"#;
    let mut kv = MemoryKvStore::new();
    kv.set_item(DEFAULT_STORAGE_KEY, raw).unwrap();

    let mut store = NoteStore::with_default_key(kv);
    store.load();
    let note = store.get("lq2x1k-ab12cd").unwrap();
    assert_eq!(note.title, "Groceries");
    assert!(note.updated_at > note.created_at);

    store.persist();
    assert_eq!(store.storage().raw(DEFAULT_STORAGE_KEY), Some(raw));
}

#[test]
fn write_failure_keeps_memory_state_and_previous_storage() {
    let mut store = NoteStore::with_default_key(MemoryKvStore::with_quota(400));
    let small = store.create("small", "").unwrap();
    let saved = store.storage().raw(DEFAULT_STORAGE_KEY).unwrap().to_string();

    let big = store.create("big", &"x".repeat(1_000)).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.list()[0], big);
    assert_eq!(store.storage().raw(DEFAULT_STORAGE_KEY), Some(saved.as_str()));

    let mut reloaded = NoteStore::with_default_key(store.into_storage());
    reloaded.load();
    assert_eq!(reloaded.list(), &[small]);
}

#[test]
fn stores_with_different_keys_do_not_share_notes() {
    let conn = open_db_in_memory().unwrap();
    let mut work = NoteStore::new(SqliteKvStore::try_new(&conn).unwrap(), "work");
    let mut home = NoteStore::new(SqliteKvStore::try_new(&conn).unwrap(), "home");
    work.create("standup", "").unwrap();
    home.load();
    assert!(home.is_empty());
}

#[test]
fn records_without_utc_offset_survive_load_and_next_write() {
    let raw = r#"[{"id":"a","title":"Legacy","content":"kept","createdAt":"2024-03-01T09:30:00","updatedAt":"2024-03-01T09:30:00"}]"#;
    let mut kv = MemoryKvStore::new();
    kv.set_item(DEFAULT_STORAGE_KEY, raw).unwrap();

    let mut store = NoteStore::with_default_key(kv);
    store.load();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("a").unwrap().title, "Legacy");

    store.create("new", "").unwrap();
    let mut reloaded = NoteStore::with_default_key(store.into_storage());
    reloaded.load();
    let legacy = reloaded.get("a").unwrap();
    assert_eq!(legacy.content, "kept");
    assert_eq!(legacy.created_at.to_rfc3339(), "2024-03-01T09:30:00+00:00");
    assert_eq!(reloaded.len(), 2);
}

#[test]
fn read_failure_loads_empty_list() {
    let conn = open_db_in_memory().unwrap();
    let mut store = NoteStore::with_default_key(SqliteKvStore::try_new(&conn).unwrap());
    store.create("saved", "").unwrap();

    conn.execute_batch("DROP TABLE kv_entries;").unwrap();
    store.load();
    assert!(store.is_empty());
}

#[test]
fn write_failure_still_creates_in_memory() {
    let conn = open_db_in_memory().unwrap();
    let mut store = NoteStore::with_default_key(SqliteKvStore::try_new(&conn).unwrap());

    conn.execute_batch("DROP TABLE kv_entries;").unwrap();
    let created = store.create("unsaved", "body").unwrap();
    assert_eq!(store.list(), &[created]);
}
