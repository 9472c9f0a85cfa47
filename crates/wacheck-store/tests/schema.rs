use rusqlite::Connection;
use tempfile::TempDir;
use wacheck_store::ContactStore;

#[test]
fn open_creates_parent_directories() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("data").join("nested").join("contacts.db");

    let store = ContactStore::open(&path).expect("open store");
    assert_eq!(store.path(), path.as_path());
    assert!(path.exists());
}

#[test]
fn ensure_schema_is_idempotent_and_keeps_rows() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("contacts.db");

    let store = ContactStore::open(&path).expect("open store");
    store.upsert_contact("42", true, "kept").expect("upsert");
    store.ensure_schema().expect("ensure schema again");

    let reopened = ContactStore::open(&path).expect("reopen store");
    let contact = reopened.get_contact("42").expect("get").expect("exists");
    assert_eq!(contact.note, "kept");
}

#[test]
fn flag_is_persisted_as_integer() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("contacts.db");

    let store = ContactStore::open(&path).expect("open store");
    store.upsert_contact("1", true, "").expect("upsert");
    store.upsert_contact("2", false, "").expect("upsert");

    let conn = Connection::open(&path).expect("open raw connection");
    let flags: Vec<i64> = conn
        .prepare("SELECT has_whatsapp FROM contacts ORDER BY phone;")
        .expect("prepare")
        .query_map([], |row| row.get(0))
        .expect("query")
        .collect::<Result<_, _>>()
        .expect("collect");
    assert_eq!(flags, vec![1, 0]);
}

#[test]
fn rows_inserted_externally_read_with_default_note() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("contacts.db");

    let store = ContactStore::open(&path).expect("open store");
    let conn = Connection::open(&path).expect("open raw connection");
    conn.execute(
        "INSERT INTO contacts (phone, has_whatsapp) VALUES ('77', 1);",
        [],
    )
    .expect("insert");
    drop(conn);

    let contact = store.get_contact("77").expect("get").expect("exists");
    assert!(contact.has_app);
    assert_eq!(contact.note, "");
}
