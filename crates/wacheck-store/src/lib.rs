pub mod db;
pub mod error;
pub mod paths;
pub mod repo;
pub mod schema;

use crate::error::Result;
use crate::repo::ContactsRepo;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use wacheck_core::{Contact, ContactStats};

/// SQLite-backed contact table.
///
/// Only the database path is held; every operation opens its own
/// connection and closes it before returning. Callers serialize access.
#[derive(Debug, Clone)]
pub struct ContactStore {
    path: PathBuf,
}

impl ContactStore {
    /// Creates missing parent directories and the `contacts` table.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        paths::ensure_parent_dir(&path)?;
        let store = Self { path };
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        schema::ensure_schema(&conn)
    }

    pub fn get_contact(&self, phone: &str) -> Result<Option<Contact>> {
        let conn = self.connect()?;
        ContactsRepo::new(&conn).get(phone)
    }

    pub fn upsert_contact(&self, phone: &str, has_app: bool, note: &str) -> Result<()> {
        let conn = self.connect()?;
        ContactsRepo::new(&conn).upsert(phone, has_app, note)?;
        Ok(())
    }

    pub fn stats(&self) -> Result<ContactStats> {
        let conn = self.connect()?;
        ContactsRepo::new(&conn).stats()
    }

    /// Applies upsert semantics to each record inside one transaction and
    /// returns the number of rows inserted or updated by this call.
    pub fn bulk_import<I>(&self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = Contact>,
    {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let changed = ContactsRepo::new(&tx).upsert_many(records)?;
        tx.commit()?;
        Ok(changed)
    }

    pub fn list_contacts(&self) -> Result<Vec<Contact>> {
        let conn = self.connect()?;
        ContactsRepo::new(&conn).list()
    }

    fn connect(&self) -> Result<Connection> {
        db::open(&self.path)
    }
}
