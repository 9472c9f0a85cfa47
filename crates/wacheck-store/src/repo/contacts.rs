use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};
use wacheck_core::{Contact, ContactStats};

const UPSERT_CONTACT: &str = "INSERT INTO contacts (phone, has_whatsapp, note)
     VALUES (?1, ?2, ?3)
     ON CONFLICT(phone) DO UPDATE SET
         has_whatsapp = excluded.has_whatsapp,
         note = excluded.note;";

pub struct ContactsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ContactsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, phone: &str) -> Result<Option<Contact>> {
        let contact = self
            .conn
            .query_row(
                "SELECT phone, has_whatsapp, note FROM contacts WHERE phone = ?1;",
                [phone],
                contact_from_row,
            )
            .optional()?;
        Ok(contact)
    }

    pub fn upsert(&self, phone: &str, has_app: bool, note: &str) -> Result<usize> {
        let changed = self
            .conn
            .prepare_cached(UPSERT_CONTACT)?
            .execute(params![phone, has_app, note])?;
        Ok(changed)
    }

    /// Upserts every record and returns the summed per-statement change count.
    pub fn upsert_many<I>(&self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = Contact>,
    {
        let mut stmt = self.conn.prepare_cached(UPSERT_CONTACT)?;
        let mut changed = 0;
        for record in records {
            changed += stmt.execute(params![record.phone, record.has_app, record.note])?;
        }
        Ok(changed)
    }

    pub fn stats(&self) -> Result<ContactStats> {
        let mut stmt = self
            .conn
            .prepare("SELECT has_whatsapp, COUNT(*) FROM contacts GROUP BY has_whatsapp;")?;
        let mut rows = stmt.query([])?;
        let mut stats = ContactStats::default();
        while let Some(row) = rows.next()? {
            let status: i64 = row.get(0)?;
            let count: i64 = row.get(1)?;
            let count = count.max(0) as u64;
            stats.total += count;
            if status == 1 {
                stats.positive += count;
            }
        }
        Ok(stats)
    }

    pub fn list(&self) -> Result<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare("SELECT phone, has_whatsapp, note FROM contacts ORDER BY phone;")?;
        let contacts = stmt
            .query_map([], contact_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(contacts)
    }
}

fn contact_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Contact> {
    let has_app: i64 = row.get(1)?;
    let note: Option<String> = row.get(2)?;
    Ok(Contact {
        phone: row.get(0)?,
        has_app: has_app != 0,
        note: note.unwrap_or_default(),
    })
}
