use crate::error::Result;
use rusqlite::Connection;

const CONTACTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS contacts (
    phone TEXT PRIMARY KEY,
    has_whatsapp INTEGER NOT NULL,
    note TEXT DEFAULT ''
);";

pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(CONTACTS_TABLE)?;
    Ok(())
}
