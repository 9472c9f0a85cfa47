use serde::{Deserialize, Serialize};

/// Recorded WhatsApp status for one canonical phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: String,
    pub has_app: bool,
    #[serde(default)]
    pub note: String,
}

impl Contact {
    pub fn new(phone: impl Into<String>, has_app: bool, note: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            has_app,
            note: note.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContactStats {
    pub total: u64,
    pub positive: u64,
}

impl ContactStats {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
