pub mod contact;
pub mod phone;
pub mod status;

pub use contact::{Contact, ContactStats};
pub use phone::normalize_phone;
pub use status::{parse_status, status_label};
