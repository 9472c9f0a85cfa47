pub mod contacts;

pub use contacts::ContactsRepo;
