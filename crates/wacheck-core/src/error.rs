use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Телефон должен содержать цифры")]
    InvalidPhone,
    #[error("Статус должен быть 'да'/'нет', '1'/'0', 'yes'/'no' или 'true'/'false'")]
    InvalidStatus,
}
