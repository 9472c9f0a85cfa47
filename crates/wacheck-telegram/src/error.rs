use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("http error: {0}")]
    Http(reqwest::Error),
    #[error("telegram api error: {description}")]
    Api {
        error_code: Option<i64>,
        description: String,
    },
    #[error("telegram api returned no result")]
    MissingResult,
}

// Request URLs carry the bot token, so they never reach error messages.
impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        TelegramError::Http(err.without_url())
    }
}

pub type Result<T> = std::result::Result<T, TelegramError>;
