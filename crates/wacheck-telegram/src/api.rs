use crate::error::{Result, TelegramError};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

/// The two Bot API calls the polling loop needs.
pub trait BotApi {
    fn get_me(&mut self) -> Result<User>;
    /// Blocks until updates with `update_id >= offset` arrive or the poll
    /// timeout elapses.
    fn get_updates(&mut self, offset: Option<i64>) -> Result<Vec<Update>>;
    fn send_message(&mut self, chat_id: i64, text: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    pub(crate) fn into_result(self) -> Result<T> {
        if !self.ok {
            return Err(TelegramError::Api {
                error_code: self.error_code,
                description: self
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        self.result.ok_or(TelegramError::MissingResult)
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiResponse, Update, User};
    use crate::error::TelegramError;

    #[test]
    fn decodes_updates_and_skips_unknown_fields() {
        let body = r#"{
            "ok": true,
            "result": [
                {
                    "update_id": 10,
                    "message": {
                        "message_id": 1,
                        "date": 1700000000,
                        "from": {"id": 5, "is_bot": false, "first_name": "Ada"},
                        "chat": {"id": 5, "type": "private"},
                        "text": "/check +79990001122"
                    }
                },
                {"update_id": 11, "edited_message": {"message_id": 2}}
            ]
        }"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(body).expect("decode");
        let updates = response.into_result().expect("ok result");
        assert_eq!(updates.len(), 2);
        let message = updates[0].message.as_ref().expect("message");
        assert_eq!(message.chat.id, 5);
        assert_eq!(message.text.as_deref(), Some("/check +79990001122"));
        assert!(updates[1].message.is_none());
    }

    #[test]
    fn ok_response_without_result_is_missing_result() {
        let body = r#"{"ok": true}"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(body).expect("decode");
        assert!(matches!(
            response.into_result(),
            Err(TelegramError::MissingResult)
        ));
    }

    #[test]
    fn decodes_bot_identity() {
        let body = r#"{
            "ok": true,
            "result": {"id": 42, "is_bot": true, "first_name": "WA", "username": "wa_check_bot"}
        }"#;
        let response: ApiResponse<User> = serde_json::from_str(body).expect("decode");
        let me = response.into_result().expect("ok result");
        assert_eq!(me.id, 42);
        assert_eq!(me.username.as_deref(), Some("wa_check_bot"));
    }

    #[test]
    fn error_response_becomes_api_error() {
        let body = r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(body).expect("decode");
        match response.into_result() {
            Err(TelegramError::Api {
                error_code,
                description,
            }) => {
                assert_eq!(error_code, Some(401));
                assert_eq!(description, "Unauthorized");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
