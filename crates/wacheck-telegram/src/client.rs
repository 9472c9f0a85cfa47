use crate::api::{ApiResponse, BotApi, Message, Update, User};
use crate::error::Result;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

const ALLOWED_UPDATES: &[&str] = &["message"];
const REQUEST_GRACE: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct GetUpdatesParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

#[derive(Serialize)]
struct NoParams {}

#[derive(Serialize)]
struct SendMessageParams<'a> {
    chat_id: i64,
    text: &'a str,
}

/// Blocking Telegram Bot API client.
pub struct BotClient {
    client: Client,
    api_base: String,
    token: String,
    poll_timeout: Duration,
}

impl fmt::Debug for BotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotClient")
            .field("api_base", &self.api_base)
            .field("poll_timeout", &self.poll_timeout)
            .finish_non_exhaustive()
    }
}

impl BotClient {
    pub fn new(token: &str, api_base: &str, poll_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent("wacheck")
            .timeout(poll_timeout + REQUEST_GRACE)
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
            poll_timeout,
        })
    }

    fn call<P, T>(&self, method: &str, params: &P) -> Result<T>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}/bot{}/{}", self.api_base, self.token, method);
        debug!(method, "telegram request");
        // Error bodies still carry a JSON description, so the status is not checked here.
        let response: ApiResponse<T> = self.client.post(url).json(params).send()?.json()?;
        response.into_result()
    }
}

impl BotApi for BotClient {
    fn get_me(&mut self) -> Result<User> {
        self.call("getMe", &NoParams {})
    }

    fn get_updates(&mut self, offset: Option<i64>) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            &GetUpdatesParams {
                offset,
                timeout: self.poll_timeout.as_secs(),
                allowed_updates: ALLOWED_UPDATES,
            },
        )
    }

    fn send_message(&mut self, chat_id: i64, text: &str) -> Result<()> {
        let _sent: Message = self.call("sendMessage", &SendMessageParams { chat_id, text })?;
        Ok(())
    }
}
