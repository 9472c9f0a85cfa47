use crate::commands::{dispatch, Context};
use anyhow::{Context as _, Result};
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use wacheck_store::ContactStore;
use wacheck_telegram::{parse_command, BotApi, BotClient, TelegramError, Update};

const RETRY_PAUSE: Duration = Duration::from_secs(3);

pub fn serve(ctx: &Context<'_>) -> Result<()> {
    let token = ctx.config.require_token()?;
    let poll_timeout = Duration::from_secs(ctx.config.poll_timeout_secs);
    let mut client = BotClient::new(token, &ctx.config.api_base, poll_timeout)
        .with_context(|| "build telegram client")?;
    let me = client.get_me().with_context(|| "fetch bot identity")?;
    let bot_username = me.username.unwrap_or_default();

    info!(
        db = %ctx.store.path().display(),
        bot = %bot_username,
        "bot started, press Ctrl+C to stop"
    );
    let mut offset = None;
    loop {
        match poll_once(&mut client, ctx.store, &bot_username, offset) {
            Ok(Some(next)) => offset = Some(next),
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "polling failed");
                thread::sleep(RETRY_PAUSE);
            }
        }
    }
}

/// Handles one batch of updates in order and returns the offset that
/// acknowledges them, or `None` when the batch was empty. Commands that
/// mention a bot other than `bot_username` are skipped.
pub fn poll_once<A: BotApi>(
    api: &mut A,
    store: &ContactStore,
    bot_username: &str,
    offset: Option<i64>,
) -> std::result::Result<Option<i64>, TelegramError> {
    let updates = api.get_updates(offset)?;
    let mut next = None;
    for update in &updates {
        next = Some(update.update_id + 1);
        handle_update(api, store, bot_username, update);
    }
    Ok(next)
}

fn handle_update<A: BotApi>(
    api: &mut A,
    store: &ContactStore,
    bot_username: &str,
    update: &Update,
) {
    let Some(message) = &update.message else {
        return;
    };
    let Some(command) = message
        .text
        .as_deref()
        .and_then(|text| parse_command(text, bot_username))
    else {
        return;
    };
    let args = command.arg_refs();
    let Some(result) = dispatch(&command.name, &args, store) else {
        debug!(command = %command.name, "unknown command ignored");
        return;
    };

    match result {
        Ok(reply) => {
            if let Err(err) = api.send_message(message.chat.id, &reply) {
                warn!(chat_id = message.chat.id, error = %err, "failed to send reply");
            }
        }
        Err(err) => {
            error!(command = %command.name, error = %format!("{err:#}"), "command failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::poll_once;
    use std::collections::VecDeque;
    use tempfile::TempDir;
    use wacheck_store::ContactStore;
    use wacheck_telegram::{BotApi, Chat, Message, Result, TelegramError, Update, User};

    const BOT: &str = "wa_check_bot";

    #[derive(Default)]
    struct FakeApi {
        batches: VecDeque<Vec<Update>>,
        offsets: Vec<Option<i64>>,
        sent: Vec<(i64, String)>,
        fail_sends: bool,
    }

    impl BotApi for FakeApi {
        fn get_me(&mut self) -> Result<User> {
            Ok(User {
                id: 1,
                username: Some(BOT.to_string()),
            })
        }

        fn get_updates(&mut self, offset: Option<i64>) -> Result<Vec<Update>> {
            self.offsets.push(offset);
            Ok(self.batches.pop_front().unwrap_or_default())
        }

        fn send_message(&mut self, chat_id: i64, text: &str) -> Result<()> {
            if self.fail_sends {
                return Err(TelegramError::MissingResult);
            }
            self.sent.push((chat_id, text.to_string()));
            Ok(())
        }
    }

    fn text_update(update_id: i64, chat_id: i64, text: &str) -> Update {
        Update {
            update_id,
            message: Some(Message {
                message_id: update_id,
                chat: Chat { id: chat_id },
                text: Some(text.to_string()),
            }),
        }
    }

    fn open_store(temp: &TempDir) -> ContactStore {
        ContactStore::open(temp.path().join("contacts.db")).expect("open store")
    }

    #[test]
    fn check_set_check_over_the_wire() {
        let temp = TempDir::new().expect("tempdir");
        let store = open_store(&temp);
        let mut api = FakeApi::default();
        api.batches.push_back(vec![text_update(7, 1, "/check +79990001122")]);
        api.batches.push_back(vec![
            text_update(8, 1, "/set +79990001122 да Клиент"),
            text_update(9, 1, "/check +79990001122"),
        ]);

        let offset = poll_once(&mut api, &store, BOT, None).expect("first poll");
        assert_eq!(offset, Some(8));
        let offset = poll_once(&mut api, &store, BOT, offset).expect("second poll");
        assert_eq!(offset, Some(10));

        assert_eq!(api.offsets, vec![None, Some(8)]);
        assert_eq!(api.sent.len(), 3);
        assert!(api.sent[0].1.starts_with("Нет данных"));
        assert!(api.sent[2].1.contains("есть"));
        assert!(api.sent[2].1.contains("Клиент"));
    }

    #[test]
    fn non_command_updates_advance_offset_without_reply() {
        let temp = TempDir::new().expect("tempdir");
        let store = open_store(&temp);
        let mut api = FakeApi::default();
        api.batches.push_back(vec![
            text_update(3, 1, "hello"),
            text_update(4, 1, "/unknown"),
            Update {
                update_id: 5,
                message: None,
            },
        ]);

        let offset = poll_once(&mut api, &store, BOT, None).expect("poll");
        assert_eq!(offset, Some(6));
        assert!(api.sent.is_empty());
    }

    #[test]
    fn commands_for_other_bots_get_no_reply() {
        let temp = TempDir::new().expect("tempdir");
        let store = open_store(&temp);
        let mut api = FakeApi::default();
        api.batches.push_back(vec![
            text_update(20, 1, "/stats@some_other_bot"),
            text_update(21, 1, "/set@some_other_bot 555 yes"),
            text_update(22, 1, "/stats@wa_check_bot"),
        ]);

        let offset = poll_once(&mut api, &store, BOT, None).expect("poll");
        assert_eq!(offset, Some(23));
        assert_eq!(api.sent.len(), 1);
        assert!(api.sent[0].1.starts_with("База пока пуста"));
        assert_eq!(store.stats().expect("stats").total, 0);
    }

    #[test]
    fn empty_batch_keeps_offset() {
        let temp = TempDir::new().expect("tempdir");
        let store = open_store(&temp);
        let mut api = FakeApi::default();
        let offset = poll_once(&mut api, &store, BOT, Some(12)).expect("poll");
        assert_eq!(offset, None);
    }

    #[test]
    fn send_failures_do_not_stop_the_batch() {
        let temp = TempDir::new().expect("tempdir");
        let store = open_store(&temp);
        let mut api = FakeApi {
            fail_sends: true,
            ..Default::default()
        };
        api.batches.push_back(vec![
            text_update(1, 1, "/set 555 yes"),
            text_update(2, 1, "/set 556 no"),
        ]);

        let offset = poll_once(&mut api, &store, BOT, None).expect("poll");
        assert_eq!(offset, Some(3));
        assert_eq!(store.stats().expect("stats").total, 2);
    }
}
