use anyhow::Result;
use wacheck_core::{normalize_phone, parse_status, status_label, CoreError};
use wacheck_store::ContactStore;

const GREETING: &str = "Привет! Отправь /check <номер> чтобы узнать, есть ли WhatsApp у контакта.\n\
Можно добавить или обновить данные командой /set <номер> <да|нет> [примечание].";
const CHECK_USAGE: &str = "Укажи номер телефона после команды. Пример: /check +79990001122";
const SET_USAGE: &str =
    "Использование: /set <номер> <да|нет> [примечание]. Пример: /set +79990001122 да Клиент";
const NO_DATA: &str =
    "Нет данных по этому номеру. Добавь информацию командой /set <номер> <да|нет>.";
const EMPTY_STORE: &str = "База пока пуста. Добавь контакты через /set.";

pub fn start(_args: &[&str], _store: &ContactStore) -> Result<String> {
    Ok(GREETING.to_string())
}

pub fn check(args: &[&str], store: &ContactStore) -> Result<String> {
    let Some(raw_phone) = args.first() else {
        return Ok(CHECK_USAGE.to_string());
    };
    let phone = match normalize_phone(raw_phone) {
        Ok(phone) => phone,
        Err(err) => return Ok(input_error(err)),
    };

    let Some(contact) = store.get_contact(&phone)? else {
        return Ok(NO_DATA.to_string());
    };
    let mut reply = format!(
        "У номера {} {} WhatsApp.",
        contact.phone,
        status_label(contact.has_app)
    );
    if !contact.note.is_empty() {
        reply.push_str("\nПримечание: ");
        reply.push_str(&contact.note);
    }
    Ok(reply)
}

pub fn set(args: &[&str], store: &ContactStore) -> Result<String> {
    let [raw_phone, raw_status, note_words @ ..] = args else {
        return Ok(SET_USAGE.to_string());
    };
    let parsed = normalize_phone(raw_phone)
        .and_then(|phone| parse_status(raw_status).map(|has_app| (phone, has_app)));
    let (phone, has_app) = match parsed {
        Ok(parsed) => parsed,
        Err(err) => return Ok(input_error(err)),
    };
    let note = note_words.join(" ");
    let note = note.trim();

    store.upsert_contact(&phone, has_app, note)?;

    let mut reply = format!(
        "Информация сохранена: {} -> {} WhatsApp",
        phone,
        status_label(has_app)
    );
    if !note.is_empty() {
        reply.push_str(&format!(" ({note})"));
    }
    Ok(reply)
}

pub fn stats(_args: &[&str], store: &ContactStore) -> Result<String> {
    let stats = store.stats()?;
    if stats.is_empty() {
        return Ok(EMPTY_STORE.to_string());
    }
    Ok(format!(
        "В базе {} контактов. WhatsApp найден у {}.",
        stats.total, stats.positive
    ))
}

fn input_error(err: CoreError) -> String {
    format!("Ошибка: {err}")
}
