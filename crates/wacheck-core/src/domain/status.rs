use crate::error::CoreError;

const AFFIRMATIVE: &[&str] = &["1", "да", "y", "yes", "true", "есть"];
const NEGATIVE: &[&str] = &["0", "нет", "n", "no", "false", "none"];

pub fn parse_status(raw: &str) -> Result<bool, CoreError> {
    let normalized = raw.trim().to_lowercase();
    if AFFIRMATIVE.contains(&normalized.as_str()) {
        return Ok(true);
    }
    if NEGATIVE.contains(&normalized.as_str()) {
        return Ok(false);
    }
    Err(CoreError::InvalidStatus)
}

pub fn status_label(has_app: bool) -> &'static str {
    if has_app {
        "есть"
    } else {
        "нет"
    }
}
