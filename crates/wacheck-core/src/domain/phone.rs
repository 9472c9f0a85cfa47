use crate::error::CoreError;

// Code point of the zero in each BMP block of Unicode decimal digits (Nd).
// Every block runs zero..=nine contiguously.
const DECIMAL_ZEROS: &[u32] = &[
    0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66, 0x0CE6,
    0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946, 0x19D0,
    0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0, 0xA9F0,
    0xAA50, 0xABF0, 0xFF10,
];

/// Reduces a user-entered phone number to its digits, keeping a leading `+`
/// when the trimmed input starts with one. Decimal digits from other
/// scripts are stored as their ASCII equivalents.
pub fn normalize_phone(raw: &str) -> Result<String, CoreError> {
    let digits: String = raw.chars().filter_map(ascii_digit).collect();
    if digits.is_empty() {
        return Err(CoreError::InvalidPhone);
    }

    if raw.trim().starts_with('+') {
        let mut out = String::with_capacity(digits.len() + 1);
        out.push('+');
        out.push_str(&digits);
        return Ok(out);
    }

    Ok(digits)
}

fn ascii_digit(ch: char) -> Option<char> {
    if ch.is_ascii_digit() {
        return Some(ch);
    }
    let code = u32::from(ch);
    DECIMAL_ZEROS
        .iter()
        .find(|zero| (**zero..**zero + 10).contains(&code))
        .and_then(|zero| char::from_digit(code - zero, 10))
}
