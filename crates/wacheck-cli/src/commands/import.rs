use crate::commands::Context;
use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use wacheck_core::{normalize_phone, parse_status, Contact};

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// File with one `phone,status[,note]` record per line
    pub file: PathBuf,
}

pub fn import(ctx: &Context<'_>, args: ImportArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.file)
        .with_context(|| format!("read import file {}", args.file.display()))?;
    let records = parse_records(&contents)?;
    let changed = ctx.store.bulk_import(records)?;
    info!(file = %args.file.display(), changed, "import finished");
    println!("Imported {changed} records");
    Ok(())
}

/// Parses every line before anything is written; the first bad line fails
/// the whole import.
fn parse_records(contents: &str) -> Result<Vec<Contact>> {
    let mut records = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.splitn(3, ',');
        let raw_phone = fields.next().unwrap_or_default();
        let Some(raw_status) = fields.next() else {
            return Err(invalid_input(format!(
                "line {line_no}: expected phone,status[,note]"
            )));
        };
        let note = fields.next().unwrap_or_default().trim();

        let phone = normalize_phone(raw_phone)
            .map_err(|err| invalid_input(format!("line {line_no}: {err}")))?;
        let has_app = parse_status(raw_status)
            .map_err(|err| invalid_input(format!("line {line_no}: {err}")))?;
        records.push(Contact::new(phone, has_app, note));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::parse_records;
    use wacheck_core::Contact;

    #[test]
    fn parses_records_and_skips_comments() {
        let contents = "# phone,status,note\n\n+7 999 000-11-22, да ,Клиент, VIP\n555,no\n";
        let records = parse_records(contents).expect("parse");
        assert_eq!(
            records,
            vec![
                Contact::new("+79990001122", true, "Клиент, VIP"),
                Contact::new("555", false, ""),
            ]
        );
    }

    #[test]
    fn reports_line_number_of_bad_record() {
        let err = parse_records("555,yes\n556,maybe\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 2"), "{message}");
    }

    #[test]
    fn rejects_line_without_status() {
        let err = parse_records("555\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
