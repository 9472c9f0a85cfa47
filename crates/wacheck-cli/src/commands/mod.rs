use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};
use wacheck_config::AppConfig;
use wacheck_store::ContactStore;

pub mod export;
pub mod handlers;
pub mod import;
pub mod local;
pub mod serve;

/// Bot command handler: arguments after the command name in, one reply out.
pub type Handler = fn(&[&str], &ContactStore) -> Result<String>;

pub const COMMANDS: &[(&str, Handler)] = &[
    ("start", handlers::start as Handler),
    ("check", handlers::check as Handler),
    ("set", handlers::set as Handler),
    ("stats", handlers::stats as Handler),
];

pub struct Context<'a> {
    pub store: &'a ContactStore,
    pub config: &'a AppConfig,
}

pub fn handler_for(name: &str) -> Option<Handler> {
    COMMANDS
        .iter()
        .find(|(command, _)| *command == name)
        .map(|(_, handler)| *handler)
}

/// Runs the named command. `None` means the command is not known.
pub fn dispatch(name: &str, args: &[&str], store: &ContactStore) -> Option<Result<String>> {
    handler_for(name).map(|handler| handler(args, store))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
