use crate::commands::{handler_for, Context};
use crate::error::invalid_input;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct LocalArgs {
    /// Command arguments; put words starting with `-` after `--`
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Runs a bot command against the local store and prints the reply.
pub fn run(ctx: &Context<'_>, name: &str, args: LocalArgs) -> Result<()> {
    let handler =
        handler_for(name).ok_or_else(|| invalid_input(format!("unknown command: {name}")))?;
    let args: Vec<&str> = args.args.iter().map(String::as_str).collect();
    let reply = handler(&args, ctx.store)?;
    println!("{reply}");
    Ok(())
}
