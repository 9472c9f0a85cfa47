use crate::commands::{print_json, Context};
use anyhow::Result;

pub fn export(ctx: &Context<'_>) -> Result<()> {
    let contacts = ctx.store.list_contacts()?;
    print_json(&contacts)
}
