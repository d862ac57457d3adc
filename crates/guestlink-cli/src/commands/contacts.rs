use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ContactsArgs {
    /// Directory of .vcf files (defaults to inputs.vcards_dir)
    #[arg(long)]
    pub vcards: Option<PathBuf>,
}

pub fn list_contacts(ctx: &Context<'_>, args: ContactsArgs) -> Result<()> {
    let load = ctx.load_candidates(args.vcards.as_deref())?;

    if ctx.json {
        return print_json(&load);
    }

    if load.candidates.is_empty() {
        println!("No contacts found.");
    }
    for candidate in &load.candidates {
        println!("{}  {}", candidate.name, candidate.phones.join(", "));
    }
    println!(
        "{} contact(s) from {} file(s), {} skipped",
        load.candidates.len(),
        load.files,
        load.skipped
    );
    Ok(())
}
