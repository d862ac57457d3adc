use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MatchArgs {
    /// Name as written on the guest list
    pub query: String,
    #[arg(long)]
    pub vcards: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PhoneArgs {
    #[arg(required = true)]
    pub numbers: Vec<String>,
}

#[derive(Debug, Serialize)]
struct NormalizedPhone<'a> {
    raw: &'a str,
    normalized: String,
}

pub fn match_name(ctx: &Context<'_>, args: MatchArgs) -> Result<()> {
    if args.query.trim().is_empty() {
        return Err(invalid_input("query cannot be empty"));
    }
    let matcher = ctx.load_matcher(args.vcards.as_deref())?;
    let matches = matcher.find_matches(&args.query);

    if ctx.json {
        return print_json(&matches);
    }

    if matches.is_empty() {
        println!("No matches found for {}", args.query);
        return Ok(());
    }
    for item in &matches {
        println!(
            "{:>4}%  {}  {}",
            (item.confidence * 100.0).round(),
            item.name,
            item.phones.join(", ")
        );
    }
    Ok(())
}

pub fn normalize_phones(ctx: &Context<'_>, args: PhoneArgs) -> Result<()> {
    let normalized: Vec<NormalizedPhone<'_>> = args
        .numbers
        .iter()
        .map(|raw| NormalizedPhone {
            raw,
            normalized: ctx.config.phone.normalize(raw),
        })
        .collect();

    if ctx.json {
        return print_json(&normalized);
    }

    for item in normalized {
        println!("{}", item.normalized);
    }
    Ok(())
}
