use crate::commands::{print_json, Context};
use crate::inputs::{read_message, read_names};
use crate::prompt::{AmbiguityPolicy, TerminalDisambiguator};
use crate::render::{build_report, render_html, InvitationReport, Templates};
use anyhow::{Context as _, Result};
use chrono::{SecondsFormat, Utc};
use clap::Args;
use guestlink_core::{DeclineAmbiguous, GroupResolver, NameMatcher, PickTopMatch, Resolution};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Guest list, one entry per line
    #[arg(long)]
    pub names: Option<PathBuf>,
    /// Directory of .vcf address-book exports
    #[arg(long)]
    pub vcards: Option<PathBuf>,
    #[arg(long)]
    pub individual_message: Option<PathBuf>,
    #[arg(long)]
    pub group_message: Option<PathBuf>,
    /// HTML file to write
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// What to do when a name matches several contacts
    /// (defaults to prompt on a terminal, skip otherwise)
    #[arg(long, value_enum)]
    pub on_ambiguous: Option<AmbiguityPolicy>,
}

pub fn build_invitations(ctx: &Context<'_>, args: BuildArgs) -> Result<()> {
    let inputs = &ctx.config.inputs;
    let names_path = args.names.unwrap_or_else(|| inputs.names.clone());
    let individual_path = args
        .individual_message
        .unwrap_or_else(|| inputs.individual_message.clone());
    let group_path = args
        .group_message
        .unwrap_or_else(|| inputs.group_message.clone());
    let out = args.out.unwrap_or_else(|| ctx.config.output.clone());

    let matcher = ctx.load_matcher(args.vcards.as_deref())?;
    let entries = read_names(&names_path)?;
    let templates = Templates {
        individual: read_message(&individual_path)?,
        group: read_message(&group_path)?,
    };
    info!(
        entries = entries.len(),
        contacts = matcher.candidates().len(),
        "resolving guest list"
    );

    let policy = args.on_ambiguous.unwrap_or_else(default_policy);
    let resolution = resolve(ctx, &entries, &matcher, policy)?;

    let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let report = build_report(&resolution, &templates, generated_at);

    if ctx.json {
        return print_json(&report);
    }

    write_html(&report, &out)?;
    print_summary(&report, &out);
    Ok(())
}

fn resolve(
    ctx: &Context<'_>,
    entries: &[String],
    matcher: &NameMatcher,
    policy: AmbiguityPolicy,
) -> Result<Resolution> {
    let resolver = GroupResolver::new(ctx.config.separators.clone());
    debug!(?policy, separators = ?resolver.separators().as_slice(), "resolver ready");

    let resolution = match policy {
        AmbiguityPolicy::Prompt => {
            let stdin = io::stdin();
            let mut prompt = TerminalDisambiguator::new(stdin.lock(), io::stderr());
            resolver.resolve(entries, matcher, &mut prompt)?
        }
        AmbiguityPolicy::Skip => resolver.resolve(entries, matcher, &mut DeclineAmbiguous)?,
        AmbiguityPolicy::First => resolver.resolve(entries, matcher, &mut PickTopMatch)?,
    };
    Ok(resolution)
}

fn default_policy() -> AmbiguityPolicy {
    if io::stdin().is_terminal() {
        AmbiguityPolicy::Prompt
    } else {
        AmbiguityPolicy::Skip
    }
}

fn write_html(report: &InvitationReport, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
    }
    fs::write(out, render_html(report))
        .with_context(|| format!("write invitations {}", out.display()))
}

fn print_summary(report: &InvitationReport, out: &Path) {
    println!(
        "Wrote {} invitation(s) to {}",
        report.invitations.len(),
        out.display()
    );
    if !report.user_skipped.is_empty() {
        println!("Skipped: {}", report.user_skipped.join(", "));
    }
    let not_found: Vec<&str> = report
        .not_found
        .iter()
        .chain(&report.no_phone)
        .map(String::as_str)
        .collect();
    if !not_found.is_empty() {
        println!("Not found: {}", not_found.join(", "));
    }
}
