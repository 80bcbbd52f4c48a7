//! Runs menu entries and the logical-structure hand-off as child processes
//! of this same executable.
//!
//! Children inherit stdin. The parent reads stdin through a buffer, so with
//! piped input the parent may already hold lines meant for a child, which then
//! sees end of input. Interactive terminals are line-buffered and unaffected.

use std::process::Command;

use anyhow::{Context, bail};
use rrg_utils::session::Handoff;
use rrg_utils::dynamicity_flag;

use crate::Settings;

pub fn run_child(args: &[String]) -> anyhow::Result<()> {
    let exe = std::env::current_exe().context("could not locate the rrg-assistant executable")?;
    log::debug!("spawning {} {args:?}", exe.display());
    let status = Command::new(&exe)
        .args(args)
        .status()
        .with_context(|| format!("could not start {}", exe.display()))?;
    if !status.success() {
        bail!("{} {} exited with {status}", exe.display(), args.join(" "));
    }
    Ok(())
}

/// `aktionsart` with the parent's flags.
pub fn aktionsart_args(settings: &Settings) -> Vec<String> {
    let mut args = settings.forwarded_flags();
    args.push("aktionsart".to_string());
    args
}

/// `logical-structure AKTIONSART CLAUSE DINAMICIDAD`, or no positionals at all
/// when starting from scratch.
pub fn logical_structure_args(settings: &Settings, handoff: Option<&Handoff>) -> Vec<String> {
    let mut args = settings.forwarded_flags();
    args.push("logical-structure".to_string());
    if let Some(handoff) = handoff {
        args.push(handoff.aktionsart.to_string());
        args.push(handoff.clause.clone());
        args.push(dynamicity_flag(handoff.dynamic).to_string());
    }
    args
}
