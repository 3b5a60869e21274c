//! Commands that read (and possibly rewrite) the entry files.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use osgdb_lib::{Finding, Maintainer, Settings};

use crate::commands::{loaded, log_heading};
use crate::error::CliError;

/// List every validation finding of the store.
pub(crate) fn run_check(settings: &Settings) -> Result<(), CliError> {
    let maintainer = loaded(settings)?;
    let diagnostics = maintainer.store()?.diagnostics();

    crate::log_blank();
    if diagnostics.is_empty() {
        log::info!(
            "{} No validation findings",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
        return Ok(());
    }
    log_heading("Validation findings");
    for diagnostic in diagnostics {
        log::warn!("  {diagnostic}");
    }
    crate::log_blank();
    log::info!("{} findings", diagnostics.len());
    Ok(())
}

pub(crate) fn run_inconsistencies(settings: &Settings) -> Result<(), CliError> {
    let maintainer = loaded(settings)?;
    let findings = maintainer.check_inconsistencies()?;
    report_findings("Inconsistencies", &findings);
    Ok(())
}

pub(crate) fn run_template_leftovers(settings: &Settings) -> Result<(), CliError> {
    let maintainer = loaded(settings)?;
    let findings = maintainer.check_template_leftovers()?;
    report_findings("Template leftovers", &findings);
    Ok(())
}

fn report_findings(title: &str, findings: &[Finding]) {
    crate::log_blank();
    log_heading(title);
    if findings.is_empty() {
        log::info!("  none");
        return;
    }
    for finding in findings {
        log::warn!("  {finding}");
    }
}

pub(crate) fn run_clean_rejected(settings: &Settings) -> Result<(), CliError> {
    let maintainer = Maintainer::new(settings);
    maintainer.clean_rejected()?;
    Ok(())
}

pub(crate) fn run_clean_backlog(settings: &Settings) -> Result<(), CliError> {
    let maintainer = loaded(settings)?;
    maintainer.clean_backlog()?;
    Ok(())
}

pub(crate) fn run_write_entries(settings: &Settings) -> Result<(), CliError> {
    let maintainer = loaded(settings)?;
    maintainer.write_entries()?;
    Ok(())
}

pub(crate) fn run_strip_downloads(settings: &Settings) -> Result<(), CliError> {
    let mut maintainer = loaded(settings)?;
    if maintainer.strip_redundant_downloads()? > 0 {
        maintainer.write_entries()?;
    }
    Ok(())
}
