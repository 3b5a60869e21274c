//! Link probing commands. Each finding is logged by the auditor as it
//! is found; these commands only add a summary.

use std::time::Duration;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use osgdb_links::{HttpProbe, LinkFinding};
use osgdb_lib::{Maintainer, Settings};

use crate::commands::loaded;
use crate::error::CliError;

pub(crate) fn run_links(settings: &Settings, timeout: u64) -> Result<(), CliError> {
    let maintainer = loaded(settings)?;
    let probe = HttpProbe::with_timeout(Duration::from_secs(timeout))?;
    let findings = maintainer.check_external_links(&probe)?;
    summarize(&findings);
    Ok(())
}

pub(crate) fn run_backlog_links(settings: &Settings, timeout: u64) -> Result<(), CliError> {
    let maintainer = Maintainer::new(settings);
    let probe = HttpProbe::with_timeout(Duration::from_secs(timeout))?;
    let findings = maintainer.check_backlog_links(&probe)?;
    summarize(&findings);
    Ok(())
}

fn summarize(findings: &[LinkFinding]) {
    crate::log_blank();
    if findings.is_empty() {
        log::info!(
            "{} All links OK",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "{} {} problematic links",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            findings.len(),
        );
    }
}
