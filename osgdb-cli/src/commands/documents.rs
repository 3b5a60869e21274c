//! Commands that regenerate derived documents.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use osgdb_lib::{Maintainer, Settings};

use crate::commands::{loaded, log_heading};
use crate::error::CliError;

pub(crate) fn run_tocs(settings: &Settings) -> Result<(), CliError> {
    let maintainer = loaded(settings)?;
    let tocs = maintainer.update_readme_tocs()?;

    crate::log_blank();
    log_heading("Tables of contents");
    for doc in &tocs.primary {
        log::info!(
            "  {:<12} {}",
            doc.title,
            doc.count.if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    log::info!(
        "  {} categories, {} platforms",
        tocs.categories.len(),
        tocs.platforms.len(),
    );
    Ok(())
}

pub(crate) fn run_stats(settings: &Settings) -> Result<(), CliError> {
    let maintainer = loaded(settings)?;
    let statistics = maintainer.update_statistics()?;

    crate::log_blank();
    log_heading("Statistics");
    log::info!("  Entries:  {}", statistics.total);
    log::info!("  Mature:   {}", statistics.mature);
    log::info!("  Beta:     {}", statistics.beta);
    log::info!("  Inactive: {}", statistics.inactive.len());
    Ok(())
}

pub(crate) fn run_export_json(settings: &Settings) -> Result<(), CliError> {
    let maintainer = loaded(settings)?;
    maintainer.export_json()?;
    Ok(())
}

pub(crate) fn run_repos(settings: &Settings) -> Result<(), CliError> {
    let maintainer = loaded(settings)?;
    let manifest = maintainer.update_repos()?;
    log::info!(
        "{} git, {} svn, {} hg repositories",
        manifest.git.len(),
        manifest.svn.len(),
        manifest.hg.len(),
    );
    Ok(())
}

pub(crate) fn run_all(settings: &Settings) -> Result<(), CliError> {
    let mut maintainer = Maintainer::new(settings);
    maintainer.complete_run()?;
    crate::log_blank();
    log::info!(
        "{} All documents regenerated",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}
