pub(crate) mod config;
pub(crate) mod documents;
pub(crate) mod entries;
pub(crate) mod links;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use osgdb_lib::{Maintainer, Settings};

use crate::error::CliError;

/// Print a bold section heading.
pub(crate) fn log_heading(text: &str) {
    log::info!("{}", text.if_supports_color(Stdout, |t| t.bold()));
}

/// A maintainer with the entries already read.
pub(crate) fn loaded(settings: &Settings) -> Result<Maintainer<'_>, CliError> {
    let mut maintainer = Maintainer::new(settings);
    maintainer.read_entries()?;
    Ok(maintainer)
}
