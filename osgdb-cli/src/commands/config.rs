use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use osgdb_lib::Settings;
use osgdb_lib::settings::{load_settings_string, looks_like_repository, save_root, settings_path};

use crate::error::CliError;

/// Show the settings file and the effective configuration.
pub(crate) fn run_config_show(settings: &Settings) -> Result<(), CliError> {
    let path = settings_path();

    log::info!(
        "{}",
        "osgdb Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
        if let Some(contents) = load_settings_string() {
            for line in contents.lines() {
                log::info!("    {}", line.if_supports_color(Stdout, |t| t.dimmed()));
            }
        }
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    for line in settings.describe().lines() {
        log::info!("  {line}");
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

pub(crate) fn run_config_set_root(path: &std::path::Path) -> Result<(), CliError> {
    if !looks_like_repository(path) {
        return Err(CliError::config(format!(
            "{} does not look like a games repository (no README.md)",
            path.display()
        )));
    }
    let path = std::fs::canonicalize(path)?;
    save_root(Some(&path))?;
    log::info!(
        "{} Repository root set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

pub(crate) fn run_config_clear_root() -> Result<(), CliError> {
    save_root(None)?;
    log::info!("Repository root cleared");
    Ok(())
}
