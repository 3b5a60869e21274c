mod cli_types;
mod commands;
mod error;
mod logger;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use osgdb_lib::Settings;

use cli_types::{Cli, Commands, ConfigAction};
use commands::config::{run_config_clear_root, run_config_path, run_config_set_root, run_config_show};
use commands::documents::{run_all, run_export_json, run_repos, run_stats, run_tocs};
use commands::entries::{
    run_check, run_clean_backlog, run_clean_rejected, run_inconsistencies, run_strip_downloads,
    run_template_leftovers, run_write_entries,
};
use commands::links::{run_backlog_links, run_links};
use error::CliError;
use logger::CliLogger;

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();

    let logger = match CliLogger::new(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Cannot open log file: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = logger.install() {
        eprintln!("Cannot install logger: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        log::logger().flush();
        eprintln!(
            "{}",
            "Aborted, see the message above".if_supports_color(Stderr, |t| t.dimmed()),
        );
        std::process::exit(1);
    }
    log::logger().flush();
}

fn run(cli: Cli) -> Result<(), CliError> {
    // config commands that do not need a repository
    if let Commands::Config { action } = &cli.command {
        match action {
            ConfigAction::Path => {
                run_config_path();
                return Ok(());
            }
            ConfigAction::SetRoot { path } => return run_config_set_root(path),
            ConfigAction::ClearRoot => return run_config_clear_root(),
            ConfigAction::Show => {}
        }
    }

    let root = osgdb_lib::settings::resolve_root(cli.root);
    log::debug!("Repository root: {}", root.display());
    let settings = Settings::load(root)?;

    match cli.command {
        Commands::Check => run_check(&settings),
        Commands::Inconsistencies => run_inconsistencies(&settings),
        Commands::TemplateLeftovers => run_template_leftovers(&settings),
        Commands::CleanRejected => run_clean_rejected(&settings),
        Commands::CleanBacklog => run_clean_backlog(&settings),
        Commands::Links { timeout } => run_links(&settings, timeout),
        Commands::BacklogLinks { timeout } => run_backlog_links(&settings, timeout),
        Commands::Tocs => run_tocs(&settings),
        Commands::Stats => run_stats(&settings),
        Commands::ExportJson => run_export_json(&settings),
        Commands::Repos => run_repos(&settings),
        Commands::WriteEntries => run_write_entries(&settings),
        Commands::StripDownloads => run_strip_downloads(&settings),
        Commands::All => run_all(&settings),
        Commands::Config { .. } => run_config_show(&settings),
    }
}
