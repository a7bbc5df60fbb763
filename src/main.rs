//! wavetui - Terminal Waveform Viewer
//!
//! Browse for VCD traces and inspect their signals as synchronized character-cell waveforms.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, Command};
use std::fs::File;
use std::path::PathBuf;
use wavetui::config::{Config, ThemeName};
use wavetui::render::ui::{ColorTheme, TerminalUI};
use wavetui::Application;

fn cli() -> Command {
    Command::new("wavetui")
        .version(wavetui::VERSION)
        .about("A terminal waveform viewer for VCD traces")
        .long_about(
            "wavetui shows VCD signals as character-cell waveforms. Pick a trace in the \
             file browser, tick signals in the signal list, pan with the arrow keys, zoom \
             with +/-, and click a time to read every signal's value there.",
        )
        .arg(
            Arg::new("file")
                .help("VCD trace to open on startup")
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Configuration file (default: <config dir>/wavetui/config.toml)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("zoom")
                .long("zoom")
                .value_name("PS")
                .help("Initial picoseconds per column")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("NAME")
                .help("Color theme: default, monochrome or high-contrast"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .help("Write logs to this file (RUST_LOG sets the level)")
                .value_parser(value_parser!(PathBuf)),
        )
}

/// Logs go to `--log-file` at the `RUST_LOG` level. Without a file they are
/// discarded: stderr is the terminal the UI draws on.
fn build_logger(log_file: Option<File>) -> env_logger::Logger {
    match log_file {
        Some(file) => env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .build(),
        None => env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .build(),
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let file = log_file
        .map(|path| {
            File::create(path)
                .with_context(|| format!("Cannot create log file {}", path.display()))
        })
        .transpose()?;
    let logger = build_logger(file);
    log::set_max_level(logger.filter());
    log::set_boxed_logger(Box::new(logger)).context("Logger already initialized")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    init_logging(matches.get_one::<PathBuf>("log-file"))?;

    let theme = matches
        .get_one::<String>("theme")
        .map(|name| name.parse::<ThemeName>())
        .transpose()?;
    let config = Config::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?
        .with_overrides(matches.get_one::<u64>("zoom").copied(), theme);
    config.validate()?;

    let trace = matches.get_one::<PathBuf>("file").cloned();
    if let Some(path) = &trace {
        wavetui::trace::validate_trace_path(path)?;
    }

    log::info!("starting wavetui {}", wavetui::VERSION);
    let color_theme = ColorTheme::from_name(config.theme);
    let ui_renderer = Box::new(TerminalUI::with_theme(color_theme.clone())?);
    let mut app = Application::new(config, color_theme, trace, ui_renderer);

    app.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!wavetui::VERSION.is_empty());
    }

    #[test]
    fn test_cli_parses_overrides() {
        let matches = cli()
            .try_get_matches_from(["wavetui", "dump.vcd", "--zoom", "250", "--theme", "mono"])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>("file"),
            Some(&PathBuf::from("dump.vcd"))
        );
        assert_eq!(matches.get_one::<u64>("zoom"), Some(&250));
        assert_eq!(
            matches.get_one::<String>("theme").map(String::as_str),
            Some("mono")
        );
    }

    #[test]
    fn test_cli_rejects_zero_zoom() {
        assert!(cli()
            .try_get_matches_from(["wavetui", "--zoom", "0"])
            .is_err());
    }

    #[test]
    fn logging_is_off_without_a_log_file() {
        assert_eq!(build_logger(None).filter(), log::LevelFilter::Off);
    }

    #[test]
    fn log_file_receives_records() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("wavetui.log");
        let logger = env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .target(env_logger::Target::Pipe(Box::new(File::create(&path).unwrap())))
            .build();
        log::Log::log(
            &logger,
            &log::Record::builder()
                .args(format_args!("trace loaded"))
                .level(log::Level::Info)
                .build(),
        );
        log::Log::flush(&logger);
        assert!(std::fs::read_to_string(&path).unwrap().contains("trace loaded"));
    }
}
