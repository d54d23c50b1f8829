//! Daybook line shell.
//!
//! # Responsibility
//! - Resolve configuration from an optional TOML file plus flag overrides.
//! - Start logging, build the `Daybook`, then run commands read from stdin.

mod commands;
mod render;
mod shell;

use clap::Parser;
use commands::Flow;
use daybook_core::{init_logging, AppConfig, Daybook};
use log::warn;
use std::error::Error;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "daybook", version, about = "Personal journal and team task board")]
struct Args {
    /// TOML config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; stderr when unset
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
    /// Start with an empty journal and board
    #[arg(long)]
    no_seed: bool,
    /// Act as the team member with this email
    #[arg(long, value_name = "EMAIL")]
    user: Option<String>,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(&args)?;
    init_logging(&config.logging)?;
    let mut app = Daybook::from_config(config)?;

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut out = io::stdout().lock();
    if interactive {
        writeln!(
            out,
            "daybook {}; acting as {}. Type `help` for commands.",
            daybook_core::core_version(),
            app.current_user().name
        )?;
        prompt(&mut out)?;
    }

    for line in stdin.lock().lines() {
        let line = line?;
        match shell::parse_line(&line) {
            Ok(None) => {}
            Ok(Some(command)) => match commands::execute(&mut app, command, &mut out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Err(err) => {
                warn!("event=shell_parse module=cli status=rejected");
                write!(out, "{err}")?;
            }
        }
        if interactive {
            prompt(&mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

/// File values first, then flags on top.
fn resolve_config(args: &Args) -> Result<AppConfig, Box<dyn Error>> {
    let mut config = match args.config.as_deref() {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if let Some(dir) = &args.log_dir {
        config.logging.dir = Some(dir.clone());
    }
    if args.no_seed {
        config.seed_demo_data = false;
    }
    if let Some(user) = &args.user {
        config.current_user = Some(user.clone());
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{resolve_config, Args};
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn flags_override_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "seed_demo_data = true\ncurrent_user = \"alex@example.com\"\n[logging]\nlevel = \"info\""
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = Args::try_parse_from([
            "daybook",
            "--config",
            &path,
            "--log-level",
            "warn",
            "--no-seed",
            "--user",
            "emma@example.com",
        ])
        .unwrap();
        let config = resolve_config(&args).unwrap();
        assert!(!config.seed_demo_data);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.current_user.as_deref(), Some("emma@example.com"));
    }

    #[test]
    fn invalid_override_is_rejected() {
        let args = Args::try_parse_from(["daybook", "--log-dir", "relative/logs"]).unwrap();
        assert!(resolve_config(&args).is_err());
    }
}
