use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(prefs_for(flags, std::io::stdout().is_terminal()));
}

fn prefs_for(flags: &GlobalFlags, is_tty: bool) -> UiPrefs {
    let table_color = is_tty
        && flags.format == OutputFormat::Table
        && !flags.quiet
        && std::env::var_os("NO_COLOR").is_none();

    // Progress goes to stderr, but keep it off when stdout is piped JSON.
    let progress = is_tty && !flags.quiet && flags.format != OutputFormat::Json;

    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    UiPrefs {
        table_color,
        progress,
        term_width,
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        progress: false,
        term_width: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(format: OutputFormat, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            format,
            quiet,
            verbose: false,
        }
    }

    #[test]
    fn no_progress_without_a_terminal() {
        assert!(!prefs_for(&flags(OutputFormat::Table, false), false).progress);
    }

    #[test]
    fn quiet_and_json_disable_progress() {
        assert!(!prefs_for(&flags(OutputFormat::Table, true), true).progress);
        assert!(!prefs_for(&flags(OutputFormat::Json, false), true).progress);
        assert!(prefs_for(&flags(OutputFormat::Raw, false), true).progress);
    }
}
