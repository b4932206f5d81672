#![forbid(unsafe_code)]

//! Command-line argument parsing for the desktop binary.
//!
//! Parses args by hand and supports `FOLIO_*` environment overrides.
//! Precedence: defaults, then environment, then flags.

use std::env;
use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Window title when none is configured.
pub const DEFAULT_TITLE: &str = "mauro_portafolio";

pub const HELP_TEXT: &str = "\
folio: responsive personal portfolio in the terminal

USAGE:
    folio [OPTIONS]

OPTIONS:
    --title=TEXT         Window title (default: mauro_portafolio)
    --cell-width-dp=F    Width of one column in dp (default: 8). Wider than
                         800 dp selects the two-column desktop layout
    --no-mouse           Disable mouse event capture
    --log-file=PATH      Write logs to PATH
    --log-json           Write logs as JSON lines
    --exit-after-ms=N    Quit automatically after N milliseconds
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Tab / Shift-Tab      Move focus between project buttons
    Enter / Space        Open the focused project
    Up/Down, j/k         Scroll
    PgUp/PgDn, Home/End  Scroll by page / to the ends
    [ / ]                Scroll the focused card's tags
    q / Esc / Ctrl+C     Quit

ENVIRONMENT VARIABLES:
    FOLIO_TITLE           Override --title
    FOLIO_CELL_WIDTH_DP   Override --cell-width-dp
    FOLIO_LOG_FILE        Override --log-file
    FOLIO_LOG_JSON        Set to 1 for JSON logs
    FOLIO_EXIT_AFTER_MS   Override --exit-after-ms
    FOLIO_LOG             Log filter (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    pub title: String,
    /// dp per terminal column.
    pub cell_width_dp: f32,
    pub mouse: bool,
    pub log_file: Option<PathBuf>,
    pub log_json: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
            cell_width_dp: folio_layout::responsive::DEFAULT_CELL_WIDTH_DP,
            mouse: true,
            log_file: None,
            log_json: false,
            exit_after_ms: 0,
        }
    }
}

/// What the binary should do.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Run(Opts),
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    InvalidValue { flag: &'static str, value: String },
    UnknownArgument(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::InvalidValue { flag, value } => write!(f, "Invalid {flag} value: {value}"),
            CliError::UnknownArgument(arg) => write!(f, "Unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

fn parse_cell_width(value: &str) -> Option<f32> {
    value
        .parse::<f32>()
        .ok()
        .filter(|w| w.is_finite() && *w > 0.0)
}

fn truthy(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "yes" | "on")
}

impl Opts {
    /// Parse the process arguments and environment.
    ///
    /// # Errors
    ///
    /// See [`Opts::parse_from`].
    pub fn parse() -> Result<CliAction, CliError> {
        Self::parse_from(env::args().skip(1), |key| env::var(key).ok())
    }

    /// Parse `args` (without the program name), reading overrides through
    /// `env`.
    ///
    /// Malformed environment values are ignored; malformed flags are errors.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] for an unknown argument or an invalid flag value.
    pub fn parse_from<I, F>(args: I, env: F) -> Result<CliAction, CliError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = env("FOLIO_TITLE") {
            opts.title = val;
        }
        if let Some(w) = env("FOLIO_CELL_WIDTH_DP").as_deref().and_then(parse_cell_width) {
            opts.cell_width_dp = w;
        }
        if let Some(val) = env("FOLIO_LOG_FILE")
            && !val.is_empty()
        {
            opts.log_file = Some(PathBuf::from(val));
        }
        if let Some(val) = env("FOLIO_LOG_JSON") {
            opts.log_json = truthy(&val);
        }
        if let Some(val) = env("FOLIO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(CliAction::Help),
                "--version" | "-V" => return Ok(CliAction::Version),
                "--no-mouse" => opts.mouse = false,
                "--log-json" => opts.log_json = true,
                other => {
                    if let Some(val) = other.strip_prefix("--title=") {
                        opts.title = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--cell-width-dp=") {
                        opts.cell_width_dp =
                            parse_cell_width(val).ok_or_else(|| CliError::InvalidValue {
                                flag: "--cell-width-dp",
                                value: val.to_string(),
                            })?;
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        if val.is_empty() {
                            return Err(CliError::InvalidValue {
                                flag: "--log-file",
                                value: String::new(),
                            });
                        }
                        opts.log_file = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = val.parse().map_err(|_| CliError::InvalidValue {
                            flag: "--exit-after-ms",
                            value: val.to_string(),
                        })?;
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(CliAction::Run(opts))
    }
}
