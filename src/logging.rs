use clap::ValueEnum;

const CARGO_PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Log level message strings.
///
/// The log crate sets these to all uppercase letters; lowercase tags look
/// nicer in a console window.
const LEVEL_NAMES: [&str; 6] = ["", "error:", "warning:", "info:", "debug:", "trace:"];

const LEVEL_COLORS: [&str; 6] = [
    "",
    "\x1b[0;1;31m",
    "\x1b[0;1;33m",
    "\x1b[0;1;32m",
    "\x1b[0;1;37m",
    "\x1b[0;1;34m",
];

const ANSI_RESET: &str = "\x1b[0m";

/// The cli logger implementation.
#[derive(Debug)]
pub struct Logger {
    /// If ANSI colors should be emitted
    use_colors: bool,

    /// Maximum log level
    max_level: log::Level,
}

impl Logger {
    pub fn new(max_level: log::Level, colors: ColorOption) -> Self {
        Self {
            use_colors: should_use_colors(colors),
            max_level,
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_name = LEVEL_NAMES[record.level() as usize];

        if self.use_colors {
            eprintln!(
                "{CARGO_PKG_NAME}: {color}{level_name}{ANSI_RESET} {args}",
                color = LEVEL_COLORS[record.level() as usize],
                args = record.args(),
            );
        } else {
            eprintln!("{CARGO_PKG_NAME}: {level_name} {args}", args = record.args());
        }
    }

    fn flush(&self) {}
}

/// Color options for the logger
#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorOption {
    /// Automatically use colors depending on the environment
    #[value(name = "auto")]
    #[default]
    Auto,

    /// Always use colors
    #[value(name = "always")]
    Always,

    /// Never use colors
    #[value(name = "never")]
    Never,
}

impl std::fmt::Display for ColorOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(v) = self.to_possible_value() {
            write!(f, "{}", v.get_name())?;
        }

        Ok(())
    }
}

pub fn init(max_level: log::Level, colors: ColorOption) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(Logger::new(max_level, colors)))
        .map(|()| log::set_max_level(max_level.to_level_filter()))
}

/// Returns `true` if colors should be used in log messages given the
/// specified color option and environment variable values.
fn should_use_colors(color: ColorOption) -> bool {
    match color {
        ColorOption::Always => true,
        ColorOption::Never => false,
        ColorOption::Auto => {
            if have_nocolor_env() {
                false
            } else if have_clicolor_force() {
                true
            } else {
                stderr_is_terminal()
            }
        }
    }
}

/// Returns `true` if the `NO_COLOR` environment variable is set to a
/// non-empty value that is not 0.
///
/// Used for following https://no-color.org/.
fn have_nocolor_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty() && v != "0")
}

/// Returns `true` if the `CLICOLOR_FORCE` environment variable is set to a
/// non-empty value that is not 0.
///
/// Used for following https://bixense.com/clicolors/
fn have_clicolor_force() -> bool {
    std::env::var_os("CLICOLOR_FORCE").is_some_and(|v| !v.is_empty() && v != "0")
}

fn stderr_is_terminal() -> bool {
    use std::io::IsTerminal;

    std::io::stderr().is_terminal()
}
