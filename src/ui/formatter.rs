use crate::output::StatusLabel;
use crossterm::style::{Color, Stylize};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

static COLOR_ENABLED: AtomicBool = AtomicBool::new(true);
static VERBOSITY: AtomicU8 = AtomicU8::new(1);

/// Colors report lines and tracks the requested verbosity.
pub struct Formatter;

impl Formatter {
    /// `[LABEL] message`, colored by the label.
    pub fn status(label: StatusLabel, message: impl AsRef<str>) -> String {
        let color = match label {
            StatusLabel::Pass => Color::Green,
            StatusLabel::Fail | StatusLabel::Error => Color::Red,
            StatusLabel::Warning | StatusLabel::Skip => Color::Yellow,
            StatusLabel::Info => Color::Blue,
        };
        Self::paint(&format!("{} {}", label.as_str(), message.as_ref()), color)
    }

    pub fn info(message: impl AsRef<str>) -> String {
        Self::paint(message.as_ref(), Color::Blue)
    }

    pub fn warning(message: impl AsRef<str>) -> String {
        Self::paint(message.as_ref(), Color::Yellow)
    }

    pub fn error(message: impl AsRef<str>) -> String {
        Self::paint(message.as_ref(), Color::Red)
    }

    pub fn configure_colors(enable: bool) {
        COLOR_ENABLED.store(enable, Ordering::Relaxed);
    }

    /// Honor `NO_COLOR` when it is set to a non-empty value.
    pub fn configure_colors_from_env() {
        Self::configure_colors(colors_allowed(std::env::var("NO_COLOR").ok().as_deref()));
    }

    /// 0 = quiet, 1 = normal, 2 = verbose.
    pub fn set_verbosity(level: u8) {
        VERBOSITY.store(level, Ordering::Relaxed);
    }

    pub fn is_quiet() -> bool {
        VERBOSITY.load(Ordering::Relaxed) == 0
    }

    pub fn is_verbose() -> bool {
        VERBOSITY.load(Ordering::Relaxed) >= 2
    }

    fn paint(message: &str, color: Color) -> String {
        if COLOR_ENABLED.load(Ordering::Relaxed) {
            message.with(color).to_string()
        } else {
            message.to_string()
        }
    }
}

fn colors_allowed(no_color: Option<&str>) -> bool {
    no_color.map_or(true, |v| v.trim().is_empty())
}
