// Line commands read by the binary: interval, theme, refresh, hide/show, quit.

use crate::models::{IntervalSelection, Theme};
use crate::scheduler::DashboardCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    Command(DashboardCommand),
    Quit,
    /// Blank line.
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsoleError {
    #[error("unknown command `{0}` (try: interval <token>, theme <light|dark>, refresh, hide, show, quit)")]
    UnknownCommand(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Interval(#[from] crate::error::UnknownInterval),

    #[error(transparent)]
    Theme(#[from] crate::error::UnknownTheme),
}

pub fn parse_line(line: &str) -> Result<ConsoleInput, ConsoleError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(ConsoleInput::Nothing);
    };
    let arg = words.next();

    let command = match verb.to_lowercase().as_str() {
        "interval" | "i" => {
            let token = arg.ok_or(ConsoleError::MissingArgument("interval"))?;
            DashboardCommand::SelectInterval(token.parse::<IntervalSelection>()?)
        }
        "theme" | "t" => match arg {
            Some(name) => DashboardCommand::SetTheme(name.parse::<Theme>()?),
            None => DashboardCommand::ThemeChanged,
        },
        "refresh" | "r" => DashboardCommand::RefreshNow,
        "hide" => DashboardCommand::VisibilityChanged(false),
        "show" => DashboardCommand::VisibilityChanged(true),
        "quit" | "q" | "exit" => return Ok(ConsoleInput::Quit),
        _ => return Err(ConsoleError::UnknownCommand(verb.to_string())),
    };
    Ok(ConsoleInput::Command(command))
}
