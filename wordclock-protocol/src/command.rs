//! Command arguments
//!
//! Every command arrives as a single `key=value` argument. Multi-field
//! values are dash-separated:
//!
//! ```text
//! led=255-0-128
//! mode=diclock
//! nightmode=1
//! setting=22-30-06-45-120      start h, start m, end h, end m, brightness
//! stateautochange=0
//! tetris=left | snake=new | pong=up
//! ```

use core::fmt;
use core::str::FromStr;

use wordclock_core::config::{NightmodeWindow, Settings};
use wordclock_core::traits::{Control, DisplaySink, SubmodeBank, SubmodeKind};
use wordclock_core::{ClockTime, Error, ModeState, Rgb, SchedulerContext};

/// Command parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Argument name is not a known command
    UnknownKey,
    /// Value does not parse or is out of range
    InvalidValue,
    /// A dash-separated field is missing
    MissingArgument,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownKey => write!(f, "unknown command"),
            CommandError::InvalidValue => write!(f, "invalid command value"),
            CommandError::MissingArgument => write!(f, "missing command field"),
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Main clock colour; the second colour is derived
    Color(Rgb),
    /// Jump to a mode
    Mode(ModeState),
    Nightmode(bool),
    /// Nightmode window and brightness
    Settings {
        nightmode: NightmodeWindow,
        brightness: u8,
    },
    AutoChange(bool),
    /// Game control for one submode
    Control(SubmodeKind, Control),
}

/// Effect of an applied command the board has to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    Done,
    /// Persisted settings changed; store them
    Persist(Settings),
}

/// Dash-separated fields of a value
struct Fields<'a>(core::str::Split<'a, char>);

impl<'a> Fields<'a> {
    fn new(value: &'a str) -> Self {
        Self(value.split('-'))
    }

    fn next<T: FromStr>(&mut self) -> Result<T, CommandError> {
        let field = self.0.next().ok_or(CommandError::MissingArgument)?;
        if field.is_empty() {
            return Err(CommandError::MissingArgument);
        }
        field.trim().parse().map_err(|_| CommandError::InvalidValue)
    }
}

fn parse_flag(value: &str) -> Result<bool, CommandError> {
    match value {
        "1" => Ok(true),
        "0" => Ok(false),
        _ => Err(CommandError::InvalidValue),
    }
}

fn parse_time(fields: &mut Fields<'_>) -> Result<ClockTime, CommandError> {
    let hour = fields.next()?;
    let minute = fields.next()?;
    ClockTime::new(hour, minute).map_err(|_| CommandError::InvalidValue)
}

fn parse_control(kind: SubmodeKind, value: &str) -> Result<Control, CommandError> {
    let control = match (kind, value) {
        (_, "up") => Control::Up,
        (_, "down") => Control::Down,
        (SubmodeKind::Tetris | SubmodeKind::Snake, "left") => Control::Left,
        (SubmodeKind::Tetris | SubmodeKind::Snake, "right") => Control::Right,
        (SubmodeKind::Tetris, "play") => Control::Start,
        (SubmodeKind::Tetris, "pause") => Control::PlayPause,
        (SubmodeKind::Snake | SubmodeKind::PingPong, "new") => Control::NewGame,
        _ => return Err(CommandError::InvalidValue),
    };
    Ok(control)
}

impl Command {
    /// Parse one `key=value` argument
    pub fn parse(key: &str, value: &str) -> Result<Self, CommandError> {
        let command = match key {
            "led" => {
                let mut fields = Fields::new(value);
                Command::Color(Rgb::new(fields.next()?, fields.next()?, fields.next()?))
            }
            "mode" => Command::Mode(
                ModeState::from_command_name(value).ok_or(CommandError::InvalidValue)?,
            ),
            "nightmode" => Command::Nightmode(parse_flag(value)?),
            "setting" => {
                let mut fields = Fields::new(value);
                let start = parse_time(&mut fields)?;
                let end = parse_time(&mut fields)?;
                let brightness = fields.next()?;
                Command::Settings {
                    nightmode: NightmodeWindow { start, end },
                    brightness,
                }
            }
            "stateautochange" => Command::AutoChange(parse_flag(value)?),
            "tetris" => Command::Control(
                SubmodeKind::Tetris,
                parse_control(SubmodeKind::Tetris, value)?,
            ),
            "snake" => Command::Control(
                SubmodeKind::Snake,
                parse_control(SubmodeKind::Snake, value)?,
            ),
            "pong" => Command::Control(
                SubmodeKind::PingPong,
                parse_control(SubmodeKind::PingPong, value)?,
            ),
            _ => return Err(CommandError::UnknownKey),
        };
        Ok(command)
    }

    /// Apply onto the scheduler
    pub fn apply<B, D>(self, ctx: &mut SchedulerContext<B>, display: &mut D) -> Result<Outcome, Error>
    where
        B: SubmodeBank,
        D: DisplaySink,
    {
        match self {
            Command::Color(main) => Ok(Outcome::Persist(ctx.set_colors(main))),
            Command::Mode(state) => {
                info!("Mode change via command to: {}", state.command_name());
                ctx.select(state, display)?;
                Ok(Outcome::Done)
            }
            Command::Nightmode(on) => {
                ctx.set_nightmode(on, display)?;
                Ok(Outcome::Done)
            }
            Command::Settings {
                nightmode,
                brightness,
            } => {
                let settings = Settings {
                    nightmode,
                    brightness,
                    ..*ctx.settings()
                };
                ctx.apply_settings(settings, display)?;
                Ok(Outcome::Persist(settings))
            }
            Command::AutoChange(on) => {
                ctx.set_auto_change(on);
                Ok(Outcome::Done)
            }
            Command::Control(kind, control) => {
                ctx.control(kind, control);
                Ok(Outcome::Done)
            }
        }
    }
}
