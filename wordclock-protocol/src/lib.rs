//! Word clock command surface
//!
//! The board's web server hands request arguments to this crate and sends
//! back the [`Reply`]. Three request kinds exist:
//!
//! - commands (`led`, `mode`, `nightmode`, `setting`, `stateautochange`,
//!   `tetris`, `snake`, `pong`), answered with 204
//! - status queries (`key=mode`), answered with 200 and a JSON body
//! - direct pixel frames (one base64 argument), answered with 200
//!
//! Transport, routing and persistence stay on the board. A reply that
//! carries [`Reply::persist`] asks the board to store the new settings.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This must go first so the log macros are visible to every module.
#[macro_use]
mod fmt;

pub mod command;
pub mod direct;
pub mod status;

pub use command::{Command, CommandError, Outcome};
pub use direct::{DirectError, DirectFrame, MAX_ENCODED_LEN};
pub use status::{mode_json, Query, STATUS_JSON_LEN};

use heapless::String;
use wordclock_core::config::Settings;
use wordclock_core::traits::{DisplaySink, SubmodeBank};
use wordclock_core::SchedulerContext;

/// Success without body
pub const STATUS_NO_CONTENT: u16 = 204;

/// Success with body
pub const STATUS_OK: u16 = 200;

/// Errors while handling a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    Command(CommandError),
    Direct(DirectError),
    /// The scheduler failed to apply the request
    Core(wordclock_core::Error),
    /// Reply did not fit its buffer
    Format,
}

impl From<CommandError> for ProtocolError {
    fn from(err: CommandError) -> Self {
        ProtocolError::Command(err)
    }
}

impl From<DirectError> for ProtocolError {
    fn from(err: DirectError) -> Self {
        ProtocolError::Direct(err)
    }
}

impl From<wordclock_core::Error> for ProtocolError {
    fn from(err: wordclock_core::Error) -> Self {
        ProtocolError::Core(err)
    }
}

impl From<core::fmt::Error> for ProtocolError {
    fn from(_: core::fmt::Error) -> Self {
        ProtocolError::Format
    }
}

impl core::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProtocolError::Command(err) => write!(f, "{}", err),
            ProtocolError::Direct(err) => write!(f, "{}", err),
            ProtocolError::Core(err) => write!(f, "{}", err),
            ProtocolError::Format => write!(f, "reply too long"),
        }
    }
}

/// Answer to one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP-style status code
    pub status: u16,
    pub body: String<STATUS_JSON_LEN>,
    /// Settings the board should persist
    pub persist: Option<Settings>,
}

impl Reply {
    pub fn no_content() -> Self {
        Self {
            status: STATUS_NO_CONTENT,
            body: String::new(),
            persist: None,
        }
    }

    pub fn ok(body: String<STATUS_JSON_LEN>) -> Self {
        Self {
            status: STATUS_OK,
            body,
            persist: None,
        }
    }
}

/// Parse and apply one command argument
pub fn handle_command<B, D>(
    key: &str,
    value: &str,
    ctx: &mut SchedulerContext<B>,
    display: &mut D,
) -> Result<Reply, ProtocolError>
where
    B: SubmodeBank,
    D: DisplaySink,
{
    let command = Command::parse(key, value).map_err(|err| {
        warn!("rejected command {=str}: {}", key, err);
        err
    })?;
    debug!("command {}", command);

    let mut reply = Reply::no_content();
    if let Outcome::Persist(settings) = command.apply(ctx, display)? {
        reply.persist = Some(settings);
    }
    Ok(reply)
}

/// Answer a status query
pub fn handle_query<B: SubmodeBank>(
    key: &str,
    value: &str,
    ctx: &SchedulerContext<B>,
) -> Result<Reply, ProtocolError> {
    let query = Query::parse(key, value)?;
    let body = query.respond(&ctx.status())?;
    Ok(Reply::ok(body))
}

/// Decode a direct frame and push it to the display
pub fn handle_direct<B, D>(
    payload: &str,
    ctx: &mut SchedulerContext<B>,
    now_ms: u64,
    display: &mut D,
) -> Result<Reply, ProtocolError>
where
    B: SubmodeBank,
    D: DisplaySink,
{
    let frame = DirectFrame::decode(payload).map_err(|err| {
        warn!("rejected direct frame: {}", err);
        err
    })?;
    ctx.direct_frame(frame.pixels(), now_ms, display)?;
    Ok(Reply::ok(String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordclock_core::config::ClockConfig;
    use wordclock_core::grid::{Grid, MinuteIndicator};
    use wordclock_core::modes::Spiral;
    use wordclock_core::traits::{Control, DisplayError, PlayStyle, Submode, Submodes};
    use wordclock_core::{ModeState, Rgb, SwissGerman};

    static SWISS: SwissGerman = SwissGerman;

    #[derive(Default)]
    struct Sink {
        last: Grid,
        brightness: Option<u8>,
    }

    impl DisplaySink for Sink {
        fn show(&mut self, grid: &Grid) -> Result<(), DisplayError> {
            self.last = grid.clone();
            Ok(())
        }

        fn set_min_indicator(&mut self, _indicator: MinuteIndicator) -> Result<(), DisplayError> {
            Ok(())
        }

        fn set_brightness(&mut self, brightness: u8) -> Result<(), DisplayError> {
            self.brightness = Some(brightness);
            Ok(())
        }
    }

    /// Stand-in for a game that only records controls
    #[derive(Default)]
    struct Game {
        controls: Vec<Control>,
    }

    impl Submode for Game {
        fn init(&mut self, _style: PlayStyle) {}

        fn loop_cycle(&mut self, _grid: &mut Grid) {}

        fn control(&mut self, control: Control) {
            self.controls.push(control);
        }
    }

    type Bank = Submodes<Spiral, Game, Game, Game>;

    fn context() -> SchedulerContext<Bank> {
        let bank = Submodes::new(Spiral::new(), Game::default(), Game::default(), Game::default());
        SchedulerContext::new(ClockConfig::default(), &SWISS, bank, 0).unwrap()
    }

    #[test]
    fn test_mode_command() {
        let mut ctx = context();
        let mut sink = Sink::default();
        let reply = handle_command("mode", "spiral", &mut ctx, &mut sink).unwrap();
        assert_eq!(reply.status, STATUS_NO_CONTENT);
        assert!(reply.body.is_empty());
        assert_eq!(reply.persist, None);
        assert_eq!(ctx.state(), ModeState::Spiral);
    }

    #[test]
    fn test_color_command_persists() {
        let mut ctx = context();
        let mut sink = Sink::default();
        let reply = handle_command("led", "255-255-255", &mut ctx, &mut sink).unwrap();
        let saved = reply.persist.unwrap();
        assert_eq!(saved.colors.main, Rgb::new(125, 125, 125));
        assert_eq!(saved.colors.second, Rgb::new(255, 255, 255));
        assert_eq!(ctx.settings().colors, saved.colors);
    }

    #[test]
    fn test_setting_command_persists_and_dims() {
        let mut ctx = context();
        let mut sink = Sink::default();
        let reply = handle_command("setting", "21-00-05-30-80", &mut ctx, &mut sink).unwrap();
        let saved = reply.persist.unwrap();
        assert_eq!(saved.brightness, 80);
        assert_eq!(saved.nightmode.start.hour(), 21);
        assert_eq!(saved.nightmode.end.minute(), 30);
        // Colours are left alone
        assert_eq!(saved.colors, ClockConfig::default().settings.colors);
        assert_eq!(sink.brightness, Some(80));
    }

    #[test]
    fn test_nightmode_and_autochange_commands() {
        let mut ctx = context();
        let mut sink = Sink::default();
        handle_command("nightmode", "1", &mut ctx, &mut sink).unwrap();
        assert!(ctx.is_nightmode());
        handle_command("stateautochange", "1", &mut ctx, &mut sink).unwrap();
        assert!(ctx.auto_change());

        let reply = handle_query("key", "mode", &ctx).unwrap();
        assert_eq!(reply.status, STATUS_OK);
        assert!(reply.body.contains("\"nightMode\":\"1\""));
        assert!(reply.body.contains("\"stateAutoChange\":\"1\""));
    }

    #[test]
    fn test_game_controls_routed() {
        let mut ctx = context();
        let mut sink = Sink::default();
        handle_command("tetris", "left", &mut ctx, &mut sink).unwrap();
        handle_command("pong", "new", &mut ctx, &mut sink).unwrap();
        assert_eq!(ctx.submodes().tetris.controls, [Control::Left]);
        assert_eq!(ctx.submodes().pingpong.controls, [Control::NewGame]);
    }

    #[test]
    fn test_bad_command() {
        let mut ctx = context();
        let mut sink = Sink::default();
        assert_eq!(
            handle_command("mode", "disco", &mut ctx, &mut sink),
            Err(ProtocolError::Command(CommandError::InvalidValue))
        );
        assert_eq!(ctx.state(), ModeState::Clock);
    }

    #[test]
    fn test_direct_frame() {
        let mut ctx = context();
        let mut sink = Sink::default();
        // Two pixels: red, blue
        let reply = handle_direct("/wAAAAAA/wA=", &mut ctx, 500, &mut sink).unwrap();
        assert_eq!(reply.status, STATUS_OK);
        assert_eq!(sink.last.get(0, 0), Some(Rgb::new(255, 0, 0)));
        assert_eq!(sink.last.get(1, 0), Some(Rgb::new(0, 0, 255)));
        assert_eq!(ctx.timers().direct_override_ms, Some(500));

        assert_eq!(
            handle_direct("%%%", &mut ctx, 600, &mut sink),
            Err(ProtocolError::Direct(DirectError::InvalidEncoding))
        );
        assert_eq!(ctx.timers().direct_override_ms, Some(500));
    }
}
