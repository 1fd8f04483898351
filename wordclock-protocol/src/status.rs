//! Status query replies
//!
//! `key=mode` answers with a flat JSON object whose values are all
//! strings, flags as `"1"`/`"0"`:
//!
//! ```text
//! {"mode":"Clock","modeid":"0","stateAutoChange":"0","nightMode":"0",
//!  "nightModeStart":"23-00","nightModeEnd":"07-00","brightness":"40"}
//! ```

use core::fmt::{self, Write};

use heapless::String;
use serde::Serialize;
use wordclock_core::scheduler::Status;
use wordclock_core::ClockTime;

use crate::command::CommandError;

/// Capacity of a status reply
pub const STATUS_JSON_LEN: usize = 192;

/// A parsed query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Query {
    /// Mode and settings
    Mode,
    /// Any other key, answered with an empty object
    Other,
}

impl Query {
    /// Parse one `key=value` argument
    pub fn parse(key: &str, value: &str) -> Result<Self, CommandError> {
        if key != "key" {
            return Err(CommandError::UnknownKey);
        }
        Ok(match value {
            "mode" => Query::Mode,
            _ => Query::Other,
        })
    }

    /// JSON reply for `status`
    pub fn respond(self, status: &Status) -> Result<String<STATUS_JSON_LEN>, fmt::Error> {
        match self {
            Query::Mode => mode_json(status),
            Query::Other => {
                let mut out = String::new();
                out.push_str("{}").map_err(|_| fmt::Error)?;
                Ok(out)
            }
        }
    }
}

/// Body of the `key=mode` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReply {
    pub mode: &'static str,
    pub modeid: String<1>,
    #[serde(rename = "stateAutoChange")]
    pub state_auto_change: &'static str,
    #[serde(rename = "nightMode")]
    pub nightmode: &'static str,
    #[serde(rename = "nightModeStart")]
    pub nightmode_start: String<5>,
    #[serde(rename = "nightModeEnd")]
    pub nightmode_end: String<5>,
    pub brightness: String<3>,
}

fn flag(on: bool) -> &'static str {
    if on {
        "1"
    } else {
        "0"
    }
}

fn hour_minute(time: ClockTime) -> Result<String<5>, fmt::Error> {
    let mut out = String::new();
    write!(out, "{:02}-{:02}", time.hour(), time.minute())?;
    Ok(out)
}

impl StatusReply {
    pub fn from_status(status: &Status) -> Result<Self, fmt::Error> {
        let settings = &status.settings;
        let mut modeid = String::new();
        write!(modeid, "{}", status.state_id())?;
        let mut brightness = String::new();
        write!(brightness, "{}", settings.brightness)?;

        Ok(Self {
            mode: status.state.name(),
            modeid,
            state_auto_change: flag(status.auto_change),
            nightmode: flag(status.nightmode),
            nightmode_start: hour_minute(settings.nightmode.start)?,
            nightmode_end: hour_minute(settings.nightmode.end)?,
            brightness,
        })
    }
}

/// Render the mode/settings object
pub fn mode_json(status: &Status) -> Result<String<STATUS_JSON_LEN>, fmt::Error> {
    let reply = StatusReply::from_status(status)?;
    serde_json_core::to_string(&reply).map_err(|_| fmt::Error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordclock_core::config::Settings;
    use wordclock_core::ModeState;

    fn status() -> Status {
        Status {
            state: ModeState::Clock,
            auto_change: false,
            nightmode: false,
            settings: Settings::default(),
        }
    }

    #[test]
    fn test_default_status() {
        let json = mode_json(&status()).unwrap();
        assert_eq!(
            json.as_str(),
            "{\"mode\":\"Clock\",\"modeid\":\"0\",\"stateAutoChange\":\"0\",\"nightMode\":\"0\",\
             \"nightModeStart\":\"23-00\",\"nightModeEnd\":\"07-00\",\"brightness\":\"40\"}"
        );
    }

    #[test]
    fn test_flags_and_padding() {
        let mut s = status();
        s.state = ModeState::PingPong;
        s.auto_change = true;
        s.nightmode = true;
        s.settings.nightmode.end = ClockTime::new(6, 5).unwrap();
        s.settings.brightness = 255;

        let json = mode_json(&s).unwrap();
        assert!(json.contains("\"mode\":\"PingPong\""));
        assert!(json.contains("\"modeid\":\"5\""));
        assert!(json.contains("\"stateAutoChange\":\"1\""));
        assert!(json.contains("\"nightMode\":\"1\""));
        assert!(json.contains("\"nightModeEnd\":\"06-05\""));
        assert!(json.contains("\"brightness\":\"255\""));
    }

    #[test]
    fn test_reply_fields() {
        let mut s = status();
        s.state = ModeState::DigitalClock;
        s.settings.nightmode.start = ClockTime::new(21, 30).unwrap();
        let reply = StatusReply::from_status(&s).unwrap();
        assert_eq!(reply.mode, "DiClock");
        assert_eq!(reply.modeid.as_str(), "1");
        assert_eq!(reply.state_auto_change, "0");
        assert_eq!(reply.nightmode_start.as_str(), "21-30");
        assert_eq!(reply.brightness.as_str(), "40");
    }

    #[test]
    fn test_query_parse() {
        assert_eq!(Query::parse("key", "mode"), Ok(Query::Mode));
        assert_eq!(Query::parse("key", "wifi"), Ok(Query::Other));
        assert_eq!(Query::parse("mode", "mode"), Err(CommandError::UnknownKey));
        assert_eq!(Query::Other.respond(&status()).unwrap().as_str(), "{}");
    }
}
