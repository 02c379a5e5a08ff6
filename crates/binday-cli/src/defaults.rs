//! Fixed parameters of the provisioning run.
//!
//! The schedule is deliberately not configurable; changing the collection
//! day means editing these constants and re-running against a fresh
//! calendar. Only the credential plumbing lives in `config.toml`.

use chrono::Weekday;

/// First year to populate.
pub const START_YEAR: i32 = 2023;

/// Number of consecutive years to populate.
pub const NB_OF_YEARS: u32 = 10;

/// IANA time zone every event is anchored in.
pub const TIME_ZONE: &str = "Europe/Paris";

/// Display name of the created calendar.
pub const CALENDAR_SUMMARY: &str = "Poubelles";

/// Title of every reminder event.
pub const EVENT_SUMMARY: &str = "Sortir les poubelles de verre";

/// Collection rule: the day before the 4th Thursday of each month.
pub const WEEKDAY: Weekday = Weekday::Thu;
pub const OCCURRENCE: u32 = 4;
pub const DAY_OFFSET: i64 = -1;

/// Local hour of day the marker event is placed at.
pub const EVENT_HOUR: u32 = 16;

/// Popup reminder lead time, in minutes.
pub const REMINDER_MINUTES: u32 = 10;

/// Port the authorization-code echo listener binds.
pub const LISTENER_PORT: u16 = 3000;

/// Pause after calendar creation before the first event insert.
pub const POST_CREATE_PAUSE_SECS: u64 = 2;
