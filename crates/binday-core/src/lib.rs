//! Pure date logic for binday.
//!
//! Two pieces live here: the Nth-weekday rule ([`rule`]) and the schedule
//! generator ([`schedule`]) that turns the rule into timezone-aware event
//! timestamps. Neither does any I/O.

pub mod rule;
pub mod schedule;

pub use rule::{nth_weekday, nth_weekday_with_offset};
pub use schedule::{Schedule, ScheduleError};
