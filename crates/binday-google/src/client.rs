//! Google Calendar API v3 client.
//!
//! Only the two write operations this tool needs: creating a secondary
//! calendar and inserting events into it. Requests are built by hand and
//! responses parsed with serde, no SDK involved.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GoogleError, GoogleResult};

/// Base URL for Google Calendar API v3.
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Insert-only Google Calendar client.
#[derive(Debug)]
pub struct CalendarClient {
    http: reqwest::Client,
    access_token: String,
}

impl CalendarClient {
    /// Creates a client with the given access token.
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            access_token: access_token.into(),
        }
    }

    /// Creates a secondary calendar and returns its server-assigned id.
    pub async fn insert_calendar(&self, summary: &str, time_zone: &str) -> GoogleResult<String> {
        let url = format!("{}/calendars", CALENDAR_API_BASE);
        let body = self
            .post_json(
                &url,
                &NewCalendar { summary, time_zone },
            )
            .await?;

        let created: CreatedCalendar = serde_json::from_str(&body).map_err(|e| {
            GoogleError::InvalidResponse(format!("failed to parse calendar response: {}", e))
        })?;

        debug!("created calendar {}", created.id);
        Ok(created.id)
    }

    /// Inserts one event and returns its server-assigned id.
    pub async fn insert_event(
        &self,
        calendar_id: &str,
        event: &EventRequest<'_>,
    ) -> GoogleResult<String> {
        let url = format!(
            "{}/calendars/{}/events",
            CALENDAR_API_BASE,
            urlencoding::encode(calendar_id)
        );
        let body = self.post_json(&url, event).await?;

        let created: CreatedEvent = serde_json::from_str(&body).map_err(|e| {
            GoogleError::InvalidResponse(format!("failed to parse event response: {}", e))
        })?;

        debug!("created event {}", created.id);
        Ok(created.id)
    }

    /// POSTs a JSON payload and returns the response body on success.
    async fn post_json<T: Serialize>(&self, url: &str, payload: &T) -> GoogleResult<String> {
        let body = serde_json::to_string(payload)
            .map_err(|e| GoogleError::Configuration(format!("unable to serialize request: {}", e)))?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GoogleError::Network("request timeout".to_string())
                } else if e.is_connect() {
                    GoogleError::Network(format!("connection failed: {}", e))
                } else {
                    GoogleError::Network(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GoogleError::Authentication(
                "access token expired or invalid".to_string(),
            ));
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(GoogleError::AccessDenied(
                "the Calendar API refused the operation".to_string(),
            ));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GoogleError::RateLimited(
                "calendar API rate limit exceeded".to_string(),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GoogleError::Network(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(GoogleError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

/// Request body for `calendars.insert`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewCalendar<'a> {
    summary: &'a str,
    time_zone: &'a str,
}

/// Request body for `events.insert`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest<'a> {
    /// Event title.
    pub summary: &'a str,
    /// Start of the event.
    pub start: EventDateTime<'a>,
    /// End of the event. Equal to `start` for marker events.
    pub end: EventDateTime<'a>,
    /// Reminder configuration.
    pub reminders: Reminders,
}

impl<'a> EventRequest<'a> {
    /// A zero-duration marker event at `date_time` (RFC 3339) with a single
    /// popup reminder.
    pub fn marker(
        summary: &'a str,
        date_time: &str,
        time_zone: &'a str,
        reminder_minutes: u32,
    ) -> Self {
        Self {
            summary,
            start: EventDateTime {
                date_time: date_time.to_string(),
                time_zone,
            },
            end: EventDateTime {
                date_time: date_time.to_string(),
                time_zone,
            },
            reminders: Reminders {
                use_default: false,
                overrides: vec![ReminderOverride {
                    method: "popup",
                    minutes: reminder_minutes,
                }],
            },
        }
    }
}

/// An event boundary: an RFC 3339 timestamp plus its IANA zone name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime<'a> {
    pub date_time: String,
    pub time_zone: &'a str,
}

/// Reminder settings: calendar defaults off, explicit overrides only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminders {
    pub use_default: bool,
    pub overrides: Vec<ReminderOverride>,
}

/// A single reminder override.
#[derive(Debug, Serialize)]
pub struct ReminderOverride {
    pub method: &'static str,
    pub minutes: u32,
}

/// Response from `calendars.insert`.
#[derive(Debug, Deserialize)]
struct CreatedCalendar {
    id: String,
}

/// Response from `events.insert`.
#[derive(Debug, Deserialize)]
struct CreatedEvent {
    id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn new_calendar_wire_format() {
        let body = NewCalendar {
            summary: "Poubelles",
            time_zone: "Europe/Paris",
        };
        let json: Value = serde_json::to_value(&body).unwrap();
        assert_eq!(json["summary"], "Poubelles");
        assert_eq!(json["timeZone"], "Europe/Paris");
    }

    #[test]
    fn marker_event_wire_format() {
        let event = EventRequest::marker(
            "Sortir les poubelles de verre",
            "2024-01-24T16:00:00+01:00",
            "Europe/Paris",
            10,
        );
        let json: Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["summary"], "Sortir les poubelles de verre");
        assert_eq!(json["start"]["dateTime"], "2024-01-24T16:00:00+01:00");
        assert_eq!(json["start"]["timeZone"], "Europe/Paris");
        // Zero-duration marker: start and end are identical.
        assert_eq!(json["start"], json["end"]);

        assert_eq!(json["reminders"]["useDefault"], false);
        let overrides = json["reminders"]["overrides"].as_array().unwrap();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0]["method"], "popup");
        assert_eq!(overrides[0]["minutes"], 10);
    }

    #[test]
    fn parses_created_calendar() {
        let json = r#"{
            "kind": "calendar#calendar",
            "id": "abc123@group.calendar.google.com",
            "summary": "Poubelles",
            "timeZone": "Europe/Paris"
        }"#;
        let created: CreatedCalendar = serde_json::from_str(json).unwrap();
        assert_eq!(created.id, "abc123@group.calendar.google.com");
    }

    #[test]
    fn parses_created_event() {
        let json = r#"{
            "kind": "calendar#event",
            "id": "evt42",
            "status": "confirmed",
            "start": {"dateTime": "2024-01-24T16:00:00+01:00"}
        }"#;
        let created: CreatedEvent = serde_json::from_str(json).unwrap();
        assert_eq!(created.id, "evt42");
    }
}
