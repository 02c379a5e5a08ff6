//! The provisioning flow: one calendar, a decade of reminder events.
//!
//! Strictly linear, matching the error contract: the first failure aborts
//! the run, leaving whatever was already created in place. Re-running
//! creates a second calendar with its own duplicate events.

use std::time::Duration;

use tracing::{info, warn};

use binday_google::{CalendarClient, EventRequest, listener};

use crate::config::AppConfig;
use crate::defaults;
use crate::error::ClientResult;

use super::auth::resolve_credentials;

/// Creates the calendar and inserts every computed reminder event.
pub async fn run(config: &AppConfig) -> ClientResult<()> {
    // Compute the full window up front so a rule problem surfaces before
    // any network call.
    let schedule = super::build_schedule()?;
    let dates = schedule.target_dates()?;

    // The consent redirect needs somewhere to land if the token cache is
    // cold.
    if let Err(e) = listener::spawn(defaults::LISTENER_PORT) {
        warn!("authorization code listener unavailable: {}", e);
    }

    let credentials =
        resolve_credentials(None, None, None, config.google.as_ref())?;
    let token = super::obtain_token(&credentials, config).await?;
    let client = CalendarClient::new(&token.access_token, super::REQUEST_TIMEOUT);

    let calendar_id = client
        .insert_calendar(defaults::CALENDAR_SUMMARY, defaults::TIME_ZONE)
        .await?;
    println!("Calendar created: {}", calendar_id);

    // Give the new calendar a moment to propagate before inserting into it.
    tokio::time::sleep(Duration::from_secs(defaults::POST_CREATE_PAUSE_SECS)).await;

    for date in &dates {
        let when = date.to_rfc3339();
        let event = EventRequest::marker(
            defaults::EVENT_SUMMARY,
            &when,
            defaults::TIME_ZONE,
            defaults::REMINDER_MINUTES,
        );
        client.insert_event(&calendar_id, &event).await?;
        println!("Event created: {}", when);
    }

    info!("inserted {} events into calendar {}", dates.len(), calendar_id);
    println!();
    println!(
        "Provisioned calendar \"{}\" with {} reminder events.",
        defaults::CALENDAR_SUMMARY,
        dates.len()
    );
    Ok(())
}
