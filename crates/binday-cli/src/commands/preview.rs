//! Schedule preview: print the computed dates without touching the API.

use crate::defaults;
use crate::error::ClientResult;

/// Prints every reminder date in the window, one per line.
pub fn run() -> ClientResult<()> {
    let schedule = super::build_schedule()?;
    let dates = schedule.target_dates()?;

    for date in &dates {
        println!("{}  {}", date.format("%A"), date.to_rfc3339());
    }

    println!();
    println!(
        "{} dates ({} years starting {})",
        dates.len(),
        defaults::NB_OF_YEARS,
        defaults::START_YEAR
    );
    Ok(())
}
