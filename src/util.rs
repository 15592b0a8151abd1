use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, Utc};

/// Calendar date of a timestamp in UTC, time of day dropped.
pub fn calendar_date(time: SystemTime) -> NaiveDate {
    let datetime: DateTime<Utc> = time.into();
    datetime.date_naive()
}

pub fn expand_path(raw: &str) -> Result<PathBuf, String> {
    shellexpand::full(raw)
        .map(|cow| PathBuf::from(cow.as_ref()))
        .map_err(|err| err.to_string())
}

/// Expands a leading `~` only; `$NAME` is left untouched.
pub fn expand_home(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}
