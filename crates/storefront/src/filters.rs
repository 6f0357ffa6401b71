//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Local::now().year())
}

/// Formats a whole number of minutes, e.g. `1 minute` or `14 minutes`.
///
/// Usage in templates: `{{ line.minutes_left|minutes_label }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn minutes_label(minutes: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(plural_minutes(&minutes.to_string()))
}

fn plural_minutes(minutes: &str) -> String {
    if minutes == "1" {
        "1 minute".to_string()
    } else {
        format!("{minutes} minutes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_minutes() {
        assert_eq!(plural_minutes("1"), "1 minute");
        assert_eq!(plural_minutes("0"), "0 minutes");
        assert_eq!(plural_minutes("14"), "14 minutes");
    }
}
