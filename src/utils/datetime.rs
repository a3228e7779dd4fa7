use chrono::{Duration, Local, NaiveDate, NaiveTime};

/// Calendar date in the bot's local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `DD.MM.YYYY`, the format used on the date keyboard.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn format_time(time: &NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// "31.12.2099" or "31.12.2099 at 14:00".
pub fn format_appointment(date: &NaiveDate, time: Option<&NaiveTime>) -> String {
    match time {
        Some(time) => format!("{} at {}", format_date(date), format_time(time)),
        None => format_date(date),
    }
}

/// The `days` dates following `from`, excluding `from` itself.
pub fn upcoming_dates(from: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (1..=i64::from(days))
        .filter_map(|offset| from.checked_add_signed(Duration::days(offset)))
        .collect()
}

/// Hourly slots offered on the time keyboard.
pub fn time_slots() -> Vec<NaiveTime> {
    (9..=20)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upcoming_dates_cross_month_boundary() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 30).unwrap_or_default();
        let dates = upcoming_dates(from, 3);
        let formatted: Vec<String> = dates.iter().map(format_date).collect();
        assert_eq!(formatted, vec!["31.01.2026", "01.02.2026", "02.02.2026"]);
    }

    #[test]
    fn test_time_slots_cover_working_day() {
        let slots: Vec<String> = time_slots().iter().map(format_time).collect();
        assert_eq!(slots.len(), 12);
        assert_eq!(slots.first().map(String::as_str), Some("09:00"));
        assert_eq!(slots.last().map(String::as_str), Some("20:00"));
    }
}
