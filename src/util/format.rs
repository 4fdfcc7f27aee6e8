//! Display formatting for dates and names.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Split the `YYYY-MM-DD` prefix of an ISO-8601 timestamp.
pub fn parse_iso_date(raw: &str) -> Option<(u32, u32, u32)> {
    let date = raw.trim().get(..10)?;
    let mut parts = date.split('-');
    let year = parts.next().filter(|p| p.len() == 4)?.parse().ok()?;
    let month = parts.next().filter(|p| p.len() == 2)?.parse().ok()?;
    let day = parts.next().filter(|p| p.len() == 2)?.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some((year, month, day))
}

/// Render a timestamp as `October 19, 2026`; unparseable input is shown as-is.
pub fn long_date(raw: &str) -> String {
    match parse_iso_date(raw) {
        Some((year, month, day)) => {
            let name = MONTHS[(month - 1) as usize];
            format!("{name} {day}, {year}")
        }
        None => raw.to_owned(),
    }
}

/// `YYYY-MM-DD` for an `<input type="date">`, or empty.
pub fn input_date(raw: &str) -> String {
    parse_iso_date(raw).map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}")).unwrap_or_default()
}

pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}").trim().to_owned()
}

/// Attendee count label.
pub fn attendee_label(count: usize) -> String {
    if count == 1 { "1 attendee".to_owned() } else { format!("{count} attendees") }
}
