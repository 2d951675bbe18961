//! Fixed category labels for each bucket dimension.

use once_cell::sync::Lazy;

pub static WEEKDAY_LABELS: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
});

pub static HOUR_LABELS: Lazy<Vec<String>> =
    Lazy::new(|| (0..24).map(|hour| format!("{:02}:00", hour)).collect());

pub static MONTH_LABELS: Lazy<Vec<String>> = Lazy::new(|| {
    [
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
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
});

pub static WEEK_LABELS: Lazy<Vec<String>> =
    Lazy::new(|| (0..53).map(|week| format!("Week {}", week)).collect());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_tables_match_bucket_sizes() {
        assert_eq!(WEEKDAY_LABELS.len(), 7);
        assert_eq!(HOUR_LABELS.len(), 24);
        assert_eq!(MONTH_LABELS.len(), 12);
        assert_eq!(WEEK_LABELS.len(), 53);
    }

    #[test]
    fn test_label_formats() {
        assert_eq!(WEEKDAY_LABELS[0], "Sunday");
        assert_eq!(HOUR_LABELS[0], "00:00");
        assert_eq!(HOUR_LABELS[23], "23:00");
        assert_eq!(MONTH_LABELS[11], "December");
        assert_eq!(WEEK_LABELS[0], "Week 0");
        assert_eq!(WEEK_LABELS[52], "Week 52");
    }
}
