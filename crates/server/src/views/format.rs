use chrono::NaiveDate;

fn parse_date(date: Option<&str>) -> Option<NaiveDate> {
    date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

/// `2023-01-01` → `2023`. Empty for missing or malformed dates.
pub fn year(date: Option<&str>) -> String {
    parse_date(date)
        .map(|d| d.format("%Y").to_string())
        .unwrap_or_default()
}

/// `2010-07-16` → `July 16, 2010`.
pub fn long_date(date: Option<&str>) -> String {
    parse_date(date)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

/// `148` → `2h 28m`.
pub fn runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m >= 60 => format!("{}h {}m", m / 60, m % 60),
        Some(m) if m > 0 => format!("{m}m"),
        _ => String::new(),
    }
}

/// One decimal place, as shown on rating badges.
pub fn rating(average: f64) -> String {
    format!("{average:.1}")
}

/// Zero-padded two-digit number for episode codes.
pub fn pad(n: u32) -> String {
    format!("{n:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates() {
        assert_eq!(year(Some("2023-01-01")), "2023");
        assert_eq!(year(Some("")), "");
        assert_eq!(year(None), "");
        assert_eq!(long_date(Some("2010-07-16")), "July 16, 2010");
        assert_eq!(long_date(Some("soon")), "");
    }

    #[test]
    fn numbers() {
        assert_eq!(runtime(Some(148)), "2h 28m");
        assert_eq!(runtime(Some(45)), "45m");
        assert_eq!(runtime(Some(0)), "");
        assert_eq!(runtime(None), "");
        assert_eq!(rating(8.5), "8.5");
        assert_eq!(rating(7.0), "7.0");
        assert_eq!(pad(3), "03");
        assert_eq!(pad(12), "12");
    }
}
