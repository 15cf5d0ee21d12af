use chrono::NaiveDate;

const MONTH_NAMES: [&str; 12] = [
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

/// Band used for the interpretation paragraph and for the monthly day counts.
///
/// `< 30` fear, `30..=70` neutral, `> 70` greed. The cache builder counts
/// `fearDays`/`greedDays` with the same limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretationBand {
    Fear,
    Neutral,
    Greed,
}

impl InterpretationBand {
    pub fn classify(score: i64) -> Self {
        if score < 30 {
            InterpretationBand::Fear
        } else if score <= 70 {
            InterpretationBand::Neutral
        } else {
            InterpretationBand::Greed
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InterpretationBand::Fear => "fear",
            InterpretationBand::Neutral => "neutral",
            InterpretationBand::Greed => "greed",
        }
    }
}

/// Five-level label the cache builder stores in `category`.
/// Used when a record arrives without one.
pub fn category_label(score: i64) -> &'static str {
    match score {
        s if s <= 20 => "Extreme Fear",
        s if s <= 40 => "Fear",
        s if s <= 60 => "Neutral",
        s if s <= 80 => "Greed",
        _ => "Extreme Greed",
    }
}

/// Round half up, so `62.5` becomes `63` and `-0.5` becomes `0`.
pub fn round_score(score: f64) -> i64 {
    (score + 0.5).floor() as i64
}

/// English month name for a 1-indexed month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// Parses a `YYYY-MM-DD` daily period key.
pub fn parse_daily_period(period: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(period, "%Y-%m-%d").ok()
}

/// Parses a `YYYY-MM` monthly period key into the first day of that month.
pub fn parse_monthly_period(period: &str) -> Option<NaiveDate> {
    let (year, month) = period.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Groups digits in threes with commas: `12000` -> `12,000`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn month_lookup_is_one_indexed() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_score(62.5), 63);
        assert_eq!(round_score(62.49), 62);
        assert_eq!(round_score(70.0), 70);
    }
}
