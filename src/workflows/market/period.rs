use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Calendar month used as the deal-date scope of one source request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of this month minus one day, truncated to year-month.
    pub fn previous(self) -> Self {
        match self.first_day() {
            Some(first) => Self::from_date(first - Duration::days(1)),
            None => self,
        }
    }

    /// `YYYYMM`, the `DEAL_YMD` request parameter.
    pub fn deal_ymd(self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    pub fn label(self) -> String {
        format!("{}년 {}월", self.year, self.month)
    }

    fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.deal_ymd())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidYearMonth(pub String);

impl fmt::Display for InvalidYearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse '{}' as YYYYMM", self.0)
    }
}

impl std::error::Error for InvalidYearMonth {}

impl FromStr for YearMonth {
    type Err = InvalidYearMonth;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidYearMonth(raw.to_string());
        let trimmed = raw.trim().replace('-', "");
        if trimmed.len() != 6 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let year = trimmed[..4].parse().map_err(|_| invalid())?;
        let month = trimmed[4..].parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

/// Human-facing reporting period: year, month and week of month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    pub year: i32,
    pub month: u32,
    pub week_of_month: u32,
}

impl ReportPeriod {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            week_of_month: (date.day() - 1) / 7 + 1,
        }
    }

    /// Period for an explicitly requested month, pinned to its last week when
    /// the month is already over.
    pub fn for_month(target: YearMonth, today: NaiveDate) -> Self {
        if YearMonth::from_date(today) == target {
            return Self::from_date(today);
        }
        let last_day = target
            .first_day()
            .and_then(|first| first.checked_add_months(chrono::Months::new(1)))
            .map(|next| next - Duration::days(1));
        match last_day {
            Some(date) => Self::from_date(date),
            None => Self {
                year: target.year,
                month: target.month,
                week_of_month: 1,
            },
        }
    }

    pub fn year_month(self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    pub fn label(self) -> String {
        format!(
            "{}년 {}월 {}주차",
            self.year, self.month, self.week_of_month
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_crosses_year_boundary() {
        let january = YearMonth::new(2025, 1).expect("valid");
        assert_eq!(january.previous(), YearMonth::new(2024, 12).expect("valid"));

        let march = YearMonth::new(2024, 3).expect("valid");
        assert_eq!(march.previous().deal_ymd(), "202402");
    }

    #[test]
    fn parses_compact_and_dashed_months() {
        assert_eq!(
            "202503".parse::<YearMonth>().expect("compact"),
            YearMonth::new(2025, 3).expect("valid")
        );
        assert_eq!(
            "2025-11".parse::<YearMonth>().expect("dashed"),
            YearMonth::new(2025, 11).expect("valid")
        );
        assert!("202513".parse::<YearMonth>().is_err());
        assert!("25-03".parse::<YearMonth>().is_err());
    }

    #[test]
    fn week_of_month_counts_seven_day_blocks() {
        let date = |day| NaiveDate::from_ymd_opt(2025, 3, day).expect("date");
        assert_eq!(ReportPeriod::from_date(date(1)).week_of_month, 1);
        assert_eq!(ReportPeriod::from_date(date(7)).week_of_month, 1);
        assert_eq!(ReportPeriod::from_date(date(8)).week_of_month, 2);
        assert_eq!(ReportPeriod::from_date(date(31)).week_of_month, 5);
        assert_eq!(
            ReportPeriod::from_date(date(18)).label(),
            "2025년 3월 3주차"
        );
    }

    #[test]
    fn past_month_period_uses_final_week() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 2).expect("date");
        let period = ReportPeriod::for_month(YearMonth::new(2025, 2).expect("valid"), today);
        assert_eq!(period.week_of_month, 4);
        assert_eq!(period.year_month(), YearMonth::new(2025, 2).expect("valid"));
    }
}
