use chrono::{Datelike, Days, NaiveDate};

use crate::storage::config::ShopConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

/// A half-open calendar range `[start, end)` with the granularity it was
/// resolved at. Recomputed on every request, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub granularity: Granularity,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// The period of the given granularity enclosing `reference`. Weeks run
    /// Sunday through Saturday; months and years follow the calendar.
    pub fn containing(reference: NaiveDate, granularity: Granularity) -> Self {
        let (start, end) = match granularity {
            Granularity::Day => (reference, reference + Days::new(1)),
            Granularity::Week => {
                let sunday = reference
                    - Days::new(u64::from(reference.weekday().num_days_from_sunday()));
                (sunday, sunday + Days::new(7))
            }
            Granularity::Month => {
                let first = first_of_month(reference.year(), reference.month());
                (first, next_month(reference.year(), reference.month()))
            }
            Granularity::Year => (
                first_of_month(reference.year(), 1),
                first_of_month(reference.year() + 1, 1),
            ),
        };
        Self { granularity, start, end }
    }

    /// The immediately preceding comparable period: the ranges are adjacent
    /// and, for day and week, the same length. December wraps to the prior
    /// year through plain date arithmetic on the month start.
    pub fn previous(&self) -> Self {
        let start = match self.granularity {
            Granularity::Day => self.start - Days::new(1),
            Granularity::Week => self.start - Days::new(7),
            Granularity::Month => {
                if self.start.month() == 1 {
                    first_of_month(self.start.year() - 1, 12)
                } else {
                    first_of_month(self.start.year(), self.start.month() - 1)
                }
            }
            Granularity::Year => first_of_month(self.start.year() - 1, 1),
        };
        Self {
            granularity: self.granularity,
            start,
            end: self.start,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(|d| *d < self.end)
    }

    /// Count of operating days in the range. Zero for pathological ranges;
    /// callers divide by this only after checking.
    pub fn business_day_count(&self, config: &ShopConfig) -> usize {
        self.days()
            .filter(|d| config.is_business_day(d.weekday()))
            .count()
    }

    pub fn label(&self) -> String {
        match self.granularity {
            Granularity::Day => self.start.format("%A, %B %d, %Y").to_string(),
            Granularity::Week => {
                let last = self.end - Days::new(1);
                format!("{} - {}", self.start.format("%b %d"), last.format("%b %d, %Y"))
            }
            Granularity::Month => self.start.format("%B %Y").to_string(),
            Granularity::Year => self.start.format("%Y").to_string(),
        }
    }
}

/// ISO-8601 week identifier (week-based year, week number). Distinct from
/// the Sunday-start ranges above: ISO weeks start on Monday and a date near
/// January 1st can belong to the other year's week numbering. Used for the
/// month view's weekly sub-buckets.
pub fn iso_week_of(date: NaiveDate) -> (i32, u32) {
    let week = date.iso_week();
    (week.year(), week.week())
}

/// The ISO weeks touched by a month, in calendar order.
pub fn iso_weeks_in_month(year: i32, month: u32) -> Vec<(i32, u32)> {
    let period = Period::containing(first_of_month(year, month), Granularity::Month);
    let mut weeks = Vec::new();
    for day in period.days() {
        let week = iso_week_of(day);
        if weeks.last() != Some(&week) {
            weeks.push(week);
        }
    }
    weeks
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // Month is always 1-12 here.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn next_month(year: i32, month: u32) -> NaiveDate {
    if month == 12 {
        first_of_month(year + 1, 1)
    } else {
        first_of_month(year, month + 1)
    }
}
