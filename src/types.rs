//! # Common Types
//!
//! This module contains the value types shared by the analysis, aggregation
//! and plotting layers: measurement modes, date ranges, grouping selectors and
//! the four time dimensions activity is bucketed into.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::analysis::TimeBucketSet;
use crate::error::ConfigError;
use crate::utils::labels;

/// How a single event is weighted when it is recorded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Every commit counts as one event of magnitude 1.
    #[default]
    Commits,
    /// Every touched file contributes its added + deleted lines, attributed
    /// to the file's last modification time.
    Lines,
}

impl AnalysisMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisMode::Commits => "commits",
            AnalysisMode::Lines => "lines",
        }
    }

    /// Y-axis caption used for charts measured in this mode.
    pub fn unit_label(self) -> &'static str {
        match self {
            AnalysisMode::Commits => "Commits",
            AnalysisMode::Lines => "Lines of Code",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commits" => Ok(AnalysisMode::Commits),
            "lines" => Ok(AnalysisMode::Lines),
            _ => Err(ConfigError::UnsupportedMode(s.to_string())),
        }
    }
}

/// An optional, inclusive range of calendar dates.
///
/// The start bound begins at 00:00:00 UTC of the start date and the end bound
/// covers the whole end date, up to (but excluding) 00:00:00 UTC of the next day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// A range with no bounds on either side.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Build a range, rejecting a start date that falls after the end date.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, ConfigError> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(ConfigError::InvertedDateRange { start: s, end: e });
            }
        }
        Ok(Self { start, end })
    }

    /// Parse optional `YYYY-MM-DD` bounds. Empty strings count as omitted.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, ConfigError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    fn start_instant(&self) -> Option<DateTime<Utc>> {
        self.start
            .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
    }

    fn end_instant_exclusive(&self) -> Option<DateTime<Utc>> {
        self.end.map(|date| {
            Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)) + Duration::days(1)
        })
    }

    /// Whether `timestamp` falls strictly before the start bound.
    pub fn is_before_start(&self, timestamp: &DateTime<FixedOffset>) -> bool {
        self.start_instant()
            .is_some_and(|start| timestamp.with_timezone(&Utc) < start)
    }

    /// Whether `timestamp` falls strictly after the end bound.
    pub fn is_after_end(&self, timestamp: &DateTime<FixedOffset>) -> bool {
        self.end_instant_exclusive()
            .is_some_and(|end| timestamp.with_timezone(&Utc) >= end)
    }

    pub fn contains(&self, timestamp: &DateTime<FixedOffset>) -> bool {
        !self.is_before_start(timestamp) && !self.is_after_end(timestamp)
    }
}

fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>, ConfigError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|source| ConfigError::InvalidDate {
                value: raw.to_string(),
                source,
            }),
    }
}

/// Parameters shared by every repository analysis in a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub mode: AnalysisMode,
    pub range: DateRange,
}

/// How chart series are partitioned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GroupBy {
    /// A single series named "All".
    #[default]
    Flat,
    /// One series per repository.
    ByRepository,
    /// One series per developer, summed across repositories.
    ByDeveloper,
}

impl GroupBy {
    /// Suffix appended to chart file names and titles, if any.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            GroupBy::Flat => None,
            GroupBy::ByRepository => Some("repo"),
            GroupBy::ByDeveloper => Some("dev"),
        }
    }
}

impl FromStr for GroupBy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "flat" => Ok(GroupBy::Flat),
            "repo" | "repository" | "byRepo" => Ok(GroupBy::ByRepository),
            "dev" | "developer" | "byDev" => Ok(GroupBy::ByDeveloper),
            _ => Err(ConfigError::UnsupportedGrouping(s.to_string())),
        }
    }
}

/// Chart image format, chosen by file suffix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(ConfigError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// One of the four projections of a timestamp onto fixed categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Weekday,
    Hour,
    Month,
    Week,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Weekday,
        Dimension::Hour,
        Dimension::Month,
        Dimension::Week,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Weekday => "weekday",
            Dimension::Hour => "hour",
            Dimension::Month => "month",
            Dimension::Week => "week",
        }
    }

    /// Human-readable category labels, one per bucket slot.
    pub fn labels(self) -> &'static [String] {
        match self {
            Dimension::Weekday => labels::WEEKDAY_LABELS.as_slice(),
            Dimension::Hour => labels::HOUR_LABELS.as_slice(),
            Dimension::Month => labels::MONTH_LABELS.as_slice(),
            Dimension::Week => labels::WEEK_LABELS.as_slice(),
        }
    }

    /// The bucket sequence this dimension projects onto.
    pub fn values(self, buckets: &TimeBucketSet) -> &[u64] {
        match self {
            Dimension::Weekday => buckets.weekdays(),
            Dimension::Hour => buckets.hours(),
            Dimension::Month => buckets.months(),
            Dimension::Week => buckets.weeks(),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Dimension::Weekday => "Activity by Weekday",
            Dimension::Hour => "Activity by Hour",
            Dimension::Month => "Activity by Month",
            Dimension::Week => "Activity by Week",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            Dimension::Weekday => "Weekdays",
            Dimension::Hour => "Hours",
            Dimension::Month => "Months",
            Dimension::Week => "Weeks",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
