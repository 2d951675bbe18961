//! Per-developer activity counters across the four time dimensions.

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

pub const WEEKDAY_SLOTS: usize = 7;
pub const HOUR_SLOTS: usize = 24;
pub const MONTH_SLOTS: usize = 12;
pub const WEEK_SLOTS: usize = 53;

/// The slot a timestamp falls into for each dimension.
///
/// Weekday 0 is Sunday, month 0 is January, and week slot `n` holds ISO week
/// `n`. ISO week 53 shares the last slot (52) with week 52 of its own ISO year;
/// slot 0 is never filled by a timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BucketIndex {
    pub weekday: usize,
    pub hour: usize,
    pub month: usize,
    pub week: usize,
}

impl BucketIndex {
    pub fn from_timestamp<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> Self {
        Self {
            weekday: timestamp.weekday().num_days_from_sunday() as usize,
            hour: timestamp.hour() as usize,
            month: timestamp.month0() as usize,
            week: (timestamp.iso_week().week() as usize).min(WEEK_SLOTS - 1),
        }
    }
}

/// Four fixed-size counter arrays that always move together: each recorded
/// event lands in exactly one slot of every array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeBucketSet {
    weekdays: [u64; WEEKDAY_SLOTS],
    hours: [u64; HOUR_SLOTS],
    months: [u64; MONTH_SLOTS],
    weeks: [u64; WEEK_SLOTS],
}

impl Default for TimeBucketSet {
    fn default() -> Self {
        Self {
            weekdays: [0; WEEKDAY_SLOTS],
            hours: [0; HOUR_SLOTS],
            months: [0; MONTH_SLOTS],
            weeks: [0; WEEK_SLOTS],
        }
    }
}

impl TimeBucketSet {
    pub fn weekdays(&self) -> &[u64] {
        &self.weekdays
    }

    pub fn hours(&self) -> &[u64] {
        &self.hours
    }

    pub fn months(&self) -> &[u64] {
        &self.months
    }

    pub fn weeks(&self) -> &[u64] {
        &self.weeks
    }

    /// Add `magnitude` to the slot named by `index` in every dimension.
    /// An index outside a dimension's range is dropped for that dimension.
    pub fn add(&mut self, index: BucketIndex, magnitude: u64) {
        bump(&mut self.weekdays, index.weekday, magnitude, "weekday");
        bump(&mut self.hours, index.hour, magnitude, "hour");
        bump(&mut self.months, index.month, magnitude, "month");
        bump(&mut self.weeks, index.week, magnitude, "week");
    }

    /// Element-wise sum of `other` into `self`.
    pub fn merge(&mut self, other: &TimeBucketSet) {
        sum_into(&mut self.weekdays, &other.weekdays);
        sum_into(&mut self.hours, &other.hours);
        sum_into(&mut self.months, &other.months);
        sum_into(&mut self.weeks, &other.weeks);
    }

    /// Total magnitude recorded, read off the weekday projection.
    pub fn total(&self) -> u64 {
        self.weekdays.iter().sum()
    }
}

fn bump(slots: &mut [u64], index: usize, magnitude: u64, dimension: &'static str) {
    match slots.get_mut(index) {
        Some(slot) => *slot += magnitude,
        None => warn!(
            dimension,
            index,
            slots = slots.len(),
            "Dropping out-of-range bucket index"
        ),
    }
}

fn sum_into(target: &mut [u64], source: &[u64]) {
    for (t, s) in target.iter_mut().zip(source) {
        *t += *s;
    }
}

/// Activity for a set of developers, keyed by canonical developer name.
///
/// A developer only appears once an event has been recorded for them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitActivity {
    developers: HashMap<String, TimeBucketSet>,
}

impl CommitActivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one event of weight `magnitude` for `developer` at `timestamp`.
    ///
    /// A zero magnitude still creates the developer's (zeroed) buckets.
    pub fn record_event<Tz: TimeZone>(
        &mut self,
        developer: &str,
        timestamp: &DateTime<Tz>,
        magnitude: u64,
    ) {
        let index = BucketIndex::from_timestamp(timestamp);
        self.developers
            .entry(developer.to_string())
            .or_default()
            .add(index, magnitude);
    }

    /// Fold every developer of `other` into this accumulator.
    pub fn merge(&mut self, other: &CommitActivity) {
        for (developer, buckets) in &other.developers {
            self.developers
                .entry(developer.clone())
                .or_default()
                .merge(buckets);
        }
    }

    pub fn get(&self, developer: &str) -> Option<&TimeBucketSet> {
        self.developers.get(developer)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TimeBucketSet)> {
        self.developers.iter()
    }

    pub fn developers(&self) -> impl Iterator<Item = &str> {
        self.developers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.developers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.developers.is_empty()
    }

    /// All developers' buckets summed into one set.
    pub fn totals(&self) -> TimeBucketSet {
        let mut totals = TimeBucketSet::default();
        for buckets in self.developers.values() {
            totals.merge(buckets);
        }
        totals
    }
}

/// The activity of one analyzed repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoCommitActivity {
    pub name: String,
    pub activity: CommitActivity,
}

/// Per-repository activity in the order the repositories were given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombinedCommitActivity {
    repos: Vec<RepoCommitActivity>,
}

impl CombinedCommitActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, activity: CommitActivity) {
        self.repos.push(RepoCommitActivity {
            name: name.into(),
            activity,
        });
    }

    pub fn repos(&self) -> &[RepoCommitActivity] {
        &self.repos
    }

    /// The first repository recorded under `name`.
    pub fn get(&self, name: &str) -> Option<&CommitActivity> {
        self.repos
            .iter()
            .find(|repo| repo.name == name)
            .map(|repo| &repo.activity)
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Every repository merged into a single accumulator.
    pub fn overall(&self) -> CommitActivity {
        let mut overall = CommitActivity::new();
        for repo in &self.repos {
            overall.merge(&repo.activity);
        }
        overall
    }

    /// Developer names across all repositories, sorted.
    pub fn developer_names(&self) -> BTreeSet<&str> {
        self.repos
            .iter()
            .flat_map(|repo| repo.activity.developers())
            .collect()
    }
}
