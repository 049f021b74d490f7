//! Admin view projection: time filter, text search, newest-first sort.
//!
//! Pure functions over a snapshot of the store. Recomputed on every render,
//! nothing is cached and stored order is never touched.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::models::TrainingRequest;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFilter {
    #[default]
    All,
    /// Same calendar date as now, in the viewer's time zone
    Today,
    /// Within the last 7 x 24 hours
    Week,
}

impl TimeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFilter::All => "all",
            TimeFilter::Today => "today",
            TimeFilter::Week => "week",
        }
    }

    pub fn keeps<Tz: TimeZone>(&self, record: &TrainingRequest, now: &DateTime<Tz>) -> bool {
        match self {
            TimeFilter::All => true,
            TimeFilter::Today => {
                record.timestamp.with_timezone(&now.timezone()).date_naive() == now.date_naive()
            }
            TimeFilter::Week => record.timestamp >= now.with_timezone(&Utc) - Duration::days(7),
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TimeFilter::All),
            "today" => Ok(TimeFilter::Today),
            "week" => Ok(TimeFilter::Week),
            other => Err(format!("Unknown time filter '{}'", other)),
        }
    }
}

/// What the admin currently has selected in the view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestQuery {
    pub filter: TimeFilter,
    pub search: String,
}

impl RequestQuery {
    pub fn new(filter: TimeFilter, search: impl Into<String>) -> Self {
        Self {
            filter,
            search: search.into(),
        }
    }

    pub fn apply<Tz: TimeZone>(
        &self,
        records: Vec<TrainingRequest>,
        now: &DateTime<Tz>,
    ) -> Vec<TrainingRequest> {
        project(records, self, now)
    }
}

/// Filter by time, then by search term, then sort newest first
pub fn project<Tz: TimeZone>(
    records: Vec<TrainingRequest>,
    query: &RequestQuery,
    now: &DateTime<Tz>,
) -> Vec<TrainingRequest> {
    let total = records.len();
    let needle = query.search.to_lowercase();

    let mut visible: Vec<TrainingRequest> = records
        .into_iter()
        .filter(|r| query.filter.keeps(r, now))
        .filter(|r| needle.is_empty() || r.matches(&needle))
        .collect();

    visible.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    debug!(
        "Projected {} of {} requests (filter={}, search={:?})",
        visible.len(),
        total,
        query.filter,
        query.search
    );
    visible
}

/// "1 Request", "3 Requests"
pub fn count_label(count: usize) -> String {
    format!("{} Request{}", count, if count == 1 { "" } else { "s" })
}

/// Card date like "Oct 18, 2026, 03:04 PM" in the viewer's zone
pub fn format_display_date<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format("%b %-d, %Y, %I:%M %p")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn record(id: i64, email: &str, discord: &str, text: &str, ts: DateTime<Utc>) -> TrainingRequest {
        TrainingRequest {
            id,
            email: email.to_string(),
            discord: discord.to_string(),
            request: text.to_string(),
            timestamp: ts,
        }
    }

    fn at(ts: DateTime<Utc>) -> TrainingRequest {
        record(ts.timestamp_millis(), "a@b.co", "ab", "some request text", ts)
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!("all".parse::<TimeFilter>(), Ok(TimeFilter::All));
        assert_eq!("week".parse::<TimeFilter>(), Ok(TimeFilter::Week));
        assert!("month".parse::<TimeFilter>().is_err());
        assert_eq!(TimeFilter::default(), TimeFilter::All);
        assert_eq!(serde_json::to_string(&TimeFilter::Today).unwrap(), "\"today\"");
    }

    #[test]
    fn test_today_uses_calendar_date() {
        let now = utc().with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap();
        let now_utc = now.with_timezone(&Utc);

        let yesterday = at(now_utc - Duration::hours(24) - Duration::seconds(1));
        let just_after_midnight = at(Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 1).unwrap());
        let late_tonight = at(Utc.with_ymd_and_hms(2026, 10, 18, 23, 59, 0).unwrap());

        assert!(!TimeFilter::Today.keeps(&yesterday, &now));
        assert!(TimeFilter::Today.keeps(&just_after_midnight, &now));
        assert!(TimeFilter::Today.keeps(&late_tonight, &now));
    }

    #[test]
    fn test_today_follows_viewer_zone() {
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = cest.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();

        // 23:30 UTC on the 18th is 01:30 on the 19th for this viewer
        let r = at(Utc.with_ymd_and_hms(2026, 10, 18, 23, 30, 0).unwrap());
        assert!(TimeFilter::Today.keeps(&r, &now));
        assert!(!TimeFilter::Today.keeps(&r, &now.with_timezone(&utc())));
    }

    #[test]
    fn test_week_window() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap();

        assert!(TimeFilter::Week.keeps(&at(now - Duration::days(6)), &now));
        assert!(TimeFilter::Week.keeps(&at(now - Duration::days(7)), &now));
        assert!(!TimeFilter::Week.keeps(&at(now - Duration::days(8)), &now));
        assert!(TimeFilter::All.keeps(&at(now - Duration::days(800)), &now));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap();
        let records = vec![
            record(1, "Foo@Bar.com", "lifter", "deadlift coaching please", ts),
            record(2, "x@y.co", "FOOtball", "speed and agility work", ts),
            record(3, "x@y.co", "runner", "marathon plan with some FoO", ts),
            record(4, "x@y.co", "swimmer", "nothing to see here", ts),
        ];

        let query = RequestQuery::new(TimeFilter::All, "foo");
        let ids: Vec<i64> = project(records.clone(), &query, &ts).iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(!ids.contains(&4));

        let query = RequestQuery::new(TimeFilter::All, "BAR.COM");
        assert_eq!(project(records, &query, &ts).len(), 1);
    }

    #[test]
    fn test_empty_search_keeps_all_and_sorts_newest_first() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap();
        let records = vec![
            at(now - Duration::days(2)),
            at(now - Duration::hours(1)),
            at(now - Duration::days(10)),
        ];

        let visible = RequestQuery::default().apply(records.clone(), &now);
        let stamps: Vec<DateTime<Utc>> = visible.iter().map(|r| r.timestamp).collect();
        assert_eq!(
            stamps,
            vec![records[1].timestamp, records[0].timestamp, records[2].timestamp]
        );
    }

    #[test]
    fn test_filter_and_search_compose() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap();
        let records = vec![
            record(1, "old@b.co", "ab", "mobility routine needed", now - Duration::days(9)),
            record(2, "new@b.co", "ab", "mobility routine needed", now - Duration::days(1)),
            record(3, "new@b.co", "ab", "strength block needed", now - Duration::days(1)),
        ];

        let query = RequestQuery::new(TimeFilter::Week, "mobility");
        let visible = project(records, &query, &now);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
    }

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(0), "0 Requests");
        assert_eq!(count_label(1), "1 Request");
        assert_eq!(count_label(2), "2 Requests");
    }

    #[test]
    fn test_display_date() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 18, 15, 4, 0).unwrap();
        assert_eq!(format_display_date(&ts, &Utc), "Oct 18, 2026, 03:04 PM");

        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(format_display_date(&ts, &minus_five), "Oct 18, 2026, 10:04 AM");
    }
}
