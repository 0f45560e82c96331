//! Run totals and display ordering.

use crate::probe::ResultRecord;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Totals for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub started_at: DateTime<Local>,
    /// Wall-clock duration of the run in seconds.
    pub elapsed_secs: f64,
}

impl RunSummary {
    /// Count outcomes in `records`.
    pub fn from_records(
        records: &[ResultRecord],
        started_at: DateTime<Local>,
        elapsed: Duration,
    ) -> Self {
        let total = records.len();
        let success_count = records.iter().filter(|r| r.is_success()).count();
        Self {
            total,
            success_count,
            failure_count: total - success_count,
            started_at,
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }
}

/// Failures first, input order kept within each group.
pub fn failures_first(records: &[ResultRecord]) -> Vec<ResultRecord> {
    let mut ordered = records.to_vec();
    // sort_by_key is stable.
    ordered.sort_by_key(|r| r.is_success());
    ordered
}

/// Both derived views of one run.
pub fn aggregate(
    records: &[ResultRecord],
    started_at: DateTime<Local>,
    elapsed: Duration,
) -> (RunSummary, Vec<ResultRecord>) {
    (
        RunSummary::from_records(records, started_at, elapsed),
        failures_first(records),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ProbeKind, ProbeOutcome, ProbeStatus};

    fn record(url: &str, kind: ProbeKind, status: ProbeStatus) -> ResultRecord {
        ResultRecord::new(
            url,
            ProbeOutcome {
                kind,
                status,
                detail: "detail".to_string(),
                artifact: None,
                status_code: None,
            },
        )
    }

    fn sample() -> Vec<ResultRecord> {
        vec![
            record("https://a.example", ProbeKind::Web, ProbeStatus::Success),
            record("https://b.example", ProbeKind::Api, ProbeStatus::Failure),
            record("https://c.example", ProbeKind::Web, ProbeStatus::Failure),
            record("https://d.example", ProbeKind::Api, ProbeStatus::Success),
        ]
    }

    #[test]
    fn test_counts() {
        let summary = RunSummary::from_records(&sample(), Local::now(), Duration::from_millis(1500));
        assert_eq!(summary.total, 4);
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.failure_count, 2);
        assert!((summary.elapsed_secs - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_failures_first_is_stable() {
        let urls: Vec<_> = failures_first(&sample()).into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://b.example",
                "https://c.example",
                "https://a.example",
                "https://d.example",
            ]
        );
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let records = sample();
        let started = Local::now();
        let first = aggregate(&records, started, Duration::from_secs(2));
        let second = aggregate(&records, started, Duration::from_secs(2));
        assert_eq!(first, second);
        assert_eq!(failures_first(&first.1), first.1);
    }

    #[test]
    fn test_empty_run() {
        let (summary, ordered) = aggregate(&[], Local::now(), Duration::ZERO);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.failure_count, 0);
        assert!(ordered.is_empty());
    }
}
