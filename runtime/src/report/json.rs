//! JSON rendition of a run report.

use super::{write_file, RunReport};
use anyhow::{Context, Result};
use std::path::Path;

pub fn render(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report")
}

pub fn write(report: &RunReport, path: &Path) -> Result<()> {
    write_file(path, &render(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ProbeKind, ProbeOutcome, ProbeStatus, ResultRecord};
    use assert_json_diff::assert_json_include;
    use chrono::Local;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_json_shape() {
        let records = vec![
            ResultRecord::new(
                "https://status.example.com/health",
                ProbeOutcome {
                    kind: ProbeKind::Api,
                    status: ProbeStatus::Success,
                    detail: "status code 200".to_string(),
                    artifact: None,
                    status_code: Some(200),
                },
            ),
            ResultRecord::new(
                "https://intranet.example.com",
                ProbeOutcome {
                    kind: ProbeKind::Web,
                    status: ProbeStatus::Failure,
                    detail: "net::ERR_NAME_NOT_RESOLVED".to_string(),
                    artifact: None,
                    status_code: None,
                },
            ),
        ];
        let report = RunReport::build(&records, Local::now(), Duration::from_secs(3));
        let value: serde_json::Value = serde_json::from_str(&render(&report).unwrap()).unwrap();

        assert_json_include!(
            actual: value,
            expected: json!({
                "summary": { "total": 2, "success_count": 1, "failure_count": 1 },
                "results": [
                    {
                        "url": "https://intranet.example.com",
                        "system_name": "Intranet",
                        "kind": "web",
                        "status": "failure",
                        "artifact": null,
                        "status_code": null
                    },
                    {
                        "url": "https://status.example.com/health",
                        "kind": "api",
                        "status": "success",
                        "status_code": 200
                    }
                ]
            })
        );
    }

    #[test]
    fn test_json_round_trips_into_report() {
        let report = RunReport::build(&[], Local::now(), Duration::ZERO);
        let text = render(&report).unwrap();
        let back: RunReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back.summary.total, 0);
        assert!(back.is_empty());
    }
}
