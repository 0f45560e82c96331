//! Static HTML report, rendered from a handlebars template.

use super::{write_file, RunReport};
use crate::probe::{ProbeKind, ResultRecord};
use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;

const TEMPLATE_NAME: &str = "report";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>URL Check Report</title>
<style>
  body { font-family: system-ui, sans-serif; background: #f4f7f9; color: #333; margin: 0; padding: 20px; }
  .container { max-width: 1200px; margin: auto; background: #fff; padding: 30px; border-radius: 8px; box-shadow: 0 4px 15px rgba(0,0,0,0.05); }
  h1, h2 { color: #2c3e50; border-bottom: 2px solid #e0e0e0; padding-bottom: 10px; }
  .summary { display: flex; justify-content: space-around; text-align: center; margin: 20px 0; padding: 20px; background: #ecf0f1; border-radius: 8px; }
  .summary-item { flex-grow: 1; }
  .summary-item h3 { margin: 0 0 10px 0; font-weight: 400; color: #7f8c8d; }
  .value { font-size: 2.5em; font-weight: 700; }
  .value.small { font-size: 1.5em; }
  .value.success, .status-icon.success { color: #27ae60; }
  .value.failure, .status-icon.failure { color: #c0392b; }
  .results-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(350px, 1fr)); gap: 20px; }
  .card { border: 1px solid #e0e0e0; border-radius: 8px; overflow: hidden; }
  .card-header { padding: 15px; display: flex; justify-content: space-between; align-items: center; }
  .card-header.success { background: #e8f5e9; border-left: 5px solid #27ae60; }
  .card-header.failure { background: #fbe9e7; border-left: 5px solid #c0392b; }
  .card-title { font-weight: 700; font-size: 1.1em; margin: 0; }
  .status-icon { font-size: 1.5em; }
  .card-body { padding: 15px; font-size: 0.9em; }
  .card-body a { color: #3498db; text-decoration: none; word-break: break-all; }
  .card-body p { margin: 0 0 10px 0; }
  .screenshot img { max-width: 100%; border-radius: 4px; border: 1px solid #ddd; }
  .footer { text-align: center; margin-top: 40px; font-size: 0.8em; color: #95a5a6; }
</style>
</head>
<body>
<div class="container">
<h1>URL Check Report</h1>
<div class="summary">
  <div class="summary-item"><h3>Run Date</h3><div class="value small">{{run_date}}</div></div>
  <div class="summary-item"><h3>Total URLs</h3><div class="value">{{total}}</div></div>
  <div class="summary-item"><h3>Successes</h3><div class="value success">{{success_count}}</div></div>
  <div class="summary-item"><h3>Failures</h3><div class="value failure">{{failure_count}}</div></div>
  <div class="summary-item"><h3>Duration</h3><div class="value small">{{duration}}</div></div>
</div>
<h2>Detailed Results</h2>
<div class="results-grid">
{{#each cards}}
  <div class="card">
    <div class="card-header {{status}}"><h3 class="card-title">{{system_name}}</h3><span class="status-icon {{status}}">{{#if success}}&#10004;{{else}}&#10006;{{/if}}</span></div>
    <div class="card-body">
      <p><strong>URL:</strong> <a href="{{url}}" target="_blank">{{url}}</a></p>
      <p><strong>Type:</strong> {{kind_label}}</p>
      <p><strong>Details:</strong> {{detail}}</p>
{{#if snapshot}}
      <div class="screenshot"><a href="{{snapshot}}" target="_blank"><img src="{{snapshot}}" alt="Snapshot of {{url}}" loading="lazy"></a></div>
{{/if}}
    </div>
  </div>
{{/each}}
</div>
<div class="footer">Generated by urlcheck.</div>
</div>
</body>
</html>
"#;

/// Template data for the whole page.
#[derive(Serialize)]
struct ReportView<'a> {
    run_date: String,
    total: usize,
    success_count: usize,
    failure_count: usize,
    duration: String,
    cards: Vec<CardView<'a>>,
}

/// One record plus the display fields the template needs.
#[derive(Serialize)]
struct CardView<'a> {
    #[serde(flatten)]
    record: &'a ResultRecord,
    kind_label: String,
    success: bool,
    snapshot: Option<String>,
}

impl<'a> ReportView<'a> {
    fn new(report: &'a RunReport, report_dir: &Path) -> Self {
        let summary = &report.summary;
        Self {
            run_date: summary.started_at.format("%d/%m/%Y %H:%M:%S").to_string(),
            total: summary.total,
            success_count: summary.success_count,
            failure_count: summary.failure_count,
            duration: format!("{:.2}s", summary.elapsed_secs),
            cards: report
                .results
                .iter()
                .map(|record| CardView {
                    record,
                    kind_label: record.kind.to_string().to_uppercase(),
                    success: record.is_success(),
                    snapshot: match (record.kind, record.artifact.as_deref()) {
                        (ProbeKind::Web, Some(artifact)) => Some(link_path(artifact, report_dir)),
                        _ => None,
                    },
                })
                .collect(),
        }
    }
}

/// Render the report as a standalone HTML document.
///
/// Snapshot links are relative to `report_dir`, the directory the report
/// file is written to.
pub fn render(report: &RunReport, report_dir: &Path) -> Result<String> {
    let mut registry = Handlebars::new();
    registry
        .register_template_string(TEMPLATE_NAME, TEMPLATE)
        .context("report template is invalid")?;
    registry
        .render(TEMPLATE_NAME, &ReportView::new(report, report_dir))
        .context("failed to render HTML report")
}

/// Render and write the report to `path`.
pub fn write(report: &RunReport, path: &Path) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    write_file(path, &render(report, dir)?)
}

/// Path of `artifact` as seen from `report_dir`. Falls back to an absolute
/// path when no relative one exists.
fn link_path(artifact: &Path, report_dir: &Path) -> String {
    let link = if report_dir.as_os_str().is_empty() {
        artifact.to_path_buf()
    } else {
        match (std::path::absolute(artifact), std::path::absolute(report_dir)) {
            (Ok(artifact), Ok(base)) => pathdiff::diff_paths(&artifact, &base).unwrap_or(artifact),
            _ => artifact.to_path_buf(),
        }
    };
    link.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ProbeOutcome, ProbeStatus};
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;
    use std::time::Duration;

    fn web_success(url: &str, artifact: &str) -> ResultRecord {
        ResultRecord::new(
            url,
            ProbeOutcome {
                kind: ProbeKind::Web,
                status: ProbeStatus::Success,
                detail: format!("snapshot saved at {artifact}"),
                artifact: Some(PathBuf::from(artifact)),
                status_code: None,
            },
        )
    }

    fn report_with(web: ResultRecord) -> RunReport {
        let records = vec![
            web,
            ResultRecord::new(
                "https://api.example.com/items?a=1&b=<2>",
                ProbeOutcome {
                    kind: ProbeKind::Api,
                    status: ProbeStatus::Failure,
                    detail: "status code 500".to_string(),
                    artifact: None,
                    status_code: Some(500),
                },
            ),
        ];
        let started = Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        RunReport::build(&records, started, Duration::from_millis(12_346))
    }

    fn report() -> RunReport {
        report_with(web_success(
            "https://portal.example.com",
            "out/screenshots/portal.example.com.png",
        ))
    }

    #[test]
    fn test_render_summary_and_order() {
        let html = render(&report(), Path::new("out")).unwrap();
        assert!(html.contains("02/01/2026 03:04:05"));
        assert!(html.contains("12.35s"));
        let failure_at = html.find("status code 500").unwrap();
        let success_at = html.find("snapshot saved at").unwrap();
        assert!(failure_at < success_at, "failures render first");
    }

    #[test]
    fn test_render_escapes_and_links_snapshot() {
        let html = render(&report(), Path::new("out")).unwrap();
        assert!(html.contains("&amp;b"));
        assert!(html.contains("&lt;2&gt;"));
        assert!(!html.contains("b=<2>"));
        assert!(html.contains("src=\"screenshots/portal.example.com.png\""));
        assert!(html.contains("<p><strong>Type:</strong> API</p>"));
        assert_eq!(html.matches("<img ").count(), 1);
    }

    #[test]
    fn test_render_escapes_system_name_and_detail() {
        let mut web = web_success("https://portal.example.com", "out/shots/p.png");
        web.system_name = "<script>alert(1)</script>".to_string();
        web.detail = "saved <b>ok</b>".to_string();
        let html = render(&report_with(web), Path::new("out")).unwrap();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("saved &lt;b&gt;ok&lt;/b&gt;"));
    }

    #[test]
    fn test_snapshot_link_from_sibling_report_dir() {
        let web = web_success("https://portal.example.com", "screenshots/portal.example.com.png");
        let html = render(&report_with(web), Path::new("out")).unwrap();
        assert!(html.contains("src=\"../screenshots/portal.example.com.png\""));
    }

    #[test]
    fn test_snapshot_link_next_to_report() {
        let web = web_success("https://portal.example.com", "screenshots/portal.example.com.png");
        let html = render(&report_with(web), Path::new("")).unwrap();
        assert!(html.contains("src=\"screenshots/portal.example.com.png\""));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("index.html");
        write(&report(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<!DOCTYPE html>"));
    }
}
