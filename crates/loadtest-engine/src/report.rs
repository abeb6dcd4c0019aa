//! Load test report types.

use crate::pipeline::RunOutput;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const RULE: &str = "==================================================";

/// Everything the reporter needs about a finished run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Workload name (e.g. "crm").
    pub workload: String,
    /// Configured worker count.
    pub concurrency: usize,
    /// Raw engine output.
    pub output: RunOutput,
}

impl RunReport {
    pub fn new(workload: impl Into<String>, concurrency: usize, output: RunOutput) -> Self {
        Self {
            workload: workload.into(),
            concurrency,
            output,
        }
    }

    /// Header printed before the run starts.
    pub fn banner(workload: &str, requested: u64, concurrency: usize) -> String {
        let title = workload.to_uppercase();
        format!(
            "\n--- STARTING POOLED {title} SIMULATION ---\n\
             Requests    : {requested}\n\
             Concurrency : {concurrency}\n\
             Workload    : {workload}\n\
             Strategy    : Persistent Connection Pool (Reuse)\n\
             {RULE}"
        )
    }

    /// Plain-text report: timing, throughput, counts and module usage.
    pub fn render(&self) -> String {
        let stats = &self.output.stats;

        let mut lines = vec![
            String::new(),
            RULE.to_string(),
            format!("{} POOLED PERFORMANCE", self.workload.to_uppercase()),
            RULE.to_string(),
            format!("Total Time       : {:.4} s", stats.elapsed.as_secs_f64()),
            format!("Throughput (QPS) : {:.2}", stats.throughput()),
            format!("Successful       : {}", stats.success),
            format!("Errors           : {}", stats.failure),
        ];
        if self.output.interrupted() {
            lines.push(format!(
                "Interrupted      : {}/{} requests completed",
                stats.completed(),
                self.output.requested
            ));
        }

        lines.push(String::new());
        lines.push("Module Usage Distribution:".to_string());
        lines.extend(
            stats
                .distribution()
                .into_iter()
                .map(|(label, count)| format!("- {label:<25} : {count}")),
        );
        lines.push(RULE.to_string());

        lines.join("\n")
    }

    /// Machine-readable summary.
    pub fn summary(&self) -> RunSummary {
        let stats = &self.output.stats;
        RunSummary {
            workload: self.workload.clone(),
            requested: self.output.requested,
            completed: stats.completed(),
            concurrency: self.concurrency,
            workers_finished: self.output.workers.len(),
            success: stats.success,
            failure: stats.failure,
            error_rate: stats.error_rate(),
            duration_ms: stats.elapsed.as_millis() as u64,
            throughput_qps: stats.throughput(),
            per_label: stats
                .per_label
                .iter()
                .map(|(label, count)| (label.to_string(), *count))
                .collect(),
            interrupted: self.output.interrupted(),
            started_at: self.output.started_at,
            completed_at: self.output.completed_at,
        }
    }
}

/// Serializable run summary, written with `--metrics-output`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub workload: String,
    pub requested: u64,
    pub completed: u64,
    pub concurrency: usize,
    pub workers_finished: usize,
    pub success: u64,
    pub failure: u64,
    pub error_rate: f64,
    /// Duration in milliseconds
    pub duration_ms: u64,
    pub throughput_qps: f64,
    pub per_label: BTreeMap<String, u64>,
    pub interrupted: bool,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Outcome;
    use crate::metrics::RunStatistics;
    use crate::worker::WorkerSummary;
    use std::time::Duration;

    fn test_output(requested: u64, outcomes: &[Outcome]) -> RunOutput {
        let mut stats = RunStatistics::default();
        for outcome in outcomes {
            stats.record(*outcome);
        }
        stats.elapsed = Duration::from_millis(2500);
        let now = Utc::now();
        RunOutput {
            stats,
            workers: vec![WorkerSummary {
                worker_id: 0,
                executed: outcomes.len() as u64,
            }],
            produced: outcomes.len() as u64,
            requested,
            started_at: now,
            completed_at: now,
        }
    }

    #[test]
    fn test_banner() {
        let banner = RunReport::banner("crm", 1000, 50);
        assert!(banner.contains("STARTING POOLED CRM SIMULATION"));
        assert!(banner.contains("Requests    : 1000"));
        assert!(banner.contains("Concurrency : 50"));
        assert!(banner.contains("Workload    : crm"));
    }

    #[test]
    fn test_banner_and_report_follow_workload() {
        let banner = RunReport::banner("hris", 10, 2);
        assert!(banner.contains("--- STARTING POOLED HRIS SIMULATION ---"));
        assert!(!banner.contains("CRM"));

        let report = RunReport::new("hris", 2, test_output(1, &[Outcome::Failure]));
        let text = report.render();
        assert!(text.contains("HRIS POOLED PERFORMANCE"));
        assert!(!text.contains("CRM"));
    }

    #[test]
    fn test_render_report() {
        let outcomes = [
            Outcome::Success("[Auth] Login"),
            Outcome::Success("[Auth] Login"),
            Outcome::Success("[Sys] Heartbeat"),
            Outcome::Failure,
        ];
        let report = RunReport::new("crm", 2, test_output(4, &outcomes));
        let text = report.render();

        assert!(text.contains("Total Time       : 2.5000 s"));
        assert!(text.contains("Throughput (QPS) : 1.60"));
        assert!(text.contains("Successful       : 3"));
        assert!(text.contains("Errors           : 1"));
        assert!(!text.contains("Interrupted"));

        let login = text.find("- [Auth] Login").unwrap();
        let heartbeat = text.find("- [Sys] Heartbeat").unwrap();
        assert!(login < heartbeat);
        assert!(text.contains(&format!("- {:<25} : 2", "[Auth] Login")));
        assert!(text.contains("CRM POOLED PERFORMANCE"));
        assert!(text.starts_with("\n="));
        assert!(text.ends_with(RULE));
    }

    #[test]
    fn test_render_interrupted() {
        let report = RunReport::new("crm", 1, test_output(10, &[Outcome::Failure]));
        assert!(report
            .render()
            .contains("Interrupted      : 1/10 requests completed"));
    }

    #[test]
    fn test_summary_serializes() {
        let outcomes = [Outcome::Success("[Sales] View Profile"), Outcome::Failure];
        let report = RunReport::new("crm", 4, test_output(2, &outcomes));
        let summary = report.summary();

        assert_eq!(summary.completed, 2);
        assert_eq!(summary.per_label["[Sales] View Profile"], 1);
        assert_eq!(summary.duration_ms, 2500);
        assert!(!summary.interrupted);

        let json = serde_json::to_string(&summary).unwrap();
        let parsed: RunSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.per_label, summary.per_label);
        assert_eq!(parsed.completed_at, summary.completed_at);
        assert!((parsed.error_rate - 0.5).abs() < 1e-9);
    }
}
