//! Aggregation of per-task results into run-level metrics.

use crate::metrics::RunResult;
use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use serde::{Deserialize, Serialize};

const NANOS_PER_MILLI: f64 = 1_000_000.0;
const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Run-level metrics derived from every task's [`RunResult`].
///
/// Derived values are `None` when their denominator is zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Per-task results, ordered by task index.
    pub tasks: Vec<RunResult>,
    /// Sum of measured elapsed time across tasks, in nanoseconds.
    pub total_elapsed_nanos: u64,
    pub successful_iterations: u64,
    pub total_iterations: u64,
    pub successful_customer_iterations: u64,
    pub total_customer_iterations: u64,
    /// Summed elapsed time per successful iteration, in milliseconds.
    pub average_latency_ms: Option<f64>,
    /// Successful iterations per second of summed elapsed time.
    pub throughput_per_sec: Option<f64>,
    /// Successful customer iterations as a percentage of successful iterations.
    pub percent_customer: Option<f64>,
    /// Failed iterations as a percentage of all measured iterations.
    pub percent_failed: Option<f64>,
    pub aggregated_at: DateTime<Utc>,
}

impl AggregateReport {
    /// Combine task results. The outcome does not depend on their order.
    pub fn from_results(mut tasks: Vec<RunResult>) -> Self {
        tasks.sort_by_key(|r| r.task);

        let total_elapsed_nanos = tasks
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.measured_elapsed_nanos));
        let successful_iterations: u64 = tasks.iter().map(|r| r.successful_iterations).sum();
        let total_iterations: u64 = tasks.iter().map(|r| r.total_iterations).sum();
        let successful_customer_iterations: u64 =
            tasks.iter().map(|r| r.successful_customer_iterations).sum();
        let total_customer_iterations: u64 =
            tasks.iter().map(|r| r.total_customer_iterations).sum();

        let elapsed = total_elapsed_nanos as f64;
        let successes = successful_iterations as f64;

        let average_latency_ms =
            (successful_iterations > 0).then(|| elapsed / successes / NANOS_PER_MILLI);
        let throughput_per_sec =
            (total_elapsed_nanos > 0).then(|| successes / (elapsed / NANOS_PER_SEC));
        let percent_customer = (successful_iterations > 0)
            .then(|| 100.0 * successful_customer_iterations as f64 / successes);
        let failed_iterations = total_iterations.saturating_sub(successful_iterations);
        let percent_failed = (total_iterations > 0).then(|| {
            100.0 * failed_iterations as f64 / total_iterations as f64
        });

        Self {
            tasks,
            total_elapsed_nanos,
            successful_iterations,
            total_iterations,
            successful_customer_iterations,
            total_customer_iterations,
            average_latency_ms,
            throughput_per_sec,
            percent_customer,
            percent_failed,
            aggregated_at: Utc::now(),
        }
    }

    /// Whether no measured iteration succeeded.
    pub fn is_degenerate(&self) -> bool {
        self.successful_iterations == 0 || self.total_iterations == 0
    }

    /// Plain-text report with two-decimal precision.
    pub fn summary(&self) -> String {
        format!(
            "Average latency: {}\n\
             Throughput: {}\n\
             Customer interactions: {}\n\
             Failed interactions: {}",
            format_metric(self.average_latency_ms, " ms"),
            format_metric(self.throughput_per_sec, " interactions/s"),
            format_metric(self.percent_customer, "%"),
            format_metric(self.percent_failed, "%"),
        )
    }

    /// Per-task table followed by the summary.
    pub fn format_table(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            "Task",
            "Iterations",
            "Succeeded",
            "Customer",
            "Elapsed",
            "Avg latency",
            "Status",
        ]);

        for result in &self.tasks {
            let status_cell = if result.failed_iterations() == 0 {
                Cell::new("OK").fg(Color::Green)
            } else {
                Cell::new(format!("{} failed", result.failed_iterations())).fg(Color::Yellow)
            };

            table.add_row(vec![
                Cell::new(result.task),
                Cell::new(format_number(result.total_iterations)),
                Cell::new(format_number(result.successful_iterations)),
                Cell::new(format!(
                    "{}/{}",
                    result.successful_customer_iterations, result.total_customer_iterations
                )),
                Cell::new(format_duration(result.measured_elapsed_nanos)),
                Cell::new(task_latency(result)),
                status_cell,
            ]);
        }

        table.add_row(vec![
            Cell::new("TOTAL").fg(Color::Cyan),
            Cell::new(format_number(self.total_iterations)),
            Cell::new(format_number(self.successful_iterations)),
            Cell::new(format!(
                "{}/{}",
                self.successful_customer_iterations, self.total_customer_iterations
            )),
            Cell::new(format!("{}*", format_duration(self.total_elapsed_nanos))),
            Cell::new(format_metric(self.average_latency_ms, " ms")),
            Cell::new(format_metric(self.percent_failed, "% failed")),
        ]);

        format!(
            "{table}\n* Summed across tasks\n\n{}\n",
            self.summary()
        )
    }

    /// Markdown rendering of the report.
    pub fn format_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str("# Workload Results\n\n");
        output.push_str(&format!(
            "**Aggregated at:** {}\n\n",
            self.aggregated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str("## Summary\n\n");
        output.push_str(&format!("- **Tasks:** {}\n", self.tasks.len()));
        output.push_str(&format!(
            "- **Iterations:** {} ({} succeeded)\n",
            format_number(self.total_iterations),
            format_number(self.successful_iterations)
        ));
        output.push_str(&format!(
            "- **Average Latency:** {}\n",
            format_metric(self.average_latency_ms, " ms")
        ));
        output.push_str(&format!(
            "- **Throughput:** {}\n",
            format_metric(self.throughput_per_sec, " interactions/s")
        ));
        output.push_str(&format!(
            "- **Customer Interactions:** {}\n",
            format_metric(self.percent_customer, "%")
        ));
        output.push_str(&format!(
            "- **Failed Interactions:** {}\n\n",
            format_metric(self.percent_failed, "%")
        ));

        output.push_str("## Task Details\n\n");
        output.push_str("| Task | Iterations | Succeeded | Customer | Elapsed | Avg latency |\n");
        output.push_str("|------|------------|-----------|----------|---------|-------------|\n");
        for result in &self.tasks {
            output.push_str(&format!(
                "| {} | {} | {} | {}/{} | {} | {} |\n",
                result.task,
                format_number(result.total_iterations),
                format_number(result.successful_iterations),
                result.successful_customer_iterations,
                result.total_customer_iterations,
                format_duration(result.measured_elapsed_nanos),
                task_latency(result),
            ));
        }

        output
    }
}

fn task_latency(result: &RunResult) -> String {
    let latency = (result.successful_iterations > 0).then(|| {
        result.measured_elapsed_nanos as f64
            / result.successful_iterations as f64
            / NANOS_PER_MILLI
    });
    format_metric(latency, " ms")
}

/// Two-decimal rendering of a derived metric, `n/a` when undefined.
fn format_metric(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.2}{unit}"),
        None => "n/a".to_string(),
    }
}

fn format_duration(nanos: u64) -> String {
    let secs = nanos as f64 / NANOS_PER_SEC;
    if secs < 1.0 {
        format!("{:.1}ms", nanos as f64 / NANOS_PER_MILLI)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs - (mins * 60.0);
        format!("{}m {:02.0}s", mins as u64, remaining_secs)
    }
}

/// Format number with thousands separators.
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}
