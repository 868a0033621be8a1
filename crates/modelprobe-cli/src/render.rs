//! Console rendering of progress and the final summary.

use std::fmt::Write;

use modelprobe_core::{BatchReport, ProbeResult, ProbeTask};
use modelprobe_runner::ProgressSink;

/// Rows in the fastest-combinations table.
const TOP_FASTEST: usize = 10;
/// Entries in the suggested provider priority list.
const TOP_PROVIDERS: usize = 7;
/// Entries in the suggested model fallback list.
const TOP_MODELS: usize = 4;

/// Progress sink that prints one line per completed probe.
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn on_default(&self, result: &ProbeResult) {
        println!("{}", format_default(result));
        println!();
    }

    fn on_result(&self, result: &ProbeResult) {
        println!("{}", format_result_line(result));
    }

    fn on_progress(&self, completed: usize, total: usize) {
        println!("   Progress: {completed}/{total}");
    }

    fn on_deadline(&self, abandoned: &[ProbeTask]) {
        print!("{}", format_abandoned(abandoned));
    }
}

/// Warning block listing probes cut off by the batch deadline.
pub fn format_abandoned(abandoned: &[ProbeTask]) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "⚠️  Batch deadline reached, {} probes abandoned:",
        abandoned.len()
    )
    .ok();
    for task in abandoned {
        writeln!(out, "   - {} + {}", task.display_provider(), task.model).ok();
    }
    out
}

pub fn format_default(result: &ProbeResult) -> String {
    let detail = result
        .response_preview
        .as_deref()
        .or(result.error_message.as_deref())
        .unwrap_or("");
    format!("🧪 Default probe ({}): {} {}", result.model, result.status, detail)
        .trim_end()
        .to_string()
}

pub fn format_result_line(result: &ProbeResult) -> String {
    if result.is_success() {
        format!(
            "✅ {} + {}: {:.2}s - {}",
            result.provider_name,
            result.model,
            result.latency(),
            result.response_preview.as_deref().unwrap_or("")
        )
    } else {
        let line = format!(
            "❌ {} + {}: {}",
            result.provider_name, result.model, result.status
        );
        match result.error_message.as_deref() {
            Some(message) => format!("{line} - {message}"),
            None => line,
        }
    }
}

/// Ranked summary printed after the batch.
pub fn format_summary(report: &BatchReport) -> String {
    let mut out = String::new();

    writeln!(out, "📊 RESULTS:").ok();
    writeln!(out, "{}", "=".repeat(50)).ok();
    writeln!(
        out,
        "Tested: {}  Collected: {}  Abandoned: {}  Success rate: {:.1}%",
        report.total_tasks,
        report.all_results.len(),
        report.abandoned_tasks(),
        report.success_rate
    )
    .ok();

    if !report.has_success() {
        writeln!(out, "❌ No working combination found!").ok();
        if report.default_probe_result.is_success() {
            writeln!(
                out,
                "💡 The default probe works - call without naming a provider."
            )
            .ok();
        }
        return out;
    }

    writeln!(
        out,
        "✅ Working combinations: {}",
        report.successful_results.len()
    )
    .ok();
    writeln!(out).ok();

    writeln!(out, "🏆 TOP {TOP_FASTEST} FASTEST:").ok();
    for (i, result) in report.fastest(TOP_FASTEST).iter().enumerate() {
        writeln!(
            out,
            "{:2}. {:20} + {:15} ({:4.1}s)",
            i + 1,
            result.provider_name,
            result.model,
            result.latency()
        )
        .ok();
    }

    writeln!(out).ok();
    writeln!(out, "priority_providers = [").ok();
    for (name, secs) in report.priority_providers(TOP_PROVIDERS) {
        writeln!(out, "    \"{name}\",  # {secs}s").ok();
    }
    writeln!(out, "]").ok();

    writeln!(out).ok();
    writeln!(out, "models_fallback = [").ok();
    for tally in report.fallback_models(TOP_MODELS) {
        writeln!(
            out,
            "    \"{}\",  # works with {} providers",
            tally.model, tally.count
        )
        .ok();
    }
    writeln!(out, "]").ok();

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelprobe_core::{aggregate, ProviderHandle};

    fn task(provider: &str, model: &str) -> ProbeTask {
        ProbeTask::new(provider, ProviderHandle::new("http://x.test"), model)
    }

    #[test]
    fn test_result_lines() {
        let ok = ProbeResult::from_response(&task("P1", "gpt-4"), 1.2, "I am fine");
        assert_eq!(format_result_line(&ok), "✅ P1 + gpt-4: 1.20s - I am fine");

        let err = ProbeResult::error(&task("P2", "gpt-4"), 0.1, "rate limited");
        assert_eq!(format_result_line(&err), "❌ P2 + gpt-4: ERROR - rate limited");

        let timeout = ProbeResult::timeout(&task("P3", "gpt-4"));
        assert_eq!(format_result_line(&timeout), "❌ P3 + gpt-4: TIMEOUT");
    }

    #[test]
    fn test_default_line() {
        let default = ProbeTask::default_provider("gpt-3.5-turbo");

        let ok = ProbeResult::from_response(&default, 0.4, "hey");
        assert_eq!(format_default(&ok), "🧪 Default probe (gpt-3.5-turbo): SUCCESS hey");

        let err = ProbeResult::error(&default, 0.0, "no default provider configured");
        assert_eq!(
            format_default(&err),
            "🧪 Default probe (gpt-3.5-turbo): ERROR no default provider configured"
        );

        let timeout = ProbeResult::timeout(&default);
        assert_eq!(format_default(&timeout), "🧪 Default probe (gpt-3.5-turbo): TIMEOUT");
    }

    #[test]
    fn test_abandoned_block_lists_tasks_in_order() {
        let abandoned = vec![task("P2", "gpt-4"), task("P1", "gemini-pro")];
        assert_eq!(
            format_abandoned(&abandoned),
            "⚠️  Batch deadline reached, 2 probes abandoned:\n   - P2 + gpt-4\n   - P1 + gemini-pro\n"
        );
    }

    #[test]
    fn test_summary_lists_rankings() {
        let report = aggregate(
            ProbeResult::timeout(&ProbeTask::default_provider("gpt-3.5-turbo")),
            vec![
                ProbeResult::from_response(&task("Slow", "gpt-4"), 3.0, "hi"),
                ProbeResult::from_response(&task("Fast", "gpt-4"), 0.5, "hi"),
                ProbeResult::from_response(&task("Fast", "gemini-pro"), 0.9, "hi"),
            ],
            4,
        );
        let text = format_summary(&report);

        assert!(text.contains("Working combinations: 3"));
        let fast = text.find(" 1. Fast").unwrap();
        let slow = text.find(" 3. Slow").unwrap();
        assert!(fast < slow);
        assert!(text.contains("\"Fast\",  # 0.5s"));
        assert!(text.contains("\"gpt-4\",  # works with 2 providers"));
        assert!(text.contains("Success rate: 75.0%"));
    }

    #[test]
    fn test_summary_without_success_hints_default() {
        let report = aggregate(
            ProbeResult::from_response(&ProbeTask::default_provider("gpt-3.5-turbo"), 0.4, "yo"),
            vec![ProbeResult::error(&task("P1", "gpt-4"), 0.1, "down")],
            1,
        );
        let text = format_summary(&report);
        assert!(text.contains("No working combination found"));
        assert!(text.contains("default probe works"));
    }
}
