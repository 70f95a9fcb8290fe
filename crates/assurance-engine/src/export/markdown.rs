use crate::report::ComplianceReport;
use crate::risk::{RiskClassification, RiskSummary};
use crate::scoring::{AggregateScore, OutcomeAssessment, ScoreStatus};
use std::fmt::Write as _;

pub struct MarkdownExporter;

impl MarkdownExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export_report(&self, report: &ComplianceReport) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "# Compliance Report: {}\n", report.project_id);
        let _ = writeln!(output, "- **Profile**: {}", report.profile);
        let _ = writeln!(
            output,
            "- **Generated**: {}",
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        );
        let _ = writeln!(output, "- **Overall**: {}", describe(&report.overall));
        output.push('\n');

        if report.overall.status() == ScoreStatus::NotApplicable {
            output.push_str("*No outcomes apply under this profile.*\n");
            return output;
        }

        let failed = report.failed_outcomes();
        if !failed.is_empty() {
            let _ = writeln!(
                output,
                "**Negative indicators raised on**: {}\n",
                failed.join(", ")
            );
        }

        for objective in &report.objectives {
            let _ = writeln!(
                output,
                "## {} {}: {}\n",
                objective.objective_id,
                objective.title,
                describe(&objective.score)
            );
            output.push_str("| Principle | Status | Answered | Compliant | Questions |\n");
            output.push_str("|-----------|--------|----------|-----------|-----------|\n");
            for principle in &objective.principles {
                let s = &principle.score;
                let _ = writeln!(
                    output,
                    "| {} {} | {} | {} | {} | {} |",
                    principle.principle_id,
                    escape(&principle.name),
                    describe(s),
                    s.answered,
                    s.compliant,
                    s.total
                );
            }
            output.push('\n');

            for outcome in objective.outcomes() {
                let _ = writeln!(output, "- {}", outcome_line(outcome));
            }
            output.push('\n');
        }

        output
    }

    pub fn export_risks(&self, classifications: &[RiskClassification<'_>]) -> String {
        let mut output = String::new();

        output.push_str("# Risk Register\n\n");

        if classifications.is_empty() {
            output.push_str("*No risks recorded.*\n");
            return output;
        }

        let summary = RiskSummary::from_classifications(classifications);
        output.push_str("## Summary\n\n");
        let _ = writeln!(output, "- **Total Risks**: {}", summary.total);
        let _ = writeln!(output, "- **In Tolerance**: {}", summary.counts.in_tolerance);
        let _ = writeln!(
            output,
            "- **Out of Tolerance**: {}\n",
            summary.counts.out_of_tolerance
        );

        output.push_str("## Risks\n\n");
        output.push_str("| Status | Impact Type | Rating | Appetite | Statement |\n");
        output.push_str("|--------|-------------|--------|----------|-----------|\n");
        for c in classifications {
            let rating = match c.modified_rating {
                Some(modified) => format!("{} (was {})", modified, c.base_rating),
                None => c.rating.to_string(),
            };
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} |",
                c.status(),
                escape(&c.risk.impact_type),
                rating,
                c.appetite.map(|a| a.label()).unwrap_or("Not set"),
                escape(&c.risk.statement)
            );
        }
        output.push('\n');

        output
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(score: &AggregateScore) -> String {
    let mut text = score.status().to_string();
    if score.has_failed {
        text.push_str(" (failed)");
    }
    text
}

fn outcome_line(outcome: &OutcomeAssessment) -> String {
    match outcome.score() {
        None => format!("{}: Not applicable", outcome.outcome_id()),
        Some(score) => {
            let mut line = format!(
                "{}: {} ({} required, {}/{} answered)",
                score.outcome_id,
                score.status(),
                score.required_level,
                score.answered,
                score.total
            );
            if score.has_failed {
                line.push_str(" - negative indicator raised");
            }
            line
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
