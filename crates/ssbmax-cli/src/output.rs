//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use ssbmax_dashboard::ProcessedDashboardData;
use ssbmax_domain::{EntryType, Olq, OlqAnalysisResult, OlqCategory, ScoreRating};
use ssbmax_validator::{Recommendation, ValidationReport};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a processed dashboard.
    pub fn format_dashboard(&self, data: &ProcessedDashboardData) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
            OutputFormat::Table => Ok(self.format_dashboard_table(data)),
            OutputFormat::Quiet => Ok(data
                .overall_average_score
                .map(|avg| format!("{:.2}", avg))
                .unwrap_or_else(|| "-".to_string())),
        }
    }

    fn format_dashboard_table(&self, data: &ProcessedDashboardData) -> String {
        let dashboard = &data.dashboard;
        let mut lines = vec![format!(
            "Dashboard for {}: {}/{} tests completed ({:.1}%)",
            dashboard.user_id,
            dashboard.completed_tests_count(),
            dashboard.total_tests(),
            dashboard.progress_percentage()
        )];

        if let Some(oir) = &dashboard.phase1_results.oir_result {
            lines.push(format!(
                "OIR: {:.1}% ({:?})",
                oir.percentage_score,
                oir.grade()
            ));
        }

        if !data.has_scores() {
            lines.push(self.colorize("No OLQ scores yet.", "yellow"));
            return lines.join("\n");
        }

        if let Some(avg) = data.overall_average_score {
            lines.push(format!(
                "Overall average: {:.2} ({})",
                avg,
                ScoreRating::from_average(avg)
            ));
        }
        if data.cache_metadata.is_stale {
            lines.push(self.warning("Showing a stale snapshot; the latest refresh failed"));
        }

        let mut builder = Builder::default();
        builder.push_record(["OLQ", "Quality", "Factor", "Average", "Rating"]);
        for (olq, avg) in &data.average_olq_scores {
            builder.push_record([
                olq.abbreviation().to_string(),
                olq.display_name().to_string(),
                olq.category().factor_number().to_string(),
                format!("{:.2}", avg),
                self.rating_cell(*avg),
            ]);
        }
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        lines.push(table.to_string());

        lines.push(format!(
            "Strongest: {}",
            self.ranked_list(&data.top_olqs, "green")
        ));
        lines.push(format!(
            "Needs work: {}",
            self.ranked_list(&data.improvement_olqs, "red")
        ));

        lines.join("\n")
    }

    fn ranked_list(&self, ranked: &[(Olq, f64)], color: &str) -> String {
        let items: Vec<String> = ranked
            .iter()
            .map(|(olq, avg)| format!("{} ({:.1})", olq.display_name(), avg))
            .collect();
        self.colorize(&items.join(", "), color)
    }

    fn rating_cell(&self, average: f64) -> String {
        let rating = ScoreRating::from_average(average);
        let color = match rating {
            ScoreRating::Exceptional | ScoreRating::Excellent | ScoreRating::VeryGood => "green",
            ScoreRating::Good | ScoreRating::Average => "cyan",
            ScoreRating::BelowAverage | ScoreRating::Poor => "red",
        };
        self.colorize(rating.label(), color)
    }

    /// Format a validation report for an analysis result.
    pub fn format_report(
        &self,
        result: &OlqAnalysisResult,
        report: &ValidationReport,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "analysis": result,
                "validation": report,
            }))?),
            OutputFormat::Table => Ok(self.format_report_table(result, report)),
            OutputFormat::Quiet => Ok(recommendation_key(report.recommendation_result.recommendation)
                .to_string()),
        }
    }

    fn format_report_table(&self, result: &OlqAnalysisResult, report: &ValidationReport) -> String {
        let mut lines = vec![
            format!(
                "{} submission {}: overall {:.2} ({})",
                result.test_type().label(),
                result.submission_id(),
                result.overall_score(),
                result.overall_rating()
            ),
            format!(
                "Limitations: {} of max {} for {}",
                report.limitation_result.count,
                report.entry_type.max_limitations(),
                report.entry_type
            ),
        ];

        let mut builder = Builder::default();
        builder.push_record(["Factor", "Name", "Average", "Spread", "Consistent"]);
        for (category, avg) in &report.factor_averages {
            let detail = report.consistency_result.details.get(category);
            let spread = detail
                .map(|d| d.variation.to_string())
                .unwrap_or_else(|| "-".to_string());
            let consistent = match detail {
                Some(d) if !d.is_consistent => self.colorize("no", "red"),
                Some(_) => "yes".to_string(),
                None => "-".to_string(),
            };
            builder.push_record([
                category.factor_number().to_string(),
                category.factor_name().to_string(),
                format!("{:.2}", avg),
                spread,
                consistent,
            ]);
        }
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        lines.push(table.to_string());

        if !result.strengths().is_empty() {
            lines.push(format!("Strengths: {}", result.strengths().join(", ")));
        }
        if !result.weaknesses().is_empty() {
            lines.push(format!("Weaknesses: {}", result.weaknesses().join(", ")));
        }

        let recommendation = report.recommendation_result.recommendation;
        let verdict = format!("Recommendation: {}", recommendation);
        lines.push(match recommendation {
            Recommendation::Recommended => self.success(&verdict),
            Recommendation::Doubtful => self.warning(&verdict),
            Recommendation::NotRecommended => self.error(&verdict),
        });
        for reason in &report.recommendation_result.reasons {
            lines.push(format!("  - {}", reason));
        }

        lines.join("\n")
    }

    /// Format the OLQ catalogue and limitation rules.
    pub fn format_rules(&self, critical_only: bool) -> Result<String> {
        let olqs: Vec<Olq> = Olq::ALL
            .iter()
            .copied()
            .filter(|o| !critical_only || o.is_critical())
            .collect();

        match self.format {
            OutputFormat::Json => {
                let qualities: Vec<serde_json::Value> = olqs
                    .iter()
                    .map(|o| {
                        serde_json::json!({
                            "key": o,
                            "name": o.display_name(),
                            "abbreviation": o.abbreviation(),
                            "factor": o.category().factor_number(),
                            "critical": o.is_critical(),
                        })
                    })
                    .collect();
                let factors: Vec<serde_json::Value> = OlqCategory::ALL
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "factor": c.factor_number(),
                            "name": c.factor_name(),
                            "max_tick_variation": c.max_tick_variation(),
                            "critical": c.is_critical_factor(),
                        })
                    })
                    .collect();
                let limits: serde_json::Map<String, serde_json::Value> = entry_types()
                    .iter()
                    .map(|e| (e.as_str().to_string(), e.max_limitations().into()))
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "qualities": qualities,
                    "factors": factors,
                    "max_limitations": limits,
                }))?)
            }
            OutputFormat::Quiet => Ok(olqs
                .iter()
                .map(|o| o.abbreviation())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["OLQ", "Quality", "Factor", "Critical"]);
                for olq in &olqs {
                    let category = olq.category();
                    builder.push_record([
                        olq.abbreviation().to_string(),
                        olq.display_name().to_string(),
                        format!("{} ({})", category.factor_number(), category.factor_name()),
                        if olq.is_critical() {
                            self.colorize("yes", "yellow")
                        } else {
                            String::new()
                        },
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let mut lines = vec![
                    table.to_string(),
                    "Scores run 1 (exceptional) to 10 (poor); 8 or above is a limitation."
                        .to_string(),
                ];
                for category in OlqCategory::ALL {
                    let mut line = format!(
                        "Factor {} ({}): scores within ±{}",
                        category.factor_number(),
                        category.factor_name(),
                        category.max_tick_variation()
                    );
                    if category.is_critical_factor() {
                        line.push_str("; an average at limitation is an automatic rejection");
                    }
                    lines.push(line);
                }
                for entry in entry_types() {
                    lines.push(format!(
                        "{}: at most {} limitation(s)",
                        entry,
                        entry.max_limitations()
                    ));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn entry_types() -> [EntryType; 3] {
    [EntryType::Nda, EntryType::Ota, EntryType::Graduate]
}

/// Machine-readable recommendation name.
pub fn recommendation_key(recommendation: Recommendation) -> &'static str {
    match recommendation {
        Recommendation::Recommended => "RECOMMENDED",
        Recommendation::Doubtful => "DOUBTFUL",
        Recommendation::NotRecommended => "NOT_RECOMMENDED",
    }
}
