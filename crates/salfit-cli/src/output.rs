//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use salfit_domain::{relative_error, ErrorBounds, StatType, Statistics, StatisticsDataset};
use salfit_search::{Affine, Evaluation, Parameters, SearchMetrics};
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
#[derive(Debug, Clone)]
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

    /// Format fitted curves with their evaluation against `reference`.
    pub fn format_fit(
        &self,
        parameters: &Parameters,
        evaluation: &Evaluation,
        reference: &StatisticsDataset,
        metrics: Option<&SearchMetrics>,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_fit_json(parameters, evaluation, reference, metrics),
            OutputFormat::Table => self.format_fit_table(parameters, evaluation, reference, metrics),
            OutputFormat::Quiet => Ok(format!("{:.6}", evaluation.score.max())),
        }
    }

    /// Format fit results as JSON.
    fn format_fit_json(
        &self,
        parameters: &Parameters,
        evaluation: &Evaluation,
        reference: &StatisticsDataset,
        metrics: Option<&SearchMetrics>,
    ) -> Result<String> {
        let curve = |c: &Affine| {
            json!({
                "slope": c.slope,
                "intercept": c.intercept,
                "start": c.start(),
                "end": c.end()
            })
        };
        let mut output = json!({
            "parameters": {
                "q1": curve(&parameters.q1),
                "mean": curve(&parameters.mean),
                "q3": curve(&parameters.q3)
            },
            "score": evaluation.summary(),
            "profiles": profiles_json(evaluation, reference)
        });
        if let Some(metrics) = metrics {
            output["metrics"] = metrics_json(metrics);
        }

        Ok(serde_json::to_string_pretty(&output)?)
    }

    /// Format fit results as tables.
    fn format_fit_table(
        &self,
        parameters: &Parameters,
        evaluation: &Evaluation,
        reference: &StatisticsDataset,
        metrics: Option<&SearchMetrics>,
    ) -> Result<String> {
        let mut curves = Builder::default();
        curves.push_record(["Statistic", "Slope", "Intercept", "Start", "End"]);
        for stat in StatType::ALL {
            let curve = parameters.curve(stat);
            curves.push_record([
                stat.to_string(),
                format!("{:.4}", curve.slope),
                format!("{:.4}", curve.intercept),
                format!("{:.3}", curve.start()),
                format!("{:.3}", curve.end()),
            ]);
        }

        let mut lines = vec![styled(curves)];
        lines.extend(self.evaluation_lines(evaluation, reference, metrics)?);
        Ok(lines.join("\n"))
    }

    /// Format a reference-factor fit with its evaluation against `reference`.
    pub fn format_baseline(
        &self,
        factor: f64,
        evaluation: &Evaluation,
        reference: &StatisticsDataset,
        metrics: Option<&SearchMetrics>,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut output = json!({
                    "factor": factor,
                    "score": evaluation.summary(),
                    "profiles": profiles_json(evaluation, reference)
                });
                if let Some(metrics) = metrics {
                    output["metrics"] = metrics_json(metrics);
                }
                Ok(serde_json::to_string_pretty(&output)?)
            }
            OutputFormat::Table => {
                let mut lines = vec![self.colorize(&format!("Reference x {:.6}", factor), "cyan")];
                lines.extend(self.evaluation_lines(evaluation, reference, metrics)?);
                Ok(lines.join("\n"))
            }
            OutputFormat::Quiet => Ok(format!("{:.6} {:.6}", factor, evaluation.score.max())),
        }
    }

    /// Per-profile error table, score envelopes and optional metrics.
    fn evaluation_lines(
        &self,
        evaluation: &Evaluation,
        reference: &StatisticsDataset,
        metrics: Option<&SearchMetrics>,
    ) -> Result<Vec<String>> {
        let mut profiles = Builder::default();
        profiles.push_record(["Profile", "Statistic", "Reference", "Simulated", "Error"]);
        for (profile, target) in reference.iter() {
            let Some(simulated) = evaluation.measured.get(profile) else {
                continue;
            };
            for stat in StatType::ALL {
                let error = relative_error(simulated.get(stat), target.get(stat))?;
                profiles.push_record([
                    profile.to_string(),
                    stat.to_string(),
                    format!("{:.3}", target.get(stat)),
                    format!("{:.3}", simulated.get(stat)),
                    format!("{:.2}%", 100.0 * error),
                ]);
            }
        }

        let mut lines = vec![
            styled(profiles),
            self.colorize(&format!("Score: {}", evaluation.score), "cyan"),
            StatType::ALL
                .iter()
                .map(|stat| format!("{} {}", stat, evaluation.bounds(*stat)))
                .collect::<Vec<_>>()
                .join("  "),
        ];
        if let Some(metrics) = metrics {
            lines.push(String::new());
            lines.push(metrics.summary());
        }
        Ok(lines)
    }

    /// Format a reference dataset.
    pub fn format_reference(&self, reference: &StatisticsDataset) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let profiles: Vec<serde_json::Value> = reference
                    .iter()
                    .map(|(profile, stats)| {
                        json!({
                            "seniority": profile.seniority.to_string(),
                            "experience": profile.experience.to_string(),
                            "q1": stats.q1,
                            "mean": stats.mean,
                            "q3": stats.q3
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&profiles)?)
            }
            OutputFormat::Table => {
                if reference.is_empty() {
                    return Ok(self.colorize("No profiles found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Seniority", "Experience", "Q1", "Mean", "Q3"]);
                for (profile, stats) in reference.iter() {
                    builder.push_record([
                        profile.seniority.to_string(),
                        profile.experience.to_string(),
                        format!("{:.3}", stats.q1),
                        format!("{:.3}", stats.mean),
                        format!("{:.3}", stats.q3),
                    ]);
                }
                Ok(styled(builder))
            }
            OutputFormat::Quiet => Ok(reference
                .iter()
                .map(|(profile, stats)| {
                    format!(
                        "{} {} {} {} {}",
                        profile.seniority, profile.experience, stats.q1, stats.mean, stats.q3
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a new best solution found during a search.
    pub fn improvement(&self, iteration: usize, score: &ErrorBounds, parameters: &Parameters) -> String {
        self.colorize(&format!("#{:<6} {}  {}", iteration, score, parameters), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn profiles_json(evaluation: &Evaluation, reference: &StatisticsDataset) -> Vec<serde_json::Value> {
    let stats = |s: &Statistics| json!({ "q1": s.q1, "mean": s.mean, "q3": s.q3 });
    reference
        .iter()
        .map(|(profile, target)| {
            json!({
                "seniority": profile.seniority.to_string(),
                "experience": profile.experience.to_string(),
                "reference": stats(target),
                "simulated": evaluation.measured.get(profile).map(|s| stats(s))
            })
        })
        .collect()
}

fn metrics_json(metrics: &SearchMetrics) -> serde_json::Value {
    json!({
        "iterations": metrics.iterations,
        "improvements": metrics.improvements,
        "last_improvement": metrics.last_improvement,
        "sink_failures": metrics.sink_failures,
        "total_runtime_secs": metrics.total_runtime_secs
    })
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use salfit_domain::{Interval, Profile};
    use salfit_search::{ModelFactory, MonteCarloEvaluator};

    fn reference() -> StatisticsDataset {
        [(
            Profile::new(Interval::new(0, 1), Interval::single(1)),
            Statistics::new(29.731, 34.062, 38.942),
        )]
        .into_iter()
        .collect()
    }

    fn evaluation() -> (Parameters, Evaluation) {
        let parameters = Parameters::new(
            Affine::from_slope_intercept(0.0, 29.7),
            Affine::from_slope_intercept(0.0, 34.0),
            Affine::from_slope_intercept(0.0, 38.9),
        );
        let model = ModelFactory::from_reference(&reference()).create("test", parameters);
        let evaluation = MonteCarloEvaluator::new(reference(), 0, 200)
            .unwrap()
            .evaluate(&model)
            .unwrap();
        (parameters, evaluation)
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let (parameters, evaluation) = evaluation();
        let metrics = SearchMetrics::new();
        let output = formatter
            .format_fit(&parameters, &evaluation, &reference(), Some(&metrics))
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["parameters"]["q1"]["intercept"], 29.7);
        assert_eq!(value["profiles"][0]["seniority"], "0-1");
        assert_eq!(value["metrics"]["iterations"], 0);
        assert!(value["score"]["max_error"].as_f64().unwrap() >= 0.0);
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let (parameters, evaluation) = evaluation();
        let output = formatter.format_fit(&parameters, &evaluation, &reference(), None).unwrap();
        assert_eq!(output, format!("{:.6}", evaluation.score.max()));
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let (parameters, evaluation) = evaluation();
        let output = formatter.format_fit(&parameters, &evaluation, &reference(), None).unwrap();
        assert!(output.contains("Intercept"));
        assert!(output.contains("Simulated"));
        assert!(output.contains("(sen=0-1, exp=1)"));
        assert!(output.contains("Score: ["));
    }

    #[test]
    fn test_reference_formats() {
        let table = Formatter::new(OutputFormat::Table, false)
            .format_reference(&reference())
            .unwrap();
        assert!(table.contains("Seniority"));
        assert!(table.contains("34.062"));

        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .format_reference(&reference())
            .unwrap();
        assert_eq!(quiet, "0-1 1 29.731 34.062 38.942");

        let empty = Formatter::new(OutputFormat::Table, false)
            .format_reference(&StatisticsDataset::new())
            .unwrap();
        assert!(empty.contains("No profiles found"));
    }

    #[test]
    fn test_baseline_formats() {
        let (_, evaluation) = evaluation();

        let json = Formatter::new(OutputFormat::Json, false)
            .format_baseline(1.25, &evaluation, &reference(), None)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["factor"], 1.25);
        assert_eq!(value["profiles"][0]["experience"], "1");
        assert!(value.get("metrics").is_none());

        let table = Formatter::new(OutputFormat::Table, false)
            .format_baseline(1.25, &evaluation, &reference(), None)
            .unwrap();
        assert!(table.starts_with("Reference x 1.250000"));
        assert!(table.contains("Simulated"));

        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .format_baseline(1.25, &evaluation, &reference(), None)
            .unwrap();
        assert_eq!(quiet, format!("1.250000 {:.6}", evaluation.score.max()));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.info("test"), "ℹ test");
    }
}
