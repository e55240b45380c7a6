//! Output formatting for the CLI.

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use colored::*;
use eqip_domain::{Attribution, OwnershipArrangement};
use eqip_pipeline::PipelineOutcome;
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

    /// Format an attribution.
    pub fn format_attribution(&self, attribution: &Attribution) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(attribution)?),
            OutputFormat::Table => Ok(self.attribution_table(attribution)),
            OutputFormat::Quiet => Ok(attribution
                .attributions
                .iter()
                .map(|a| format!("{}\t{:.6}", a.contributor_email, a.weight))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format an ownership arrangement.
    pub fn format_arrangement(&self, arrangement: &OwnershipArrangement) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(arrangement)?),
            OutputFormat::Table => Ok(self.arrangement_table(arrangement)),
            OutputFormat::Quiet => Ok(Self::arrangement_quiet(arrangement)),
        }
    }

    /// Format a full pipeline run.
    pub fn format_outcome(&self, outcome: &PipelineOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
            OutputFormat::Table => Ok(format!(
                "{}\n\n{}\n\n{}",
                self.info(&format!("Run {}", outcome.run_id)),
                self.attribution_table(&outcome.attribution),
                self.arrangement_table(&outcome.arrangement)
            )),
            OutputFormat::Quiet => Ok(Self::arrangement_quiet(&outcome.arrangement)),
        }
    }

    /// Format the effective configuration.
    pub fn format_config(&self, config: &Config) -> Result<String> {
        let toml = config.to_toml()?;
        match (&self.format, &config.source) {
            (OutputFormat::Table, Some(path)) => Ok(format!(
                "{}\n\n{}",
                self.info(&format!("Loaded from {}", path.display())),
                toml
            )),
            _ => Ok(toml),
        }
    }

    fn attribution_table(&self, attribution: &Attribution) -> String {
        if attribution.attributions.is_empty() {
            return self.colorize("No contributors provided.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Contributor", "Email", "Weight", "Rationale"]);

        for a in &attribution.attributions {
            builder.push_record([
                a.contributor_name.clone(),
                a.contributor_email.clone(),
                format!("{:.4}", a.weight),
                a.rationale.clone(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut lines = vec![
            table.to_string(),
            format!("Methodology: {}", attribution.methodology),
            format!("Confidence: {:.2}", attribution.confidence_score),
        ];
        lines.extend(attribution.warnings.iter().map(|w| self.warning(w)));
        lines.join("\n")
    }

    fn arrangement_table(&self, arrangement: &OwnershipArrangement) -> String {
        if arrangement.ownership_table.is_empty() {
            return self.colorize(&arrangement.governance_summary, "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Contributor", "Email", "Shares", "Percentage", "Governance"]);

        for share in &arrangement.ownership_table {
            builder.push_record([
                share.contributor_name.clone(),
                share.contributor_email.clone(),
                share.shares.to_string(),
                format!("{:.2}%", share.percentage),
                share.governance_rights.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut lines = vec![
            table.to_string(),
            format!(
                "Policy: {} | Total shares: {}",
                arrangement.policy_applied, arrangement.total_shares
            ),
            arrangement.governance_summary.clone(),
        ];
        lines.extend(arrangement.warnings.iter().map(|w| self.warning(w)));
        lines.join("\n")
    }

    fn arrangement_quiet(arrangement: &OwnershipArrangement) -> String {
        arrangement
            .ownership_table
            .iter()
            .map(|s| format!("{}\t{}", s.contributor_email, s.shares))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
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
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
