//! # ScaffRS Structure Report
//!
//! File: cli/src/analysis/report.rs
//!
//! Bundles the three engine results for one layout. The report is what the
//! `layout` commands print and what the boilerplate generator consumes.
//!
use crate::analysis::analyzer::{analyze, Metrics};
use crate::analysis::complexity::{score, ComplexityReport};
use crate::analysis::preferences::Preferences;
use crate::analysis::tree::TreeNode;
use crate::analysis::workflow::{classify, WorkflowRecommendation};
use crate::core::config::ScoringConfig;
use crate::core::error::ScaffError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureReport {
    pub project_name: String,
    pub team_size: Option<u32>,
    pub preferences: Preferences,
    pub metrics: Metrics,
    pub workflows: Vec<WorkflowRecommendation>,
    pub complexity: ComplexityReport,
}

impl StructureReport {
    /// The highest-ranked recommendation.
    pub fn primary_workflow(&self) -> &WorkflowRecommendation {
        // `classify` never returns an empty list.
        &self.workflows[0]
    }

    pub fn runners_up(&self) -> &[WorkflowRecommendation] {
        self.workflows.get(1..).unwrap_or_default()
    }
}

/// Runs the analyzer, then the classifier and scorer on its metrics.
pub fn build_report(
    root: &TreeNode,
    team_size: Option<u32>,
    preferences: &Preferences,
    limits: &ScoringConfig,
) -> Result<StructureReport, ScaffError> {
    let metrics = analyze(root, preferences)?;
    let workflows = classify(&metrics, team_size, preferences);
    let complexity = score(&metrics, limits);

    Ok(StructureReport {
        project_name: root.name().to_string(),
        team_size,
        preferences: preferences.clone(),
        metrics,
        workflows,
        complexity,
    })
}
