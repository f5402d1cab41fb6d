//! # ScaffRS Workflow Classifier
//!
//! File: cli/src/analysis/workflow.rs
//!
//! ## Overview
//!
//! Recommends git collaboration workflows for a layout. Classification is a
//! declarative vote: every entry of `RULES` names one workflow kind, a weight in
//! points and a predicate over `Signals`. The points of the rules that fire are
//! summed per kind and divided by that kind's total, giving a confidence in
//! `[0, 1]`.
//!
//! ## Ordering
//!
//! 1. A forcing preference (`fork`, `external-contributors`, `open-source`)
//!    puts Forking first with confidence 1.0.
//! 2. Otherwise by confidence, highest first.
//! 3. Ties go to the kind declared later in `WorkflowKind`.
//!
//! Kinds that received no votes are omitted. When nothing fires at all, a
//! single low-confidence Centralized recommendation is returned, so the result
//! is never empty.
//!
use crate::analysis::analyzer::Metrics;
use crate::analysis::preferences::Preferences;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

/// Confidence of the fallback recommendation when no rule fires.
pub const DEFAULT_CONFIDENCE: f64 = 0.1;

/// The seven supported workflows, in ascending tie-break priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowKind {
    Centralized,
    FeatureBranch,
    TrunkBased,
    Gitflow,
    Monorepo,
    Forking,
    Multirepo,
}

impl WorkflowKind {
    pub const ALL: [WorkflowKind; 7] = [
        WorkflowKind::Centralized,
        WorkflowKind::FeatureBranch,
        WorkflowKind::TrunkBased,
        WorkflowKind::Gitflow,
        WorkflowKind::Monorepo,
        WorkflowKind::Forking,
        WorkflowKind::Multirepo,
    ];

    /// Stable identifier used in JSON output and templates.
    pub fn key(self) -> &'static str {
        match self {
            WorkflowKind::Centralized => "centralized",
            WorkflowKind::FeatureBranch => "feature-branch",
            WorkflowKind::TrunkBased => "trunk-based",
            WorkflowKind::Gitflow => "gitflow",
            WorkflowKind::Monorepo => "monorepo",
            WorkflowKind::Forking => "forking",
            WorkflowKind::Multirepo => "multirepo",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            WorkflowKind::Centralized => "Centralized Workflow",
            WorkflowKind::FeatureBranch => "Feature Branch Workflow",
            WorkflowKind::TrunkBased => "Trunk-Based Development",
            WorkflowKind::Gitflow => "Gitflow Workflow",
            WorkflowKind::Monorepo => "Monorepo Workflow",
            WorkflowKind::Forking => "Forking Workflow",
            WorkflowKind::Multirepo => "Multirepo Workflow",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WorkflowKind::Centralized => {
                "Everyone commits to a single main branch. Suited to small teams and small codebases."
            }
            WorkflowKind::FeatureBranch => {
                "Each change is developed on its own branch and merged to main through a reviewed pull request."
            }
            WorkflowKind::TrunkBased => {
                "Developers integrate small, frequent changes into main behind automated tests; branches live for hours, not weeks."
            }
            WorkflowKind::Gitflow => {
                "Long-lived main and develop branches with feature, release and hotfix branches for scheduled releases."
            }
            WorkflowKind::Monorepo => {
                "Several apps or packages share one repository, with path-scoped ownership and CI."
            }
            WorkflowKind::Forking => {
                "Contributors push to personal forks and open pull requests against the upstream repository."
            }
            WorkflowKind::Multirepo => {
                "Each independent project lives in its own repository with its own release cycle."
            }
        }
    }

    /// Day-to-day steps rendered into CONTRIBUTING.md.
    pub fn branching_steps(self) -> &'static [&'static str] {
        match self {
            WorkflowKind::Centralized => &[
                "Pull the latest `main` before starting work.",
                "Commit small, focused changes directly on `main`.",
                "Rebase on `origin/main` and push.",
            ],
            WorkflowKind::FeatureBranch => &[
                "Create a branch from `main`: `git checkout -b feature/<name>`.",
                "Commit and push the branch.",
                "Open a pull request and request review.",
                "Merge once CI passes and the review is approved.",
            ],
            WorkflowKind::TrunkBased => &[
                "Pull `main` and create a short-lived branch (or commit directly for tiny changes).",
                "Keep changes small and hide unfinished work behind feature flags.",
                "Merge to `main` at least daily once the test suite passes.",
            ],
            WorkflowKind::Gitflow => &[
                "Branch features from `develop`: `git checkout -b feature/<name> develop`.",
                "Merge finished features back into `develop` through a pull request.",
                "Cut `release/<version>` from `develop` for stabilisation.",
                "Merge releases into `main` and tag them; branch hotfixes from `main`.",
            ],
            WorkflowKind::Monorepo => &[
                "Branch from `main` and limit each change to the packages it concerns.",
                "Run the affected packages' tests locally.",
                "Open a pull request; path owners review their areas.",
            ],
            WorkflowKind::Forking => &[
                "Fork the repository and clone your fork.",
                "Add the upstream remote: `git remote add upstream <url>`.",
                "Create a feature branch, commit and push it to your fork.",
                "Open a pull request against upstream `main`.",
            ],
            WorkflowKind::Multirepo => &[
                "Clone only the repository you are changing.",
                "Follow that repository's own branching model.",
                "Version and publish shared interfaces before consumers upgrade.",
            ],
        }
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One ranked recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowRecommendation {
    pub kind: WorkflowKind,
    pub confidence: f64,
    /// The signals that contributed, in rule-table order.
    pub rationale: Vec<String>,
}

/// Everything a rule may inspect.
pub struct Signals<'a> {
    pub metrics: &'a Metrics,
    pub team_size: Option<u32>,
}

/// A weighted vote for one workflow kind.
pub struct Rule {
    pub name: &'static str,
    pub kind: WorkflowKind,
    /// Points; the points of each kind sum to 100.
    pub weight: u32,
    pub rationale: &'static str,
    pub applies: fn(&Signals) -> bool,
}

pub const RULES: &[Rule] = &[
    // Centralized
    Rule {
        name: "small-codebase",
        kind: WorkflowKind::Centralized,
        weight: 35,
        rationale: "15 files or fewer",
        applies: small_codebase,
    },
    Rule {
        name: "shallow-layout",
        kind: WorkflowKind::Centralized,
        weight: 25,
        rationale: "directory nesting of 2 or less",
        applies: shallow_layout,
    },
    Rule {
        name: "no-ci",
        kind: WorkflowKind::Centralized,
        weight: 25,
        rationale: "no CI configuration",
        applies: no_ci,
    },
    Rule {
        name: "solo-team",
        kind: WorkflowKind::Centralized,
        weight: 15,
        rationale: "team of one or two",
        applies: solo_team,
    },
    // Feature branch
    Rule {
        name: "ci-and-tests",
        kind: WorkflowKind::FeatureBranch,
        weight: 40,
        rationale: "CI configuration and a tests folder",
        applies: ci_and_tests,
    },
    Rule {
        name: "collaborative-team",
        kind: WorkflowKind::FeatureBranch,
        weight: 35,
        rationale: "team larger than five, or unspecified with CI and tests",
        applies: collaborative_team,
    },
    Rule {
        name: "reviewable-size",
        kind: WorkflowKind::FeatureBranch,
        weight: 10,
        rationale: "tested codebase under 100 files",
        applies: reviewable_size,
    },
    Rule {
        name: "tested-moderate-depth",
        kind: WorkflowKind::FeatureBranch,
        weight: 15,
        rationale: "tests folder with moderate nesting (2 to 5 levels)",
        applies: tested_moderate_depth,
    },
    // Trunk based
    Rule {
        name: "ci-and-tests",
        kind: WorkflowKind::TrunkBased,
        weight: 40,
        rationale: "CI configuration and a tests folder",
        applies: ci_and_tests,
    },
    Rule {
        name: "small-team",
        kind: WorkflowKind::TrunkBased,
        weight: 40,
        rationale: "team of five or fewer",
        applies: small_team,
    },
    Rule {
        name: "tested-moderate-depth",
        kind: WorkflowKind::TrunkBased,
        weight: 20,
        rationale: "tests folder with moderate nesting (2 to 5 levels)",
        applies: tested_moderate_depth,
    },
    // Gitflow
    Rule {
        name: "large-codebase",
        kind: WorkflowKind::Gitflow,
        weight: 30,
        rationale: "100 files or more",
        applies: large_codebase,
    },
    Rule {
        name: "deep-hierarchy",
        kind: WorkflowKind::Gitflow,
        weight: 20,
        rationale: "nesting of 6 levels or more",
        applies: deep_hierarchy,
    },
    Rule {
        name: "enterprise-hygiene",
        kind: WorkflowKind::Gitflow,
        weight: 35,
        rationale: "docs, tests and CI all present",
        applies: enterprise_hygiene,
    },
    Rule {
        name: "many-directories",
        kind: WorkflowKind::Gitflow,
        weight: 15,
        rationale: "20 directories or more",
        applies: many_directories,
    },
    // Monorepo
    Rule {
        name: "workspace-container",
        kind: WorkflowKind::Monorepo,
        weight: 35,
        rationale: "top-level apps/packages/services container",
        applies: workspace_container,
    },
    Rule {
        name: "multiple-product-areas",
        kind: WorkflowKind::Monorepo,
        weight: 40,
        rationale: "3 or more top-level areas across 15 or more directories",
        applies: multiple_product_areas,
    },
    Rule {
        name: "large-codebase",
        kind: WorkflowKind::Monorepo,
        weight: 25,
        rationale: "100 files or more",
        applies: large_codebase,
    },
    // Multirepo
    Rule {
        name: "repeated-project-skeletons",
        kind: WorkflowKind::Multirepo,
        weight: 60,
        rationale: "2 or more top-level directories shaped like standalone projects",
        applies: repeated_skeletons,
    },
    Rule {
        name: "skeletons-dominate",
        kind: WorkflowKind::Multirepo,
        weight: 25,
        rationale: "project skeletons make up most top-level areas",
        applies: skeletons_dominate,
    },
    Rule {
        name: "no-shared-manifest",
        kind: WorkflowKind::Multirepo,
        weight: 15,
        rationale: "project skeletons without a shared root manifest",
        applies: skeletons_without_root_manifest,
    },
];

fn small_codebase(s: &Signals) -> bool {
    s.metrics.total_files <= 15
}

fn shallow_layout(s: &Signals) -> bool {
    s.metrics.max_depth <= 2
}

fn no_ci(s: &Signals) -> bool {
    !s.metrics.has_ci_config
}

fn solo_team(s: &Signals) -> bool {
    matches!(s.team_size, Some(n) if n <= 2)
}

fn ci_and_tests(s: &Signals) -> bool {
    s.metrics.has_ci_config && s.metrics.has_tests_folder
}

fn tested_moderate_depth(s: &Signals) -> bool {
    s.metrics.has_tests_folder && (2..=5).contains(&s.metrics.max_depth)
}

/// An unknown team counts as collaborative once the project has a tested pipeline.
fn collaborative_team(s: &Signals) -> bool {
    match s.team_size {
        Some(n) => n > 5,
        None => ci_and_tests(s),
    }
}

fn small_team(s: &Signals) -> bool {
    matches!(s.team_size, Some(n) if n <= 5)
}

fn reviewable_size(s: &Signals) -> bool {
    s.metrics.has_tests_folder && s.metrics.total_files < 100
}

fn large_codebase(s: &Signals) -> bool {
    s.metrics.total_files >= 100
}

fn deep_hierarchy(s: &Signals) -> bool {
    s.metrics.max_depth >= 6
}

fn enterprise_hygiene(s: &Signals) -> bool {
    let m = s.metrics;
    m.has_docs_folder && m.has_tests_folder && m.has_ci_config
}

fn many_directories(s: &Signals) -> bool {
    s.metrics.total_directories >= 20
}

fn workspace_container(s: &Signals) -> bool {
    s.metrics.workspace_directories >= 1
}

fn multiple_product_areas(s: &Signals) -> bool {
    s.metrics.top_level_areas >= 3 && s.metrics.total_directories >= 15
}

fn repeated_skeletons(s: &Signals) -> bool {
    s.metrics.project_skeletons >= 2
}

fn skeletons_dominate(s: &Signals) -> bool {
    repeated_skeletons(s) && s.metrics.project_skeletons * 2 >= s.metrics.top_level_areas
}

fn skeletons_without_root_manifest(s: &Signals) -> bool {
    repeated_skeletons(s) && !s.metrics.has_root_manifest
}

#[derive(Default)]
struct Tally {
    fired: u32,
    possible: u32,
    rationale: Vec<String>,
}

/// Ranks the workflows for a layout. Never returns an empty list.
pub fn classify(
    metrics: &Metrics,
    team_size: Option<u32>,
    preferences: &Preferences,
) -> Vec<WorkflowRecommendation> {
    let signals = Signals { metrics, team_size };

    let mut tallies: [Tally; 7] = Default::default();
    for rule in RULES {
        let tally = &mut tallies[index_of(rule.kind)];
        tally.possible += rule.weight;
        if (rule.applies)(&signals) {
            tally.fired += rule.weight;
            tally.rationale.push(format!("{}: {}", rule.name, rule.rationale));
        }
    }

    let forcing = preferences.forcing_token();
    let mut ranked: Vec<(bool, WorkflowRecommendation)> = Vec::new();
    for (kind, tally) in WorkflowKind::ALL.into_iter().zip(tallies) {
        let forced = kind == WorkflowKind::Forking && forcing.is_some();
        if tally.fired == 0 && !forced {
            continue;
        }
        let mut rationale = tally.rationale;
        let confidence = if let Some(token) = forcing.filter(|_| forced) {
            rationale.insert(
                0,
                format!("explicit preference '{}' overrides inferred signals", token),
            );
            1.0
        } else {
            f64::from(tally.fired) / f64::from(tally.possible)
        };
        ranked.push((
            forced,
            WorkflowRecommendation {
                kind,
                confidence,
                rationale,
            },
        ));
    }

    if ranked.is_empty() {
        debug!("No workflow rule fired; falling back to Centralized");
        return vec![WorkflowRecommendation {
            kind: WorkflowKind::Centralized,
            confidence: DEFAULT_CONFIDENCE,
            rationale: vec!["no structural signals; defaulting to the simplest workflow".into()],
        }];
    }

    ranked.sort_by(|(a_forced, a), (b_forced, b)| {
        b_forced
            .cmp(a_forced)
            .then_with(|| {
                b.confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| b.kind.cmp(&a.kind))
    });

    let ranked: Vec<WorkflowRecommendation> = ranked.into_iter().map(|(_, r)| r).collect();
    debug!(
        "Workflow ranking: {}",
        ranked
            .iter()
            .map(|r| format!("{}={:.2}", r.kind, r.confidence))
            .collect::<Vec<_>>()
            .join(", ")
    );
    ranked
}

fn index_of(kind: WorkflowKind) -> usize {
    kind as usize
}
