//! Core data models for debrief.
//!
//! These types are shared across all debrief crates and represent the record
//! of one processed meeting: the transcription plus the four structured
//! analyses the model produces from it.
//!
//! Wire format note: every field serializes in camelCase because the browser
//! UI and the JSON schemas embedded in the analysis prompts both use it.
//! Every list-valued field deserializes to an empty sequence when missing,
//! so consumers branch on emptiness, never on presence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;

/// Sentinel assignee for tasks nobody claimed.
pub const ASSIGNEE_UNASSIGNED: &str = "Unassigned";

/// Sentinel deadline for tasks without a date.
pub const DEADLINE_UNSPECIFIED: &str = "Not specified";

/// Priority value counted by [`TaskList::high_priority_count`].
pub const PRIORITY_HIGH: &str = "high";

// =============================================================================
// ANALYSIS PAYLOAD TRAIT
// =============================================================================

/// Implemented by the four structured payloads the model returns.
///
/// Each payload knows its neutral substitute for undecodable replies and how
/// to restore derived fields after decoding.
pub trait AnalysisPayload: serde::de::DeserializeOwned {
    /// Stable kind name used in logs.
    const KIND: &'static str;

    /// Neutral substitute used when the model reply cannot be decoded:
    /// all lists empty, scores zeroed, ratings set to "unknown".
    fn fallback() -> Self;

    /// Restore derived fields after decoding. Default: nothing to restore.
    fn normalize(&mut self) {}
}

// =============================================================================
// MEETING
// =============================================================================

/// The aggregate record of one processed audio upload and its four analyses.
///
/// Created exactly once per successful upload and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: Uuid,
    pub filename: String,
    pub timestamp: DateTime<Utc>,
    pub transcription: String,
    pub summary: Summary,
    pub tasks: TaskList,
    pub improvements: Improvements,
    pub fact_check: FactCheck,
}

impl Meeting {
    /// Listing entry for this meeting with a truncated summary preview.
    pub fn overview(&self) -> MeetingOverview {
        MeetingOverview {
            id: self.id,
            filename: self.filename.clone(),
            timestamp: self.timestamp,
            summary: snippet(&self.summary.overview, defaults::SNIPPET_LENGTH),
        }
    }
}

/// Listing entry served by the meetings index.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeetingOverview {
    pub id: Uuid,
    pub filename: String,
    pub timestamp: DateTime<Utc>,
    /// First 200 characters of the summary overview, ellipsis-terminated
    /// when truncated.
    pub summary: String,
}

/// First `max_chars` characters of `text`, with a trailing ellipsis when
/// anything was cut.
///
/// Truncation is character-based so multi-byte text never splits a code
/// point.
pub fn snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

// =============================================================================
// SUMMARY
// =============================================================================

/// Structured meeting summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Summary {
    pub overview: String,
    pub duration: Option<String>,
    pub participants: Vec<String>,
    pub key_points: Vec<KeyPoint>,
    pub decisions: Vec<Decision>,
    pub insights: Vec<String>,
    pub outcomes: Vec<String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyPoint {
    pub title: String,
    pub description: String,
    /// Importance tier: "high", "medium", or "low".
    pub importance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Decision {
    pub decision: String,
    pub rationale: String,
    /// Person or team responsible for carrying the decision out.
    pub responsible: String,
}

impl AnalysisPayload for Summary {
    const KIND: &'static str = "summary";

    fn fallback() -> Self {
        Self {
            overview: "Summary unavailable".to_string(),
            ..Self::default()
        }
    }
}

// =============================================================================
// TASKS
// =============================================================================

/// Tasks extracted from the meeting plus derived counters.
///
/// The counters are recomputed from the task list after every decode; they
/// are never taken from the model reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskList {
    pub tasks: Vec<Task>,
    pub follow_ups: Vec<String>,
    pub total_tasks: usize,
    pub high_priority_count: usize,
    pub assigned_count: usize,
    pub unassigned_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    /// Numeric id unique within the list.
    pub id: u32,
    pub description: String,
    pub assignee: String,
    pub deadline: String,
    /// Priority tier: "high", "medium", or "low".
    pub priority: String,
    pub status: String,
    /// Where in the discussion the task came up.
    pub context: String,
    pub dependencies: Vec<String>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: 0,
            description: String::new(),
            assignee: ASSIGNEE_UNASSIGNED.to_string(),
            deadline: DEADLINE_UNSPECIFIED.to_string(),
            priority: "medium".to_string(),
            status: "pending".to_string(),
            context: String::new(),
            dependencies: Vec::new(),
        }
    }
}

impl TaskList {
    /// Recompute the four derived counters from the task list.
    ///
    /// A task counts as unassigned when its assignee is empty or the
    /// [`ASSIGNEE_UNASSIGNED`] sentinel; assigned is the complement, so
    /// `assigned_count + unassigned_count == total_tasks` always holds.
    pub fn recompute_counters(&mut self) {
        self.total_tasks = self.tasks.len();
        self.high_priority_count = self
            .tasks
            .iter()
            .filter(|t| t.priority == PRIORITY_HIGH)
            .count();
        self.unassigned_count = self
            .tasks
            .iter()
            .filter(|t| t.assignee.is_empty() || t.assignee == ASSIGNEE_UNASSIGNED)
            .count();
        self.assigned_count = self.total_tasks - self.unassigned_count;
    }
}

impl AnalysisPayload for TaskList {
    const KIND: &'static str = "tasks";

    fn fallback() -> Self {
        Self::default()
    }

    fn normalize(&mut self) {
        self.recompute_counters();
    }
}

// =============================================================================
// IMPROVEMENTS
// =============================================================================

/// Meeting-effectiveness assessment with categorized improvement areas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Improvements {
    /// Integer score the model assigns, intended range 0-10 (not enforced).
    pub effectiveness_score: i32,
    pub rationale: String,
    pub strengths: Vec<Strength>,
    pub improvement_areas: ImprovementAreas,
    pub recommendations: Vec<Recommendation>,
    pub best_practices: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Strength {
    pub area: String,
    pub description: String,
}

/// Fixed-key mapping of improvement categories to suggestions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ImprovementAreas {
    pub structure: Vec<String>,
    pub communication: Vec<String>,
    pub participation: Vec<String>,
    pub time_management: Vec<String>,
    pub decision_making: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Recommendation {
    /// Priority tier: "high", "medium", or "low".
    pub priority: String,
    pub recommendation: String,
    pub expected_impact: String,
}

impl AnalysisPayload for Improvements {
    const KIND: &'static str = "improvements";

    fn fallback() -> Self {
        Self {
            rationale: "Analysis unavailable".to_string(),
            ..Self::default()
        }
    }
}

// =============================================================================
// FACT CHECK
// =============================================================================

/// Verification report over the transcription and the claims made in it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FactCheck {
    pub transcription_quality: TranscriptionQuality,
    pub potential_errors: Vec<PotentialError>,
    pub factual_claims: Vec<FactualClaim>,
    pub inconsistencies: Vec<Inconsistency>,
    pub data_points: Vec<DataPoint>,
    pub technical_terms: Vec<TechnicalTerm>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TranscriptionQuality {
    /// Rating tier: "excellent", "good", "fair", "poor", or "unknown".
    pub rating: String,
    /// Numeric score, intended range 0-100.
    pub score: i32,
    pub issues: Vec<String>,
}

impl Default for TranscriptionQuality {
    fn default() -> Self {
        Self {
            rating: "unknown".to_string(),
            score: 0,
            issues: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PotentialError {
    pub text: String,
    pub suggestion: String,
    /// Confidence tier: "high", "medium", or "low".
    pub confidence: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FactualClaim {
    pub claim: String,
    pub speaker: String,
    /// Verification tier: "verified", "unverified", or "disputed".
    pub verification_status: String,
    pub correction: String,
    pub source: String,
}

impl Default for FactualClaim {
    fn default() -> Self {
        Self {
            claim: String::new(),
            speaker: "unknown".to_string(),
            verification_status: String::new(),
            correction: String::new(),
            source: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Inconsistency {
    pub issue: String,
    pub location: String,
    /// Severity tier: "high", "medium", or "low".
    pub severity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DataPoint {
    /// What the data point is: "number", "date", "metric", ...
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub context: String,
    /// Verification tier: "consistent" or "needs-review".
    pub verification: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalTerm {
    pub term: String,
    pub usage: String,
    pub correct: bool,
    pub definition: String,
}

impl AnalysisPayload for FactCheck {
    const KIND: &'static str = "fact_check";

    fn fallback() -> Self {
        Self::default()
    }
}
