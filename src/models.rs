use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Course {
    pub id: Uuid,
    pub code: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentRecord {
    pub id: Uuid,
    pub name: String,
    pub score: Option<f64>,
    pub total: f64,
    pub weight: f64,
    pub due_on: Option<NaiveDate>,
}

/// An assignment row recovered from a saved grade-report text file,
/// before it has been attached to a course in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedAssignment {
    pub name: String,
    pub score: Option<f64>,
    pub total: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeSummary {
    pub current_percentage: f64,
    pub completed_weight: f64,
    pub total_weight: f64,
    pub missing_weight: f64,
    pub weight_sum_warning: bool,
}

/// Outcome of projecting one grade threshold onto the remaining weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// Completed work alone already satisfies the threshold.
    AlreadyMet,
    /// The threshold cannot be reached even with a perfect score on
    /// everything remaining.
    Unreachable,
    /// Minimum average percentage needed across the remaining weight.
    Average(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GradeBand {
    #[serde(rename = "HD")]
    HighDistinction,
    #[serde(rename = "D")]
    Distinction,
    #[serde(rename = "C")]
    Credit,
    #[serde(rename = "P")]
    Pass,
    #[serde(rename = "F")]
    Fail,
}

impl GradeBand {
    /// Band boundaries are inclusive on the lower bound.
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 80.0 => GradeBand::HighDistinction,
            p if p >= 70.0 => GradeBand::Distinction,
            p if p >= 60.0 => GradeBand::Credit,
            p if p >= 50.0 => GradeBand::Pass,
            _ => GradeBand::Fail,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            GradeBand::HighDistinction => "HD",
            GradeBand::Distinction => "D",
            GradeBand::Credit => "C",
            GradeBand::Pass => "P",
            GradeBand::Fail => "F",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GradeBand::HighDistinction => "High Distinction",
            GradeBand::Distinction => "Distinction",
            GradeBand::Credit => "Credit",
            GradeBand::Pass => "Pass",
            GradeBand::Fail => "Fail",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetProjection {
    pub band: GradeBand,
    pub threshold: f64,
    pub requirement: Requirement,
}

/// Full result of the grade command, shaped for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct GradeOutcome {
    pub course: String,
    pub band: GradeBand,
    pub summary: GradeSummary,
    pub projections: Option<Vec<TargetProjection>>,
}
