use crate::models::{AssignmentRecord, GradeBand, GradeSummary, Requirement, TargetProjection};

/// Grade thresholds projected for every course, lowest band first.
pub const TARGET_BANDS: [(GradeBand, f64); 4] = [
    (GradeBand::Pass, 50.0),
    (GradeBand::Credit, 60.0),
    (GradeBand::Distinction, 70.0),
    (GradeBand::HighDistinction, 80.0),
];

/// Folds assignment records into the current weighted grade.
///
/// Records with `weight <= 0` do not count toward the grade and are
/// skipped entirely. A record with `total <= 0` cannot form a score
/// ratio, so it is treated as ungraded: its weight still counts toward
/// `total_weight` but contributes no score.
pub fn aggregate(records: &[AssignmentRecord]) -> GradeSummary {
    let mut total_weighted_score = 0.0;
    let mut total_weight = 0.0;
    let mut completed_weight = 0.0;

    for record in records {
        if record.weight <= 0.0 {
            continue;
        }
        total_weight += record.weight;

        if record.total <= 0.0 {
            continue;
        }
        if let Some(score) = record.score {
            total_weighted_score += (score / record.total) * record.weight;
            completed_weight += record.weight;
        }
    }

    GradeSummary {
        current_percentage: total_weighted_score * 100.0,
        completed_weight,
        total_weight,
        missing_weight: total_weight - completed_weight,
        weight_sum_warning: (total_weight - 1.0).abs() > 0.01,
    }
}

/// Minimum average percentage needed across the remaining weight to end
/// the course at `target_percentage`.
///
/// A target already satisfied by completed work reports `AlreadyMet`
/// even when no weight remains; `Unreachable` is reserved for targets
/// that cannot be attained.
pub fn required_score(
    current_percentage: f64,
    remaining_weight: f64,
    target_percentage: f64,
) -> Requirement {
    let required_contribution = target_percentage - current_percentage;
    if required_contribution <= 0.0 {
        return Requirement::AlreadyMet;
    }
    if remaining_weight <= 0.0 {
        return Requirement::Unreachable;
    }

    let required_average = required_contribution / remaining_weight;
    if required_average > 100.0 {
        return Requirement::Unreachable;
    }
    Requirement::Average(round_tenth(required_average))
}

/// Projects every standard threshold against the summary, each target
/// independent of the others.
pub fn project_targets(summary: &GradeSummary) -> Vec<TargetProjection> {
    TARGET_BANDS
        .iter()
        .map(|&(band, threshold)| TargetProjection {
            band,
            threshold,
            requirement: required_score(
                summary.current_percentage,
                summary.missing_weight,
                threshold,
            ),
        })
        .collect()
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
