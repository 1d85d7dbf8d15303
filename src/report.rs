use std::fmt::Write;

use crate::models::{
    AssignmentRecord, Course, GradeBand, GradeSummary, Requirement, TargetProjection,
};

/// Renders a percentage with one decimal place, or "unknown" when the
/// value is absent.
pub fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(value) => format!("{value:.1}%"),
        None => "unknown".to_string(),
    }
}

pub fn format_requirement(requirement: &Requirement) -> String {
    match requirement {
        Requirement::AlreadyMet => "already met".to_string(),
        Requirement::Unreachable => "not achievable".to_string(),
        Requirement::Average(value) => format!("{value:.1}%"),
    }
}

fn format_weight(weight: f64) -> String {
    format!("{:.0}%", weight * 100.0)
}

pub fn build_report(
    course: &Course,
    records: &[AssignmentRecord],
    summary: &GradeSummary,
    projections: &[TargetProjection],
) -> String {
    let band = GradeBand::from_percentage(summary.current_percentage);
    let mut output = String::new();

    let _ = writeln!(output, "# Grade Report: {} — {}", course.code, course.title);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");
    let _ = writeln!(
        output,
        "Current weighted grade: {} ({})",
        format_percentage(Some(summary.current_percentage)),
        band.label()
    );
    let _ = writeln!(
        output,
        "Completed weight: {} of {}",
        format_weight(summary.completed_weight),
        format_weight(summary.total_weight)
    );

    if summary.weight_sum_warning {
        let _ = writeln!(
            output,
            "Warning: recorded weights total {}, not 100%; the breakdown may be incomplete.",
            format_weight(summary.total_weight)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Assignments");

    if records.is_empty() {
        let _ = writeln!(output, "No assignment records for this course.");
    } else {
        for record in records {
            let score = match record.score {
                Some(value) => format!("{value}/{}", record.total),
                None => "ungraded".to_string(),
            };
            let _ = writeln!(
                output,
                "- {} ({}): {}",
                record.name,
                format_weight(record.weight),
                score
            );
        }
    }

    if summary.missing_weight > 0.0 {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Required Averages on Remaining Work");
        let _ = writeln!(
            output,
            "{} of the grade is still to be earned. To finish in each band you need:",
            format_weight(summary.missing_weight)
        );
        for projection in projections {
            let _ = writeln!(
                output,
                "- {} (≥{:.0}%): {}",
                projection.band.code(),
                projection.threshold,
                format_requirement(&projection.requirement)
            );
        }

        let mut ungraded: Vec<&AssignmentRecord> = records
            .iter()
            .filter(|r| r.weight > 0.0 && r.score.is_none())
            .collect();
        ungraded.sort_by(|a, b| match (a.due_on, b.due_on) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.name.cmp(&b.name),
        });

        if !ungraded.is_empty() {
            let _ = writeln!(output);
            let _ = writeln!(output, "## Ungraded Work");
            for record in ungraded {
                match record.due_on {
                    Some(due) => {
                        let _ = writeln!(
                            output,
                            "- {} ({}) due {}",
                            record.name,
                            format_weight(record.weight),
                            due
                        );
                    }
                    None => {
                        let _ = writeln!(
                            output,
                            "- {} ({})",
                            record.name,
                            format_weight(record.weight)
                        );
                    }
                }
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grades;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn formats_percentages_to_one_decimal() {
        assert_eq!(format_percentage(Some(85.52)), "85.5%");
        assert_eq!(format_percentage(Some(0.0)), "0.0%");
        assert_eq!(format_percentage(None), "unknown");
    }

    #[test]
    fn formats_each_requirement_kind() {
        assert_eq!(format_requirement(&Requirement::AlreadyMet), "already met");
        assert_eq!(
            format_requirement(&Requirement::Unreachable),
            "not achievable"
        );
        assert_eq!(format_requirement(&Requirement::Average(70.0)), "70.0%");
    }

    #[test]
    fn band_boundaries_are_inclusive() {
        assert_eq!(GradeBand::from_percentage(80.0).code(), "HD");
        assert_eq!(GradeBand::from_percentage(79.9).code(), "D");
        assert_eq!(GradeBand::from_percentage(70.0).code(), "D");
        assert_eq!(GradeBand::from_percentage(69.9).code(), "C");
        assert_eq!(GradeBand::from_percentage(60.0).code(), "C");
        assert_eq!(GradeBand::from_percentage(59.9).code(), "P");
        assert_eq!(GradeBand::from_percentage(50.0).code(), "P");
        assert_eq!(GradeBand::from_percentage(49.9).code(), "F");
    }

    fn course() -> Course {
        Course {
            id: Uuid::new_v4(),
            code: "FIT2004".to_string(),
            title: "Algorithms and Data Structures".to_string(),
        }
    }

    fn record(
        name: &str,
        score: Option<f64>,
        weight: f64,
        due_on: Option<NaiveDate>,
    ) -> AssignmentRecord {
        AssignmentRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            score,
            total: 100.0,
            weight,
            due_on,
        }
    }

    #[test]
    fn report_lists_projections_when_work_remains() {
        let records = vec![
            record("Assignment 1", Some(90.0), 0.5, None),
            record(
                "Final Exam",
                None,
                0.5,
                NaiveDate::from_ymd_opt(2026, 11, 12),
            ),
        ];
        let summary = grades::aggregate(&records);
        let projections = grades::project_targets(&summary);

        let report = build_report(&course(), &records, &summary, &projections);
        assert!(report.contains("Current weighted grade: 45.0% (Fail)"));
        assert!(report.contains("Completed weight: 50% of 100%"));
        assert!(report.contains("- HD (≥80%): 70.0%"));
        assert!(report.contains("- Final Exam (50%) due 2026-11-12"));
        assert!(!report.contains("Warning:"));
    }

    #[test]
    fn report_suppresses_projections_when_nothing_is_missing() {
        let records = vec![
            record("Assignment 1", Some(81.61), 0.25, None),
            record("Assignment 2", Some(72.13), 0.25, None),
        ];
        let summary = grades::aggregate(&records);
        let projections = grades::project_targets(&summary);

        let report = build_report(&course(), &records, &summary, &projections);
        assert!(!report.contains("Required Averages"));
        assert!(report.contains("Warning: recorded weights total 50%"));
    }
}
