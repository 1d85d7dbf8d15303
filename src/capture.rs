//! Recovers assignment rows from a plain-text copy of a grade-report
//! page. Page markup drifts between semesters, so matching runs in two
//! passes: a strict line shape first, then a loose scan that only asks
//! for a weight marker and a decimal score somewhere on the line. The
//! loose pass assumes a 100-point scale; nothing outside this module
//! does.

use regex::Regex;

use crate::models::CapturedAssignment;

/// Parses every recognizable assignment row out of `text`.
///
/// Strict shapes, one row per line:
///   `Assignment 1 (25%)  81.61/100`
///   `Assignment 2 (25%)  81.61`        (total assumed 100)
///   `Final Exam (50%)  -`              (ungraded)
/// If no line matches, the loose pass scans for lines carrying both a
/// `(NN%)` weight and a decimal score.
pub fn parse_report_text(text: &str) -> Vec<CapturedAssignment> {
    let scored = Regex::new(
        r"^(?P<name>.+?)\s*\((?P<weight>\d+(?:\.\d+)?)%\)\s+(?P<score>\d+(?:\.\d+)?)(?:\s*/\s*(?P<total>\d+(?:\.\d+)?))?\s*$",
    )
    .unwrap();
    let ungraded = Regex::new(r"^(?P<name>.+?)\s*\((?P<weight>\d+(?:\.\d+)?)%\)\s*[-–]\s*$").unwrap();

    let mut rows = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = scored.captures(line) {
            let (Some(weight), Some(score)) = (field(&caps, "weight"), field(&caps, "score"))
            else {
                continue;
            };
            rows.push(CapturedAssignment {
                name: caps["name"].trim().to_string(),
                score: Some(score),
                total: field(&caps, "total").unwrap_or(100.0),
                weight: weight / 100.0,
            });
        } else if let Some(caps) = ungraded.captures(line) {
            let Some(weight) = field(&caps, "weight") else {
                continue;
            };
            rows.push(CapturedAssignment {
                name: caps["name"].trim().to_string(),
                score: None,
                total: 100.0,
                weight: weight / 100.0,
            });
        }
    }

    if rows.is_empty() {
        rows = parse_loose(text);
    }
    rows
}

/// Last-resort scan for rows the strict shapes missed. Takes the text
/// before the weight marker as the name and the first decimal number
/// elsewhere on the line as the score.
fn parse_loose(text: &str) -> Vec<CapturedAssignment> {
    let weight_marker = Regex::new(r"\((?P<weight>\d+(?:\.\d+)?)%\)").unwrap();
    let decimal = Regex::new(r"\d+\.\d+").unwrap();

    let mut rows = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        let Some(marker) = weight_marker.captures(line) else {
            continue;
        };
        let Some(weight) = field(&marker, "weight") else {
            continue;
        };

        let span = match marker.get(0) {
            Some(m) => m.range(),
            None => continue,
        };
        let score = decimal
            .find_iter(line)
            .find(|m| m.start() >= span.end || m.end() <= span.start)
            .and_then(|m| m.as_str().parse::<f64>().ok());

        let name = line[..span.start].trim();
        if name.is_empty() {
            continue;
        }
        let Some(score) = score else {
            continue;
        };

        rows.push(CapturedAssignment {
            name: name.to_string(),
            score: Some(score),
            total: 100.0,
            weight: weight / 100.0,
        });
    }
    rows
}

fn field(caps: &regex::Captures<'_>, name: &str) -> Option<f64> {
    caps.name(name)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_score_over_total_rows() {
        let rows = parse_report_text("Assignment 1 - Report (25%)  20.5/25\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Assignment 1 - Report");
        assert_eq!(rows[0].score, Some(20.5));
        assert_eq!(rows[0].total, 25.0);
        assert_eq!(rows[0].weight, 0.25);
    }

    #[test]
    fn bare_scores_assume_a_hundred_point_total() {
        let rows = parse_report_text("Assignment 2 (25%)  72.13\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].score, Some(72.13));
        assert_eq!(rows[0].total, 100.0);
    }

    #[test]
    fn dash_marks_an_ungraded_row() {
        let rows = parse_report_text("Final Exam (50%)  -\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Final Exam");
        assert_eq!(rows[0].score, None);
        assert_eq!(rows[0].weight, 0.5);
    }

    #[test]
    fn parses_a_full_report_and_skips_noise() {
        let text = "\
FIT2004 — Grade report

Assignment 1 (25%)  81.61/100
Assignment 2 (25%)  72.13/100
Final Exam (50%)  -

Course total  76.87
";
        let rows = parse_report_text(text);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "Assignment 1");
        assert_eq!(rows[2].score, None);
    }

    #[test]
    fn loose_pass_recovers_interleaved_rows() {
        // No line matches the strict shape, so the loose scan kicks in.
        let text = "Week 4 quiz (10%) graded at 8.50 points\n";
        let rows = parse_report_text(text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Week 4 quiz");
        assert_eq!(rows[0].score, Some(8.5));
        assert_eq!(rows[0].total, 100.0);
        assert_eq!(rows[0].weight, 0.1);
    }

    #[test]
    fn unrecognizable_text_yields_nothing() {
        assert!(parse_report_text("nothing to see here\n").is_empty());
    }
}
