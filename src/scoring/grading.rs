//! Grade curve over a cohort's average errors.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::{info, warn};
use rootlocus_types::GradeEntry;
use serde_json::{Map, Value};

use super::ScoringError;
use crate::utils::constants::{GRADE_DECAY, GRADE_FLOOR, GRADE_MAX, GRADE_SPAN};

const AVG_ERROR_FIELD: &str = "Avg error";

/// Entries whose "Avg error" is numeric, as `(student_id, avg_error)`
///
/// Numbers are taken as is; strings count when they parse to a finite
/// number. Everything else is skipped with a warning.
pub fn extract_errors(records: &Map<String, Value>) -> Vec<(String, f64)> {
    records
        .iter()
        .filter_map(|(id, details)| {
            let avg = details.get(AVG_ERROR_FIELD).and_then(numeric);
            if avg.is_none() {
                warn!("skipping {}: no numeric \"{}\"", id, AVG_ERROR_FIELD);
            }
            avg.map(|avg| (id.clone(), avg))
        })
        .collect()
}

fn numeric(value: &Value) -> Option<f64> {
    let x = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    x.is_finite().then_some(x)
}

/// 60 + 40 exp(-2 (avg - min) / (max - min)), or 100 for a flat cohort
pub fn curve(avg: f64, min: f64, max: f64) -> f64 {
    if min == max {
        GRADE_MAX
    } else {
        GRADE_FLOOR + GRADE_SPAN * (-GRADE_DECAY * (avg - min) / (max - min)).exp()
    }
}

/// Two decimals, halves to even
fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

/// Grades for every valid entry, sorted by student identifier
pub fn compute_grades(records: &Map<String, Value>) -> Result<Vec<GradeEntry>, ScoringError> {
    if records.is_empty() {
        return Err(ScoringError::NoData);
    }
    let errors = extract_errors(records);
    if errors.is_empty() {
        return Err(ScoringError::NoValidData);
    }

    let min = errors.iter().map(|(_, e)| *e).fold(f64::INFINITY, f64::min);
    let max = errors.iter().map(|(_, e)| *e).fold(f64::NEG_INFINITY, f64::max);

    let mut grades: Vec<GradeEntry> = errors
        .into_iter()
        .map(|(student_id, avg)| GradeEntry {
            student_id,
            grade: round2(curve(avg, min, max)),
        })
        .collect();
    grades.sort_by(|a, b| a.student_id.cmp(&b.student_id));
    Ok(grades)
}

/// CSV with header `NPM,Grade`
pub fn write_grades<W: Write>(writer: W, grades: &[GradeEntry]) -> Result<(), ScoringError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for entry in grades {
        wtr.serialize(entry)?;
    }
    if grades.is_empty() {
        wtr.write_record(["NPM", "Grade"])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_grades(path: impl AsRef<Path>, grades: &[GradeEntry]) -> Result<(), ScoringError> {
    let path = path.as_ref();
    write_grades(File::create(path)?, grades)?;
    info!("exported {} grades to {}", grades.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn records(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_curve_endpoints() {
        assert_eq!(curve(1.0, 1.0, 3.0), 100.0);
        assert_relative_eq!(curve(3.0, 1.0, 3.0), 60.0 + 40.0 * (-2.0f64).exp());
        assert_eq!(curve(5.0, 5.0, 5.0), 100.0);
    }

    #[test]
    fn test_grades_sorted_and_rounded() {
        let data = records(json!({
            "3": {"Avg error": 2.0},
            "1": {"Avg error": 0.0},
            "2": {"Avg error": 1.0},
        }));
        let grades = compute_grades(&data).unwrap();

        let ids: Vec<&str> = grades.iter().map(|g| g.student_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(grades[0].grade, 100.0);
        assert_eq!(grades[1].grade, 74.72);
        assert_eq!(grades[2].grade, 65.41);
    }

    #[test]
    fn test_round2_halves_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(65.4123), 65.41);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn test_flat_cohort() {
        let data = records(json!({"a": {"Avg error": 4.2}, "b": {"Avg error": "4.2"}}));
        let grades = compute_grades(&data).unwrap();
        assert!(grades.iter().all(|g| g.grade == 100.0));
    }

    #[test]
    fn test_invalid_entries_skipped() {
        let data = records(json!({
            "ok": {"Avg error": "0.5", "Kp error": 1},
            "text": {"Avg error": "n/a"},
            "nan": {"Avg error": "NaN"},
            "missing": {"Kp error": 1.0},
            "scalar": 7,
            "null": null,
        }));
        assert_eq!(extract_errors(&data), vec![("ok".to_string(), 0.5)]);
    }

    #[test]
    fn test_empty_and_invalid_sets() {
        assert!(matches!(compute_grades(&Map::new()), Err(ScoringError::NoData)));

        let data = records(json!({"x": {"Avg error": "bad"}}));
        assert!(matches!(compute_grades(&data), Err(ScoringError::NoValidData)));
    }

    #[test]
    fn test_write_grades_header() {
        let grades = vec![
            GradeEntry { student_id: "1".into(), grade: 100.0 },
            GradeEntry { student_id: "2".into(), grade: 65.41 },
        ];
        let mut buffer = Vec::new();
        write_grades(&mut buffer, &grades).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "NPM,Grade\n1,100.0\n2,65.41\n");
    }
}
