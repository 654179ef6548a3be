//! Grade records as stored remotely and as exported.

use serde::{Deserialize, Serialize};

/// Per-student gain error record
///
/// Serializes to the remote store's body format:
/// `{"Kp error": .., "Ki error": .., "Kd error": .., "Avg error": ..}`.
/// The student identifier is the record's key in the store, not part of the
/// body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    #[serde(skip)]
    pub student_id: String,

    #[serde(rename = "Kp error")]
    pub kp_error: f64,

    #[serde(rename = "Ki error")]
    pub ki_error: f64,

    #[serde(rename = "Kd error")]
    pub kd_error: f64,

    #[serde(rename = "Avg error")]
    pub avg_error: f64,
}

/// One row of the grade export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeEntry {
    #[serde(rename = "NPM")]
    pub student_id: String,

    #[serde(rename = "Grade")]
    pub grade: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_format() {
        let record = GradeRecord {
            student_id: "2206029123".to_string(),
            kp_error: 1.0,
            ki_error: 2.0,
            kd_error: 3.0,
            avg_error: 2.0,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "Kp error": 1.0,
                "Ki error": 2.0,
                "Kd error": 3.0,
                "Avg error": 2.0
            })
        );
    }

    #[test]
    fn test_record_from_store_body() {
        let body = r#"{"Kp error": 0.5, "Ki error": 1.5, "Kd error": 2.5, "Avg error": 1.5}"#;
        let record: GradeRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.student_id, "");
        assert_eq!(record.ki_error, 1.5);
        assert_eq!(record.avg_error, 1.5);
    }
}
