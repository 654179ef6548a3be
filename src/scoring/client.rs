//! Submission and grading workflow over a [`RecordStore`].

use std::path::Path;

use log::info;
use rootlocus_types::{GainSet, GradeEntry, GradeRecord};

use super::grading::{compute_grades, save_grades};
use super::store::RecordStore;
use super::ScoringError;

/// Absolute gain errors of a submission and their mean
pub fn compute_errors(student_id: &str, submitted: &GainSet, truth: &GainSet) -> GradeRecord {
    let kp_error = (submitted.kp - truth.kp).abs();
    let ki_error = (submitted.ki - truth.ki).abs();
    let kd_error = (submitted.kd - truth.kd).abs();

    GradeRecord {
        student_id: student_id.to_string(),
        kp_error,
        ki_error,
        kd_error,
        avg_error: (kp_error + ki_error + kd_error) / 3.0,
    }
}

pub struct ScoringClient<S> {
    store: S,
}

impl<S: RecordStore> ScoringClient<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Score `submitted` against `truth` and upsert the record
    pub fn submit(
        &self,
        student_id: &str,
        submitted: &GainSet,
        truth: &GainSet,
    ) -> Result<GradeRecord, ScoringError> {
        let record = compute_errors(student_id, submitted, truth);
        self.store.upsert(&record)?;
        info!(
            "submitted {}: Kp error {:.6}, Ki error {:.6}, Kd error {:.6}, avg {:.6}",
            student_id, record.kp_error, record.ki_error, record.kd_error, record.avg_error
        );
        Ok(record)
    }

    /// Fetch every record and grade the cohort
    pub fn grade_all(&self) -> Result<Vec<GradeEntry>, ScoringError> {
        let records = self.store.fetch_all()?;
        info!("fetched {} records", records.len());
        compute_grades(&records)
    }

    /// Grade the cohort and write the CSV; nothing is written on failure
    pub fn export_grades(&self, path: impl AsRef<Path>) -> Result<Vec<GradeEntry>, ScoringError> {
        let grades = self.grade_all()?;
        save_grades(path, &grades)?;
        Ok(grades)
    }
}
