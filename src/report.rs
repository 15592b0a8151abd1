use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::SweepError;
use crate::fs::{ScanResult, records};

#[derive(Debug, Serialize)]
pub struct CandidateReport {
    pub root: String,
    pub threshold_days: u32,
    pub cutoff: String,
    pub files_scanned: usize,
    pub candidates: Vec<CandidateEntry>,
}

#[derive(Debug, Serialize)]
pub struct CandidateEntry {
    pub path: String,
    pub date: String,
}

impl CandidateReport {
    pub fn new(
        root: &Path,
        threshold_days: u32,
        cutoff: NaiveDate,
        scanned: &ScanResult,
        candidates: &ScanResult,
    ) -> Self {
        Self {
            root: root.display().to_string(),
            threshold_days,
            cutoff: cutoff.to_string(),
            files_scanned: scanned.len(),
            candidates: records(candidates)
                .map(|record| CandidateEntry {
                    path: record.path.display().to_string(),
                    date: record.created.to_string(),
                })
                .collect(),
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<(), SweepError> {
        let report_err = |message: String| SweepError::Report {
            path: path.to_path_buf(),
            message,
        };

        let json = serde_json::to_string_pretty(self).map_err(|err| report_err(err.to_string()))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| report_err(err.to_string()))?;
            }
        }
        fs::write(path, json).map_err(|err| report_err(err.to_string()))
    }
}
