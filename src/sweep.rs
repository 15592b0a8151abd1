use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::age::{compute_cutoff, filter_by_age};
use crate::error::SweepError;
use crate::fs::{DateSource, ScanResult, records};
use crate::prompt::{self, Answer, Prompter};
use crate::report::CandidateReport;
use crate::scanner::{ScanOptions, scan_directory};

#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub days: Option<u32>,
    pub max_days: Option<u32>,
    pub directory: Option<PathBuf>,
    pub default_directory: Option<PathBuf>,
    pub date_source: DateSource,
    pub pattern: Option<String>,
    pub dry_run: bool,
    pub report: Option<PathBuf>,
    pub today: NaiveDate,
}

impl SweepConfig {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            days: None,
            max_days: None,
            directory: None,
            default_directory: None,
            date_source: DateSource::default(),
            pattern: None,
            dry_run: false,
            report: None,
            today,
        }
    }
}

#[derive(Debug)]
pub struct DeletionFailure {
    pub path: PathBuf,
    pub error: io::Error,
}

#[derive(Debug, Default)]
pub struct DeletionReport {
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<DeletionFailure>,
}

#[derive(Debug)]
pub enum Outcome {
    Deleted(DeletionReport),
    NothingToDelete,
    DryRun { candidates: usize },
    Declined,
    Quit,
}

impl Outcome {
    /// Non-zero whenever the run ended without reaching deletion by choice.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Deleted(_) | Outcome::NothingToDelete | Outcome::DryRun { .. } => 0,
            Outcome::Declined | Outcome::Quit => 1,
        }
    }
}

/// Lists the candidates, warns, and asks for a yes/no decision.
pub fn present_and_confirm<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    candidates: &ScanResult,
) -> io::Result<Answer<bool>> {
    list_candidates(prompter, candidates)?;
    prompter.say("")?;
    prompter.say(prompt::DELETE_WARNING)?;
    prompter.read_yes_no(prompt::CONFIRM_PROMPT)
}

fn list_candidates<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    candidates: &ScanResult,
) -> io::Result<()> {
    prompter.say("")?;
    prompter.say(prompt::CANDIDATES_HEADER)?;
    for record in records(candidates) {
        prompter.say(&format!(
            "File: {}\tDate: {}",
            record.path.display(),
            record.created
        ))?;
    }
    Ok(())
}

/// Attempts every deletion; a failure on one path does not stop the rest.
pub fn delete_all(candidates: &ScanResult) -> DeletionReport {
    let mut report = DeletionReport::default();
    for path in candidates.keys() {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!("sweep deleted {}", path.display());
                report.deleted.push(path.clone());
            }
            Err(error) => {
                warn!("sweep failed to delete {}: {error}", path.display());
                report.failed.push(DeletionFailure {
                    path: path.clone(),
                    error,
                });
            }
        }
    }
    report
}

/// Runs the whole workflow: collect input, scan, filter, confirm, delete.
pub fn run<R: BufRead, W: Write>(
    config: &SweepConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<Outcome, SweepError> {
    let options = ScanOptions::with_pattern(config.date_source, config.pattern.as_deref())?;

    let days = match config.days {
        Some(days) => {
            if let Some(max) = config.max_days.filter(|max| days > *max) {
                return Err(SweepError::ThresholdOutOfRange { days, max });
            }
            days
        }
        None => match prompter.read_threshold(config.max_days)? {
            Answer::Value(days) => days,
            Answer::Quit => return quit(prompter),
        },
    };

    let root = match &config.directory {
        Some(dir) if dir.is_dir() => dir.clone(),
        Some(dir) => return Err(SweepError::NotADirectory(dir.clone())),
        None => {
            let default = config
                .default_directory
                .as_deref()
                .filter(|path| path.is_dir());
            match prompter.read_directory(default)? {
                Answer::Value(dir) => dir,
                Answer::Quit => return quit(prompter),
            }
        }
    };

    debug!("sweep scanning {}", root.display());
    let scan = scan_directory(&root, &options);
    for error in &scan.errors {
        prompter.say(&format!("Skipping {}: {}", error.path.display(), error.message))?;
    }

    let cutoff = compute_cutoff(config.today, days);
    prompter.say(&format!("Files on or after date '{cutoff}' will be deleted."))?;
    let candidates = filter_by_age(&scan.files, cutoff);
    info!(
        "sweep cutoff={cutoff} scanned={} candidates={}",
        scan.files.len(),
        candidates.len()
    );

    if let Some(path) = &config.report {
        CandidateReport::new(&root, days, cutoff, &scan.files, &candidates).write_to(path)?;
    }

    if candidates.is_empty() {
        prompter.say(prompt::NOTHING_TO_DELETE)?;
        return Ok(Outcome::NothingToDelete);
    }

    if config.dry_run {
        list_candidates(prompter, &candidates)?;
        return Ok(Outcome::DryRun {
            candidates: candidates.len(),
        });
    }

    match present_and_confirm(prompter, &candidates)? {
        Answer::Value(true) => {}
        Answer::Value(false) => {
            debug!("sweep declined, nothing deleted");
            return Ok(Outcome::Declined);
        }
        Answer::Quit => return quit(prompter),
    }

    let report = delete_all(&candidates);
    for failure in &report.failed {
        prompter.say(&format!(
            "Could not delete {}: {}",
            failure.path.display(),
            failure.error
        ))?;
    }
    prompter.say(prompt::COMPLETED)?;
    prompter.say(&format!(
        "{} deleted, {} failed.",
        report.deleted.len(),
        report.failed.len()
    ))?;

    Ok(Outcome::Deleted(report))
}

fn quit<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<Outcome, SweepError> {
    prompter.say(prompt::FAREWELL)?;
    Ok(Outcome::Quit)
}
