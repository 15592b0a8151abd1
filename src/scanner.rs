use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use log::debug;
use walkdir::WalkDir;

use crate::fs::{DateSource, ScanResult};

#[derive(Debug, Default, Clone)]
pub struct ScanOptions {
    pub date_source: DateSource,
    pub matcher: Option<GlobSet>,
}

impl ScanOptions {
    pub fn with_pattern(
        date_source: DateSource,
        pattern: Option<&str>,
    ) -> Result<Self, globset::Error> {
        let matcher = pattern.map(compile_matcher).transpose()?;
        Ok(Self {
            date_source,
            matcher,
        })
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    pub files_scanned: u64,
    pub dirs_skipped: u64,
    pub filtered_out: u64,
    pub fs_errors: u64,
}

#[derive(Debug, Clone)]
pub struct ScanError {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    pub files: ScanResult,
    pub errors: Vec<ScanError>,
    pub stats: ScanStats,
}

/// Lists the non-directory entries directly inside `root` with their dates.
///
/// Entries whose metadata cannot be read are recorded in `errors` and skipped.
/// If enumeration itself fails part way, whatever was collected so far is
/// returned.
pub fn scan_directory(root: &Path, options: &ScanOptions) -> ScanReport {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut report = ScanReport::default();

    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                report.record_error(path, err.to_string());
                continue;
            }
        };

        let path = entry.path().to_path_buf();

        // Follows symlinks so a link is judged by its target.
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) => {
                report.record_error(path, err.to_string());
                continue;
            }
        };

        if metadata.is_dir() {
            report.stats.dirs_skipped += 1;
            continue;
        }

        if !name_matches(&path, root, options.matcher.as_ref()) {
            report.stats.filtered_out += 1;
            continue;
        }

        let created = match options.date_source.date_of(&metadata) {
            Ok(date) => date,
            Err(err) => {
                report.record_error(path, err.to_string());
                continue;
            }
        };

        report.files.insert(path, created);
        report.stats.files_scanned += 1;
    }

    debug!(
        "sweep scan stats root={} files={} dirs_skipped={} filtered_out={} fs_errors={}",
        root.display(),
        report.stats.files_scanned,
        report.stats.dirs_skipped,
        report.stats.filtered_out,
        report.stats.fs_errors
    );

    report
}

impl ScanReport {
    fn record_error(&mut self, path: PathBuf, message: String) {
        debug!("sweep skipping {}: {message}", path.display());
        self.stats.fs_errors += 1;
        self.errors.push(ScanError { path, message });
    }
}

fn name_matches(path: &Path, root: &Path, matcher: Option<&GlobSet>) -> bool {
    let Some(matcher) = matcher else {
        return true;
    };

    if let Ok(relative) = path.strip_prefix(root) {
        if let Some(relative_str) = relative.to_str() {
            if matcher.is_match(relative_str) {
                return true;
            }
        }
    }

    let absolute = path.to_string_lossy();
    matcher.is_match(absolute.as_ref())
}

pub fn compile_matcher(pattern: &str) -> Result<GlobSet, globset::Error> {
    let pattern = if pattern.is_empty() { "*" } else { pattern };

    let mut builder = GlobSetBuilder::new();
    builder.add(build_glob(pattern)?);
    builder.build()
}

fn build_glob(pattern: &str) -> Result<Glob, globset::Error> {
    let mut builder = GlobBuilder::new(pattern);
    builder.literal_separator(true);
    builder.build()
}
