use std::collections::BTreeMap;
use std::fs::Metadata;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::SystemTime;

use chrono::NaiveDate;

use crate::util::calendar_date;

/// Files found directly inside the scanned directory, keyed by full path.
pub type ScanResult = BTreeMap<PathBuf, NaiveDate>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub created: NaiveDate,
}

impl FileRecord {
    pub fn new(path: PathBuf, created: NaiveDate) -> Self {
        Self { path, created }
    }
}

/// Entries of a scan result as owned records, in path order.
pub fn records(scan: &ScanResult) -> impl Iterator<Item = FileRecord> + '_ {
    scan.iter()
        .map(|(path, created)| FileRecord::new(path.clone(), *created))
}

/// Which timestamp decides a file's date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateSource {
    /// Birth time, or the modification time on filesystems that do not record one.
    #[default]
    Created,
    Modified,
}

impl DateSource {
    pub fn timestamp(self, metadata: &Metadata) -> io::Result<SystemTime> {
        match self {
            DateSource::Created => match metadata.created() {
                Ok(time) => Ok(time),
                Err(err) if err.kind() == io::ErrorKind::Unsupported => metadata.modified(),
                Err(err) => Err(err),
            },
            DateSource::Modified => metadata.modified(),
        }
    }

    pub fn date_of(self, metadata: &Metadata) -> io::Result<NaiveDate> {
        self.timestamp(metadata).map(calendar_date)
    }
}

impl FromStr for DateSource {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "created" | "creation" | "birth" => Ok(DateSource::Created),
            "modified" | "mtime" => Ok(DateSource::Modified),
            _ => Err(format!(
                "unknown date source '{value}' (expected created or modified)"
            )),
        }
    }
}
