use chrono::{Days, NaiveDate};

use crate::fs::ScanResult;

/// `today` minus `threshold_days` calendar days, saturating at the earliest
/// representable date.
pub fn compute_cutoff(today: NaiveDate, threshold_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(threshold_days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Entries dated on or before `cutoff`.
pub fn filter_by_age(scan: &ScanResult, cutoff: NaiveDate) -> ScanResult {
    scan.iter()
        .filter(|(_, date)| **date <= cutoff)
        .map(|(path, date)| (path.clone(), *date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cutoff_rolls_back_across_year() {
        assert_eq!(compute_cutoff(date(2021, 1, 2), 5), date(2020, 12, 28));
    }

    #[test]
    fn cutoff_handles_leap_february() {
        assert_eq!(compute_cutoff(date(2024, 3, 1), 1), date(2024, 2, 29));
        assert_eq!(compute_cutoff(date(2023, 3, 1), 1), date(2023, 2, 28));
    }

    #[test]
    fn zero_threshold_is_today() {
        assert_eq!(compute_cutoff(date(2022, 7, 14), 0), date(2022, 7, 14));
    }

    #[test]
    fn huge_threshold_saturates() {
        assert_eq!(compute_cutoff(date(2022, 7, 14), u32::MAX), NaiveDate::MIN);
    }

    #[test]
    fn filter_includes_cutoff_day_and_excludes_next() {
        let cutoff = date(2020, 11, 20);
        let mut scan = ScanResult::new();
        scan.insert(PathBuf::from("/d/old.txt"), date(2020, 10, 1));
        scan.insert(PathBuf::from("/d/edge.txt"), cutoff);
        scan.insert(PathBuf::from("/d/newer.txt"), date(2020, 11, 21));

        let candidates = filter_by_age(&scan, cutoff);

        assert_eq!(candidates.len(), 2);
        assert!(candidates.contains_key(&PathBuf::from("/d/old.txt")));
        assert!(candidates.contains_key(&PathBuf::from("/d/edge.txt")));
        assert!(!candidates.contains_key(&PathBuf::from("/d/newer.txt")));
        assert!(candidates.iter().all(|(path, d)| scan.get(path) == Some(d)));
    }
}
