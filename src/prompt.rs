use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::util::expand_home;

pub const BANNER: &str = "\
Welcome to sweep, a quick way to clean a directory of old and unused files.
Files are cleaned up based on your requirements: if files older than 5 days
should disappear, just choose 5. Nothing is deleted until you confirm.
";

pub const THRESHOLD_PROMPT: &str = "How far should we go back, in days: ";
pub const THRESHOLD_RETRY: &str = "Oops! Invalid numeric value[0-365], try again: ";
pub const THRESHOLD_RANGE_RETRY: &str =
    "Oops! Please pick a value between 0 and {max}, try again: ";
pub const DIRECTORY_PROMPT: &str = "Where's your Desktop located (/path/to/desktop): ";
pub const DIRECTORY_RETRY: &str =
    "Oops! This doesn't seem to be a valid Directory, try again[q/quit]: ";
pub const CONFIRM_PROMPT: &str = "Continue? (yes / no) - q[quit]: ";
pub const CONFIRM_RETRY: &str = "Please choose an option. (yes / no) - q[quit]: ";
pub const CANDIDATES_HEADER: &str = "Valid deletable files:";
pub const DELETE_WARNING: &str = "WARNING ALL REPORTED FILES WILL BE DELETED!";
pub const FAREWELL: &str = "Files redeemed. Goodbye!";
pub const NOTHING_TO_DELETE: &str = "Nothing to delete.";
pub const COMPLETED: &str = "POOF! Files have been deleted.";

/// Result of a prompt: an accepted value, or the user asked to quit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer<T> {
    Value(T),
    Quit,
}

enum Reply<T> {
    Accept(T),
    Retry(String),
}

pub fn threshold_range_retry(max: u32) -> String {
    THRESHOLD_RANGE_RETRY.replace("{max}", &max.to_string())
}

pub fn is_quit(input: &str) -> bool {
    input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit")
}

/// Line-oriented console collector over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Non-negative day count, optionally capped at `max_days`.
    pub fn read_threshold(&mut self, max_days: Option<u32>) -> io::Result<Answer<u32>> {
        self.ask(THRESHOLD_PROMPT, |raw| match raw.parse::<u32>() {
            Ok(days) => match max_days {
                Some(max) if days > max => Reply::Retry(threshold_range_retry(max)),
                _ => Reply::Accept(days),
            },
            Err(_) => Reply::Retry(THRESHOLD_RETRY.to_string()),
        })
    }

    /// Existing directory path. An empty answer picks `default` when given.
    ///
    /// The answer is taken literally when it names a directory; otherwise a
    /// leading `~` is expanded. Environment variables are never substituted.
    pub fn read_directory(&mut self, default: Option<&Path>) -> io::Result<Answer<PathBuf>> {
        let prompt = match default {
            Some(path) => format!(
                "{} [{}]: ",
                DIRECTORY_PROMPT.trim_end_matches([':', ' ']),
                path.display()
            ),
            None => DIRECTORY_PROMPT.to_string(),
        };

        self.ask(&prompt, |raw| {
            let candidate = match (raw.is_empty(), default) {
                (true, Some(path)) => path.to_path_buf(),
                (true, None) => return Reply::Retry(DIRECTORY_RETRY.to_string()),
                (false, _) if Path::new(raw).is_dir() => PathBuf::from(raw),
                (false, _) => expand_home(raw),
            };
            if candidate.is_dir() {
                Reply::Accept(candidate)
            } else {
                Reply::Retry(DIRECTORY_RETRY.to_string())
            }
        })
    }

    pub fn read_yes_no(&mut self, prompt: &str) -> io::Result<Answer<bool>> {
        self.ask(prompt, |raw| match raw.to_ascii_lowercase().as_str() {
            "yes" | "y" => Reply::Accept(true),
            "no" | "n" => Reply::Accept(false),
            _ => Reply::Retry(CONFIRM_RETRY.to_string()),
        })
    }

    fn ask<T>(
        &mut self,
        prompt: &str,
        mut parse: impl FnMut(&str) -> Reply<T>,
    ) -> io::Result<Answer<T>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                // End of input counts as quitting.
                writeln!(self.output)?;
                return Ok(Answer::Quit);
            }

            let trimmed = line.trim();
            if is_quit(trimmed) {
                return Ok(Answer::Quit);
            }

            match parse(trimmed) {
                Reply::Accept(value) => return Ok(Answer::Value(value)),
                Reply::Retry(message) => {
                    write!(self.output, "{message}")?;
                    self.output.flush()?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_inner().1).expect("utf8 output")
    }

    #[test]
    fn threshold_reprompts_until_numeric() {
        let mut p = prompter("soon\n-3\n 7 \n");
        assert_eq!(p.read_threshold(None).unwrap(), Answer::Value(7));
        let out = printed(p);
        assert!(out.starts_with(THRESHOLD_PROMPT));
        assert_eq!(out.matches(THRESHOLD_RETRY).count(), 2);
    }

    #[test]
    fn threshold_is_unbounded_without_max() {
        let mut p = prompter("4000\n");
        assert_eq!(p.read_threshold(None).unwrap(), Answer::Value(4000));
    }

    #[test]
    fn threshold_respects_max() {
        let mut p = prompter("400\n30\n");
        assert_eq!(p.read_threshold(Some(365)).unwrap(), Answer::Value(30));
        assert!(printed(p).contains(&threshold_range_retry(365)));
    }

    #[test]
    fn range_retry_names_the_maximum() {
        assert_eq!(
            threshold_range_retry(90),
            "Oops! Please pick a value between 0 and 90, try again: "
        );
    }

    #[test]
    fn threshold_quit_sentinel() {
        let mut p = prompter("Quit\n");
        assert_eq!(p.read_threshold(None).unwrap(), Answer::Quit);
    }

    #[test]
    fn directory_reprompts_on_missing_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = format!("/definitely/not/here\n{}\n", dir.path().display());
        let mut p = prompter(&input);
        assert_eq!(
            p.read_directory(None).unwrap(),
            Answer::Value(dir.path().to_path_buf())
        );
        assert!(printed(p).contains(DIRECTORY_RETRY));
    }

    #[test]
    fn directory_with_dollar_sign_is_taken_literally() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("cash$money");
        std::fs::create_dir(&target).expect("mkdir");
        let mut p = prompter(&format!("{}\nq\n", target.display()));
        assert_eq!(p.read_directory(None).unwrap(), Answer::Value(target));
        assert!(!printed(p).contains(DIRECTORY_RETRY));
    }

    #[test]
    fn directory_rejects_regular_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").expect("write");
        let mut p = prompter(&format!("{}\nq\n", file.display()));
        assert_eq!(p.read_directory(None).unwrap(), Answer::Quit);
    }

    #[test]
    fn directory_empty_answer_uses_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut p = prompter("\n");
        assert_eq!(
            p.read_directory(Some(dir.path())).unwrap(),
            Answer::Value(dir.path().to_path_buf())
        );
        assert!(printed(p).contains(&format!("[{}]: ", dir.path().display())));
    }

    #[test]
    fn yes_no_accepts_every_spelling() {
        for (raw, expected) in [
            ("Yes", true),
            ("yes", true),
            ("Y", true),
            ("y", true),
            ("No", false),
            ("no", false),
            ("N", false),
            ("n", false),
        ] {
            let mut p = prompter(&format!("{raw}\n"));
            assert_eq!(
                p.read_yes_no(CONFIRM_PROMPT).unwrap(),
                Answer::Value(expected),
                "input {raw}"
            );
        }
    }

    #[test]
    fn yes_no_reprompts_then_quits() {
        let mut p = prompter("maybe\nq\n");
        assert_eq!(p.read_yes_no(CONFIRM_PROMPT).unwrap(), Answer::Quit);
        assert!(printed(p).contains(CONFIRM_RETRY));
    }

    #[test]
    fn end_of_input_quits() {
        let mut p = prompter("");
        assert_eq!(p.read_yes_no(CONFIRM_PROMPT).unwrap(), Answer::Quit);
    }
}
