use std::io;
use std::path::PathBuf;
use std::process;

use chrono::Local;
use env_logger::Env;
use pico_args::Arguments;
use stale_sweep::fs::DateSource;
use stale_sweep::prompt::{self, Prompter};
use stale_sweep::sweep::{self, SweepConfig};
use stale_sweep::util::expand_path;

const USAGE: &str = "\
Usage: sweep [OPTIONS] [DIR]

Deletes files in DIR (not recursive) created at least N days ago, after confirmation.

Options:
  --days N          Threshold in days (prompted when omitted)
  --max-days N      Reject thresholds above N
  --by SOURCE       Date to compare: created (default) or modified
  --match GLOB      Only consider file names matching GLOB
  --report PATH     Write the candidate list as JSON
  --dry-run         List candidates without deleting
  -h, --help        Show this help
";

fn main() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(""))
        .format_timestamp_secs()
        .try_init();

    let config = match parse_args() {
        Ok(Some(config)) => config,
        Ok(None) => {
            print!("{USAGE}");
            return;
        }
        Err(err) => {
            eprintln!("sweep: {err}");
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    if let Err(err) = prompter.say(prompt::BANNER) {
        eprintln!("sweep: {err}");
        process::exit(1);
    }

    match sweep::run(&config, &mut prompter) {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(err) => {
            eprintln!("sweep: {err}");
            process::exit(1);
        }
    }
}

fn parse_args() -> Result<Option<SweepConfig>, String> {
    let mut args = Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let mut config = SweepConfig::new(Local::now().date_naive());
    config.days = args
        .opt_value_from_str("--days")
        .map_err(|err| err.to_string())?;
    config.max_days = args
        .opt_value_from_str("--max-days")
        .map_err(|err| err.to_string())?;
    config.date_source = args
        .opt_value_from_str::<_, DateSource>("--by")
        .map_err(|err| err.to_string())?
        .unwrap_or_default();
    config.pattern = args
        .opt_value_from_str("--match")
        .map_err(|err| err.to_string())?;
    config.report = args
        .opt_value_from_str::<_, PathBuf>("--report")
        .map_err(|err| err.to_string())?;
    config.dry_run = args.contains("--dry-run");

    let dir_arg: Option<String> = args.opt_free_from_str().map_err(|err| err.to_string())?;

    let leftover = args.finish();
    if !leftover.is_empty() {
        let extras: Vec<String> = leftover
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        return Err(format!("unexpected arguments: {}", extras.join(" ")));
    }

    config.directory = dir_arg.as_deref().map(expand_path).transpose()?;
    config.default_directory = dirs::desktop_dir();

    Ok(Some(config))
}
