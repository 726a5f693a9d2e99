#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use ozone_life::ozone::{self, OzoneConfig, OzoneError, UnmatchedCells};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: ozone-life [--input PATH] [--months N] [--rows N] [--cols N] [--retain-unmatched]";
const MONTHS_ENV: &str = "OZONE_MONTHS";

struct MainArgs {
    config: OzoneConfig,
    input: Option<PathBuf>,
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T, OzoneError> {
    value.parse().map_err(|_| {
        OzoneError::InvalidConfig(format!("{flag} requires a non-negative integer, got {value:?}"))
    })
}

fn parse_args(args: &[String]) -> Result<Option<MainArgs>, OzoneError> {
    let mut config = OzoneConfig::default();
    let mut input = None;
    let mut months = None;
    let next_arg = |i: usize, flag: &str| -> Result<&str, OzoneError> {
        args.get(i)
            .map(String::as_str)
            .ok_or_else(|| OzoneError::InvalidConfig(format!("{flag} requires a value")))
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" | "-i" => {
                i += 1;
                input = Some(PathBuf::from(next_arg(i, "--input")?));
            }
            "--months" => {
                i += 1;
                months = Some(parse_number(next_arg(i, "--months")?, "--months")?);
            }
            "--rows" => {
                i += 1;
                config = config.rows(parse_number(next_arg(i, "--rows")?, "--rows")?);
            }
            "--cols" => {
                i += 1;
                config = config.cols(parse_number(next_arg(i, "--cols")?, "--cols")?);
            }
            "--retain-unmatched" => {
                config = config.unmatched(UnmatchedCells::Retain);
            }
            "--help" | "-h" => return Ok(None),
            other => {
                return Err(OzoneError::InvalidConfig(format!(
                    "unknown argument: {other}\n{USAGE}"
                )));
            }
        }
        i += 1;
    }

    let months = match months {
        Some(n) => n,
        None => match std::env::var(MONTHS_ENV) {
            Ok(value) => parse_number(value.trim(), MONTHS_ENV)?,
            Err(_) => config.months,
        },
    };
    config = config.months(months);
    Ok(Some(MainArgs { config, input }))
}

fn run(args: MainArgs) -> Result<ozone::Outcome, OzoneError> {
    let input: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin().lock()),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = ozone::run(&args.config, input, &mut out)?;
    Ok(report.outcome)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ozone_life=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let parsed = match parse_args(&args) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("ozone-life: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        rows = parsed.config.rows,
        cols = parsed.config.cols,
        months = parsed.config.months,
        input = ?parsed.input,
        "starting ozone simulation"
    );

    // A mismatched prediction is a normal outcome, not a failure.
    match run(parsed) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ozone-life: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_args;
    use ozone_life::ozone::UnmatchedCells;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("ozone-life")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn flags_feed_the_config_builder() {
        let parsed = parse_args(&args(&[
            "--rows",
            "8",
            "--cols",
            "9",
            "--months",
            "3",
            "--retain-unmatched",
            "--input",
            "holes.txt",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!((parsed.config.rows, parsed.config.cols), (8, 9));
        assert_eq!(parsed.config.months, 3);
        assert_eq!(parsed.config.unmatched, UnmatchedCells::Retain);
        assert_eq!(parsed.input.unwrap().to_str(), Some("holes.txt"));
    }

    #[test]
    fn bad_flags_are_errors() {
        assert!(parse_args(&args(&["--months"])).is_err());
        assert!(parse_args(&args(&["--rows", "-2"])).is_err());
        assert!(parse_args(&args(&["--frobnicate"])).is_err());
        assert!(parse_args(&args(&["--help"])).unwrap().is_none());
    }
}
