//! Command line parsing

use std::path::PathBuf;
use thiserror::Error;

pub const USAGE: &str = "\
Usage: check_cmm -H <host> [-c <community>] [-C <config>] [-v] [-h]

Checks an IBM/Lenovo PureFlex Chassis Management Module over SNMP.

Options:
  -H, --host <host>            CMM hostname or address (required)
  -c, --community <community>  SNMP community (default: public)
  -C, --config <path>          Configuration file (TOML)
  -v, --verbose                Print each step before the status line
  -h, --help                   Print this help and exit

Exit codes: 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN";

/// First line of `USAGE`, for one-line error output
pub fn synopsis() -> &'static str {
    USAGE.lines().next().unwrap_or_default()
}

#[derive(Debug, Error, PartialEq)]
pub enum CliError {
    #[error("missing required option -H/--host")]
    MissingHost,

    #[error("option {0} requires a value")]
    MissingValue(String),

    #[error("unknown argument {0}")]
    UnknownArgument(String),
}

impl CliError {
    /// Error followed by the synopsis, on a single line
    pub fn with_usage(&self) -> String {
        format!("{}. {}", self, synopsis())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub host: String,
    pub community: Option<String>,
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Help,
    Run(CliArgs),
}

/// Parse arguments, program name excluded. `--help` stops parsing.
pub fn parse_args<I, S>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut host = None;
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter().map(Into::<String>::into);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        let mut value = |flag: &str| -> Result<String, CliError> {
            inline
                .clone()
                .or_else(|| args.next())
                .filter(|v| !v.starts_with('-'))
                .ok_or_else(|| CliError::MissingValue(flag.to_string()))
        };

        match flag.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-H" | "--host" => host = Some(value(&flag)?),
            "-c" | "--community" => parsed.community = Some(value(&flag)?),
            "-C" | "--config" => parsed.config = Some(PathBuf::from(value(&flag)?)),
            "-v" | "--verbose" => parsed.verbose = true,
            _ => return Err(CliError::UnknownArgument(arg)),
        }
    }

    parsed.host = host
        .filter(|h: &String| !h.is_empty())
        .ok_or(CliError::MissingHost)?;
    Ok(Command::Run(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_arguments() {
        let cmd = parse_args(["-H", "cmm01", "-c", "private", "-v"]).unwrap();
        assert_eq!(
            cmd,
            Command::Run(CliArgs {
                host: "cmm01".into(),
                community: Some("private".into()),
                config: None,
                verbose: true,
            })
        );
    }

    #[test]
    fn test_long_forms() {
        let cmd = parse_args(["--host=cmm02", "--community", "ro", "--config", "/etc/cmm.toml"]).unwrap();
        let Command::Run(args) = cmd else {
            panic!("expected run");
        };
        assert_eq!(args.host, "cmm02");
        assert_eq!(args.community.as_deref(), Some("ro"));
        assert_eq!(args.config, Some(PathBuf::from("/etc/cmm.toml")));
        assert!(!args.verbose);
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse_args(["-v", "--help", "-H"]).unwrap(), Command::Help);
        assert_eq!(parse_args(["-h"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_missing_host() {
        assert_eq!(parse_args(["-c", "public"]), Err(CliError::MissingHost));
        assert_eq!(parse_args(Vec::<String>::new()), Err(CliError::MissingHost));
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            parse_args(["-H"]),
            Err(CliError::MissingValue("-H".into()))
        );
    }

    #[test]
    fn test_option_is_not_taken_as_value() {
        assert_eq!(
            parse_args(["-H", "-v"]),
            Err(CliError::MissingValue("-H".into()))
        );
        assert_eq!(
            parse_args(["-H", "cmm01", "-c", "--verbose"]),
            Err(CliError::MissingValue("-c".into()))
        );
    }

    #[test]
    fn test_error_carries_usage_on_one_line() {
        let line = CliError::MissingHost.with_usage();
        assert_eq!(
            line,
            "missing required option -H/--host. \
             Usage: check_cmm -H <host> [-c <community>] [-C <config>] [-v] [-h]"
        );
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_unknown_argument() {
        assert_eq!(
            parse_args(["-H", "cmm01", "--warn", "5"]),
            Err(CliError::UnknownArgument("--warn".into()))
        );
    }
}
