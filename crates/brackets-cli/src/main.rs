mod logging;

use std::{
    fmt, fs,
    io::{self, IsTerminal, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use brackets_core::{Config, InvalidCharacters, SAMPLE_INPUTS, ValidationError, validate};
use clap::{ArgAction, Parser};
use owo_colors::OwoColorize;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::logging::LogFormat;

/// Config file picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "brackets.toml";

/// Check that brackets are balanced
#[derive(Parser, Debug)]
#[command(name = "brackets", version, about)]
#[allow(clippy::struct_excessive_bools)]
struct Args {
    /// Strings to validate (reads stdin if no inputs, files or --demo are given)
    #[arg()]
    inputs: Vec<String>,

    /// File or glob pattern to read inputs from, one input per line
    #[arg(short, long = "file", value_name = "PATTERN")]
    files: Vec<String>,

    /// Read inputs from stdin, one per line
    #[arg(long)]
    stdin: bool,

    /// Validate the built-in sample inputs
    #[arg(long)]
    demo: bool,

    /// Print all results as a single boolean array
    #[arg(long)]
    array: bool,

    /// Exit with status 1 if any input is unbalanced
    #[arg(long)]
    check: bool,

    /// Configuration file (defaults to ./brackets.toml if it exists)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// How to treat characters that are not brackets
    #[arg(long, value_enum)]
    invalid_characters: Option<InvalidCharacters>,

    /// Ignore whitespace in inputs
    #[arg(long)]
    ignore_whitespace: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log line format
    #[arg(long, value_enum, default_value_t)]
    log_format: LogFormat,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose, args.log_format);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    debug!(?config, "loaded configuration");

    let mut any_error = false;
    let mut inputs = Vec::new();

    for source in sources(&args) {
        match source.read() {
            Ok(mut read) => inputs.append(&mut read),
            Err(e) => {
                eprintln!("{e}");
                any_error = true;
            }
        }
    }

    info!(count = inputs.len(), "validating inputs");
    let results: Vec<Result<bool, ValidationError>> = inputs
        .par_iter()
        .map(|input| validate(&input.text, &config))
        .collect();

    let mut any_unbalanced = false;
    let mut balanced_flags = Vec::with_capacity(results.len());
    let color = io::stdout().is_terminal();

    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(balanced) => {
                any_unbalanced |= !balanced;
                if args.array || args.demo {
                    balanced_flags.push(balanced);
                } else {
                    println!("{}", format_result(balanced, &input.text, color));
                }
            }
            Err(e) => {
                eprintln!("{}", input.describe(&e));
                any_error = true;
            }
        }
    }

    if args.array || args.demo {
        println!("{balanced_flags:?}");
    }

    if any_error {
        return ExitCode::from(2);
    }
    if args.check && any_unbalanced {
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Format one result line: the verdict padded to a fixed width, then the input.
fn format_result(balanced: bool, text: &str, color: bool) -> String {
    let label = format!("{balanced:<5}");
    if !color {
        return format!("{label} {text}");
    }
    if balanced {
        format!("{} {text}", label.green())
    } else {
        format!("{} {text}", label.red())
    }
}

fn load_config(args: &Args) -> Result<Config, Error> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => {
            let path = Path::new(DEFAULT_CONFIG);
            if path.is_file() {
                read_config(path)?
            } else {
                Config::default()
            }
        }
    };

    if let Some(policy) = args.invalid_characters {
        config.invalid_characters = policy;
    }
    if args.ignore_whitespace {
        config.ignore_whitespace = true;
    }

    Ok(config)
}

fn read_config(path: &Path) -> Result<Config, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Where inputs come from, in the order they are reported.
#[derive(Debug)]
enum Source<'a> {
    Demo,
    Arguments(&'a [String]),
    Pattern(&'a str),
    Stdin,
}

fn sources(args: &Args) -> Vec<Source<'_>> {
    let mut sources = Vec::new();

    if args.demo {
        sources.push(Source::Demo);
    }
    if !args.inputs.is_empty() {
        sources.push(Source::Arguments(&args.inputs));
    }
    sources.extend(args.files.iter().map(|p| Source::Pattern(p)));
    if args.stdin || sources.is_empty() {
        sources.push(Source::Stdin);
    }

    sources
}

impl Source<'_> {
    fn read(&self) -> Result<Vec<Input>, Error> {
        match self {
            Self::Demo => Ok(SAMPLE_INPUTS
                .iter()
                .enumerate()
                .map(|(i, text)| Input::new(Origin::Sample(i + 1), *text))
                .collect()),
            Self::Arguments(inputs) => Ok(inputs
                .iter()
                .enumerate()
                .map(|(i, text)| Input::new(Origin::Argument(i + 1), text.as_str()))
                .collect()),
            Self::Pattern(pattern) => read_pattern(pattern),
            Self::Stdin => {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text)?;
                Ok(lines(&text, |line| Origin::Stdin { line }))
            }
        }
    }
}

fn read_pattern(pattern: &str) -> Result<Vec<Input>, Error> {
    let paths = glob::glob(pattern).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut inputs = Vec::new();
    let mut matched = 0;

    for entry in paths {
        let path = entry.map_err(|e| Error::Read {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if !path.is_file() {
            continue;
        }
        matched += 1;

        debug!(path = %path.display(), "reading inputs");
        let text = fs::read_to_string(&path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?;
        inputs.extend(lines(&text, |line| Origin::File {
            path: path.clone(),
            line,
        }));
    }

    if matched == 0 {
        return Err(Error::NoMatches(pattern.to_string()));
    }

    Ok(inputs)
}

/// Split `text` into one input per line.
fn lines(text: &str, origin: impl Fn(usize) -> Origin) -> Vec<Input> {
    text.lines()
        .enumerate()
        .map(|(i, line)| Input::new(origin(i + 1), line))
        .collect()
}

/// Where a single input came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Origin {
    Sample(usize),
    Argument(usize),
    File { path: PathBuf, line: usize },
    Stdin { line: usize },
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sample(n) => write!(f, "sample {n}"),
            Self::Argument(n) => write!(f, "argument {n}"),
            Self::File { path, line } => write!(f, "{}:{line}", path.display()),
            Self::Stdin { line } => write!(f, "stdin:{line}"),
        }
    }
}

#[derive(Debug)]
struct Input {
    origin: Origin,
    text: String,
}

impl Input {
    fn new(origin: Origin, text: &str) -> Self {
        Self {
            origin,
            text: text.to_string(),
        }
    }

    /// Describe a validation failure relative to where the input came from.
    fn describe(&self, error: &ValidationError) -> String {
        match (&self.origin, error) {
            (
                Origin::File { .. } | Origin::Stdin { .. },
                ValidationError::InvalidCharacter {
                    character,
                    location,
                    ..
                },
            ) => format!(
                "{}:{}: unrecognized character {character:?}",
                self.origin, location.column
            ),
            _ => format!("{}: {error}", self.origin),
        }
    }
}

#[derive(Debug, Error)]
enum Error {
    #[error("{}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("stdin: {0}")]
    Io(#[from] io::Error),

    #[error("{}: invalid configuration: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("{0}: no files matched")]
    NoMatches(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_result_plain() {
        assert_eq!(format_result(true, "()", false), "true  ()");
        assert_eq!(format_result(false, "(]", false), "false (]");
    }

    #[test]
    fn test_format_result_colored_keeps_text() {
        let line = format_result(true, "{}", true);
        assert!(line.contains("true"));
        assert!(line.ends_with(" {}"));
        assert_ne!(line, "true  {}");
    }

    #[test]
    fn test_lines_numbered_from_one() {
        let inputs = lines("()\n[\r\n", |line| Origin::Stdin { line });
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].origin, Origin::Stdin { line: 1 });
        assert_eq!(inputs[1].text, "[");
        assert_eq!(inputs[1].origin.to_string(), "stdin:2");
    }

    #[test]
    fn test_describe_line_input_uses_column() {
        let input = Input::new(
            Origin::File {
                path: PathBuf::from("in.txt"),
                line: 4,
            },
            "(a)",
        );
        let err = validate(&input.text, &Config::default()).unwrap_err();
        assert_eq!(
            input.describe(&err),
            "in.txt:4:2: unrecognized character 'a'"
        );
    }

    #[test]
    fn test_describe_argument() {
        let input = Input::new(Origin::Argument(2), "[x]");
        let err = validate(&input.text, &Config::default()).unwrap_err();
        assert_eq!(
            input.describe(&err),
            "argument 2: 1:2: unrecognized character 'x'"
        );
    }

    #[test]
    fn test_sources_default_to_stdin() {
        let args = Args::parse_from(["brackets"]);
        assert!(matches!(sources(&args).as_slice(), [Source::Stdin]));
    }

    #[test]
    fn test_sources_order() {
        let args = Args::parse_from(["brackets", "--demo", "()", "-f", "a.txt", "--stdin"]);
        assert!(matches!(
            sources(&args).as_slice(),
            [
                Source::Demo,
                Source::Arguments(_),
                Source::Pattern("a.txt"),
                Source::Stdin
            ]
        ));
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "brackets",
            "--invalid-characters",
            "skip",
            "--ignore-whitespace",
            "()",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.invalid_characters, InvalidCharacters::Skip);
        assert!(config.ignore_whitespace);
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let args = Args::parse_from(["brackets", "--config", "does/not/exist.toml", "()"]);
        assert!(matches!(load_config(&args), Err(Error::Read { .. })));
    }
}
