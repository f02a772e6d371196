use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use log::info;
use quiz_core::session::DEFAULT_TIME_LIMIT_SECS;
use services::{
    AppServices, AppServicesError, FileQuizSource, HttpQuizSource, QuizSource, QuizSourceConfig,
};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidTimeLimit { raw: String },
    ConflictingSources,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidTimeLimit { raw } => {
                write!(f, "invalid --time-limit value: {raw} (expected seconds > 0)")
            }
            ArgsError::ConflictingSources => {
                write!(f, "--quiz-url and --quiz-file cannot be combined")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--db <sqlite_url>] [--quiz-url <url> | --quiz-file <path>] [--time-limit <secs>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://quiz.sqlite3");
    eprintln!("  --quiz-url {}", services::DEFAULT_QUIZ_URL);
    eprintln!("  --time-limit {DEFAULT_TIME_LIMIT_SECS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_API_URL, QUIZ_FILE, QUIZ_TIME_LIMIT_SECS, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SourceArg {
    Url(String),
    File(PathBuf),
}

#[derive(Debug)]
struct Args {
    db_url: String,
    /// `None` defers to `QUIZ_API_URL` or the default endpoint.
    source: Option<SourceArg>,
    time_limit_secs: u32,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env("QUIZ_DB_URL")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| "sqlite://quiz.sqlite3".into(), normalize_sqlite_url);
        let env_file = env("QUIZ_FILE")
            .filter(|value| !value.trim().is_empty())
            .map(|value| SourceArg::File(PathBuf::from(value)));
        let mut time_limit_secs = match env("QUIZ_TIME_LIMIT_SECS") {
            Some(raw) => parse_time_limit(&raw)?,
            None => DEFAULT_TIME_LIMIT_SECS,
        };
        let mut url = None;
        let mut file = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--quiz-url" => {
                    url = Some(SourceArg::Url(require_value(args, "--quiz-url")?));
                }
                "--quiz-file" => {
                    file = Some(SourceArg::File(PathBuf::from(require_value(
                        args,
                        "--quiz-file",
                    )?)));
                }
                "--time-limit" => {
                    time_limit_secs = parse_time_limit(&require_value(args, "--time-limit")?)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let source = match (url, file) {
            (Some(_), Some(_)) => return Err(ArgsError::ConflictingSources),
            (Some(url), None) => Some(url),
            (None, Some(file)) => Some(file),
            (None, None) => env_file,
        };

        Ok(Self {
            db_url,
            source,
            time_limit_secs,
        })
    }
}

fn parse_time_limit(raw: &str) -> Result<u32, ArgsError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| ArgsError::InvalidTimeLimit {
            raw: raw.to_string(),
        })
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn build_source(source: Option<SourceArg>) -> Result<Arc<dyn QuizSource>, AppServicesError> {
    let source: Arc<dyn QuizSource> = match source {
        Some(SourceArg::File(path)) => {
            info!("quiz source: file {}", path.display());
            Arc::new(FileQuizSource::new(path))
        }
        Some(SourceArg::Url(raw)) => {
            let config = QuizSourceConfig::new(&raw)?;
            info!("quiz source: {}", config.url);
            Arc::new(HttpQuizSource::new(config))
        }
        None => {
            let config = QuizSourceConfig::from_env()?;
            info!("quiz source: {}", config.url);
            Arc::new(HttpQuizSource::new(config))
        }
    };
    Ok(source)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let source = build_source(parsed.source)?;
    let services =
        AppServices::new_sqlite(&parsed.db_url, source, parsed.time_limit_secs).await?;
    info!(
        "storage ready at {} ({}s per quiz)",
        parsed.db_url, parsed.time_limit_secs
    );

    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
