use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use hexviewer_client::SessionConfig;
use hexviewer_core::TextEncoding;

/// View any file as a grid of bytes. Press `h` inside the viewer for help.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// File to open
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Encoding used to show bytes in character mode
    #[arg(short, long, env = "HEXVIEWER_ENCODING", default_value = "ascii")]
    pub encoding: String,

    /// Color every byte by its offset in the file
    #[arg(short, long)]
    pub rainbow: bool,

    /// Write diagnostics to this file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Why the viewer refused to start.
#[derive(Debug)]
pub enum StartupError {
    NoSuchFile(PathBuf),
    NotAFile(PathBuf),
    BadEncoding(String),
    PermissionDenied(PathBuf),
    Unreadable { path: PathBuf, source: io::Error },
}

impl StartupError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            StartupError::Unreadable { .. } => 1,
            StartupError::NoSuchFile(_) => 2,
            StartupError::NotAFile(_) => 3,
            StartupError::BadEncoding(_) => 4,
            StartupError::PermissionDenied(_) => 5,
        }
    }

    fn from_open(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => StartupError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotFound => StartupError::NoSuchFile(absolute(path)),
            _ => StartupError::Unreadable {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::NoSuchFile(path) => {
                write!(f, "There is no such file: {}!", path.display())
            }
            StartupError::NotAFile(path) => write!(f, "There is not a file: {}!", path.display()),
            StartupError::BadEncoding(name) => write!(f, "Incorrect encoding: {name}!"),
            StartupError::PermissionDenied(path) => write!(
                f,
                "Permission denied: {}!\nRestart the program with enough rights to read it.",
                path.display()
            ),
            StartupError::Unreadable { path, source } => {
                write!(f, "Cannot open {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StartupError {}

/// Outcome of a successful validation.
#[derive(Debug)]
pub enum Startup {
    /// Everything checks out; hand over to the viewer.
    Ready(SessionConfig),
    /// Nothing to show. Not an error.
    EmptyFile,
}

impl Args {
    /// Check the file and encoding before any terminal setup happens.
    pub fn validate(&self) -> std::result::Result<Startup, StartupError> {
        let path = &self.file;
        if !path.exists() {
            return Err(StartupError::NoSuchFile(absolute(path)));
        }
        if !path.is_file() {
            return Err(StartupError::NotAFile(absolute(path)));
        }
        let encoding = TextEncoding::for_label(&self.encoding)
            .map_err(|_| StartupError::BadEncoding(self.encoding.clone()))?;
        let meta = std::fs::metadata(path).map_err(|e| StartupError::from_open(path, e))?;
        if meta.len() == 0 {
            return Ok(Startup::EmptyFile);
        }
        File::open(path).map_err(|e| StartupError::from_open(path, e))?;
        Ok(Startup::Ready(SessionConfig {
            path: path.clone(),
            encoding,
            rainbow: self.rainbow,
        }))
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Send tracing output to `log_file`, if one was given.
///
/// The viewer owns the whole screen, so nothing is logged to the terminal.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(())
}

pub fn run() -> ExitCode {
    run_with_args(Args::parse())
}

fn run_with_args(args: Args) -> ExitCode {
    let config = match args.validate() {
        Ok(Startup::Ready(config)) => config,
        Ok(Startup::EmptyFile) => {
            println!("File is empty!");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };
    if let Err(err) = init_logging(args.log_file.as_deref()) {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }
    tracing::info!(
        path = %config.path.display(),
        encoding = config.encoding.name(),
        rainbow = config.rainbow,
        "starting viewer"
    );
    match hexviewer_client::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "viewer failed");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("hexviewer").chain(args.iter().cloned())).unwrap()
    }

    fn non_empty_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"payload").unwrap();
        file
    }

    #[test]
    fn parses_defaults() {
        let args = parse(&["data.bin"]);
        assert_eq!(args.file, PathBuf::from("data.bin"));
        assert_eq!(args.encoding, "ascii");
        assert!(!args.rainbow);
        assert!(args.log_file.is_none());
    }

    #[test]
    fn parses_flags() {
        let args = parse(&["-e", "koi8-r", "--rainbow", "--log-file", "/tmp/x.log", "f"]);
        assert_eq!(args.encoding, "koi8-r");
        assert!(args.rainbow);
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/x.log")));
    }

    #[test]
    fn file_is_required() {
        assert!(Args::try_parse_from(["hexviewer"]).is_err());
    }

    #[test]
    fn accepts_readable_file() {
        let file = non_empty_file();
        let args = parse(&["-r", file.path().to_str().unwrap()]);
        match args.validate().unwrap() {
            Startup::Ready(config) => {
                assert_eq!(config.path, file.path());
                assert!(config.rainbow);
                assert_eq!(config.encoding.name(), "windows-1252");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_file() {
        let err = parse(&["/no/such/file"]).validate().unwrap_err();
        assert!(matches!(err, StartupError::NoSuchFile(_)));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "There is no such file: /no/such/file!");
    }

    #[test]
    fn rejects_directory() {
        let dir = TempDir::new().unwrap();
        let err = parse(&[dir.path().to_str().unwrap()]).validate().unwrap_err();
        assert!(matches!(err, StartupError::NotAFile(_)));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn rejects_bad_encoding() {
        let file = non_empty_file();
        let err = parse(&["-e", "klingon", file.path().to_str().unwrap()])
            .validate()
            .unwrap_err();
        assert!(matches!(err, StartupError::BadEncoding(ref name) if name == "klingon"));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn encoding_checked_before_emptiness() {
        let file = NamedTempFile::new().unwrap();
        let err = parse(&["-e", "utf-16le", file.path().to_str().unwrap()])
            .validate()
            .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn empty_file_is_not_an_error() {
        let file = NamedTempFile::new().unwrap();
        let startup = parse(&[file.path().to_str().unwrap()]).validate().unwrap();
        assert!(matches!(startup, Startup::EmptyFile));
    }

    #[test]
    fn open_errors_map_to_categories() {
        let path = Path::new("/some/file");
        let denied = StartupError::from_open(path, io::ErrorKind::PermissionDenied.into());
        assert_eq!(denied.exit_code(), 5);
        assert!(denied.to_string().starts_with("Permission denied: /some/file!"));
        let other = StartupError::from_open(path, io::Error::other("bad sector"));
        assert_eq!(other.exit_code(), 1);
        assert!(other.to_string().contains("bad sector"));
    }

    #[test]
    fn logging_without_file_is_noop() {
        assert!(init_logging(None).is_ok());
    }

    #[test]
    fn logging_to_unwritable_path_fails() {
        let err = init_logging(Some(Path::new("/no/such/dir/viewer.log"))).unwrap_err();
        assert!(err.to_string().contains("cannot open log file"));
    }

    #[test]
    fn empty_file_exits_successfully() {
        let file = NamedTempFile::new().unwrap();
        let code = run_with_args(parse(&[file.path().to_str().unwrap()]));
        assert_eq!(code, ExitCode::SUCCESS);
    }
}
