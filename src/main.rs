use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use point_index::command::{parse_line, Command, ParsedLine};
use point_index::{PointIndexError, Session};

/// Exhaustive-scan k-d point index.
///
/// Reads one command per line: `LOAD <path>`, `NN <k ints>`,
/// `RS <2k ints>`, `DEBUG`, `EXIT`.
#[derive(Parser, Debug)]
#[command(name = "point-index", version, about)]
struct Args {
    /// Read commands from this file instead of stdin.
    script: Option<PathBuf>,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(err) => {
                error!(path = %path.display(), %err, "cannot open command script");
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(BufReader::new(io::stdin())),
    };

    match run(input) {
        Ok(code) => code,
        Err(err) => {
            error!(%err, "session aborted");
            ExitCode::FAILURE
        }
    }
}

/// The command loop. Ends with success only on an explicit `EXIT`; running
/// out of input first is a failure, matching the legacy tool.
fn run(input: Box<dyn BufRead>) -> io::Result<ExitCode> {
    let mut session: Session<i64> = Session::new();
    let stdout = io::stdout();

    for line in input.lines() {
        let line = line?;
        let command = match parse_line::<i64>(&line) {
            ParsedLine::Command(command) => command,
            ParsedLine::Empty => continue,
            ParsedLine::Invalid(keyword) => {
                warn!(command = %keyword, "invalid command, try again");
                continue;
            }
        };

        match command {
            Command::Load(path) => {
                if let Err(err) = session.load(&path) {
                    warn!(%path, %err, "LOAD failed");
                }
            }
            Command::Nearest(coords) => match session.nearest(&coords.into()) {
                Ok(points) => print_points(&mut stdout.lock(), &points)?,
                Err(err) => warn_query("NN", &err),
            },
            Command::Range(flat) => {
                let bounds: Vec<(i64, i64)> =
                    flat.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();
                match session.range(&bounds) {
                    Ok(points) => print_points(&mut stdout.lock(), &points)?,
                    Err(err) => warn_query("RS", &err),
                }
            }
            Command::Debug => {
                if let Err(err) = session.debug_dump(&mut io::stderr()) {
                    warn_query("DEBUG", &err);
                }
            }
            Command::Exit => return Ok(ExitCode::SUCCESS),
        }
    }

    error!("input ended without EXIT");
    Ok(ExitCode::FAILURE)
}

fn print_points(out: &mut impl Write, points: &[&point_index::Point<i64>]) -> io::Result<()> {
    for point in points {
        writeln!(out, "{}", point)?;
    }
    Ok(())
}

fn warn_query(command: &str, err: &PointIndexError) {
    warn!(%command, %err, "query rejected");
}
