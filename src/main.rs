use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crawl::GameState;
use crawl::engine::{Output, OutputBlock, frame_map};
use crawl::error::MapError;
use crawl::world::{LoadedMap, load_map, load_world_from_file, validate_map};
use tracing_subscriber::EnvFilter;

/// Print one command's output. Events get a gap above them once, maps get a frame.
fn flush_output(out: Output) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    let mut gap_before_event = false;

    for block in out.blocks {
        match block {
            OutputBlock::Title(title) => writeln!(stdout, "\n{title}")?,
            OutputBlock::Text(line) => writeln!(stdout, "{line}")?,
            OutputBlock::Event(event) => {
                if std::mem::take(&mut gap_before_event) {
                    writeln!(stdout)?;
                }
                writeln!(stdout, "{event}")?;
                continue;
            }
            OutputBlock::Map(rows) => {
                writeln!(stdout)?;
                for row in frame_map(&rows) {
                    writeln!(stdout, "  {row}")?;
                }
            }
        }
        gap_before_event = true;
    }
    Ok(())
}

fn open_map(path: &Path) -> Result<LoadedMap, MapError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => load_world_from_file(path),
        _ => load_map(path),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let Some(map_path) = env::args().nth(1).map(PathBuf::from) else {
        eprintln!("Usage: crawl mapname");
        return ExitCode::from(1);
    };

    let state = match open_map(&map_path) {
        Ok(loaded) => GameState::from_loaded(loaded),
        Err(e) => {
            tracing::warn!(path = %map_path.display(), error = %e, "map failed to load");
            None
        }
    };
    let Some(mut state) = state else {
        eprintln!("Unable to load file");
        return ExitCode::from(2);
    };

    for finding in validate_map(&state.graph, state.start) {
        tracing::warn!(path = %map_path.display(), "{}", finding.message);
    }

    println!("Type 'help' for commands, 'quit' to exit.");
    if flush_output(state.initialize()).is_err() {
        return ExitCode::FAILURE;
    }

    let stdin = io::stdin();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => {
                println!("\nGoodbye.");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "failed to read input");
                return ExitCode::FAILURE;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (out, quit) = state.step(input);
        if let Err(e) = flush_output(out) {
            tracing::warn!(error = %e, "failed to write output");
            return ExitCode::FAILURE;
        }

        if quit {
            break;
        }
    }

    ExitCode::SUCCESS
}
