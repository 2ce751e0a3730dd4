//! Terminal front end.
//!
//! Reads one command per line from stdin and redraws the screen after every
//! change. Timed phases advance on their own while the loop waits for input.
//!
//! # Usage
//!
//! ```text
//! emotion-jar [CONFIG_PATH]
//! ```
//!
//! `CONFIG_PATH` defaults to `<data_dir>/config.toml`.
//!
//! # Commands
//!
//! - Home: `w` write, `g` open the jar, `r` random note, `q` quit
//! - Input: each line is added to the draft; an empty line or `:done` submits,
//!   `:clear` empties the draft, `:back` returns home keeping it
//! - Review prompt: Enter or `o` to unfold
//! - Result: Enter or `s` to put in the jar / go back home
//! - Gallery: a note number to view it, `r` random, `b` back

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};

use emotion_jar::observability::init_tracing;
use emotion_jar::ui::{parse_command, render, Command};
use emotion_jar::{initialize, Config, Session, Theme};

const SAVE_FAILED_NOTICE: &str = "没能收进罐子，请再试一次。";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(Config::default_path, PathBuf::from);

    let config = match Config::load(&config_path) {
        Ok(config) => config.with_env(),
        Err(e) => {
            eprintln!("emotion-jar: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);
    tracing::info!(config = %config_path.display(), "starting emotion jar");

    let theme = config.theme();
    let mut session = match initialize(&config) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "initialization failed");
            eprintln!("emotion-jar: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&mut session, &theme).await {
        Ok(()) => {
            tracing::info!("emotion jar closed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "terminal I/O failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(session: &mut Session, theme: &Theme) -> io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut notice: Option<&str> = None;
    draw(session, theme, notice)?;

    loop {
        let rerender = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_command(session.screen(), &line, session.store().notes()) {
                    Command::Quit => break,
                    Command::Ignore => false,
                    Command::Dispatch(events) => {
                        let mut rerender = false;
                        for event in events {
                            match session.dispatch(event) {
                                Ok(changed) => rerender |= changed,
                                Err(e) => {
                                    tracing::error!(error = %e, "event failed");
                                    notice = Some(SAVE_FAILED_NOTICE);
                                    rerender = true;
                                }
                            }
                        }
                        rerender
                    }
                }
            }
            Some(outcome) = session.advance(), if session.is_busy() => {
                outcome.unwrap_or_else(|e| {
                    tracing::error!(error = %e, "scheduled step failed");
                    false
                })
            }
        };

        if rerender {
            draw(session, theme, notice.take())?;
        }
    }

    Ok(())
}

fn draw(session: &Session, theme: &Theme, notice: Option<&str>) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    render(&session.viewmodel(), theme, &mut stdout)?;
    if let Some(notice) = notice {
        writeln!(stdout, "{}{notice}{}", Theme::fg(&theme.colors.accent_fg), Theme::reset())?;
    }
    stdout.flush()
}
