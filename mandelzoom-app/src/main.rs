use std::process::ExitCode;

use tracing::{error, info, warn};

use mandelzoom_app::{AppError, Gesture, LogSink, Settings, ViewportController};

/// Replay the gestures given on the command line against a fresh session.
fn run() -> Result<(), AppError> {
    let gestures = std::env::args()
        .skip(1)
        .map(|arg| arg.parse::<Gesture>())
        .collect::<Result<Vec<_>, _>>()?;

    let settings = Settings::load();
    let mut viewport = ViewportController::new(&settings, LogSink::default())?;

    for gesture in gestures {
        match gesture.selection() {
            Some(selection) => {
                if let Err(e) = viewport.release(selection) {
                    warn!(?gesture, "Gesture ignored: {e}");
                }
            }
            None => {
                viewport.reset();
            }
        }
    }

    info!(
        frames = viewport.sink().frames_presented,
        bounds = %viewport.bounds(),
        "Session finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting MandelZoom");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
