//! Hold Flap headless driver
//!
//! Plays one session on a virtual clock with a simple autopilot holding the
//! input, logging what happens. Useful for balancing tuning files.
//!
//! Usage: `hold-flap [--seed N] [--tuning PATH] [--seconds S] [--json]`

use std::process::ExitCode;
use std::time::Duration;

use hold_flap::Tuning;
use hold_flap::sim::{Scheduler, SerialScheduler, Session, SessionEvent, SessionTask};

/// Frame length of the driver loop (the embedding app's render cadence)
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug)]
struct Options {
    seed: u64,
    tuning: Option<String>,
    seconds: u64,
    json: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: None,
            seconds: 120,
            json: false,
        }
    }
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                options.seed = value
                    .parse()
                    .map_err(|_| format!("invalid seed: {value}"))?;
            }
            "--tuning" => {
                options.tuning = Some(args.next().ok_or("--tuning needs a path")?);
            }
            "--seconds" => {
                let value = args.next().ok_or("--seconds needs a value")?;
                options.seconds = value
                    .parse()
                    .map_err(|_| format!("invalid seconds: {value}"))?;
            }
            "--json" => options.json = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(options)
}

/// Hold while the character sits below the corridor it has to pass next
fn autopilot_wants_hold(session: &Session) -> bool {
    let character = session.character();
    let target = session
        .obstacles()
        .iter()
        .find(|o| o.x + session.tuning().obstacle_width / 2.0 >= character.x - character.size / 2.0)
        .map(|o| o.gap_y)
        .unwrap_or(session.playfield().height() / 2.0);
    // Lead the target by the current fall speed
    character.y + character.vel * 6.0 > target
}

fn main() -> ExitCode {
    env_logger::init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("usage: hold-flap [--seed N] [--tuning PATH] [--seconds S] [--json]");
            return ExitCode::from(2);
        }
    };

    let tuning = match &options.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    log::info!("Hold Flap (headless) starting with seed {}", options.seed);

    let mut scheduler: SerialScheduler<SessionTask> = SerialScheduler::new();
    let mut session = Session::new(tuning, options.seed);
    session.start(&mut scheduler);

    let limit = Duration::from_secs(options.seconds);
    while session.is_active() && scheduler.now() < limit {
        match (autopilot_wants_hold(&session), session.hold().holding()) {
            (true, false) => session.press_start(scheduler.now()),
            (false, true) => session.press_end(),
            _ => {}
        }

        scheduler.advance(FRAME, |task, s| session.dispatch(task, s));

        for event in session.drain_events() {
            match event {
                SessionEvent::Spawned { id } => log::debug!("spawned obstacle {id}"),
                SessionEvent::Scored { id, score } => {
                    log::info!("passed obstacle {id}, score {score}")
                }
                SessionEvent::Ended { reason, score } => {
                    log::info!("game over: {reason:?}, final score {score}")
                }
            }
            if options.json {
                match serde_json::to_string(&session.snapshot()) {
                    Ok(json) => println!("{json}"),
                    Err(err) => log::warn!("snapshot serialization failed: {err}"),
                }
            }
        }
    }

    if session.is_active() {
        session.stop(&mut scheduler);
    }

    println!(
        "score {} after {:.1}s ({} ticks)",
        session.score(),
        scheduler.now().as_secs_f32(),
        session.ticks()
    );
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autopilot_holds_when_below_target() {
        let mut scheduler: SerialScheduler<SessionTask> = SerialScheduler::new();
        let mut session = Session::new(Tuning::default(), 1);
        session.set_playfield(390.0, 844.0);
        session.start(&mut scheduler);
        // No obstacles: target is mid-screen (422), character starts at 200
        assert!(!autopilot_wants_hold(&session));

        session.set_playfield(390.0, 300.0);
        assert!(autopilot_wants_hold(&session));
    }
}
