//! farm-runner: headless driver for the Coop farm simulation.
//!
//! Usage:
//!   farm-runner --seed 12345 --seconds 300 --fps 60
//!   farm-runner --seed 12345 --config farm.json --feed-below 40
//!   farm-runner --seed 12345 --ipc-mode

use anyhow::Result;
use coop_core::{
    command::PlayerCommand,
    config::FarmConfig,
    event::FarmEvent,
    session::{ActionOutcome, Session},
    snapshot::FarmSnapshot,
    types::EggId,
};
use std::collections::BTreeMap;
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Frame {
        count: u64,
        #[serde(default = "default_dt")]
        dt: f64,
    },
    Command {
        command: PlayerCommand,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct IpcReply {
    state: FarmSnapshot,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    events: Vec<FarmEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<ActionOutcome>,
}

fn default_dt() -> f64 {
    1.0 / 60.0
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let fps = parse_arg(&args, "--fps", 60u32).max(1);
    let feed_below = parse_arg(&args, "--feed-below", 40.0f64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());

    let config = match config_path {
        Some(path) => FarmConfig::load(path)?,
        None => FarmConfig::default(),
    };
    let seconds = parse_arg(&args, "--seconds", config.economy.session_length);

    if !ipc_mode {
        println!("Coop — farm-runner");
        println!("  seed:       {seed}");
        println!("  seconds:    {seconds}");
        println!("  fps:        {fps}");
        println!("  feed below: {feed_below}");
        println!("  config:     {}", config_path.unwrap_or("(defaults)"));
        println!();
    }

    let mut session = Session::new(config, seed)?;

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else {
        let dt = 1.0 / f64::from(fps);
        let frames = (seconds * f64::from(fps)).ceil() as u64;
        let tally = run_autopilot(&mut session, frames, dt, feed_below);
        print_summary(&session, &tally);
    }

    Ok(())
}

/// Plays the game the simple way: pick up every egg as soon as it
/// appears, feed the hungriest chicken once it drops below the threshold.
fn run_autopilot(session: &mut Session, frames: u64, dt: f64, feed_below: f64) -> BTreeMap<&'static str, u64> {
    let mut tally: BTreeMap<&'static str, u64> = BTreeMap::new();

    for _ in 0..frames {
        let eggs: Vec<EggId> = session.farm.eggs().iter().map(|e| e.id()).collect();
        for egg_id in eggs {
            session.harvest(egg_id);
        }

        let hungriest = session
            .farm
            .chickens()
            .iter()
            .filter(|c| c.is_hungry(feed_below))
            .min_by(|a, b| a.hunger().total_cmp(&b.hunger()))
            .map(|c| c.id());
        if let Some(chicken_id) = hungriest {
            if session.economy.money() >= session.farm.config().economy.feed_cost {
                session.feed(chicken_id);
            }
        }

        let report = session.frame(dt);
        for event in &report.events {
            *tally.entry(event.kind()).or_default() += 1;
        }
        if report.game_over {
            break;
        }
    }
    tally
}

fn run_ipc_loop(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Rejected IPC line: {e}");
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let (events, outcome) = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => (Vec::new(), None),
            IpcCommand::Frame { count, dt } => (session.run_frames(count, dt.max(0.0)), None),
            IpcCommand::Command { command } => (Vec::new(), Some(session.apply(command))),
        };

        let reply = IpcReply {
            state: session.snapshot(),
            events,
            outcome,
        };
        writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(session: &Session, tally: &BTreeMap<&'static str, u64>) {
    let farm = &session.farm;

    println!("=== RUN SUMMARY ===");
    println!("  seed:           {}", session.seed());
    println!("  frames:         {}", farm.frame());
    println!("  sim seconds:    {:.1}", farm.now());
    println!("  game over:      {}", session.is_game_over());
    println!("  time remaining: {:.1}", session.economy.time_remaining());
    println!("  money:          {}", session.economy.money());
    println!("  chickens alive: {}/{}", farm.live_count(), farm.chickens().len());
    println!("  eggs in play:   {} ({} hatched)", farm.eggs().len(), farm.hatched_count());

    println!();
    println!("=== EVENTS ===");
    if tally.is_empty() {
        println!("  (none)");
    }
    for (kind, count) in tally {
        println!("  {kind:<16} {count}");
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
