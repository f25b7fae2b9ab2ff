#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Minotaur Labyrinth.

mod audio;
mod config;
mod scene;
mod survivors;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use minotaur_core::{Event, Outcome};
use minotaur_rendering::{Color, CuePlayer, Presentation, RenderingBackend, SceneFlow};
use minotaur_rendering_macroquad::MacroquadBackend;
use minotaur_session::{FrameEvents, Session, SessionConfig, Snapshot};
use minotaur_world::query;
use tracing_subscriber::EnvFilter;

use crate::{audio::LoggingCuePlayer, survivors::SurvivorsFile};

const DEFAULT_LOG_FILTER: &str = "minotaur=info";

/// Escape the labyrinth before the Minotaur finds you.
#[derive(Debug, Parser)]
#[command(name = "minotaur-labyrinth", version, about)]
struct CliArgs {
    /// TOML file overriding the classic rules.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for gear placement and lantern failures.
    #[arg(long)]
    seed: Option<u64>,

    /// Name written to the survivors file after an escape.
    #[arg(long)]
    name: Option<String>,

    /// File that collects the names of survivors.
    #[arg(long, value_name = "PATH", default_value = "survivors.txt")]
    survivors: PathBuf,

    /// Run the given number of frames without a window and exit.
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long)]
    vsync: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let config = config::load(args.config.as_deref(), args.seed)?;
    let session = Session::new(config.clone()).context("failed to start session")?;
    println!("{}", query::welcome_banner(session.world()));

    let ledger = SurvivorsFile::new(&args.survivors);
    match args.headless {
        Some(frames) => {
            let _ = run_headless(session, frames, ledger, args.name.as_deref());
            Ok(())
        }
        None => run_windowed(session, &config, ledger, args.name, args.vsync),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_headless(
    mut session: Session,
    frames: u64,
    mut ledger: SurvivorsFile,
    name: Option<&str>,
) -> Snapshot {
    let mut cues = LoggingCuePlayer::default();
    for _ in 0..frames {
        let events = session.tick();
        if events.is_empty() {
            break;
        }
        play_frame(&events, &mut cues);
        record_escape(&mut session, &events, &mut ledger, name);
    }

    let snapshot = session.snapshot();
    tracing::info!(
        frames = snapshot.tick,
        cues = cues.played(),
        gear = snapshot.gear_collected,
        lives = snapshot.lives,
        outcome = ?snapshot.outcome,
        "headless run finished"
    );
    snapshot
}

fn run_windowed(
    mut session: Session,
    config: &SessionConfig,
    mut ledger: SurvivorsFile,
    name: Option<String>,
    vsync: bool,
) -> Result<()> {
    let scene = scene::build_scene(&session.snapshot()).context("failed to build scene")?;
    let presentation = Presentation::new(
        "Minotaur Labyrinth",
        Color::from_rgb_u8(12, 10, 8),
        config.rules.ticks_per_second,
        scene,
    );
    let mut cues = LoggingCuePlayer::default();

    let backend = MacroquadBackend::new().with_vsync(vsync);
    backend.run(presentation, move |input, scene| {
        let quit = input.quit;
        session.process_input(input);
        let events = session.tick();
        play_frame(&events, &mut cues);
        record_escape(&mut session, &events, &mut ledger, name.as_deref());
        scene::update_scene(scene, &session.snapshot());

        match session.outcome() {
            Some(Outcome::QuitRequested) => SceneFlow::Exit,
            Some(_) if quit => SceneFlow::Exit,
            _ => SceneFlow::Continue,
        }
    })
}

fn play_frame(events: &FrameEvents, player: &mut dyn CuePlayer) {
    for event in events.iter() {
        if !matches!(event, Event::TimeAdvanced { .. }) {
            tracing::debug!(?event, "event");
        }
    }
    for cue in events.cues() {
        player.play(cue);
    }
}

fn record_escape(
    session: &mut Session,
    events: &FrameEvents,
    ledger: &mut SurvivorsFile,
    name: Option<&str>,
) {
    let escaped = events
        .iter()
        .any(|event| matches!(event, Event::SessionEnded { outcome: Outcome::Win }));
    if !escaped {
        return;
    }

    let Some(name) = name else {
        tracing::info!("escaped without a name; survivors file left untouched");
        return;
    };
    match session.record_survivor(ledger, name) {
        Ok(true) => tracing::info!(path = %ledger.path().display(), "survivor recorded"),
        Ok(false) => {}
        Err(error) => tracing::error!("failed to record survivor: {error:#}"),
    }
}
