//! Orca Echo entry point
//!
//! Native only: opens the serial device, runs the frame loop, and treats a
//! line on stdin (Enter) as a pointer click.
//!
//! Usage: `orca-echo [DEVICE] [SETTINGS_JSON]`

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use orca_echo::Settings;
use orca_echo::audio::{AudioManager, LogBackend};
use orca_echo::consts::MAX_SUBSTEPS;
use orca_echo::input::InputAdapter;
use orca_echo::platform::{DeviceEvent, DeviceLink};
use orca_echo::renderer::build_frame;
use orca_echo::sim::{GameEvent, GameState, tick};

/// Game instance holding all state
struct Game {
    settings: Settings,
    state: GameState,
    input: InputAdapter,
    link: DeviceLink,
    audio: AudioManager<LogBackend>,
    clicks: Receiver<()>,
    accumulator: f32,
    last_status: String,
    last_score: u32,
}

impl Game {
    fn new(settings: Settings, clicks: Receiver<()>) -> Self {
        let state = GameState::new(settings.sim);
        let input = InputAdapter::new(settings.sim);
        let audio = AudioManager::new(LogBackend, &settings.audio);
        Self {
            settings,
            state,
            input,
            link: DeviceLink::new(),
            audio,
            clicks,
            accumulator: 0.0,
            last_status: String::new(),
            last_score: 0,
        }
    }

    /// Open the configured device; failures arrive later as link errors
    fn connect(&mut self) {
        match self.settings.link.device_path.clone() {
            Some(path) => {
                self.link.connect_path(&path, self.settings.link.baud_rate);
            }
            None => {
                // Settle the pending click so the next one can try again
                self.input.apply(&DeviceEvent::Error("No serial device configured".into()));
            }
        }
    }

    /// One simulation frame
    fn step(&mut self) {
        // Pointer clicks only ever request a connection
        if self.clicks.try_iter().count() > 0 && self.input.click() {
            self.connect();
        }

        let events = self.link.drain();
        self.input.apply_all(&events);

        let input = self.input.tick_input();
        tick(&mut self.state, &input);

        let game_events = self.state.drain_events();
        self.audio.handle(&game_events);
        for event in &game_events {
            if let GameEvent::FoodFound { kind, score } = event {
                log::info!("Food found by {:?}, score {}", kind, score);
            }
        }
    }

    /// Run as many frames as the elapsed time covers
    fn update(&mut self, dt: f32) {
        let frame_dt = self.settings.frame_dt();
        self.accumulator += dt.min(0.25);

        let mut substeps = 0;
        while self.accumulator >= frame_dt && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= frame_dt;
            substeps += 1;
        }
        // Fell too far behind; drop the backlog
        self.accumulator = self.accumulator.min(frame_dt);
    }

    /// Hand the frame to the presentation layer
    fn render(&mut self) {
        let frame = build_frame(&self.state);
        log::trace!("{} vertices, {}", frame.vertices.len(), frame.score_text);

        if self.state.score != self.last_score {
            log::info!("{}", frame.score_text);
            self.last_score = self.state.score;
        }
        if self.input.status() != self.last_status {
            log::info!("Status: {}", self.input.status());
            self.last_status = self.input.status().to_string();
        }
    }
}

fn load_settings(path: Option<PathBuf>) -> Result<Settings> {
    let Some(path) = path else {
        log::info!("Using default settings");
        return Ok(Settings::default());
    };
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    let settings = Settings::from_json(&json)
        .with_context(|| format!("parsing settings in {}", path.display()))?;
    log::info!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Each line typed on stdin counts as a click
fn spawn_click_reader() -> Receiver<()> {
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("stdin-clicks".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                if line.is_err() || tx.send(()).is_err() {
                    break;
                }
            }
        });
    if let Err(e) = spawned {
        log::warn!("Click input unavailable: {}", e);
    }
    rx
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Orca Echo (native) starting...");

    let mut args = std::env::args_os().skip(1);
    let device = args.next().map(PathBuf::from);
    let mut settings = load_settings(args.next().map(PathBuf::from))?;
    if device.is_some() {
        settings.link.device_path = device;
    }

    let mut game = Game::new(settings, spawn_click_reader());
    log::info!("Status: {}", game.input.status());
    game.last_status = game.input.status().to_string();

    if game.settings.link.auto_connect && game.input.click() {
        game.connect();
    }
    game.audio.start_ambient();

    let frame_time = Duration::from_secs_f32(game.settings.frame_dt());
    let mut last = Instant::now();
    loop {
        let now = Instant::now();
        game.update((now - last).as_secs_f32());
        game.render();
        last = now;

        let spent = now.elapsed();
        if spent < frame_time {
            thread::sleep(frame_time - spent);
        }
    }
}
