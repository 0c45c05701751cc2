use std::error::Error;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use glide_snake::clock::{SimulationClock, SystemClock};
use glide_snake::config::{
    DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, DISPLAY_FRAME_INTERVAL, GameConfig, SessionConfig,
};
use glide_snake::error::AppError;
use glide_snake::frame_loop::FrameLoop;
use glide_snake::game::GameSession;
use glide_snake::geometry::Bounds;
use glide_snake::input::GameInput;
use glide_snake::logging;
use glide_snake::renderer::{self, FieldView};
use glide_snake::terminal_runtime::{
    InputHandler, TerminalFrameScheduler, TerminalSession, cleanup_terminal_best_effort,
};
use glide_snake::ui::hud::HudInfo;
use log::{error, info};
use ratatui::layout::Rect;

/// Input wait while no frame is armed (after game over).
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file; defaults to the per-user config file when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Play-field width in units; fits the terminal when omitted.
    #[arg(long)]
    width: Option<f64>,

    /// Play-field height in units; fits the terminal when omitted.
    #[arg(long)]
    height: Option<f64>,

    /// Side of the square segment/food hitbox.
    #[arg(long)]
    hitbox: Option<f64>,

    /// Interpolated sub-steps per tick.
    #[arg(long = "sub-steps")]
    sub_steps: Option<usize>,

    /// Seed for reproducible spawns and food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Append logs to this file (filtered by RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply_to(&self, config: &mut GameConfig) {
        if self.width.is_some() {
            config.width = self.width;
        }
        if self.height.is_some() {
            config.height = self.height;
        }
        if let Some(hitbox) = self.hitbox {
            config.hitbox_size = hitbox;
        }
        if let Some(sub_steps) = self.sub_steps {
            config.sub_steps = sub_steps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            eprintln!("glide-snake: {error}");
            let mut source = error.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli) -> Result<(), AppError> {
    logging::init(cli.log_file.as_deref())?;

    let mut config = GameConfig::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    let period = config.tick_period()?;
    let tolerance = config.tick_tolerance()?;

    install_panic_hook();
    let mut terminal_session = TerminalSession::enter()?;
    let fallback = terminal_session
        .terminal_mut()
        .size()
        .map(|size| {
            renderer::fitted_bounds(Rect::new(0, 0, size.width, size.height), config.hitbox_size)
        })
        .unwrap_or(Bounds::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT));
    let session_config = config.session_config(fallback)?;
    info!(
        "field {}x{}, hitbox {}, {} sub-steps, tick {:?}",
        session_config.bounds().width,
        session_config.bounds().height,
        session_config.hitbox_size(),
        session_config.step_profile().len(),
        period
    );

    run(&mut terminal_session, session_config, config.seed, period, tolerance)
}

fn run(
    terminal_session: &mut TerminalSession,
    session_config: SessionConfig,
    seed: Option<u64>,
    period: Duration,
    tolerance: Duration,
) -> Result<(), AppError> {
    let field = FieldView {
        bounds: session_config.bounds(),
        hitbox_size: session_config.hitbox_size(),
    };
    let session = match seed {
        Some(seed) => GameSession::new_with_seed(session_config, seed),
        None => GameSession::new(session_config),
    };
    let clock = SimulationClock::new(period, tolerance, Instant::now());
    let mut frame_loop = FrameLoop::start(
        session,
        clock,
        SystemClock,
        TerminalFrameScheduler::new(DISPLAY_FRAME_INTERVAL),
    );
    let mut input = InputHandler::default();

    loop {
        let snapshot = frame_loop.snapshot();
        let hud_info = HudInfo {
            death_reason: frame_loop.session().death_reason,
            tick_count: frame_loop.session().tick_count,
        };
        terminal_session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &snapshot, field, &hud_info))?;

        let wait = frame_loop
            .scheduler()
            .time_until_frame(Instant::now())
            .unwrap_or(IDLE_POLL_INTERVAL);
        match input.poll_input(wait)? {
            Some(GameInput::Quit) => break,
            Some(GameInput::Confirm) if frame_loop.session().is_over() => frame_loop.restart(),
            Some(GameInput::Gesture(gesture)) => {
                frame_loop.set_direction(gesture);
            }
            Some(GameInput::Confirm) | None => {}
        }

        if frame_loop.scheduler().frame_due(Instant::now()) {
            frame_loop.on_frame();
        }
    }

    info!("quit with score {}", frame_loop.session().score);
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}
