/// Entry point and event loop.

mod api;
mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::fs::OpenOptions;
use std::time::{Duration, Instant};

use api::local::LocalWordService;
use api::GameApi;
use config::{GameConfig, LogConfig};
use error::{AppError, Result};
use sim::event::GameEvent;
use sim::flow;
use sim::session::{Command, SessionState};
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(10);

fn main() {
    let config = GameConfig::load();

    if let Err(e) = init_logging(&config.log) {
        eprintln!("Warning: {e}; logging disabled");
    }
    log::info!("orthoplay {} starting", env!("CARGO_PKG_VERSION"));

    let (mut api, word_err) = LocalWordService::from_config(&config);
    let mut session = SessionState::new(api.status(), config.game.level_every);
    flow::start_round(&mut session, &mut api);
    if let Some(e) = word_err {
        session.set_message(&format!("{e} (using built-in words)"), 0);
    }

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        log::error!("terminal init failed: {e}");
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = game_loop(&mut session, &mut api, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        log::error!("game loop: {e}");
        eprintln!("Game error: {e}");
    }

    let board = session.spelling.board();
    log::info!("exit: score {} level {}", board.score, board.level);
    println!();
    println!("Thanks for playing Orthoplay!");
    println!("Final Score: {}   Level: {}", board.score, board.level);
}

/// Log to the configured file; the terminal itself is in raw mode.
/// `RUST_LOG` overrides the configured level.
fn init_logging(cfg: &LogConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cfg.file)
        .map_err(|source| AppError::LogFile { path: cfg.file.clone(), source })?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cfg.level.as_str()))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();
    Ok(())
}

fn game_loop<A: GameApi>(
    session: &mut SessionState,
    api: &mut A,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<()> {
    let mut input = InputState::new();
    let tick_rate = Duration::from_millis(config.display.tick_rate_ms);
    let mut last_tick = Instant::now();

    loop {
        input.drain_events();

        for cmd in input.take_commands() {
            let out = flow::handle_command(session, api, cmd);
            play_events(sound, &out.events);
            if out.quit {
                return Ok(());
            }

            if let Some(word) = out.submit {
                // One frame with the grid locked and "Checking..." up.
                renderer.render(session)?;
                let events = pollster::block_on(flow::resolve_submit(session, api, &word));
                play_events(sound, &events);

                // Keys pressed during the check don't count.
                input.discard_pending();
                if input.take_commands().contains(&Command::Quit) {
                    return Ok(());
                }
                break;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            session.anim_tick = session.anim_tick.wrapping_add(1);
            session.tick_message();
            last_tick = Instant::now();
        }

        renderer.render(session)?;
        std::thread::sleep(FRAME_SLEEP);
    }
}

fn play_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for event in events {
        sfx.play_event(event);
    }
}
