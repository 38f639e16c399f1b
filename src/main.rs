//! Grid Snake entry point
//!
//! Native builds run a headless demo: the autopilot plays one game against
//! a stepped clock and the final board is printed. The browser build is
//! driven through `grid_snake::web` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use grid_snake::audio::LogFeedback;
    use grid_snake::autopilot::choose_direction;
    use grid_snake::input::InputAction;
    use grid_snake::persistence::FileStorage;
    use grid_snake::platform::ManualClock;
    use grid_snake::renderer::TextRenderer;
    use grid_snake::sim::{Difficulty, GamePhase};
    use grid_snake::{Game, Settings};

    /// Stop runaway demos on huge grids
    const MAX_DEMO_TICKS: u32 = 20_000;

    env_logger::init();
    log::info!("Grid Snake (native demo) starting...");

    let path = std::env::var("SNAKE_SAVE_PATH").unwrap_or_else(|_| "snake_save.json".into());
    let storage = FileStorage::new(&path);
    let mut settings = Settings::load(&storage);
    if let Ok(name) = std::env::var("SNAKE_DIFFICULTY") {
        settings.difficulty = Difficulty::from_str(&name)
            .with_context(|| format!("unknown difficulty {:?} (easy, normal, hard)", name))?;
    }

    let mut feedback = LogFeedback::new();
    feedback.set_muted(!settings.sound);
    let clock = ManualClock::new(0);
    let mut game = Game::with_settings(settings, storage, &clock, feedback);
    let mut renderer = TextRenderer::new();

    game.handle_action(InputAction::Start);
    let mut ticks = 0;
    while game.engine().phase() == GamePhase::Running && ticks < MAX_DEMO_TICKS {
        if let Some(dir) = choose_direction(&game.engine().snapshot()) {
            game.handle_action(InputAction::Turn(dir));
        }
        clock.advance(u64::from(game.engine().speed_ms()));
        if game.run_frame(&mut renderer).is_some() {
            ticks += 1;
        }
    }

    println!("{}", renderer.output);
    println!(
        "Demo finished after {} ticks: score {}, best {} ({})",
        ticks,
        game.engine().score(),
        game.high_score(),
        game.engine().difficulty().as_str()
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is grid_snake::web::start, this is just to satisfy the compiler
}
