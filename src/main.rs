//! Dot Align entry point
//!
//! The web build is driven from JavaScript through `platform::web`. Natively
//! there is no window; the binary plays one demo round with the autopilot
//! and logs what happens.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dot Align (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match dot_align::Settings::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => dot_align::Settings::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Demo seed: {}", seed);

    let final_score = native::run_demo(settings, seed);
    println!("Final score: {}", final_score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use dot_align::Settings;
    use dot_align::audio::LogBackend;
    use dot_align::consts::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};
    use dot_align::platform::{Autopilot, Session};
    use dot_align::sim::{GameEvent, GamePhase};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Ten minutes of frames
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Play one autopilot round; returns the final score
    pub fn run_demo(settings: Settings, seed: u64) -> u64 {
        let mut session = Session::new(settings, DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT);
        let mut speaker = LogBackend::default();
        session.set_autopilot(Some(Autopilot::new(seed)));
        session.press_start();

        for _ in 0..MAX_FRAMES {
            let output = session.frame(FRAME_MS);
            for command in &output.sounds {
                command.dispatch(&mut speaker);
            }
            for event in &output.events {
                match event {
                    GameEvent::CountdownStep { value, .. } => log::info!("{}...", value),
                    GameEvent::Achievement { message, .. } => log::info!("{}", message),
                    GameEvent::ScoreTick { .. } => log::debug!("{}", output.view.score_text),
                    _ => {}
                }
            }
            if session.state().phase == GamePhase::Over {
                break;
            }
        }

        if session.state().phase != GamePhase::Over {
            log::warn!("Demo stopped after {} frames without a game over", MAX_FRAMES);
        }
        log::info!("{} sounds played", speaker.played);
        session.state().score.score
    }
}
