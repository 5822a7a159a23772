//! Headless demo: deals a table and replays a short pointer script.

use cardtable::{Card, CardCanvas, GameStateManager, Session, Settings, StateId};
use std::path::PathBuf;

/// Simulated frames per second.
const TPS: u32 = 60;

/// Surface that only counts what would be drawn.
#[derive(Default)]
struct CountingCanvas {
    cards: usize,
    lifted: Option<usize>,
}

impl CardCanvas for CountingCanvas {
    fn draw_card(&mut self, card: &Card, lifted: bool) {
        self.cards += 1;
        if lifted {
            self.lifted = Some(card.id());
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Press(f32, f32),
    Move(f32, f32),
    Release,
    Wait(u32),
    Switch(StateId),
}

fn script(width: f32, height: f32) -> Vec<Step> {
    let (cx, cy) = (width * 0.5, height * 0.5);
    vec![
        // Tap
        Step::Press(cx, cy),
        Step::Wait(2),
        Step::Release,
        Step::Wait(2),
        // Hold and drag
        Step::Press(cx, cy),
        Step::Wait(TPS / 2),
        Step::Move(cx + 40.0, cy),
        Step::Wait(5),
        Step::Move(cx + 80.0, cy + 30.0),
        Step::Wait(5),
        Step::Release,
        Step::Wait(1),
        // No menu is registered: leaves no active state
        Step::Switch(StateId::MENU),
        Step::Wait(2),
        Step::Switch(StateId::PLAY),
        Step::Wait(1),
    ]
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("MAIN: Booting card table...");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("cards.toml"));

    let settings = match Settings::load(&path) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("MAIN: {}", e);
            std::process::exit(1);
        }
    };

    let (width, height) = (
        settings.camera.viewport_width,
        settings.camera.viewport_height,
    );
    let mut manager: GameStateManager<CountingCanvas> =
        match GameStateManager::from_session(Session::new(settings)) {
            Ok(manager) => manager,
            Err(e) => {
                log::error!("MAIN: {}", e);
                std::process::exit(1);
            }
        };

    let dt = 1.0 / TPS as f32;
    let mut frame = 0u32;

    for step in script(width, height) {
        match step {
            Step::Press(x, y) => manager.session_mut().pointer.press(x, y),
            Step::Move(x, y) => manager.session_mut().pointer.move_to(x, y),
            Step::Release => manager.session_mut().pointer.release(),
            Step::Switch(id) => {
                if let Err(e) = manager.set_state(id) {
                    log::warn!("MAIN: {}", e);
                }
                continue;
            }
            Step::Wait(_) => {}
        }

        let frames = if let Step::Wait(n) = step { n } else { 1 };
        for _ in 0..frames {
            let mut canvas = CountingCanvas::default();
            if let Err(e) = manager.frame(dt, &mut canvas) {
                log::warn!("MAIN: {}", e);
            }
            frame += 1;
            log::debug!(
                "MAIN: Frame {} drew {} cards, lifted {:?}",
                frame,
                canvas.cards,
                canvas.lifted
            );
        }
    }

    log::info!(
        "MAIN: Ran {} frames, active state {:?}",
        frame,
        manager.active_id()
    );
}
