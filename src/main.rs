//! Side Scroller entry point
//!
//! Headless runner: plays one level with the autopilot on a fixed-timestep
//! accumulator and logs the outcome.
//!
//! Usage: `side-scroller [seed] [tuning.json]`

use side_scroller::consts::*;
use side_scroller::render::{RenderHost, draw_session};
use side_scroller::sim::TickInput;
use side_scroller::{SceneFlow, SceneId, Tuning};

/// Simulated wall-clock frame time (slightly off the sim rate on purpose)
const FRAME_DT: f32 = 1.0 / 50.0;
/// Give up after this many frames
const MAX_FRAMES: u32 = 50 * 120;

/// Counts draw calls instead of rendering
#[derive(Default)]
struct DrawCounter {
    sprites: usize,
    texts: usize,
}

impl RenderHost for DrawCounter {
    fn draw_sprite(&mut self, _key: &str, _pos: glam::Vec2, _depth: i32, _scroll: f32, _flip: bool) {
        self.sprites += 1;
    }

    fn draw_text(&mut self, _text: &str, _pos: glam::Vec2, _depth: i32, _scroll: f32, _alpha: f32) {
        self.texts += 1;
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };

    log::info!("Side Scroller starting with seed: {}", seed);
    let mut flow = SceneFlow::new(seed, tuning);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut accumulator = 0.0;
    let mut draws = DrawCounter::default();
    let mut last_summary = None;

    for frame in 0..MAX_FRAMES {
        accumulator += FRAME_DT;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if let Some(session) = flow.session() {
                last_summary = Some(session.summary());
            }
            flow.update(&input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        if let Some(session) = flow.session() {
            draw_session(session, &mut draws);
        }

        if flow.scene_id() != SceneId::Game {
            log::info!("Run finished after {} frames", frame + 1);
            break;
        }
    }

    log::debug!("Draw calls: {} sprites, {} texts", draws.sprites, draws.texts);

    match last_summary {
        Some(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize summary: {}", e),
        },
        None => log::warn!("No session ran"),
    }
}
