//! Swipes through a deck of places with scripted pointer input, pumping
//! frames against the wall clock the way a host event loop would.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use spot_foundation::{DragGestureSampler, PointerDispatcher, PointerEvent};
use spot_runtime_std::StdRuntime;
use spot_swipe::{
    CaptionPicker, DeckItem, SwipeConfig, SwipeController, SwipeDeck, SwipeDirection,
    SwipeFeedback,
};

const DEFAULT_SCREEN_WIDTH: f32 = 390.0;
const FRAME: Duration = Duration::from_millis(16);
const SETTLE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone, Debug)]
struct Place {
    id: u64,
    name: &'static str,
    area: &'static str,
}

impl DeckItem for Place {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

fn places() -> Vec<Place> {
    vec![
        Place { id: 1, name: "Harbor Light Cafe", area: "Waterfront" },
        Place { id: 2, name: "Night Noodle Market", area: "Old Town" },
        Place { id: 3, name: "Rooftop Herb Garden", area: "Midtown" },
        Place { id: 4, name: "Vinyl & Verse", area: "Arts District" },
        Place { id: 5, name: "Tidepool Trail", area: "North Shore" },
    ]
}

/// Stands in for haptics and the caption overlay.
struct ConsoleFeedback {
    skip: CaptionPicker,
    select: CaptionPicker,
}

impl SwipeFeedback for ConsoleFeedback {
    fn on_gesture_start(&mut self) {
        log::debug!("haptic: light tick");
    }

    fn on_threshold_crossed(&mut self, direction: SwipeDirection) {
        log::info!("haptic: threshold bump ({direction:?})");
    }

    fn on_commit_skip(&mut self) {
        log::info!("caption: {}", self.skip.next_caption().unwrap_or("Skipped"));
    }

    fn on_commit_select(&mut self) {
        log::info!("caption: {}", self.select.next_caption().unwrap_or("Saved"));
    }
}

struct Gesture {
    label: &'static str,
    events: Vec<PointerEvent>,
}

fn drag(label: &'static str, path: &[f32], end: fn(f32, f32) -> PointerEvent) -> Gesture {
    let mut events = vec![PointerEvent::down(0.0, 0.0)];
    events.extend(path.iter().map(|&x| PointerEvent::moved(x, x.abs() * 0.08)));
    let last = path.last().copied().unwrap_or(0.0);
    events.push(end(last, last.abs() * 0.08));
    Gesture { label, events }
}

fn script() -> Vec<Gesture> {
    vec![
        drag("peek left", &[-12.0, -25.0, -40.0], PointerEvent::up),
        drag("skip", &[-30.0, -90.0, -160.0, -180.0], PointerEvent::up),
        drag("overshoot, then change of heart", &[60.0, 140.0, 60.0, 20.0], PointerEvent::up),
        drag("select", &[50.0, 120.0, 210.0], PointerEvent::up),
        drag("interrupted by the system", &[-50.0, -150.0], PointerEvent::cancel),
        drag("tap", &[3.0], PointerEvent::up),
        drag("skip", &[-40.0, -200.0], PointerEvent::up),
    ]
}

fn screen_width() -> Result<f32> {
    match std::env::var("SPOT_SCREEN_WIDTH") {
        Ok(raw) => raw
            .trim()
            .parse::<f32>()
            .with_context(|| format!("SPOT_SCREEN_WIDTH={raw:?} is not a number")),
        Err(_) => Ok(DEFAULT_SCREEN_WIDTH),
    }
}

fn seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0x2545_f491_4f6c_dd1d)
}

/// Pumps frames until the card is idle and nothing is animating.
fn settle(runtime: &StdRuntime, controller: &SwipeController<u64>) -> Result<usize> {
    let started = Instant::now();
    let mut frames = 0;
    while runtime.needs_frame() || !controller.phase().is_idle() {
        if started.elapsed() > SETTLE_TIMEOUT {
            anyhow::bail!("card still {:?} after {SETTLE_TIMEOUT:?}", controller.phase());
        }
        thread::sleep(FRAME);
        runtime.pump_frame();
        frames += 1;
    }
    Ok(frames)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let width = screen_width()?;
    let runtime = StdRuntime::new();
    let seed = seed();
    let controller = SwipeController::new(SwipeConfig::default(), width, runtime.frame_clock())
        .context("building swipe controller")?
        .with_feedback(ConsoleFeedback {
            skip: CaptionPicker::skip_captions(seed),
            select: CaptionPicker::select_captions(seed.rotate_left(17)),
        });
    let deck = SwipeDeck::new(controller, places());

    println!("=== Spot swipe deck ===");
    println!(
        "screen width {width}px, commit threshold {}px",
        deck.controller().threshold().distance()
    );
    println!();

    let mut dispatcher = PointerDispatcher::new();
    let mut sampler = DragGestureSampler::new();

    for gesture in script() {
        let Some(place) = deck.current() else {
            log::info!("deck exhausted; stopping");
            break;
        };
        println!("-> {} on \"{}\" ({})", gesture.label, place.name, place.area);

        for event in gesture.events {
            dispatcher.push(event);
            dispatcher.drain_gestures(&mut sampler, |g| {
                deck.controller().handle_gesture(g);
            });
            let transform = deck.controller().transform();
            log::debug!(
                "card x={:.1} tilt={:.1} overlay={:.2}",
                transform.translation_x,
                transform.rotation_degrees,
                transform.overlay_alpha
            );
            thread::sleep(FRAME);
            runtime.pump_frame();
        }

        let frames = settle(&runtime, deck.controller())?;
        println!(
            "   settled after {frames} frame(s); {} left, {} saved",
            deck.remaining(),
            deck.saved().len()
        );
    }

    println!();
    println!("Saved spots:");
    for place in deck.saved() {
        println!("  * {} ({})", place.name, place.area);
    }
    println!("Skipped: {}", deck.skipped_count());
    Ok(())
}
