//! Browser entry points.
//!
//! One [`OrreryRunner`] lives in a `thread_local!`; every export borrows it.
//! The page drives `orrery_tick` from `requestAnimationFrame` and reads the
//! frame buffer straight out of wasm memory.

use std::cell::RefCell;

use orrery::{FetchedKind, Intent, SimConfig, WallClock};
use wasm_bindgen::prelude::*;

pub mod runner;

pub use runner::OrreryRunner;

/// Wall clock backed by `Date.now()`.
pub struct JsWallClock;

impl WallClock for JsWallClock {
    fn now_unix_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

thread_local! {
    static RUNNER: RefCell<Option<OrreryRunner>> = RefCell::new(None);
}

/// Calls before `orrery_init` are ignored and return the default.
fn with_runner<R: Default>(f: impl FnOnce(&mut OrreryRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::debug!("orrery not initialized; call orrery_init() first");
            R::default()
        }
    })
}

/// Start the simulation. `config_json` may be empty for the defaults.
#[wasm_bindgen]
pub fn orrery_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        SimConfig::default()
    } else {
        SimConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    let runner = OrreryRunner::new(config, &JsWallClock);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("orrery: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn orrery_tick(dt: f32) {
    with_runner(|r| r.tick(dt, &JsWallClock));
}

/// Compact intent: see `Intent::from_wire` for the kind table.
/// Returns false for an unknown or malformed intent.
#[wasm_bindgen]
pub fn orrery_intent(kind: u32, a: f32, b: f32, c: f32) -> bool {
    match Intent::from_wire(kind, a, b, c) {
        Some(intent) => with_runner(|r| {
            r.push_intent(intent);
            true
        }),
        None => {
            log::debug!("ignoring intent kind {kind}");
            false
        }
    }
}

/// Click picking: a ray from the camera through the cursor, in world space.
#[wasm_bindgen]
pub fn orrery_pick(ox: f32, oy: f32, oz: f32, dx: f32, dy: f32, dz: f32) {
    with_runner(|r| {
        r.push_intent(Intent::Pick {
            origin: [ox, oy, oz].into(),
            direction: [dx, dy, dz].into(),
        })
    });
}

/// Feed JSON fetched by the page. Returns the number of objects queued.
#[wasm_bindgen]
pub fn orrery_push_records(kind: u32, json: &str) -> u32 {
    let Some(kind) = FetchedKind::from_code(kind) else {
        log::warn!("unknown fetched kind {kind}");
        return 0;
    };
    with_runner(|r| match r.push_records(kind, json) {
        Ok(count) => count as u32,
        Err(e) => {
            log::warn!("{kind:?} records rejected: {e}");
            0
        }
    })
}

/// Follow a catalog body by name. Returns false if there is no such body.
#[wasm_bindgen]
pub fn orrery_follow_named(name: &str) -> bool {
    with_runner(|r| match r.follow_named(name) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("{e}");
            false
        }
    })
}

#[wasm_bindgen]
pub fn orrery_set_camera(px: f32, py: f32, pz: f32, tx: f32, ty: f32, tz: f32) {
    with_runner(|r| r.set_camera([px, py, pz], [tx, ty, tz]));
}

#[wasm_bindgen]
pub fn orrery_set_composite_available(available: bool) {
    with_runner(|r| r.set_composite_available(available));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    RUNNER.with(|cell| cell.borrow().as_ref().map_or(std::ptr::null(), |r| r.frame_ptr()))
}

#[wasm_bindgen]
pub fn get_frame_len() -> u32 {
    with_runner(|r| r.frame_len())
}

#[wasm_bindgen]
pub fn get_node_count() -> u32 {
    with_runner(|r| r.node_count())
}

#[wasm_bindgen]
pub fn get_event_count() -> u32 {
    with_runner(|r| r.event_count())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_nodes() -> u32 {
    with_runner(|r| r.max_nodes())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}
