use crate::channels::{read_channel, with_channel};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use resonance_core::constants::MAX_FRAME_DELTA_SEC;
use resonance_core::{
    AudioReactiveEngine, BaseAppearance, EngineParams, LimitChange, ReactiveUniforms,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("resonance-web starting");
    Ok(())
}

/// A browser-side handle on the engine.
///
/// The host renderer feeds it `AnalyserNode` byte buffers every animation
/// frame and reads back the visual state and uniforms.
#[wasm_bindgen]
pub struct ReactiveEngine {
    engine: AudioReactiveEngine<StdRng>,
    appearance: BaseAppearance,
    last_tick: Option<Instant>,
}

#[wasm_bindgen]
impl ReactiveEngine {
    /// Build an engine. Without a seed the randomness comes from the
    /// browser's crypto source.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u32>) -> ReactiveEngine {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(u64::from(seed)),
            None => StdRng::from_entropy(),
        };
        log::info!("engine created (seed {seed:?})");
        ReactiveEngine {
            engine: AudioReactiveEngine::with_rng(EngineParams::default(), rng),
            appearance: BaseAppearance::default(),
            last_tick: None,
        }
    }

    pub fn advance(&mut self, delta: f32, freq_bytes: &[u8], time_bytes: &[u8], playing: bool) {
        self.engine.advance_bytes(delta, freq_bytes, time_bytes, playing);
    }

    /// Advance by the wall-clock time since the previous tick.
    pub fn tick(&mut self, freq_bytes: &[u8], time_bytes: &[u8], playing: bool) {
        let now = Instant::now();
        let delta = self
            .last_tick
            .map(|t| now.duration_since(t).as_secs_f32().min(MAX_FRAME_DELTA_SEC))
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        self.engine.advance_bytes(delta, freq_bytes, time_bytes, playing);
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.last_tick = None;
    }

    pub fn set_intensity_base(&mut self, channel: &str, percent: f32) {
        with_channel(channel, |c| self.engine.set_intensity_base(c, percent));
    }

    /// `keep_base` keeps the absolute base instead of its share of the limit.
    pub fn set_intensity_limit(&mut self, channel: &str, percent: f32, keep_base: Option<bool>) {
        let change = if keep_base.unwrap_or(false) {
            LimitChange::KeepBase
        } else {
            LimitChange::PreserveRatio
        };
        with_channel(channel, |c| self.engine.set_intensity_limit_with(c, percent, change));
    }

    pub fn set_modifier_enabled(&mut self, channel: &str, enabled: bool) {
        with_channel(channel, |c| self.engine.set_modifier_enabled(c, enabled));
    }

    pub fn set_brightness_adaptation_enabled(&mut self, enabled: bool) {
        self.engine.set_brightness_adaptation_enabled(enabled);
    }

    pub fn set_base_appearance(&mut self, point_alpha: f32, tiny_alpha: f32) {
        self.appearance = BaseAppearance {
            point_alpha,
            tiny_alpha,
        };
    }

    pub fn intensity(&self, channel: &str) -> f32 {
        read_channel(channel, |c| self.engine.intensity(c))
    }

    pub fn base_percent(&self, channel: &str) -> f32 {
        read_channel(channel, |c| self.engine.intensity_store().base_percent(c))
    }

    pub fn limit_percent(&self, channel: &str) -> f32 {
        read_channel(channel, |c| self.engine.intensity_store().limit_percent(c))
    }

    pub fn motion(&self) -> f32 {
        self.engine.visual().motion
    }

    pub fn size(&self) -> f32 {
        self.engine.visual().size
    }

    pub fn scale(&self) -> f32 {
        self.engine.visual().scale
    }

    pub fn hue(&self) -> f32 {
        self.engine.visual().hue
    }

    pub fn saturation(&self) -> f32 {
        self.engine.visual().saturation
    }

    pub fn brightness(&self) -> f32 {
        self.engine.visual().brightness
    }

    pub fn alpha(&self) -> f32 {
        self.engine.visual().alpha
    }

    pub fn motion_direction(&self) -> f32 {
        self.engine.directions().motion_direction
    }

    pub fn pitch_direction(&self) -> f32 {
        self.engine.directions().pitch_direction
    }

    pub fn visibility(&self) -> f32 {
        self.engine.visibility_factor()
    }

    pub fn silence_level(&self) -> f32 {
        self.engine.silence_level()
    }

    /// `[energy, bass, mid, treble, wave]`, smoothed.
    pub fn metrics(&self) -> Vec<f32> {
        let m = self.engine.metrics();
        vec![m.energy, m.bass, m.mid, m.treble, m.wave]
    }

    /// `[yaw, pitch, roll]` in radians for the last frame.
    pub fn rotation(&self) -> js_sys::Float32Array {
        let step = self.engine.rotation_step();
        js_sys::Float32Array::from(&[step.yaw, step.pitch, step.roll][..])
    }

    /// Reactive HSV for a base colour (hue in degrees).
    pub fn reactive_hsv(&self, hue: f32, saturation: f32, value: f32) -> js_sys::Float32Array {
        let hsv = self.engine.color_shift().apply(hue, saturation, value);
        js_sys::Float32Array::from(&hsv.to_array()[..])
    }

    /// The uniform block as floats, laid out like `ReactiveUniforms`.
    pub fn uniforms(&self) -> Vec<f32> {
        let block: ReactiveUniforms = self.engine.uniforms(self.appearance);
        bytemuck::cast_slice::<ReactiveUniforms, f32>(&[block]).to_vec()
    }
}
