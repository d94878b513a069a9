use crate::bands::{self, AudioMetrics};
use crate::channel::{Channel, ChannelMap, Modifiers};
use crate::constants::*;
use crate::direction::DirectionState;
use crate::dynamics::{
    descriptor_table, ChannelDescriptor, DynamicChannelState, DynamicIntensityModulator,
};
use crate::intensity::{IntensityStore, LimitChange};
use crate::rng::RandomSource;
use crate::silence::SilenceAdapter;
use crate::smoothing::{clamp_delta, MetricPulses, MetricSmoother};
use crate::uniforms::{BaseAppearance, ColorShift, FrameView, ReactiveUniforms, RotationStep};
use crate::visual::{map_targets, VisualState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Tunable engine parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineParams {
    /// Metric damping rate while audio plays (per second).
    pub metric_rate_playing: f32,
    /// Metric damping rate while stopped (per second).
    pub metric_rate_idle: f32,
    pub descriptors: ChannelMap<ChannelDescriptor>,
    pub brightness_adaptation: bool,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            metric_rate_playing: METRIC_RATE_PLAYING,
            metric_rate_idle: METRIC_RATE_IDLE,
            descriptors: descriptor_table(),
            brightness_adaptation: true,
        }
    }
}

/// The audio-reactive parameter synthesis engine.
///
/// Owned by the host and advanced once per animation frame.
pub struct AudioReactiveEngine<R: RandomSource = StdRng> {
    params: EngineParams,
    rng: R,
    smoother: MetricSmoother,
    targets: AudioMetrics,
    pulses: MetricPulses,
    intensity: IntensityStore,
    dynamics: DynamicIntensityModulator,
    visual: VisualState,
    silence: SilenceAdapter,
    directions: DirectionState,
    modifiers: Modifiers,
    playing: bool,
    last_delta: f32,
}

impl AudioReactiveEngine<StdRng> {
    pub fn new(params: EngineParams, seed: u64) -> Self {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    /// Default parameters, seeded randomness.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(EngineParams::default(), seed)
    }
}

impl<R: RandomSource> AudioReactiveEngine<R> {
    pub fn with_rng(params: EngineParams, rng: R) -> Self {
        let mut silence = SilenceAdapter::default();
        silence.set_adaptation_enabled(params.brightness_adaptation);
        Self {
            smoother: MetricSmoother::with_rates(
                params.metric_rate_playing,
                params.metric_rate_idle,
            ),
            dynamics: DynamicIntensityModulator::new(params.descriptors),
            params,
            rng,
            targets: AudioMetrics::default(),
            pulses: MetricPulses::default(),
            intensity: IntensityStore::default(),
            visual: VisualState::neutral(),
            silence,
            directions: DirectionState::default(),
            modifiers: Modifiers::all_enabled(),
            playing: false,
            last_delta: 0.0,
        }
    }

    /// Advance one frame from normalized buffers.
    ///
    /// `frequency` holds magnitudes in `[0, 1]`, `waveform` samples in
    /// `[-1, 1]`. `delta` is in seconds and clamped to `[0, 0.25]`.
    pub fn advance(&mut self, delta: f32, frequency: &[f32], waveform: &[f32], playing: bool) {
        let targets = bands::extract(frequency, waveform);
        self.step(delta, targets, playing);
    }

    /// Advance one frame from `AnalyserNode` byte buffers.
    pub fn advance_bytes(&mut self, delta: f32, frequency: &[u8], waveform: &[u8], playing: bool) {
        let targets = bands::extract_bytes(frequency, waveform);
        self.step(delta, targets, playing);
    }

    fn step(&mut self, delta: f32, targets: AudioMetrics, playing: bool) {
        let dt = clamp_delta(delta);
        self.last_delta = dt;
        self.playing = playing;
        let modifiers = self.modifiers;

        self.pulses = self.smoother.update(&targets, dt, playing);
        self.targets = *self.smoother.previous_targets();
        let metrics = *self.smoother.metrics();

        self.silence.update(&metrics, playing, dt);
        self.dynamics
            .update(dt, &metrics, &self.pulses, playing, modifiers, &mut self.rng);

        let motion = self.intensity(Channel::Motion);
        let motion_active = playing && modifiers.is_enabled(Channel::Motion) && motion > 0.0;
        self.directions.update(
            dt,
            &self.targets,
            &self.pulses,
            motion_active,
            motion,
            &mut self.rng,
        );

        let intensities = self.intensities();
        let visual_targets = map_targets(&metrics, &intensities);
        self.visual.advance(&visual_targets, modifiers, dt);
    }

    /// Return every piece of state to neutral. Configuration (intensities,
    /// modifiers, adaptation toggle) is kept.
    pub fn reset(&mut self) {
        self.smoother.reset();
        self.targets = AudioMetrics::default();
        self.pulses = MetricPulses::default();
        self.dynamics.reset();
        self.visual = VisualState::neutral();
        self.silence.reset();
        self.directions.reset();
        self.playing = false;
        self.last_delta = 0.0;
        log::debug!("engine reset");
    }

    pub fn set_intensity_base(&mut self, channel: Channel, percent: f32) {
        self.intensity.set_base(channel, percent);
    }

    pub fn set_intensity_limit(&mut self, channel: Channel, percent: f32) {
        self.intensity.set_limit(channel, percent, LimitChange::PreserveRatio);
    }

    pub fn set_intensity_limit_with(
        &mut self,
        channel: Channel,
        percent: f32,
        change: LimitChange,
    ) {
        self.intensity.set_limit(channel, percent, change);
    }

    /// Enable or disable a channel's reaction to audio.
    ///
    /// Disabling snaps that visual entry to neutral; disabling motion also
    /// resets both rotation directions.
    pub fn set_modifier_enabled(&mut self, channel: Channel, enabled: bool) {
        if self.modifiers.is_enabled(channel) == enabled {
            return;
        }
        self.modifiers.set(channel, enabled);
        if !enabled {
            self.visual.neutralize(channel);
            if channel == Channel::Motion {
                self.directions.reset_directions();
            }
        }
        log::debug!("modifier {channel} -> {}", if enabled { "on" } else { "off" });
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        for channel in Channel::ALL {
            self.set_modifier_enabled(channel, modifiers.is_enabled(channel));
        }
    }

    pub fn set_brightness_adaptation_enabled(&mut self, enabled: bool) {
        self.silence.set_adaptation_enabled(enabled);
        self.params.brightness_adaptation = enabled;
        log::debug!("brightness adaptation -> {enabled}");
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    pub fn visual(&self) -> &VisualState {
        &self.visual
    }

    /// Smoothed metrics.
    pub fn metrics(&self) -> &AudioMetrics {
        self.smoother.metrics()
    }

    /// Raw (sanitized) metric targets of the last frame.
    pub fn targets(&self) -> &AudioMetrics {
        &self.targets
    }

    pub fn pulses(&self) -> &MetricPulses {
        &self.pulses
    }

    pub fn directions(&self) -> &DirectionState {
        &self.directions
    }

    pub fn silence_level(&self) -> f32 {
        self.silence.level()
    }

    pub fn brightness_adaptation_enabled(&self) -> bool {
        self.silence.adaptation_enabled()
    }

    pub fn visibility_factor(&self) -> f32 {
        self.silence.visibility_factor(self.playing)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Effective intensity: user base times the dynamic multiplier.
    pub fn intensity(&self, channel: Channel) -> f32 {
        self.intensity.effective(channel, self.dynamics.value(channel))
    }

    pub fn intensities(&self) -> ChannelMap<f32> {
        ChannelMap::from_fn(|c| self.intensity(c))
    }

    pub fn intensity_store(&self) -> &IntensityStore {
        &self.intensity
    }

    pub fn dynamic_state(&self, channel: Channel) -> &DynamicChannelState {
        self.dynamics.state(channel)
    }

    pub fn descriptor(&self, channel: Channel) -> &ChannelDescriptor {
        self.dynamics.descriptor(channel)
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn color_shift(&self) -> ColorShift {
        let intensities = self.intensities();
        ColorShift::from_frame(&self.frame_view(&intensities))
    }

    /// Scene rotation for the last advanced frame.
    pub fn rotation_step(&self) -> RotationStep {
        let intensities = self.intensities();
        RotationStep::from_frame(&self.frame_view(&intensities))
    }

    pub fn uniforms(&self, base: BaseAppearance) -> ReactiveUniforms {
        let intensities = self.intensities();
        ReactiveUniforms::from_frame(&self.frame_view(&intensities), base)
    }

    fn frame_view<'a>(&'a self, intensities: &'a ChannelMap<f32>) -> FrameView<'a> {
        FrameView {
            visual: &self.visual,
            metrics: self.smoother.metrics(),
            intensity: intensities,
            modifiers: self.modifiers,
            directions: &self.directions,
            visibility: self.visibility_factor(),
            dt: self.last_delta,
        }
    }
}
