pub mod bands;
pub mod channel;
pub mod constants;
pub mod direction;
pub mod dynamics;
pub mod engine;
pub mod intensity;
pub mod rng;
pub mod silence;
pub mod smoothing;
pub mod uniforms;
pub mod visual;

pub use bands::{extract, extract_bytes, AudioMetrics, Metric};
pub use channel::{Channel, ChannelMap, ChannelParseError, Modifiers};
pub use direction::DirectionState;
pub use dynamics::{
    ChannelDescriptor, Driver, DynamicChannelState, DynamicIntensityModulator, HoldRange,
};
pub use engine::*;
pub use intensity::{IntensityChannel, IntensityStore, LimitChange};
pub use rng::RandomSource;
pub use silence::SilenceAdapter;
pub use smoothing::{damp, MetricPulses, MetricSmoother};
pub use uniforms::{BaseAppearance, ColorShift, ReactiveUniforms, RotationStep};
pub use visual::{VisualMapping, VisualState};
