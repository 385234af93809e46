pub const FFT_SIZE: usize = 256;
pub const SPECTRUM_BINS: usize = FFT_SIZE / 2;
pub const OVERLAP: usize = FFT_SIZE / 2;

pub const MIN_DB: f32 = -150.0;
pub const MAX_DB: f32 = -10.0;
pub const SMOOTHING: f32 = 0.8;

pub const SAMPLE_RING_CAPACITY: usize = FFT_SIZE * 32;

pub const HEIGHT_GAIN: f32 = 5.0;
pub const BASELINE_OFFSET: f32 = 150.0;
pub const SCALE_STEP: f32 = 50.0;
pub const NUM_SEGMENTS: usize = 100;
pub const PEAK_DECAY: f32 = 8.0;
pub const PEAK_MARKER_HEIGHT: f32 = 2.0;
pub const BAR_GAP: f32 = 1.0;
pub const BASELINE_INSET: f32 = 20.0;
pub const LABEL_PADDING: f32 = 60.0;
