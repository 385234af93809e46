use crate::config::SPECTRUM_BINS;

pub struct AudioState {
    pub running: bool,
    pub devices: Vec<String>,
    pub input_device_index: usize,
    pub sample_rate: u32,
    pub spectrum_frame: Vec<u8>,
    pub scale_offset: f32,
}

impl Default for AudioState {
    fn default() -> Self {
        Self {
            running: false,
            devices: Vec::new(),
            input_device_index: 0,
            sample_rate: 44100,
            spectrum_frame: vec![0; SPECTRUM_BINS],
            scale_offset: 0.0,
        }
    }
}
