use apodize::blackman_iter;
use rustfft::{FftPlanner, num_complex::Complex32};

use crate::config::{FFT_SIZE, MAX_DB, MIN_DB, OVERLAP, SMOOTHING, SPECTRUM_BINS};

pub struct FrequencyAnalyzer {
    pub fft_planner: FftPlanner<f32>,
    pub fft_buffer: Vec<Complex32>,
    pub window: Vec<f32>,
    pub buffer: Vec<f32>,
    pub buffer_pos: usize,
    pub smoothed: Vec<f32>,
}

impl FrequencyAnalyzer {
    pub fn new() -> Self {
        Self {
            fft_planner: FftPlanner::new(),
            fft_buffer: vec![Complex32::new(0.0, 0.0); FFT_SIZE],
            window: blackman_iter(FFT_SIZE).map(|x| x as f32).collect(),
            buffer: vec![0.0; FFT_SIZE],
            buffer_pos: 0,
            smoothed: vec![0.0; SPECTRUM_BINS],
        }
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.buffer_pos = 0;
        self.smoothed.fill(0.0);
    }

    /// Accumulates mono samples, returning true once a full analysis window
    /// has been buffered since the last processed frame.
    pub fn add_samples(&mut self, samples: &[f32]) -> bool {
        let mut fft_ready = false;

        for &sample in samples {
            self.buffer[self.buffer_pos] = sample;
            self.buffer_pos += 1;

            if self.buffer_pos >= self.buffer.len() {
                fft_ready = true;

                // Retain the second half so consecutive frames overlap by 50%
                for i in 0..OVERLAP {
                    self.buffer[i] = self.buffer[FFT_SIZE - OVERLAP + i];
                }
                self.buffer_pos = OVERLAP;
            }
        }

        fft_ready
    }

    /// Windowed forward FFT over the buffered samples, smoothed over time and
    /// mapped onto one amplitude byte per frequency bin.
    pub fn process_frame(&mut self) -> Vec<u8> {
        for i in 0..FFT_SIZE {
            self.fft_buffer[i] = Complex32::new(self.buffer[i] * self.window[i], 0.0);
        }

        let fft = self.fft_planner.plan_fft_forward(FFT_SIZE);
        fft.process(&mut self.fft_buffer);

        let scale = 2.0 / (FFT_SIZE as f32);
        let mut frame = vec![0u8; SPECTRUM_BINS];

        for (i, out) in frame.iter_mut().enumerate() {
            let magnitude = self.fft_buffer[i].norm() * scale;
            self.smoothed[i] = SMOOTHING * self.smoothed[i] + (1.0 - SMOOTHING) * magnitude;

            let db = 20.0 * (self.smoothed[i] + 1e-10).log10();
            *out = db_to_byte(db);
        }

        frame
    }
}

/// Maps a decibel level linearly from [MIN_DB, MAX_DB] onto the 0-255
/// amplitude range consumed by the renderer.
pub fn db_to_byte(db: f32) -> u8 {
    let normalized = (db - MIN_DB) / (MAX_DB - MIN_DB);
    (normalized * 255.0).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_mapping_clamps_at_the_analyser_range() {
        assert_eq!(db_to_byte(-150.0), 0);
        assert_eq!(db_to_byte(-200.0), 0);
        assert_eq!(db_to_byte(-10.0), 255);
        assert_eq!(db_to_byte(0.0), 255);
    }

    #[test]
    fn byte_mapping_is_linear_in_decibels() {
        assert_eq!(db_to_byte(-80.0), 127);
        assert_eq!(db_to_byte(-45.0), 191);
    }

    #[test]
    fn frame_becomes_ready_after_a_full_window() {
        let mut analyzer = FrequencyAnalyzer::new();
        assert!(!analyzer.add_samples(&vec![0.0; FFT_SIZE - 1]));
        assert!(analyzer.add_samples(&[0.0]));
    }

    #[test]
    fn silence_produces_an_all_zero_frame() {
        let mut analyzer = FrequencyAnalyzer::new();
        analyzer.add_samples(&vec![0.0; FFT_SIZE]);

        let frame = analyzer.process_frame();
        assert_eq!(frame.len(), SPECTRUM_BINS);
        assert!(frame.iter().all(|&b| b == 0));
    }

    #[test]
    fn a_sine_tone_peaks_in_its_own_bin() {
        let mut analyzer = FrequencyAnalyzer::new();

        // 16 whole cycles per window land exactly on bin 16
        let samples: Vec<f32> = (0..FFT_SIZE)
            .map(|n| (2.0 * std::f32::consts::PI * 16.0 * n as f32 / FFT_SIZE as f32).sin())
            .collect();
        assert!(analyzer.add_samples(&samples));

        let frame = analyzer.process_frame();
        let loudest = frame
            .iter()
            .enumerate()
            .max_by_key(|&(_, &v)| v)
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(loudest, 16);
    }
}
