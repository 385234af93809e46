use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{Host, SampleFormat, Stream};
use eframe::{App, CreationContext, egui};
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapRb};
use std::sync::{Arc, Mutex};

use crate::audio::devices::{get_input_device, init_devices};
use crate::audio::{AudioState, FrequencyAnalyzer};
use crate::config::{SAMPLE_RING_CAPACITY, SCALE_STEP, SPECTRUM_BINS};
use crate::ui::draw_spectrum;

pub struct SpectrumVisualizer {
    audio_state: Arc<Mutex<AudioState>>,
    analyzer: FrequencyAnalyzer,
    input_stream: Option<Stream>,
    sample_rx: Option<HeapCons<f32>>,
    peak_positions: Vec<f32>,
    host: Host,
    last_error: Option<String>,
    drain_buffer: Vec<f32>,
}

impl SpectrumVisualizer {
    pub fn new(_cc: &CreationContext) -> Self {
        let host = cpal::default_host();
        let audio_state = Arc::new(Mutex::new(AudioState::default()));

        let mut visualizer = Self {
            audio_state,
            analyzer: FrequencyAnalyzer::new(),
            input_stream: None,
            sample_rx: None,
            peak_positions: vec![0.0; SPECTRUM_BINS],
            host,
            last_error: None,
            drain_buffer: vec![0.0; 1024],
        };

        visualizer.init_devices();

        visualizer
    }

    // Enumerate input devices once at startup
    fn init_devices(&mut self) {
        let (devices, input_device_index) = init_devices(&self.host);

        let mut state = self.audio_state.lock().unwrap();
        state.devices = devices;
        state.input_device_index = input_device_index;
    }

    pub fn start_capture(&mut self) -> Result<(), String> {
        {
            let state = self.audio_state.lock().unwrap();
            if state.running {
                return Ok(());
            }
        }

        let device = {
            let state = self.audio_state.lock().unwrap();
            get_input_device(&self.host, &state.devices, state.input_device_index)
        }
        .ok_or_else(|| "No input device selected".to_string())?;

        let supported = device
            .default_input_config()
            .map_err(|e| format!("Failed to get input config: {}", e))?;

        if supported.sample_format() != SampleFormat::F32 {
            return Err("Input device doesn't support F32 format".to_string());
        }

        let channels = supported.channels() as usize;
        let sample_rate = supported.sample_rate().0;
        let stream_config = supported.config();

        let (mut sample_tx, sample_rx) = HeapRb::<f32>::new(SAMPLE_RING_CAPACITY).split();

        let input_stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    // Mix interleaved frames down to mono; samples the ring
                    // cannot take are dropped
                    for frame in data.chunks(channels) {
                        let sample = frame.iter().sum::<f32>() / channels as f32;
                        let _ = sample_tx.try_push(sample);
                    }
                },
                |err| eprintln!("Input stream error: {}", err),
                None,
            )
            .map_err(|e| format!("Failed to build input stream: {}", e))?;

        input_stream
            .play()
            .map_err(|e| format!("Failed to start input stream: {}", e))?;

        self.analyzer.reset();
        self.peak_positions = vec![0.0; SPECTRUM_BINS];
        self.input_stream = Some(input_stream);
        self.sample_rx = Some(sample_rx);

        let mut state = self.audio_state.lock().unwrap();
        state.sample_rate = sample_rate;
        state.spectrum_frame = vec![0; SPECTRUM_BINS];
        state.running = true;

        Ok(())
    }

    pub fn stop_capture(&mut self) {
        self.input_stream = None;
        self.sample_rx = None;

        let mut state = self.audio_state.lock().unwrap();
        state.running = false;
    }

    // Pull captured samples off the ring and publish a fresh amplitude frame
    // whenever the analyzer has a full window
    fn drain_samples(&mut self) {
        let Some(sample_rx) = self.sample_rx.as_mut() else {
            return;
        };

        loop {
            let count = sample_rx.pop_slice(&mut self.drain_buffer);
            if count == 0 {
                break;
            }

            if self.analyzer.add_samples(&self.drain_buffer[..count]) {
                let frame = self.analyzer.process_frame();
                let mut state = self.audio_state.lock().unwrap();
                state.spectrum_frame = frame;
            }

            if count < self.drain_buffer.len() {
                break;
            }
        }
    }
}

impl App for SpectrumVisualizer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let running = {
            let state = self.audio_state.lock().unwrap();
            state.running
        };

        if running {
            self.drain_samples();
            ctx.request_repaint();
        }

        // controls
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                if ui
                    .button(if running {
                        "Stop Capture"
                    } else {
                        "Start Capture"
                    })
                    .clicked()
                {
                    if running {
                        self.stop_capture();
                    } else {
                        match self.start_capture() {
                            Ok(()) => self.last_error = None,
                            Err(e) => {
                                eprintln!("Failed to start capture: {}", e);
                                self.last_error = Some(e);
                            }
                        }
                    }
                }

                ui.separator();

                if ui.button("Scale +").clicked() {
                    let mut state = self.audio_state.lock().unwrap();
                    state.scale_offset += SCALE_STEP;
                }

                if ui.button("Scale -").clicked() {
                    let mut state = self.audio_state.lock().unwrap();
                    state.scale_offset -= SCALE_STEP;
                }

                ui.separator();

                ui.label(if running {
                    "Status: Capturing"
                } else {
                    "Status: Stopped"
                });

                if running {
                    let average = {
                        let state = self.audio_state.lock().unwrap();
                        state.spectrum_frame.iter().map(|&v| v as f32).sum::<f32>()
                            / state.spectrum_frame.len().max(1) as f32
                    };
                    ui.label(format!("Avg: {:.1}", average));
                }

                if let Some(error) = &self.last_error {
                    ui.colored_label(egui::Color32::from_rgb(250, 100, 100), error);
                }
            });
        });

        // device selection
        egui::SidePanel::right("input_panel").show(ctx, |ui| {
            ui.heading("Audio Input");

            let (devices, input_idx) = {
                let state = self.audio_state.lock().unwrap();
                (state.devices.clone(), state.input_device_index)
            };

            let mut new_input_idx = input_idx;

            egui::ComboBox::from_label("Input Device")
                .selected_text(devices.get(input_idx).map(String::as_str).unwrap_or("None"))
                .show_ui(ui, |ui| {
                    for (i, device_name) in devices.iter().enumerate() {
                        ui.selectable_value(&mut new_input_idx, i, device_name);
                    }
                });

            if new_input_idx != input_idx {
                let mut state = self.audio_state.lock().unwrap();
                state.input_device_index = new_input_idx;
            }

            if ui.button("Apply Device Settings").clicked() && running {
                self.stop_capture();
                if let Err(e) = self.start_capture() {
                    eprintln!("Failed to restart capture: {}", e);
                    self.last_error = Some(e);
                }
            }
        });

        // spectrum area
        egui::CentralPanel::default().show(ctx, |ui| {
            let (spectrum_frame, scale_offset, sample_rate) = {
                let state = self.audio_state.lock().unwrap();
                (
                    state.spectrum_frame.clone(),
                    state.scale_offset,
                    state.sample_rate,
                )
            };

            draw_spectrum(
                ui,
                &spectrum_frame,
                &mut self.peak_positions,
                scale_offset,
                sample_rate,
            );
        });
    }
}
