use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{Device, Host};

pub fn init_devices(host: &Host) -> (Vec<String>, usize) {
    let mut devices = Vec::new();

    if let Ok(input_devices) = host.input_devices() {
        for device in input_devices {
            if let Ok(name) = device.name() {
                devices.push(name);
            }
        }
    }

    // Preselect the host's default input device
    let mut input_device_index = 0;
    if let Some(default_input) = host.default_input_device() {
        if let Ok(name) = default_input.name() {
            for (i, device_name) in devices.iter().enumerate() {
                if device_name == &name {
                    input_device_index = i;
                    break;
                }
            }
        }
    }

    (devices, input_device_index)
}

pub fn get_input_device(host: &Host, devices: &[String], index: usize) -> Option<Device> {
    let device_name = devices.get(index)?;

    if let Ok(input_devices) = host.input_devices() {
        for device in input_devices {
            if let Ok(name) = device.name() {
                if &name == device_name {
                    return Some(device);
                }
            }
        }
    }

    None
}
