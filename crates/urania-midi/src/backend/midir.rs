//! midir-backed output.

use midir::{MidiOutput as MidirClient, MidiOutputConnection};

use super::DeviceInfo;
use crate::{ControlChange, MidiError, MidiOutput};

pub struct MidirBackend {
    client_name: String,
}

impl MidirBackend {
    pub fn new(client_name: &str) -> Self {
        Self {
            client_name: client_name.to_string(),
        }
    }

    /// midir consumes its client handle on connect, so every operation
    /// starts from a fresh one.
    fn client(&self) -> Result<MidirClient, MidiError> {
        MidirClient::new(&self.client_name).map_err(|e| MidiError::Init {
            message: e.to_string(),
        })
    }
}

impl crate::MidiOutputBackend for MidirBackend {
    fn refresh_devices(&mut self) -> Result<Vec<DeviceInfo>, MidiError> {
        let client = self.client()?;
        let mut devices = Vec::new();
        for port in client.ports() {
            let name = client.port_name(&port).unwrap_or_else(|_| "<unknown>".to_string());
            devices.push(DeviceInfo {
                id: name.clone(),
                name,
            });
        }
        if devices.is_empty() {
            log::warn!("no MIDI output ports found");
        }
        Ok(devices)
    }

    fn connect(&mut self, device_id: &str) -> Result<Box<dyn MidiOutput>, MidiError> {
        let client = self.client()?;
        let ports = client.ports();
        if ports.is_empty() {
            return Err(MidiError::NoOutputs);
        }
        let port = ports
            .iter()
            .find(|p| client.port_name(p).map(|n| n == device_id).unwrap_or(false))
            .ok_or_else(|| MidiError::PortNotFound {
                id: device_id.to_string(),
            })?;
        let conn = client
            .connect(port, &self.client_name)
            .map_err(|e| MidiError::Connect {
                name: device_id.to_string(),
                message: e.to_string(),
            })?;
        log::info!("connected MIDI output: {}", device_id);
        Ok(Box::new(MidirDevice {
            name: device_id.to_string(),
            conn,
        }))
    }
}

struct MidirDevice {
    name: String,
    conn: MidiOutputConnection,
}

impl MidiOutput for MidirDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn send(&mut self, msg: ControlChange) -> Result<(), MidiError> {
        if !msg.in_range() {
            return Err(MidiError::out_of_range(msg));
        }
        self.conn
            .send(&msg.to_bytes())
            .map_err(|e| MidiError::Send {
                name: self.name.clone(),
                message: e.to_string(),
            })
    }
}
