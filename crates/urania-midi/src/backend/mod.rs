use crate::{MidiError, MidiOutput};

#[derive(Clone, Debug)]
pub struct DeviceInfo {
    /// Stable identifier (backend-specific). For midir we use the port name.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
}

pub trait MidiOutputBackend: Send {
    /// Enumerate the currently available output devices.
    fn refresh_devices(&mut self) -> Result<Vec<DeviceInfo>, MidiError>;

    /// Open a connection to the device with the given stable id.
    fn connect(&mut self, device_id: &str) -> Result<Box<dyn MidiOutput>, MidiError>;
}

mod midir;

pub use self::midir::MidirBackend;

pub fn default_backend(client_name: &str) -> Result<Box<dyn MidiOutputBackend>, MidiError> {
    Ok(Box::new(MidirBackend::new(client_name)))
}
