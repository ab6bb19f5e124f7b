//! Simulated link to the board-logging device
//!
//! No device protocol exists yet. This only validates the address and tracks
//! connection state for the dashboard card.

use std::net::IpAddr;

use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct DeviceLink {
    address: Option<IpAddr>,
    connected: bool,
}

impl DeviceLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the address and marks the link connected.
    pub fn connect(&mut self, address: &str) -> Result<IpAddr> {
        let addr: IpAddr = address.trim().parse()?;
        self.address = Some(addr);
        self.connected = true;
        Ok(addr)
    }

    /// Keeps the last address around so the form can be pre-filled.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    pub fn address(&self) -> Option<IpAddr> {
        self.address
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}
