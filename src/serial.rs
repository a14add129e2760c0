//! Serial port transport for desktop using serialport crate

use crate::config::LinkSettings;
use crate::transport::SensorTransport;
use std::io;

pub struct SerialTransport {
    port: Option<Box<dyn serialport::SerialPort>>,
    settings: LinkSettings,
}

impl SerialTransport {
    /// Open `port_name` with the given link settings.
    pub fn new(port_name: &str, settings: LinkSettings) -> Result<Self, serialport::Error> {
        let port = Self::open_port(port_name, &settings)?;
        Ok(Self {
            port: Some(port),
            settings,
        })
    }

    /// Create a transport with no port yet; call [`SensorTransport::open`] later.
    pub fn closed(settings: LinkSettings) -> Self {
        Self {
            port: None,
            settings,
        }
    }

    pub fn settings(&self) -> &LinkSettings {
        &self.settings
    }

    fn open_port(
        port_name: &str,
        settings: &LinkSettings,
    ) -> Result<Box<dyn serialport::SerialPort>, serialport::Error> {
        let port = serialport::new(port_name, settings.baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .timeout(settings.read_timeout)
            .open()?;
        port.clear(serialport::ClearBuffer::Input)?;
        Ok(port)
    }

    fn port_mut(&mut self) -> io::Result<&mut Box<dyn serialport::SerialPort>> {
        self.port
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "serial port not open"))
    }
}

impl SensorTransport for SerialTransport {
    type Error = io::Error;

    fn open(&mut self, port_name: &str) -> Result<(), Self::Error> {
        if self.port.is_some() {
            return Ok(());
        }
        let port = Self::open_port(port_name, &self.settings).map_err(io::Error::other)?;
        self.port = Some(port);
        Ok(())
    }

    fn port_name(&self) -> Option<String> {
        self.port.as_ref().and_then(|port| port.name())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        let port = self.port_mut()?;
        io::Write::write_all(&mut *port, data)?;
        io::Write::flush(&mut *port)?;
        Ok(data.len())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let port = self.port_mut()?;
        let mut filled = 0;
        while filled < buf.len() {
            match io::Read::read(&mut *port, &mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                // a silent device shows up as a short read, not an error
                Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    fn clear_input(&mut self) -> Result<(), Self::Error> {
        self.port_mut()?
            .clear(serialport::ClearBuffer::Input)
            .map_err(io::Error::other)
    }
}
