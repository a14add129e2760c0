use std::time::Duration;

/// Serial link settings for the SDS011.
///
/// Framing is fixed by the device at 8 data bits, no parity, 1 stop bit;
/// only the baud rate and read timeout are configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSettings {
    /// Baud rate of the link. The sensor ships at 9600.
    pub baud_rate: u32,
    /// How long a read blocks waiting for the 10-byte response.
    pub read_timeout: Duration,
}

impl LinkSettings {
    pub const DEFAULT_BAUD_RATE: u32 = 9600;
    pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

    pub fn new(baud_rate: u32, read_timeout: Duration) -> Self {
        Self {
            baud_rate,
            read_timeout,
        }
    }

    /// Sets the baud rate.
    pub fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Sets the read timeout.
    pub fn read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BAUD_RATE, Self::DEFAULT_READ_TIMEOUT)
    }
}
