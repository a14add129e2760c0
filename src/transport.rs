/// Trait for SDS011 communication backends.
/// Implement this trait for different transports (serial port, test doubles, etc.)
pub trait SensorTransport {
    /// Error type for transport operations
    type Error: std::fmt::Debug;

    /// Open the named port. Backends that are already open may ignore this.
    fn open(&mut self, port_name: &str) -> Result<(), Self::Error>;

    /// Name of the currently open port, if any
    fn port_name(&self) -> Option<String>;

    /// Write data to the transport
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Fill `buf` from the transport, blocking up to the read timeout.
    ///
    /// Returns the number of bytes actually read, which is less than
    /// `buf.len()` when the device stays silent.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Clear the input buffer
    fn clear_input(&mut self) -> Result<(), Self::Error>;
}
