use log::{debug, trace};

use crate::cache::PropertyCache;
use crate::codec::{
    build_command, parse_response, CommandPacket, CMD_QUERY_SAMPLE, COMMAND_LEN, RESPONSE_LEN,
};
use crate::error::{DeviceError, Subject};
use crate::transport::SensorTransport;
use crate::types::{
    DeviceId, FirmwareDate, Property, PropertyValue, Reply, ReportMode, SampleReply, WakeState,
    WorkPeriod,
};

/// An SDS011 sensor behind a byte-stream transport.
///
/// Every operation is one blocking write followed by one 10-byte read.
/// Property reads are served from a cache once a value has been confirmed by
/// the device; writes and sample queries always go to the device.
pub struct Sds011<T: SensorTransport> {
    transport: T,
    cache: PropertyCache,
    device_id: DeviceId,
}

impl<T: SensorTransport> Sds011<T> {
    /// Create a new sensor instance with the given transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: PropertyCache::new(),
            // per-device addressing is not implemented; always broadcast
            device_id: DeviceId::BROADCAST,
        }
    }

    /// Open `port_name` if the transport was created without a port.
    ///
    /// Does nothing when a port is already open.
    pub fn open(&mut self, port_name: &str) -> Result<(), DeviceError<T::Error>> {
        if self.transport.port_name().is_some() {
            return Ok(());
        }
        self.transport
            .open(port_name)
            .map_err(DeviceError::Transport)
    }

    /// Name of the open port, if any
    pub fn port(&self) -> Option<String> {
        self.transport.port_name()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cache(&self) -> &PropertyCache {
        &self.cache
    }

    /// Read a property, answering from the cache when possible.
    ///
    /// On a cache miss the device is queried. A short read or a reply with a
    /// bad checksum yields [`DeviceError::ValueUnknown`].
    pub fn get_property(
        &mut self,
        property: Property,
    ) -> Result<PropertyValue, DeviceError<T::Error>> {
        if property == Property::DeviceId {
            return Ok(PropertyValue::DeviceId(self.device_id));
        }
        if let Some(value) = self.cache.get(property) {
            debug!("Cache hit for {}: {:?}", property, value);
            return Ok(value);
        }

        let command = build_command(property.command_code(), false, 0, self.device_id);
        let Some(response) = self.exec(&command)? else {
            return Err(DeviceError::ValueUnknown(Subject::Property(property)));
        };
        self.confirm_property(property, &response)
    }

    /// Write a property and return the value the device confirmed.
    ///
    /// The cache is never consulted. A short read after the write yields
    /// [`DeviceError::DeviceInactive`]; a bad checksum yields
    /// [`DeviceError::ValueUnknown`] and leaves the cache untouched.
    pub fn set_property(
        &mut self,
        value: PropertyValue,
    ) -> Result<PropertyValue, DeviceError<T::Error>> {
        let property = value.property();
        let Some(byte) = value.wire_byte() else {
            return Err(DeviceError::ReadOnly(property));
        };

        let command = build_command(property.command_code(), true, byte, self.device_id);
        let Some(response) = self.exec(&command)? else {
            return Err(DeviceError::DeviceInactive(property));
        };
        self.confirm_property(property, &response)
    }

    /// Request a fresh sample. Samples are never cached.
    pub fn query_sample(&mut self) -> Result<SampleReply, DeviceError<T::Error>> {
        let command = build_command(CMD_QUERY_SAMPLE, false, 0, self.device_id);
        let Some(response) = self.exec(&command)? else {
            return Err(DeviceError::ValueUnknown(Subject::Sample));
        };

        match parse_response(&response)? {
            reply if !reply.checksum_valid() => Err(DeviceError::ValueUnknown(Subject::Sample)),
            Reply::Sample(sample) => Ok(sample),
            Reply::Property(_) => Err(DeviceError::UnexpectedReply {
                expected: Subject::Sample,
            }),
        }
    }

    /// Drop whatever the device has already sent.
    ///
    /// Needed after the sensor was left in continuous mode, before the next
    /// request.
    pub fn clear_buffer(&mut self) -> Result<(), DeviceError<T::Error>> {
        self.transport.clear_input().map_err(DeviceError::Transport)
    }

    /// Send a raw command without reading the response.
    pub fn send_command(
        &mut self,
        command_code: u8,
        write: bool,
        value: u8,
    ) -> Result<usize, DeviceError<T::Error>> {
        let command = build_command(command_code, write, value, self.device_id);
        debug!("Sending command: {:02X?}", command.as_bytes());
        self.transport
            .write(command.as_ref())
            .map_err(DeviceError::Transport)
    }

    /// Read up to one response frame without interpreting it.
    ///
    /// Pair with [`parse_response`](crate::parse_response) to inspect frames
    /// whose checksum does not match.
    pub fn read_raw(&mut self) -> Result<Vec<u8>, DeviceError<T::Error>> {
        let mut response = vec![0u8; RESPONSE_LEN];
        let bytes_read = self
            .transport
            .read_exact(&mut response)
            .map_err(DeviceError::Transport)?;
        response.truncate(bytes_read);
        debug!("Received {} raw bytes: {:02X?}", response.len(), response);
        Ok(response)
    }

    /// Report mode (continuous or passive)
    pub fn report_mode(&mut self) -> Result<ReportMode, DeviceError<T::Error>> {
        match self.get_property(Property::ReportMode)? {
            PropertyValue::ReportMode(mode) => Ok(mode),
            _ => Err(Self::unexpected(Property::ReportMode)),
        }
    }

    pub fn set_report_mode(
        &mut self,
        mode: ReportMode,
    ) -> Result<ReportMode, DeviceError<T::Error>> {
        match self.set_property(PropertyValue::ReportMode(mode))? {
            PropertyValue::ReportMode(mode) => Ok(mode),
            _ => Err(Self::unexpected(Property::ReportMode)),
        }
    }

    /// Whether the fan and laser are powered
    pub fn wake_state(&mut self) -> Result<WakeState, DeviceError<T::Error>> {
        match self.get_property(Property::WakeState)? {
            PropertyValue::WakeState(state) => Ok(state),
            _ => Err(Self::unexpected(Property::WakeState)),
        }
    }

    /// Sleep or wake the sensor. Sleeping preserves the laser diode and fan.
    pub fn set_wake_state(&mut self, state: WakeState) -> Result<WakeState, DeviceError<T::Error>> {
        match self.set_property(PropertyValue::WakeState(state))? {
            PropertyValue::WakeState(state) => Ok(state),
            _ => Err(Self::unexpected(Property::WakeState)),
        }
    }

    pub fn work_period(&mut self) -> Result<WorkPeriod, DeviceError<T::Error>> {
        match self.get_property(Property::WorkPeriod)? {
            PropertyValue::WorkPeriod(period) => Ok(period),
            _ => Err(Self::unexpected(Property::WorkPeriod)),
        }
    }

    /// Set the work period in minutes (0 to 30)
    pub fn set_work_period(&mut self, minutes: u8) -> Result<WorkPeriod, DeviceError<T::Error>> {
        let Some(period) = WorkPeriod::new(minutes) else {
            return Err(DeviceError::InvalidParameter(format!(
                "work period must be 0-{} minutes, got {}",
                WorkPeriod::MAX.minutes(),
                minutes
            )));
        };
        match self.set_property(PropertyValue::WorkPeriod(period))? {
            PropertyValue::WorkPeriod(period) => Ok(period),
            _ => Err(Self::unexpected(Property::WorkPeriod)),
        }
    }

    pub fn firmware(&mut self) -> Result<FirmwareDate, DeviceError<T::Error>> {
        match self.get_property(Property::Firmware)? {
            PropertyValue::Firmware(date) => Ok(date),
            _ => Err(Self::unexpected(Property::Firmware)),
        }
    }

    /// Address used for every command. Always the broadcast address for now.
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    /// Validate a property reply and store its value.
    fn confirm_property(
        &mut self,
        property: Property,
        response: &[u8; RESPONSE_LEN],
    ) -> Result<PropertyValue, DeviceError<T::Error>> {
        let reply = parse_response(response)?;
        if !reply.checksum_valid() {
            return Err(DeviceError::ValueUnknown(Subject::Property(property)));
        }
        let value = match reply {
            Reply::Property(reply) if reply.property == property => {
                PropertyValue::from_reply(&reply)
            }
            _ => None,
        }
        .ok_or(Self::unexpected(property))?;

        trace!("Caching {}: {:?}", property, value);
        self.cache.store(value);
        Ok(value)
    }

    fn unexpected(property: Property) -> DeviceError<T::Error> {
        DeviceError::UnexpectedReply {
            expected: Subject::Property(property),
        }
    }

    /// One request/response exchange. Returns `None` on a short read.
    fn exec(
        &mut self,
        command: &CommandPacket,
    ) -> Result<Option<[u8; RESPONSE_LEN]>, DeviceError<T::Error>> {
        debug!("Sending command: {:02X?}", command.as_bytes());
        let written = self
            .transport
            .write(command.as_ref())
            .map_err(DeviceError::Transport)?;
        debug!("Wrote {} bytes", written);
        if written < COMMAND_LEN {
            return Err(DeviceError::IncompleteWrite {
                written,
                expected: COMMAND_LEN,
            });
        }

        let mut response = [0u8; RESPONSE_LEN];
        let bytes_read = self
            .transport
            .read_exact(&mut response)
            .map_err(DeviceError::Transport)?
            .min(RESPONSE_LEN);
        debug!("Received {} bytes: {:02X?}", bytes_read, &response[..bytes_read]);

        if bytes_read < RESPONSE_LEN {
            return Ok(None);
        }
        Ok(Some(response))
    }
}
