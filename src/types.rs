//! Types for SDS011 operations

use std::fmt;

/// Device properties that can be queried or set with a property command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Continuous or passive reporting
    ReportMode,
    /// Two-byte device address
    DeviceId,
    /// Whether the fan and laser are powered
    WakeState,
    /// Firmware build date (read-only)
    Firmware,
    /// Minutes between samples in continuous mode
    WorkPeriod,
}

impl Property {
    /// Wire command code for this property.
    pub fn command_code(self) -> u8 {
        match self {
            Property::ReportMode => 0x02,
            Property::DeviceId => 0x05,
            Property::WakeState => 0x06,
            Property::Firmware => 0x07,
            Property::WorkPeriod => 0x08,
        }
    }

    /// Look up the property a reply refers to by its command code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x02 => Some(Property::ReportMode),
            0x05 => Some(Property::DeviceId),
            0x06 => Some(Property::WakeState),
            0x07 => Some(Property::Firmware),
            0x08 => Some(Property::WorkPeriod),
            _ => None,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Property::ReportMode => "report-mode",
            Property::DeviceId => "device-id",
            Property::WakeState => "wake-state",
            Property::Firmware => "firmware",
            Property::WorkPeriod => "work-period",
        };
        f.write_str(name)
    }
}

/// Reporting mode of the sensor.
///
/// The datasheet calls these "active" and "query"; continuous and passive
/// avoid confusion with [`WakeState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// The sensor pushes a sample every work period
    Continuous,
    /// The sensor only reports when queried
    Passive,
}

impl ReportMode {
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            0 => Some(ReportMode::Continuous),
            1 => Some(ReportMode::Passive),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            ReportMode::Continuous => 0,
            ReportMode::Passive => 1,
        }
    }
}

/// Power state of the fan and laser diode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeState {
    Sleeping,
    Working,
}

impl WakeState {
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            0 => Some(WakeState::Sleeping),
            1 => Some(WakeState::Working),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            WakeState::Sleeping => 0,
            WakeState::Working => 1,
        }
    }
}

/// Work period in minutes, 0 to 30.
///
/// A period of N minutes sleeps for `N * 60 - 30` seconds and then samples
/// for 30 seconds. Zero means continuous sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkPeriod(u8);

impl WorkPeriod {
    pub const NONE: WorkPeriod = WorkPeriod(0);
    pub const FIVE: WorkPeriod = WorkPeriod(5);
    pub const TEN: WorkPeriod = WorkPeriod(10);
    pub const MAX: WorkPeriod = WorkPeriod(30);

    /// Returns `None` when `minutes` is above 30.
    pub fn new(minutes: u8) -> Option<Self> {
        (minutes <= Self::MAX.0).then_some(WorkPeriod(minutes))
    }

    pub fn minutes(self) -> u8 {
        self.0
    }
}

impl fmt::Display for WorkPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

/// Firmware build date as reported by the device.
///
/// Month and day are passed through verbatim, without calendar validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for FirmwareDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

/// Two-byte device address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId(pub [u8; 2]);

impl DeviceId {
    /// Address that every sensor answers to
    pub const BROADCAST: DeviceId = DeviceId([0xFF, 0xFF]);
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::BROADCAST
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bytes_to_hex(&self.0))
    }
}

/// A typed property value, as stored in the cache and returned to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyValue {
    ReportMode(ReportMode),
    DeviceId(DeviceId),
    WakeState(WakeState),
    Firmware(FirmwareDate),
    WorkPeriod(WorkPeriod),
}

impl PropertyValue {
    pub fn property(&self) -> Property {
        match self {
            PropertyValue::ReportMode(_) => Property::ReportMode,
            PropertyValue::DeviceId(_) => Property::DeviceId,
            PropertyValue::WakeState(_) => Property::WakeState,
            PropertyValue::Firmware(_) => Property::Firmware,
            PropertyValue::WorkPeriod(_) => Property::WorkPeriod,
        }
    }

    /// Value byte sent in a write command; `None` for read-only properties.
    pub(crate) fn wire_byte(&self) -> Option<u8> {
        match self {
            PropertyValue::ReportMode(mode) => Some(mode.as_byte()),
            PropertyValue::WakeState(state) => Some(state.as_byte()),
            PropertyValue::WorkPeriod(period) => Some(period.minutes()),
            PropertyValue::DeviceId(_) | PropertyValue::Firmware(_) => None,
        }
    }

    /// Interpret a property reply; `None` when the value is outside the
    /// property's domain.
    pub(crate) fn from_reply(reply: &PropertyReply) -> Option<Self> {
        match (reply.property, reply.value) {
            (Property::Firmware, ReplyValue::Firmware(date)) => Some(PropertyValue::Firmware(date)),
            (Property::DeviceId, _) => Some(PropertyValue::DeviceId(reply.device_id)),
            (Property::ReportMode, ReplyValue::Byte(b)) => {
                ReportMode::from_byte(b).map(PropertyValue::ReportMode)
            }
            (Property::WakeState, ReplyValue::Byte(b)) => {
                WakeState::from_byte(b).map(PropertyValue::WakeState)
            }
            (Property::WorkPeriod, ReplyValue::Byte(b)) => {
                WorkPeriod::new(b).map(PropertyValue::WorkPeriod)
            }
            _ => None,
        }
    }
}

/// Decoded value field of a property reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyValue {
    /// Single value byte (byte 4 of the frame)
    Byte(u8),
    /// Firmware date (bytes 3 to 5 of the frame)
    Firmware(FirmwareDate),
}

/// Reply to a property get or set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyReply {
    pub property: Property,
    /// Whether the device echoed a write. Always `false` for firmware.
    pub write: bool,
    pub value: ReplyValue,
    pub device_id: DeviceId,
    pub checksum_valid: bool,
}

/// A single particulate matter measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleReply {
    /// PM2.5 concentration in µg/m³
    pub pm2_5: f64,
    /// PM10 concentration in µg/m³
    pub pm10: f64,
    pub device_id: DeviceId,
    pub checksum_valid: bool,
}

/// A parsed 10-byte response frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reply {
    Property(PropertyReply),
    Sample(SampleReply),
}

impl Reply {
    pub fn checksum_valid(&self) -> bool {
        match self {
            Reply::Property(reply) => reply.checksum_valid,
            Reply::Sample(reply) => reply.checksum_valid,
        }
    }
}

/// Convert bytes to uppercase hex string
pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
