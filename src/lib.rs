//! Driver for the Nova SDS011 particulate matter sensor.
//!
//! The sensor speaks a fixed-size, checksummed binary protocol: every request
//! is a 19-byte command frame answered by exactly one 10-byte response.
//! [`Sds011`] wraps any [`SensorTransport`], caches confirmed property values
//! and returns typed replies.
//!
//! # Features
//!
//! - `serial` - Serial port transport for desktop using serialport crate
//!
//! # Example
//!
//! ```ignore
//! use simple_sds011::{LinkSettings, ReportMode, SerialTransport, Sds011};
//!
//! let transport = SerialTransport::new("/dev/ttyUSB0", LinkSettings::default())?;
//! let mut sensor = Sds011::new(transport);
//!
//! sensor.set_report_mode(ReportMode::Passive)?;
//! let sample = sensor.query_sample()?;
//! println!("PM2.5: {} µg/m³, PM10: {} µg/m³", sample.pm2_5, sample.pm10);
//! ```

mod cache;
mod checksum;
mod codec;
mod config;
mod device;
mod error;
mod transport;
mod types;

#[cfg(feature = "serial")]
mod serial;

// Re-exports
pub use cache::PropertyCache;
pub use checksum::checksum;
pub use codec::{
    build_command, parse_response, CommandPacket, CMD_QUERY_SAMPLE, COMMAND_ID, COMMAND_LEN, HEAD,
    PROPERTY_REPLY, RESPONSE_LEN, SAMPLE_REPLY, TAIL,
};
pub use config::LinkSettings;
pub use device::Sds011;
pub use error::{DeviceError, ProtocolError, Subject};
pub use transport::SensorTransport;
pub use types::{
    DeviceId, FirmwareDate, Property, PropertyReply, PropertyValue, Reply, ReplyValue, ReportMode,
    SampleReply, WakeState, WorkPeriod,
};

#[cfg(feature = "serial")]
pub use serial::SerialTransport;
