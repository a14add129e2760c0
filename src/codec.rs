//! Frame encoding/decoding for the SDS011 serial protocol.
//!
//! Commands are 19 bytes, responses are 10 bytes:
//!
//! ```text
//! command:  AA B4 | cmd rw val 00*10 id0 id1 | cs AB
//! property: AA C5 | prop rw val .. .. id0 id1 | cs AB
//! sample:   AA C0 | pm25_lo pm25_hi pm10_lo pm10_hi id0 id1 | cs AB
//! ```

use crate::checksum::checksum;
use crate::error::ProtocolError;
use crate::types::{
    DeviceId, FirmwareDate, Property, PropertyReply, Reply, ReplyValue, SampleReply,
};

/// Marks the beginning of every frame.
pub const HEAD: u8 = 0xAA;
/// Marks the end of every frame.
pub const TAIL: u8 = 0xAB;
/// Message id of a host to device command.
pub const COMMAND_ID: u8 = 0xB4;
/// Response kind of a property get/set reply.
pub const PROPERTY_REPLY: u8 = 0xC5;
/// Response kind of a sample report.
pub const SAMPLE_REPLY: u8 = 0xC0;

/// Command code requesting a single sample.
pub const CMD_QUERY_SAMPLE: u8 = 0x04;

pub const COMMAND_LEN: usize = 19;
pub const RESPONSE_LEN: usize = 10;

/// A complete outbound command frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandPacket([u8; COMMAND_LEN]);

impl CommandPacket {
    pub fn as_bytes(&self) -> &[u8; COMMAND_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for CommandPacket {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Build a command frame.
///
/// `write = false` reads the property addressed by `command_code` (pass 0 as
/// `value`); `write = true` sets it to `value`. The command code is not
/// validated here.
pub fn build_command(
    command_code: u8,
    write: bool,
    value: u8,
    device_id: DeviceId,
) -> CommandPacket {
    let mut frame = [0u8; COMMAND_LEN];
    frame[0] = HEAD;
    frame[1] = COMMAND_ID;
    frame[2] = command_code;
    frame[3] = write as u8;
    frame[4] = value;
    // bytes 5..=14 are reserved and stay zero
    frame[15..17].copy_from_slice(&device_id.0);
    frame[17] = checksum(&frame[2..17]);
    frame[18] = TAIL;
    CommandPacket(frame)
}

/// Parse a 10-byte response frame.
///
/// A checksum mismatch is reported through `checksum_valid` on the returned
/// reply and never fails the parse.
pub fn parse_response(bytes: &[u8]) -> Result<Reply, ProtocolError> {
    if bytes.len() != RESPONSE_LEN {
        return Err(ProtocolError::Framing(format!(
            "expected {} bytes, got {}",
            RESPONSE_LEN,
            bytes.len()
        )));
    }
    if bytes[0] != HEAD {
        return Err(ProtocolError::Framing(format!(
            "bad head byte 0x{:02X}",
            bytes[0]
        )));
    }
    if bytes[9] != TAIL {
        return Err(ProtocolError::Framing(format!(
            "bad tail byte 0x{:02X}",
            bytes[9]
        )));
    }

    let device_id = DeviceId([bytes[6], bytes[7]]);
    let checksum_valid = checksum(&bytes[2..8]) == bytes[8];

    match bytes[1] {
        PROPERTY_REPLY => {
            let property =
                Property::from_code(bytes[2]).ok_or(ProtocolError::UnknownProperty(bytes[2]))?;
            let (write, value) = match property {
                Property::Firmware => (
                    false,
                    ReplyValue::Firmware(FirmwareDate {
                        year: 2000 + u16::from(bytes[3]),
                        month: bytes[4],
                        day: bytes[5],
                    }),
                ),
                _ => (bytes[3] != 0, ReplyValue::Byte(bytes[4])),
            };
            Ok(Reply::Property(PropertyReply {
                property,
                write,
                value,
                device_id,
                checksum_valid,
            }))
        }
        SAMPLE_REPLY => Ok(Reply::Sample(SampleReply {
            pm2_5: f64::from(u16::from_le_bytes([bytes[2], bytes[3]])) / 10.0,
            pm10: f64::from(u16::from_le_bytes([bytes[4], bytes[5]])) / 10.0,
            device_id,
            checksum_valid,
        })),
        kind => Err(ProtocolError::UnknownReplyKind(kind)),
    }
}
