// src/message.rs

use crate::osc::{self, OscArg, OscMessage};

/// OSC address every EEG packet is sent to.
pub const EEG_ADDRESS: &str = "/muse/eeg";

/// Type tags of an EEG packet: six floats.
pub const EEG_TYPE_TAGS: &str = ",ffffff";

pub const NUM_CHANNELS: usize = 6;

/// Per-channel offset added to the base sample so channels are told apart.
pub const CHANNEL_OFFSETS: [f32; NUM_CHANNELS] = [0.0, 3.0, 6.0, 9.0, 12.0, 15.0];

/// Electrode labels, in argument order.
pub const CHANNEL_LABELS: [&str; NUM_CHANNELS] = ["LAUX", "TP9", "AF7", "AF8", "TP10", "RAUX"];

/// Encoded size of an EEG packet in bytes.
pub const EEG_PACKET_LEN: usize = osc::padded_len(EEG_ADDRESS.len())
    + osc::padded_len(EEG_TYPE_TAGS.len())
    + NUM_CHANNELS * 4;

/// One multi-channel sample, as sent on the wire.
///
/// Built fresh each tick from a single base value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EegPacket {
    pub channels: [f32; NUM_CHANNELS],
}

impl EegPacket {
    /// Derive all channels from one base sample.
    #[inline]
    pub fn from_base(base: f32) -> Self {
        Self {
            channels: CHANNEL_OFFSETS.map(|offset| base + offset),
        }
    }

    /// The undisplaced base sample (channel 0).
    #[inline]
    pub fn base(&self) -> f32 {
        self.channels[0]
    }

    /// Write the OSC encoding into `buf`, replacing its contents.
    ///
    /// Does not allocate once `buf` has grown to `EEG_PACKET_LEN`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.clear();
        osc::write_str(buf, EEG_ADDRESS);
        osc::write_str(buf, EEG_TYPE_TAGS);
        for value in self.channels {
            osc::write_f32(buf, value);
        }
    }

    /// Interpret a decoded OSC message as an EEG packet.
    ///
    /// Returns `None` for any other address or argument signature.
    pub fn from_osc(msg: &OscMessage) -> Option<Self> {
        if msg.address != EEG_ADDRESS || msg.args.len() != NUM_CHANNELS {
            return None;
        }

        let mut channels = [0.0; NUM_CHANNELS];
        for (slot, arg) in channels.iter_mut().zip(&msg.args) {
            *slot = arg.as_f32()?;
        }
        Some(Self { channels })
    }

    pub fn to_osc(&self) -> OscMessage {
        self.channels
            .iter()
            .fold(OscMessage::new(EEG_ADDRESS), |msg, v| {
                msg.with_arg(OscArg::Float(*v))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waveform::SampleTable;

    #[test]
    fn test_offsets_from_base() {
        let packet = EegPacket::from_base(0.25);
        assert_eq!(packet.channels, [0.25, 3.25, 6.25, 9.25, 12.25, 15.25]);
        assert_eq!(packet.base(), 0.25);
    }

    #[test]
    fn test_every_table_entry_is_offset_evenly() {
        let table = SampleTable::build();

        for &base in table.as_slice() {
            let packet = EegPacket::from_base(base);
            for (value, offset) in packet.channels.iter().zip(CHANNEL_OFFSETS) {
                assert!((value - (base + offset)).abs() < 1e-6);
            }
            for pair in packet.channels.windows(2) {
                assert!((pair[1] - pair[0] - 3.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_encoded_size() {
        let mut buf = Vec::new();
        EegPacket::from_base(-1.0).encode_into(&mut buf);
        assert_eq!(buf.len(), EEG_PACKET_LEN);
        assert_eq!(EEG_PACKET_LEN, 44);
    }

    #[test]
    fn test_encoding_matches_generic_codec() {
        let packet = EegPacket::from_base(0.5);
        let mut buf = Vec::new();
        packet.encode_into(&mut buf);

        assert_eq!(buf, packet.to_osc().encode());

        let decoded = OscMessage::decode(&buf).unwrap();
        assert_eq!(decoded.type_tags(), EEG_TYPE_TAGS);
        assert_eq!(EegPacket::from_osc(&decoded), Some(packet));
    }

    #[test]
    fn test_foreign_messages_are_rejected() {
        let wrong_address = OscMessage::new("/muse/acc").with_arg(OscArg::Float(1.0));
        assert_eq!(EegPacket::from_osc(&wrong_address), None);

        let mut wrong_type = EegPacket::from_base(0.0).to_osc();
        wrong_type.args[2] = OscArg::Int(6);
        assert_eq!(EegPacket::from_osc(&wrong_type), None);

        let mut too_short = EegPacket::from_base(0.0).to_osc();
        too_short.args.pop();
        assert_eq!(EegPacket::from_osc(&too_short), None);
    }
}
