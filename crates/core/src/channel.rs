//! Advertising channel identifiers.

use std::fmt;

/// An advertising channel number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(pub u8);

/// Channel set shared by scanner and advertiser, visited round-robin.
pub const CHANNELS: [Channel; 3] = [Channel(37), Channel(38), Channel(39)];

impl Channel {
    /// Channel at a rotation index. The index wraps modulo the channel set.
    pub fn at(index: usize) -> Self {
        CHANNELS[index % CHANNELS.len()]
    }
}

/// Advance a rotation index to the next channel.
pub(crate) fn next_index(index: usize) -> usize {
    (index + 1) % CHANNELS.len()
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(next_index(0), 1);
        assert_eq!(next_index(1), 2);
        assert_eq!(next_index(2), 0);
    }

    #[test]
    fn test_channel_at_index() {
        assert_eq!(Channel::at(0), Channel(37));
        assert_eq!(Channel::at(2), Channel(39));
        assert_eq!(Channel::at(3), Channel(37));
        assert_eq!(Channel(38).to_string(), "ch38");
    }
}
