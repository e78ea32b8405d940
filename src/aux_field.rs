//! Auxiliary permissioning field appended to transaction payload data.
//!
//! Permissioned deployments expect every transaction's data to end with an
//! ABI-encoded `(node address, expiration)` pair; validating nodes drop
//! transactions whose expiration has passed. The pair is recomputed on
//! every call, so output is only repeatable under a pinned [`Clock`].

use crate::{
    types::{Address, Bytes, U256},
    Error, Result,
};
use ethabi::Token;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Validity window added to the current time when no other is configured.
pub const DEFAULT_VALIDITY: Duration = Duration::from_secs(86_400);

/// Source of the current unix time.
///
/// Injected rather than read ambiently so that encoding stays
/// deterministic under test.
pub trait Clock {
    /// Seconds since the unix epoch.
    fn unix_now(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time is past the unix epoch; qed")
            .as_secs()
    }
}

/// Encodes the `(node address, expiration)` pair and appends it to payload
/// data.
#[derive(Debug, Clone)]
pub struct AuxFieldEncoder<C = SystemClock> {
    node_address: Address,
    validity: Duration,
    clock: C,
}

impl AuxFieldEncoder {
    /// Encoder for the given node address, default validity window, wall
    /// clock.
    pub fn new(node_address: Address) -> Self {
        AuxFieldEncoder {
            node_address,
            validity: DEFAULT_VALIDITY,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> AuxFieldEncoder<C> {
    /// Encoder with an explicit validity window and time source.
    pub fn with_clock(node_address: Address, validity: Duration, clock: C) -> Self {
        AuxFieldEncoder {
            node_address,
            validity,
            clock,
        }
    }

    /// ABI-encode the node address and the expiration timestamp.
    ///
    /// Two 32-byte words: the left-padded address, then the big-endian
    /// expiration (now + validity window).
    pub fn encode(&self) -> Vec<u8> {
        let expiration = self.clock.unix_now() + self.validity.as_secs();
        log::debug!("auxiliary field expiration {}", expiration);
        ethabi::encode(&[
            Token::Address(self.node_address),
            Token::Uint(U256::from(expiration)),
        ])
    }

    /// Append the auxiliary field to existing payload data.
    ///
    /// The input is left untouched; a freshly allocated buffer comes back.
    /// Absent payload data is rejected with [`Error::MissingPayloadData`]
    /// so the request fails before any nonce traffic happens.
    pub fn apply(&self, data: Option<&Bytes>) -> Result<Bytes> {
        let data = data.ok_or(Error::MissingPayloadData)?;
        let mut augmented = data.0.clone();
        augmented.extend_from_slice(&self.encode());
        Ok(Bytes(augmented))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Clock pinned to a fixed instant.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct FixedClock(pub u64);

    impl Clock for FixedClock {
        fn unix_now(&self) -> u64 {
            self.0
        }
    }

    fn encoder() -> AuxFieldEncoder<FixedClock> {
        AuxFieldEncoder::with_clock(
            Address::repeat_byte(0x2c),
            DEFAULT_VALIDITY,
            FixedClock(1_600_000_000),
        )
    }

    #[test]
    fn encodes_two_abi_words() {
        let encoded = encoder().encode();

        assert_eq!(encoded.len(), 64);
        // word 1: address left-padded to 32 bytes
        assert_eq!(&encoded[..12], &[0u8; 12]);
        assert_eq!(&encoded[12..32], Address::repeat_byte(0x2c).as_bytes());
        // word 2: big-endian expiration = fixed now + one day
        assert_eq!(
            U256::from_big_endian(&encoded[32..]),
            U256::from(1_600_000_000u64 + 86_400)
        );
    }

    #[test]
    fn encode_is_deterministic_under_a_fixed_clock() {
        let encoder = encoder();
        assert_eq!(encoder.encode(), encoder.encode());
    }

    #[test]
    fn apply_appends_without_touching_the_input() {
        let encoder = encoder();
        let data = Bytes(vec![0x12, 0x34]);

        let augmented = encoder.apply(Some(&data)).unwrap();

        assert_eq!(data, Bytes(vec![0x12, 0x34]));
        assert_eq!(augmented.0.len(), 2 + 64);
        assert_eq!(&augmented.0[..2], &[0x12, 0x34]);
        assert_eq!(&augmented.0[2..], encoder.encode().as_slice());
    }

    #[test]
    fn apply_rejects_absent_data() {
        assert_eq!(encoder().apply(None), Err(Error::MissingPayloadData));
    }

    #[test]
    fn validity_window_is_configurable() {
        let encoder = AuxFieldEncoder::with_clock(
            Address::repeat_byte(0x2c),
            Duration::from_secs(60),
            FixedClock(1_000),
        );
        let encoded = encoder.encode();
        assert_eq!(U256::from_big_endian(&encoded[32..]), U256::from(1_060));
    }
}
