use crate::types::H256;
use serde::{Deserialize, Serialize};

/// Signature triple produced by the external signer.
///
/// `r` and `s` are opaque to the codec. `v` is the recovery/parity value
/// with the target network identifier folded in by the signing scheme; the
/// codec inspects it to pick the broadcast encoding.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SignatureData {
    /// Recovery/parity value, network identifier included.
    pub v: u64,
    /// R value.
    pub r: H256,
    /// S value.
    pub s: H256,
}
