//! Canonical RLP serialization of prepared transactions.
//!
//! Two outputs per transaction: the unsigned form hashed and handed to the
//! signer, and the signed form broadcast via `eth_sendRawTransaction`.
//! Both must match the target network byte for byte. Scalars use minimal
//! big-endian encoding, zero encodes as the empty string.

use crate::{
    prepare::PreparedTransaction,
    types::{SignatureData, U256},
    Error, Result,
};
use rlp::RlpStream;

/// Gas limit applied when the caller did not supply one.
pub const DEFAULT_GAS: u64 = 90_000;

/// Network identifiers that never adopted replay protection.
///
/// Signatures whose `v` carries one of these values are broadcast in the
/// bare pre-protection encoding; everything else gets the signature
/// appended. Single source of truth, checked by membership only.
pub const LEGACY_NETWORK_IDS: [u64; 4] = [0x9E551, 0x9E552, 0x9E554, 0x9E55D];

/// Whether `v` names one of the reserved replay-unprotected networks.
pub fn is_legacy_network_id(v: u64) -> bool {
    LEGACY_NETWORK_IDS.contains(&v)
}

/// The exact preimage that must be hashed and signed.
///
/// Nine fields: the six transaction fields, then the network identifier
/// and two empty placeholders per the replay-protected signing scheme.
pub fn unsigned_bytes(tx: &PreparedTransaction, chain_id: u64) -> Result<Vec<u8>> {
    let mut rlp = RlpStream::new();
    rlp.begin_list(9);
    append_fields(&mut rlp, tx)?;
    rlp.append(&chain_id);
    rlp.append(&0u8);
    rlp.append(&0u8);
    Ok(rlp.out().to_vec())
}

/// The final broadcast payload.
///
/// The policy is selected by the network identifier embedded in the
/// signature, not by configuration: reserved legacy identifiers get the
/// bare six-field list with the signature dropped, all others the
/// six fields plus `(v, r, s)`.
pub fn signed_bytes(tx: &PreparedTransaction, signature: &SignatureData) -> Result<Vec<u8>> {
    log::debug!("network id in signature: {:#x}", signature.v);
    let mut rlp = RlpStream::new();
    if is_legacy_network_id(signature.v) {
        rlp.begin_list(6);
        append_fields(&mut rlp, tx)?;
    } else {
        rlp.begin_list(9);
        append_fields(&mut rlp, tx)?;
        rlp.append(&signature.v);
        rlp.append(&U256::from_big_endian(signature.r.as_bytes()));
        rlp.append(&U256::from_big_endian(signature.s.as_bytes()));
    }
    Ok(rlp.out().to_vec())
}

// The six core fields in canonical order, with encoding-time defaults for
// whatever the caller omitted. An absent receiver encodes as an empty
// string, like any zero scalar.
fn append_fields(rlp: &mut RlpStream, tx: &PreparedTransaction) -> Result<()> {
    let params = tx.parameters();
    let nonce = match tx.nonce() {
        Some(nonce) => nonce,
        None => {
            log::error!("encoding reached with an unresolved nonce, this is a defect");
            return Err(Error::EncodingInvariant("nonce not resolved"));
        }
    };
    rlp.append(&nonce);
    rlp.append(&params.gas_price.unwrap_or_default());
    rlp.append(&params.gas.unwrap_or_else(|| DEFAULT_GAS.into()));
    match params.to {
        Some(ref to) => rlp.append(to),
        None => rlp.append(&""),
    };
    rlp.append(&params.value.unwrap_or_default());
    match params.data {
        Some(ref data) => rlp.append(&data.0),
        None => rlp.append(&""),
    };
    Ok(())
}
