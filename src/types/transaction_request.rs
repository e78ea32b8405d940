use crate::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// Parameters of an inbound `eth_sendTransaction`-style request.
///
/// Everything but the sender is optional. Numeric fields left out by the
/// caller get their defaults at encoding time; an omitted nonce asks the
/// proxy to assign one.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TransactionParameters {
    /// Sender account.
    pub from: Address,
    /// Recipient, `None` for contract creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    /// Supplied gas limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,
    /// Gas price.
    #[serde(rename = "gasPrice", default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    /// Transferred value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    /// Call data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
    /// Caller-chosen nonce; never second-guessed when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<U256>,
}
