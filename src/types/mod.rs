//! Types flowing through the preparation pipeline.

mod bytes;
mod signature;
mod transaction_request;

pub use self::bytes::Bytes;
pub use self::signature::SignatureData;
pub use self::transaction_request::TransactionParameters;

pub use ethereum_types::{H160, H256, U256};

/// Address
pub type Address = H160;
