//! Signing proxy errors.
use derive_more::{Display, From};
use jsonrpc_core::Error as RPCError;
use serde_json::Error as SerdeError;

/// Signing proxy `Result` type.
pub type Result<T = ()> = std::result::Result<T, Error>;

/// Transport-depended error.
#[derive(Display, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Transport-specific error code.
    #[display(fmt = "code {}", _0)]
    Code(u16),
    /// Arbitrary, developer-readable description of the occurred error.
    #[display(fmt = "{}", _0)]
    Message(String),
}

/// Errors which can occur while preparing, encoding or dispatching a
/// transaction. Every failure aborts the single in-flight request; nothing
/// is retried inside this crate.
#[derive(Debug, Display, From, Clone, PartialEq)]
pub enum Error {
    /// the auxiliary field needs existing payload data to append to
    #[display(fmt = "Transaction data is absent, cannot append auxiliary field")]
    MissingPayloadData,
    /// upstream nonce fetch failed or timed out
    #[display(fmt = "Nonce unavailable: {}", _0)]
    #[from(ignore)]
    NonceUnavailable(String),
    /// the external signer reported a failure
    #[display(fmt = "Signing failed: {}", _0)]
    #[from(ignore)]
    SigningFailed(String),
    /// a field value incompatible with the encoding rules; a defect, not
    /// an expected runtime condition
    #[display(fmt = "Encoding invariant violated: {}", _0)]
    #[from(ignore)]
    EncodingInvariant(&'static str),
    /// a bounded operation did not finish within its deadline
    #[display(fmt = "Operation timed out")]
    Timeout,
    /// server is unreachable
    #[display(fmt = "Server is unreachable")]
    Unreachable,
    /// decoder error
    #[display(fmt = "Decoder error: {}", _0)]
    Decoder(String),
    /// transport error
    #[display(fmt = "Transport error: {}", _0)]
    #[from(ignore)]
    Transport(TransportError),
    /// rpc error
    #[display(fmt = "RPC error: {:?}", _0)]
    Rpc(RPCError),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Rpc(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<SerdeError> for Error {
    fn from(err: SerdeError) -> Self {
        Error::Decoder(format!("{:?}", err))
    }
}
