//! Transaction preparation core for an Ethereum signing proxy.
//!
//! The proxy sits between a client application and a node. This crate
//! implements the stage in front of the signer: it binds an inbound
//! `eth_sendTransaction`-shaped request to a nonce (caller-supplied or
//! fetched, serialized per sender), appends the proxy's auxiliary
//! permissioning field to the payload data, RLP-encodes the unsigned
//! transaction for the external signer and, once a signature is available,
//! re-encodes everything into the raw form `eth_sendRawTransaction` expects.
//!
//! Key management, the signature algorithm and transport I/O live outside
//! this crate, behind the [`prepare::Signer`] and [`Transport`] seams.

#![warn(missing_docs)]

use jsonrpc_core as rpc;

pub mod aux_field;
pub mod codec;
pub mod error;
pub mod helpers;
pub mod nonce;
pub mod prepare;
pub mod transports;
pub mod types;

pub use crate::error::{Error, Result};
pub use crate::prepare::{PreparedTransaction, Signer, TransactionPreparer};

/// Assigned RequestId
pub type RequestId = usize;

/// Transport implementation
pub trait Transport: std::fmt::Debug + Clone {
    /// The type of future this transport returns when a call is made.
    type Out: futures::Future<Output = error::Result<rpc::Value>> + Unpin;

    /// Prepare serializable RPC call for given method with parameters.
    fn prepare(&self, method: &str, params: Vec<rpc::Value>) -> (RequestId, rpc::Call);

    /// Execute prepared RPC call.
    fn send(&self, id: RequestId, request: rpc::Call) -> Self::Out;

    /// Execute remote method with given parameters.
    fn execute(&self, method: &str, params: Vec<rpc::Value>) -> Self::Out {
        let (id, request) = self.prepare(method, params);
        self.send(id, request)
    }
}

impl<X, T> Transport for X
where
    T: Transport + ?Sized,
    X: std::ops::Deref<Target = T>,
    X: std::fmt::Debug,
    X: Clone,
{
    type Out = T::Out;

    fn prepare(&self, method: &str, params: Vec<rpc::Value>) -> (RequestId, rpc::Call) {
        (**self).prepare(method, params)
    }

    fn send(&self, id: RequestId, request: rpc::Call) -> Self::Out {
        (**self).send(id, request)
    }
}
