//! Per-sender nonce assignment.
//!
//! Two transactions from one sender must never leave the proxy carrying the
//! same nonce: the network accepts exactly one of them and rejects the
//! other. [`NonceSource`] therefore serializes the upstream fetch per
//! sender and remembers the last value it issued, so concurrent auto-nonce
//! requests always observe distinct, increasing values while unrelated
//! senders proceed in parallel.

use crate::{
    helpers::{self, CallFuture},
    types::{Address, U256},
    Error, Transport,
};
use futures::{lock::Mutex as AsyncMutex, Future};
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};

/// Upstream supplier of the next unused nonce for a sender.
///
/// How the value is sourced (pending transaction count of a node, a local
/// ledger) is the implementor's business.
pub trait NonceOracle {
    /// The type of future this oracle returns.
    type Out: Future<Output = crate::Result<U256>>;

    /// Query the next unused nonce for `sender`.
    fn next_nonce(&self, sender: Address) -> Self::Out;
}

/// Oracle asking an upstream node for the sender's pending transaction
/// count.
#[derive(Debug, Clone)]
pub struct PendingNonceOracle<T> {
    transport: T,
}

impl<T: Transport> PendingNonceOracle<T> {
    /// Create an oracle querying the given transport.
    pub fn new(transport: T) -> Self {
        PendingNonceOracle { transport }
    }
}

impl<T: Transport> NonceOracle for PendingNonceOracle<T> {
    type Out = CallFuture<U256, T::Out>;

    fn next_nonce(&self, sender: Address) -> Self::Out {
        let sender = helpers::serialize(&sender);
        let tag = helpers::serialize(&"pending");
        CallFuture::new(self.transport.execute("eth_getTransactionCount", vec![sender, tag]))
    }
}

#[derive(Debug, Default)]
struct SenderState {
    last_issued: Option<U256>,
}

/// Hands out distinct, monotonically increasing nonces per sender.
#[derive(Debug)]
pub struct NonceSource<O> {
    oracle: O,
    senders: Mutex<HashMap<Address, Arc<AsyncMutex<SenderState>>>>,
}

impl<O: NonceOracle> NonceSource<O> {
    /// Wrap an oracle with per-sender serialization.
    pub fn new(oracle: O) -> Self {
        NonceSource {
            oracle,
            senders: Mutex::new(HashMap::new()),
        }
    }

    /// Next unused nonce for `sender`.
    ///
    /// At most one upstream fetch per sender is in flight; concurrent
    /// callers for the same sender queue behind it rather than issuing
    /// redundant queries. When the upstream count lags behind what was
    /// already handed out, the value is bumped past the last issued one.
    pub async fn next_nonce(&self, sender: Address) -> crate::Result<U256> {
        let state = self.senders.lock().entry(sender).or_default().clone();
        let mut state = state.lock().await;

        let fetched = self
            .oracle
            .next_nonce(sender)
            .await
            .map_err(|e| Error::NonceUnavailable(e.to_string()))?;
        let next = match state.last_issued {
            Some(last) if fetched <= last => last + 1,
            _ => fetched,
        };
        state.last_issued = Some(next);
        log::debug!("nonce {} assigned to {:?}", next, sender);
        Ok(next)
    }
}
