//! JSON-RPC and future helpers.

use crate::{error, rpc, Error};
use futures::{
    future::{self, Either},
    task::{Context, Poll},
    Future,
};
use futures_timer::Delay;
use pin_project::pin_project;
use std::{marker::PhantomData, pin::Pin, time::Duration};

/// Takes any type which is deserializable from rpc::Value and such a value and
/// yields the deserialized value
pub fn decode<T: serde::de::DeserializeOwned>(value: rpc::Value) -> error::Result<T> {
    serde_json::from_value(value).map_err(Into::into)
}

/// Serialize a type. Panics if the type is returns error during serialization.
pub fn serialize<T: serde::Serialize>(t: &T) -> rpc::Value {
    serde_json::to_value(t).expect("Types never fail to serialize.")
}

/// Build a JSON-RPC request carrying the caller's original id.
pub fn build_request(id: rpc::Id, method: &str, params: Vec<rpc::Value>) -> rpc::Call {
    rpc::Call::MethodCall(rpc::MethodCall {
        jsonrpc: Some(rpc::Version::V2),
        method: method.into(),
        params: rpc::Params::Array(params),
        id,
    })
}

/// Calls decode on the result of the wrapped future.
#[pin_project]
#[derive(Debug)]
pub struct CallFuture<T, F> {
    #[pin]
    inner: F,
    _marker: PhantomData<T>,
}

impl<T, F> CallFuture<T, F> {
    /// Create a new CallFuture wrapping the inner future.
    pub fn new(inner: F) -> Self {
        CallFuture {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T, F> Future for CallFuture<T, F>
where
    T: serde::de::DeserializeOwned,
    F: Future<Output = error::Result<rpc::Value>>,
{
    type Output = error::Result<T>;

    fn poll(self: Pin<&mut Self>, ctx: &mut Context) -> Poll<Self::Output> {
        let this = self.project();
        let x = futures::ready!(this.inner.poll(ctx));
        Poll::Ready(x.and_then(decode))
    }
}

/// Await a fallible future, but no longer than `limit`.
///
/// Expiry surfaces as [`Error::Timeout`]; the inner future is dropped, so
/// nothing partial escapes.
pub async fn deadline<F, T>(fut: F, limit: Duration) -> error::Result<T>
where
    F: Future<Output = error::Result<T>>,
{
    futures::pin_mut!(fut);
    match future::select(fut, Delay::new(limit)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(Error::Timeout),
    }
}
