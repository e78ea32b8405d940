//! Test Transport

use crate::{error, helpers, rpc, Error, RequestId, Transport};
use futures::future::{self, BoxFuture, FutureExt};
use parking_lot::Mutex;
use std::{collections::VecDeque, sync::Arc};

type Result<T> = BoxFuture<'static, error::Result<T>>;

/// Transport replaying a scripted queue of responses and recording every
/// request it sees. Clones share state, so a clone can go into an oracle
/// while the original asserts.
#[derive(Debug, Default, Clone)]
pub struct TestTransport {
    asserted: usize,
    requests: Arc<Mutex<Vec<(String, Vec<rpc::Value>)>>>,
    responses: Arc<Mutex<VecDeque<error::Result<rpc::Value>>>>,
}

impl Transport for TestTransport {
    type Out = Result<rpc::Value>;

    fn prepare(&self, method: &str, params: Vec<rpc::Value>) -> (RequestId, rpc::Call) {
        let request = helpers::build_request(rpc::Id::Num(1), method, params.clone());
        let mut requests = self.requests.lock();
        requests.push((method.into(), params));
        (requests.len(), request)
    }

    fn send(&self, id: RequestId, request: rpc::Call) -> Result<rpc::Value> {
        future::ready(match self.responses.lock().pop_front() {
            Some(response) => response,
            None => {
                println!("Unexpected request (id: {:?}): {:?}", id, request);
                Err(Error::Unreachable)
            }
        })
        .boxed()
    }
}

impl TestTransport {
    /// Queue a successful response.
    pub fn add_response(&mut self, value: rpc::Value) {
        self.responses.lock().push_back(Ok(value));
    }

    /// Queue a failure.
    pub fn add_error(&mut self, error: Error) {
        self.responses.lock().push_back(Err(error));
    }

    /// Assert the next recorded request.
    pub fn assert_request(&mut self, method: &str, params: &[String]) {
        let idx = self.asserted;
        self.asserted += 1;

        let (m, p) = self.requests.lock().get(idx).expect("Expected result.").clone();
        assert_eq!(&m, method);
        let p: Vec<String> = p.into_iter().map(|p| serde_json::to_string(&p).unwrap()).collect();
        assert_eq!(p, params);
    }

    /// Assert no more requests
    pub fn assert_no_more_requests(&self) {
        let requests = self.requests.lock();
        assert_eq!(
            self.asserted,
            requests.len(),
            "Expected no more requests, got: {:?}",
            &requests[self.asserted..]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn replays_responses_in_order_then_fails() {
        let mut transport = TestTransport::default();
        transport.add_response(json!("0x1"));
        transport.add_error(Error::Timeout);

        assert_eq!(block_on(transport.execute("a", vec![])), Ok(json!("0x1")));
        assert_eq!(block_on(transport.execute("b", vec![])), Err(Error::Timeout));
        assert_eq!(block_on(transport.execute("c", vec![])), Err(Error::Unreachable));

        transport.assert_request("a", &[]);
        transport.assert_request("b", &[]);
        transport.assert_request("c", &[]);
        transport.assert_no_more_requests();
    }
}
