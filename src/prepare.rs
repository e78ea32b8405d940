//! Per-request orchestration: auxiliary data, nonce binding, signing
//! hand-off and the outbound broadcast envelope.

use crate::{
    aux_field::{AuxFieldEncoder, Clock, SystemClock},
    codec, helpers,
    nonce::{NonceOracle, NonceSource},
    rpc,
    types::{Bytes, SignatureData, TransactionParameters, U256},
    Error, Result,
};
use futures::Future;
use std::time::Duration;

/// JSON-RPC method used to broadcast the signed transaction.
pub const SEND_RAW_TRANSACTION: &str = "eth_sendRawTransaction";

/// Deadline applied to the nonce fetch and to the signing call.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// External signer producing a signature over the unsigned encoding.
///
/// Typically a remote service or an HSM; either way it owns the keys and
/// the algorithm, this crate only hands it the preimage.
pub trait Signer {
    /// The type of future this signer returns.
    type Out: Future<Output = Result<SignatureData>>;

    /// Sign the given unsigned transaction bytes.
    fn sign(&self, unsigned: &[u8]) -> Self::Out;
}

/// A single in-flight request.
///
/// Holds the parameters with the auxiliary field already applied, the id
/// of the originating request, and the nonce state. The nonce moves from
/// unresolved to resolved exactly once; everything else is immutable.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedTransaction {
    params: TransactionParameters,
    id: rpc::Id,
    nonce: Option<U256>,
}

impl PreparedTransaction {
    pub(crate) fn new(params: TransactionParameters, id: rpc::Id, nonce: Option<U256>) -> Self {
        PreparedTransaction { params, id, nonce }
    }

    /// Transaction parameters, payload data already augmented.
    pub fn parameters(&self) -> &TransactionParameters {
        &self.params
    }

    /// Id of the request this transaction answers.
    pub fn id(&self) -> &rpc::Id {
        &self.id
    }

    /// The bound nonce, `None` until resolution succeeded.
    pub fn nonce(&self) -> Option<U256> {
        self.nonce
    }
}

/// Builds ready-to-sign and ready-to-broadcast transactions out of inbound
/// requests.
#[derive(Debug)]
pub struct TransactionPreparer<O, C = SystemClock> {
    nonces: NonceSource<O>,
    aux: AuxFieldEncoder<C>,
    chain_id: u64,
    deadline: Duration,
}

impl<O, C> TransactionPreparer<O, C>
where
    O: NonceOracle,
    C: Clock,
{
    /// Preparer for the given network, nonce oracle and auxiliary field
    /// encoder.
    pub fn new(oracle: O, aux: AuxFieldEncoder<C>, chain_id: u64) -> Self {
        TransactionPreparer {
            nonces: NonceSource::new(oracle),
            aux,
            chain_id,
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Override the deadline for the nonce fetch and the signing call.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Bind an inbound request to a transaction.
    ///
    /// The payload data is rewritten with the auxiliary field appended;
    /// the caller's value stays untouched. A request without payload data
    /// fails here, before any nonce traffic.
    pub fn prepare(&self, params: &TransactionParameters, id: rpc::Id) -> Result<PreparedTransaction> {
        let data = self.aux.apply(params.data.as_ref())?;
        let nonce = params.nonce;
        let params = TransactionParameters {
            data: Some(data),
            ..params.clone()
        };
        Ok(PreparedTransaction { params, id, nonce })
    }

    /// Resolve the transaction's nonce.
    ///
    /// A caller-supplied nonce is taken as-is and the nonce source is
    /// never consulted. Resolution happens once; calling again returns the
    /// value already bound.
    pub async fn resolve_nonce(&self, tx: &mut PreparedTransaction) -> Result<U256> {
        if let Some(nonce) = tx.nonce {
            return Ok(nonce);
        }
        let fetch = self.nonces.next_nonce(tx.params.from);
        let nonce = helpers::deadline(fetch, self.deadline)
            .await
            .map_err(|e| match e {
                Error::Timeout => Error::NonceUnavailable("fetch timed out".into()),
                other => other,
            })?;
        tx.nonce = Some(nonce);
        Ok(nonce)
    }

    /// The fixed outbound JSON-RPC method name.
    pub fn method_name(&self) -> &'static str {
        SEND_RAW_TRANSACTION
    }

    /// Wrap hex-encoded signed bytes into the outbound broadcast request,
    /// keyed by the original request id.
    pub fn build_outbound_request(&self, signed: &[u8], id: rpc::Id) -> rpc::Call {
        let raw = helpers::serialize(&Bytes(signed.to_vec()));
        helpers::build_request(id, SEND_RAW_TRANSACTION, vec![raw])
    }

    /// Run the whole pipeline for one request.
    ///
    /// Prepare, resolve the nonce, produce the signing preimage, wait for
    /// the external signer, re-encode with the signature and wrap the
    /// result. All or nothing: no request object is produced unless every
    /// step succeeded.
    pub async fn execute<S: Signer>(
        &self,
        params: &TransactionParameters,
        id: rpc::Id,
        signer: &S,
    ) -> Result<rpc::Call> {
        let mut tx = self.prepare(params, id)?;
        self.resolve_nonce(&mut tx).await?;

        let unsigned = codec::unsigned_bytes(&tx, self.chain_id)?;
        let signature = helpers::deadline(signer.sign(&unsigned), self.deadline).await?;
        let signed = codec::signed_bytes(&tx, &signature)?;

        log::debug!("request {:?} ready for broadcast", tx.id);
        let id = tx.id.clone();
        Ok(self.build_outbound_request(&signed, id))
    }
}
