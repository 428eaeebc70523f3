//! Shared scripted wallet mocks for the integration tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use alloy_json_rpc::ErrorPayload;
use alloy_primitives::Address;
use async_trait::async_trait;
use serde_json::{Value, json};
use wallet_connector::eip1193::rpc_error;
use wallet_connector::{Eip1193Provider, PairingApproval, PairingProposal, PairingTransport};

/// Account every mock wallet exposes.
pub const ACCOUNT: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

/// The mock account as a typed address.
pub fn account() -> Address {
    ACCOUNT.parse().unwrap()
}

/// Scripted injected-wallet transport.
///
/// Responses queued with [`script`](Self::script) are consumed first;
/// otherwise the mock behaves like a cooperative wallet that tracks its
/// own current chain: switch/add requests move it to the requested
/// chain, `eth_chainId` reports wherever it is.
pub struct MockWallet {
    available: bool,
    chain_id: Mutex<u64>,
    scripted: Mutex<HashMap<String, VecDeque<Result<Value, ErrorPayload>>>>,
    calls: Mutex<Vec<String>>,
}

impl MockWallet {
    pub fn on_chain(chain_id: u64) -> Self {
        Self {
            available: true,
            chain_id: Mutex::new(chain_id),
            scripted: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A transport whose environment has no wallet extension installed.
    #[allow(dead_code)]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::on_chain(0)
        }
    }

    /// Queues one response for `method`, consumed before the default
    /// behaviour.
    #[allow(dead_code)]
    pub fn script(&self, method: &str, response: Result<Value, ErrorPayload>) {
        self.scripted
            .lock()
            .unwrap()
            .entry(method.to_owned())
            .or_default()
            .push_back(response);
    }

    /// Number of requests issued for `method`.
    pub fn calls(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.as_str() == method)
            .count()
    }

    fn move_to_requested_chain(&self, params: &Value) {
        let requested = params[0]["chainId"]
            .as_str()
            .and_then(|hex| hex.strip_prefix("0x"))
            .and_then(|digits| u64::from_str_radix(digits, 16).ok());
        if let Some(chain_id) = requested {
            *self.chain_id.lock().unwrap() = chain_id;
        }
    }
}

#[async_trait]
impl Eip1193Provider for MockWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ErrorPayload> {
        self.calls.lock().unwrap().push(method.to_owned());

        let scripted = self
            .scripted
            .lock()
            .unwrap()
            .get_mut(method)
            .and_then(VecDeque::pop_front);
        if let Some(response) = scripted {
            return response;
        }

        match method {
            "eth_requestAccounts" => Ok(json!([ACCOUNT])),
            "eth_chainId" => Ok(json!(format!("{:#x}", *self.chain_id.lock().unwrap()))),
            "wallet_switchEthereumChain" | "wallet_addEthereumChain" => {
                self.move_to_requested_chain(&params);
                Ok(Value::Null)
            }
            "wallet_revokePermissions" => Ok(Value::Null),
            other => Err(rpc_error(-32601, format!("method not found: {other}"))),
        }
    }

    fn available(&self) -> bool {
        self.available
    }
}

/// Scripted QR-pairing transport.
///
/// By default every proposal is approved on its first requested chain
/// with the shared mock account.
pub struct MockPairing {
    scripted: Mutex<VecDeque<Result<PairingApproval, ErrorPayload>>>,
    proposals: Mutex<Vec<PairingProposal>>,
    disconnect_failure: Mutex<Option<ErrorPayload>>,
    disconnects: Mutex<usize>,
}

impl MockPairing {
    pub fn approving() -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            proposals: Mutex::new(Vec::new()),
            disconnect_failure: Mutex::new(None),
            disconnects: Mutex::new(0),
        }
    }

    /// Queues one pairing outcome, consumed before the default approval.
    #[allow(dead_code)]
    pub fn script(&self, response: Result<PairingApproval, ErrorPayload>) {
        self.scripted.lock().unwrap().push_back(response);
    }

    /// Makes the next disconnect report the given failure.
    #[allow(dead_code)]
    pub fn fail_disconnect_with(&self, err: ErrorPayload) {
        *self.disconnect_failure.lock().unwrap() = Some(err);
    }

    /// Proposals received so far.
    pub fn proposals(&self) -> Vec<PairingProposal> {
        self.proposals.lock().unwrap().clone()
    }

    /// Number of disconnects issued.
    #[allow(dead_code)]
    pub fn disconnects(&self) -> usize {
        *self.disconnects.lock().unwrap()
    }
}

#[async_trait]
impl PairingTransport for MockPairing {
    async fn propose(&self, proposal: &PairingProposal) -> Result<PairingApproval, ErrorPayload> {
        self.proposals.lock().unwrap().push(proposal.clone());
        let scripted = self.scripted.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| {
            Ok(PairingApproval {
                account: account(),
                chain_id: proposal.chains[0],
            })
        })
    }

    async fn disconnect(&self) -> Result<(), ErrorPayload> {
        *self.disconnects.lock().unwrap() += 1;
        self.disconnect_failure
            .lock()
            .unwrap()
            .take()
            .map_or(Ok(()), Err)
    }
}
