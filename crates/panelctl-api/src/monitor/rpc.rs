// JSON-RPC envelope for the monitoring API.
//
// Callers describe a call as router + method + data; the fixed transaction
// id and request kind are added when the envelope is built.

use serde::Serialize;
use serde_json::Value;
use strum::IntoStaticStr;

/// Transaction id sent with every call.
pub const TID: u32 = 1;
/// Request kind sent with every call.
pub const RPC_KIND: &str = "rpc";

/// Server-side router class that handles the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, IntoStaticStr)]
pub enum Router {
    DeviceRouter,
    EventsRouter,
}

/// One router call, before the envelope fields are added.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcCall {
    pub action: Router,
    pub method: &'static str,
    pub data: Value,
}

/// Wire form: `{action, method, data: [data], tid, type}`.
#[derive(Debug, Serialize)]
pub struct Envelope<'a> {
    pub action: Router,
    pub method: &'a str,
    pub data: [&'a Value; 1],
    pub tid: u32,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl RpcCall {
    pub fn new(action: Router, method: &'static str, data: Value) -> Self {
        Self {
            action,
            method,
            data,
        }
    }

    pub fn envelope(&self) -> Envelope<'_> {
        Envelope {
            action: self.action,
            method: self.method,
            data: [&self.data],
            tid: TID,
            kind: RPC_KIND,
        }
    }
}
