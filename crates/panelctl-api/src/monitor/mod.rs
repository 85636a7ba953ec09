// Monitoring server JSON-RPC API
//
// Cookie-authenticated router calls: a login per query, then one POST of
// the `{action, method, data, tid, type}` envelope to a router path.

pub mod client;
pub mod devices;
pub mod rpc;
pub mod session;

pub use client::{MonitorClient, MonitorConfig, Protocol};
pub use rpc::{Router, RpcCall};
pub use session::Session;
