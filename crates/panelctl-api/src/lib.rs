// panelctl-api: Async Rust clients for a virtualization control panel and a monitoring server

pub mod error;
pub mod monitor;
pub mod transport;
pub mod virt;

pub use error::Error;
pub use monitor::{MonitorClient, MonitorConfig, Protocol, RpcCall, Router, Session};
pub use transport::{TlsMode, TransportConfig};
pub use virt::{VirtClient, VirtConfig};
