// Virtualization control panel API
//
// Single-endpoint form API: every operation is a POST to `command.php`
// with `id`, `key`, `action`, and operation parameters. Operations are
// grouped by concern into inherent-impl modules on `VirtClient`.

pub mod client;
pub mod listings;
pub mod request;
pub mod resources;
pub mod servers;
pub mod validate;

pub use client::{VirtClient, VirtConfig};
pub use request::{Action, BootOrder, PaeMode, Param, Request, VirtType};
