// Monitoring device, component, and event queries
//
// Each query is addressed to a router path under the device's own URI,
// except the device listing which goes to the fixed device-class root.
// Arguments are passed through verbatim.

use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::monitor::client::MonitorClient;
use crate::monitor::rpc::{Router, RpcCall};

/// Device listing path.
pub const DEVICES_PATH: &str = "/zport/dmd/Devices/getSubDevices";

const DEVICE_ROUTER: &str = "/device_router";
const EVENTS_ROUTER: &str = "/evconsole_router";
const SUB_DEVICES: &str = "/getSubDevices";

/// Fields requested by [`MonitorClient::get_device_info`].
pub const DEVICE_INFO_KEYS: [&str; 26] = [
    "uptime",
    "firstSeen",
    "lastChanged",
    "lastCollected",
    "memory",
    "name",
    "productionState",
    "systemName",
    "uid",
    "location",
    "tagNumber",
    "serialNumber",
    "rackSlot",
    "osModel",
    "links",
    "comments",
    "snmpSysName",
    "snmpLocation",
    "snmpContact",
    "snmpDescr",
    "snmpCommunity",
    "snmpVersion",
    "device",
    "deviceClass",
    "groups",
    "ipAddressString",
];

/// `{device_uri}{suffix}` without a doubled slash.
pub fn device_path(device_uri: &str, suffix: &str) -> String {
    format!("{}{suffix}", device_uri.trim_end_matches('/'))
}

impl MonitorClient {
    /// Collectors the device can be assigned to.
    pub async fn get_device_collectors(&self, device_uri: &str) -> Result<String, Error> {
        let call = RpcCall::new(Router::DeviceRouter, "getCollectors", json!({}));
        self.query(&call, &device_path(device_uri, DEVICE_ROUTER))
            .await
    }

    /// One page of all devices.
    pub async fn get_devices(
        &self,
        start: u32,
        limit: u32,
        sort: &str,
        dir: &str,
    ) -> Result<String, Error> {
        debug!(start, limit, sort, dir, "listing devices");
        let call = RpcCall::new(
            Router::DeviceRouter,
            "getDevices",
            json!({
                "start": start,
                "limit": limit,
                "sort": sort,
                "dir": dir,
                "params": {},
            }),
        );
        self.query(&call, DEVICES_PATH).await
    }

    /// Device details for the fixed [`DEVICE_INFO_KEYS`] field set.
    pub async fn get_device_info(&self, device_uri: &str) -> Result<String, Error> {
        let call = RpcCall::new(
            Router::DeviceRouter,
            "getInfo",
            json!({
                "uid": device_uri,
                "keys": DEVICE_INFO_KEYS,
            }),
        );
        self.query(&call, &device_path(device_uri, SUB_DEVICES))
            .await
    }

    /// One page of the device's IP interfaces.
    pub async fn get_device_components(
        &self,
        device_uri: &str,
        start: u32,
        limit: u32,
    ) -> Result<String, Error> {
        let call = RpcCall::new(
            Router::DeviceRouter,
            "getComponents",
            json!({
                "uid": device_uri,
                "start": start,
                "limit": limit,
                "meta_type": "IpInterface",
                "keys": [],
            }),
        );
        self.query(&call, &device_path(device_uri, DEVICE_ROUTER))
            .await
    }

    /// One page of events, any severity and state.
    pub async fn get_device_events(
        &self,
        device_uri: &str,
        start: u32,
        limit: u32,
        sort: &str,
        dir: &str,
    ) -> Result<String, Error> {
        let call = RpcCall::new(
            Router::EventsRouter,
            "query",
            json!({
                "start": start,
                "limit": limit,
                "sort": sort,
                "dir": dir,
                "params": {
                    "severity": [],
                    "eventState": [],
                },
            }),
        );
        self.query(&call, &device_path(device_uri, EVENTS_ROUTER))
            .await
    }

    /// Graph definitions (RRD URLs) for an interface over `drange` seconds.
    pub async fn get_device_interface_rrd(
        &self,
        device_uri: &str,
        interface: &str,
        drange: u64,
    ) -> Result<String, Error> {
        let call = RpcCall::new(
            Router::DeviceRouter,
            "getGraphDefs",
            json!({
                "uid": interface,
                "drange": drange,
            }),
        );
        self.query(&call, &device_path(device_uri, DEVICE_ROUTER))
            .await
    }

    /// Form data describing one interface.
    pub async fn get_device_interface_details(
        &self,
        device_uri: &str,
        interface: &str,
    ) -> Result<String, Error> {
        let call = RpcCall::new(Router::DeviceRouter, "getForm", json!({ "uid": interface }));
        self.query(&call, &device_path(device_uri, DEVICE_ROUTER))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_path_trims_trailing_slash() {
        assert_eq!(
            device_path("/zport/dmd/Devices/Server/devices/host1/", DEVICE_ROUTER),
            "/zport/dmd/Devices/Server/devices/host1/device_router"
        );
        assert_eq!(
            device_path("/zport/dmd/Devices/Server/devices/host1", EVENTS_ROUTER),
            "/zport/dmd/Devices/Server/devices/host1/evconsole_router"
        );
    }

    #[test]
    fn info_keys_are_unique() {
        let mut keys = DEVICE_INFO_KEYS.to_vec();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), DEVICE_INFO_KEYS.len());
    }
}
