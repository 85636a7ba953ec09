// Typed request model for the virtualization API.
//
// Every call is one `Action` plus an ordered list of `(Param, value)` pairs.
// Both enums are closed, so a request can never carry the reserved
// credential keys; those are appended only when the request is flattened
// into a form body at the transport boundary.

use strum::{EnumString, IntoStaticStr};

/// Wire key carrying the account id.
pub const ID_KEY: &str = "id";
/// Wire key carrying the API key.
pub const KEY_KEY: &str = "key";
/// Wire key carrying the action name.
pub const ACTION_KEY: &str = "action";
/// Wire key selecting the response format.
pub const RDTYPE_KEY: &str = "rdtype";
/// Response format requested on every call.
pub const RDTYPE_JSON: &str = "json";

/// The `action` value of a virtualization API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum Action {
    #[strum(serialize = "vserver-reboot")]
    Reboot,
    #[strum(serialize = "vserver-boot")]
    Boot,
    #[strum(serialize = "vserver-shutdown")]
    Shutdown,
    #[strum(serialize = "vserver-suspend")]
    Suspend,
    #[strum(serialize = "vserver-unsuspend")]
    Unsuspend,
    #[strum(serialize = "vserver-mountiso")]
    MountIso,
    #[strum(serialize = "vserver-unmountiso")]
    UnmountIso,
    #[strum(serialize = "vserver-vnc")]
    Vnc,
    #[strum(serialize = "vserver-console")]
    Console,
    #[strum(serialize = "vserver-info")]
    Info,
    #[strum(serialize = "vserver-infoall")]
    InfoAll,
    #[strum(serialize = "vserver-status")]
    Status,
    #[strum(serialize = "vserver-checkexists")]
    CheckExists,
    #[strum(serialize = "vserver-bootorder")]
    BootOrder,
    #[strum(serialize = "vserver-tun-enable")]
    TunEnable,
    #[strum(serialize = "vserver-tun-disable")]
    TunDisable,
    #[strum(serialize = "vserver-pae")]
    Pae,
    #[strum(serialize = "vserver-authenticate")]
    Authenticate,
    #[strum(serialize = "vserver-hostname")]
    Hostname,
    #[strum(serialize = "vserver-addip")]
    AddIp,
    #[strum(serialize = "vserver-delip")]
    DeleteIp,
    #[strum(serialize = "vserver-changeowner")]
    ChangeOwner,
    #[strum(serialize = "vserver-change")]
    ChangePlan,
    #[strum(serialize = "vserver-terminate")]
    Terminate,
    #[strum(serialize = "vserver-bandwidth")]
    Bandwidth,
    #[strum(serialize = "vserver-change-memory")]
    ChangeMemory,
    #[strum(serialize = "vserver-change-hdd")]
    ChangeHdd,
    #[strum(serialize = "vserver-rebuild")]
    Rebuild,
    #[strum(serialize = "vserver-rootpassword")]
    RootPassword,
    #[strum(serialize = "vserver-vncpass")]
    VncPassword,
    #[strum(serialize = "listiso")]
    ListIso,
    #[strum(serialize = "listplans")]
    ListPlans,
    #[strum(serialize = "listtemplates")]
    ListTemplates,
    #[strum(serialize = "node-idlist")]
    ListNodesById,
    #[strum(serialize = "listnodes")]
    ListNodesByName,
    #[strum(serialize = "listnodegroups")]
    ListNodeGroups,
    #[strum(serialize = "node-virtualservers")]
    NodeVirtualServers,
    #[strum(serialize = "node-iplist")]
    NodeIpList,
    #[strum(serialize = "client-list")]
    ClientList,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Operation-specific form keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Param {
    VserverId,
    NodeId,
    ClientId,
    Access,
    Time,
    Iso,
    BootOrder,
    Pae,
    Username,
    Password,
    Hostname,
    Ipv4Addr,
    ForceAddIp,
    IpAddr,
    Plan,
    ChangeHdd,
    DeleteClient,
    Limit,
    OverLimit,
    Memory,
    Hdd,
    Template,
    RootPassword,
    VncPassword,
    Type,
    ListPipeFriendly,
    NoStatus,
    NoGraphs,
}

impl Param {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Virtualization technology accepted by the listing calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub enum VirtType {
    #[strum(serialize = "xen hvm")]
    XenHvm,
    #[strum(serialize = "kvm")]
    Kvm,
    #[strum(serialize = "xen")]
    Xen,
    #[strum(serialize = "openvz")]
    OpenVz,
}

impl VirtType {
    pub const ALL: &'static str = "xen hvm, kvm, xen, openvz";
    pub const NODE_GROUPS: &'static str = "xen hvm, kvm";

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Node groups only exist for hardware-virtualized nodes.
    pub fn has_node_groups(self) -> bool {
        matches!(self, Self::XenHvm | Self::Kvm)
    }
}

/// Boot device order: c = disk, d = cdrom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum BootOrder {
    Cd,
    Dc,
    C,
    D,
}

impl BootOrder {
    pub const ALL: &'static str = "cd, dc, c, d";

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Physical Address Extension switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum PaeMode {
    On,
    Off,
}

impl PaeMode {
    pub const ALL: &'static str = "on, off";

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// One virtualization API call, before credentials are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    action: Action,
    params: Vec<(Param, String)>,
}

impl Request {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            params: Vec::new(),
        }
    }

    /// Append a parameter. A repeated key replaces the earlier value.
    pub fn param(mut self, key: Param, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
        self
    }

    /// Append a parameter only when a value is present.
    pub fn param_opt(self, key: Param, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn params(&self) -> &[(Param, String)] {
        &self.params
    }

    /// Flatten into form pairs: operation params, then credentials,
    /// action, and the response-format hint.
    pub fn into_form(self, account_id: &str, api_key: &str) -> Vec<(&'static str, String)> {
        let mut form: Vec<(&'static str, String)> = self
            .params
            .into_iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        form.push((ID_KEY, account_id.to_owned()));
        form.push((KEY_KEY, api_key.to_owned()));
        form.push((ACTION_KEY, self.action.as_str().to_owned()));
        form.push((RDTYPE_KEY, RDTYPE_JSON.to_owned()));
        form
    }
}
