// Panel-wide listing and client endpoints
//
// Templates, plans, ISO images, nodes and node groups are listed per
// virtualization type; servers and IPs per numeric node id.

use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;
use crate::virt::client::VirtClient;
use crate::virt::request::{Action, Param, Request, VirtType};
use crate::virt::validate;

impl VirtClient {
    async fn typed_listing(&self, action: Action, virt_type: &str) -> Result<String, Error> {
        let virt_type: VirtType = validate::one_of("type", virt_type, VirtType::ALL)?;
        self.execute(Request::new(action).param(Param::Type, virt_type.as_str()))
            .await
    }

    /// ISO images available for the given virtualization type.
    pub async fn list_iso(&self, virt_type: &str) -> Result<String, Error> {
        self.typed_listing(Action::ListIso, virt_type).await
    }

    pub async fn list_plans(&self, virt_type: &str) -> Result<String, Error> {
        self.typed_listing(Action::ListPlans, virt_type).await
    }

    pub async fn list_nodes_by_id(&self, virt_type: &str) -> Result<String, Error> {
        self.typed_listing(Action::ListNodesById, virt_type).await
    }

    pub async fn list_nodes_by_name(&self, virt_type: &str) -> Result<String, Error> {
        self.typed_listing(Action::ListNodesByName, virt_type).await
    }

    /// Templates for the given type. `list_pipe_friendly` asks for a
    /// `|`-separated listing of template file names and descriptions.
    pub async fn list_templates(
        &self,
        virt_type: &str,
        list_pipe_friendly: &str,
    ) -> Result<String, Error> {
        let virt_type: VirtType = validate::one_of("type", virt_type, VirtType::ALL)?;
        let pipe = validate::flag("list_pipe_friendly", list_pipe_friendly)?;
        self.execute(
            Request::new(Action::ListTemplates)
                .param(Param::Type, virt_type.as_str())
                .param(Param::ListPipeFriendly, validate::flag_str(pipe)),
        )
        .await
    }

    /// Node groups. Only `xen hvm` and `kvm` have them.
    pub async fn list_node_groups(&self, virt_type: &str) -> Result<String, Error> {
        let parsed: VirtType = validate::one_of("type", virt_type, VirtType::NODE_GROUPS)?;
        if !parsed.has_node_groups() {
            return Err(Error::invalid(
                "type",
                virt_type,
                format!("must be one of: {}", VirtType::NODE_GROUPS),
            ));
        }
        self.execute(Request::new(Action::ListNodeGroups).param(Param::Type, parsed.as_str()))
            .await
    }

    pub async fn list_clients(&self) -> Result<String, Error> {
        self.execute(Request::new(Action::ClientList)).await
    }

    /// Virtual servers hosted on a node.
    pub async fn list_servers(&self, node_id: &str) -> Result<String, Error> {
        let node = validate::numeric("node_id", node_id)?;
        self.execute(Request::new(Action::NodeVirtualServers).param(Param::NodeId, node))
            .await
    }

    /// IP addresses assigned to a node.
    pub async fn get_node_ips(&self, node_id: &str) -> Result<String, Error> {
        let node = validate::numeric("node_id", node_id)?;
        self.execute(Request::new(Action::NodeIpList).param(Param::NodeId, node))
            .await
    }

    /// Check a client's panel login.
    pub async fn authenticate_client(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<String, Error> {
        let username = validate::alphanumeric("username", username)?;
        self.execute(
            Request::new(Action::Authenticate)
                .param(Param::Username, username)
                .param(Param::Password, password.expose_secret()),
        )
        .await
    }
}
