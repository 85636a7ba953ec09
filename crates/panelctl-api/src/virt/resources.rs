// Virtual server resource and ownership endpoints
//
// IP addresses, hostname, plan, bandwidth, memory and disk sizing, owner,
// rebuild, passwords, and termination.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::Error;
use crate::virt::client::VirtClient;
use crate::virt::request::{Action, Param, Request};
use crate::virt::validate;

impl VirtClient {
    /// Change the server hostname.
    pub async fn change_hostname(&self, server_id: &str, hostname: &str) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        let hostname = validate::hostname("hostname", hostname)?;
        self.execute(
            Request::new(Action::Hostname)
                .param(Param::VserverId, id)
                .param(Param::Hostname, hostname),
        )
        .await
    }

    /// Add an IP address.
    ///
    /// Without `ipv4addr` the panel picks the next free address and neither
    /// `ipv4addr` nor `forceaddip` is sent. `force_add_ip` defaults to false.
    pub async fn add_ip(
        &self,
        server_id: &str,
        ipv4addr: Option<&str>,
        force_add_ip: Option<&str>,
    ) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        let mut request = Request::new(Action::AddIp).param(Param::VserverId, id);

        if let Some(addr) = ipv4addr {
            let addr = validate::ip("ipv4addr", addr)?;
            let force = force_add_ip
                .map(|v| validate::flag("force_add_ip", v))
                .transpose()?
                .unwrap_or(false);
            request = request
                .param(Param::Ipv4Addr, addr)
                .param(Param::ForceAddIp, validate::flag_str(force));
        }

        debug!(server_id, ?ipv4addr, "adding IP address");
        self.execute(request).await
    }

    /// Remove an IP address.
    pub async fn delete_ip(&self, server_id: &str, ipaddr: &str) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        let addr = validate::ip("ipaddr", ipaddr)?;
        debug!(server_id, ipaddr, "deleting IP address");
        self.execute(
            Request::new(Action::DeleteIp)
                .param(Param::VserverId, id)
                .param(Param::IpAddr, addr),
        )
        .await
    }

    /// Move the server to another client account.
    pub async fn change_owner(&self, server_id: &str, client_id: &str) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        let client = validate::numeric("client_id", client_id)?;
        self.execute(
            Request::new(Action::ChangeOwner)
                .param(Param::VserverId, id)
                .param(Param::ClientId, client),
        )
        .await
    }

    /// Switch plans, optionally resizing the disk to the new plan.
    pub async fn change_plan(
        &self,
        server_id: &str,
        plan: &str,
        change_hdd: Option<&str>,
    ) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        let change_hdd = change_hdd
            .map(|v| validate::flag("change_hdd", v))
            .transpose()?
            .unwrap_or(false);
        self.execute(
            Request::new(Action::ChangePlan)
                .param(Param::VserverId, id)
                .param(Param::Plan, plan)
                .param(Param::ChangeHdd, validate::flag_str(change_hdd)),
        )
        .await
    }

    /// Terminate the server, optionally deleting its client account.
    pub async fn terminate(
        &self,
        server_id: &str,
        delete_client: Option<&str>,
    ) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        let delete_client = delete_client
            .map(|v| validate::flag("delete_client", v))
            .transpose()?
            .unwrap_or(false);
        debug!(server_id, delete_client, "terminating server");
        self.execute(
            Request::new(Action::Terminate)
                .param(Param::VserverId, id)
                .param(Param::DeleteClient, validate::flag_str(delete_client)),
        )
        .await
    }

    /// Set the bandwidth limit and over-limit allowance.
    pub async fn change_bandwidth(
        &self,
        server_id: &str,
        limit: &str,
        overlimit: &str,
    ) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        let limit = validate::numeric("limit", limit)?;
        let overlimit = validate::numeric("overlimit", overlimit)?;
        self.execute(
            Request::new(Action::Bandwidth)
                .param(Param::VserverId, id)
                .param(Param::Limit, limit)
                .param(Param::OverLimit, overlimit),
        )
        .await
    }

    pub async fn change_memory(&self, server_id: &str, memory: &str) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        let memory = validate::numeric("memory", memory)?;
        self.execute(
            Request::new(Action::ChangeMemory)
                .param(Param::VserverId, id)
                .param(Param::Memory, memory),
        )
        .await
    }

    pub async fn change_disk_size(&self, server_id: &str, hdd: &str) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        let hdd = validate::numeric("hdd", hdd)?;
        self.execute(
            Request::new(Action::ChangeHdd)
                .param(Param::VserverId, id)
                .param(Param::Hdd, hdd),
        )
        .await
    }

    /// Reinstall the server from a template.
    pub async fn rebuild(&self, server_id: &str, template: &str) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        debug!(server_id, template, "rebuilding server");
        self.execute(
            Request::new(Action::Rebuild)
                .param(Param::VserverId, id)
                .param(Param::Template, template),
        )
        .await
    }

    pub async fn change_root_password(
        &self,
        server_id: &str,
        password: &SecretString,
    ) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        self.execute(
            Request::new(Action::RootPassword)
                .param(Param::VserverId, id)
                .param(Param::RootPassword, password.expose_secret()),
        )
        .await
    }

    pub async fn change_vnc_password(
        &self,
        server_id: &str,
        password: &SecretString,
    ) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        self.execute(
            Request::new(Action::VncPassword)
                .param(Param::VserverId, id)
                .param(Param::VncPassword, password.expose_secret()),
        )
        .await
    }
}
