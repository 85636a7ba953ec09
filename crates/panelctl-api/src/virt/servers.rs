// Virtual server lifecycle and console endpoints
//
// Power state, ISO media, boot order, console/VNC access, TUN/TAP and PAE
// switches, and the read-only info/status calls. All of them are keyed by
// a numeric `vserverid`.

use tracing::debug;

use crate::error::Error;
use crate::virt::client::VirtClient;
use crate::virt::request::{Action, BootOrder, PaeMode, Param, Request};
use crate::virt::validate;

impl VirtClient {
    async fn server_action(&self, action: Action, server_id: &str) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        self.execute(Request::new(action).param(Param::VserverId, id))
            .await
    }

    /// Reboot a virtual server.
    pub async fn reboot(&self, server_id: &str) -> Result<String, Error> {
        debug!(server_id, "rebooting server");
        self.server_action(Action::Reboot, server_id).await
    }

    /// Boot a virtual server.
    pub async fn boot(&self, server_id: &str) -> Result<String, Error> {
        debug!(server_id, "booting server");
        self.server_action(Action::Boot, server_id).await
    }

    /// Shut down a virtual server.
    pub async fn shutdown(&self, server_id: &str) -> Result<String, Error> {
        debug!(server_id, "shutting down server");
        self.server_action(Action::Shutdown, server_id).await
    }

    pub async fn suspend(&self, server_id: &str) -> Result<String, Error> {
        self.server_action(Action::Suspend, server_id).await
    }

    pub async fn unsuspend(&self, server_id: &str) -> Result<String, Error> {
        self.server_action(Action::Unsuspend, server_id).await
    }

    /// Mount an ISO image by file name.
    ///
    /// The name is not checked against `listiso`; the panel rejects
    /// unknown images in its response.
    pub async fn mount_iso(&self, server_id: &str, iso: &str) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        self.execute(
            Request::new(Action::MountIso)
                .param(Param::VserverId, id)
                .param(Param::Iso, iso),
        )
        .await
    }

    /// Unmount whatever ISO is currently mounted.
    pub async fn unmount_iso(&self, server_id: &str) -> Result<String, Error> {
        self.server_action(Action::UnmountIso, server_id).await
    }

    /// Set the boot device order (`cd`, `dc`, `c`, or `d`).
    pub async fn change_boot_order(
        &self,
        server_id: &str,
        boot_order: &str,
    ) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        let order: BootOrder = validate::one_of("boot_order", boot_order, BootOrder::ALL)?;
        self.execute(
            Request::new(Action::BootOrder)
                .param(Param::VserverId, id)
                .param(Param::BootOrder, order.as_str()),
        )
        .await
    }

    /// VNC address, port, and password.
    pub async fn get_vnc(&self, server_id: &str) -> Result<String, Error> {
        self.server_action(Action::Vnc, server_id).await
    }

    /// Serial console session details. `access` and `time` are passed through.
    pub async fn console(
        &self,
        server_id: &str,
        access: &str,
        time: &str,
    ) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        self.execute(
            Request::new(Action::Console)
                .param(Param::VserverId, id)
                .param(Param::Access, access)
                .param(Param::Time, time),
        )
        .await
    }

    pub async fn get_server_info(&self, server_id: &str) -> Result<String, Error> {
        self.server_action(Action::Info, server_id).await
    }

    /// Full server state. Each flag is sent only when given.
    pub async fn get_server_state(
        &self,
        server_id: &str,
        no_status: Option<&str>,
        no_graphs: Option<&str>,
    ) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        let no_status = no_status
            .map(|v| validate::flag("no_status", v))
            .transpose()?
            .map(validate::flag_str);
        let no_graphs = no_graphs
            .map(|v| validate::flag("no_graphs", v))
            .transpose()?
            .map(validate::flag_str);
        self.execute(
            Request::new(Action::InfoAll)
                .param(Param::VserverId, id)
                .param_opt(Param::NoStatus, no_status)
                .param_opt(Param::NoGraphs, no_graphs),
        )
        .await
    }

    pub async fn get_server_status(&self, server_id: &str) -> Result<String, Error> {
        self.server_action(Action::Status, server_id).await
    }

    pub async fn vserver_exists(&self, server_id: &str) -> Result<String, Error> {
        self.server_action(Action::CheckExists, server_id).await
    }

    pub async fn enable_tun(&self, server_id: &str) -> Result<String, Error> {
        self.server_action(Action::TunEnable, server_id).await
    }

    pub async fn disable_tun(&self, server_id: &str) -> Result<String, Error> {
        self.server_action(Action::TunDisable, server_id).await
    }

    /// Switch PAE `on` or `off`.
    pub async fn pae_status(&self, server_id: &str, pae: &str) -> Result<String, Error> {
        let id = validate::numeric("server_id", server_id)?;
        let mode: PaeMode = validate::one_of("pae", pae, PaeMode::ALL)?;
        self.execute(
            Request::new(Action::Pae)
                .param(Param::VserverId, id)
                .param(Param::Pae, mode.as_str()),
        )
        .await
    }
}
