//! Virtualization command handlers.

use tracing::debug;

use panelctl_api::VirtClient;

use super::{print_body, secret_or_prompt};
use crate::cli::{GlobalOpts, VirtCommand};
use crate::error::CliError;

#[allow(clippy::too_many_lines)]
pub async fn handle(
    client: &VirtClient,
    cmd: VirtCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    debug!(endpoint = %client.endpoint(), "virt command");

    let body = match cmd {
        // ── Lifecycle ────────────────────────────────────────────────
        VirtCommand::Reboot { server_id } => client.reboot(&server_id).await?,
        VirtCommand::Boot { server_id } => client.boot(&server_id).await?,
        VirtCommand::Shutdown { server_id } => client.shutdown(&server_id).await?,
        VirtCommand::Suspend { server_id } => client.suspend(&server_id).await?,
        VirtCommand::Unsuspend { server_id } => client.unsuspend(&server_id).await?,
        VirtCommand::MountIso { server_id, iso } => client.mount_iso(&server_id, &iso).await?,
        VirtCommand::UnmountIso { server_id } => client.unmount_iso(&server_id).await?,
        VirtCommand::BootOrder { server_id, order } => {
            client.change_boot_order(&server_id, &order).await?
        }
        VirtCommand::Vnc { server_id } => client.get_vnc(&server_id).await?,
        VirtCommand::Console {
            server_id,
            access,
            time,
        } => client.console(&server_id, &access, &time).await?,
        VirtCommand::Info { server_id } => client.get_server_info(&server_id).await?,
        VirtCommand::State {
            server_id,
            no_status,
            no_graphs,
        } => {
            client
                .get_server_state(&server_id, no_status.as_deref(), no_graphs.as_deref())
                .await?
        }
        VirtCommand::Status { server_id } => client.get_server_status(&server_id).await?,
        VirtCommand::Exists { server_id } => client.vserver_exists(&server_id).await?,
        VirtCommand::TunEnable { server_id } => client.enable_tun(&server_id).await?,
        VirtCommand::TunDisable { server_id } => client.disable_tun(&server_id).await?,
        VirtCommand::Pae { server_id, mode } => client.pae_status(&server_id, &mode).await?,

        // ── Resources ────────────────────────────────────────────────
        VirtCommand::Hostname {
            server_id,
            hostname,
        } => client.change_hostname(&server_id, &hostname).await?,
        VirtCommand::AddIp {
            server_id,
            ip,
            force,
        } => {
            client
                .add_ip(&server_id, ip.as_deref(), force.as_deref())
                .await?
        }
        VirtCommand::DeleteIp { server_id, ip } => client.delete_ip(&server_id, &ip).await?,
        VirtCommand::ChangeOwner {
            server_id,
            client_id,
        } => client.change_owner(&server_id, &client_id).await?,
        VirtCommand::ChangePlan {
            server_id,
            plan,
            change_hdd,
        } => {
            client
                .change_plan(&server_id, &plan, change_hdd.as_deref())
                .await?
        }
        VirtCommand::Terminate {
            server_id,
            delete_client,
        } => client.terminate(&server_id, delete_client.as_deref()).await?,
        VirtCommand::Bandwidth {
            server_id,
            limit,
            overlimit,
        } => client.change_bandwidth(&server_id, &limit, &overlimit).await?,
        VirtCommand::Memory { server_id, memory } => {
            client.change_memory(&server_id, &memory).await?
        }
        VirtCommand::Disk { server_id, hdd } => client.change_disk_size(&server_id, &hdd).await?,
        VirtCommand::Rebuild {
            server_id,
            template,
        } => client.rebuild(&server_id, &template).await?,
        VirtCommand::RootPassword {
            server_id,
            password,
        } => {
            let password = secret_or_prompt(password, "New root password: ")?;
            client.change_root_password(&server_id, &password).await?
        }
        VirtCommand::VncPassword {
            server_id,
            password,
        } => {
            let password = secret_or_prompt(password, "New VNC password: ")?;
            client.change_vnc_password(&server_id, &password).await?
        }

        // ── Listings ─────────────────────────────────────────────────
        VirtCommand::ListIso { virt_type } => client.list_iso(&virt_type).await?,
        VirtCommand::ListPlans { virt_type } => client.list_plans(&virt_type).await?,
        VirtCommand::ListTemplates {
            virt_type,
            pipe_friendly,
        } => client.list_templates(&virt_type, &pipe_friendly).await?,
        VirtCommand::ListNodeIds { virt_type } => client.list_nodes_by_id(&virt_type).await?,
        VirtCommand::ListNodes { virt_type } => client.list_nodes_by_name(&virt_type).await?,
        VirtCommand::ListNodeGroups { virt_type } => client.list_node_groups(&virt_type).await?,
        VirtCommand::ListClients => client.list_clients().await?,
        VirtCommand::ListServers { node_id } => client.list_servers(&node_id).await?,
        VirtCommand::NodeIps { node_id } => client.get_node_ips(&node_id).await?,
        VirtCommand::Authenticate { username, password } => {
            let password = secret_or_prompt(password, "Client password: ")?;
            client.authenticate_client(&username, &password).await?
        }
    };

    print_body(&body, global);
    Ok(())
}
