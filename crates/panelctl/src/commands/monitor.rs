//! Monitoring command handlers.

use tracing::debug;

use panelctl_api::MonitorClient;

use super::print_body;
use crate::cli::{GlobalOpts, MonitorCommand};
use crate::error::CliError;

pub async fn handle(
    client: &MonitorClient,
    cmd: MonitorCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    debug!(origin = %client.origin(), "monitor command");

    let body = match cmd {
        MonitorCommand::Collectors { device_uri } => {
            client.get_device_collectors(&device_uri).await?
        }
        MonitorCommand::Devices { page, sort, dir } => {
            client
                .get_devices(page.start, page.limit, &sort, &dir)
                .await?
        }
        MonitorCommand::Info { device_uri } => client.get_device_info(&device_uri).await?,
        MonitorCommand::Components { device_uri, page } => {
            client
                .get_device_components(&device_uri, page.start, page.limit)
                .await?
        }
        MonitorCommand::Events {
            device_uri,
            page,
            sort,
            dir,
        } => {
            client
                .get_device_events(&device_uri, page.start, page.limit, &sort, &dir)
                .await?
        }
        MonitorCommand::InterfaceRrd {
            device_uri,
            interface,
            drange,
        } => {
            client
                .get_device_interface_rrd(&device_uri, &interface, drange)
                .await?
        }
        MonitorCommand::InterfaceDetails {
            device_uri,
            interface,
        } => {
            client
                .get_device_interface_details(&device_uri, &interface)
                .await?
        }
    };

    print_body(&body, global);
    Ok(())
}
