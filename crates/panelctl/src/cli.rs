//! Clap derive structures for the `panelctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// panelctl -- drive a virtualization control panel and a monitoring server
#[derive(Debug, Parser)]
#[command(
    name = "panelctl",
    version,
    about = "Virtualization panel and monitoring server client",
    long_about = "Send single API calls to a virtualization control panel and\n\
        query a monitoring server's JSON-RPC routers. Responses are printed\n\
        as returned by the remote side.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Profile to use
    #[arg(long, short = 'p', env = "PANELCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PANELCTL_OUTPUT",
        default_value = "raw",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PANELCTL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "PANELCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    // ── Virtualization overrides ──
    /// Virtualization API root URL (overrides profile)
    #[arg(long, env = "PANELCTL_VIRT_URL", global = true)]
    pub virt_url: Option<String>,

    /// Virtualization API account id (overrides profile)
    #[arg(long, env = "PANELCTL_ACCOUNT_ID", global = true)]
    pub account_id: Option<String>,

    /// Virtualization API key
    #[arg(long, env = "PANELCTL_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    // ── Monitoring overrides ──
    /// Monitoring server URL, e.g. https://mon.example.com:8080 (overrides profile)
    #[arg(long, env = "PANELCTL_MONITOR_URL", global = true)]
    pub monitor_url: Option<String>,

    /// Monitoring username (overrides profile)
    #[arg(long, env = "PANELCTL_MONITOR_USER", global = true)]
    pub monitor_user: Option<String>,

    /// Monitoring password
    #[arg(
        long,
        env = "PANELCTL_MONITOR_PASSWORD",
        global = true,
        hide_env_values = true
    )]
    pub monitor_password: Option<String>,

    /// File to write monitoring session cookies to (overrides profile)
    #[arg(long, env = "PANELCTL_COOKIE_JAR", global = true)]
    pub cookie_jar: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Response body exactly as received
    Raw,
    /// Pretty-printed JSON when the body parses, raw otherwise
    Json,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Virtualization control panel operations
    #[command(alias = "v")]
    Virt(VirtArgs),

    /// Monitoring server queries
    #[command(alias = "mon", alias = "m")]
    Monitor(MonitorArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Virt ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VirtArgs {
    #[command(subcommand)]
    pub command: VirtCommand,
}

#[derive(Debug, Subcommand)]
pub enum VirtCommand {
    // ── Lifecycle ──
    /// Reboot a virtual server
    Reboot { server_id: String },

    /// Boot a virtual server
    Boot { server_id: String },

    /// Shut down a virtual server
    Shutdown { server_id: String },

    /// Suspend a virtual server
    Suspend { server_id: String },

    /// Unsuspend a virtual server
    Unsuspend { server_id: String },

    /// Mount an ISO image
    MountIso {
        server_id: String,
        /// ISO file name as listed by `list-iso`
        iso: String,
    },

    /// Unmount the mounted ISO image
    UnmountIso { server_id: String },

    /// Set the boot order (cd, dc, c, d)
    BootOrder { server_id: String, order: String },

    /// Show VNC connection details
    Vnc { server_id: String },

    /// Open or close serial console access
    Console {
        server_id: String,
        /// Access mode, e.g. enable or disable
        access: String,
        /// Session length in hours
        time: String,
    },

    /// Show server information
    Info { server_id: String },

    /// Show full server state
    State {
        server_id: String,
        /// Skip live status (true/false)
        #[arg(long)]
        no_status: Option<String>,
        /// Skip graphs (true/false)
        #[arg(long)]
        no_graphs: Option<String>,
    },

    /// Show whether the server is online
    Status { server_id: String },

    /// Check that a server exists
    Exists { server_id: String },

    /// Enable the TUN/TAP device
    TunEnable { server_id: String },

    /// Disable the TUN/TAP device
    TunDisable { server_id: String },

    /// Switch PAE on or off
    Pae { server_id: String, mode: String },

    // ── Resources ──
    /// Change the hostname
    Hostname { server_id: String, hostname: String },

    /// Add an IP address (next free one when --ip is omitted)
    AddIp {
        server_id: String,
        #[arg(long)]
        ip: Option<String>,
        /// Add even if the address is in use (true/false)
        #[arg(long)]
        force: Option<String>,
    },

    /// Remove an IP address
    DeleteIp { server_id: String, ip: String },

    /// Move the server to another client
    ChangeOwner { server_id: String, client_id: String },

    /// Change the plan
    ChangePlan {
        server_id: String,
        plan: String,
        /// Resize the disk to the plan's size (true/false)
        #[arg(long)]
        change_hdd: Option<String>,
    },

    /// Terminate the server
    Terminate {
        server_id: String,
        /// Also delete the owning client (true/false)
        #[arg(long)]
        delete_client: Option<String>,
    },

    /// Set the bandwidth limit and overage allowance
    Bandwidth {
        server_id: String,
        limit: String,
        overlimit: String,
    },

    /// Set memory in MB
    Memory { server_id: String, memory: String },

    /// Set disk size in GB
    Disk { server_id: String, hdd: String },

    /// Rebuild from a template
    Rebuild { server_id: String, template: String },

    /// Change the root password (prompts when --password is omitted)
    RootPassword {
        server_id: String,
        #[arg(long)]
        password: Option<String>,
    },

    /// Change the VNC password (prompts when --password is omitted)
    VncPassword {
        server_id: String,
        #[arg(long)]
        password: Option<String>,
    },

    // ── Listings ──
    /// List ISO images
    ListIso { virt_type: String },

    /// List plans
    ListPlans { virt_type: String },

    /// List templates
    ListTemplates {
        virt_type: String,
        /// Pipe-separated output (true/false)
        #[arg(long, default_value = "false")]
        pipe_friendly: String,
    },

    /// List node ids
    ListNodeIds { virt_type: String },

    /// List node names
    ListNodes { virt_type: String },

    /// List node groups (xen hvm, kvm)
    ListNodeGroups { virt_type: String },

    /// List clients
    ListClients,

    /// List virtual servers on a node
    ListServers { node_id: String },

    /// List IP addresses of a node
    NodeIps { node_id: String },

    /// Check a client's login (prompts when --password is omitted)
    Authenticate {
        username: String,
        #[arg(long)]
        password: Option<String>,
    },
}

// ── Monitor ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MonitorArgs {
    #[command(subcommand)]
    pub command: MonitorCommand,
}

/// Shared paging arguments.
#[derive(Debug, Args)]
pub struct PageArgs {
    /// First record
    #[arg(long, default_value = "0")]
    pub start: u32,

    /// Page size
    #[arg(long, short = 'l', default_value = "50")]
    pub limit: u32,
}

#[derive(Debug, Subcommand)]
pub enum MonitorCommand {
    /// List collectors a device can use
    Collectors { device_uri: String },

    /// List all devices
    Devices {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, default_value = "name")]
        sort: String,
        #[arg(long, default_value = "ASC")]
        dir: String,
    },

    /// Show device details
    Info { device_uri: String },

    /// List a device's IP interfaces
    Components {
        device_uri: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// List a device's events
    Events {
        device_uri: String,
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, default_value = "lastTime")]
        sort: String,
        #[arg(long, default_value = "DESC")]
        dir: String,
    },

    /// Show graph definitions for an interface
    InterfaceRrd {
        device_uri: String,
        interface: String,
        /// Range in seconds
        #[arg(long, default_value = "129600")]
        drange: u64,
    },

    /// Show interface details
    InterfaceDetails { device_uri: String, interface: String },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Display profiles (secrets redacted)
    Show,

    /// List profile names
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },

    /// Store a secret in the system keyring
    SetSecret {
        /// Which secret to store
        secret: SecretTarget,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SecretTarget {
    /// Virtualization API key
    VirtApiKey,
    /// Monitoring password
    MonitorPassword,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
