//! Guest Definitions
//!
//! Turns a resolved machine into the provider-ready definition the orchestration tool
//! applies: box, network identity, libvirt memory and the OS-specific guest setup. Linux
//! guests get their shared folders here; Windows guests get a WinRM communicator.

use crate::config::{ConfigStore, FolderKind};
use crate::env::BASHRC_VAR;
use crate::error::DocumentError;
use crate::machine::{BoxKind, MachineDescriptor};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options appended to every sshfs mount.
pub const SSHFS_OPTS_APPEND: &str = "-o cache=no";

/// Account used by the WinRM communicator.
pub const WINDOWS_USERNAME: &str = ".\\Administrator";

/// Provider-ready definition of one guest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestDefinition {
    pub name: String,
    #[serde(rename = "box")]
    pub box_name: String,
    pub box_url: Option<String>,
    pub hostname: String,
    pub private_network: PrivateNetwork,
    pub provider: LibvirtProvider,
    pub guest: GuestSetup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateNetwork {
    pub ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibvirtProvider {
    /// Memory in MB, 0 leaves the provider default in place
    pub memory: u64,
}

/// OS-specific part of a guest definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "os", rename_all = "lowercase")]
pub enum GuestSetup {
    Linux(LinuxSetup),
    Windows(WindowsSetup),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinuxSetup {
    /// The implicit project-directory share is always turned off
    pub default_share_disabled: bool,
    pub synced_folders: Vec<SyncedFolder>,
    /// Variable names forwarded over ssh, never their values
    pub forward_env: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowsSetup {
    pub communicator: String,
    pub username: String,
}

impl Default for WindowsSetup {
    fn default() -> Self {
        Self {
            communicator: "winrm".to_string(),
            username: WINDOWS_USERNAME.to_string(),
        }
    }
}

/// One shared folder and the mechanism that syncs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncedFolder {
    pub host: String,
    pub guest: String,
    #[serde(flatten)]
    pub method: SyncMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SyncMethod {
    Sshfs { sshfs_opts_append: String },
    Nfs { nfs_udp: bool },
    Rsync,
}

impl SyncMethod {
    pub fn for_kind(kind: FolderKind) -> Self {
        match kind {
            FolderKind::Sshfs => SyncMethod::Sshfs {
                sshfs_opts_append: SSHFS_OPTS_APPEND.to_string(),
            },
            FolderKind::Nfs => SyncMethod::Nfs { nfs_udp: false },
            FolderKind::Rsync => SyncMethod::Rsync,
        }
    }

    pub fn kind(&self) -> FolderKind {
        match self {
            SyncMethod::Sshfs { .. } => FolderKind::Sshfs,
            SyncMethod::Nfs { .. } => FolderKind::Nfs,
            SyncMethod::Rsync => FolderKind::Rsync,
        }
    }
}

impl GuestDefinition {
    /// Build the definition of `machine`, resolving shared folders through `store`.
    pub fn build(machine: &MachineDescriptor, store: &ConfigStore) -> Result<Self, DocumentError> {
        let guest = match machine.kind() {
            BoxKind::Linux => GuestSetup::Linux(linux_setup(store)?),
            BoxKind::Windows => GuestSetup::Windows(WindowsSetup::default()),
        };

        Ok(Self {
            name: machine.name().to_string(),
            box_name: machine.box_name().to_string(),
            box_url: machine.url().map(str::to_string),
            hostname: machine.hostname().to_string(),
            private_network: PrivateNetwork {
                ip: machine.ip().to_string(),
            },
            provider: LibvirtProvider {
                memory: machine.memory(),
            },
            guest,
        })
    }

    /// Shared folders of a Linux guest; empty for Windows.
    pub fn synced_folders(&self) -> &[SyncedFolder] {
        match &self.guest {
            GuestSetup::Linux(setup) => &setup.synced_folders,
            GuestSetup::Windows(_) => &[],
        }
    }
}

fn linux_setup(store: &ConfigStore) -> Result<LinuxSetup, DocumentError> {
    let mut synced_folders = Vec::new();
    for kind in FolderKind::ALL {
        for (host, guest) in store.folders_for(kind)? {
            synced_folders.push(SyncedFolder {
                host,
                guest,
                method: SyncMethod::for_kind(kind),
            });
        }
    }

    let forward_env = if store.env().contains(BASHRC_VAR) {
        vec![BASHRC_VAR.to_string()]
    } else {
        Vec::new()
    };

    debug!(folders = synced_folders.len(), "Linux guest setup planned");
    Ok(LinuxSetup {
        default_share_disabled: true,
        synced_folders,
        forward_env,
    })
}

/// Plan every machine, stopping at the first folder error.
pub fn plan_all(
    machines: &[MachineDescriptor],
    store: &ConfigStore,
) -> Result<Vec<GuestDefinition>, DocumentError> {
    machines
        .iter()
        .map(|machine| GuestDefinition::build(machine, store))
        .collect()
}
