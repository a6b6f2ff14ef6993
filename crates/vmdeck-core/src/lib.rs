//! Núcleo do vmdeck: descoberta de máquinas virtuais em disco e despacho de
//! comandos start/stop para os backends de hypervisor (VMware e VirtualBox).
//!
//! O front end (CLI) fornece um diretório raiz e recebe [`VmRecord`]s; depois
//! escolhe um registro e chama [`Dispatcher::start`] / [`Dispatcher::stop`].

pub mod backend;
pub mod discovery;
pub mod dispatch;
pub mod error;

pub use backend::model::{CommandOutcome, VmAction, VmRecord};
pub use backend::virtualbox::VirtualBoxAdapter;
pub use backend::vmware::VmwareAdapter;
pub use backend::{BackendKind, VmBackend};
pub use discovery::{
    collect_discovery, discover, scan_backend, spawn_discovery, try_discover, DiscoveryEvent,
    ScanOptions,
};
pub use dispatch::Dispatcher;
pub use error::{CommandError, DiscoveryError};
