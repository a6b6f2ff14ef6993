//! Adapter VMware (arquivos `.vmx`, controlados via `vmrun`).

use super::model::{CommandOutcome, VmAction};
use super::{acknowledge, require_identifier, BackendKind, VmBackend};
use crate::error::CommandError;

/// Produto alvo do `vmrun -T`
const HOST_TYPE: &str = "ws";

#[derive(Debug, Clone, Copy, Default)]
pub struct VmwareAdapter;

impl VmwareAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Monta a linha de comando do `vmrun` para a ação. O `vmrun` endereça a
    /// VM pelo caminho do `.vmx`.
    pub fn plan(&self, action: VmAction, identifier: &str) -> Result<Vec<String>, CommandError> {
        let vmx = require_identifier(identifier)?;
        let (verb, mode) = match action {
            VmAction::Start => ("start", "nogui"),
            VmAction::Stop => ("stop", "soft"),
        };
        Ok(vec![
            BackendKind::Vmware.tool().to_string(),
            "-T".to_string(),
            HOST_TYPE.to_string(),
            verb.to_string(),
            vmx.to_string(),
            mode.to_string(),
        ])
    }
}

impl VmBackend for VmwareAdapter {
    fn kind(&self) -> BackendKind {
        BackendKind::Vmware
    }

    fn start_vm(&self, identifier: &str) -> CommandOutcome {
        let planned = self.plan(VmAction::Start, identifier);
        acknowledge(self.kind(), VmAction::Start, identifier, planned)
    }

    fn stop_vm(&self, identifier: &str) -> CommandOutcome {
        let planned = self.plan(VmAction::Stop, identifier);
        acknowledge(self.kind(), VmAction::Stop, identifier, planned)
    }
}
