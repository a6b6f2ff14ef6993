//! Adapter VirtualBox (arquivos `.vbox`, controlados via `VBoxManage`).

use super::model::{CommandOutcome, VmAction};
use super::{acknowledge, require_identifier, BackendKind, VmBackend};
use crate::error::CommandError;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualBoxAdapter;

impl VirtualBoxAdapter {
    pub fn new() -> Self {
        Self
    }

    /// O `VBoxManage` endereça a VM pelo nome registrado, que por convenção é
    /// o nome do `.vbox` sem a extensão.
    pub fn vm_name(identifier: &str) -> Result<String, CommandError> {
        let identifier = require_identifier(identifier)?;
        let file_name = Path::new(identifier)
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| CommandError::MissingVmName(identifier.to_string()))?;

        let stem = file_name
            .strip_suffix(BackendKind::VirtualBox.extension())
            .unwrap_or(file_name);
        if stem.is_empty() {
            return Err(CommandError::MissingVmName(identifier.to_string()));
        }
        Ok(stem.to_string())
    }

    /// Monta a linha de comando do `VBoxManage` para a ação
    pub fn plan(&self, action: VmAction, identifier: &str) -> Result<Vec<String>, CommandError> {
        let name = Self::vm_name(identifier)?;
        let tool = BackendKind::VirtualBox.tool().to_string();
        let argv = match action {
            VmAction::Start => vec![tool, "startvm".into(), name, "--type".into(), "headless".into()],
            VmAction::Stop => vec![tool, "controlvm".into(), name, "acpipowerbutton".into()],
        };
        Ok(argv)
    }
}

impl VmBackend for VirtualBoxAdapter {
    fn kind(&self) -> BackendKind {
        BackendKind::VirtualBox
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
