use super::BackendKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Máquina virtual encontrada em disco. Imutável depois de criada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmRecord {
    name: String,
    path: PathBuf,
    kind: BackendKind,
}

impl VmRecord {
    /// Monta o registro a partir do caminho. Retorna `None` quando o nome do
    /// arquivo não pertence a nenhum backend conhecido.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let kind = BackendKind::from_path(&path)?;
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self { name, path, kind })
    }

    /// Nome exibido (basename do arquivo)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Caminho usado como identificador nos comandos start/stop
    pub fn identifier(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VmAction {
    Start,
    Stop,
}

impl VmAction {
    pub(crate) fn verb(self) -> &'static str {
        match self {
            VmAction::Start => "iniciar",
            VmAction::Stop => "parar",
        }
    }

    pub(crate) fn progressive(self) -> &'static str {
        match self {
            VmAction::Start => "Iniciando",
            VmAction::Stop => "Parando",
        }
    }
}

impl fmt::Display for VmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmAction::Start => write!(f, "start"),
            VmAction::Stop => write!(f, "stop"),
        }
    }
}

/// Resultado de um start/stop.
///
/// `success` é a flag booleana do contrato; `message` é o diagnóstico legível.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub kind: BackendKind,
    pub action: VmAction,
    pub identifier: String,
    pub success: bool,
    pub message: String,

    /// Comando do hypervisor que seria executado (argv)
    pub command: Option<Vec<String>>,
}

impl CommandOutcome {
    pub fn succeeded(
        kind: BackendKind,
        action: VmAction,
        identifier: &str,
        message: String,
        command: Vec<String>,
    ) -> Self {
        Self {
            kind,
            action,
            identifier: identifier.to_string(),
            success: true,
            message,
            command: Some(command),
        }
    }

    pub fn failed(kind: BackendKind, action: VmAction, identifier: &str, message: String) -> Self {
        Self {
            kind,
            action,
            identifier: identifier.to_string(),
            success: false,
            message,
            command: None,
        }
    }
}
