//! Contrato dos backends de hypervisor.
//! Cada adapter sabe encontrar, iniciar e parar as VMs de uma única convenção
//! de arquivo. O conjunto de backends é fechado: ver [`BackendKind::ALL`].

pub mod model;
pub mod virtualbox;
pub mod vmware;

use crate::discovery::{self, ScanOptions};
use crate::error::CommandError;
use model::{CommandOutcome, VmAction, VmRecord};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

/// Tipo de backend, derivado da extensão do arquivo de definição da VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Vmware,
    VirtualBox,
}

impl BackendKind {
    /// Tabela fixa, na ordem em que o despacho testa as extensões.
    pub const ALL: [BackendKind; 2] = [BackendKind::Vmware, BackendKind::VirtualBox];

    pub fn extension(self) -> &'static str {
        match self {
            BackendKind::Vmware => ".vmx",
            BackendKind::VirtualBox => ".vbox",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BackendKind::Vmware => "VMware",
            BackendKind::VirtualBox => "VirtualBox",
        }
    }

    /// Ferramenta de linha de comando do hypervisor
    pub fn tool(self) -> &'static str {
        match self {
            BackendKind::Vmware => "vmrun",
            BackendKind::VirtualBox => "VBoxManage",
        }
    }

    /// Nome de arquivo termina na extensão deste backend. A comparação é feita
    /// nos bytes brutos, então nomes que não são UTF-8 válido também casam.
    pub fn matches_name(self, name: &OsStr) -> bool {
        name.as_encoded_bytes().ends_with(self.extension().as_bytes())
    }

    /// Resolve o backend pelo sufixo do nome do arquivo (sensível a maiúsculas).
    /// Primeira extensão da tabela que casar vence.
    pub fn from_path(path: &Path) -> Option<BackendKind> {
        let name = path.file_name()?;
        Self::ALL.into_iter().find(|kind| kind.matches_name(name))
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Capacidades que todo adapter de hypervisor implementa.
///
/// `start_vm` e `stop_vm` nunca falham através desta fronteira: qualquer erro
/// interno vira um [`CommandOutcome`] com `success == false`.
pub trait VmBackend {
    fn kind(&self) -> BackendKind;

    fn extension(&self) -> &'static str {
        self.kind().extension()
    }

    /// Varre `directory` recursivamente. Diretório ausente ou ilegível
    /// resulta em lista vazia.
    fn find_vms(&self, directory: &Path) -> Vec<VmRecord> {
        discovery::scan_backend(directory, self.kind(), &ScanOptions::default())
    }

    fn start_vm(&self, identifier: &str) -> CommandOutcome;

    fn stop_vm(&self, identifier: &str) -> CommandOutcome;
}

/// Converte o comando planejado (ou a falha ao montá-lo) no resultado
/// devolvido ao chamador, registrando o diagnóstico no log.
pub(crate) fn acknowledge(
    kind: BackendKind,
    action: VmAction,
    identifier: &str,
    planned: Result<Vec<String>, CommandError>,
) -> CommandOutcome {
    let identifier = identifier.trim();
    match planned {
        Ok(command) => {
            let message = format!("{} VM {}: {}", action.progressive(), kind, identifier);
            tracing::info!(
                backend = %kind,
                action = %action,
                command = %command.join(" "),
                "{message}"
            );
            CommandOutcome::succeeded(kind, action, identifier, message, command)
        }
        Err(err) => {
            let message = format!("Falha ao {} VM: {err}", action.verb());
            tracing::warn!(backend = %kind, action = %action, "{message}");
            CommandOutcome::failed(kind, action, identifier, message)
        }
    }
}

/// Validação comum dos identificadores recebidos pelos adapters
pub(crate) fn require_identifier(identifier: &str) -> Result<&str, CommandError> {
    let trimmed = identifier.trim();
    if trimmed.is_empty() {
        return Err(CommandError::EmptyIdentifier);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_kind_from_path() {
        assert_eq!(
            BackendKind::from_path(Path::new("/vms/a/foo.vmx")),
            Some(BackendKind::Vmware)
        );
        assert_eq!(
            BackendKind::from_path(Path::new("b/bar.vbox")),
            Some(BackendKind::VirtualBox)
        );
        assert_eq!(BackendKind::from_path(Path::new("a/readme.txt")), None);
    }

    #[test]
    fn test_suffix_match_is_case_sensitive() {
        assert_eq!(BackendKind::from_path(Path::new("FOO.VMX")), None);
        assert_eq!(BackendKind::from_path(Path::new("foo.Vbox")), None);
    }

    #[test]
    fn test_match_uses_file_name_only() {
        // diretório com "extensão" não conta
        assert_eq!(BackendKind::from_path(Path::new("dir.vmx/notes")), None);
        assert_eq!(BackendKind::from_path(&PathBuf::from("/")), None);
    }

    #[test]
    fn test_extensions_are_mutually_exclusive() {
        for kind in BackendKind::ALL {
            let name = format!("vm{}", kind.extension());
            let matches: Vec<_> = BackendKind::ALL
                .into_iter()
                .filter(|k| name.ends_with(k.extension()))
                .collect();
            assert_eq!(matches, vec![kind]);
        }
    }

    #[test]
    fn test_acknowledge_failure_message() {
        let outcome = acknowledge(
            BackendKind::Vmware,
            VmAction::Start,
            "",
            Err(CommandError::EmptyIdentifier),
        );
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Falha ao iniciar VM: identificador de VM vazio");
        assert!(outcome.command.is_none());
    }

    #[test]
    fn test_acknowledge_uses_trimmed_identifier() {
        let outcome = acknowledge(
            BackendKind::Vmware,
            VmAction::Stop,
            "  /vms/foo.vmx \n",
            Ok(vec!["vmrun".to_string()]),
        );
        assert_eq!(outcome.identifier, "/vms/foo.vmx");
        assert_eq!(outcome.message, "Parando VM VMware: /vms/foo.vmx");
    }

    #[cfg(unix)]
    #[test]
    fn test_kind_from_non_utf8_name() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"caf\xe9.vmx");
        assert!(BackendKind::Vmware.matches_name(name));
        assert_eq!(
            BackendKind::from_path(Path::new(name)),
            Some(BackendKind::Vmware)
        );
    }
}
