//! Despacho de start/stop para o adapter dono da VM, escolhido pela extensão
//! do caminho.

use crate::backend::model::{CommandOutcome, VmAction, VmRecord};
use crate::backend::virtualbox::VirtualBoxAdapter;
use crate::backend::vmware::VmwareAdapter;
use crate::backend::{BackendKind, VmBackend};
use std::path::Path;

/// Dono dos dois adapters. Não guarda estado além deles.
pub struct Dispatcher<W = VmwareAdapter, V = VirtualBoxAdapter> {
    vmware: W,
    virtualbox: V,
}

impl Dispatcher {
    /// Dispatcher com os adapters padrão
    pub fn new() -> Self {
        Self::with_backends(VmwareAdapter::new(), VirtualBoxAdapter::new())
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: VmBackend, V: VmBackend> Dispatcher<W, V> {
    pub fn with_backends(vmware: W, virtualbox: V) -> Self {
        Self { vmware, virtualbox }
    }

    /// Descoberta agregada usando os adapters do dispatcher, na ordem da tabela
    pub fn find_all(&self, root: &Path) -> Vec<VmRecord> {
        let mut records = self.vmware.find_vms(root);
        records.extend(self.virtualbox.find_vms(root));
        records
    }

    pub fn start(&self, record: &VmRecord) -> Option<CommandOutcome> {
        self.start_path(record.path())
    }

    pub fn stop(&self, record: &VmRecord) -> Option<CommandOutcome> {
        self.stop_path(record.path())
    }

    pub fn start_path(&self, path: &Path) -> Option<CommandOutcome> {
        self.dispatch(VmAction::Start, path)
    }

    pub fn stop_path(&self, path: &Path) -> Option<CommandOutcome> {
        self.dispatch(VmAction::Stop, path)
    }

    /// Roteia pela extensão do caminho. Caminho sem backend conhecido não
    /// invoca nenhum adapter e devolve `None`.
    pub fn dispatch(&self, action: VmAction, path: &Path) -> Option<CommandOutcome> {
        let Some(kind) = BackendKind::from_path(path) else {
            tracing::debug!(path = %path.display(), %action, "nenhum backend para o caminho, ignorando");
            return None;
        };

        let identifier = path.to_string_lossy();
        let outcome = match kind {
            BackendKind::Vmware => invoke(&self.vmware, action, &identifier),
            BackendKind::VirtualBox => invoke(&self.virtualbox, action, &identifier),
        };
        Some(outcome)
    }
}

fn invoke<B: VmBackend>(backend: &B, action: VmAction, identifier: &str) -> CommandOutcome {
    match action {
        VmAction::Start => backend.start_vm(identifier),
        VmAction::Stop => backend.stop_vm(identifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;

    /// Adapter espião: registra as chamadas recebidas
    struct Spy {
        kind: BackendKind,
        calls: RefCell<Vec<(VmAction, String)>>,
    }

    impl Spy {
        fn new(kind: BackendKind) -> Self {
            Self {
                kind,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(VmAction, String)> {
            self.calls.borrow().clone()
        }

        fn record(&self, action: VmAction, identifier: &str) -> CommandOutcome {
            self.calls.borrow_mut().push((action, identifier.to_string()));
            CommandOutcome::succeeded(self.kind, action, identifier, "spy".into(), vec![])
        }
    }

    impl VmBackend for Spy {
        fn kind(&self) -> BackendKind {
            self.kind
        }

        fn start_vm(&self, identifier: &str) -> CommandOutcome {
            self.record(VmAction::Start, identifier)
        }

        fn stop_vm(&self, identifier: &str) -> CommandOutcome {
            self.record(VmAction::Stop, identifier)
        }
    }

    fn spies() -> Dispatcher<Spy, Spy> {
        Dispatcher::with_backends(Spy::new(BackendKind::Vmware), Spy::new(BackendKind::VirtualBox))
    }

    #[test]
    fn test_start_routes_to_vmware_only() {
        let dispatcher = spies();
        let record = VmRecord::from_path("a/foo.vmx".into()).unwrap();

        let outcome = dispatcher.start(&record).unwrap();
        assert_eq!(outcome.kind, BackendKind::Vmware);
        assert_eq!(
            dispatcher.vmware.calls(),
            vec![(VmAction::Start, "a/foo.vmx".to_string())]
        );
        assert!(dispatcher.virtualbox.calls().is_empty());
    }

    #[test]
    fn test_stop_routes_to_virtualbox_only() {
        let dispatcher = spies();
        let record = VmRecord::from_path("a/b/bar.vbox".into()).unwrap();

        dispatcher.stop(&record).unwrap();
        assert!(dispatcher.vmware.calls().is_empty());
        assert_eq!(
            dispatcher.virtualbox.calls(),
            vec![(VmAction::Stop, "a/b/bar.vbox".to_string())]
        );
    }

    #[test]
    fn test_unknown_extension_is_a_noop() {
        let dispatcher = spies();
        for path in ["a/readme.txt", "a/foo.VMX", "a/foo.vmx.bak", ""] {
            assert!(dispatcher.start_path(Path::new(path)).is_none());
            assert!(dispatcher.stop_path(Path::new(path)).is_none());
        }
        assert!(dispatcher.vmware.calls().is_empty());
        assert!(dispatcher.virtualbox.calls().is_empty());
    }

    #[test]
    fn test_default_dispatcher_outcomes() {
        let dispatcher = Dispatcher::new();
        let started = dispatcher.start_path(Path::new("/vms/foo.vmx")).unwrap();
        assert!(started.success);
        assert_eq!(started.message, "Iniciando VM VMware: /vms/foo.vmx");

        let stopped = dispatcher.stop_path(Path::new("/vms/Bar.vbox")).unwrap();
        assert!(stopped.success);
        assert_eq!(stopped.command.unwrap()[2], "Bar");
    }

    #[test]
    fn test_find_all_uses_both_backends() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/foo.vmx"), b"").unwrap();
        fs::write(dir.path().join("a/b/bar.vbox"), b"").unwrap();
        fs::write(dir.path().join("a/readme.txt"), b"").unwrap();

        let records = Dispatcher::new().find_all(dir.path());
        let kinds: Vec<_> = records.iter().map(VmRecord::kind).collect();
        assert_eq!(kinds, vec![BackendKind::Vmware, BackendKind::VirtualBox]);
    }
}
