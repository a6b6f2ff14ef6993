//! Descoberta de VMs: varredura recursiva de um diretório procurando arquivos
//! de definição de cada backend.

use crate::backend::model::VmRecord;
use crate::backend::BackendKind;
use crate::error::DiscoveryError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use walkdir::{DirEntry, WalkDir};

/// Opções da varredura
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Segue links simbólicos. Desligado por padrão; quando ligado, ciclos
    /// são detectados pelo walkdir e ignorados.
    pub follow_links: bool,
}

/// Eventos emitidos pela varredura em background
#[derive(Debug)]
pub enum DiscoveryEvent {
    Found(VmRecord),
    Finished { total: usize },
    Failed(DiscoveryError),
}

/// Entrada que resolve para um diretório (inclusive via link simbólico) não é
/// candidata; links para arquivos e links quebrados são.
fn is_candidate(entry: &DirEntry) -> bool {
    if entry.file_type().is_dir() {
        return false;
    }
    if entry.path_is_symlink() {
        return !fs::metadata(entry.path())
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
    }
    true
}

/// Percorre `root` chamando `on_match` para cada arquivo cujo nome termina na
/// extensão de `kind`. Entradas ilegíveis são puladas. Sem `follow_links`,
/// links para diretórios não são percorridos.
fn walk<F>(root: &Path, kind: BackendKind, options: &ScanOptions, mut on_match: F)
where
    F: FnMut(VmRecord) -> bool,
{
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "raiz não é um diretório legível, nada a varrer");
        return;
    }

    let walker = WalkDir::new(root).follow_links(options.follow_links);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(error = %err, "entrada ignorada durante a varredura");
                continue;
            }
        };

        if !kind.matches_name(entry.file_name()) || !is_candidate(&entry) {
            continue;
        }

        if let Some(record) = VmRecord::from_path(entry.into_path()) {
            if !on_match(record) {
                return;
            }
        }
    }
}

/// Varre `root` procurando os arquivos do backend `kind`. Ordem = ordem da
/// travessia.
///
/// Diretório inexistente ou ilegível devolve lista vazia.
pub fn scan_backend(root: &Path, kind: BackendKind, options: &ScanOptions) -> Vec<VmRecord> {
    let mut records = Vec::new();
    walk(root, kind, options, |record| {
        records.push(record);
        true
    });
    tracing::debug!(
        root = %root.display(),
        backend = %kind,
        found = records.len(),
        "varredura concluída"
    );
    records
}

/// Varre `root` uma vez por backend, na ordem da tabela, e concatena.
/// Sem deduplicação entre backends.
pub fn discover(root: &Path, options: &ScanOptions) -> Vec<VmRecord> {
    BackendKind::ALL
        .into_iter()
        .flat_map(|kind| scan_backend(root, kind, options))
        .collect()
}

/// Confere se a raiz existe, é um diretório e pode ser listada
fn check_root(root: &Path) -> Result<(), DiscoveryError> {
    let metadata = fs::metadata(root).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => DiscoveryError::NotFound(root.to_path_buf()),
        _ => DiscoveryError::Unreadable {
            path: root.to_path_buf(),
            source: err,
        },
    })?;

    if !metadata.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    fs::read_dir(root).map_err(|source| DiscoveryError::Unreadable {
        path: root.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Igual a [`discover`], mas distingue "raiz ausente/ilegível" de "nenhuma VM".
pub fn try_discover(root: &Path, options: &ScanOptions) -> Result<Vec<VmRecord>, DiscoveryError> {
    check_root(root)?;
    Ok(discover(root, options))
}

fn run_worker(root: &Path, options: &ScanOptions, tx: &Sender<DiscoveryEvent>) {
    if let Err(err) = check_root(root) {
        let _ = tx.send(DiscoveryEvent::Failed(err));
        return;
    }

    let mut total = 0;
    for kind in BackendKind::ALL {
        let mut receiver_alive = true;
        walk(root, kind, options, |record| {
            total += 1;
            receiver_alive = tx.send(DiscoveryEvent::Found(record)).is_ok();
            receiver_alive
        });
        if !receiver_alive {
            tracing::debug!("receptor da descoberta foi descartado, encerrando worker");
            return;
        }
    }

    let _ = tx.send(DiscoveryEvent::Finished { total });
}

/// Executa a descoberta agregada numa thread separada. Os registros chegam um a
/// um pelo canal, seguidos de `Finished` ou `Failed`.
pub fn spawn_discovery(root: PathBuf, options: ScanOptions) -> Receiver<DiscoveryEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || run_worker(&root, &options, &tx));
    rx
}

/// Drena o canal de [`spawn_discovery`]. Canal fechado sem `Finished` nem
/// `Failed` (worker morreu no meio) vira [`DiscoveryError::WorkerLost`].
pub fn collect_discovery(events: Receiver<DiscoveryEvent>) -> Result<Vec<VmRecord>, DiscoveryError> {
    let mut records = Vec::new();
    for event in events {
        match event {
            DiscoveryEvent::Found(record) => records.push(record),
            DiscoveryEvent::Finished { total } => {
                tracing::debug!(total, "descoberta concluída");
                return Ok(records);
            }
            DiscoveryEvent::Failed(err) => return Err(err),
        }
    }
    Err(DiscoveryError::WorkerLost)
}
