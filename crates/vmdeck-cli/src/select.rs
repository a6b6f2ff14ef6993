//! Escolha da VM alvo de start/stop: caminho direto ou seleção numa varredura

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use vmdeck_core::{try_discover, ScanOptions, VmRecord};

/// Critério de seleção dentro de uma lista descoberta
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Nome exibido (`foo.vmx`) ou nome sem extensão (`foo`)
    Name(String),
    /// Posição na tabela do `find`, começando em 1
    Index(usize),
}

pub fn select<'a>(records: &'a [VmRecord], selector: &Selector) -> Result<&'a VmRecord> {
    match selector {
        Selector::Name(name) => records
            .iter()
            .find(|r| {
                r.name() == name.as_str()
                    || r.name().strip_suffix(r.kind().extension()) == Some(name.as_str())
            })
            .ok_or_else(|| anyhow!("VM '{name}' não encontrada")),
        Selector::Index(index) => index
            .checked_sub(1)
            .and_then(|i| records.get(i))
            .ok_or_else(|| anyhow!("Índice {index} fora da lista ({} VMs)", records.len())),
    }
}

/// Varre `dir` e devolve o caminho da VM escolhida
pub fn resolve_in_directory(dir: &Path, selector: &Selector, options: &ScanOptions) -> Result<PathBuf> {
    let records = try_discover(dir, options)
        .with_context(|| format!("Falha ao procurar VMs em '{}'", dir.display()))?;
    let record = select(&records, selector)?;
    Ok(record.path().to_path_buf())
}
