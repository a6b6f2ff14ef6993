//! Renderização da lista de VMs e dos resultados de start/stop

use anyhow::Result;
use std::path::Path;
use vmdeck_core::{BackendKind, CommandOutcome, VmRecord};

/// Tabela "VM Name / VM Path", numerada a partir de 1 (o número é aceito por
/// `--index`).
pub fn render_table(root: &Path, records: &[VmRecord]) -> String {
    if records.is_empty() {
        return format!("Nenhuma VM encontrada em \"{}\"\n", root.display());
    }

    let mut out = format!("VMs encontradas em \"{}\":\n", root.display());
    out.push_str(&format!("{:>4}  {:<30} {:<10} {}\n", "#", "VM Name", "Backend", "VM Path"));
    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}  {:<30} {:<10} {}\n",
            i + 1,
            record.name(),
            record.kind().label(),
            record.path().display()
        ));
    }
    out
}

pub fn render_json(records: &[VmRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn render_backends() -> String {
    let mut out = String::from("Backends suportados:\n");
    for kind in BackendKind::ALL {
        out.push_str(&format!(
            "- {:<12} *{:<6} -> {}\n",
            kind.label(),
            kind.extension(),
            kind.tool()
        ));
    }
    out
}

pub fn render_outcome(outcome: &CommandOutcome) -> String {
    let mut out = format!("✅ {}\n", outcome.message);
    if let Some(command) = &outcome.command {
        out.push_str(&format!("   comando: {}\n", command.join(" ")));
    }
    out
}
