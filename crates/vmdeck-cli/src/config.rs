use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use vmdeck_core::ScanOptions;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Configuração opcional do vmdeck (`config.toml`)
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Diretório varrido quando nenhum é informado na linha de comando.
    /// Caminhos relativos são resolvidos a partir do diretório do arquivo.
    pub default_directory: Option<PathBuf>,
    pub follow_links: bool,
    pub output: OutputFormat,
}

impl Config {
    /// `~/.config/vmdeck/config.toml` (ou equivalente da plataforma)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vmdeck").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Falha ao ler configuração '{}'", path.display()))?;
        let mut config: Config = toml::from_str(&text)
            .with_context(|| format!("Configuração inválida em '{}'", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        if let Some(dir) = config.default_directory.take() {
            config.default_directory = Some(if dir.is_relative() { base.join(dir) } else { dir });
        }
        Ok(config)
    }

    /// Arquivo explícito precisa existir; o arquivo padrão é opcional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "usando configuração padrão");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            follow_links: self.follow_links,
        }
    }

    /// Diretório da linha de comando, ou o da configuração, ou `.`
    pub fn directory(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.default_directory.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_resolves_relative_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "default_directory = \"vms\"\nfollow_links = true\noutput = \"json\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_directory, Some(dir.path().join("vms")));
        assert!(config.scan_options().follow_links);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.default_directory.is_none());
        assert!(!config.follow_links);
        assert_eq!(config.output, OutputFormat::Table);
        assert_eq!(config.directory(None), PathBuf::from("."));
        assert_eq!(
            config.directory(Some("/srv/vms".into())),
            PathBuf::from("/srv/vms")
        );
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "output = \"xml\"\n").unwrap();
        assert!(Config::load(&path).is_err());

        fs::write(&path, "unknown_key = 1\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::resolve(Some(dir.path().join("nope.toml").as_path())).is_err());
    }
}
