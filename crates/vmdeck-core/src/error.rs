use std::path::PathBuf;

/// Erros da varredura "endurecida" ([`crate::try_discover`]).
///
/// A API fiel ([`crate::discover`]) nunca expõe estes erros: devolve lista vazia.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("diretório '{}' não existe", .0.display())]
    NotFound(PathBuf),

    #[error("'{}' não é um diretório", .0.display())]
    NotADirectory(PathBuf),

    #[error("não foi possível ler '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("worker de descoberta terminou sem resultado")]
    WorkerLost,
}

/// Falhas internas de um adapter ao montar o comando do hypervisor.
///
/// Nunca atravessam a fronteira do adapter; viram `CommandOutcome` com
/// `success = false`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("identificador de VM vazio")]
    EmptyIdentifier,

    #[error("não foi possível extrair o nome da VM de '{0}'")]
    MissingVmName(String),
}
