// ==========================================
// TireForce - Erros da camada de repositório
// ==========================================
// Ferramenta: macro derive do thiserror
// ==========================================

use thiserror::Error;

/// Erros da camada de repositório
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Registro não encontrado: {entity} com id={id}")]
    NotFound { entity: String, id: String },

    #[error("Falha ao obter lock do banco: {0}")]
    LockError(String),

    #[error("Falha em transação do banco: {0}")]
    DatabaseTransactionError(String),

    #[error("Falha em consulta ao banco: {0}")]
    DatabaseQueryError(String),

    #[error("Violação de restrição de unicidade: {0}")]
    UniqueConstraintViolation(String),

    #[error("Violação de chave estrangeira: {0}")]
    ForeignKeyViolation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Desconhecida".to_string(),
                id: "?".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Alias de Result
pub type RepositoryResult<T> = Result<T, RepositoryError>;
