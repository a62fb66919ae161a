// ==========================================
// TireForce - Erros da camada de API
// ==========================================
// Responsabilidade: converter erros técnicos das camadas internas em
// mensagens legíveis para o chamador. Nenhum stack trace ou
// identificador interno atravessa esta fronteira.
// ==========================================

use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Erros da camada de API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Entrada inválida: {0}")]
    InvalidInput(String),

    #[error("Falha na importação: {0}")]
    ImportFailure(String),

    #[error("Recurso não encontrado: {0}")]
    NotFound(String),

    #[error("Falha no banco de dados: {0}")]
    DatabaseError(String),

    #[error("Erro interno: {0}")]
    InternalError(String),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} ({})", entity, id))
            }
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportFailure(err.to_string())
    }
}

/// Alias de Result
pub type ApiResult<T> = Result<T, ApiError>;
