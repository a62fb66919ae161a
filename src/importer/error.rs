// ==========================================
// TireForce - Erros do módulo de importação
// ==========================================
// Ferramenta: macro derive do thiserror
// ==========================================

use thiserror::Error;

/// Erros fatais para o arquivo inteiro: nada é gravado quando ocorrem.
/// Falhas por linha não passam por aqui — viram `SkipReason` no pipeline.
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Erros de arquivo =====
    #[error("Arquivo ilegível: {0}")]
    UnreadableFile(String),

    #[error("Formato de arquivo não suportado: {0} (apenas .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("Falha ao ler CSV: {0}")]
    CsvParseError(String),

    #[error("Falha ao ler planilha Excel: {0}")]
    ExcelParseError(String),

    // ===== Erros de mapeamento de colunas =====
    #[error("Colunas não identificadas: nenhuma coluna de preço sell-out encontrada")]
    ColumnsNotIdentified,

    #[error("Coluna obrigatória ausente: {0}")]
    MissingMandatoryColumn(String),

    // ===== Erros de banco de dados =====
    #[error("Falha no banco de dados: {0}")]
    DatabaseError(String),

    // ===== Genérico =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::UnreadableFile(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<crate::repository::error::RepositoryError> for ImportError {
    fn from(err: crate::repository::error::RepositoryError) -> Self {
        ImportError::DatabaseError(err.to_string())
    }
}

/// Alias de Result
pub type ImportResult<T> = Result<T, ImportError>;
