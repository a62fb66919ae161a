// ==========================================
// TireForce - API de importação
// ==========================================
// Responsabilidade: receber upload de planilha (bytes + nome) e
// devolver o resumo da importação; o chamador já está autenticado
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::import::ImportSummary;
use crate::importer::PriceImporter;
use std::sync::Arc;
use tracing::info;

// ==========================================
// ImportApi
// ==========================================
pub struct ImportApi {
    importer: Arc<PriceImporter>,
}

impl ImportApi {
    pub fn new(importer: Arc<PriceImporter>) -> Self {
        Self { importer }
    }

    /// Processa um arquivo enviado
    ///
    /// # Retorno
    /// - Ok(ImportSummary): linhas importadas/descartadas e localidade
    /// - Err(ApiError): arquivo rejeitado com motivo legível
    pub fn upload(&self, bytes: &[u8], filename: &str) -> ApiResult<ImportSummary> {
        if filename.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "nome do arquivo não pode ser vazio".to_string(),
            ));
        }
        if bytes.is_empty() {
            return Err(ApiError::InvalidInput("arquivo vazio".to_string()));
        }

        info!(filename = %filename, bytes = bytes.len(), "recebendo arquivo");
        let summary = self.importer.import(bytes, filename)?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IngestConfig;
    use crate::db::{configure_sqlite_connection, init_schema};
    use crate::repository::{PriceHistoryRepository, ProductRepository};
    use rusqlite::Connection;
    use std::sync::Mutex;

    fn api() -> ImportApi {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        let shared = Arc::new(Mutex::new(conn));

        let importer = PriceImporter::new(
            Arc::new(IngestConfig::default()),
            Arc::new(ProductRepository::from_connection(shared.clone())),
            Arc::new(PriceHistoryRepository::from_connection(shared)),
        );
        ImportApi::new(Arc::new(importer))
    }

    #[test]
    fn test_upload_rejects_empty_input() {
        let api = api();
        assert!(matches!(
            api.upload(b"", "precos.csv"),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            api.upload(b"Marca,Preco\n", "  "),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_upload_maps_import_errors() {
        let api = api();
        let result = api.upload(b"abc", "dados.txt");
        assert!(matches!(result, Err(ApiError::ImportFailure(_))));
    }
}
