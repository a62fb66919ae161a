// ==========================================
// TireForce - Importador de preços
// ==========================================
// Orquestra o fluxo por arquivo:
//   ler → inferir cidade/região → identificar colunas →
//   por linha: normalizar → resolver produto → montar registro →
//   gravar tudo em uma transação → resumo
//
// Política de falha: problemas de arquivo (leitura, mapeamento de
// colunas) abortam o arquivo inteiro sem gravar nada; problemas de
// linha descartam apenas a linha e seguem em frente — na operação
// real vale mais importar "quase tudo" de um arquivo bagunçado do
// que rejeitá-lo por inteiro.
// ==========================================

use crate::config::IngestConfig;
use crate::domain::import::{ImportSummary, SkipReason};
use crate::domain::price_history::PriceHistoryRecord;
use crate::domain::types::{CanonicalField, Region};
use crate::engine::ProductResolver;
use crate::importer::column_identifier::{ColumnIdentifier, ColumnMapping};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::normalizer::ValueNormalizer;
use crate::repository::{PriceHistoryRepository, ProductRepository};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Etiqueta de origem por tipo de entrada
const SOURCE_CSV: &str = "IMPORTACAO_CSV";
const SOURCE_UPLOAD: &str = "UPLOAD";

// ==========================================
// PriceImporter
// ==========================================
pub struct PriceImporter {
    config: Arc<IngestConfig>,
    price_repo: Arc<PriceHistoryRepository>,
    parser: UniversalFileParser,
    identifier: ColumnIdentifier,
    normalizer: ValueNormalizer,
    resolver: ProductResolver,
}

impl PriceImporter {
    pub fn new(
        config: Arc<IngestConfig>,
        product_repo: Arc<ProductRepository>,
        price_repo: Arc<PriceHistoryRepository>,
    ) -> Self {
        Self {
            identifier: ColumnIdentifier::new(config.clone()),
            normalizer: ValueNormalizer::new(config.clone()),
            resolver: ProductResolver::new(product_repo),
            config,
            price_repo,
            parser: UniversalFileParser,
        }
    }

    /// Importa um arquivo de comparação de preços (bytes + nome)
    ///
    /// # Retorno
    /// - Ok(ImportSummary): linhas importadas/descartadas e localidade detectada
    /// - Err(ImportError): falha fatal para o arquivo; nada foi gravado
    pub fn import(&self, bytes: &[u8], filename: &str) -> ImportResult<ImportSummary> {
        let started = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        info!(batch_id = %batch_id, filename = %filename, "iniciando importação de preços");

        // === Etapa 1: leitura do arquivo ===
        let table = self.parser.parse(bytes, filename).map_err(|e| {
            error!(batch_id = %batch_id, error = %e, "falha na leitura do arquivo");
            e
        })?;
        let total_rows = table.rows.len();
        debug!(batch_id = %batch_id, total_rows, "arquivo lido");

        // === Etapa 2: cidade/região padrão pelo nome do arquivo ===
        let (default_city, default_region) = self.infer_location(filename);
        debug!(
            batch_id = %batch_id,
            cidade = %default_city,
            regiao = %default_region,
            "localidade padrão inferida"
        );

        // === Etapa 3: identificação de colunas (uma vez por arquivo) ===
        let mapping = self.identifier.identify(&table.headers).map_err(|e| {
            error!(batch_id = %batch_id, error = %e, "mapeamento de colunas falhou");
            e
        })?;

        let source = if filename.to_lowercase().ends_with(".csv") {
            SOURCE_CSV
        } else {
            SOURCE_UPLOAD
        };

        // === Etapa 4: processamento linha a linha (isolado por linha) ===
        let mut records: Vec<PriceHistoryRecord> = Vec::new();
        let mut skipped_count = 0usize;
        let mut new_products = 0usize;

        for (idx, row) in table.rows.iter().enumerate() {
            // Cabeçalho é a linha 1 do arquivo original
            let row_number = idx + 2;
            match self.build_row(&mapping, row, &default_city, default_region, source) {
                Ok((record, created)) => {
                    if created {
                        new_products += 1;
                    }
                    records.push(record);
                }
                Err(reason) => {
                    warn!(batch_id = %batch_id, row_number, motivo = %reason, "linha descartada");
                    skipped_count += 1;
                }
            }
        }

        // === Etapa 5: gravação em transação única ===
        let imported_count = self.price_repo.batch_insert(&records)?;

        info!(
            batch_id = %batch_id,
            total = total_rows,
            importados = imported_count,
            descartados = skipped_count,
            novos_produtos = new_products,
            tempo_ms = started.elapsed().as_millis() as u64,
            "importação concluída"
        );

        Ok(ImportSummary {
            imported_count,
            skipped_count,
            new_products,
            detected_city: default_city,
            detected_region: default_region.code().to_string(),
            source: source.to_string(),
        })
    }

    /// Cidade/região padrão a partir de marcadores no nome do arquivo;
    /// sem marcador, vale o padrão do sistema. Colunas de localidade
    /// no próprio arquivo sobrescrevem linha a linha.
    fn infer_location(&self, filename: &str) -> (String, Region) {
        let haystack = filename.to_lowercase().replace(['_', '-'], " ");
        for (marker, city, region) in &self.config.city_markers {
            if haystack.contains(marker.as_str()) {
                return (city.clone(), *region);
            }
        }
        (self.config.default_city.clone(), self.config.default_region)
    }

    /// Normaliza uma linha e monta o registro de histórico
    ///
    /// Qualquer falha aqui é um descarte de linha, nunca um aborto de arquivo
    fn build_row(
        &self,
        mapping: &ColumnMapping,
        row: &[String],
        default_city: &str,
        default_region: Region,
        source: &str,
    ) -> Result<(PriceHistoryRecord, bool), SkipReason> {
        let brand_raw = mapping.cell(row, CanonicalField::Brand);
        let model_raw = mapping.cell(row, CanonicalField::Model);
        let width_raw = mapping.cell(row, CanonicalField::Width);

        // Identidade do produto: TRIM + UPPER antes da chave
        let brand = brand_raw.unwrap_or("").trim().to_uppercase();
        let model = model_raw.unwrap_or("").trim().to_uppercase();
        let width = width_raw.unwrap_or("").trim().to_uppercase();

        if width.is_empty() || (brand.is_empty() && model.is_empty()) {
            return Err(SkipReason::EmptyProductFields);
        }

        let rim = mapping
            .cell(row, CanonicalField::Rim)
            .map(|v| self.normalizer.normalize_rim(v))
            .unwrap_or_else(|| "0".to_string());

        let competitor = self
            .normalizer
            .normalize_company_name(mapping.cell(row, CanonicalField::Competitor).unwrap_or(""));

        let price = self
            .normalizer
            .parse_money(mapping.cell(row, CanonicalField::Price).unwrap_or(""));
        let cost = self
            .normalizer
            .parse_money(mapping.cell(row, CanonicalField::Cost).unwrap_or(""));
        let markup = self
            .normalizer
            .parse_markup(mapping.cell(row, CanonicalField::Mkp), price, cost);

        let origin = self
            .normalizer
            .classify_origin(mapping.cell(row, CanonicalField::Origin).unwrap_or(""));
        let date_collected = self
            .normalizer
            .parse_date(mapping.cell(row, CanonicalField::Date).unwrap_or(""));

        // Localidade: a coluna explícita (UF ou cidade) vence o padrão do arquivo
        let mut city = default_city.to_string();
        let mut region = default_region;
        if let Some(location) = mapping.cell(row, CanonicalField::Location) {
            let upper = location.trim().to_uppercase();
            if self.config.uf_regions.contains_key(upper.as_str()) {
                region = self.config.region_for_uf(&upper, default_region);
            } else if let Some(parsed) = Region::from_code(&upper) {
                region = parsed;
            } else {
                city = location.trim().to_string();
            }
        }

        let (product, created) = self
            .resolver
            .resolve(&brand, &model, &width, &rim, brand_raw)
            .map_err(|e| SkipReason::ResolverFailure(e.to_string()))?;

        let record = PriceHistoryRecord {
            id: None,
            product_id: product.id,
            competitor,
            // Marca/modelo do concorrente ficam como observados (brutos)
            competitor_brand: brand_raw.map(|v| v.to_string()),
            competitor_model: model_raw.map(|v| v.to_string()),
            price,
            cost,
            markup,
            origin,
            region: region.code().to_string(),
            city,
            date_collected,
            source: source.to_string(),
        };

        Ok((record, created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, init_schema};
    use rusqlite::Connection;
    use std::sync::Mutex;

    fn importer() -> (PriceImporter, Arc<Mutex<Connection>>) {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        let shared = Arc::new(Mutex::new(conn));

        let config = Arc::new(IngestConfig::default());
        let product_repo = Arc::new(ProductRepository::from_connection(shared.clone()));
        let price_repo = Arc::new(PriceHistoryRepository::from_connection(shared.clone()));
        (
            PriceImporter::new(config, product_repo, price_repo),
            shared,
        )
    }

    #[test]
    fn test_infer_location_from_filename() {
        let (importer, _conn) = importer();

        let (city, region) = importer.infer_location("precos_campinas_2025.csv");
        assert_eq!(city, "Campinas");
        assert_eq!(region, Region::Sudeste);

        let (city, region) = importer.infer_location("levantamento-curitiba.xlsx");
        assert_eq!(city, "Curitiba");
        assert_eq!(region, Region::Sul);

        // Sem marcador: padrão do sistema
        let (city, region) = importer.infer_location("precos.csv");
        assert_eq!(city, "São Paulo");
        assert_eq!(region, Region::Sudeste);
    }

    #[test]
    fn test_import_basic_csv() {
        let (importer, conn) = importer();
        let bytes = b"Marca,Modelo,Medida,Aro,Empresa,Preco Sell Out (R$)\n\
                      Pirelli,P1,185/65,R14,Loja A Ltda,\"350,00\"\n";

        let summary = importer.import(bytes, "precos.csv").unwrap();
        assert_eq!(summary.imported_count, 1);
        assert_eq!(summary.skipped_count, 0);
        assert_eq!(summary.new_products, 1);
        assert_eq!(summary.source, "IMPORTACAO_CSV");

        let guard = conn.lock().unwrap();
        let (competitor, price, rim): (String, f64, String) = guard
            .query_row(
                "SELECT h.competitor, h.price, p.rim FROM price_history h JOIN products p ON p.id = h.product_id",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert_eq!(competitor, "Loja A");
        assert_eq!(price, 350.0);
        assert_eq!(rim, "14");
    }

    #[test]
    fn test_row_location_column_overrides_default() {
        let (importer, conn) = importer();
        let bytes = b"Marca,Modelo,Medida,UF,Preco Sell Out (R$)\n\
                      Pirelli,P1,185/65,BA,\"350,00\"\n";

        importer.import(bytes, "precos.csv").unwrap();

        let guard = conn.lock().unwrap();
        let region: String = guard
            .query_row("SELECT region FROM price_history", [], |row| row.get(0))
            .unwrap();
        assert_eq!(region, "NE");
    }
}
