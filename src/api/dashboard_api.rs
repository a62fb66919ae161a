// ==========================================
// TireForce - API do painel
// ==========================================
// Responsabilidade: consultas de leitura sobre o histórico de preços
// (listagem filtrada + estatísticas); podem rodar em paralelo com a
// importação, aceitando visibilidade eventual de escritas em voo
// ==========================================

use crate::api::error::ApiResult;
use crate::config::IngestConfig;
use crate::engine::{FilterSpec, Stats, StatsEngine};
use crate::repository::PriceHistoryRepository;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

// ==========================================
// PriceRow - Projeção de linha para o painel
// ==========================================
// Chaves de série compatíveis com o painel original
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRow {
    pub id: i64,
    #[serde(rename = "produto")]
    pub product_name: String,
    #[serde(rename = "medida")]
    pub measure: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "marca_concorrente")]
    pub competitor_brand: Option<String>,
    #[serde(rename = "concorrente")]
    pub competitor: String,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "custo")]
    pub cost: f64,
    #[serde(rename = "mkp")]
    pub markup: f64,
    #[serde(rename = "origem")]
    pub origin: String,
    #[serde(rename = "regiao")]
    pub region: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "data")]
    pub date_collected: DateTime<Utc>,
    #[serde(rename = "fonte")]
    pub source: String,
}

// ==========================================
// DashboardApi
// ==========================================
pub struct DashboardApi {
    price_repo: Arc<PriceHistoryRepository>,
    config: Arc<IngestConfig>,
}

impl DashboardApi {
    pub fn new(price_repo: Arc<PriceHistoryRepository>, config: Arc<IngestConfig>) -> Self {
        Self { price_repo, config }
    }

    /// Lista as observações que satisfazem o filtro, coleta mais recente primeiro
    pub fn list_prices(&self, spec: &FilterSpec) -> ApiResult<Vec<PriceRow>> {
        let filter = spec.compose(&self.config);
        let observations = self.price_repo.list_observations()?;

        let rows: Vec<PriceRow> = observations
            .iter()
            .filter(|obs| filter.matches(obs))
            .map(|obs| PriceRow {
                id: obs.id,
                product_name: obs.product_name.clone(),
                measure: obs.display_measure(),
                brand: obs.brand.clone(),
                competitor_brand: obs.competitor_brand.clone(),
                competitor: obs.competitor.clone(),
                price: obs.price,
                cost: obs.cost,
                markup: obs.markup,
                origin: obs.origin.to_string(),
                region: obs.region.clone(),
                city: obs.city.clone(),
                date_collected: obs.date_collected,
                source: obs.source.clone(),
            })
            .collect();

        debug!(total = observations.len(), filtradas = rows.len(), "consulta do painel");
        Ok(rows)
    }

    /// Estatísticas do conjunto filtrado; listas de seleção vêm do
    /// catálogo completo mesmo quando o filtro não casa com nada
    pub fn get_stats(&self, spec: &FilterSpec) -> ApiResult<Stats> {
        let filter = spec.compose(&self.config);
        let observations = self.price_repo.list_observations()?;
        let filtered = filter.apply(&observations);

        Ok(StatsEngine::summarize(&filtered, &observations))
    }
}
