// ==========================================
// TireForce - Histórico de preços
// ==========================================
// Registro de observação, apenas inserção: correções são novos
// registros, nunca edições. Escrito somente pelo pipeline de importação.
// ==========================================

use crate::domain::types::Origin;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// PriceHistoryRecord - Observação de preço
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceHistoryRecord {
    pub id: Option<i64>,                  // None antes da persistência
    pub product_id: i64,                  // FK para products
    pub competitor: String,               // Empresa concorrente (nome normalizado)
    pub competitor_brand: Option<String>, // Marca como observada (bruta)
    pub competitor_model: Option<String>, // Modelo como observado (bruto)
    pub price: f64,                       // Preço sell-out
    pub cost: f64,                        // Preço sell-in / custo
    pub markup: f64,                      // MKP = (price/cost) - 1, lido ou calculado
    pub origin: Origin,                   // NACIONAL / IMPORTADO / -
    pub region: String,                   // Código de região (N/NE/CO/SE/S)
    pub city: String,                     // Cidade da coleta
    pub date_collected: DateTime<Utc>,    // Momento da coleta
    pub source: String,                   // Etiqueta de origem ("UPLOAD", "IMPORTACAO_CSV")
}

// ==========================================
// PriceObservation - Projeção (registro ⋈ produto)
// ==========================================
// Resultado das consultas: registro de preço junto com os campos
// descritivos do produto, ordenado da coleta mais recente para a mais antiga
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceObservation {
    // Lado do registro
    pub id: i64,
    pub product_id: i64,
    pub competitor: String,
    pub competitor_brand: Option<String>,
    pub competitor_model: Option<String>,
    pub price: f64,
    pub cost: f64,
    pub markup: f64,
    pub origin: Origin,
    pub region: String,
    pub city: String,
    pub date_collected: DateTime<Utc>,
    pub source: String,

    // Lado do produto
    pub product_name: String,
    pub brand: String,
    pub product_competitor_brand: Option<String>,
    pub width: String,
    pub profile: String,
    pub rim: String,
}

impl PriceObservation {
    /// Medida completa para exibição (ex.: "185/65 R14")
    pub fn display_measure(&self) -> String {
        if self.profile.is_empty() {
            format!("{} R{}", self.width, self.rim)
        } else {
            format!("{}/{} R{}", self.width, self.profile, self.rim)
        }
    }
}
