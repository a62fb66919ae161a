// ==========================================
// TireForce - Tipos do pipeline de importação
// ==========================================
// Resultado explícito de linha (motivo de descarte observável) e
// resumo por arquivo.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// SkipReason - Motivo de descarte de linha
// ==========================================
// Uma linha ruim nunca aborta o arquivo: ela vira um descarte
// contado e logado, e o processamento continua
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Marca, modelo e medida insuficientes para formar a identidade do produto
    EmptyProductFields,
    /// Falha ao resolver/criar o produto no catálogo
    ResolverFailure(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyProductFields => {
                write!(f, "campos de identidade do produto vazios (marca/modelo/medida)")
            }
            SkipReason::ResolverFailure(msg) => write!(f, "falha ao resolver produto: {}", msg),
        }
    }
}

// ==========================================
// ImportSummary - Resumo por arquivo importado
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    #[serde(rename = "importados")]
    pub imported_count: usize,
    #[serde(rename = "ignorados")]
    pub skipped_count: usize,
    #[serde(rename = "novos_produtos")]
    pub new_products: usize,
    #[serde(rename = "cidade_detectada")]
    pub detected_city: String,
    #[serde(rename = "regiao_detectada")]
    pub detected_region: String,
    #[serde(rename = "fonte")]
    pub source: String,
}
