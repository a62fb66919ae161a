// ==========================================
// TireForce - Compositor de filtros
// ==========================================
// Conjunto aberto de dimensões opcionais combinadas por E lógico
// sobre a relação (registro ⋈ produto). Cada dimensão é pulada
// quando carrega a sentinela "todos"; dimensões de lista aceitam
// valores separados por vírgula. A composição é independente de
// ordem: aplicar {região} depois {marca} equivale a {marca} depois
// {região} e a ambos de uma vez.
// ==========================================

use crate::config::IngestConfig;
use crate::domain::price_history::PriceObservation;
use serde::{Deserialize, Serialize};

// ==========================================
// FilterSpec - Dimensões de filtro da consulta
// ==========================================
// Transitório: consumido uma vez por consulta, nunca persistido
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default, rename = "regiao")]
    pub region: Option<String>,
    #[serde(default, rename = "marca")]
    pub brand: Option<String>, // lista separada por vírgula
    #[serde(default, rename = "aro")]
    pub rim: Option<String>, // lista separada por vírgula
    #[serde(default, rename = "concorrente")]
    pub competitor: Option<String>, // lista separada por vírgula
    #[serde(default, rename = "marca_concorrente")]
    pub competitor_brand: Option<String>, // lista separada por vírgula
    #[serde(default, rename = "origem")]
    pub origin: Option<String>,
    #[serde(default, rename = "busca")]
    pub search: Option<String>,
}

impl FilterSpec {
    /// Composição do predicado a partir das dimensões preenchidas
    pub fn compose(&self, config: &IngestConfig) -> PriceFilter {
        PriceFilter {
            region: scalar_dimension(&self.region, config),
            brands: list_dimension(&self.brand, config),
            rims: list_dimension(&self.rim, config),
            competitors: list_dimension(&self.competitor, config),
            competitor_brands: list_dimension(&self.competitor_brand, config),
            origin: scalar_dimension(&self.origin, config),
            search: self
                .search
                .as_ref()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Dimensão escalar: None quando ausente ou sentinela "todos"
fn scalar_dimension(value: &Option<String>, config: &IngestConfig) -> Option<String> {
    value
        .as_ref()
        .filter(|v| !config.is_all_sentinel(v))
        .map(|v| v.trim().to_uppercase())
}

/// Dimensão de lista: separa por vírgula, remove sentinelas;
/// lista vazia após a remoção desliga a dimensão
fn list_dimension(value: &Option<String>, config: &IngestConfig) -> Option<Vec<String>> {
    let raw = value.as_ref()?;
    let values: Vec<String> = raw
        .split(',')
        .map(|v| v.trim())
        .filter(|v| !config.is_all_sentinel(v))
        .map(|v| v.to_uppercase())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

// ==========================================
// PriceFilter - Predicado composto
// ==========================================
#[derive(Debug, Clone)]
pub struct PriceFilter {
    region: Option<String>,
    brands: Option<Vec<String>>,
    rims: Option<Vec<String>>,
    competitors: Option<Vec<String>>,
    competitor_brands: Option<Vec<String>>,
    origin: Option<String>,
    search: Option<String>,
}

impl PriceFilter {
    /// A observação satisfaz todas as dimensões ativas?
    pub fn matches(&self, obs: &PriceObservation) -> bool {
        if let Some(region) = &self.region {
            if obs.region.to_uppercase() != *region {
                return false;
            }
        }

        if let Some(brands) = &self.brands {
            if !brands.iter().any(|b| obs.brand.to_uppercase() == *b) {
                return false;
            }
        }

        if let Some(rims) = &self.rims {
            if !rims.iter().any(|r| obs.rim.to_uppercase() == *r) {
                return false;
            }
        }

        if let Some(competitors) = &self.competitors {
            if !competitors.iter().any(|c| obs.competitor.to_uppercase() == *c) {
                return false;
            }
        }

        if let Some(competitor_brands) = &self.competitor_brands {
            let observed = obs
                .competitor_brand
                .as_deref()
                .unwrap_or("")
                .to_uppercase();
            if !competitor_brands.iter().any(|cb| observed == *cb) {
                return false;
            }
        }

        if let Some(origin) = &self.origin {
            if obs.origin.as_str() != origin {
                return false;
            }
        }

        if let Some(needle) = &self.search {
            if !self.search_matches(obs, needle) {
                return false;
            }
        }

        true
    }

    /// Busca livre: substring sem caixa, OU entre um conjunto fixo de campos
    fn search_matches(&self, obs: &PriceObservation, needle: &str) -> bool {
        let fields = [
            obs.product_name.as_str(),
            obs.brand.as_str(),
            obs.product_competitor_brand.as_deref().unwrap_or(""),
            obs.width.as_str(),
            obs.rim.as_str(),
            obs.competitor.as_str(),
            obs.city.as_str(),
            obs.competitor_brand.as_deref().unwrap_or(""),
        ];
        fields.iter().any(|f| f.to_lowercase().contains(needle))
    }

    /// Aplica o predicado preservando a ordem de entrada
    pub fn apply(&self, observations: &[PriceObservation]) -> Vec<PriceObservation> {
        observations
            .iter()
            .filter(|obs| self.matches(obs))
            .cloned()
            .collect()
    }
}
