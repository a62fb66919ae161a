// ==========================================
// TireForce - Agregador de estatísticas
// ==========================================
// Estatísticas de resumo sobre um conjunto filtrado de observações.
// As listas de valores distintos alimentam os seletores da interface
// e por isso são calculadas sobre o catálogo SEM filtro, mesmo quando
// o conjunto filtrado está vazio.
// ==========================================

use crate::domain::price_history::PriceObservation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinela exibida quando não há valor categórico
const EMPTY_SENTINEL: &str = "-";

// ==========================================
// Stats - Estrutura de resumo
// ==========================================
// Nomes de série compatíveis com o painel original
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    #[serde(rename = "media")]
    pub mean_price: f64,
    #[serde(rename = "minimo")]
    pub min_price: f64,
    #[serde(rename = "top_aro")]
    pub modal_rim: String,
    #[serde(rename = "top_concorrente")]
    pub cheapest_competitor: String,
    #[serde(rename = "marcas")]
    pub distinct_brands: Vec<String>,
    #[serde(rename = "concorrentes")]
    pub distinct_competitors: Vec<String>,
    #[serde(rename = "marcas_concorrentes")]
    pub distinct_competitor_brands: Vec<String>,
    #[serde(rename = "medidas")]
    pub distinct_widths: Vec<String>,
}

// ==========================================
// StatsEngine
// ==========================================
pub struct StatsEngine;

impl StatsEngine {
    /// Resumo do conjunto filtrado; listas distintas vêm do catálogo completo
    pub fn summarize(filtered: &[PriceObservation], catalog: &[PriceObservation]) -> Stats {
        let total = filtered.len();

        let mean_price = if total == 0 {
            0.0
        } else {
            filtered.iter().map(|o| o.price).sum::<f64>() / total as f64
        };

        let min_price = filtered
            .iter()
            .map(|o| o.price)
            .min_by(|a, b| a.total_cmp(b))
            .unwrap_or(0.0);

        Stats {
            total,
            mean_price,
            min_price,
            modal_rim: modal_rim(filtered),
            cheapest_competitor: cheapest_competitor(filtered),
            distinct_brands: distinct(catalog, |o| Some(o.brand.clone())),
            distinct_competitors: distinct(catalog, |o| Some(o.competitor.clone())),
            distinct_competitor_brands: distinct(catalog, |o| o.competitor_brand.clone()),
            distinct_widths: distinct(catalog, |o| Some(o.width.clone())),
        }
    }
}

/// Aro mais frequente; empate resolvido pelo primeiro aro a atingir a
/// contagem máxima na ordem estável de iteração
fn modal_rim(observations: &[PriceObservation]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for obs in observations {
        let entry = counts.entry(obs.rim.as_str()).or_insert(0);
        if *entry == 0 {
            order.push(obs.rim.as_str());
        }
        *entry += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for rim in order {
        let count = counts[rim];
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((rim, count)),
        }
    }

    best.map(|(rim, _)| rim.to_string())
        .unwrap_or_else(|| EMPTY_SENTINEL.to_string())
}

/// Concorrente do registro de menor preço; empate resolvido pela
/// primeira linha que uma ordenação estável crescente de preço expõe
fn cheapest_competitor(observations: &[PriceObservation]) -> String {
    let mut best: Option<&PriceObservation> = None;
    for obs in observations {
        match best {
            Some(current) if obs.price >= current.price => {}
            _ => best = Some(obs),
        }
    }

    best.map(|o| o.competitor.clone())
        .unwrap_or_else(|| EMPTY_SENTINEL.to_string())
}

/// Valores distintos, ordenados, sem vazios
fn distinct<F>(observations: &[PriceObservation], extract: F) -> Vec<String>
where
    F: Fn(&PriceObservation) -> Option<String>,
{
    let mut values: Vec<String> = observations
        .iter()
        .filter_map(&extract)
        .filter(|v| !v.trim().is_empty())
        .collect();
    values.sort();
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Origin;
    use chrono::Utc;

    fn observation(brand: &str, competitor: &str, rim: &str, price: f64) -> PriceObservation {
        PriceObservation {
            id: 1,
            product_id: 1,
            competitor: competitor.to_string(),
            competitor_brand: Some(format!("{} Revenda", brand)),
            competitor_model: None,
            price,
            cost: 0.0,
            markup: 0.0,
            origin: Origin::Nacional,
            region: "SE".to_string(),
            city: "São Paulo".to_string(),
            date_collected: Utc::now(),
            source: "UPLOAD".to_string(),
            product_name: format!("Pneu {}", brand),
            brand: brand.to_string(),
            product_competitor_brand: None,
            width: "185".to_string(),
            profile: "65".to_string(),
            rim: rim.to_string(),
        }
    }

    #[test]
    fn test_summarize_basic() {
        let catalog = vec![
            observation("PIRELLI", "Loja A", "14", 350.0),
            observation("PIRELLI", "Loja B", "14", 340.0),
            observation("GOODYEAR", "Loja A", "15", 400.0),
        ];
        let stats = StatsEngine::summarize(&catalog, &catalog);

        assert_eq!(stats.total, 3);
        assert!((stats.mean_price - 363.333333).abs() < 1e-3);
        assert_eq!(stats.min_price, 340.0);
        assert_eq!(stats.modal_rim, "14");
        assert_eq!(stats.cheapest_competitor, "Loja B");
        assert_eq!(stats.distinct_brands, vec!["GOODYEAR", "PIRELLI"]);
    }

    #[test]
    fn test_modal_rim_tie_breaks_to_first_seen() {
        let observations = vec![
            observation("A", "X", "15", 1.0),
            observation("A", "X", "14", 1.0),
            observation("A", "X", "14", 1.0),
            observation("A", "X", "15", 1.0),
        ];
        // Empate 2×2: "15" apareceu primeiro
        let stats = StatsEngine::summarize(&observations, &observations);
        assert_eq!(stats.modal_rim, "15");
    }

    #[test]
    fn test_cheapest_competitor_tie_breaks_to_first_row() {
        let observations = vec![
            observation("A", "Loja A", "14", 100.0),
            observation("A", "Loja B", "14", 100.0),
        ];
        let stats = StatsEngine::summarize(&observations, &observations);
        assert_eq!(stats.cheapest_competitor, "Loja A");
    }

    #[test]
    fn test_empty_filtered_set_keeps_catalog_lists() {
        let catalog = vec![
            observation("PIRELLI", "Loja A", "14", 350.0),
            observation("GOODYEAR", "Loja B", "15", 400.0),
        ];
        let stats = StatsEngine::summarize(&[], &catalog);

        assert_eq!(stats.total, 0);
        assert_eq!(stats.mean_price, 0.0);
        assert_eq!(stats.min_price, 0.0);
        assert_eq!(stats.modal_rim, "-");
        assert_eq!(stats.cheapest_competitor, "-");
        // Listas de seleção continuam populadas pelo catálogo
        assert_eq!(stats.distinct_brands.len(), 2);
        assert_eq!(stats.distinct_competitors.len(), 2);
        assert_eq!(stats.distinct_widths, vec!["185"]);
    }
}
