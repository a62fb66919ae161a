// ==========================================
// TireForce - Identificador de colunas
// ==========================================
// Planilhas reais não têm esquema fixo: os nomes de coluna variam por
// fornecedor, idioma e revisão. Estratégia ordenada, primeira vitória
// por campo:
//   1. tabela exata de cabeçalhos conhecidos
//   2. detecção da coluna âncora (preço sell-out) por pontuação
//   3. fallback por substring, preferindo a coluna mais próxima da âncora
// A âncora serve de referência espacial: na prática, colunas vizinhas
// do preço descrevem o mesmo contexto da linha (ex.: duas colunas
// "Marca", uma interna e uma do concorrente).
// ==========================================

use crate::config::IngestConfig;
use crate::domain::types::CanonicalField;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

// ==========================================
// ColumnMapping - Mapeamento transitório por arquivo
// ==========================================
// Produzido uma vez por arquivo, consumido por todas as linhas;
// nunca persistido. Acesso por índice de coluna (cabeçalhos repetidos)
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    columns: HashMap<CanonicalField, usize>,
    pub anchor_index: usize,
}

impl ColumnMapping {
    /// Índice da coluna mapeada para o campo, se houver
    pub fn column(&self, field: CanonicalField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    /// Célula da linha para o campo; None quando não mapeado ou vazio
    pub fn cell<'a>(&self, row: &'a [String], field: CanonicalField) -> Option<&'a str> {
        let idx = self.column(field)?;
        let value = row.get(idx)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

// ==========================================
// ColumnIdentifier
// ==========================================
pub struct ColumnIdentifier {
    config: Arc<IngestConfig>,
}

impl ColumnIdentifier {
    pub fn new(config: Arc<IngestConfig>) -> Self {
        Self { config }
    }

    /// Identifica as colunas de um arquivo a partir da linha de cabeçalho
    ///
    /// # Retorno
    /// - Ok(ColumnMapping): mapeamento utilizável para todas as linhas
    /// - Err(ColumnsNotIdentified): nenhuma coluna de preço encontrada
    /// - Err(MissingMandatoryColumn): sem coluna de medida
    pub fn identify(&self, headers: &[String]) -> ImportResult<ColumnMapping> {
        let mut columns: HashMap<CanonicalField, usize> = HashMap::new();
        let mut claimed: HashSet<usize> = HashSet::new();

        // === Passo 1: tabela exata ===
        for (idx, header) in headers.iter().enumerate() {
            let trimmed = header.trim();
            for (name, field) in &self.config.exact_headers {
                if trimmed == name && !columns.contains_key(field) {
                    columns.insert(*field, idx);
                    claimed.insert(idx);
                    break;
                }
            }
        }

        // === Passo 2: coluna âncora (preço sell-out) ===
        let anchor_index = match columns.get(&CanonicalField::Price) {
            Some(&idx) => idx,
            None => {
                let idx = self
                    .detect_anchor(headers, &claimed)
                    .ok_or(ImportError::ColumnsNotIdentified)?;
                columns.insert(CanonicalField::Price, idx);
                claimed.insert(idx);
                idx
            }
        };

        // === Passo 3: fallback por proximidade ===
        for (field, keywords) in &self.config.field_keywords {
            if columns.contains_key(field) {
                continue;
            }
            if let Some(idx) = self.closest_match(headers, &claimed, keywords, anchor_index, *field)
            {
                columns.insert(*field, idx);
                claimed.insert(idx);
            }
        }

        // === Passo 4: campos obrigatórios ===
        // A identidade do catálogo deriva da medida; sem ela o arquivo
        // não consegue formar chaves de produto
        if !columns.contains_key(&CanonicalField::Width) {
            return Err(ImportError::MissingMandatoryColumn("Medida".to_string()));
        }

        Ok(ColumnMapping {
            columns,
            anchor_index,
        })
    }

    /// Melhor candidata a âncora por pontuação:
    /// marcador sell-out (3) > marcador genérico de preço (1);
    /// colunas de custo/sell-in ficam fora da disputa; empate → primeira
    fn detect_anchor(&self, headers: &[String], claimed: &HashSet<usize>) -> Option<usize> {
        let mut best: Option<(i32, usize)> = None;

        for (idx, header) in headers.iter().enumerate() {
            if claimed.contains(&idx) {
                continue;
            }
            let upper = header.trim().to_uppercase();

            if self.config.cost_markers.iter().any(|m| upper.contains(m)) {
                continue;
            }

            let score = if self.config.sell_out_markers.iter().any(|m| upper.contains(m)) {
                3
            } else if self.config.price_markers.iter().any(|m| upper.contains(m)) {
                1
            } else {
                continue;
            };

            match best {
                Some((best_score, _)) if score <= best_score => {}
                _ => best = Some((score, idx)),
            }
        }

        best.map(|(_, idx)| idx)
    }

    /// Entre as colunas cujo nome contém alguma palavra-chave do campo,
    /// escolhe a posicionalmente mais próxima da âncora; igualdade exata
    /// com a palavra-chave vale mais do que qualquer distância
    fn closest_match(
        &self,
        headers: &[String],
        claimed: &HashSet<usize>,
        keywords: &[String],
        anchor_index: usize,
        field: CanonicalField,
    ) -> Option<usize> {
        let mut best: Option<(i64, usize)> = None;

        for (idx, header) in headers.iter().enumerate() {
            if claimed.contains(&idx) {
                continue;
            }
            // O custo nunca pode cair na própria coluna âncora
            if field == CanonicalField::Cost && idx == anchor_index {
                continue;
            }

            let upper = header.trim().to_uppercase();
            if !keywords.iter().any(|kw| upper.contains(kw.as_str())) {
                continue;
            }

            let exact = keywords.iter().any(|kw| upper == *kw);
            let distance = (idx as i64 - anchor_index as i64).abs();
            let score = if exact { 1000 - distance } else { -distance };

            match best {
                Some((best_score, _)) if score <= best_score => {}
                _ => best = Some((score, idx)),
            }
        }

        best.map(|(_, idx)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identifier() -> ColumnIdentifier {
        ColumnIdentifier::new(Arc::new(IngestConfig::default()))
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_table_known_schema() {
        let mapping = identifier()
            .identify(&headers(&[
                "Medida",
                "Marca",
                "Modelo",
                "Aro",
                "Preço Sell Out (R$)",
                "Empresa",
            ]))
            .unwrap();

        assert_eq!(mapping.column(CanonicalField::Width), Some(0));
        assert_eq!(mapping.column(CanonicalField::Brand), Some(1));
        assert_eq!(mapping.column(CanonicalField::Model), Some(2));
        assert_eq!(mapping.column(CanonicalField::Rim), Some(3));
        assert_eq!(mapping.column(CanonicalField::Price), Some(4));
        assert_eq!(mapping.column(CanonicalField::Competitor), Some(5));
        assert_eq!(mapping.anchor_index, 4);
    }

    #[test]
    fn test_anchor_by_sell_out_marker() {
        // Cabeçalho fora da tabela exata: âncora por pontuação
        let mapping = identifier()
            .identify(&headers(&["Marca", "Modelo", "Medida", "Empresa", "Preco_Sell_Out"]))
            .unwrap();

        assert_eq!(mapping.column(CanonicalField::Price), Some(4));
    }

    #[test]
    fn test_sell_out_beats_generic_price() {
        let mapping = identifier()
            .identify(&headers(&["Medida", "Valor Tabela", "Preco Sellout Loja"]))
            .unwrap();

        // "Preco Sellout Loja" (3 pontos) vence "Valor Tabela" (1 ponto)
        assert_eq!(mapping.column(CanonicalField::Price), Some(2));
    }

    #[test]
    fn test_cost_column_excluded_from_anchor() {
        let mapping = identifier()
            .identify(&headers(&["Medida", "Preco Sell In Loja", "Preco Loja"]))
            .unwrap();

        assert_eq!(mapping.column(CanonicalField::Price), Some(2));
    }

    #[test]
    fn test_no_price_column_fails() {
        let result = identifier().identify(&headers(&["Marca", "Modelo", "Medida"]));
        assert!(matches!(result, Err(ImportError::ColumnsNotIdentified)));
    }

    #[test]
    fn test_missing_width_fails() {
        let result = identifier().identify(&headers(&["Marca", "Preço Sell Out (R$)"]));
        assert!(matches!(result, Err(ImportError::MissingMandatoryColumn(_))));
    }

    #[test]
    fn test_proximity_fallback_prefers_nearest() {
        // Duas colunas contendo "MARCA": a mais próxima da âncora vence
        let mapping = identifier()
            .identify(&headers(&[
                "Marca Fabricante",
                "Medida",
                "Marca Loja",
                "Preco Sellout",
            ]))
            .unwrap();

        assert_eq!(mapping.column(CanonicalField::Brand), Some(2));
    }

    #[test]
    fn test_exact_keyword_bonus_beats_distance() {
        // "ARO" exato longe da âncora vence "ARO PROMOCIONAL" vizinho
        let mapping = identifier()
            .identify(&headers(&[
                "ARO",
                "Medida",
                "Aro Promocional",
                "Preco Sellout",
            ]))
            .unwrap();

        assert_eq!(mapping.column(CanonicalField::Rim), Some(0));
    }

    #[test]
    fn test_duplicate_exact_headers_first_wins() {
        let mapping = identifier()
            .identify(&headers(&[
                "Marca",
                "Modelo",
                "Medida",
                "Marca",
                "Preço Sell Out (R$)",
            ]))
            .unwrap();

        assert_eq!(mapping.column(CanonicalField::Brand), Some(0));
    }

    #[test]
    fn test_unmatched_optional_fields_absent() {
        let mapping = identifier()
            .identify(&headers(&["Medida", "Preço Sell Out (R$)"]))
            .unwrap();

        assert_eq!(mapping.column(CanonicalField::Origin), None);
        assert_eq!(mapping.column(CanonicalField::Date), None);
        assert_eq!(mapping.column(CanonicalField::Mkp), None);
    }
}
