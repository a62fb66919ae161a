// ==========================================
// TireForce - Normalizadores de valor
// ==========================================
// Limpeza de células brutas: aro, nome de empresa, data, valor
// monetário, markup, origem e região. Nenhuma função daqui falha:
// valores ruins degradam para padrões seguros, e todo o julgamento
// de erro sobe para o laço de linhas do pipeline.
// ==========================================

use crate::config::IngestConfig;
use crate::domain::types::{Origin, Region};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::sync::Arc;

/// Sentinela para empresa ausente
pub const UNKNOWN_COMPANY: &str = "Desconhecido";

// Formatos de data tentados em ordem; o primeiro que consome o valor
// inteiro vence. Variantes de ano com 2 dígitos vêm antes das de 4
// para "%Y" não engolir "26" como ano 26.
const DATETIME_FORMATS: [&str; 3] = ["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: [&str; 5] = ["%d/%m/%y", "%d/%m/%Y", "%Y-%m-%d", "%d-%m-%y", "%d-%m-%Y"];

// ==========================================
// MoneyCell - Desfecho da análise de célula monetária
// ==========================================
// Planilhas reais trazem células de fórmula ("=E2/F2-1"); elas são um
// desfecho próprio, distinto de "valor ausente/imprestável"
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoneyCell {
    Amount(f64),
    Formula,
    Missing,
}

// ==========================================
// ValueNormalizer
// ==========================================
pub struct ValueNormalizer {
    config: Arc<IngestConfig>,
    numeric_re: Regex,
}

impl ValueNormalizer {
    pub fn new(config: Arc<IngestConfig>) -> Self {
        Self {
            config,
            numeric_re: Regex::new(r"[0-9]+(?:[.,][0-9]+)?").expect("regex numérica inválida"),
        }
    }

    /// Aro canônico: remove marcadores de unidade ("R", "ARO"), troca
    /// vírgula decimal por ponto; inteiro sai sem parte fracionária.
    /// Valores que não parseiam caem na PRIMEIRA substring numérica
    /// embutida; sem dígito algum, "0".
    pub fn normalize_rim(&self, raw: &str) -> String {
        let mut value = raw.trim().to_uppercase().replace("ARO", "");
        value = value.trim().to_string();

        // "R14" → "14" (somente quando o R precede um dígito)
        if value.starts_with('R') && value[1..].chars().next().is_some_and(|c| c.is_ascii_digit()) {
            value = value[1..].to_string();
        }

        let value = value.trim().replace(',', ".");
        if let Ok(parsed) = value.parse::<f64>() {
            return Self::render_number(parsed);
        }

        // Fallback: primeira substring numérica embutida
        if let Some(found) = self.numeric_re.find(&value) {
            let candidate = found.as_str().replace(',', ".");
            if let Ok(parsed) = candidate.parse::<f64>() {
                return Self::render_number(parsed);
            }
        }

        "0".to_string()
    }

    /// Número inteiro sem fração; não inteiro na forma decimal
    fn render_number(value: f64) -> String {
        if value.fract() == 0.0 {
            format!("{}", value.trunc() as i64)
        } else {
            format!("{}", value)
        }
    }

    /// Nome de empresa: sentinela para ausentes; capitalização por
    /// palavra e remoção de um sufixo de razão social no final
    /// (Ltda, S.A., S/A, Me, Eireli), sem caixa
    pub fn normalize_company_name(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return UNKNOWN_COMPANY.to_string();
        }

        let mut words: Vec<String> = trimmed.split_whitespace().map(title_case_word).collect();

        if words.len() > 1 {
            if let Some(last) = words.last() {
                let canon: String = last
                    .chars()
                    .filter(|c| *c != '.' && *c != '/' && *c != ',')
                    .collect::<String>()
                    .to_uppercase();
                if self.config.company_suffixes.iter().any(|s| *s == canon) {
                    words.pop();
                }
            }
        }

        words.join(" ").trim().to_string()
    }

    /// Data de coleta: vazio → agora; cadeia ordenada de formatos
    /// explícitos; depois RFC 3339; por fim, agora. Nunca falha.
    pub fn parse_date(&self, raw: &str) -> DateTime<Utc> {
        let value = raw.trim();
        if value.is_empty() {
            return Utc::now();
        }

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
                return Utc.from_utc_datetime(&dt);
            }
        }
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(value, format) {
                if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                    return Utc.from_utc_datetime(&dt);
                }
            }
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return dt.with_timezone(&Utc);
        }

        Utc::now()
    }

    /// Classifica uma célula monetária. O marcador de fórmula de
    /// planilha (prefixo '=') é um desfecho explícito, decidido em um
    /// único lugar, e não um caso especial espalhado pelos chamadores
    pub fn parse_money_cell(&self, raw: &str) -> MoneyCell {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return MoneyCell::Missing;
        }
        if trimmed.starts_with('=') {
            return MoneyCell::Formula;
        }

        let mut value: String = trimmed
            .replace("R$", "")
            .replace("r$", "")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        // Com vírgula decimal presente, pontos são separador de milhar
        if value.contains(',') {
            value = value.replace('.', "").replace(',', ".");
        }

        match value.parse::<f64>() {
            Ok(parsed) => MoneyCell::Amount(parsed),
            Err(_) => MoneyCell::Missing,
        }
    }

    /// Valor monetário degradado: fórmula ou célula imprestável → 0.0
    pub fn parse_money(&self, raw: &str) -> f64 {
        match self.parse_money_cell(raw) {
            MoneyCell::Amount(value) => value,
            MoneyCell::Formula | MoneyCell::Missing => 0.0,
        }
    }

    /// Markup: campo presente com número de verdade vale como está;
    /// fórmula/ausente com custo positivo calcula (venda/custo) - 1;
    /// caso contrário 0.0
    pub fn parse_markup(&self, raw: Option<&str>, sell_price: f64, cost_price: f64) -> f64 {
        if let Some(value) = raw {
            if let MoneyCell::Amount(parsed) = self.parse_money_cell(value) {
                return parsed;
            }
        }

        if cost_price > 0.0 {
            (sell_price / cost_price) - 1.0
        } else {
            0.0
        }
    }

    /// Origem por substring do texto em maiúsculas
    pub fn classify_origin(&self, raw: &str) -> Origin {
        let upper = raw.trim().to_uppercase();
        if upper.contains("NAC") {
            Origin::Nacional
        } else if upper.contains("IMP") {
            Origin::Importado
        } else {
            Origin::Desconhecida
        }
    }

    /// Região a partir da UF; UF desconhecida cai na região padrão do chamador
    pub fn resolve_region(&self, state_code: &str, default: Region) -> Region {
        self.config.region_for_uf(state_code, default)
    }
}

/// Primeira letra maiúscula, restante minúsculo
fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn normalizer() -> ValueNormalizer {
        ValueNormalizer::new(Arc::new(IngestConfig::default()))
    }

    #[test]
    fn test_normalize_rim_unit_markers() {
        let n = normalizer();
        assert_eq!(n.normalize_rim("R14"), "14");
        assert_eq!(n.normalize_rim("ARO 17,5"), "17.5");
        assert_eq!(n.normalize_rim(" aro 16 "), "16");
        assert_eq!(n.normalize_rim("14.0"), "14");
    }

    #[test]
    fn test_normalize_rim_embedded_numeric_fallback() {
        let n = normalizer();
        // Política: captura a PRIMEIRA substring numérica embutida
        assert_eq!(n.normalize_rim("aro205/55"), "205");
        assert_eq!(n.normalize_rim("R15 usado"), "15");
    }

    #[test]
    fn test_normalize_rim_no_numeric_content() {
        let n = normalizer();
        assert_eq!(n.normalize_rim(""), "0");
        assert_eq!(n.normalize_rim("sem aro"), "0");
    }

    #[test]
    fn test_normalize_rim_stable() {
        let n = normalizer();
        assert_eq!(n.normalize_rim("ARO 17,5"), n.normalize_rim("ARO 17,5"));
    }

    #[test]
    fn test_normalize_company_name_missing() {
        let n = normalizer();
        assert_eq!(n.normalize_company_name(""), "Desconhecido");
        assert_eq!(n.normalize_company_name("   "), "Desconhecido");
    }

    #[test]
    fn test_normalize_company_name_title_case_and_suffix() {
        let n = normalizer();
        assert_eq!(n.normalize_company_name("LOJA ABC LTDA"), "Loja Abc");
        assert_eq!(n.normalize_company_name("pneus silva s.a."), "Pneus Silva");
        assert_eq!(n.normalize_company_name("auto center s/a"), "Auto Center");
        assert_eq!(n.normalize_company_name("borracharia do zé me"), "Borracharia Do Zé");
        assert_eq!(n.normalize_company_name("Rodas Sul Eireli"), "Rodas Sul");
    }

    #[test]
    fn test_normalize_company_name_plain() {
        let n = normalizer();
        assert_eq!(n.normalize_company_name("loja do joão"), "Loja Do João");
    }

    #[test]
    fn test_parse_date_explicit_formats() {
        use chrono::Timelike;

        let n = normalizer();
        let d = n.parse_date("20/01/2025");
        assert_eq!((d.year(), d.month(), d.day()), (2025, 1, 20));

        let d = n.parse_date("2025-01-20");
        assert_eq!((d.year(), d.month(), d.day()), (2025, 1, 20));

        let d = n.parse_date("20-01-2025");
        assert_eq!((d.year(), d.month(), d.day()), (2025, 1, 20));

        let d = n.parse_date("20/01/25");
        assert_eq!((d.year(), d.month(), d.day()), (2025, 1, 20));

        let d = n.parse_date("20/01/2025 14:30:00");
        assert_eq!((d.year(), d.hour()), (2025, 14));
    }

    #[test]
    fn test_parse_date_never_fails() {
        let n = normalizer();
        let before = Utc::now();
        // Vazio e lixo retornam um timestamp utilizável, nunca erro
        assert!(n.parse_date("") >= before);
        assert!(n.parse_date("not-a-date") >= before);
    }

    #[test]
    fn test_parse_money_currency_notation() {
        let n = normalizer();
        assert_eq!(n.parse_money("R$ 1.234,56"), 1234.56);
        assert_eq!(n.parse_money("350,00"), 350.0);
        assert_eq!(n.parse_money("400"), 400.0);
        assert_eq!(n.parse_money(" R$ 89,90 "), 89.9);
    }

    #[test]
    fn test_parse_money_formula_and_garbage() {
        let n = normalizer();
        assert_eq!(n.parse_money("=A1+B1"), 0.0);
        assert_eq!(n.parse_money(""), 0.0);
        assert_eq!(n.parse_money("consultar"), 0.0);
    }

    #[test]
    fn test_money_cell_outcomes() {
        let n = normalizer();
        assert_eq!(n.parse_money_cell("=A1+B1"), MoneyCell::Formula);
        assert_eq!(n.parse_money_cell("  "), MoneyCell::Missing);
        assert_eq!(n.parse_money_cell("abc"), MoneyCell::Missing);
        assert_eq!(n.parse_money_cell("R$ 10,00"), MoneyCell::Amount(10.0));
    }

    #[test]
    fn test_parse_markup_explicit_value() {
        let n = normalizer();
        assert_eq!(n.parse_markup(Some("0,35"), 350.0, 200.0), 0.35);
    }

    #[test]
    fn test_parse_markup_computed_from_prices() {
        let n = normalizer();
        let mkp = n.parse_markup(None, 300.0, 200.0);
        assert!((mkp - 0.5).abs() < 1e-9);
        // Fórmula cai no cálculo
        let mkp = n.parse_markup(Some("=C2/D2-1"), 300.0, 200.0);
        assert!((mkp - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_markup_no_cost() {
        let n = normalizer();
        assert_eq!(n.parse_markup(None, 300.0, 0.0), 0.0);
    }

    #[test]
    fn test_classify_origin() {
        let n = normalizer();
        assert_eq!(n.classify_origin("Nacional"), Origin::Nacional);
        assert_eq!(n.classify_origin("NAC."), Origin::Nacional);
        assert_eq!(n.classify_origin("importado"), Origin::Importado);
        assert_eq!(n.classify_origin("IMP"), Origin::Importado);
        assert_eq!(n.classify_origin(""), Origin::Desconhecida);
        assert_eq!(n.classify_origin("???"), Origin::Desconhecida);
    }

    #[test]
    fn test_resolve_region() {
        let n = normalizer();
        assert_eq!(n.resolve_region("SP", Region::Sul), Region::Sudeste);
        assert_eq!(n.resolve_region("??", Region::Sul), Region::Sul);
    }
}
