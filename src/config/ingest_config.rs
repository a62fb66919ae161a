// ==========================================
// TireForce - Configuração de ingestão
// ==========================================
// Todas as tabelas de consulta usadas pelo identificador de colunas e
// pelos normalizadores vivem aqui como dados imutáveis, injetados na
// construção dos componentes. Nada de tabelas globais mutáveis: isso
// permite overrides por localidade e testes determinísticos.
// ==========================================

use crate::domain::types::{CanonicalField, Region};
use std::collections::HashMap;

// ==========================================
// IngestConfig - Tabelas de ingestão
// ==========================================
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Tabela exata cabeçalho → campo canônico (esquema recorrente conhecido)
    pub exact_headers: Vec<(String, CanonicalField)>,

    /// Marcadores de sell-out (pontuação alta na detecção de âncora)
    pub sell_out_markers: Vec<String>,

    /// Marcadores genéricos de preço (pontuação baixa)
    pub price_markers: Vec<String>,

    /// Marcadores de custo/sell-in (excluídos da candidatura a âncora)
    pub cost_markers: Vec<String>,

    /// Palavras-chave por campo para o fallback por proximidade
    pub field_keywords: Vec<(CanonicalField, Vec<String>)>,

    /// UF → região (tabela fechada, 27 unidades federativas)
    pub uf_regions: HashMap<String, Region>,

    /// Marcadores de cidade no nome do arquivo → (cidade, região)
    pub city_markers: Vec<(String, String, Region)>,

    /// Cidade/região padrão quando o arquivo não dá pistas
    pub default_city: String,
    pub default_region: Region,

    /// Sentinelas "todos os valores" dos filtros (minúsculas)
    pub all_sentinels: Vec<String>,

    /// Sufixos de razão social removidos do fim de nomes de empresa
    /// (comparados em maiúsculas, sem pontos e barras)
    pub company_suffixes: Vec<String>,
}

impl IngestConfig {
    /// Sentinela de valor "todos"? (comparação sem caixa, com trim)
    pub fn is_all_sentinel(&self, value: &str) -> bool {
        let v = value.trim().to_lowercase();
        self.all_sentinels.iter().any(|s| *s == v)
    }

    /// Região correspondente à UF, ou a região padrão fornecida
    pub fn region_for_uf(&self, uf: &str, default: Region) -> Region {
        self.uf_regions
            .get(uf.trim().to_uppercase().as_str())
            .copied()
            .unwrap_or(default)
    }

    /// Palavras-chave do fallback para um campo canônico
    pub fn keywords_for(&self, field: CanonicalField) -> &[String] {
        self.field_keywords
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, kws)| kws.as_slice())
            .unwrap_or(&[])
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for IngestConfig {
    fn default() -> Self {
        use CanonicalField::*;

        let exact_headers = [
            ("Marca", Brand),
            ("MARCA", Brand),
            ("Modelo", Model),
            ("MODELO", Model),
            ("Desenho", Model),
            ("Medida", Width),
            ("MEDIDA", Width),
            ("Aro", Rim),
            ("ARO", Rim),
            ("Preço Sell Out (R$)", Price),
            ("Preco Sell Out (R$)", Price),
            ("PREÇO SELL OUT", Price),
            ("Preço Sell In (R$)", Cost),
            ("Preco Sell In (R$)", Cost),
            ("PREÇO SELL IN", Cost),
            ("Empresa", Competitor),
            ("EMPRESA", Competitor),
            ("Concorrente", Competitor),
            ("Origem", Origin),
            ("ORIGEM", Origin),
            ("Data", Date),
            ("DATA", Date),
            ("Data Coleta", Date),
            ("MKP", Mkp),
            ("Mkp", Mkp),
            ("Markup", Mkp),
            ("Cidade", Location),
            ("CIDADE", Location),
            ("UF", Location),
            ("Local", Location),
        ]
        .into_iter()
        .map(|(h, f)| (h.to_string(), f))
        .collect();

        let field_keywords = vec![
            (Brand, owned(&["MARCA"])),
            (Model, owned(&["MODELO", "DESENHO"])),
            (Width, owned(&["MEDIDA", "DIMENSAO", "DIMENSÃO"])),
            (Rim, owned(&["ARO", "RIM"])),
            (Cost, owned(&["SELL IN", "SELL_IN", "CUSTO", "COST"])),
            (Competitor, owned(&["EMPRESA", "CONCORRENTE", "LOJA", "REVENDA"])),
            (Origin, owned(&["ORIGEM", "PROCEDENCIA", "PROCEDÊNCIA"])),
            (Date, owned(&["DATA", "DATE", "COLETA"])),
            (Mkp, owned(&["MKP", "MARKUP", "MARK UP"])),
            (Location, owned(&["CIDADE", "LOCAL", "PRACA", "PRAÇA", "UF"])),
        ];

        let uf_regions = [
            // Norte
            ("AC", Region::Norte),
            ("AM", Region::Norte),
            ("AP", Region::Norte),
            ("PA", Region::Norte),
            ("RO", Region::Norte),
            ("RR", Region::Norte),
            ("TO", Region::Norte),
            // Nordeste
            ("AL", Region::Nordeste),
            ("BA", Region::Nordeste),
            ("CE", Region::Nordeste),
            ("MA", Region::Nordeste),
            ("PB", Region::Nordeste),
            ("PE", Region::Nordeste),
            ("PI", Region::Nordeste),
            ("RN", Region::Nordeste),
            ("SE", Region::Nordeste),
            // Centro-Oeste
            ("DF", Region::CentroOeste),
            ("GO", Region::CentroOeste),
            ("MT", Region::CentroOeste),
            ("MS", Region::CentroOeste),
            // Sudeste
            ("ES", Region::Sudeste),
            ("MG", Region::Sudeste),
            ("RJ", Region::Sudeste),
            ("SP", Region::Sudeste),
            // Sul
            ("PR", Region::Sul),
            ("RS", Region::Sul),
            ("SC", Region::Sul),
        ]
        .into_iter()
        .map(|(uf, r)| (uf.to_string(), r))
        .collect();

        let city_markers = [
            ("sao paulo", "São Paulo", Region::Sudeste),
            ("campinas", "Campinas", Region::Sudeste),
            ("rio", "Rio de Janeiro", Region::Sudeste),
            ("belo horizonte", "Belo Horizonte", Region::Sudeste),
            ("curitiba", "Curitiba", Region::Sul),
            ("porto alegre", "Porto Alegre", Region::Sul),
            ("florianopolis", "Florianópolis", Region::Sul),
            ("recife", "Recife", Region::Nordeste),
            ("salvador", "Salvador", Region::Nordeste),
            ("fortaleza", "Fortaleza", Region::Nordeste),
            ("manaus", "Manaus", Region::Norte),
            ("belem", "Belém", Region::Norte),
            ("goiania", "Goiânia", Region::CentroOeste),
            ("brasilia", "Brasília", Region::CentroOeste),
            ("campo grande", "Campo Grande", Region::CentroOeste),
        ]
        .into_iter()
        .map(|(m, c, r)| (m.to_string(), c.to_string(), r))
        .collect();

        Self {
            exact_headers,
            sell_out_markers: owned(&["SELL OUT", "SELLOUT", "SELL_OUT"]),
            price_markers: owned(&["PREÇO", "PRECO", "PRICE", "VALOR"]),
            cost_markers: owned(&["SELL IN", "SELL_IN", "CUSTO", "COST"]),
            field_keywords,
            uf_regions,
            city_markers,
            default_city: "São Paulo".to_string(),
            default_region: Region::Sudeste,
            all_sentinels: owned(&["", "todos", "todas", "all"]),
            company_suffixes: owned(&["LTDA", "SA", "ME", "EIRELI"]),
        }
    }
}
