// ==========================================
// TireForce - Tipos de domínio
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Origem do produto (Origin)
// ==========================================
// Classificada por substring do texto bruto ("NAC" / "IMP")
// Formato persistido: NACIONAL / IMPORTADO / -
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    Nacional,     // Fabricado no país
    Importado,    // Importado
    Desconhecida, // Sem classificação (exibida como "-")
}

impl Origin {
    /// Forma persistida / exibida
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Nacional => "NACIONAL",
            Origin::Importado => "IMPORTADO",
            Origin::Desconhecida => "-",
        }
    }

    /// Conversão a partir da forma persistida (valores estranhos viram Desconhecida)
    pub fn from_stored(value: &str) -> Self {
        match value {
            "NACIONAL" => Origin::Nacional,
            "IMPORTADO" => Origin::Importado,
            _ => Origin::Desconhecida,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Região geográfica (Region)
// ==========================================
// Cinco regiões do país, derivadas da UF via tabela de configuração
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Norte,
    Nordeste,
    CentroOeste,
    Sudeste,
    Sul,
}

impl Region {
    /// Código curto persistido nos registros
    pub fn code(&self) -> &'static str {
        match self {
            Region::Norte => "N",
            Region::Nordeste => "NE",
            Region::CentroOeste => "CO",
            Region::Sudeste => "SE",
            Region::Sul => "S",
        }
    }

    /// Conversão a partir do código curto
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "N" => Some(Region::Norte),
            "NE" => Some(Region::Nordeste),
            "CO" => Some(Region::CentroOeste),
            "SE" => Some(Region::Sudeste),
            "S" => Some(Region::Sul),
            _ => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ==========================================
// Campo canônico (CanonicalField)
// ==========================================
// Nomes canônicos que o identificador de colunas tenta localizar
// em cada planilha; o mapeamento (ColumnMapping) é transitório
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    Brand,      // Marca (interna)
    Model,      // Modelo / desenho
    Width,      // Medida (ex.: "185/65")
    Rim,        // Aro
    Price,      // Preço sell-out (coluna âncora)
    Cost,       // Preço sell-in / custo
    Competitor, // Empresa / loja concorrente
    Origin,     // Origem (nacional/importado)
    Date,       // Data de coleta
    Mkp,        // Markup
    Location,   // Cidade ou UF
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CanonicalField::Brand => "brand",
            CanonicalField::Model => "model",
            CanonicalField::Width => "width",
            CanonicalField::Rim => "rim",
            CanonicalField::Price => "price",
            CanonicalField::Cost => "cost",
            CanonicalField::Competitor => "competitor",
            CanonicalField::Origin => "origin",
            CanonicalField::Date => "date",
            CanonicalField::Mkp => "mkp",
            CanonicalField::Location => "location",
        };
        write!(f, "{}", name)
    }
}
