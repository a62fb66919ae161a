// ==========================================
// TireForce - Catálogo de produtos
// ==========================================
// Identidade do catálogo: unique_code, função pura de
// (marca normalizada, modelo normalizado, medida normalizada).
// Criado preguiçosamente na primeira observação de preço; nunca removido.
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Product - Entrada do catálogo
// ==========================================
// Campos descritivos apenas; campos de preço vivem em PriceHistoryRecord
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,                          // rowid do SQLite
    pub name: String,                     // Nome de exibição ("Pneu MARCA MODELO 185/65")
    pub brand: String,                    // Marca interna (normalizada)
    pub model: String,                    // Modelo interno (normalizado)
    pub competitor_brand: Option<String>, // Marca do concorrente (primeira vista, informativa)
    pub width: String,                    // Largura (parte antes da barra da medida)
    pub profile: String,                  // Perfil (parte depois da barra; vazio se ausente)
    pub rim: String,                      // Aro canônico
    pub unique_code: String,              // Chave determinística (UNIQUE)
}

// ==========================================
// NewProduct - Produto ainda sem id
// ==========================================
// Produzido pelo ProductResolver, persistido pelo ProductRepository
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub competitor_brand: Option<String>,
    pub width: String,
    pub profile: String,
    pub rim: String,
    pub unique_code: String,
}
