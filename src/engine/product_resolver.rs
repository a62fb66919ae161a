// ==========================================
// TireForce - Resolvedor de produtos
// ==========================================
// Chave determinística do catálogo a partir de marca+modelo+medida
// normalizadas; busca-ou-cria idempotente. A restrição UNIQUE do
// banco é a proteção final contra corridas de criação duplicada:
// violação no insert significa "outro chamador criou primeiro",
// então re-busca em vez de falhar.
// ==========================================

use crate::domain::product::{NewProduct, Product};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::ProductRepository;
use std::sync::Arc;
use tracing::debug;

// ==========================================
// ProductResolver
// ==========================================
pub struct ProductResolver {
    product_repo: Arc<ProductRepository>,
}

impl ProductResolver {
    pub fn new(product_repo: Arc<ProductRepository>) -> Self {
        Self { product_repo }
    }

    /// Código único do catálogo: junção "marca-modelo-medida" com
    /// espaços e barras removidos (barras aparecem dentro de medidas
    /// como "185/65"). Função pura: entradas iguais, código igual.
    pub fn unique_code(brand: &str, model: &str, width: &str) -> String {
        format!("{}-{}-{}", brand, model, width)
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect()
    }

    /// Busca ou cria o produto para (marca, modelo, medida) já normalizadas
    ///
    /// # Retorno
    /// - Ok((Product, true)): produto criado agora
    /// - Ok((Product, false)): produto já existia
    pub fn resolve(
        &self,
        brand: &str,
        model: &str,
        width: &str,
        rim: &str,
        competitor_brand: Option<&str>,
    ) -> RepositoryResult<(Product, bool)> {
        let code = Self::unique_code(brand, model, width);

        if let Some(existing) = self.product_repo.find_by_unique_code(&code)? {
            return Ok((existing, false));
        }

        // Medida "185/65 R14" → largura "185", perfil "65"
        let (width_part, profile) = split_measure(width);

        let candidate = NewProduct {
            name: format!("Pneu {} {} {}", brand, model, width),
            brand: brand.to_string(),
            model: model.to_string(),
            competitor_brand: competitor_brand.map(|v| v.to_string()),
            width: width_part,
            profile,
            rim: rim.to_string(),
            unique_code: code.clone(),
        };

        match self.product_repo.insert(candidate) {
            Ok(product) => {
                debug!(unique_code = %code, "produto criado no catálogo");
                Ok((product, true))
            }
            // Outro chamador criou o mesmo código entre a busca e o insert
            Err(RepositoryError::UniqueConstraintViolation(msg)) => {
                match self.product_repo.find_by_unique_code(&code)? {
                    Some(existing) => Ok((existing, false)),
                    None => Err(RepositoryError::UniqueConstraintViolation(msg)),
                }
            }
            Err(e) => Err(e),
        }
    }
}

/// Separa a medida em largura e perfil ("185/65 R14" → "185", "65")
fn split_measure(measure: &str) -> (String, String) {
    match measure.split_once('/') {
        Some((width, rest)) => {
            let profile = rest.split_whitespace().next().unwrap_or("").to_string();
            (width.to_string(), profile)
        }
        None => (measure.to_string(), String::new()),
    }
}
