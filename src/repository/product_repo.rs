// ==========================================
// TireForce - Repositório do catálogo de produtos
// ==========================================
// Regra da camada: repositório não contém lógica de negócio;
// toda consulta é parametrizada.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::product::{NewProduct, Product};
use crate::repository::error::RepositoryResult;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// ProductRepository
// ==========================================
pub struct ProductRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductRepository {
    /// Abre o repositório a partir do caminho do banco
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Constrói sobre uma conexão já existente (compartilhada)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| crate::repository::error::RepositoryError::LockError(e.to_string()))
    }

    /// Busca um produto pelo código único
    ///
    /// # Retorno
    /// - Ok(Some(Product)): encontrado
    /// - Ok(None): inexistente
    pub fn find_by_unique_code(&self, unique_code: &str) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, brand, model, competitor_brand, width, profile, rim, unique_code
            FROM products
            WHERE unique_code = ?1
            "#,
        )?;

        let product = stmt
            .query_row(params![unique_code], |row| {
                Ok(Product {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    brand: row.get(2)?,
                    model: row.get(3)?,
                    competitor_brand: row.get(4)?,
                    width: row.get(5)?,
                    profile: row.get(6)?,
                    rim: row.get(7)?,
                    unique_code: row.get(8)?,
                })
            })
            .optional()?;

        Ok(product)
    }

    /// Insere um novo produto e devolve a linha persistida (com id)
    ///
    /// Violação de unicidade em `unique_code` sobe como
    /// `UniqueConstraintViolation`: o chamador decide re-buscar
    pub fn insert(&self, product: NewProduct) -> RepositoryResult<Product> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO products (name, brand, model, competitor_brand, width, profile, rim, unique_code)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                product.name,
                product.brand,
                product.model,
                product.competitor_brand,
                product.width,
                product.profile,
                product.rim,
                product.unique_code,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Ok(Product {
            id,
            name: product.name,
            brand: product.brand,
            model: product.model,
            competitor_brand: product.competitor_brand,
            width: product.width,
            profile: product.profile,
            rim: product.rim,
            unique_code: product.unique_code,
        })
    }
}
