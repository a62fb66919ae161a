// ==========================================
// TireForce - Repositório do histórico de preços
// ==========================================
// Tabela apenas-inserção: nenhum UPDATE/DELETE existe aqui.
// Regra da camada: repositório não contém lógica de negócio.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::price_history::{PriceHistoryRecord, PriceObservation};
use crate::domain::types::Origin;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

/// Formato persistido de timestamps (ordena lexicograficamente)
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_stored_datetime(value: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .map(|dt| Utc.from_utc_datetime(&dt))
        .unwrap_or_else(|_| Utc.timestamp_opt(0, 0).unwrap())
}

// ==========================================
// PriceHistoryRepository
// ==========================================
pub struct PriceHistoryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PriceHistoryRepository {
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
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Insere todos os registros de um arquivo em uma única transação
    ///
    /// # Retorno
    /// - Ok(usize): quantidade inserida
    ///
    /// Atomicidade: ou todas as linhas aceitas do arquivo entram,
    /// ou nenhuma fica visível
    pub fn batch_insert(&self, records: &[PriceHistoryRecord]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for record in records {
            tx.execute(
                r#"
                INSERT INTO price_history (
                    product_id, competitor, competitor_brand, competitor_model,
                    price, cost, markup, origin, region, city, date_collected, source
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                "#,
                params![
                    record.product_id,
                    record.competitor,
                    record.competitor_brand,
                    record.competitor_model,
                    record.price,
                    record.cost,
                    record.markup,
                    record.origin.as_str(),
                    record.region,
                    record.city,
                    record.date_collected.format(DATETIME_FORMAT).to_string(),
                    record.source,
                ],
            )?;
            count += 1;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }

    /// Lista as observações (registro ⋈ produto), coleta mais recente primeiro
    pub fn list_observations(&self) -> RepositoryResult<Vec<PriceObservation>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                h.id, h.product_id, h.competitor, h.competitor_brand, h.competitor_model,
                h.price, h.cost, h.markup, h.origin, h.region, h.city, h.date_collected,
                h.source,
                p.name, p.brand, p.competitor_brand, p.width, p.profile, p.rim
            FROM price_history h
            JOIN products p ON p.id = h.product_id
            ORDER BY h.date_collected DESC, h.id DESC
            "#,
        )?;

        let observations = stmt
            .query_map([], map_observation_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(observations)
    }
}

fn map_observation_row(row: &Row<'_>) -> rusqlite::Result<PriceObservation> {
    Ok(PriceObservation {
        id: row.get(0)?,
        product_id: row.get(1)?,
        competitor: row.get(2)?,
        competitor_brand: row.get(3)?,
        competitor_model: row.get(4)?,
        price: row.get(5)?,
        cost: row.get(6)?,
        markup: row.get(7)?,
        origin: Origin::from_stored(&row.get::<_, String>(8)?),
        region: row.get(9)?,
        city: row.get(10)?,
        date_collected: parse_stored_datetime(&row.get::<_, String>(11)?),
        source: row.get(12)?,
        product_name: row.get(13)?,
        brand: row.get(14)?,
        product_competitor_brand: row.get(15)?,
        width: row.get(16)?,
        profile: row.get(17)?,
        rim: row.get(18)?,
    })
}
