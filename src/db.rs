// ==========================================
// TireForce - Inicialização de conexão SQLite
// ==========================================
// Objetivo:
// - Unificar o comportamento de PRAGMA de todas as Connection::open,
//   evitando "módulo com foreign key ligada / módulo sem"
// - Unificar busy_timeout para reduzir erros busy em escrita concorrente
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// busy_timeout padrão (milissegundos)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Configura os PRAGMA unificados de uma conexão SQLite
///
/// Observação:
/// - foreign_keys precisa ser ligada por conexão
/// - busy_timeout precisa ser configurado por conexão
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Abre uma conexão SQLite já com a configuração unificada
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Cria as tabelas do catálogo e do histórico de preços (idempotente)
///
/// - `products`: catálogo normalizado, identidade pelo `unique_code`
/// - `price_history`: registro de observações, apenas inserção
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id               INTEGER PRIMARY KEY,
            name             TEXT NOT NULL,
            brand            TEXT NOT NULL,
            model            TEXT NOT NULL,
            competitor_brand TEXT,
            width            TEXT NOT NULL,
            profile          TEXT,
            rim              TEXT NOT NULL,
            unique_code      TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS price_history (
            id               INTEGER PRIMARY KEY,
            product_id       INTEGER NOT NULL REFERENCES products(id),
            competitor       TEXT NOT NULL,
            competitor_brand TEXT,
            competitor_model TEXT,
            price            REAL NOT NULL,
            cost             REAL NOT NULL,
            markup           REAL NOT NULL,
            origin           TEXT NOT NULL,
            region           TEXT NOT NULL,
            city             TEXT NOT NULL,
            date_collected   TEXT NOT NULL,
            source           TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_price_history_product
            ON price_history(product_id);
        CREATE INDEX IF NOT EXISTS idx_price_history_date
            ON price_history(date_collected);
        "#,
    )
}
