// ==========================================
// TireForce - Biblioteca principal
// ==========================================
// Inteligência de preços de pneus: ingestão de planilhas de
// comparação de preços de fontes não confiáveis, catálogo
// normalizado de produtos, histórico de preços apenas-inserção e
// consultas com filtros combináveis.
// Stack: Rust + SQLite
// ==========================================

// ==========================================
// Declaração de módulos
// ==========================================

// Camada de domínio - entidades e tipos
pub mod domain;

// Camada de repositório - acesso a dados
pub mod repository;

// Camada de motores - regras de negócio
pub mod engine;

// Camada de importação - dados externos
pub mod importer;

// Camada de configuração - tabelas injetadas
pub mod config;

// Infraestrutura de banco (conexão/PRAGMA/esquema unificados)
pub mod db;

// Sistema de logs
pub mod logging;

// Camada de API - interfaces de negócio
pub mod api;

// ==========================================
// Reexportação dos tipos centrais
// ==========================================

// Tipos de domínio
pub use domain::types::{CanonicalField, Origin, Region};

// Entidades de domínio
pub use domain::{
    ImportSummary, NewProduct, PriceHistoryRecord, PriceObservation, Product, SkipReason,
};

// Motores
pub use engine::{FilterSpec, PriceFilter, ProductResolver, Stats, StatsEngine};

// Importação
pub use importer::{ColumnIdentifier, ColumnMapping, ImportError, PriceImporter, ValueNormalizer};

// Repositórios
pub use repository::{PriceHistoryRepository, ProductRepository, RepositoryError};

// API
pub use api::{ApiError, DashboardApi, ImportApi, PriceRow};

/// Versão do crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
