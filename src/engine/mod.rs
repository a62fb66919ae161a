// ==========================================
// TireForce - Camada de motores
// ==========================================
// Regras de negócio puras sobre o domínio: resolução de produto,
// composição de filtros e agregação de estatísticas
// ==========================================

pub mod filter_engine;
pub mod product_resolver;
pub mod stats_engine;

pub use filter_engine::{FilterSpec, PriceFilter};
pub use product_resolver::ProductResolver;
pub use stats_engine::{Stats, StatsEngine};
