// ==========================================
// TireForce - Camada de API
// ==========================================
// Interfaces de negócio consumidas pelo transporte (fora do escopo)
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod import_api;

pub use dashboard_api::{DashboardApi, PriceRow};
pub use error::{ApiError, ApiResult};
pub use import_api::ImportApi;
