pub mod account_service;
pub mod cost_service;
pub mod dashboard_service;
pub mod department_service;
pub mod income_service;
pub mod labor_rate_service;
pub mod recipe_cost_service;
pub mod recipe_service;
pub mod visibility_service;

pub use account_service::AccountService;
pub use cost_service::CostService;
pub use dashboard_service::DashboardService;
pub use department_service::DepartmentService;
pub use income_service::IncomeService;
pub use labor_rate_service::LaborRateService;
pub use recipe_cost_service::RecipeCostService;
pub use recipe_service::RecipeService;
pub use visibility_service::VisibilityService;

use crate::errors::CostingError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level failures. Authorization is deliberately distinct from
/// validation: ownership and category-selection violations must never be
/// reported as generic invalid input.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Costing(#[from] CostingError),
    #[error("Not authorized: {0}")]
    Authorization(String),
    #[error("{0}")]
    Invalid(String),
}
