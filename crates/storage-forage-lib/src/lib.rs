pub mod data_structures;
pub mod engine;
pub mod error;
pub mod growth;
pub mod pricing;
pub mod registry;

pub use data_structures::{
    CostQuote, LifetimeTotal, PeriodState, ProjectionParameters, ProjectionPoint,
    ProjectionResult, MAX_HORIZON_YEARS,
};
pub use engine::{project, ProjectionEngine};
pub use error::{ForageError, Result};
pub use growth::GrowthSimulator;
pub use pricing::{PlanQuote, PricingProvider};
pub use registry::ProviderRegistry;

pub mod prelude {
    pub use crate::data_structures::{PeriodState, ProjectionParameters, ProjectionResult};
    pub use crate::engine::{project, ProjectionEngine};
    pub use crate::error::{ForageError, Result};
    pub use crate::registry::ProviderRegistry;
}
