pub mod aggregation_service;
pub mod auth_service;
pub mod category_service;
pub mod event_service;
pub mod ledger_service;
pub mod user_service;

pub use aggregation_service::*;
pub use auth_service::*;
pub use category_service::*;
pub use event_service::*;
pub use ledger_service::*;
pub use user_service::*;
