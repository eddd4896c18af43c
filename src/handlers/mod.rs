pub mod auth;
pub mod category;
pub mod event;
pub mod health;
pub mod summary;
pub mod transaction;

pub use auth::auth_config;
pub use category::category_config;
pub use event::event_config;
pub use health::health_config;
pub use summary::summary_config;
pub use transaction::transaction_config;
