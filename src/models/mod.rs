pub mod category;
pub mod common;
pub mod event;
pub mod transaction;
pub mod user;

pub use category::*;
pub use common::*;
pub use event::*;
pub use transaction::*;
pub use user::*;
