pub mod backdate;
pub mod jwt;

pub use backdate::backdate;
pub use jwt::*;
