//! Command implementations.

pub mod patterns;
pub mod resolve;
pub mod scrape;
pub mod train;

pub use self::patterns::execute_patterns;
pub use self::resolve::execute_resolve;
pub use self::scrape::execute_scrape;
pub use self::train::execute_train;
