pub mod market;
pub mod swap;

pub use market::*;
pub use swap::*;
