pub mod product;
pub mod quantity;
pub mod stock;

pub use product::*;
pub use quantity::*;
pub use stock::*;
