pub mod page;
pub mod product;

pub use page::*;
pub use product::*;
