pub mod category;
pub mod offer;
