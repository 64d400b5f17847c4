pub mod color;
pub mod dataset;
pub mod explorer;
pub mod export;
pub mod projection;
pub mod query;
