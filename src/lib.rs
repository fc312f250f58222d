pub mod access;
pub mod conversion;
pub mod expression;
pub mod plan;
