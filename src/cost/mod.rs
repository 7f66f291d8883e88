//! 차량 보유 비용 계산 모듈 모음.

pub mod affordability;
pub mod breakdown;
pub mod comparison;
pub mod summary;

pub use affordability::*;
pub use breakdown::*;
pub use comparison::*;
pub use summary::*;
