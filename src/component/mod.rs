//! 功能元件模組
//!
//! 每個子模組實現一個獨立的工具，包含主要邏輯和專用工具

pub mod sequence_converter;
pub mod smart_copy;

pub use sequence_converter::SequenceConverter;
pub use smart_copy::SmartCopy;
