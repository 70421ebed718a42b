//! Manuscript Context - 手稿限界上下文
//!
//! 职责:
//! - 手稿文本与显示名的持有
//! - 装载后内容视为不可变输入

mod aggregate;
mod value_objects;

pub use aggregate::Manuscript;
pub use value_objects::FileName;
