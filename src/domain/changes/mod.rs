//! Changes Context - 变更限界上下文
//!
//! 职责:
//! - 变更条目变体（体裁集合 / 章节摘要 / 图书简介）
//! - 仅追加的变更历史

mod change;
mod ledger;

pub use change::{Change, ChangeError, ChangeId};
pub use ledger::ChangeLedger;
