//! Changes Context - 变更历史
//!
//! 仅追加的有序条目序列，核心内部不按类型查询或过滤（那是渲染层的事）

use serde::{Deserialize, Serialize};

use super::change::{Change, ChangeId};

/// 变更历史
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeLedger {
    entries: Vec<Change>,
}

impl ChangeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一条变更（唯一的局部修改操作）
    pub fn record(&mut self, change: Change) {
        self.entries.push(change);
    }

    /// 按插入顺序返回全部条目
    pub fn entries(&self) -> &[Change] {
        &self.entries
    }

    /// 按 ID 查找条目（导出用）
    pub fn find(&self, id: &ChangeId) -> Option<&Change> {
        self.entries.iter().find(|change| change.id() == *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 整体清空（仅在会话重置时调用）
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_insertion_order() {
        let mut ledger = ChangeLedger::new();
        let first = Change::chapter_summary("Глава 1", "Первое резюме");
        let second = Change::annotation("Аннотация к книге", "Текст");
        let first_id = first.id();
        let second_id = second.id();

        ledger.record(first);
        ledger.record(second);

        let ids: Vec<_> = ledger.entries().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![first_id, second_id]);
    }

    #[test]
    fn test_find_by_id() {
        let mut ledger = ChangeLedger::new();
        let change = Change::genres_and_tags(vec!["драма".to_string()]).unwrap();
        let id = change.id();
        ledger.record(change);

        assert!(ledger.find(&id).is_some());
        assert!(ledger.find(&ChangeId::new()).is_none());
    }

    #[test]
    fn test_duplicate_payloads_create_separate_entries() {
        // 重复应用同一结果不做去重，每次应用都追加一条
        let mut ledger = ChangeLedger::new();
        ledger.record(Change::annotation("Аннотация к книге", "Один и тот же текст"));
        ledger.record(Change::annotation("Аннотация к книге", "Один и тот же текст"));

        assert_eq!(ledger.len(), 2);
    }
}
