//! Manuscript Context - Aggregate Root

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::FileName;

/// Manuscript 聚合根
///
/// 不变量:
/// - 装载后文本内容不可变，所有后端调用共享同一份只读文本
/// - 替换是整体替换，不存在局部修改
#[derive(Debug, Clone)]
pub struct Manuscript {
    file_name: FileName,
    content: Arc<str>,
    loaded_at: DateTime<Utc>,
}

impl Manuscript {
    pub fn new(file_name: FileName, content: impl Into<Arc<str>>) -> Self {
        Self {
            file_name,
            content: content.into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn file_name(&self) -> &FileName {
        &self.file_name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// 文本的共享句柄（后端调用期间不持有会话锁）
    pub fn content_handle(&self) -> Arc<str> {
        self.content.clone()
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}
