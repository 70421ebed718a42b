//! Conversation Context - 交互模式
//!
//! 同一时刻只有一个模式处于激活状态，它决定自由文本输入被路由到
//! 哪个后端操作

use serde::{Deserialize, Serialize};

/// 交互模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// 自由问答
    #[default]
    Default,
    /// 体裁/标签挑选
    GenrePicker,
    /// 章节摘要定位
    SummaryPicker,
    /// 简介生成与润色
    AnnotationPicker,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::GenrePicker => "genre_picker",
            Self::SummaryPicker => "summary_picker",
            Self::AnnotationPicker => "annotation_picker",
        }
    }
}

impl std::fmt::Display for ChatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
