//! Session Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("会话尚未装载手稿")]
    NoManuscript,

    #[error("会话已有后端调用处理中")]
    Busy,
}
