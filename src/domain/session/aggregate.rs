//! Session Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::SessionError;
use crate::domain::changes::{Change, ChangeLedger};
use crate::domain::conversation::{ChatMessage, ChatMode, Transcript};
use crate::domain::manuscript::Manuscript;

/// 会话唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session 聚合根
///
/// 不变量:
/// - 全部会话状态（手稿、会话记录、变更历史、模式、in_flight）由聚合独占持有
/// - 会话记录与变更历史仅追加，只有 reset 整体清空
/// - in_flight 为 true 期间不得发起新的后端调用
/// - reset 推进 generation，使仍在途的后端结果失效
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    manuscript: Option<Manuscript>,
    transcript: Transcript,
    ledger: ChangeLedger,
    mode: ChatMode,
    in_flight: bool,
    generation: u64,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

impl Session {
    /// 创建空会话（未装载手稿）
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            manuscript: None,
            transcript: Transcript::new(),
            ledger: ChangeLedger::new(),
            mode: ChatMode::Default,
            in_flight: false,
            generation: 0,
            created_at: now,
            last_activity: now,
        }
    }

    // Getters
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn manuscript(&self) -> Option<&Manuscript> {
        self.manuscript.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn ledger(&self) -> &ChangeLedger {
        &self.ledger
    }

    pub fn mode(&self) -> ChatMode {
        self.mode
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    /// 在途结果是否仍属于当前会话代
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// 装载手稿（无条件替换既有手稿），模式回到默认
    pub fn set_manuscript(&mut self, manuscript: Manuscript) {
        self.manuscript = Some(manuscript);
        self.mode = ChatMode::Default;
        self.touch();
    }

    pub fn require_manuscript(&self) -> Result<&Manuscript, SessionError> {
        self.manuscript.as_ref().ok_or(SessionError::NoManuscript)
    }

    /// 是否可以接收新的用户意图
    pub fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.in_flight {
            return Err(SessionError::Busy);
        }
        Ok(())
    }

    /// 标记一次后端调用开始，返回当前代数供完成时校验
    pub fn begin_flight(&mut self) -> Result<u64, SessionError> {
        self.ensure_idle()?;
        self.in_flight = true;
        self.touch();
        Ok(self.generation)
    }

    /// 后端调用结束
    pub fn finish_flight(&mut self) {
        self.in_flight = false;
        self.touch();
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.transcript.push(message);
        self.touch();
    }

    pub fn record_change(&mut self, change: Change) {
        self.ledger.record(change);
        self.touch();
    }

    pub fn set_mode(&mut self, mode: ChatMode) {
        self.mode = mode;
        self.touch();
    }

    /// 重置会话：清空全部状态，推进代数
    ///
    /// 重置后仍在途的后端结果必须被丢弃，不得写入已清空的会话
    pub fn reset(&mut self) {
        self.manuscript = None;
        self.transcript.clear();
        self.ledger.clear();
        self.mode = ChatMode::Default;
        self.in_flight = false;
        self.generation += 1;
        self.touch();
    }

    /// 更新最后活动时间
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::manuscript::FileName;

    fn loaded_session() -> Session {
        let mut session = Session::new();
        let name = FileName::new("книга.txt").unwrap();
        session.set_manuscript(Manuscript::new(name, "Текст рукописи"));
        session
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();

        assert!(session.manuscript().is_none());
        assert!(session.transcript().is_empty());
        assert!(session.ledger().is_empty());
        assert_eq!(session.mode(), ChatMode::Default);
        assert!(!session.is_in_flight());
    }

    #[test]
    fn test_require_manuscript() {
        let session = Session::new();
        assert_eq!(
            session.require_manuscript().unwrap_err(),
            SessionError::NoManuscript
        );

        assert!(loaded_session().require_manuscript().is_ok());
    }

    #[test]
    fn test_begin_flight_rejects_second_call() {
        let mut session = loaded_session();

        let generation = session.begin_flight().unwrap();
        assert_eq!(generation, 0);
        assert_eq!(session.begin_flight().unwrap_err(), SessionError::Busy);

        session.finish_flight();
        assert!(session.begin_flight().is_ok());
    }

    #[test]
    fn test_reset_clears_everything_and_bumps_generation() {
        let mut session = loaded_session();
        session.push_message(ChatMessage::user_text("вопрос"));
        session.record_change(Change::chapter_summary("Глава", "Резюме"));
        session.set_mode(ChatMode::SummaryPicker);
        let generation = session.begin_flight().unwrap();

        session.reset();

        assert!(session.manuscript().is_none());
        assert!(session.transcript().is_empty());
        assert!(session.ledger().is_empty());
        assert_eq!(session.mode(), ChatMode::Default);
        assert!(!session.is_in_flight());
        assert!(!session.is_current(generation));
    }

    #[test]
    fn test_set_manuscript_replaces_and_resets_mode() {
        let mut session = loaded_session();
        session.set_mode(ChatMode::GenrePicker);

        let name = FileName::new("другая.txt").unwrap();
        session.set_manuscript(Manuscript::new(name, "Другой текст"));

        assert_eq!(
            session.require_manuscript().unwrap().file_name().as_str(),
            "другая.txt"
        );
        assert_eq!(session.mode(), ChatMode::Default);
    }
}
