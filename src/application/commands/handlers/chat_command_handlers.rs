//! Chat Command Handlers - 会话交互编排
//!
//! 模式控制器 + 会话控制器：决定一条用户意图被路由到哪个后端操作、
//! 如何解释其结果（成功 / 需要澄清 / 失败），以及结果如何落到会话
//! 记录与变更历史上。
//!
//! 每次带后端调用的交互分三步:
//! 1. 准入（锁内）：校验手稿与 in_flight，写入用户消息，记下会话代数
//! 2. 后端调用（锁外 await）
//! 3. 落账（锁内）：校验代数未变后写入结果；会话在途中被重置则整体丢弃

use std::sync::Arc;

use crate::application::commands::chat_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AnnotationRefinement, AssistantPort, SceneSummary, SessionHandle, SessionStorePort,
};
use crate::application::replies;
use crate::domain::changes::Change;
use crate::domain::conversation::{ChatMessage, ChatMode};
use crate::domain::session::SessionId;

/// 准入结果：锁内登记完用户意图后，后端调用所需的全部输入
struct Admission {
    generation: u64,
    mode: ChatMode,
    manuscript: Arc<str>,
    previous_annotation: Option<String>,
    user_messages: Vec<ChatMessage>,
}

/// 一次后端交互的解释结果
struct ExchangeOutcome {
    messages: Vec<ChatMessage>,
    change: Option<Change>,
    next_mode: Option<ChatMode>,
}

impl ExchangeOutcome {
    /// 只追加一条 AI 消息
    fn reply(message: ChatMessage) -> Self {
        Self {
            messages: vec![message],
            change: None,
            next_mode: None,
        }
    }

    /// 什么都不追加（失败被静默吞掉的分支）
    fn silent() -> Self {
        Self {
            messages: Vec::new(),
            change: None,
            next_mode: None,
        }
    }
}

fn get_session(
    sessions: &dyn SessionStorePort,
    id: &SessionId,
) -> Result<SessionHandle, ApplicationError> {
    sessions.get(id).map_err(ApplicationError::from)
}

/// 锁内准入：校验手稿与单飞门控，写入用户侧消息并切换模式
fn admit(
    handle: &SessionHandle,
    session_id: &SessionId,
    user_messages: Vec<ChatMessage>,
    switch_mode: Option<ChatMode>,
) -> Result<Admission, ApplicationError> {
    handle.with(|session| {
        let manuscript = session
            .require_manuscript()
            .map_err(|e| ApplicationError::from_session(session_id, e))?
            .content_handle();
        let previous_annotation = session
            .transcript()
            .last_annotation_text()
            .map(str::to_owned);
        let generation = session
            .begin_flight()
            .map_err(|e| ApplicationError::from_session(session_id, e))?;
        for message in &user_messages {
            session.push_message(message.clone());
        }
        if let Some(mode) = switch_mode {
            session.set_mode(mode);
        }
        Ok(Admission {
            generation,
            mode: session.mode(),
            manuscript,
            previous_annotation,
            user_messages,
        })
    })
}

/// 锁内落账：代数未变才允许写入，过期结果直接丢弃
fn settle(
    handle: &SessionHandle,
    session_id: &SessionId,
    admission: Admission,
    outcome: ExchangeOutcome,
) -> Result<ChatExchangeResponse, ApplicationError> {
    handle.with(|session| {
        if !session.is_current(admission.generation) {
            tracing::warn!(
                session_id = %session_id,
                "Discarding stale assistant result after session reset"
            );
            return Err(ApplicationError::invalid_state(
                "session was reset while the request was in flight",
            ));
        }

        session.finish_flight();

        let mut messages = admission.user_messages;
        for message in outcome.messages {
            session.push_message(message.clone());
            messages.push(message);
        }

        let change_added = match outcome.change {
            Some(change) => {
                session.record_change(change);
                true
            }
            None => false,
        };

        if let Some(mode) = outcome.next_mode {
            session.set_mode(mode);
        }

        Ok(ChatExchangeResponse {
            session_id: *session_id,
            mode: session.mode(),
            messages,
            change_added,
        })
    })
}

// ============================================================================
// SendMessage
// ============================================================================

/// SendMessage Handler - 自由文本路由
pub struct SendMessageHandler {
    sessions: Arc<dyn SessionStorePort>,
    assistant: Arc<dyn AssistantPort>,
}

impl SendMessageHandler {
    pub fn new(sessions: Arc<dyn SessionStorePort>, assistant: Arc<dyn AssistantPort>) -> Self {
        Self {
            sessions,
            assistant,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<ChatExchangeResponse, ApplicationError> {
        let handle = get_session(self.sessions.as_ref(), &cmd.session_id)?;

        let admission = admit(
            &handle,
            &cmd.session_id,
            vec![ChatMessage::user_text(cmd.text.clone())],
            None,
        )?;

        tracing::debug!(
            session_id = %cmd.session_id,
            mode = %admission.mode,
            "Routing free-text input"
        );

        let outcome = match admission.mode {
            ChatMode::SummaryPicker => self.summarize_scene(&admission.manuscript, &cmd.text).await,
            ChatMode::AnnotationPicker => self.refine_annotation(&admission, &cmd.text).await,
            ChatMode::Default | ChatMode::GenrePicker => {
                self.answer_question(&admission.manuscript, &cmd.text).await
            }
        };

        settle(&handle, &cmd.session_id, admission, outcome)
    }

    /// 默认模式：自由问答
    async fn answer_question(&self, manuscript: &str, question: &str) -> ExchangeOutcome {
        match self.assistant.analyze(manuscript, question).await {
            Ok(answer) => ExchangeOutcome::reply(ChatMessage::ai_text(answer)),
            Err(err) => {
                tracing::warn!(error = %err, "Analysis request failed");
                ExchangeOutcome::reply(ChatMessage::ai_text(replies::GENERIC_FAILURE))
            }
        }
    }

    /// 简介模式：输入文本作为润色反馈，上一版简介从会话记录回传
    async fn refine_annotation(&self, admission: &Admission, feedback: &str) -> ExchangeOutcome {
        let refinement = AnnotationRefinement {
            previous_annotation: admission.previous_annotation.clone(),
            feedback: feedback.to_owned(),
        };
        match self
            .assistant
            .generate_annotation(&admission.manuscript, Some(refinement))
            .await
        {
            Ok(text) => ExchangeOutcome::reply(ChatMessage::annotation(text)),
            Err(err) => {
                tracing::warn!(error = %err, "Annotation refinement failed");
                ExchangeOutcome::reply(ChatMessage::ai_text(replies::GENERIC_FAILURE))
            }
        }
    }

    /// 摘要模式：输入文本作为场景描述
    async fn summarize_scene(&self, manuscript: &str, description: &str) -> ExchangeOutcome {
        match self
            .assistant
            .generate_chapter_summary(manuscript, description)
            .await
        {
            Ok(SceneSummary::Found { title, summary }) => ExchangeOutcome {
                messages: vec![ChatMessage::ai_text(replies::summary_recorded(&title))],
                change: Some(Change::chapter_summary(title, summary)),
                next_mode: Some(ChatMode::Default),
            },
            // 找不到场景不是错误：带回反问并停留在摘要模式
            Ok(SceneSummary::NeedsClarification { question }) => {
                ExchangeOutcome::reply(ChatMessage::ai_text(question.unwrap_or_else(|| {
                    replies::SUMMARY_CLARIFICATION_FALLBACK.to_string()
                })))
            }
            Err(err) => {
                tracing::warn!(error = %err, "Chapter summary request failed");
                ExchangeOutcome::reply(ChatMessage::ai_text(replies::SUMMARY_FAILURE))
            }
        }
    }
}

// ============================================================================
// SelectMode
// ============================================================================

/// SelectMode Handler - 交互模式切换
pub struct SelectModeHandler {
    sessions: Arc<dyn SessionStorePort>,
    assistant: Arc<dyn AssistantPort>,
}

impl SelectModeHandler {
    pub fn new(sessions: Arc<dyn SessionStorePort>, assistant: Arc<dyn AssistantPort>) -> Self {
        Self {
            sessions,
            assistant,
        }
    }

    pub async fn handle(
        &self,
        cmd: SelectModeCommand,
    ) -> Result<ChatExchangeResponse, ApplicationError> {
        let handle = get_session(self.sessions.as_ref(), &cmd.session_id)?;

        match cmd.mode {
            ChatMode::Default => self.switch_to_default(&handle, &cmd.session_id),
            ChatMode::SummaryPicker => self.enter_summary_picker(&handle, &cmd.session_id),
            ChatMode::GenrePicker => self.enter_genre_picker(&handle, &cmd.session_id).await,
            ChatMode::AnnotationPicker => {
                self.enter_annotation_picker(&handle, &cmd.session_id).await
            }
        }
    }

    /// 回到默认模式：纯切换，不写任何消息
    fn switch_to_default(
        &self,
        handle: &SessionHandle,
        session_id: &SessionId,
    ) -> Result<ChatExchangeResponse, ApplicationError> {
        handle.with(|session| {
            session
                .require_manuscript()
                .map_err(|e| ApplicationError::from_session(session_id, e))?;
            session
                .ensure_idle()
                .map_err(|e| ApplicationError::from_session(session_id, e))?;
            session.set_mode(ChatMode::Default);
            Ok(ChatExchangeResponse {
                session_id: *session_id,
                mode: ChatMode::Default,
                messages: Vec::new(),
                change_added: false,
            })
        })
    }

    /// 进入摘要模式：写入意图消息和固定的场景描述提示，不调用后端
    fn enter_summary_picker(
        &self,
        handle: &SessionHandle,
        session_id: &SessionId,
    ) -> Result<ChatExchangeResponse, ApplicationError> {
        handle.with(|session| {
            session
                .require_manuscript()
                .map_err(|e| ApplicationError::from_session(session_id, e))?;
            session
                .ensure_idle()
                .map_err(|e| ApplicationError::from_session(session_id, e))?;

            let request = ChatMessage::user_text(replies::SUMMARY_MODE_REQUEST);
            let prompt = ChatMessage::ai_text(replies::SUMMARY_SCENE_PROMPT);
            session.push_message(request.clone());
            session.push_message(prompt.clone());
            session.set_mode(ChatMode::SummaryPicker);

            Ok(ChatExchangeResponse {
                session_id: *session_id,
                mode: ChatMode::SummaryPicker,
                messages: vec![request, prompt],
                change_added: false,
            })
        })
    }

    /// 进入体裁模式：立即请求候选列表
    async fn enter_genre_picker(
        &self,
        handle: &SessionHandle,
        session_id: &SessionId,
    ) -> Result<ChatExchangeResponse, ApplicationError> {
        let admission = admit(
            handle,
            session_id,
            vec![ChatMessage::user_text(replies::GENRE_MODE_REQUEST)],
            Some(ChatMode::GenrePicker),
        )?;

        let outcome = match self
            .assistant
            .generate_genres_and_tags(&admission.manuscript)
            .await
        {
            Ok(items) => {
                tracing::info!(session_id = %session_id, count = items.len(), "Genre candidates generated");
                ExchangeOutcome::reply(ChatMessage::genre_slider(items))
            }
            Err(err) => {
                tracing::warn!(error = %err, "Genre generation failed");
                ExchangeOutcome::reply(ChatMessage::ai_text(replies::GENERIC_FAILURE))
            }
        };

        settle(handle, session_id, admission, outcome)
    }

    /// 进入简介模式：立即生成第一版简介；失败静默（不追加 AI 消息）
    async fn enter_annotation_picker(
        &self,
        handle: &SessionHandle,
        session_id: &SessionId,
    ) -> Result<ChatExchangeResponse, ApplicationError> {
        let admission = admit(
            handle,
            session_id,
            vec![ChatMessage::user_text(replies::ANNOTATION_MODE_REQUEST)],
            Some(ChatMode::AnnotationPicker),
        )?;

        let outcome = match self
            .assistant
            .generate_annotation(&admission.manuscript, None)
            .await
        {
            Ok(text) => ExchangeOutcome::reply(ChatMessage::annotation(text)),
            Err(err) => {
                tracing::warn!(error = %err, "Initial annotation generation failed");
                ExchangeOutcome::silent()
            }
        };

        settle(handle, session_id, admission, outcome)
    }
}

// ============================================================================
// ApplyGenres
// ============================================================================

/// ApplyGenres Handler - 应用体裁/标签选择
///
/// 空选择是合法输入：不产生变更条目，但给出专门的完成文案；
/// 两种情况都回到默认模式
pub struct ApplyGenresHandler {
    sessions: Arc<dyn SessionStorePort>,
}

impl ApplyGenresHandler {
    pub fn new(sessions: Arc<dyn SessionStorePort>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        cmd: ApplyGenresCommand,
    ) -> Result<ChatExchangeResponse, ApplicationError> {
        let handle = get_session(self.sessions.as_ref(), &cmd.session_id)?;

        handle.with(|session| {
            session
                .require_manuscript()
                .map_err(|e| ApplicationError::from_session(&cmd.session_id, e))?;
            session
                .ensure_idle()
                .map_err(|e| ApplicationError::from_session(&cmd.session_id, e))?;

            let change_added = if cmd.items.is_empty() {
                false
            } else {
                let change = Change::genres_and_tags(cmd.items.clone())
                    .map_err(|e| ApplicationError::validation(e.to_string()))?;
                session.record_change(change);
                true
            };

            let text = if change_added {
                replies::GENRES_APPLIED
            } else {
                replies::GENRES_EMPTY_SELECTION
            };
            let confirmation = ChatMessage::ai_text(text);
            session.push_message(confirmation.clone());
            session.set_mode(ChatMode::Default);

            tracing::info!(
                session_id = %cmd.session_id,
                selected = cmd.items.len(),
                "Genre selection applied"
            );

            Ok(ChatExchangeResponse {
                session_id: cmd.session_id,
                mode: ChatMode::Default,
                messages: vec![confirmation],
                change_added,
            })
        })
    }
}

// ============================================================================
// ApplyAnnotation
// ============================================================================

/// ApplyAnnotation Handler - 应用简介文稿
pub struct ApplyAnnotationHandler {
    sessions: Arc<dyn SessionStorePort>,
}

impl ApplyAnnotationHandler {
    pub fn new(sessions: Arc<dyn SessionStorePort>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        cmd: ApplyAnnotationCommand,
    ) -> Result<ChatExchangeResponse, ApplicationError> {
        if cmd.annotation.trim().is_empty() {
            return Err(ApplicationError::validation("Annotation text is empty"));
        }

        let handle = get_session(self.sessions.as_ref(), &cmd.session_id)?;

        handle.with(|session| {
            session
                .require_manuscript()
                .map_err(|e| ApplicationError::from_session(&cmd.session_id, e))?;
            session
                .ensure_idle()
                .map_err(|e| ApplicationError::from_session(&cmd.session_id, e))?;

            let change = Change::annotation(replies::ANNOTATION_TITLE, cmd.annotation.clone());
            session.record_change(change);

            let confirmation = ChatMessage::ai_text(replies::ANNOTATION_APPLIED);
            session.push_message(confirmation.clone());
            session.set_mode(ChatMode::Default);

            tracing::info!(session_id = %cmd.session_id, "Annotation applied");

            Ok(ChatExchangeResponse {
                session_id: cmd.session_id,
                mode: ChatMode::Default,
                messages: vec![confirmation],
                change_added: true,
            })
        })
    }
}
