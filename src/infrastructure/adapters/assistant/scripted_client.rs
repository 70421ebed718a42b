//! Scripted Assistant Client - 用于测试的脚本化助手
//!
//! 按队列返回预设结果并记录每次调用，不访问任何外部服务。
//! 状态机测试用它断言"哪个模式路由到了哪个后端操作"

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{
    AnnotationRefinement, AssistantError, AssistantPort, SceneSummary,
};

/// 记录的调用（操作 + 关键参数）
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Analyze {
        question: String,
    },
    GenerateGenres,
    GenerateSummary {
        description: String,
    },
    GenerateAnnotation {
        previous_annotation: Option<String>,
        feedback: Option<String>,
    },
}

/// 脚本化助手
#[derive(Default)]
pub struct ScriptedAssistant {
    delay: Option<Duration>,
    analyze_replies: Mutex<VecDeque<Result<String, AssistantError>>>,
    genre_replies: Mutex<VecDeque<Result<Vec<String>, AssistantError>>>,
    summary_replies: Mutex<VecDeque<Result<SceneSummary, AssistantError>>>,
    annotation_replies: Mutex<VecDeque<Result<String, AssistantError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedAssistant {
    pub fn new() -> Self {
        Self::default()
    }

    /// 给每次调用加一段人工延迟（过期结果丢弃的测试需要）
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn enqueue_analyze(&self, reply: Result<String, AssistantError>) {
        lock(&self.analyze_replies).push_back(reply);
    }

    pub fn enqueue_genres(&self, reply: Result<Vec<String>, AssistantError>) {
        lock(&self.genre_replies).push_back(reply);
    }

    pub fn enqueue_summary(&self, reply: Result<SceneSummary, AssistantError>) {
        lock(&self.summary_replies).push_back(reply);
    }

    pub fn enqueue_annotation(&self, reply: Result<String, AssistantError>) {
        lock(&self.annotation_replies).push_back(reply);
    }

    /// 到目前为止记录的全部调用
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: RecordedCall) {
        lock(&self.calls).push(call);
    }

    async fn simulate_latency(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn next_reply<T>(queue: &Mutex<VecDeque<Result<T, AssistantError>>>) -> Result<T, AssistantError> {
    lock(queue)
        .pop_front()
        .unwrap_or_else(|| Err(AssistantError::ServiceError("No scripted reply".to_string())))
}

#[async_trait]
impl AssistantPort for ScriptedAssistant {
    async fn analyze(&self, _manuscript: &str, question: &str) -> Result<String, AssistantError> {
        self.record(RecordedCall::Analyze {
            question: question.to_string(),
        });
        self.simulate_latency().await;
        next_reply(&self.analyze_replies)
    }

    async fn generate_genres_and_tags(
        &self,
        _manuscript: &str,
    ) -> Result<Vec<String>, AssistantError> {
        self.record(RecordedCall::GenerateGenres);
        self.simulate_latency().await;
        next_reply(&self.genre_replies)
    }

    async fn generate_chapter_summary(
        &self,
        _manuscript: &str,
        description: &str,
    ) -> Result<SceneSummary, AssistantError> {
        self.record(RecordedCall::GenerateSummary {
            description: description.to_string(),
        });
        self.simulate_latency().await;
        next_reply(&self.summary_replies)
    }

    async fn generate_annotation(
        &self,
        _manuscript: &str,
        refinement: Option<AnnotationRefinement>,
    ) -> Result<String, AssistantError> {
        self.record(RecordedCall::GenerateAnnotation {
            previous_annotation: refinement
                .as_ref()
                .and_then(|r| r.previous_annotation.clone()),
            feedback: refinement.map(|r| r.feedback),
        });
        self.simulate_latency().await;
        next_reply(&self.annotation_replies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_are_consumed_in_order() {
        let assistant = ScriptedAssistant::new();
        assistant.enqueue_analyze(Ok("первый".to_string()));
        assistant.enqueue_analyze(Ok("второй".to_string()));

        assert_eq!(assistant.analyze("книга", "вопрос").await.unwrap(), "первый");
        assert_eq!(assistant.analyze("книга", "вопрос").await.unwrap(), "второй");
    }

    #[tokio::test]
    async fn test_exhausted_queue_yields_error() {
        let assistant = ScriptedAssistant::new();
        assert!(assistant.generate_genres_and_tags("книга").await.is_err());
    }

    #[tokio::test]
    async fn test_calls_are_recorded_with_arguments() {
        let assistant = ScriptedAssistant::new();
        assistant.enqueue_annotation(Ok("аннотация".to_string()));

        assistant
            .generate_annotation(
                "книга",
                Some(AnnotationRefinement {
                    previous_annotation: Some("старая".to_string()),
                    feedback: "короче".to_string(),
                }),
            )
            .await
            .unwrap();

        assert_eq!(
            assistant.calls(),
            vec![RecordedCall::GenerateAnnotation {
                previous_annotation: Some("старая".to_string()),
                feedback: Some("короче".to_string()),
            }]
        );
    }
}
