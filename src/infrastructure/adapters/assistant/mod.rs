//! Assistant Adapter - AI 助手网关实现

mod gemini_client;
mod scripted_client;

pub use gemini_client::{GeminiAssistantClient, GeminiClientConfig};
pub use scripted_client::{RecordedCall, ScriptedAssistant};
