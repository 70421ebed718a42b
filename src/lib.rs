//! Lektor - AI 文学助手服务
//!
//! 作者上传手稿后与 AI 后端对话：自由问答、生成体裁/标签候选、
//! 按场景描述生成章节摘要、生成并迭代润色图书简介；被用户应用的
//! 结果记入可导出的变更历史。
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Conversation Context: 消息模型、会话记录、交互模式
//! - Changes Context: 变更条目与变更历史
//! - Manuscript Context: 手稿持有
//! - Session Context: 会话聚合、单飞门控、重置语义
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Assistant、SessionStore）
//! - Commands: CQRS 命令处理器（会话控制器 + 模式控制器）
//! - Queries: CQRS 查询处理器
//! - Replies: 写入会话记录的固定话术
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: SessionStore 内存实现
//! - Adapters: Gemini 客户端 + 脚本化测试替身

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
