// ==========================================
// 创意制作看板 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 供应商/活动截止日期跟进提醒 (人工处理卡片)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 跟进时间派生 / 紧急度分级 / 每日扫描
pub mod engine;

// 导入层 - 邮件与日期文本
pub mod importer;

// 配置层 - 看板配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CardColor, CardColumn, UrgencyTier};

// 领域实体
pub use domain::{Attachment, Board, Card, CardDraft, CardPatch, ChecklistItem, User};

// 引擎
pub use engine::{
    classify, derive_follow_up, is_past, FollowUpDeriver, FollowUpSweep, UrgencyEngine,
};

// API
pub use api::{ApiError, BoardApi, BoardView, CardApi, CardView};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Creative Board";
