// ==========================================
// 创意制作看板 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod board;
pub mod card;
pub mod types;

// 重导出核心类型
pub use board::{Board, User, DEFAULT_BOARD_ID};
pub use card::{Attachment, Card, CardDraft, CardPatch, ChecklistItem};
pub use types::{CardColor, CardColumn, UrgencyTier};
