// ==========================================
// 创意制作看板 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎,不拼 SQL
// 红线: follow_up / urgency 为纯函数, 当前时刻一律由调用方注入
// ==========================================

pub mod checklist;
pub mod events;
pub mod follow_up;
pub mod sweep;
pub mod urgency;

// 重导出核心引擎
pub use events::{FollowUpEvent, FollowUpNotifier, NoOpNotifier};
pub use follow_up::{derive_follow_up, FollowUpDeriver, EVENT_LEAD_DAYS, SUPPLIER_LEAD_DAYS};
pub use sweep::{next_run_after, FollowUpSweep, SweepReport};
pub use urgency::{classify, is_past, UrgencyEngine};
