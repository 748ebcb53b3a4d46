// ==========================================
// 创意制作看板 - 跟进提醒事件
// ==========================================
// 职责: 定义跟进提醒通知 trait，实现依赖倒置
// 说明: Engine 层定义 trait，投递渠道 (邮件/推送) 在外部实现
// ==========================================

use crate::domain::types::UrgencyTier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;

// ==========================================
// 跟进提醒事件
// ==========================================

/// 跟进提醒事件
///
/// 每日扫描发现 Urgent / Overdue 卡片时产生
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpEvent {
    pub card_id: String,
    pub title: String,
    pub assignee_user_id: Option<String>,
    pub tier: UrgencyTier,
    pub follow_up_at: DateTime<Utc>,
    /// 扫描时刻
    pub triggered_at: DateTime<Utc>,
}

// ==========================================
// 通知 Trait
// ==========================================

/// 跟进提醒通知者
///
/// # 实现说明
/// - 投递失败返回 Err, 由扫描器记录后继续处理下一张卡片
pub trait FollowUpNotifier: Send + Sync {
    fn notify(&self, event: &FollowUpEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作通知者
///
/// 当前未接入任何投递渠道, 仅记录日志
#[derive(Debug, Clone, Default)]
pub struct NoOpNotifier;

impl FollowUpNotifier for NoOpNotifier {
    fn notify(&self, event: &FollowUpEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            "NoOpNotifier: 跳过跟进提醒 - card_id={}, tier={}",
            event.card_id,
            event.tier
        );
        Ok(())
    }
}

impl<T: FollowUpNotifier + ?Sized> FollowUpNotifier for Arc<T> {
    fn notify(&self, event: &FollowUpEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        (**self).notify(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event() -> FollowUpEvent {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        FollowUpEvent {
            card_id: "C001".to_string(),
            title: "Banner feira".to_string(),
            assignee_user_id: None,
            tier: UrgencyTier::Overdue,
            follow_up_at: at,
            triggered_at: at,
        }
    }

    #[test]
    fn test_noop_notifier() {
        assert!(NoOpNotifier.notify(&event()).is_ok());
    }

    #[test]
    fn test_arc_dyn_notifier() {
        let notifier: Arc<dyn FollowUpNotifier> = Arc::new(NoOpNotifier);
        assert!(notifier.notify(&event()).is_ok());
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(event()).unwrap();
        assert_eq!(json["tier"], "OVERDUE");
        assert_eq!(json["card_id"], "C001");
    }
}
