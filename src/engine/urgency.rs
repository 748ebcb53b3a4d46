// ==========================================
// 创意制作看板 - 紧急等级判定引擎
// ==========================================
// 职责: 由跟进时间 + 当前时刻判定紧急等级
// 输入: follow_up_at (可缺失), now (外部注入)
// 输出: UrgencyTier (不落库, 每次渲染重新计算)
// 红线: 不读取系统时钟; 过期判定必须先于时长判定
// ==========================================

use crate::domain::card::Card;
use crate::domain::types::UrgencyTier;
use chrono::{DateTime, Duration, Utc};

/// 超过该时长为 Comfortable
pub const COMFORTABLE_AFTER_HOURS: i64 = 72;

/// 不足该时长为 Urgent
pub const URGENT_WITHIN_HOURS: i64 = 24;

/// 判定紧急等级
///
/// 规则（顺序执行，命中即返回）:
/// 1) follow_up 缺失 → Unset
/// 2) follow_up < now → Overdue
/// 3) |now - follow_up| > 72h → Comfortable
/// 4) 24h ≤ |now - follow_up| ≤ 72h → Soon
/// 5) 其他 (< 24h 且未过期) → Urgent
///
/// 第3步使用绝对差, 已过期的时刻必须被第2步拦截
pub fn classify(follow_up: Option<DateTime<Utc>>, now: DateTime<Utc>) -> UrgencyTier {
    let follow_up = match follow_up {
        Some(f) => f,
        None => return UrgencyTier::Unset,
    };

    if follow_up < now {
        return UrgencyTier::Overdue;
    }

    let until = (now - follow_up).abs();

    if until > Duration::hours(COMFORTABLE_AFTER_HOURS) {
        UrgencyTier::Comfortable
    } else if until >= Duration::hours(URGENT_WITHIN_HOURS) {
        UrgencyTier::Soon
    } else {
        UrgencyTier::Urgent
    }
}

/// 单字段过期判定
///
/// 缺失永不过期; 否则 instant < now
pub fn is_past(instant: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    matches!(instant, Some(i) if i < now)
}

// ==========================================
// UrgencyEngine - 紧急等级判定引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct UrgencyEngine;

impl UrgencyEngine {
    /// 创建新的紧急等级判定引擎
    pub fn new() -> Self {
        Self
    }

    /// 单卡判定
    pub fn evaluate(&self, card: &Card, now: DateTime<Utc>) -> UrgencyTier {
        classify(card.follow_up_at, now)
    }
}
