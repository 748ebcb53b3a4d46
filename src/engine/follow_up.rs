// ==========================================
// 创意制作看板 - 跟进时间派生引擎
// ==========================================
// 职责: 由 供应商截止 + 活动时间 派生唯一的跟进时间
// 输入: supplier_deadline, event_date (均可缺失)
// 输出: follow_up_at (可缺失)
// 红线: 纯函数, 不读取系统时钟, 不写日志
// ==========================================

use crate::domain::card::Card;
use chrono::{DateTime, Duration, Utc};

/// 供应商截止前提前跟进的天数 (按 24h 计, 非工作日)
pub const SUPPLIER_LEAD_DAYS: i64 = 2;

/// 活动时间前提前跟进的天数 (按 24h 计, 非工作日)
pub const EVENT_LEAD_DAYS: i64 = 5;

/// 派生跟进时间
///
/// 规则:
/// 1) 两者都缺失 → None
/// 2) 仅有供应商截止 → supplier_deadline - 2d
/// 3) 仅有活动时间 → event_date - 5d
/// 4) 两者都有 → 两个候选中较早者 (相等时即该时刻)
pub fn derive_follow_up(
    supplier_deadline: Option<DateTime<Utc>>,
    event_date: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    let supplier_candidate = supplier_deadline.map(|d| d - Duration::days(SUPPLIER_LEAD_DAYS));
    let event_candidate = event_date.map(|d| d - Duration::days(EVENT_LEAD_DAYS));

    match (supplier_candidate, event_candidate) {
        (Some(s), Some(e)) => Some(s.min(e)),
        (s, e) => s.or(e),
    }
}

// ==========================================
// FollowUpDeriver - 跟进时间派生引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct FollowUpDeriver;

impl FollowUpDeriver {
    pub fn new() -> Self {
        Self
    }

    /// 派生跟进时间
    pub fn derive(
        &self,
        supplier_deadline: Option<DateTime<Utc>>,
        event_date: Option<DateTime<Utc>>,
    ) -> Option<DateTime<Utc>> {
        derive_follow_up(supplier_deadline, event_date)
    }

    /// 按卡片当前的两个截止字段重算 follow_up_at
    ///
    /// 返回: 派生值是否发生变化
    pub fn refresh(&self, card: &mut Card) -> bool {
        let derived = self.derive(card.supplier_deadline, card.event_date);
        let changed = card.follow_up_at != derived;
        card.follow_up_at = derived;
        changed
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    // ==========================================
    // 第一部分：单字段 / 缺失
    // ==========================================

    #[test]
    fn test_both_absent() {
        assert_eq!(derive_follow_up(None, None), None);
    }

    #[test]
    fn test_supplier_only() {
        let d = at(2024, 6, 10, 10);
        assert_eq!(derive_follow_up(Some(d), None), Some(at(2024, 6, 8, 10)));
    }

    #[test]
    fn test_event_only() {
        let e = at(2024, 6, 20, 10);
        assert_eq!(derive_follow_up(None, Some(e)), Some(at(2024, 6, 15, 10)));
    }

    // ==========================================
    // 第二部分：两者都有 → 取较早者
    // ==========================================

    #[test]
    fn test_both_supplier_wins() {
        // 候选: 06-08T10:00 与 06-15T10:00
        let result = derive_follow_up(Some(at(2024, 6, 10, 10)), Some(at(2024, 6, 20, 10)));
        assert_eq!(result, Some(at(2024, 6, 8, 10)));
    }

    #[test]
    fn test_both_event_wins() {
        // 活动很近, 供应商截止很远: 候选 06-05T09:00 与 06-28T18:00
        let result = derive_follow_up(Some(at(2024, 6, 30, 18)), Some(at(2024, 6, 10, 9)));
        assert_eq!(result, Some(at(2024, 6, 5, 9)));
    }

    #[test]
    fn test_equal_candidates() {
        // supplier - 2d == event - 5d
        let supplier = at(2024, 6, 12, 0);
        let event = at(2024, 6, 15, 0);
        assert_eq!(derive_follow_up(Some(supplier), Some(event)), Some(at(2024, 6, 10, 0)));
    }

    #[test]
    fn test_event_before_supplier_no_ordering_assumed() {
        // 活动早于供应商截止 (不合理但允许)
        let result = derive_follow_up(Some(at(2024, 7, 1, 0)), Some(at(2024, 6, 1, 0)));
        assert_eq!(result, Some(at(2024, 5, 27, 0)));
    }

    // ==========================================
    // 第三部分：边界 / 性质
    // ==========================================

    #[test]
    fn test_fixed_24h_blocks_across_month_and_year() {
        // 按 24h 计, 跨月/跨年不做日历修正
        assert_eq!(
            derive_follow_up(Some(at(2024, 3, 1, 6)), None),
            Some(at(2024, 2, 28, 6))
        );
        assert_eq!(
            derive_follow_up(None, Some(at(2025, 1, 3, 12))),
            Some(at(2024, 12, 29, 12))
        );
    }

    #[test]
    fn test_keeps_sub_second_precision() {
        let d = at(2024, 6, 10, 10) + Duration::milliseconds(1234);
        let result = derive_follow_up(Some(d), None).unwrap();
        assert_eq!(d - result, Duration::days(SUPPLIER_LEAD_DAYS));
    }

    #[test]
    fn test_idempotent() {
        let d = Some(at(2024, 6, 10, 10));
        let e = Some(at(2024, 6, 12, 10));
        assert_eq!(derive_follow_up(d, e), derive_follow_up(d, e));
    }

    #[test]
    fn test_min_selection_over_grid() {
        // derive(D, E) == min(D - 2d, E - 5d)
        let base = at(2024, 6, 1, 0);
        for d_off in [-10i64, 0, 3, 7] {
            for e_off in [-4i64, 0, 3, 9] {
                let d = base + Duration::days(d_off);
                let e = base + Duration::days(e_off);
                let expected = (d - Duration::days(2)).min(e - Duration::days(5));
                assert_eq!(derive_follow_up(Some(d), Some(e)), Some(expected));
            }
        }
    }

    #[test]
    fn test_refresh_card() {
        use crate::domain::types::CardColumn;

        let deriver = FollowUpDeriver::new();
        let mut card = Card {
            id: "c".to_string(),
            board_id: "main".to_string(),
            title: "Banner".to_string(),
            kind: None,
            project_event: None,
            supplier: None,
            start_at: None,
            due_at: None,
            supplier_deadline: Some(at(2024, 6, 10, 10)),
            event_date: None,
            follow_up_at: None,
            assignee_user_id: None,
            column: CardColumn::ToDo,
            checklist: vec![],
            attachments: vec![],
            created_at: at(2024, 6, 1, 0),
            updated_at: at(2024, 6, 1, 0),
        };

        assert!(deriver.refresh(&mut card));
        assert_eq!(card.follow_up_at, Some(at(2024, 6, 8, 10)));
        // 再次刷新无变化
        assert!(!deriver.refresh(&mut card));

        card.supplier_deadline = None;
        assert!(deriver.refresh(&mut card));
        assert_eq!(card.follow_up_at, None);
    }
}
