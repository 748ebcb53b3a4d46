// ==========================================
// 创意制作看板 - 每日跟进扫描
// ==========================================
// 职责: 扫描全部卡片, 对 Urgent / Overdue 卡片发出跟进提醒
// 触发: 每 24 小时一次 (默认 08:00 America/Sao_Paulo)
// 红线: 单张卡片通知失败不得中断整次扫描
// ==========================================

use crate::domain::card::Card;
use crate::domain::types::{CardColumn, UrgencyTier};
use crate::engine::events::{FollowUpEvent, FollowUpNotifier};
use crate::engine::urgency::UrgencyEngine;
use chrono::{DateTime, Days, Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// SweepReport - 扫描结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// 参与判定的卡片数 (不含已完成)
    pub scanned: usize,
    /// 已完成而跳过的卡片数
    pub skipped_done: usize,
    /// 成功发出的提醒数
    pub notified: usize,
    /// 发送失败的提醒数
    pub failed: usize,
    /// 各等级卡片数
    pub tiers: BTreeMap<UrgencyTier, usize>,
}

// ==========================================
// FollowUpSweep - 跟进扫描器
// ==========================================
pub struct FollowUpSweep {
    urgency: UrgencyEngine,
    notifier: Arc<dyn FollowUpNotifier>,
}

impl FollowUpSweep {
    pub fn new(notifier: Arc<dyn FollowUpNotifier>) -> Self {
        Self {
            urgency: UrgencyEngine::new(),
            notifier,
        }
    }

    /// 执行一次扫描
    #[instrument(skip(self, cards), fields(count = cards.len()))]
    pub fn run(&self, cards: &[Card], now: DateTime<Utc>) -> SweepReport {
        let mut report = SweepReport::default();

        for card in cards {
            if card.column == CardColumn::Done {
                report.skipped_done += 1;
                continue;
            }

            report.scanned += 1;
            let tier = self.urgency.evaluate(card, now);
            *report.tiers.entry(tier).or_insert(0) += 1;

            if !tier.needs_follow_up() {
                continue;
            }
            // needs_follow_up 蕴含 follow_up_at 存在
            let Some(follow_up_at) = card.follow_up_at else {
                continue;
            };

            let event = FollowUpEvent {
                card_id: card.id.clone(),
                title: card.title.clone(),
                assignee_user_id: card.assignee_user_id.clone(),
                tier,
                follow_up_at,
                triggered_at: now,
            };

            match self.notifier.notify(&event) {
                Ok(()) => report.notified += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!("跟进提醒发送失败: card_id={}, error={}", card.id, e);
                }
            }
        }

        tracing::info!(
            scanned = report.scanned,
            notified = report.notified,
            failed = report.failed,
            "跟进扫描完成"
        );

        report
    }
}

/// 计算 now 之后下一次扫描的触发时刻
///
/// # 参数
/// - hour: 本地小时 (0-23), 超出范围按 23 处理
/// - tz: 看板时区
///
/// 本地时刻不存在 (夏令时跳变) 时顺延一小时
pub fn next_run_after(now: DateTime<Utc>, hour: u32, tz: Tz) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
    let today = now.with_timezone(&tz).date_naive();

    let resolve = |date: chrono::NaiveDate| -> DateTime<Utc> {
        let local = date.and_time(time);
        tz.from_local_datetime(&local)
            .earliest()
            .or_else(|| tz.from_local_datetime(&(local + Duration::hours(1))).earliest())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&local))
    };

    let candidate = resolve(today);
    if candidate > now {
        return candidate;
    }
    resolve(today.checked_add_days(Days::new(1)).unwrap_or(today))
}
