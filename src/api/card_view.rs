// ==========================================
// 创意制作看板 - 看板读模型
// ==========================================
// 职责: 卡片 → 渲染所需的颜色、过期标记、格式化日期
// 红线: 紧急等级在读取时计算, now 由调用方注入
// ==========================================

use crate::domain::card::Card;
use crate::domain::types::{CardColor, CardColumn, UrgencyTier};
use crate::engine::urgency::classify;
use crate::i18n::t;
use crate::importer::date_parser::format_board_datetime;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

// ==========================================
// CardView - 单卡读模型
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardView {
    pub card: Card,

    // ===== 紧急度 =====
    pub tier: UrgencyTier,
    pub tier_label: String,
    /// 由紧急等级映射的旧版颜色
    pub color: CardColor,
    /// 边框/底色: 任一原始截止已过则为 red, 否则同 color
    pub highlight: CardColor,

    // ===== 单字段过期标记 =====
    pub supplier_late: bool,
    pub event_late: bool,
    pub late_label: String,

    // ===== 显示文本 (DD/MM/YYYY HH:MM) =====
    pub column_label: String,
    pub supplier_deadline_text: Option<String>,
    pub event_date_text: Option<String>,
    pub follow_up_text: Option<String>,

    // ===== 清单进度 =====
    pub checklist_done: usize,
    pub checklist_total: usize,
}

impl CardView {
    pub fn build(card: Card, now: DateTime<Utc>, tz: Tz) -> Self {
        let tier = classify(card.follow_up_at, now);
        let color = tier.legacy_color();
        let supplier_late = card.is_supplier_late(now);
        let event_late = card.is_event_late(now);
        let highlight = if supplier_late || event_late {
            CardColor::Red
        } else {
            color
        };
        let (checklist_done, checklist_total) = card.checklist_progress();
        let fmt = |d: Option<DateTime<Utc>>| d.map(|d| format_board_datetime(d, tz));

        Self {
            tier,
            tier_label: t(tier.label_key()),
            color,
            highlight,
            supplier_late,
            event_late,
            late_label: t("card.late"),
            column_label: t(card.column.label_key()),
            supplier_deadline_text: fmt(card.supplier_deadline),
            event_date_text: fmt(card.event_date),
            follow_up_text: fmt(card.follow_up_at),
            checklist_done,
            checklist_total,
            card,
        }
    }
}

// ==========================================
// BoardView - 看板读模型 (按列分组)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnView {
    pub column: CardColumn,
    pub label: String,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardView {
    pub board_id: String,
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    /// 按固定列顺序分组, 列内保持输入顺序; 空列同样输出
    pub fn group(board_id: impl Into<String>, views: Vec<CardView>) -> Self {
        let mut columns: Vec<ColumnView> = CardColumn::ALL
            .iter()
            .map(|column| ColumnView {
                column: *column,
                label: t(column.label_key()),
                cards: Vec::new(),
            })
            .collect();

        for view in views {
            if let Some(slot) = columns.iter_mut().find(|c| c.column == view.card.column) {
                slot.cards.push(view);
            }
        }

        Self {
            board_id: board_id.into(),
            columns,
        }
    }
}
