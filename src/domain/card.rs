// ==========================================
// 创意制作看板 - 卡片领域模型
// ==========================================
// 红线: follow_up_at 为派生字段, 只能由 FollowUpDeriver 写入
// ==========================================

use crate::domain::types::CardColumn;
use crate::engine::urgency::is_past;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ==========================================
// Card - 看板卡片
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    // ===== 主键 =====
    pub id: String,
    pub board_id: String,

    // ===== 基本信息 =====
    pub title: String,
    pub kind: Option<String>,          // 类型 (vídeo / banner / ...)
    pub project_event: Option<String>, // 项目/活动
    pub supplier: Option<String>,      // 供应商

    // ===== 时间 =====
    pub start_at: Option<DateTime<Utc>>,
    pub due_at: Option<DateTime<Utc>>,
    pub supplier_deadline: Option<DateTime<Utc>>, // 供应商交付截止
    pub event_date: Option<DateTime<Utc>>,        // 活动时间
    pub follow_up_at: Option<DateTime<Utc>>,      // 跟进时间 (派生)

    // ===== 负责人 / 状态 =====
    pub assignee_user_id: Option<String>,
    pub column: CardColumn,

    // ===== 子项 =====
    pub checklist: Vec<ChecklistItem>,
    pub attachments: Vec<Attachment>,

    // ===== 审计 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// 清单进度 (已完成, 总数)
    pub fn checklist_progress(&self) -> (usize, usize) {
        let done = self.checklist.iter().filter(|item| item.done).count();
        (done, self.checklist.len())
    }

    /// 供应商截止是否已过
    pub fn is_supplier_late(&self, now: DateTime<Utc>) -> bool {
        is_past(self.supplier_deadline, now)
    }

    /// 活动时间是否已过
    pub fn is_event_late(&self, now: DateTime<Utc>) -> bool {
        is_past(self.event_date, now)
    }
}

// ==========================================
// ChecklistItem - 清单项
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub title: String,
    pub due_at: Option<DateTime<Utc>>,
    pub assignee_user_id: Option<String>,
    pub done: bool,
}

// ==========================================
// Attachment - 附件链接
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub url: String,
    pub title: String,
}

// ==========================================
// CardDraft - 新建卡片表单
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardDraft {
    pub title: String,
    pub kind: Option<String>,
    pub project_event: Option<String>,
    pub supplier: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub due_at: Option<DateTime<Utc>>,
    pub supplier_deadline: Option<DateTime<Utc>>,
    pub event_date: Option<DateTime<Utc>>,
    pub assignee_user_id: Option<String>,
    /// 初始列 (缺省为 ToDo)
    pub column: Option<CardColumn>,
    /// 初始清单 (为空时按类型套用模板)
    pub checklist: Vec<ChecklistItem>,
    pub attachments: Vec<Attachment>,
}

impl CardDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

// ==========================================
// CardPatch - 部分更新
// ==========================================
// 可清空字段使用 Option<Option<T>>:
// - None: 不修改
// - Some(None): 清空
// - Some(Some(v)): 设置为 v
// JSON 中缺省字段 → None, 显式 null → Some(None)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub kind: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub project_event: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub supplier: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub start_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub due_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub supplier_deadline: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub event_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub assignee_user_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<CardColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist: Option<Vec<ChecklistItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

/// 字段出现即为 Some, 其值 (含 null) 原样作为内层 Option
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl CardPatch {
    /// 是否修改了任一截止字段 (需要重新派生跟进时间)
    pub fn touches_deadlines(&self) -> bool {
        self.supplier_deadline.is_some() || self.event_date.is_some()
    }

    /// 将补丁应用到卡片 (不处理派生字段与 updated_at)
    pub fn apply_to(self, card: &mut Card) {
        if let Some(title) = self.title {
            card.title = title;
        }
        if let Some(kind) = self.kind {
            card.kind = kind;
        }
        if let Some(project_event) = self.project_event {
            card.project_event = project_event;
        }
        if let Some(supplier) = self.supplier {
            card.supplier = supplier;
        }
        if let Some(start_at) = self.start_at {
            card.start_at = start_at;
        }
        if let Some(due_at) = self.due_at {
            card.due_at = due_at;
        }
        if let Some(supplier_deadline) = self.supplier_deadline {
            card.supplier_deadline = supplier_deadline;
        }
        if let Some(event_date) = self.event_date {
            card.event_date = event_date;
        }
        if let Some(assignee_user_id) = self.assignee_user_id {
            card.assignee_user_id = assignee_user_id;
        }
        if let Some(column) = self.column {
            card.column = column;
        }
        if let Some(checklist) = self.checklist {
            card.checklist = checklist;
        }
        if let Some(attachments) = self.attachments {
            card.attachments = attachments;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, h, 0, 0).unwrap()
    }

    fn base_card() -> Card {
        Card {
            id: "card-1".to_string(),
            board_id: "main".to_string(),
            title: "Vídeo institucional".to_string(),
            kind: Some("vídeo".to_string()),
            project_event: None,
            supplier: Some("Produtora X".to_string()),
            start_at: None,
            due_at: None,
            supplier_deadline: Some(at(10, 10)),
            event_date: Some(at(20, 10)),
            follow_up_at: Some(at(8, 10)),
            assignee_user_id: None,
            column: CardColumn::AwaitingSupplier,
            checklist: vec![
                ChecklistItem {
                    id: "i1".to_string(),
                    title: "Roteiro".to_string(),
                    due_at: None,
                    assignee_user_id: None,
                    done: true,
                },
                ChecklistItem {
                    id: "i2".to_string(),
                    title: "Upload".to_string(),
                    due_at: None,
                    assignee_user_id: None,
                    done: false,
                },
            ],
            attachments: vec![],
            created_at: at(1, 0),
            updated_at: at(1, 0),
        }
    }

    #[test]
    fn test_checklist_progress() {
        assert_eq!(base_card().checklist_progress(), (1, 2));
    }

    #[test]
    fn test_late_flags_use_raw_deadlines() {
        let card = base_card();
        // 供应商截止已过, 活动未到
        assert!(card.is_supplier_late(at(11, 0)));
        assert!(!card.is_event_late(at(11, 0)));
        // 恰好等于 now 不算过期
        assert!(!card.is_supplier_late(at(10, 10)));
    }

    #[test]
    fn test_patch_clear_and_untouched() {
        let mut card = base_card();
        let patch = CardPatch {
            supplier: Some(None),
            title: Some("Novo título".to_string()),
            ..CardPatch::default()
        };
        assert!(!patch.touches_deadlines());
        patch.apply_to(&mut card);

        assert_eq!(card.title, "Novo título");
        assert!(card.supplier.is_none());
        // 未触碰的字段保持不变
        assert_eq!(card.supplier_deadline, Some(at(10, 10)));
        assert_eq!(card.kind.as_deref(), Some("vídeo"));
    }

    #[test]
    fn test_patch_touches_deadlines() {
        let clear_event = CardPatch {
            event_date: Some(None),
            ..CardPatch::default()
        };
        assert!(clear_event.touches_deadlines());
    }

    #[test]
    fn test_patch_json_null_clears_field() {
        let patch: CardPatch = serde_json::from_str(r#"{"event_date": null}"#).unwrap();
        assert_eq!(patch.event_date, Some(None));
        assert!(patch.supplier_deadline.is_none());
        assert!(patch.touches_deadlines());

        let patch: CardPatch = serde_json::from_str(r#"{"title": "Banner"}"#).unwrap();
        assert!(patch.event_date.is_none());
        assert!(!patch.touches_deadlines());
    }

    #[test]
    fn test_patch_json_keeps_clear_and_untouched_apart() {
        let patch = CardPatch {
            supplier_deadline: Some(None),
            event_date: Some(Some(at(20, 12))),
            ..CardPatch::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert!(!json.contains("title"));

        let back: CardPatch = serde_json::from_str(&json).unwrap();
        assert_eq!(back.supplier_deadline, Some(None));
        assert_eq!(back.event_date, Some(Some(at(20, 12))));
        assert!(back.kind.is_none());
    }
}
