// ==========================================
// 创意制作看板 - 卡片 API
// ==========================================
// 职责: 卡片写入 (新建/更新/移动/删除) 与看板读取
// 红线: 任一截止字段写入时, 必须在同一次写入中重算 follow_up_at
// ==========================================

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::instrument;
use uuid::Uuid;

use crate::api::card_view::{BoardView, CardView};
use crate::api::error::{ApiError, ApiResult};
use crate::config::BoardSettings;
use crate::domain::card::{Card, CardDraft, CardPatch, ChecklistItem};
use crate::domain::types::CardColumn;
use crate::engine::checklist;
use crate::engine::follow_up::FollowUpDeriver;
use crate::engine::urgency::URGENT_WITHIN_HOURS;
use crate::i18n::{t, t_with_args};
use crate::importer::email_parser::parse_email;
use crate::repository::card_repo::CardRepository;

// ==========================================
// CardApi - 卡片 API
// ==========================================

/// 卡片API
///
/// 职责：
/// 1. 卡片新建 (派生跟进时间、自动分列、套用清单模板)
/// 2. 卡片更新 (截止字段变化时重算跟进时间)
/// 3. 看板读模型 (紧急等级在读取时计算)
/// 4. 邮件建卡
pub struct CardApi {
    card_repo: Arc<CardRepository>,
    settings: BoardSettings,
    deriver: FollowUpDeriver,
}

impl CardApi {
    /// 创建新的CardApi实例
    pub fn new(card_repo: Arc<CardRepository>, settings: BoardSettings) -> Self {
        Self {
            card_repo,
            settings,
            deriver: FollowUpDeriver::new(),
        }
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    // ==========================================
    // 写入
    // ==========================================

    /// 新建卡片
    ///
    /// 规则:
    /// - 标题不能为空
    /// - follow_up_at = derive(supplier_deadline, event_date)
    /// - 指定了供应商且初始列为 ToDo → AwaitingSupplier
    /// - 指定了类型且未提供清单 → 套用类型模板
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn create_card(&self, draft: CardDraft) -> ApiResult<Card> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(ApiError::InvalidInput("卡片标题不能为空".to_string()));
        }

        let kind = normalize_text(draft.kind);
        let supplier = normalize_text(draft.supplier);

        let mut column = draft.column.unwrap_or_default();
        if supplier.is_some() && column == CardColumn::ToDo {
            column = CardColumn::AwaitingSupplier;
        }

        let checklist = match (&kind, draft.checklist.is_empty()) {
            (Some(kind), true) => checklist::instantiate(kind),
            _ => draft.checklist,
        };

        let now = Utc::now();
        let card = Card {
            id: Uuid::new_v4().to_string(),
            board_id: self.settings.default_board_id.clone(),
            title,
            kind,
            project_event: normalize_text(draft.project_event),
            supplier,
            start_at: draft.start_at,
            due_at: draft.due_at,
            supplier_deadline: draft.supplier_deadline,
            event_date: draft.event_date,
            follow_up_at: self.deriver.derive(draft.supplier_deadline, draft.event_date),
            assignee_user_id: normalize_text(draft.assignee_user_id),
            column,
            checklist,
            attachments: draft.attachments,
            created_at: now,
            updated_at: now,
        };

        self.card_repo.insert(&card)?;

        tracing::info!(
            card_id = %card.id,
            column = %card.column,
            follow_up_at = ?card.follow_up_at,
            "卡片已创建"
        );
        Ok(card)
    }

    /// 更新卡片
    ///
    /// 补丁触及 supplier_deadline / event_date 时,
    /// 以合并后卡片的两个字段重新派生 follow_up_at
    #[instrument(skip(self, patch))]
    pub fn update_card(&self, card_id: &str, patch: CardPatch) -> ApiResult<Card> {
        if matches!(&patch.title, Some(t) if t.trim().is_empty()) {
            return Err(ApiError::InvalidInput("卡片标题不能为空".to_string()));
        }

        let mut card = self.get_card(card_id)?;
        let touches_deadlines = patch.touches_deadlines();

        patch.apply_to(&mut card);
        card.title = card.title.trim().to_string();

        if touches_deadlines && self.deriver.refresh(&mut card) {
            tracing::debug!(card_id, follow_up_at = ?card.follow_up_at, "跟进时间已重算");
        }

        card.updated_at = Utc::now();
        self.card_repo.update(&card)?;

        tracing::info!(card_id, "卡片已更新");
        Ok(card)
    }

    /// 移动卡片到指定列
    pub fn move_card_to_column(&self, card_id: &str, column: CardColumn) -> ApiResult<()> {
        self.card_repo.update_column(card_id, column, Utc::now())?;
        tracing::info!(card_id, column = %column, "卡片已移动");
        Ok(())
    }

    /// 删除卡片
    pub fn delete_card(&self, card_id: &str) -> ApiResult<()> {
        self.card_repo.delete(card_id)?;
        tracing::info!(card_id, "卡片已删除");
        Ok(())
    }

    /// 追加清单项
    pub fn add_checklist_item(&self, card_id: &str, title: &str) -> ApiResult<ChecklistItem> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ApiError::InvalidInput("清单项标题不能为空".to_string()));
        }

        let mut card = self.get_card(card_id)?;
        let item = ChecklistItem {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            due_at: None,
            assignee_user_id: None,
            done: false,
        };
        card.checklist.push(item.clone());
        card.updated_at = Utc::now();
        self.card_repo.update(&card)?;

        Ok(item)
    }

    /// 切换清单项完成状态
    ///
    /// # 返回
    /// - Ok(bool): 切换后的完成状态
    pub fn toggle_checklist_item(&self, card_id: &str, item_id: &str) -> ApiResult<bool> {
        let mut card = self.get_card(card_id)?;

        let item = card
            .checklist
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| ApiError::NotFound(format!("清单项(id={})不存在", item_id)))?;
        item.done = !item.done;
        let done = item.done;

        card.updated_at = Utc::now();
        self.card_repo.update(&card)?;

        Ok(done)
    }

    /// 由邮件正文建卡
    pub fn create_card_from_email(&self, body: &str) -> ApiResult<Card> {
        let parsed = parse_email(body, self.settings.timezone);

        let title = if parsed.title.trim().is_empty() {
            t("email.default_title")
        } else {
            parsed.title
        };

        let draft = CardDraft {
            kind: parsed.kind,
            supplier: parsed.supplier,
            supplier_deadline: parsed.supplier_deadline,
            event_date: parsed.event_date,
            column: Some(CardColumn::ToDo),
            ..CardDraft::new(title)
        };

        self.create_card(draft)
    }

    // ==========================================
    // 读取
    // ==========================================

    /// 按ID查询卡片
    pub fn get_card(&self, card_id: &str) -> ApiResult<Card> {
        if card_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("卡片ID不能为空".to_string()));
        }

        self.card_repo
            .find_by_id(card_id)?
            .ok_or_else(|| ApiError::NotFound(t_with_args("card.not_found", &[("id", card_id)])))
    }

    /// 查询默认看板全部卡片 (按创建时间倒序)
    pub fn list_cards(&self) -> ApiResult<Vec<Card>> {
        Ok(self.card_repo.find_by_board(&self.settings.default_board_id)?)
    }

    /// 可能需要跟进提醒的卡片 (跟进时间早于 now + 24h, 未完成)
    pub fn list_follow_up_candidates(&self, now: DateTime<Utc>) -> ApiResult<Vec<Card>> {
        let horizon = now + Duration::hours(URGENT_WITHIN_HOURS);
        Ok(self
            .card_repo
            .find_follow_up_before(&self.settings.default_board_id, horizon)?)
    }

    /// 单卡读模型
    pub fn get_card_view(&self, card_id: &str, now: DateTime<Utc>) -> ApiResult<CardView> {
        let card = self.get_card(card_id)?;
        Ok(CardView::build(card, now, self.settings.timezone))
    }

    /// 全部卡片读模型
    pub fn list_card_views(&self, now: DateTime<Utc>) -> ApiResult<Vec<CardView>> {
        Ok(self
            .list_cards()?
            .into_iter()
            .map(|card| CardView::build(card, now, self.settings.timezone))
            .collect())
    }

    /// 看板读模型 (按列分组)
    pub fn get_board_view(&self, now: DateTime<Utc>) -> ApiResult<BoardView> {
        let views = self.list_card_views(now)?;
        Ok(BoardView::group(self.settings.default_board_id.clone(), views))
    }
}

/// 去除首尾空白, 空串视为缺失
fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
