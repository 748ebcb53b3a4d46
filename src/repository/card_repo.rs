// ==========================================
// 创意制作看板 - 卡片数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑 (follow_up_at 由 API 层派生后写入)
// ==========================================

use crate::domain::card::{Attachment, Card, ChecklistItem};
use crate::domain::types::CardColumn;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex, MutexGuard};

const CARD_COLUMNS: &str = r#"
    id, board_id, title, kind, project_event, supplier,
    start_at, due_at, supplier_deadline, event_date, follow_up_at,
    assignee_user_id, column_key, checklist_json, attachments_json,
    created_at, updated_at
"#;

// ==========================================
// CardRepository - 卡片仓储
// ==========================================
/// 卡片仓储
/// 职责: 管理 cards 表的 CRUD 操作
pub struct CardRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CardRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新建卡片
    pub fn insert(&self, card: &Card) -> RepositoryResult<()> {
        let checklist_json = to_json("checklist_json", &card.checklist)?;
        let attachments_json = to_json("attachments_json", &card.attachments)?;

        let conn = self.get_conn()?;
        conn.execute(
            &format!(
                "INSERT INTO cards ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
                CARD_COLUMNS
            ),
            params![
                card.id,
                card.board_id,
                card.title,
                card.kind,
                card.project_event,
                card.supplier,
                card.start_at,
                card.due_at,
                card.supplier_deadline,
                card.event_date,
                card.follow_up_at,
                card.assignee_user_id,
                card.column.to_db_str(),
                checklist_json,
                attachments_json,
                card.created_at,
                card.updated_at,
            ],
        )?;
        Ok(())
    }

    /// 整卡覆盖更新 (id / board_id / created_at 不变)
    pub fn update(&self, card: &Card) -> RepositoryResult<()> {
        let checklist_json = to_json("checklist_json", &card.checklist)?;
        let attachments_json = to_json("attachments_json", &card.attachments)?;

        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE cards SET
                title = ?2, kind = ?3, project_event = ?4, supplier = ?5,
                start_at = ?6, due_at = ?7, supplier_deadline = ?8, event_date = ?9,
                follow_up_at = ?10, assignee_user_id = ?11, column_key = ?12,
                checklist_json = ?13, attachments_json = ?14, updated_at = ?15
            WHERE id = ?1
            "#,
            params![
                card.id,
                card.title,
                card.kind,
                card.project_event,
                card.supplier,
                card.start_at,
                card.due_at,
                card.supplier_deadline,
                card.event_date,
                card.follow_up_at,
                card.assignee_user_id,
                card.column.to_db_str(),
                checklist_json,
                attachments_json,
                card.updated_at,
            ],
        )?;

        if affected == 0 {
            return Err(not_found(&card.id));
        }
        Ok(())
    }

    /// 仅更新列
    pub fn update_column(
        &self,
        card_id: &str,
        column: CardColumn,
        updated_at: DateTime<Utc>,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE cards SET column_key = ?2, updated_at = ?3 WHERE id = ?1",
            params![card_id, column.to_db_str(), updated_at],
        )?;

        if affected == 0 {
            return Err(not_found(card_id));
        }
        Ok(())
    }

    /// 删除卡片
    pub fn delete(&self, card_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM cards WHERE id = ?1", params![card_id])?;
        if affected == 0 {
            return Err(not_found(card_id));
        }
        Ok(())
    }

    /// 按ID查询
    ///
    /// # 返回
    /// - Ok(Some(Card)): 找到卡片
    /// - Ok(None): 未找到
    pub fn find_by_id(&self, card_id: &str) -> RepositoryResult<Option<Card>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM cards WHERE id = ?1", CARD_COLUMNS))?;

        match stmt.query_row(params![card_id], map_card_row) {
            Ok(card) => Ok(Some(card)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 查询看板全部卡片 (按创建时间倒序)
    pub fn find_by_board(&self, board_id: &str) -> RepositoryResult<Vec<Card>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM cards WHERE board_id = ?1 ORDER BY created_at DESC, id ASC",
            CARD_COLUMNS
        ))?;

        let cards = stmt
            .query_map(params![board_id], map_card_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }

    /// 查询跟进时间早于 before 的未完成卡片 (按跟进时间升序)
    pub fn find_follow_up_before(
        &self,
        board_id: &str,
        before: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Card>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {} FROM cards
            WHERE board_id = ?1
              AND follow_up_at IS NOT NULL
              AND follow_up_at < ?2
              AND column_key <> ?3
            ORDER BY follow_up_at ASC
            "#,
            CARD_COLUMNS
        ))?;

        let cards = stmt
            .query_map(
                params![board_id, before, CardColumn::Done.to_db_str()],
                map_card_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }
}

// ==========================================
// 辅助函数
// ==========================================

fn not_found(card_id: &str) -> RepositoryError {
    RepositoryError::NotFound {
        entity: "Card",
        id: card_id.to_string(),
    }
}

fn to_json<T: serde::Serialize>(column: &'static str, value: &T) -> RepositoryResult<String> {
    serde_json::to_string(value).map_err(|source| RepositoryError::JsonColumn { column, source })
}

fn from_json<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn map_card_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    let checklist: Vec<ChecklistItem> = from_json(row, 13)?;
    let attachments: Vec<Attachment> = from_json(row, 14)?;

    Ok(Card {
        id: row.get(0)?,
        board_id: row.get(1)?,
        title: row.get(2)?,
        kind: row.get(3)?,
        project_event: row.get(4)?,
        supplier: row.get(5)?,
        start_at: row.get(6)?,
        due_at: row.get(7)?,
        supplier_deadline: row.get(8)?,
        event_date: row.get(9)?,
        follow_up_at: row.get(10)?,
        assignee_user_id: row.get(11)?,
        column: CardColumn::from_db_str(&row.get::<_, String>(12)?),
        checklist,
        attachments,
        created_at: row.get(15)?,
        updated_at: row.get(16)?,
    })
}
