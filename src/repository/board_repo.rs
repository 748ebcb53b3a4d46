// ==========================================
// 创意制作看板 - 看板数据仓储
// ==========================================

use crate::domain::board::Board;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct BoardRepository {
    conn: Arc<Mutex<Connection>>,
}

impl BoardRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新建看板 (已存在则忽略)
    ///
    /// # 返回
    /// - true: 新建成功
    /// - false: 已存在
    pub fn insert_if_absent(&self, board: &Board) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "INSERT OR IGNORE INTO boards (id, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
            params![board.id, board.name, board.created_at, board.updated_at],
        )?;
        Ok(affected > 0)
    }

    pub fn find_by_id(&self, board_id: &str) -> RepositoryResult<Option<Board>> {
        let conn = self.get_conn()?;
        let result = conn.query_row(
            "SELECT id, name, created_at, updated_at FROM boards WHERE id = ?1",
            params![board_id],
            |row| {
                Ok(Board {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                    updated_at: row.get(3)?,
                })
            },
        );

        match result {
            Ok(board) => Ok(Some(board)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
