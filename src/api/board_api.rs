// ==========================================
// 创意制作看板 - 看板/成员 API
// ==========================================

use std::sync::Arc;

use chrono::Utc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::board::{Board, User};
use crate::repository::board_repo::BoardRepository;
use crate::repository::user_repo::UserRepository;

/// 默认看板名称
pub const DEFAULT_BOARD_NAME: &str = "Produção";

pub struct BoardApi {
    board_repo: Arc<BoardRepository>,
    user_repo: Arc<UserRepository>,
}

impl BoardApi {
    pub fn new(board_repo: Arc<BoardRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            board_repo,
            user_repo,
        }
    }

    /// 登记成员资料 (已存在则更新显示名/颜色/邮箱)
    pub fn create_user(
        &self,
        user_id: &str,
        display_name: &str,
        email: &str,
        color_hex: Option<&str>,
    ) -> ApiResult<User> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ApiError::InvalidInput("用户ID不能为空".to_string()));
        }
        if display_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("显示名不能为空".to_string()));
        }
        if !email.contains('@') {
            return Err(ApiError::InvalidInput(format!("邮箱格式无效: {}", email)));
        }
        if let Some(color) = color_hex {
            if !is_hex_color(color) {
                return Err(ApiError::InvalidInput(format!("颜色格式无效: {}", color)));
            }
        }

        let created_at = self
            .user_repo
            .find_by_id(user_id)?
            .map(|existing| existing.created_at)
            .unwrap_or_else(Utc::now);

        let user = User {
            id: user_id.to_string(),
            display_name: display_name.trim().to_string(),
            color_hex: color_hex.map(str::to_string),
            email: email.trim().to_string(),
            created_at,
        };
        self.user_repo.upsert(&user)?;

        tracing::info!(user_id = %user.id, "成员资料已登记");
        Ok(user)
    }

    /// 查询成员
    pub fn get_user(&self, user_id: &str) -> ApiResult<Option<User>> {
        Ok(self.user_repo.find_by_id(user_id)?)
    }

    /// 查询看板
    pub fn get_board(&self, board_id: &str) -> ApiResult<Option<Board>> {
        Ok(self.board_repo.find_by_id(board_id)?)
    }

    /// 确保看板存在 (首次启动时创建)
    pub fn ensure_board(&self, board_id: &str) -> ApiResult<Board> {
        let now = Utc::now();
        let created = self.board_repo.insert_if_absent(&Board {
            id: board_id.to_string(),
            name: DEFAULT_BOARD_NAME.to_string(),
            created_at: now,
            updated_at: now,
        })?;
        if created {
            tracing::info!(board_id, "已创建看板");
        }

        self.board_repo
            .find_by_id(board_id)?
            .ok_or_else(|| ApiError::Internal(format!("看板(id={})创建后不可见", board_id)))
    }
}

/// #RGB 或 #RRGGBB
fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#FF8800"));
        assert!(is_hex_color("#abc"));
        assert!(!is_hex_color("FF8800"));
        assert!(!is_hex_color("#GG0000"));
        assert!(!is_hex_color("#1234"));
    }
}
