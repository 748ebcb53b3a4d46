// ==========================================
// 创意制作看板 - 看板与用户
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 默认看板 ID
pub const DEFAULT_BOARD_ID: &str = "main";

// ==========================================
// User - 看板成员
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub color_hex: Option<String>, // 头像颜色, 如 "#FF8800"
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// ==========================================
// Board - 看板
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
