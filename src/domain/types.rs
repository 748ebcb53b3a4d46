// ==========================================
// 创意制作看板 - 领域类型定义
// ==========================================
// 紧急等级 / 卡片颜色 / 看板列
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 紧急等级 (Urgency Tier)
// ==========================================
// 红线: 由跟进日期 + 当前时刻实时计算, 从不落库
// 顺序: Unset < Comfortable < Soon < Urgent < Overdue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyTier {
    Unset,       // 无跟进日期
    Comfortable, // 剩余 > 72h
    Soon,        // 剩余 24h ~ 72h
    Urgent,      // 剩余 < 24h
    Overdue,     // 已过期
}

impl UrgencyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyTier::Unset => "UNSET",
            UrgencyTier::Comfortable => "COMFORTABLE",
            UrgencyTier::Soon => "SOON",
            UrgencyTier::Urgent => "URGENT",
            UrgencyTier::Overdue => "OVERDUE",
        }
    }

    /// 映射到旧版四色标签
    ///
    /// 旧版只有 red/yellow/green/default 四个值,
    /// "已过期" 与 "24h 内到期" 共用 red (兼容保留)
    pub fn legacy_color(&self) -> CardColor {
        match self {
            UrgencyTier::Unset => CardColor::Default,
            UrgencyTier::Comfortable => CardColor::Green,
            UrgencyTier::Soon => CardColor::Yellow,
            UrgencyTier::Urgent | UrgencyTier::Overdue => CardColor::Red,
        }
    }

    /// 是否需要推送跟进提醒
    pub fn needs_follow_up(&self) -> bool {
        matches!(self, UrgencyTier::Urgent | UrgencyTier::Overdue)
    }

    /// i18n 键
    pub fn label_key(&self) -> &'static str {
        match self {
            UrgencyTier::Unset => "tier.unset",
            UrgencyTier::Comfortable => "tier.comfortable",
            UrgencyTier::Soon => "tier.soon",
            UrgencyTier::Urgent => "tier.urgent",
            UrgencyTier::Overdue => "tier.overdue",
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 卡片颜色 (Card Color)
// ==========================================
// 对齐旧版前端标签: 'green' | 'yellow' | 'red' | 'default'
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Red,
    Yellow,
    Green,
    Default,
}

impl CardColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardColor::Red => "red",
            CardColor::Yellow => "yellow",
            CardColor::Green => "green",
            CardColor::Default => "default",
        }
    }
}

impl fmt::Display for CardColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 看板列 (Card Column)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// 显示名称走 i18n: column.*
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardColumn {
    #[default]
    #[serde(rename = "TODO")]
    ToDo,             // A fazer
    AwaitingSupplier, // Aguardando Fornecedor
    InReview,         // Em revisão
    Done,             // Concluído
}

impl CardColumn {
    /// 看板上的列顺序
    pub const ALL: [CardColumn; 4] = [
        CardColumn::ToDo,
        CardColumn::AwaitingSupplier,
        CardColumn::InReview,
        CardColumn::Done,
    ];

    /// 从字符串解析列 (未知值回退到 ToDo)
    pub fn from_db_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "TODO" => CardColumn::ToDo,
            "AWAITING_SUPPLIER" => CardColumn::AwaitingSupplier,
            "IN_REVIEW" => CardColumn::InReview,
            "DONE" => CardColumn::Done,
            _ => CardColumn::ToDo,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            CardColumn::ToDo => "TODO",
            CardColumn::AwaitingSupplier => "AWAITING_SUPPLIER",
            CardColumn::InReview => "IN_REVIEW",
            CardColumn::Done => "DONE",
        }
    }

    /// i18n 键
    pub fn label_key(&self) -> &'static str {
        match self {
            CardColumn::ToDo => "column.todo",
            CardColumn::AwaitingSupplier => "column.awaiting_supplier",
            CardColumn::InReview => "column.in_review",
            CardColumn::Done => "column.done",
        }
    }
}

impl fmt::Display for CardColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_color_collision() {
        // 旧版颜色: 已过期与 24h 内到期同为 red
        assert_eq!(UrgencyTier::Overdue.legacy_color(), CardColor::Red);
        assert_eq!(UrgencyTier::Urgent.legacy_color(), CardColor::Red);
        assert_eq!(UrgencyTier::Soon.legacy_color(), CardColor::Yellow);
        assert_eq!(UrgencyTier::Comfortable.legacy_color(), CardColor::Green);
        assert_eq!(UrgencyTier::Unset.legacy_color(), CardColor::Default);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(UrgencyTier::Overdue > UrgencyTier::Urgent);
        assert!(UrgencyTier::Urgent > UrgencyTier::Soon);
        assert!(UrgencyTier::Soon > UrgencyTier::Comfortable);
        assert!(UrgencyTier::Comfortable > UrgencyTier::Unset);
    }

    #[test]
    fn test_column_db_roundtrip_and_fallback() {
        for column in CardColumn::ALL {
            assert_eq!(CardColumn::from_db_str(column.to_db_str()), column);
        }
        assert_eq!(CardColumn::from_db_str("A fazer"), CardColumn::ToDo);
        assert_eq!(CardColumn::from_db_str("in_review"), CardColumn::InReview);
    }

    #[test]
    fn test_serde_format() {
        let json = serde_json::to_string(&CardColumn::AwaitingSupplier).unwrap();
        assert_eq!(json, "\"AWAITING_SUPPLIER\"");
        let json = serde_json::to_string(&CardColumn::ToDo).unwrap();
        assert_eq!(json, "\"TODO\"");
        let json = serde_json::to_string(&CardColor::Yellow).unwrap();
        assert_eq!(json, "\"yellow\"");
    }
}
