// ==========================================
// 创意制作看板 - 清单模板
// ==========================================
// 职责: 按卡片类型生成初始清单
// ==========================================

use crate::domain::card::ChecklistItem;
use uuid::Uuid;

const VIDEO_TEMPLATE: &[&str] = &[
    "Briefing aprovado",
    "Roteiro",
    "1ª versão",
    "Feedback interno",
    "2ª versão",
    "Aprovação final",
    "Arquivo final",
    "Upload",
];

const BANNER_TEMPLATE: &[&str] = &[
    "Arte final",
    "Ordem de produção",
    "Confirmação fabricação",
    "Confirmação envio (tracking)",
    "Recebimento",
];

/// 查找类型对应的模板标题 (未知类型返回空)
///
/// 类型忽略大小写与首尾空白, "video" 与 "vídeo" 视为同一类型
pub fn template_titles(kind: &str) -> &'static [&'static str] {
    match kind.trim().to_lowercase().as_str() {
        "vídeo" | "video" => VIDEO_TEMPLATE,
        "banner" => BANNER_TEMPLATE,
        _ => &[],
    }
}

/// 按模板实例化清单项
pub fn instantiate(kind: &str) -> Vec<ChecklistItem> {
    template_titles(kind)
        .iter()
        .map(|title| ChecklistItem {
            id: Uuid::new_v4().to_string(),
            title: (*title).to_string(),
            due_at: None,
            assignee_user_id: None,
            done: false,
        })
        .collect()
}
