// ==========================================
// 创意制作看板 - 邮件内容解析
// ==========================================
// 职责: 从邮件正文提取卡片字段
// 识别标签 (忽略大小写, 值截止到行尾或 '|'):
//   Tipo: / Fornecedor: / Prazo forn[ecedor]: / Evento:
// 未识别到任何标签时, 取正文前 100 个字符作为标题
// ==========================================

use crate::importer::date_parser::parse_board_datetime;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// 回退标题的最大字符数
pub const FALLBACK_TITLE_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedEmail {
    pub title: String,
    pub kind: Option<String>,
    pub supplier: Option<String>,
    pub supplier_deadline: Option<DateTime<Utc>>,
    pub event_date: Option<DateTime<Utc>>,
}

struct FieldPatterns {
    kind: Regex,
    supplier: Regex,
    supplier_deadline: Regex,
    event_date: Regex,
}

fn patterns() -> &'static FieldPatterns {
    static PATTERNS: OnceLock<FieldPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| FieldPatterns {
        kind: Regex::new(r"(?i)Tipo:\s*([^\n\r|]+)").expect("valid kind regex"),
        supplier: Regex::new(r"(?i)Fornecedor:\s*([^\n\r|]+)").expect("valid supplier regex"),
        supplier_deadline: Regex::new(r"(?i)Prazo forn(?:ecedor)?:\s*([^\n\r|]+)")
            .expect("valid deadline regex"),
        event_date: Regex::new(r"(?i)Evento:\s*([^\n\r|]+)").expect("valid event regex"),
    })
}

fn capture(re: &Regex, body: &str) -> Option<String> {
    re.captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// 解析邮件正文
///
/// # 参数
/// - body: 邮件正文
/// - tz: 看板时区 (日期按该时区理解)
pub fn parse_email(body: &str, tz: Tz) -> ParsedEmail {
    let p = patterns();

    let kind = capture(&p.kind, body);
    let supplier = capture(&p.supplier, body);
    let deadline_raw = capture(&p.supplier_deadline, body);
    let event_raw = capture(&p.event_date, body);

    let structured =
        kind.is_some() || supplier.is_some() || deadline_raw.is_some() || event_raw.is_some();

    if !structured {
        tracing::debug!("邮件未包含结构化字段, 使用正文作为标题");
        return ParsedEmail {
            title: body.chars().take(FALLBACK_TITLE_MAX_CHARS).collect(),
            ..ParsedEmail::default()
        };
    }

    let supplier_deadline = deadline_raw.as_deref().and_then(|s| parse_board_datetime(s, tz));
    let event_date = event_raw.as_deref().and_then(|s| parse_board_datetime(s, tz));

    if deadline_raw.is_some() && supplier_deadline.is_none() {
        tracing::warn!("供应商截止日期格式无法识别: {:?}", deadline_raw);
    }
    if event_raw.is_some() && event_date.is_none() {
        tracing::warn!("活动日期格式无法识别: {:?}", event_raw);
    }

    ParsedEmail {
        title: crate::i18n::t("email.default_title"),
        kind,
        supplier,
        supplier_deadline,
        event_date,
    }
}
