// ==========================================
// 创意制作看板 - 导入层
// ==========================================
// 职责: 外部文本 (邮件/表单) → 规范化字段
// 红线: 进入引擎前, 日期必须已规范化为 UTC 时刻
// ==========================================

pub mod date_parser;
pub mod email_parser;

pub use date_parser::{format_board_datetime, parse_board_datetime, BOARD_DATETIME_FORMAT};
pub use email_parser::{parse_email, ParsedEmail};
