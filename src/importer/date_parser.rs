// ==========================================
// 创意制作看板 - 看板日期格式
// ==========================================
// 格式: DD/MM/YYYY HH:MM (看板时区)
// 存储: 一律 UTC
// ==========================================

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::OnceLock;

/// 看板显示格式
pub const BOARD_DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";

fn datetime_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{2})/(\d{2})/(\d{4})\s+(\d{2}):(\d{2})").expect("valid datetime regex")
    })
}

/// 解析 DD/MM/YYYY HH:MM
///
/// - 文本中任意位置出现该格式即可
/// - 无效日期 (如 31/02) 或本地时刻不存在/有歧义 → None
pub fn parse_board_datetime(s: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let caps = datetime_regex().captures(s)?;
    let normalized = format!("{}/{}/{} {}:{}", &caps[1], &caps[2], &caps[3], &caps[4], &caps[5]);
    let naive = NaiveDateTime::parse_from_str(&normalized, BOARD_DATETIME_FORMAT).ok()?;

    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// 按看板时区格式化
pub fn format_board_datetime(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format(BOARD_DATETIME_FORMAT).to_string()
}
