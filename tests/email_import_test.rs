// ==========================================
// 邮件导入 (库直接调用) 集成测试
// ==========================================
// 测试范围:
// 1. 不经 AppState 时使用默认语言 pt-BR
// ==========================================
// 注意: 本文件的测试均不得调用 set_locale / AppState
// ==========================================

use chrono::{TimeZone, Utc};
use chrono_tz::America::Sao_Paulo;
use creative_board::i18n::{current_locale, DEFAULT_LOCALE};
use creative_board::importer::parse_email;

#[test]
fn test_parse_email_uses_default_locale_title() {
    let parsed = parse_email("Tipo: banner\nEvento: 20/06/2024 09:00", Sao_Paulo);

    assert_eq!(parsed.title, "Tarefa por email");
    assert_eq!(parsed.kind.as_deref(), Some("banner"));
    assert_eq!(
        parsed.event_date,
        Some(Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap())
    );
}

#[test]
fn test_default_locale_is_pt_br() {
    assert_eq!(DEFAULT_LOCALE, "pt-BR");
    assert_eq!(current_locale(), "pt-BR");
}
