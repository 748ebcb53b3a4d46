// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持葡萄牙语（默认 pt-BR）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use std::sync::Once;

/// 默认语言 (rust-i18n 自身的初始语言为 en)
pub const DEFAULT_LOCALE: &str = "pt-BR";

static DEFAULT_LOCALE_INIT: Once = Once::new();

/// 首次访问前切换到默认语言; 之后的 set_locale 不会被覆盖
fn ensure_default_locale() {
    DEFAULT_LOCALE_INIT.call_once(|| rust_i18n::set_locale(DEFAULT_LOCALE));
}

/// rust-i18n 的 locale 为全局状态, 依赖翻译文本的测试需串行
#[cfg(test)]
pub(crate) static LOCALE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// 获取当前语言
pub fn current_locale() -> String {
    ensure_default_locale();
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"pt-BR" 或 "en"）
pub fn set_locale(locale: &str) {
    ensure_default_locale();
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use creative_board::i18n::t;
/// let label = t("column.todo");
/// ```
pub fn t(key: &str) -> String {
    ensure_default_locale();
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use creative_board::i18n::t_with_args;
/// let msg = t_with_args("card.not_found", &[("id", "c-42")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    ensure_default_locale();
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
