// ==========================================
// 创意制作看板 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// 红线: 跟进提前天数与紧急阈值是固定策略, 不进入配置
// ==========================================

use chrono_tz::Tz;
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置数据库错误: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("配置锁获取失败: {0}")]
    Lock(String),

    #[error("配置值无效 (key={key}): {message}")]
    InvalidValue { key: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// BoardSettings - 看板运行配置快照
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSettings {
    pub default_board_id: String,
    pub timezone: Tz,
    pub sweep_hour: u32,
    /// 界面语言 (pt-BR / en)
    pub locale: String,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> ConfigResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::Lock(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.get_conn()?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 写入配置值 (UPSERT)
    pub fn set_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        tracing::info!(config_key = key, value = value, "配置已更新");
        Ok(())
    }

    /// 列出全部 global 配置
    pub fn list_configs(&self) -> ConfigResult<BTreeMap<String, String>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;

        let mut configs = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            configs.insert(key, value);
        }
        Ok(configs)
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    // ===== 看板配置 =====

    /// 默认看板 ID
    pub fn default_board_id(&self) -> ConfigResult<String> {
        let value = self.get_config_or_default(config_keys::DEFAULT_BOARD_ID, defaults::BOARD_ID)?;
        let value = value.trim();
        if value.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: config_keys::DEFAULT_BOARD_ID.to_string(),
                message: "看板ID不能为空".to_string(),
            });
        }
        Ok(value.to_string())
    }

    /// 看板时区 (IANA 名称)
    pub fn board_timezone(&self) -> ConfigResult<Tz> {
        let value = self.get_config_or_default(config_keys::BOARD_TIMEZONE, defaults::TIMEZONE)?;
        value
            .trim()
            .parse::<Tz>()
            .map_err(|e| ConfigError::InvalidValue {
                key: config_keys::BOARD_TIMEZONE.to_string(),
                message: e.to_string(),
            })
    }

    // ===== 跟进扫描配置 =====

    /// 每日扫描的本地小时 (0-23)
    pub fn sweep_hour(&self) -> ConfigResult<u32> {
        let value = self.get_config_or_default(config_keys::SWEEP_HOUR, defaults::SWEEP_HOUR)?;
        match value.trim().parse::<u32>() {
            Ok(hour) if hour <= 23 => Ok(hour),
            _ => Err(ConfigError::InvalidValue {
                key: config_keys::SWEEP_HOUR.to_string(),
                message: format!("应为 0-23 的整数, 实际为 {}", value),
            }),
        }
    }

    // ===== 界面配置 =====

    /// 界面语言, 仅接受已提供翻译的语言
    pub fn ui_locale(&self) -> ConfigResult<String> {
        let value = self.get_config_or_default(config_keys::UI_LOCALE, defaults::LOCALE)?;
        let value = value.trim();
        if !SUPPORTED_LOCALES.contains(&value) {
            return Err(ConfigError::InvalidValue {
                key: config_keys::UI_LOCALE.to_string(),
                message: format!("不支持的语言: {}", value),
            });
        }
        Ok(value.to_string())
    }

    /// 一次性读取全部看板配置
    pub fn load_settings(&self) -> ConfigResult<BoardSettings> {
        Ok(BoardSettings {
            default_board_id: self.default_board_id()?,
            timezone: self.board_timezone()?,
            sweep_hour: self.sweep_hour()?,
            locale: self.ui_locale()?,
        })
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 看板
    pub const DEFAULT_BOARD_ID: &str = "board.default_id";
    pub const BOARD_TIMEZONE: &str = "board.timezone";

    // 跟进扫描
    pub const SWEEP_HOUR: &str = "sweep.hour";

    // 界面
    pub const UI_LOCALE: &str = "ui.locale";
}

// ==========================================
// 默认值
// ==========================================
pub mod defaults {
    pub const BOARD_ID: &str = crate::domain::board::DEFAULT_BOARD_ID;
    pub const TIMEZONE: &str = "America/Sao_Paulo";
    pub const SWEEP_HOUR: &str = "8";
    pub const LOCALE: &str = crate::i18n::DEFAULT_LOCALE;
}

/// 已提供翻译文件的语言
pub const SUPPORTED_LOCALES: &[&str] = &["pt-BR", "en"];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_defaults() {
        let config = manager();
        let settings = config.load_settings().unwrap();

        assert_eq!(settings.default_board_id, "main");
        assert_eq!(settings.timezone, chrono_tz::America::Sao_Paulo);
        assert_eq!(settings.sweep_hour, 8);
        assert_eq!(settings.locale, "pt-BR");
    }

    #[test]
    fn test_override_and_list() {
        let config = manager();
        config.set_config_value(config_keys::BOARD_TIMEZONE, "Europe/Lisbon").unwrap();
        config.set_config_value(config_keys::SWEEP_HOUR, "7").unwrap();
        config.set_config_value(config_keys::SWEEP_HOUR, "9").unwrap();

        assert_eq!(config.board_timezone().unwrap(), chrono_tz::Europe::Lisbon);
        assert_eq!(config.sweep_hour().unwrap(), 9);

        let all = config.list_configs().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.get(config_keys::SWEEP_HOUR).map(String::as_str), Some("9"));
    }

    #[test]
    fn test_invalid_values() {
        let config = manager();
        config.set_config_value(config_keys::BOARD_TIMEZONE, "Mars/Olympus").unwrap();
        config.set_config_value(config_keys::SWEEP_HOUR, "24").unwrap();
        config.set_config_value(config_keys::DEFAULT_BOARD_ID, "  ").unwrap();
        config.set_config_value(config_keys::UI_LOCALE, "zh-CN").unwrap();

        assert!(matches!(config.board_timezone(), Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(config.sweep_hour(), Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(config.default_board_id(), Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(config.ui_locale(), Err(ConfigError::InvalidValue { .. })));
    }
}
