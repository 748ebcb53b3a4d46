// ==========================================
// 创意制作看板 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::api::{ApiResult, BoardApi, CardApi};
use crate::config::config_manager::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use crate::engine::events::{FollowUpNotifier, NoOpNotifier};
use crate::engine::sweep::{FollowUpSweep, SweepReport};
use crate::repository::{BoardRepository, CardRepository, UserRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 卡片API
    pub card_api: Arc<CardApi>,

    /// 看板/成员API
    pub board_api: Arc<BoardApi>,

    /// 配置管理器
    pub config: Arc<ConfigManager>,

    /// 每日跟进扫描器
    pub sweep: Arc<FollowUpSweep>,
}

impl AppState {
    /// 创建新的AppState实例 (使用空操作通知者)
    pub fn new(db_path: String) -> Result<Self, String> {
        Self::with_notifier(db_path, Arc::new(NoOpNotifier))
    }

    /// 创建AppState实例并指定通知者
    ///
    /// 该方法会：
    /// 1. 打开共享连接并初始化表结构
    /// 2. 读取看板配置并切换界面语言
    /// 3. 初始化Repository与API
    /// 4. 确保默认看板存在
    pub fn with_notifier(
        db_path: String,
        notifier: Arc<dyn FollowUpNotifier>,
    ) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("表结构初始化失败: {}", e))?;
        match read_schema_version(&conn) {
            Ok(Some(v)) if v == CURRENT_SCHEMA_VERSION => {}
            Ok(v) => tracing::warn!(
                "schema_version 不匹配: 期望 {}, 实际 {:?}",
                CURRENT_SCHEMA_VERSION,
                v
            ),
            Err(e) => tracing::warn!("schema_version 读取失败(将继续启动): {}", e),
        }
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 配置
        // ==========================================
        let config = Arc::new(ConfigManager::from_connection(conn.clone()));
        let settings = config
            .load_settings()
            .map_err(|e| format!("看板配置无效: {}", e))?;
        tracing::info!(
            board_id = %settings.default_board_id,
            timezone = %settings.timezone,
            sweep_hour = settings.sweep_hour,
            locale = %settings.locale,
            "看板配置已加载"
        );
        crate::i18n::set_locale(&settings.locale);

        // ==========================================
        // Repository / API
        // ==========================================
        let card_repo = Arc::new(CardRepository::from_connection(conn.clone()));
        let board_repo = Arc::new(BoardRepository::from_connection(conn.clone()));
        let user_repo = Arc::new(UserRepository::from_connection(conn));

        let board_api = Arc::new(BoardApi::new(board_repo, user_repo));
        board_api
            .ensure_board(&settings.default_board_id)
            .map_err(|e| format!("默认看板初始化失败: {}", e))?;

        let card_api = Arc::new(CardApi::new(card_repo, settings));
        let sweep = Arc::new(FollowUpSweep::new(notifier));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            card_api,
            board_api,
            config,
            sweep,
        })
    }

    /// 执行一次跟进扫描: 读取候选卡片后交给扫描器
    ///
    /// 含同步 SQLite 读取, 异步上下文中应经 spawn_blocking 调用
    pub fn run_sweep(&self, now: DateTime<Utc>) -> ApiResult<SweepReport> {
        let cards = self.card_api.list_follow_up_candidates(now)?;
        Ok(self.sweep.run(&cards, now))
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 CREATIVE_BOARD_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("CREATIVE_BOARD_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./creative_board.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("creative-board");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("creative_board.db");
        }
    }

    path.to_string_lossy().to_string()
}
