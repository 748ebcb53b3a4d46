// ==========================================
// 创意制作看板 - 跟进扫描守护进程
// ==========================================
// 用法:
//   creative-board          每日定时扫描 (默认 08:00 America/Sao_Paulo)
//   creative-board --once   立即扫描一次后退出
// ==========================================

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use creative_board::app::{get_default_db_path, AppState};
use creative_board::engine::next_run_after;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    creative_board::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", creative_board::APP_NAME, creative_board::VERSION);
    tracing::info!("==================================================");

    let once = std::env::args().skip(1).any(|arg| arg == "--once");

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let state = Arc::new(
        AppState::new(db_path)
            .map_err(anyhow::Error::msg)
            .context("无法初始化AppState")?,
    );

    if once {
        return run_sweep(state).await;
    }

    let settings = state.card_api.settings().clone();
    loop {
        let now = Utc::now();
        let next = next_run_after(now, settings.sweep_hour, settings.timezone);
        let wait = (next - now).to_std().unwrap_or_default();
        tracing::info!(next_run = %next, "等待下一次跟进扫描");

        tokio::select! {
            _ = tokio::time::sleep(wait) => {
                if let Err(e) = run_sweep(state.clone()).await {
                    tracing::error!("跟进扫描失败: {:#}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("收到中断信号, 退出");
                return Ok(());
            }
        }
    }
}

/// SQLite 读取为同步调用, 放到阻塞线程池执行
async fn run_sweep(state: Arc<AppState>) -> anyhow::Result<()> {
    let report = tokio::task::spawn_blocking(move || state.run_sweep(Utc::now()))
        .await
        .context("扫描任务异常退出")?
        .context("读取待跟进卡片失败")?;

    tracing::info!(
        notified = report.notified,
        failed = report.failed,
        "本轮扫描结束"
    );
    Ok(())
}
