// ==========================================
// 创意制作看板 - API 层
// ==========================================
// 职责: 业务接口, 编排 Engine 与 Repository
// ==========================================

pub mod board_api;
pub mod card_api;
pub mod card_view;
pub mod error;

pub use board_api::BoardApi;
pub use card_api::CardApi;
pub use card_view::{BoardView, CardView, ColumnView};
pub use error::{ApiError, ApiResult};
