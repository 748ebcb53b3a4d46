// ==========================================
// 创意制作看板 - 数据仓储层
// ==========================================
// 职责: 数据访问, 不含业务逻辑
// ==========================================

pub mod board_repo;
pub mod card_repo;
pub mod error;
pub mod user_repo;

pub use board_repo::BoardRepository;
pub use card_repo::CardRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use user_repo::UserRepository;
