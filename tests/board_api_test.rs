// ==========================================
// BoardApi / AppState 集成测试
// ==========================================


use creative_board::api::ApiError;
use creative_board::app::AppState;
use creative_board::config::config_keys;
use test_helpers::{create_test_db, TestEnv};

#[test]
fn test_default_board_created_on_startup() {
    let env = TestEnv::new().expect("无法创建测试环境");
    let board = env
        .state
        .board_api
        .get_board("main")
        .unwrap()
        .expect("默认看板应已创建");

    assert_eq!(board.id, "main");
    assert_eq!(board.name, "Produção");
}

#[test]
fn test_create_user_upsert_keeps_created_at() {
    let env = TestEnv::new().expect("无法创建测试环境");
    let api = &env.state.board_api;

    let first = api
        .create_user("u-ana", "Ana", "ana@example.com", Some("#FF8800"))
        .unwrap();
    let second = api
        .create_user("u-ana", "Ana Souza", "ana.souza@example.com", None)
        .unwrap();

    assert_eq!(second.created_at, first.created_at);
    let stored = api.get_user("u-ana").unwrap().unwrap();
    assert_eq!(stored.display_name, "Ana Souza");
    assert!(stored.color_hex.is_none());
}

#[test]
fn test_create_user_trims_id_before_lookup() {
    let env = TestEnv::new().expect("无法创建测试环境");
    let api = &env.state.board_api;

    let first = api.create_user(" u1 ", "Bia", "bia@example.com", None).unwrap();
    assert_eq!(first.id, "u1");

    let second = api
        .create_user(" u1 ", "Bia Lima", "bia@example.com", None)
        .unwrap();
    let stored = api.get_user("u1").unwrap().unwrap();

    assert_eq!(second.created_at, first.created_at);
    assert_eq!(stored.created_at, second.created_at);
    assert_eq!(stored.display_name, "Bia Lima");
}

#[test]
fn test_create_user_invalid_input() {
    let env = TestEnv::new().expect("无法创建测试环境");
    let api = &env.state.board_api;

    assert!(matches!(
        api.create_user(" ", "Ana", "ana@example.com", None),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        api.create_user("u-ana", "Ana", "sem-arroba", None),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        api.create_user("u-ana", "Ana", "ana@example.com", Some("laranja")),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(api.get_user("u-ana").unwrap().is_none());
}

#[test]
fn test_custom_board_id_from_config() {
    let (_temp_file, db_path) = create_test_db().unwrap();

    {
        let state = AppState::new(db_path.clone()).unwrap();
        state
            .config
            .set_config_value(config_keys::DEFAULT_BOARD_ID, "eventos")
            .unwrap();
    }

    let state = AppState::new(db_path).unwrap();
    assert_eq!(state.card_api.settings().default_board_id, "eventos");
    assert!(state.board_api.get_board("eventos").unwrap().is_some());
}

#[test]
fn test_invalid_timezone_fails_startup() {
    let (_temp_file, db_path) = create_test_db().unwrap();

    {
        let state = AppState::new(db_path.clone()).unwrap();
        state
            .config
            .set_config_value(config_keys::BOARD_TIMEZONE, "Mars/Olympus")
            .unwrap();
    }

    assert!(AppState::new(db_path).is_err());
}
