//! Configuration loading tests
//!
//! Runs as its own test binary, and as a single test, so the environment
//! mutations cannot race a concurrent `AppConfig::load`.

use libris::config::AppConfig;

#[test]
fn defaults_apply_and_environment_reaches_two_word_keys() {
    let config = AppConfig::load().unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.database.max_connections, 5);
    assert_eq!(config.logging.level, "info");

    std::env::set_var("LIBRIS_SERVER__PORT", "8088");
    std::env::set_var("LIBRIS_DATABASE__MAX_CONNECTIONS", "9");

    let config = AppConfig::load().unwrap();

    assert_eq!(config.server.port, 8088);
    assert_eq!(config.database.max_connections, 9);

    std::env::remove_var("LIBRIS_SERVER__PORT");
    std::env::remove_var("LIBRIS_DATABASE__MAX_CONNECTIONS");
}
