#![allow(dead_code)]

pub mod fake_client;

use fake_client::FakeFactory;
use log::LevelFilter;
use multi_account::{Account, AccountSession, ClientCache, NavigationHistory, SessionConfig};

pub type TestSession = AccountSession<NavigationHistory, FakeFactory>;

/// Logs appear only with `-- --nocapture` or when a test fails.
pub fn init_logs() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// personal / work / client, default `personal`.
pub fn demo_config() -> SessionConfig {
    SessionConfig::new(vec![
        Account::new("personal", "https://personal.example.co", "key1")
            .with_display_name("Personal Account"),
        Account::new("work", "https://work.example.co", "key2").with_display_name("Work Account"),
        Account::new("client", "https://client.example.co", "key3"),
    ])
    .with_default_account("personal")
}

pub fn session_with(config: &SessionConfig, url: &str) -> (TestSession, FakeFactory) {
    let factory = FakeFactory::default();
    let history = NavigationHistory::parse(url, config.token_pattern()).expect("valid test url");
    let session = AccountSession::from_config(config, history, ClientCache::new(factory.clone()))
        .expect("valid test config");
    (session, factory)
}

pub fn session_at(url: &str) -> (TestSession, FakeFactory) {
    session_with(&demo_config(), url)
}

pub fn alias_of(session: &TestSession) -> Option<&str> {
    session.current_account().map(|a| a.alias.as_str())
}
