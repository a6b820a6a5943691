use anyhow::Result;
use multi_account::{Account, AccountStore, SessionConfig};
use std::fs;

mod common;
use common::{alias_of, demo_config, init_logs, session_with};

#[test]
fn missing_file_loads_as_empty_config() -> Result<()> {
    init_logs();
    let dir = tempfile::tempdir()?;
    let store = AccountStore::at(dir.path().join("accounts.json"));

    let config = store.load()?;

    assert_eq!(config, SessionConfig::default());
    assert_eq!(config.query_param, "account");
    Ok(())
}

#[test]
fn saved_config_round_trips_and_drives_a_session() -> Result<()> {
    init_logs();
    let dir = tempfile::tempdir()?;
    let store = AccountStore::at(dir.path().join("nested").join("accounts.json"));

    store.save(&demo_config())?;
    let loaded = store.load()?;
    assert_eq!(loaded, demo_config());

    let (session, _) = session_with(&loaded, "https://app.example.co/account/client");
    assert_eq!(alias_of(&session), Some("client"));
    Ok(())
}

#[test]
fn upsert_remove_and_default_edit_the_file() -> Result<()> {
    init_logs();
    let dir = tempfile::tempdir()?;
    let store = AccountStore::at(dir.path().join("accounts.json"));

    store.upsert(Account::new("personal", "https://p.example.co", "k1"))?;
    store.upsert(Account::new("work", "https://w.example.co", "k2"))?;
    store.upsert(
        Account::new("personal", "https://p2.example.co", "k3").with_display_name("Me"),
    )?;
    assert!(store.set_default("work")?);
    assert!(!store.set_default("ghost")?);

    let config = store.load()?;
    let aliases: Vec<_> = config.accounts.iter().map(|a| a.alias.as_str()).collect();
    assert_eq!(aliases, ["personal", "work"]);
    assert_eq!(config.accounts[0].label(), "Me");
    assert_eq!(config.default_account.as_deref(), Some("work"));

    assert!(store.remove("work")?);
    assert!(!store.remove("work")?);
    let config = store.load()?;
    assert_eq!(config.accounts.len(), 1);
    assert_eq!(config.default_account, None);
    Ok(())
}

#[test]
fn malformed_file_is_an_error() -> Result<()> {
    init_logs();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("accounts.json");
    fs::write(&path, "{ not json")?;

    let err = AccountStore::at(&path).load().expect_err("garbage must not parse");

    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    Ok(())
}

#[test]
fn custom_token_names_from_the_file_are_used() -> Result<()> {
    init_logs();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("accounts.json");
    fs::write(
        &path,
        r#"{
            "accounts": [
                { "alias": "a", "endpoint_url": "https://a.example.co", "credential_key": "k" },
                { "alias": "b", "endpoint_url": "https://b.example.co", "credential_key": "k" }
            ],
            "query_param": "tenant",
            "path_marker": "t"
        }"#,
    )?;

    let config = AccountStore::at(&path).load()?;
    let (session, _) = session_with(&config, "https://app.example.co/?account=a&tenant=b");
    assert_eq!(alias_of(&session), Some("b"));
    let (session, _) = session_with(&config, "https://app.example.co/t/a?tenant=b");
    assert_eq!(alias_of(&session), Some("a"));
    Ok(())
}
