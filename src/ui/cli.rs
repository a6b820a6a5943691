use clap::{Parser, Subcommand};
use log::info;
use std::fmt::{self, Display};
use std::io;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

use crate::connections::client::EndpointFactory;
use crate::connections::errors::ConnectionError;
use crate::core::client_cache::ClientCache;
use crate::core::errors::AccountError;
use crate::core::session::{AccountSession, LoadState};
use crate::location::NavigationHistory;
use crate::storage::{Account, AccountStore};

type CliSession = AccountSession<NavigationHistory, EndpointFactory>;

/// Everything that can stop a CLI command.
#[derive(Debug)]
pub enum CliError {
    Account(AccountError),
    Connection(ConnectionError),
    Io(io::Error),
    Address(url::ParseError),
}

impl From<AccountError> for CliError {
    fn from(err: AccountError) -> Self {
        CliError::Account(err)
    }
}

impl From<ConnectionError> for CliError {
    fn from(err: ConnectionError) -> Self {
        CliError::Connection(err)
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<url::ParseError> for CliError {
    fn from(err: url::ParseError) -> Self {
        CliError::Address(err)
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Account(e) => write!(f, "{}", e),
            CliError::Connection(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Address(e) => write!(f, "Invalid address: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "multi-account", version, subcommand_required = true)]
pub struct Args {
    /// Accounts file (default: per-user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List configured accounts in resolution order
    List,
    /// Add an account, or replace the one with the same alias
    Add {
        #[arg(long)]
        alias: String,
        /// Backend endpoint URL
        #[arg(long)]
        endpoint: String,
        /// Public (anon) credential key
        #[arg(long)]
        key: String,
        #[arg(long)]
        display_name: Option<String>,
    },
    /// Remove an account
    Remove { alias: String },
    /// Make an account the fallback default
    Default { alias: String },
    /// Show which account an address resolves to
    Resolve { url: String },
    /// Switch to an account and print the rewritten address
    Switch { url: String, alias: String },
    /// Interactive session: back, forward, open <url>, switch <alias>, quit
    Shell { url: String },
}

pub async fn run_cli(args: Args) -> Result<(), CliError> {
    let store = match args.config {
        Some(path) => AccountStore::at(path),
        None => AccountStore::new()?,
    };
    info!("Using accounts file {:?}", store.path());

    match args.command {
        Command::List => list_accounts(&store),
        Command::Add {
            alias,
            endpoint,
            key,
            display_name,
        } => {
            let mut account = Account::new(alias, endpoint, key);
            if let Some(name) = display_name {
                account = account.with_display_name(name);
            }
            let alias = account.alias.clone();
            store.upsert(account)?;
            println!("saved '{}'", alias);
            Ok(())
        }
        Command::Remove { alias } => {
            if store.remove(&alias)? {
                println!("removed '{}'", alias);
                Ok(())
            } else {
                Err(AccountError::AccountNotFound(alias).into())
            }
        }
        Command::Default { alias } => {
            if store.set_default(&alias)? {
                println!("default is now '{}'", alias);
                Ok(())
            } else {
                Err(AccountError::AccountNotFound(alias).into())
            }
        }
        Command::Resolve { url } => {
            let session = open_session(&store, &url)?;
            print_status(&session);
            if let Some(err) = session.last_error() {
                return Err(err.clone().into());
            }
            if let Some(client) = session.client() {
                client.endpoint()?;
            }
            Ok(())
        }
        Command::Switch { url, alias } => {
            let mut session = open_session(&store, &url)?;
            session.switch_account(&alias)?;
            print_status(&session);
            Ok(())
        }
        Command::Shell { url } => {
            let mut session = open_session(&store, &url)?;
            print_status(&session);
            run_shell(&mut session).await
        }
    }
}

fn list_accounts(store: &AccountStore) -> Result<(), CliError> {
    let config = store.load()?;
    let registry = config.registry()?;
    if registry.is_empty() {
        println!("no accounts configured ({:?})", store.path());
        return Ok(());
    }
    for account in registry.accounts() {
        let marker = if config.default_account.as_deref() == Some(account.alias.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<16} {:<24} {}",
            marker,
            account.alias,
            account.label(),
            account.identity()
        );
    }
    Ok(())
}

fn open_session(store: &AccountStore, url: &str) -> Result<CliSession, CliError> {
    let config = store.load()?;
    let history = NavigationHistory::parse(url, config.token_pattern())?;
    let session =
        AccountSession::from_config(&config, history, ClientCache::new(EndpointFactory))?;
    Ok(session)
}

fn print_status(session: &CliSession) {
    let view = session.view();
    match (view.load_state, view.current_account, view.client) {
        (LoadState::Resolved, Some(account), Some(client)) => {
            let rule = session
                .last_rule()
                .map_or_else(|| "switch".to_owned(), |r| format!("{:?}", r).to_lowercase());
            println!("account:   {} ({}) [{}]", account.alias, account.label(), rule);
            match client.endpoint() {
                Ok(endpoint) => println!("endpoint:  {}", endpoint),
                Err(e) => println!("endpoint:  {} ({})", e, client.identity()),
            }
            println!("namespace: {}", client.namespace());
        }
        (state, _, _) => {
            let reason = view
                .last_error
                .map_or_else(|| format!("{:?}", state), ToString::to_string);
            println!("account:   <none> ({})", reason);
        }
    }
    if let Some(err) = view.last_error.filter(|_| view.load_state == LoadState::Resolved) {
        println!("warning:   {}", err);
    }
    println!("address:   {}", session.location().current());
}

const SHELL_HELP: &str = "commands: back | forward | open <url> | switch <alias> | quit";

async fn run_shell(session: &mut CliSession) -> Result<(), CliError> {
    println!("{}", SHELL_HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (None, _) => continue,
            (Some("quit" | "exit"), _) => break,
            (Some("back"), _) => {
                if !session.location_mut().back() {
                    println!("no earlier entry");
                }
            }
            (Some("forward"), _) => {
                if !session.location_mut().forward() {
                    println!("no later entry");
                }
            }
            (Some("open"), Some(target)) => match Url::parse(target) {
                // A fresh page load resolves from scratch.
                Ok(url) => {
                    session.location_mut().push(url);
                    session.initialize();
                }
                Err(e) => println!("invalid address: {}", e),
            },
            (Some("switch"), Some(alias)) => {
                if let Err(e) = session.switch_account(alias) {
                    println!("{}", e);
                }
            }
            _ => {
                println!("{}", SHELL_HELP);
                continue;
            }
        }
        session.poll_navigation();
        print_status(session);
    }
    info!("Shell closed.");
    Ok(())
}
