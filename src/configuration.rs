use std::{env, fs, path::Path, str::FromStr};

use url::Url;

use crate::{
    error::Error,
    handler::balances::DEFAULT_BATCH_SIZE,
    helpers::{formatter, parse_tuple_string, Formatter},
    model::Token,
};

/// Two 365-day years.
pub const DEFAULT_INACTIVITY_WINDOW: i64 = 63_072_000;
pub const DEFAULT_PAGE_SIZE: u32 = 1000;
pub const DEFAULT_HISTORY_LOOKBACK: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub subgraph_url: String,
    pub tokens: Vec<Token>,
    pub inactivity_window: i64,
    pub page_size: u32,
    pub batch_size: usize,
    pub history_lookback: u32,
    pub timeout: u64,
    pub output_directory: String,
}

impl Config {
    pub fn cutoff(&self, now: i64) -> i64 {
        now - self.inactivity_window
    }

    /// Tokens matching `symbols` (case-insensitive), in configuration order.
    /// An empty filter selects every configured token.
    pub fn select_tokens(&self, symbols: &[String]) -> Result<Vec<Token>, Error> {
        if symbols.is_empty() {
            return Ok(self.tokens.clone());
        }

        for symbol in symbols {
            if !self
                .tokens
                .iter()
                .any(|token| token.symbol.eq_ignore_ascii_case(symbol))
            {
                return Err(Error::NotSupportedToken(symbol.to_owned()));
            }
        }

        let tokens = self
            .tokens
            .iter()
            .filter(|token| {
                symbols
                    .iter()
                    .any(|symbol| token.symbol.eq_ignore_ascii_case(symbol))
            })
            .cloned()
            .collect();

        Ok(tokens)
    }
}

pub fn get_configuration() -> Result<Config, Error> {
    let api_key = env::var("GRAPH_API_KEY").unwrap_or_default();
    let subgraph_template = env::var("SUBGRAPH_URL")?;

    if subgraph_template.contains("$0") && api_key.is_empty() {
        return Err(Error::ConfigurationError(String::from(
            "GRAPH_API_KEY is required by SUBGRAPH_URL",
        )));
    }

    let subgraph_url =
        formatter(subgraph_template, &[Formatter::Str(api_key)]);
    Url::parse(&subgraph_url)?;

    let tokens = parse_tokens(env::var("TOKENS")?)?;
    let inactivity_window: i64 =
        env_or("INACTIVITY_WINDOW_IN_SEC", DEFAULT_INACTIVITY_WINDOW)?;
    let page_size: u32 = env_or("PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
    let batch_size: usize = env_or("BATCH_SIZE", DEFAULT_BATCH_SIZE)?;
    let history_lookback: u32 =
        env_or("HISTORY_LOOKBACK", DEFAULT_HISTORY_LOOKBACK)?;
    let timeout: u64 = env::var("TIMEOUT")?.parse()?;
    let output_directory = env::var("OUTPUT_DIRECTORY")?;

    if tokens.is_empty() {
        return Err(Error::ConfigurationError(String::from(
            "TOKENS must list at least one (address,symbol) pair",
        )));
    }

    if inactivity_window <= 0 {
        return Err(Error::ConfigurationError(String::from(
            "INACTIVITY_WINDOW_IN_SEC must be positive",
        )));
    }

    if page_size == 0 || batch_size == 0 || history_lookback == 0 {
        return Err(Error::ConfigurationError(String::from(
            "PAGE_SIZE, BATCH_SIZE and HISTORY_LOOKBACK must be positive",
        )));
    }

    let config = Config {
        subgraph_url,
        tokens,
        inactivity_window,
        page_size,
        batch_size,
        history_lookback,
        timeout,
        output_directory,
    };

    Ok(config)
}

/// Reads `key` from the environment, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> Result<T, Error>
where
    T: FromStr,
    Error: From<T::Err>,
{
    match env::var(key) {
        Ok(value) => Ok(value.trim().parse()?),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(e.into()),
    }
}

/// Loads `.env` (optional, secrets) and `dead-liquidity.conf` (required)
/// into the process environment. Variables already present in the
/// environment are left untouched.
pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";
    let app_config_file: &str = "dead-liquidity.conf";

    let directory = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/{}", directory, config_file);
    let app_config_path = format!("{}/{}", directory, app_config_file);

    if Path::new(&path).exists() {
        let config_string = fs::read_to_string(path)?;
        parse_config_string(&config_string);
    }

    let app_config_string = fs::read_to_string(app_config_path)?;
    parse_config_string(&app_config_string);

    Ok(())
}

fn parse_config_string(config: &str) {
    for (key, value) in parse_config_pairs(config) {
        if env::var_os(&key).is_none() {
            env::set_var(key, value);
        }
    }
}

fn parse_config_pairs(config: &str) -> Vec<(String, String)> {
    config
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (key, value) = line.split_at(line.find('=')?);
            Some((key.trim().to_owned(), value[1..].trim().to_owned()))
        })
        .collect()
}

pub fn parse_tokens(value: String) -> Result<Vec<Token>, Error> {
    let mut data: Vec<Token> = Vec::new();

    for c in parse_tuple_string(value)? {
        let items: Vec<&str> = c.split(',').map(str::trim).collect();
        if items.len() != 2 || items.iter().any(|item| item.is_empty()) {
            return Err(Error::ConfigurationError(format!(
                "token entry `({})` must be (address,symbol)",
                c
            )));
        }

        data.push(Token {
            address: items[0].to_lowercase(),
            symbol: items[1].to_owned(),
        });
    }

    Ok(data)
}
