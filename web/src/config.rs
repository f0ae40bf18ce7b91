use std::env;
use std::str::FromStr;

use crate::error::Error;

const DEFAULT_DATABASE_URL: &str = "/tmp/palavra.db";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_POOL_SIZE: u32 = 15;

/// Server settings, read from the environment (and `.env`).
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub workers: usize,
    pub pool_size: u32,
    pub sentry_dsn: Option<String>,
    pub stop_words_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_address: var("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            workers: parse_var("WORKERS", var("WORKERS"))?.unwrap_or_else(num_cpus::get),
            pool_size: parse_var("DB_POOL_SIZE", var("DB_POOL_SIZE"))?
                .unwrap_or(DEFAULT_POOL_SIZE),
            sentry_dsn: var("SENTRY_DSN"),
            stop_words_path: var("STOP_WORDS_PATH"),
        })
    }
}

fn parse_var<T: FromStr>(name: &str, value: Option<String>) -> Result<Option<T>, Error> {
    value
        .map(|v| {
            v.trim().parse().map_err(|_| Error::Config {
                name: name.to_string(),
                value: v.to_owned(),
            })
        })
        .transpose()
}
