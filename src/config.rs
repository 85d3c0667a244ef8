//! Runtime configuration.
//!
//! Every setting is taken from the command line first, then the environment,
//! then a built-in default.

use std::env;
use clap::Parser;
use crate::{Error, Result};

pub const DATA_DIR_ENV: &str = "PROFILE_DATA_DIR";
pub const HOST_ENV: &str = "PROFILE_HOST";
pub const PORT_ENV: &str = "PORT";

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Command-line arguments of the HTTP daemon.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about = "Serves the candidate profile API", long_about = None)]
pub struct ServerArgs {
    /// Directory holding the profile data file [env: PROFILE_DATA_DIR]
    #[arg(short, long)]
    pub data_dir: Option<String>,

    /// Address to bind [env: PROFILE_HOST]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on [env: PORT]
    #[arg(short, long)]
    pub port: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub data_dir: String,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Resolves the configuration against the process environment.
    pub fn from_env(args: ServerArgs) -> Result<Self> {
        Self::resolve(args, |key| env::var(key).ok())
    }

    /// Resolves the configuration using `lookup` for environment variables.
    pub fn resolve<F>(args: ServerArgs, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = resolve_data_dir(args.data_dir, &lookup);

        let host = args.host
            .or_else(|| lookup(HOST_ENV))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match args.port.or_else(|| lookup(PORT_ENV)) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid port {:?}", raw)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self { data_dir, host, port })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Picks the data directory from `arg`, then `PROFILE_DATA_DIR`, then the default.
pub fn resolve_data_dir<F>(arg: Option<String>, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    arg.or_else(|| lookup(DATA_DIR_ENV))
        .filter(|dir| !dir.is_empty())
        .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = ServerConfig::resolve(ServerArgs::default(), env_of(&[])).unwrap();
        assert_eq!(cfg.data_dir, "data");
        assert_eq!(cfg.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_env_then_args() {
        let env = env_of(&[("PORT", "8080"), ("PROFILE_DATA_DIR", "/var/lib/profile")]);
        let cfg = ServerConfig::resolve(ServerArgs::default(), &env).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.data_dir, "/var/lib/profile");

        let args = ServerArgs {
            port: Some("9000".into()),
            host: Some("127.0.0.1".into()),
            ..Default::default()
        };
        let cfg = ServerConfig::resolve(args, &env).unwrap();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:9000");
        assert_eq!(cfg.data_dir, "/var/lib/profile");
    }

    #[test]
    fn test_invalid_port() {
        let res = ServerConfig::resolve(ServerArgs::default(), env_of(&[("PORT", "http")]));
        assert!(matches!(res, Err(Error::Config(_))));
    }

    #[test]
    fn test_cli_parsing() {
        let args = ServerArgs::parse_from(["profiled", "--data-dir", "/tmp/p", "-p", "7000"]);
        assert_eq!(args.data_dir.as_deref(), Some("/tmp/p"));
        assert_eq!(args.port.as_deref(), Some("7000"));
    }
}
