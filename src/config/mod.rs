//! Server configuration
//!
//! Every search is sent to one server. A [`ServerConfig`] names the endpoint prefix that server
//! exposes for each [`BackendKind`] and the User-Agent to present.
//!
//! A few well known servers are built in through [`DEFAULT_SERVERS`]. More can be declared in
//! `$XDG_CONFIG_HOME/imageboard-query/servers.toml` (or the OS equivalent) and override
//! built-in entries with the same name:
//! ```toml
//! [servers.mybooru]
//! pretty_name = "My Booru"
//! base_url = "https://mybooru.example"
//! post_url = "https://mybooru.example/index.php?page=dapi&q=index&s=post"
//! tag_url = "https://mybooru.example/index.php?page=dapi&q=index&s=tag"
//! ```
use crate::imageboards::BackendKind;
use crate::{dapi_url, server_config};
use directories::ProjectDirs;
use log::{debug, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod macros;

pub(crate) const DEFAULT_UA: &str =
    concat!("Rust Imageboard Query/", env!("CARGO_PKG_VERSION"));

pub(crate) const E621_UA: &str = concat!(
    "Rust Imageboard Query/",
    env!("CARGO_PKG_VERSION"),
    " (by e621 user FerrahWolfeh)"
);

const CONFIG_FILE: &str = "servers.toml";

pub static DEFAULT_SERVERS: Lazy<HashMap<String, ServerConfig>> = Lazy::new(|| {
    let mut hmap = HashMap::with_capacity(5);
    hmap.insert(
        "gelbooru".to_string(),
        server_config!(
            "gelbooru",
            "Gelbooru",
            DEFAULT_UA,
            "https://gelbooru.com",
            dapi_url!("https://gelbooru.com", "post"),
            dapi_url!("https://gelbooru.com", "tag"),
            dapi_url!("https://gelbooru.com", "user"),
            dapi_url!("https://gelbooru.com", "comment"),
            None
        ),
    );
    hmap.insert(
        "safebooru".to_string(),
        server_config!(
            "safebooru",
            "Safebooru",
            DEFAULT_UA,
            "https://safebooru.org",
            dapi_url!("https://safebooru.org", "post"),
            dapi_url!("https://safebooru.org", "tag"),
            None,
            dapi_url!("https://safebooru.org", "comment"),
            None
        ),
    );
    hmap.insert(
        "rule34".to_string(),
        server_config!(
            "rule34",
            "Rule34",
            DEFAULT_UA,
            "https://rule34.xxx",
            dapi_url!("https://api.rule34.xxx", "post"),
            dapi_url!("https://api.rule34.xxx", "tag"),
            None,
            dapi_url!("https://api.rule34.xxx", "comment"),
            None
        ),
    );
    hmap.insert(
        "e621".to_string(),
        server_config!(
            "e621",
            "e621",
            E621_UA,
            "https://e621.net",
            None,
            None,
            None,
            None,
            Some(String::from("https://e621.net/posts.json"))
        ),
    );
    hmap.insert(
        "e926".to_string(),
        server_config!(
            "e926",
            "e926",
            E621_UA,
            "https://e926.net",
            None,
            None,
            None,
            None,
            Some(String::from("https://e926.net/posts.json"))
        ),
    );
    hmap
});

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Indicates any unrecoverable IO error when trying to read the servers file.
    #[error("Failed to read config file. error: {source}")]
    ConfigIOError {
        #[from]
        source: io::Error,
    },

    #[error("Failed to parse config file. error: {source}")]
    ConfigParseError {
        #[from]
        source: toml::de::Error,
    },

    #[error("Could not determine the user configuration directory")]
    NoConfigDir,

    #[error("Unknown server: {0}")]
    UnknownServer(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Key used to select the server. Filled from the table name when read from a file.
    #[serde(default)]
    pub name: String,
    pub pretty_name: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    pub base_url: String,
    pub post_url: Option<String>,
    pub tag_url: Option<String>,
    pub user_url: Option<String>,
    pub comment_url: Option<String>,
    pub json_post_url: Option<String>,
}

fn default_user_agent() -> String {
    DEFAULT_UA.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: String::from("gelbooru"),
            pretty_name: String::from("Gelbooru"),
            user_agent: DEFAULT_UA.to_string(),
            base_url: String::from("https://gelbooru.com"),
            post_url: dapi_url!("https://gelbooru.com", "post"),
            tag_url: dapi_url!("https://gelbooru.com", "tag"),
            user_url: dapi_url!("https://gelbooru.com", "user"),
            comment_url: dapi_url!("https://gelbooru.com", "comment"),
            json_post_url: None,
        }
    }
}

impl Display for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl ServerConfig {
    /// Endpoint prefix for searches of the given kind, if the server offers them.
    pub fn endpoint(&self, kind: BackendKind) -> Option<&str> {
        match kind {
            BackendKind::PostSearch => self.post_url.as_deref(),
            BackendKind::TagSearch => self.tag_url.as_deref(),
            BackendKind::UserSearch => self.user_url.as_deref(),
            BackendKind::CommentSearch => self.comment_url.as_deref(),
            BackendKind::JsonPostSearch => self.json_post_url.as_deref(),
        }
        .filter(|url| !url.is_empty())
    }

    /// Every kind of search this server can answer.
    pub fn supported_kinds(&self) -> Vec<BackendKind> {
        [
            BackendKind::PostSearch,
            BackendKind::TagSearch,
            BackendKind::UserSearch,
            BackendKind::CommentSearch,
            BackendKind::JsonPostSearch,
        ]
        .into_iter()
        .filter(|kind| self.endpoint(*kind).is_some())
        .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ServersFile {
    #[serde(default)]
    servers: HashMap<String, ServerConfig>,
}

/// Parses the contents of a `servers.toml` file.
pub fn parse_servers(config_content: &str) -> Result<HashMap<String, ServerConfig>, ConfigError> {
    let file: ServersFile = toml::from_str(config_content)?;

    let servers: HashMap<String, ServerConfig> = file
        .servers
        .into_iter()
        .map(|(name, mut server)| {
            server.name = name.clone();
            (name, server)
        })
        .collect();

    debug!("Servers config decoded with {} entries", servers.len());
    Ok(servers)
}

/// Location of the user's `servers.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dirs =
        ProjectDirs::from("com", "ferrahwolfeh", "imageboard-query").ok_or(ConfigError::NoConfigDir)?;
    Ok(dirs.config_dir().join(CONFIG_FILE))
}

/// Built-in servers merged with the ones declared in `path`.
///
/// Without an explicit path the default location is tried, and silently skipped if there's no
/// file there.
pub async fn load_servers(path: Option<&Path>) -> Result<HashMap<String, ServerConfig>, ConfigError> {
    let mut servers = DEFAULT_SERVERS.clone();

    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Ok(p) if p.exists() => p,
            Ok(_) => return Ok(servers),
            Err(e) => {
                warn!("{}, using built-in servers only", e);
                return Ok(servers);
            }
        },
    };

    debug!("Reading servers from {}", path.display());
    let content = tokio::fs::read_to_string(&path).await?;
    servers.extend(parse_servers(&content)?);

    Ok(servers)
}

/// Picks `name` out of `servers`.
pub fn find_server(
    servers: &HashMap<String, ServerConfig>,
    name: &str,
) -> Result<ServerConfig, ConfigError> {
    servers
        .get(name)
        .cloned()
        .ok_or_else(|| ConfigError::UnknownServer(name.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn built_in_servers() {
        let gelbooru = DEFAULT_SERVERS.get("gelbooru").unwrap();
        assert_eq!(
            gelbooru.endpoint(BackendKind::PostSearch),
            Some("https://gelbooru.com/index.php?page=dapi&q=index&s=post")
        );
        assert_eq!(
            gelbooru.endpoint(BackendKind::CommentSearch),
            Some("https://gelbooru.com/index.php?page=dapi&q=index&s=comment")
        );
        assert_eq!(gelbooru.endpoint(BackendKind::JsonPostSearch), None);

        let e621 = DEFAULT_SERVERS.get("e621").unwrap();
        assert_eq!(e621.supported_kinds(), [BackendKind::JsonPostSearch]);
        assert!(e621.user_agent.contains("e621 user"));
    }

    #[test]
    fn servers_file_overrides_by_name() {
        let content = r#"
            [servers.gelbooru]
            pretty_name = "Gelbooru mirror"
            base_url = "https://mirror.example"
            post_url = "https://mirror.example/index.php?page=dapi&q=index&s=post"

            [servers.mybooru]
            pretty_name = "My Booru"
            user_agent = "custom agent"
            base_url = "https://mybooru.example"
            json_post_url = "https://mybooru.example/posts.json"
        "#;

        let parsed = parse_servers(content).unwrap();
        assert_eq!(parsed.len(), 2);

        let mirror = &parsed["gelbooru"];
        assert_eq!(mirror.name, "gelbooru");
        assert_eq!(mirror.user_agent, DEFAULT_UA);
        assert_eq!(mirror.endpoint(BackendKind::TagSearch), None);

        let mut servers = DEFAULT_SERVERS.clone();
        servers.extend(parsed);
        let mine = find_server(&servers, "mybooru").unwrap();
        assert_eq!(mine.user_agent, "custom agent");
        assert_eq!(
            mine.endpoint(BackendKind::JsonPostSearch),
            Some("https://mybooru.example/posts.json")
        );
        assert_eq!(
            find_server(&servers, "gelbooru").unwrap().pretty_name,
            "Gelbooru mirror"
        );
    }

    #[test]
    fn unknown_server() {
        assert!(matches!(
            find_server(&DEFAULT_SERVERS, "nope"),
            Err(ConfigError::UnknownServer(_))
        ));
    }

    #[test]
    fn broken_file_is_an_error() {
        assert!(matches!(
            parse_servers("[servers.x]\npretty_name = 3"),
            Err(ConfigError::ConfigParseError { .. })
        ));
    }

    #[tokio::test]
    async fn missing_explicit_file_is_an_error() {
        let res = load_servers(Some(Path::new("/definitely/not/here/servers.toml"))).await;
        assert!(matches!(res, Err(ConfigError::ConfigIOError { .. })));
    }
}
