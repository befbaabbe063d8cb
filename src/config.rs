use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Shared secret every user logs in with.
    pub password: String,
    /// Messages returned by `GET /messages` without `limit` or `after`.
    pub history_limit: usize,
    pub max_history_limit: usize,
}

/// Variables are read as `LOBBY_<SECTION>__<KEY>`, e.g. `LOBBY_SERVER__PORT`.
pub const ENV_PREFIX: &str = "LOBBY";

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_env(environment())
    }

    fn from_env(env: ::config::Environment) -> anyhow::Result<Self> {
        let config = ::config::Config::builder()
            .add_source(env)
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("chat.password", "456")?
            .set_default("chat.history_limit", 50)?
            .set_default("chat.max_history_limit", 500)?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_owned(),
                port: 8080,
            },
            chat: ChatConfig {
                password: "456".to_owned(),
                history_limit: 50,
                max_history_limit: 500,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> ::config::Environment {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        environment().source(Some(vars))
    }

    #[test]
    fn defaults_without_variables() {
        let config = Config::from_env(env(&[])).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.chat.password, "456");
        assert_eq!(config.chat.history_limit, 50);
    }

    #[test]
    fn reads_prefixed_variables_only() {
        let config = Config::from_env(env(&[
            ("SERVER", "stray"),
            ("CHAT", "stray"),
            ("CHAT__PASSWORD", "ignored"),
            ("LOBBY_SERVER__PORT", "9090"),
            ("LOBBY_CHAT__PASSWORD", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.chat.password, "secret");
    }
}
