//! Server configuration from command-line flags and environment variables.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "rollcall-server", version, about = "Live attendance session server")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "ROLLCALL_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "ROLLCALL_PORT", default_value_t = 8080)]
    pub port: u16,

    /// HS256 secret shared with the token issuer
    #[arg(long, env = "ROLLCALL_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// JSON file of classes to load at startup
    #[arg(long, env = "ROLLCALL_SEED")]
    pub seed: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "ROLLCALL_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // テスト項目: 秘密鍵だけ指定すればその他はデフォルト値になる
        // when (操作):
        let config =
            ServerConfig::try_parse_from(["rollcall-server", "--jwt-secret", "s3cret"]).unwrap();

        // then (期待する結果):
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_flags_override_defaults() {
        // テスト項目: フラグで値を上書きできる
        // when (操作):
        let config = ServerConfig::try_parse_from([
            "rollcall-server",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--jwt-secret",
            "s3cret",
            "--seed",
            "classes.json",
        ])
        .unwrap();

        // then (期待する結果):
        assert_eq!(config.addr(), "0.0.0.0:9000");
        assert_eq!(config.seed, Some(PathBuf::from("classes.json")));
    }
}
