use std::env;
use std::path::PathBuf;

/// Configuração do servidor, lida do ambiente (e de um `.env`, se existir).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind: String,
    pub db_path: PathBuf,
}

const BIND_PADRAO: &str = "127.0.0.1:8080";
const DB_PADRAO: &str = "data/studium.db";

impl Default for Config {
    fn default() -> Self {
        Config { bind: BIND_PADRAO.to_string(), db_path: PathBuf::from(DB_PADRAO) }
    }
}

impl Config {
    /// Honors STUDIUM_BIND and STUDIUM_DB_PATH.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self::from_vars(env::var("STUDIUM_BIND").ok(), env::var("STUDIUM_DB_PATH").ok())
    }

    fn from_vars(bind: Option<String>, db: Option<String>) -> Self {
        let bind = bind.filter(|b| !b.trim().is_empty()).unwrap_or_else(|| BIND_PADRAO.to_string());
        let db_path = match db.filter(|p| !p.trim().is_empty()) {
            Some(p) => db_path_from_url(&p),
            None => PathBuf::from(DB_PADRAO),
        };
        Config { bind, db_path }
    }

    pub fn em_memoria(&self) -> bool {
        self.db_path.as_os_str() == ":memory:"
    }
}

/// Aceita caminho simples, `sqlite://` ou `file://`.
fn db_path_from_url(p: &str) -> PathBuf {
    if let Some(rest) = p.strip_prefix("sqlite://") {
        PathBuf::from(rest)
    } else if let Some(rest) = p.strip_prefix("file://") {
        PathBuf::from(rest)
    } else {
        PathBuf::from(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valores_padrao() {
        let c = Config::from_vars(None, Some("  ".into()));
        assert_eq!(c, Config::default());
        assert!(!c.em_memoria());
    }

    #[test]
    fn remove_esquema_da_url() {
        let c = Config::from_vars(Some("0.0.0.0:9000".into()), Some("sqlite://tmp/plano.db".into()));
        assert_eq!(c.bind, "0.0.0.0:9000");
        assert_eq!(c.db_path, PathBuf::from("tmp/plano.db"));
        assert!(Config::from_vars(None, Some(":memory:".into())).em_memoria());
    }

    #[test]
    fn memoria_via_url() {
        assert!(Config::from_vars(None, Some("sqlite://:memory:".into())).em_memoria());
        assert!(!Config::from_vars(None, Some("file://dados/:memory:.db".into())).em_memoria());
    }
}
