pub mod config {
    use std::path::PathBuf;

    pub use ::config::ConfigError;
    use ::config::Environment;
    use serde::Deserialize;

    /// Which `BookStore` backs the service.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum StoreKind {
        #[default]
        Postgres,
        Memory,
    }

    #[derive(Debug, Deserialize)]
    pub struct Config {
        pub server_addr: String,
        #[serde(default)]
        pub pg: deadpool_postgres::Config,
        pub upload_dir: PathBuf,
        pub catalog_store: StoreKind,
    }

    impl Config {
        /// Reads `SERVER_ADDR`, `UPLOAD_DIR`, `CATALOG_STORE` and `PG__*`.
        pub fn from_env() -> Result<Self, ConfigError> {
            Self::from_source(Environment::default())
        }

        pub fn from_source(env: Environment) -> Result<Self, ConfigError> {
            ::config::Config::builder()
                .set_default("server_addr", "127.0.0.1:3000")?
                .set_default("upload_dir", "./uploads")?
                .set_default("catalog_store", "postgres")?
                .add_source(env.separator("__"))
                .build()?
                .try_deserialize()
        }
    }

}
