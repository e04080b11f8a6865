use anyhow::Result;
use hemobank::config::{self, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_yaml_file(&path)?,
        None => AppConfig::default(),
    };
    config::init_tracing(&config);
    hemobank::server::serve(&config).await
}
