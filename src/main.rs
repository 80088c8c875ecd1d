use anyhow::Result;
use studymate::{api, logger, Config};

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();

    let config = Config::from_env();

    api::serve(config).await?;

    Ok(())
}
