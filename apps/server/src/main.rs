use anyhow::Context;
use homeval_kernel::config::load_config;
use homeval_logger::Logger;
use homeval_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;

    let cfg = load_config(Some("server")).context("Critical: Configuration is malformed")?;

    Server::builder().config(cfg).build().await?.run().await
}
