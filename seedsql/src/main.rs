use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod cmd;

use clap::Parser;

// the runtime backs the optional otlp exporter; extraction itself is synchronous
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cmd::Cli::parse().execute().await
}
