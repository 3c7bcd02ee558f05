use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tagdex_cli::main_entry().await
}
