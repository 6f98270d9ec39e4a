use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    advisor_web::run().await
}
