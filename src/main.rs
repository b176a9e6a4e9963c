use anyhow::Context;
use bucketsync::credentials::Credentials;
use bucketsync::s3::S3Store;
use bucketsync::{clear, cli, progress, upload};
use clap::Parser;
use dotenv::dotenv;
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may set RUST_LOG
    dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = cli::Cli::parse();

    match args.command {
        cli::Commands::Upload {
            key,
            src,
            dst,
            endpoint,
        } => {
            let credentials = Credentials::load(&key)?;
            let store = S3Store::for_endpoint(endpoint, &credentials)?;
            info!("Uploading {} to bucket {} on {}", src.display(), dst, endpoint);

            let bar = progress::upload_progress();
            let summary = upload::upload_folder(&store, &dst, &src, &bar)
                .await
                .with_context(|| format!("Upload to {} on target {} failed", dst, endpoint))?;
            println!(
                "{} uploaded, {} skipped, {} failed",
                summary.uploaded, summary.skipped, summary.failed
            );
        }
        cli::Commands::Clear { key, dst, endpoint } => {
            let credentials = Credentials::load(&key)?;
            let store = S3Store::for_endpoint(endpoint, &credentials)?;
            info!("Clearing bucket {} on {}", dst, endpoint);

            let bar = progress::clear_progress();
            let summary = clear::clear_bucket(&store, &dst, &bar)
                .await
                .with_context(|| format!("Clearing {} on target {} failed", dst, endpoint))?;
            println!(
                "{} deleted, {} skipped, {} failed",
                summary.deleted, summary.skipped, summary.failed
            );
        }
    }

    Ok(())
}
