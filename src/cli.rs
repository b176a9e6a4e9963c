use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::endpoint::Endpoint;

#[derive(Parser)]
#[command(name = "bucketsync")]
#[command(about = "Upload a folder to, or clear, a bucket on the shared data server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload every file in a folder, skipping files already in the bucket
    Upload {
        /// Path to the credential file (usually named credential.json)
        #[arg(long)]
        key: PathBuf,

        /// The directory you want to upload to the bucket
        #[arg(long)]
        src: PathBuf,

        /// Destination bucket name
        #[arg(long)]
        dst: String,

        /// Storage server to upload to
        #[arg(long, value_enum, default_value_t = Endpoint::default())]
        endpoint: Endpoint,
    },

    /// Delete every object in a bucket
    Clear {
        /// Path to the credential file (usually named credential.json)
        #[arg(long)]
        key: PathBuf,

        /// Bucket to clear
        #[arg(long)]
        dst: String,

        /// Storage server hosting the bucket
        #[arg(long, value_enum, default_value_t = Endpoint::default())]
        endpoint: Endpoint,
    },
}
