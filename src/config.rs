use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use crate::api::API_BASE;
use crate::catalog::DEFAULT_DETAIL_CONCURRENCY;
use crate::quiz::{DrawPolicy, DEFAULT_DRAW_ATTEMPTS};

/// Settings for building a [`crate::dex::Dex`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub draw: DrawPolicy,
    pub detail_concurrency: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: API_BASE.to_string(),
            draw: DrawPolicy::default(),
            detail_concurrency: DEFAULT_DETAIL_CONCURRENCY,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct DexArgs {
    /// PokeAPI base URL
    #[arg(long, default_value = API_BASE)]
    pub api_base: String,

    /// Quiz draws before giving up on a round
    #[arg(long, default_value_t = DEFAULT_DRAW_ATTEMPTS)]
    pub draw_attempts: u32,

    /// Delay between failed quiz target draws, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub draw_retry_ms: u64,

    /// Concurrent detail requests per page
    #[arg(long, default_value_t = DEFAULT_DETAIL_CONCURRENCY)]
    pub detail_concurrency: usize,

    /// Directory for log files (defaults to the user data directory)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl From<&DexArgs> for ClientConfig {
    fn from(args: &DexArgs) -> Self {
        Self {
            api_base: args.api_base.clone(),
            draw: DrawPolicy {
                max_attempts: args.draw_attempts.max(1),
                retry_delay: Duration::from_millis(args.draw_retry_ms),
            },
            detail_concurrency: args.detail_concurrency.max(1),
        }
    }
}
