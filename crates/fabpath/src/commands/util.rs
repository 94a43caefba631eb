//! Shared helpers for command handlers.

use fabpath_core::{
    Analysis, ControllerConfig, DumpSource, IndexPolicy, Snapshot, fetch_snapshot,
};

use crate::cli::GlobalOpts;
use crate::config::{self, Config};
use crate::error::CliError;

/// Where a command's managed objects come from.
#[derive(Debug)]
pub enum DataSource {
    /// Live controller, one scoped session per run.
    Controller(ControllerConfig),
    /// Class queries saved by `fabpath dump`.
    Dump {
        dump: DumpSource,
        policy: IndexPolicy,
    },
}

impl DataSource {
    /// `--from-dump` wins; otherwise resolve a controller from profile + flags.
    pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<Self, CliError> {
        if let Some(ref dir) = global.from_dump {
            return Ok(Self::Dump {
                dump: DumpSource::new(dir.clone()),
                policy: config::active_policy(global, cfg),
            });
        }
        Ok(Self::Controller(config::resolve_controller(global, cfg)?))
    }

    pub fn policy(&self) -> &IndexPolicy {
        match self {
            Self::Controller(cfg) => &cfg.policy,
            Self::Dump { policy, .. } => policy,
        }
    }

    /// Fetch both classes.
    pub async fn snapshot(&self) -> Result<Snapshot, CliError> {
        let snapshot = match self {
            Self::Controller(cfg) => fetch_snapshot(cfg).await?,
            Self::Dump { dump, .. } => Snapshot::fetch(dump).await?,
        };
        Ok(snapshot)
    }

    /// Fetch, index, and resolve.
    pub async fn analyze(&self) -> Result<Analysis, CliError> {
        let inventory = self.snapshot().await?.to_inventory()?;
        Ok(inventory.analyze(self.policy())?)
    }
}

/// `true` when `filter` is unset or equals `value`.
pub fn matches(filter: Option<&str>, value: &str) -> bool {
    filter.is_none_or(|f| f == value)
}
