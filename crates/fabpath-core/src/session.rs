// ── Controller session ──
//
// A `Session` is the authenticated handle every class query runs
// through. It is opened once per run and closed once, after both class
// queries, whether or not they succeeded.

use fabpath_api::{ApicClient, ManagedObject};
use tracing::{info, warn};

use crate::config::ControllerConfig;
use crate::error::CoreError;
use crate::pipeline::Snapshot;
use crate::source::ObjectSource;

/// An authenticated controller session.
pub struct Session {
    client: ApicClient,
    username: String,
}

impl Session {
    /// Log in and return the session handle.
    pub async fn open(config: &ControllerConfig) -> Result<Self, CoreError> {
        let client = ApicClient::new(config.url.clone(), &config.transport())?;
        Self::open_with(client, &config.username, &config.password).await
    }

    /// Log in through a pre-built client.
    pub async fn open_with(
        client: ApicClient,
        username: &str,
        password: &secrecy::SecretString,
    ) -> Result<Self, CoreError> {
        client.login(username, password).await?;
        info!(controller = %client.base_url(), user = username, "session opened");
        Ok(Self {
            client,
            username: username.to_owned(),
        })
    }

    /// Log out. A failed logout is logged, not returned: by the time a
    /// session closes, the data it was opened for is already in hand.
    pub async fn close(self) {
        match self.client.logout(&self.username).await {
            Ok(()) => info!("session closed"),
            Err(e) => warn!(error = %e, "logout failed"),
        }
    }
}

impl ObjectSource for Session {
    async fn query_class(&self, class: &str) -> Result<Vec<ManagedObject>, CoreError> {
        Ok(self.client.class_query(class).await?)
    }
}

/// Open a session, fetch both classes, close the session.
///
/// Logout happens exactly once, after the queries, even when a query
/// fails; the query error is then returned.
pub async fn fetch_snapshot(config: &ControllerConfig) -> Result<Snapshot, CoreError> {
    let timeout_secs = config.timeout.as_secs();
    let with_timeout = |err: CoreError| match err {
        CoreError::Timeout { .. } => CoreError::Timeout { timeout_secs },
        other => other,
    };

    let session = Session::open(config).await.map_err(with_timeout)?;
    let result = Snapshot::fetch(&session).await.map_err(with_timeout);
    session.close().await;
    result
}
