// Session authentication
//
// `aaaLogin` exchanges a username/password for a session token that the
// controller hands back as the `APIC-cookie` cookie; `aaaLogout` revokes it.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApicClient;
use crate::error::Error;

impl ApicClient {
    /// Authenticate with the controller using username/password.
    ///
    /// `POST /api/aaaLogin.json`. On success the session cookie is stored
    /// in the client's cookie jar and used for all subsequent requests.
    /// Any failure is reported as [`Error::Authentication`]; there is no retry.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.api_url("aaaLogin.json")?;

        debug!("logging in at {}", url);

        let body = json!({
            "aaaUser": {
                "attributes": {
                    "name": username,
                    "pwd": password.expose_secret(),
                }
            }
        });

        match self.post(url, &body).await {
            Ok(_) => {
                debug!("login successful");
                Ok(())
            }
            Err(Error::Authentication { message } | Error::Api { text: message, .. }) => {
                Err(Error::Authentication {
                    message: format!("login failed: {message}"),
                })
            }
            Err(other) => Err(other),
        }
    }

    /// End the current session.
    ///
    /// `POST /api/aaaLogout.json`
    pub async fn logout(&self, username: &str) -> Result<(), Error> {
        let url = self.api_url("aaaLogout.json")?;

        debug!("logging out at {}", url);

        let body = json!({
            "aaaUser": {
                "attributes": {
                    "name": username,
                }
            }
        });

        self.post(url, &body).await?;

        debug!("logout complete");
        Ok(())
    }
}
