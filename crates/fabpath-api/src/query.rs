// Class-based managed-object queries
//
// `GET /api/class/<class>.json` returns every object of one class across
// the whole fabric, flattened out of the `imdata` envelope.

use tracing::debug;

use crate::client::ApicClient;
use crate::error::Error;
use crate::models::ManagedObject;

/// Access port block: the physical port range under an interface selector.
pub const PORT_BLOCK_CLASS: &str = "infraPortBlk";

/// Static path attachment of an EPG to an interface, port-channel, or vPC.
pub const PATH_ATTACHMENT_CLASS: &str = "fvRsPathAtt";

impl ApicClient {
    /// Fetch every object of the given class.
    ///
    /// `GET /api/class/{class}.json`
    pub async fn class_query(&self, class: &str) -> Result<Vec<ManagedObject>, Error> {
        let url = self.api_url(&format!("class/{class}.json"))?;
        debug!(class, "querying class");
        let envelope = self.get(url).await?;
        let objects = envelope.into_objects();
        debug!(class, count = objects.len(), "class query complete");
        Ok(objects)
    }
}
