// Location resolution endpoint

use tracing::{debug, error};

use crate::error::Error;
use crate::live::client::LiveClient;
use crate::models::ResolvedLocation;

impl LiveClient {
    /// Resolve a city from an IP address, or from the caller's address.
    ///
    /// `GET /location/resolve[?ip]`
    pub async fn locate(&self, ip_address: Option<&str>) -> Result<ResolvedLocation, Error> {
        debug!(?ip_address, "resolving location");
        let query: Vec<(&str, String)> = ip_address
            .map(|ip| ("ip", ip.to_owned()))
            .into_iter()
            .collect();

        self.get(&["location", "resolve"], &query)
            .await
            .inspect_err(|e| error!(error = %e, "error resolving location"))
    }
}
