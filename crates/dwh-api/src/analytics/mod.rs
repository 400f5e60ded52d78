// Relay analytics surface of the Data Warehouse API.

pub mod client;
pub mod types;

pub use client::DwhClient;

use crate::Error;
use types::{
    AccountRelaysParams, AccountRelaysTotal, PortalAppRelaysParams, PortalAppRelaysTotal,
};

/// The Data Warehouse query surface.
///
/// Implemented by [`DwhClient`] and, for consumer tests, by the `mock`
/// feature's [`MockDwhApi`](crate::mock::MockDwhApi).
pub trait DwhApi {
    /// Total relays per portal application over a date range.
    fn total_relays_for_portal_app_ids(
        &self,
        params: PortalAppRelaysParams,
    ) -> impl Future<Output = Result<Vec<PortalAppRelaysTotal>, Error>>;

    /// Total relays per account over a date range.
    fn total_relays_for_account_ids(
        &self,
        params: AccountRelaysParams,
    ) -> impl Future<Output = Result<Vec<AccountRelaysTotal>, Error>>;
}

impl DwhApi for DwhClient {
    async fn total_relays_for_portal_app_ids(
        &self,
        params: PortalAppRelaysParams,
    ) -> Result<Vec<PortalAppRelaysTotal>, Error> {
        Self::total_relays_for_portal_app_ids(self, params).await
    }

    async fn total_relays_for_account_ids(
        &self,
        params: AccountRelaysParams,
    ) -> Result<Vec<AccountRelaysTotal>, Error> {
        Self::total_relays_for_account_ids(self, params).await
    }
}
