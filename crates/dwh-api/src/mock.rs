//! Test double for the [`DwhApi`] trait, behind the `mock` feature.
//!
//! Results are queued per operation and served FIFO; an exhausted queue
//! serves empty success. Calls are recorded for assertion.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::Error;
use crate::analytics::DwhApi;
use crate::analytics::types::{
    AccountRelaysParams, AccountRelaysTotal, PortalAppRelaysParams, PortalAppRelaysTotal,
};

/// Programmable [`DwhApi`] implementation for consumer tests.
#[derive(Default)]
pub struct MockDwhApi {
    portal_app_results: Mutex<VecDeque<Result<Vec<PortalAppRelaysTotal>, Error>>>,
    account_results: Mutex<VecDeque<Result<Vec<AccountRelaysTotal>, Error>>>,
    portal_app_calls: Mutex<Vec<PortalAppRelaysParams>>,
    account_calls: Mutex<Vec<AccountRelaysParams>>,
}

impl MockDwhApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next result for `total_relays_for_portal_app_ids`.
    pub fn push_portal_app_result(&self, result: Result<Vec<PortalAppRelaysTotal>, Error>) {
        self.portal_app_results
            .lock()
            .expect("mock lock poisoned")
            .push_back(result);
    }

    /// Queue the next result for `total_relays_for_account_ids`.
    pub fn push_account_result(&self, result: Result<Vec<AccountRelaysTotal>, Error>) {
        self.account_results
            .lock()
            .expect("mock lock poisoned")
            .push_back(result);
    }

    /// Portal-app calls recorded so far, oldest first.
    pub fn portal_app_calls(&self) -> Vec<PortalAppRelaysParams> {
        self.portal_app_calls
            .lock()
            .expect("mock lock poisoned")
            .clone()
    }

    /// Account calls recorded so far, oldest first.
    pub fn account_calls(&self) -> Vec<AccountRelaysParams> {
        self.account_calls
            .lock()
            .expect("mock lock poisoned")
            .clone()
    }
}

impl DwhApi for MockDwhApi {
    async fn total_relays_for_portal_app_ids(
        &self,
        params: PortalAppRelaysParams,
    ) -> Result<Vec<PortalAppRelaysTotal>, Error> {
        self.portal_app_calls
            .lock()
            .expect("mock lock poisoned")
            .push(params);
        self.portal_app_results
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn total_relays_for_account_ids(
        &self,
        params: AccountRelaysParams,
    ) -> Result<Vec<AccountRelaysTotal>, Error> {
        self.account_calls
            .lock()
            .expect("mock lock poisoned")
            .push(params);
        self.account_results
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serves_queued_results_in_order_then_empty_success() {
        let mock = MockDwhApi::new();
        mock.push_portal_app_result(Err(Error::NotFound));
        mock.push_portal_app_result(Ok(vec![PortalAppRelaysTotal::default()]));

        let first = tokio_test::block_on(
            mock.total_relays_for_portal_app_ids(PortalAppRelaysParams::default()),
        );
        assert!(matches!(first, Err(Error::NotFound)));

        let second = tokio_test::block_on(
            mock.total_relays_for_portal_app_ids(PortalAppRelaysParams::default()),
        )
        .unwrap();
        assert_eq!(second.len(), 1);

        let third = tokio_test::block_on(
            mock.total_relays_for_portal_app_ids(PortalAppRelaysParams::default()),
        )
        .unwrap();
        assert!(third.is_empty());

        assert_eq!(mock.portal_app_calls().len(), 3);
    }

    #[test]
    fn records_account_calls_with_their_params() {
        let mock = MockDwhApi::new();
        let params = AccountRelaysParams {
            account_ids: vec!["acct_1".into()],
            ..AccountRelaysParams::default()
        };

        let _ = tokio_test::block_on(mock.total_relays_for_account_ids(params.clone()));

        assert_eq!(mock.account_calls(), vec![params]);
    }
}
