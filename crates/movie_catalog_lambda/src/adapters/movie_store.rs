use crate::runtime::error::StoreError;
use crate::runtime::record::{ContinuationToken, ResultPage};

/// Page-at-a-time read access to the movie table.
///
/// `start` is `None` for the first page and the previous page's token
/// afterwards.
pub trait MovieStore {
    fn query_year_page(
        &self,
        year: i64,
        start: Option<&ContinuationToken>,
    ) -> Result<ResultPage, StoreError>;

    fn scan_page(&self, start: Option<&ContinuationToken>) -> Result<ResultPage, StoreError>;
}
