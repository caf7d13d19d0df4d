use crate::error::StoreError;
use crate::record::{ContinuationToken, MovieRecord, ResultPage};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageLimit {
    #[default]
    Unbounded,
    AtMost(usize),
}

impl PageLimit {
    fn exhausted_after(self, pages_fetched: usize) -> Option<usize> {
        match self {
            Self::AtMost(limit) if pages_fetched >= limit => Some(limit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedRecords {
    pub records: Vec<MovieRecord>,
    pub pages: usize,
}

/// Follows continuation tokens until the store reports no more pages.
///
/// `fetch` receives `None` for the first page and the previous page's token
/// afterwards. Records keep the order the store returned them in. Hitting
/// `limit` while more pages remain is an error; partial results are
/// dropped.
pub fn collect_pages<F>(limit: PageLimit, mut fetch: F) -> Result<CollectedRecords, StoreError>
where
    F: FnMut(Option<&ContinuationToken>) -> Result<ResultPage, StoreError>,
{
    let mut collected = CollectedRecords::default();
    let mut start: Option<ContinuationToken> = None;

    loop {
        let page = fetch(start.as_ref())?;
        collected.pages += 1;
        collected.records.extend(page.records);

        let Some(token) = page.continuation else {
            return Ok(collected);
        };
        if let Some(limit) = limit.exhausted_after(collected.pages) {
            return Err(StoreError::PageLimitExceeded { limit });
        }
        start = Some(token);
    }
}
