#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use movie_catalog_lambda::adapters::movie_store::MovieStore;
use movie_catalog_lambda::runtime::error::StoreError;
use movie_catalog_lambda::runtime::record::{
    ContinuationToken, MovieRecord, RecordValue, ResultPage,
};

/// Table double that pages like DynamoDB: a full page always carries the
/// key of its last item, even when nothing follows.
pub struct InMemoryMovieStore {
    records: Vec<MovieRecord>,
    page_size: usize,
    requests: AtomicUsize,
}

impl InMemoryMovieStore {
    pub fn new(records: Vec<MovieRecord>, page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self {
            records,
            page_size,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn page_of(
        &self,
        candidates: Vec<&MovieRecord>,
        start: Option<&ContinuationToken>,
    ) -> Result<ResultPage, StoreError> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        let offset = match start {
            None => 0,
            Some(token) => {
                let id = token.key().get("id").ok_or_else(|| {
                    StoreError::InvalidContinuationToken("missing id".to_string())
                })?;
                candidates
                    .iter()
                    .position(|record| record.get("id") == Some(id))
                    .map(|index| index + 1)
                    .ok_or_else(|| {
                        StoreError::InvalidContinuationToken("unknown id".to_string())
                    })?
            }
        };

        let page: Vec<MovieRecord> = candidates
            .into_iter()
            .skip(offset)
            .take(self.page_size)
            .cloned()
            .collect();

        if page.len() < self.page_size {
            return Ok(ResultPage::last(page));
        }
        let last = page.last().expect("full page is not empty");
        let key = BTreeMap::from([
            ("id".to_string(), last["id"].clone()),
            ("year".to_string(), last["year"].clone()),
        ]);
        Ok(ResultPage::continued(page, ContinuationToken::new(key)))
    }
}

impl MovieStore for InMemoryMovieStore {
    fn query_year_page(
        &self,
        year: i64,
        start: Option<&ContinuationToken>,
    ) -> Result<ResultPage, StoreError> {
        let wanted = RecordValue::number(year);
        let candidates = self
            .records
            .iter()
            .filter(|record| record.get("year") == Some(&wanted))
            .collect();
        self.page_of(candidates, start)
    }

    fn scan_page(&self, start: Option<&ContinuationToken>) -> Result<ResultPage, StoreError> {
        self.page_of(self.records.iter().collect(), start)
    }
}

pub fn movie(id: &str, title: &str, year: i64) -> MovieRecord {
    BTreeMap::from([
        ("id".to_string(), RecordValue::string(id)),
        ("title".to_string(), RecordValue::string(title)),
        ("year".to_string(), RecordValue::number(year)),
    ])
}

pub fn catalog() -> Vec<MovieRecord> {
    let mut pulp_fiction = movie("tt0110912", "Pulp Fiction", 1994);
    pulp_fiction.insert("rating".to_string(), RecordValue::Number("8.9".to_string()));
    pulp_fiction.insert(
        "genres".to_string(),
        RecordValue::StringSet(vec!["Crime".to_string(), "Drama".to_string()]),
    );

    vec![
        pulp_fiction,
        movie("tt0113277", "Heat", 1995),
        movie("tt0109830", "Forrest Gump", 1994),
        movie("tt0111161", "The Shawshank Redemption", 1994),
        movie("tt0114369", "Se7en", 1995),
        movie("tt0110413", "Léon", 1994),
    ]
}
