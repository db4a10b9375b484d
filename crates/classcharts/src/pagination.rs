//! Cursor pagination over endpoints that page by last-seen id.
//!
//! The activity endpoint returns a bounded page per request; the next page
//! is requested with `last_id` set to the highest id seen so far. Paging
//! stops on an empty page, or on a page that does not move the cursor
//! forward (an API that echoes the same page would otherwise loop forever).

use crate::client::{Session, Transport};
use crate::error::Result;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Records that carry the id a paginated endpoint orders by.
pub trait Paged {
    fn page_id(&self) -> Option<u64>;
}

impl Paged for crate::models::Activity {
    fn page_id(&self) -> Option<u64> {
        self.id
    }
}

/// Collects every page produced by `fetch_page`.
///
/// `fetch_page` receives the cursor for the request: `None` for the first
/// page, then the largest id seen so far. Records keep their arrival order
/// across pages. A failing page aborts the whole walk and nothing collected
/// so far is returned.
pub fn fetch_all<T, F>(mut fetch_page: F) -> Result<Vec<T>>
where
    T: Paged,
    F: FnMut(Option<u64>) -> Result<Vec<T>>,
{
    let mut records = Vec::new();
    let mut cursor: Option<u64> = None;
    let mut pages = 0u32;

    loop {
        let page = fetch_page(cursor)?;
        pages += 1;
        debug!(page = pages, cursor = ?cursor, records = page.len(), "Fetched page");

        if page.is_empty() {
            break;
        }

        let page_max = page.iter().filter_map(Paged::page_id).max();
        records.extend(page);

        match (page_max, cursor) {
            (Some(max), Some(previous)) if max > previous => cursor = Some(max),
            (Some(max), None) => cursor = Some(max),
            _ => break,
        }
    }

    debug!(pages, records = records.len(), "Pagination finished");
    Ok(records)
}

/// Reads every page of `resource` for a student.
///
/// `query` is sent with each request; `last_id` is appended from the
/// second request on.
pub fn fetch_paginated<T, R>(
    session: &mut Session<T>,
    resource: &str,
    student_id: u64,
    query: &[(&str, String)],
) -> Result<Vec<R>>
where
    T: Transport,
    R: Paged + DeserializeOwned,
{
    fetch_all(|cursor| {
        let mut params = query.to_vec();
        if let Some(last_id) = cursor {
            params.push(("last_id", last_id.to_string()));
        }
        let response = session.get(resource, Some(student_id), &params)?;
        crate::reports::records(response.data)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassChartsError;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(Option<u64>);

    impl Paged for Row {
        fn page_id(&self) -> Option<u64> {
            self.0
        }
    }

    fn rows(ids: &[u64]) -> Vec<Row> {
        ids.iter().map(|&id| Row(Some(id))).collect()
    }

    #[test]
    fn test_walks_until_empty_page() {
        let mut pages = vec![rows(&[1, 2, 3]), rows(&[4, 5]), vec![]].into_iter();
        let mut cursors = Vec::new();

        let all = fetch_all(|cursor| {
            cursors.push(cursor);
            Ok(pages.next().unwrap_or_default())
        })
        .unwrap();

        assert_eq!(all, rows(&[1, 2, 3, 4, 5]));
        assert_eq!(cursors, vec![None, Some(3), Some(5)]);
    }

    #[test]
    fn test_stops_on_repeated_page() {
        let mut requests = 0;
        let all = fetch_all(|_| {
            requests += 1;
            Ok(rows(&[1, 2, 3]))
        })
        .unwrap();

        assert_eq!(requests, 2);
        assert_eq!(all.len(), 6);
    }

    #[test]
    fn test_empty_first_page() {
        let mut requests = 0;
        let all: Vec<Row> = fetch_all(|_| {
            requests += 1;
            Ok(Vec::new())
        })
        .unwrap();

        assert!(all.is_empty());
        assert_eq!(requests, 1);
    }

    #[test]
    fn test_page_without_ids_ends_walk() {
        let mut requests = 0;
        let all = fetch_all(|_| {
            requests += 1;
            Ok(vec![Row(None), Row(None)])
        })
        .unwrap();

        assert_eq!(requests, 1);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_failure_discards_partial_results() {
        let mut requests = 0;
        let result: Result<Vec<Row>> = fetch_all(|_| {
            requests += 1;
            if requests == 1 {
                Ok(rows(&[1, 2]))
            } else {
                Err(ClassChartsError::Transport {
                    message: "connection reset".to_string(),
                })
            }
        });

        assert!(matches!(result, Err(ClassChartsError::Transport { .. })));
    }
}
