// src/api/pagination.rs
//! Cursor pagination over any Notion list endpoint.

use super::responses::PaginatedResponse;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::{AppError, PartialFetch};

/// Fetches every page of one logical collection using an async closure.
///
/// The closure receives the page size and the continuation cursor (absent on
/// the first call). Items are returned in server order. A failure on any page
/// yields a [`PartialFetch`] holding everything accumulated before it.
pub async fn fetch_all<T, F, Fut>(
    mut fetch_page: F,
    max_pages: Option<u32>,
) -> Result<Vec<T>, PartialFetch<T>>
where
    F: FnMut(u32, Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        if let Some(max) = max_pages {
            if pages_fetched >= max {
                log::debug!("Reached maximum page limit: {}", max);
                break;
            }
        }

        let response = match fetch_page(NOTION_API_PAGE_SIZE, cursor).await {
            Ok(response) => response,
            Err(cause) => {
                return Err(PartialFetch {
                    items,
                    pages_fetched,
                    cause,
                })
            }
        };

        pages_fetched += 1;
        items.extend(response.results);

        match response.next_cursor {
            Some(next) if response.has_more => cursor = Some(next),
            _ => break,
        }
    }

    Ok(items)
}
