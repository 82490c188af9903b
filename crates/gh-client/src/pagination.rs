//! Page-by-page collection of list endpoints

use crate::error::ClientError;
use log::{debug, warn};
use std::future::Future;

/// Largest page size GitHub accepts
pub const PER_PAGE: u8 = 100;

/// Safety stop for runaway pagination. GitHub caps PR files at 3000 (30 pages).
pub const MAX_PAGES: u32 = 100;

/// Fetch pages sequentially, starting at page 1, until a short or empty page.
///
/// The first failing page aborts the whole collection.
pub async fn collect_pages<T, F, Fut>(per_page: u8, mut fetch_page: F) -> Result<Vec<T>, ClientError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, ClientError>>,
{
    let mut items = Vec::new();
    let mut page = 1u32;

    loop {
        let batch = fetch_page(page).await?;
        let batch_len = batch.len();
        items.extend(batch);

        if batch_len < per_page as usize {
            debug!("Pagination finished after {} page(s), {} items", page, items.len());
            break;
        }
        if page >= MAX_PAGES {
            warn!("Stopping pagination after {} pages", MAX_PAGES);
            break;
        }

        page += 1;
    }

    Ok(items)
}
