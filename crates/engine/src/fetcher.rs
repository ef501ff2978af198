use crate::error::{OutlineError, Result};
use crate::store::OutlineStore;
use crate::types::Block;

/// Fetch every child of `container_id`, page by page, in document order.
///
/// Pages are requested one after another and appended as received; the
/// index of a block in the returned vector is its position.
pub async fn fetch_all<S>(store: &S, container_id: &str) -> Result<Vec<Block>>
where
    S: OutlineStore + ?Sized,
{
    let mut blocks = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = store.list_children(container_id, cursor.as_deref()).await?;
        pages += 1;
        blocks.extend(page.items);

        if !page.has_more {
            break;
        }
        match page.next_cursor {
            Some(next) => {
                log::debug!("Container {container_id}: more blocks to fetch (next cursor {next})");
                cursor = Some(next);
            }
            None => {
                return Err(OutlineError::MissingCursor {
                    container_id: container_id.to_string(),
                })
            }
        }
    }

    log::debug!(
        "Container {container_id}: fetched {} blocks in {pages} page(s)",
        blocks.len()
    );
    Ok(blocks)
}
