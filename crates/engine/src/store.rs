use crate::error::Result;
use crate::types::{ChildPage, HeadingLevel, UpdateResponse};
use async_trait::async_trait;

/// Remote content store holding the document and its mirrored containers.
///
/// Implementations must be safe to share across the dispatcher's tasks.
#[async_trait]
pub trait OutlineStore: Send + Sync {
    /// Locate a page by title; the first match is used
    async fn search(&self, query: &str) -> Result<String>;

    /// Fetch one page of ordered children of a container
    async fn list_children(&self, container_id: &str, cursor: Option<&str>) -> Result<ChildPage>;

    /// Replace the text of a heading block
    async fn update_heading(
        &self,
        block_id: &str,
        level: HeadingLevel,
        text: &str,
    ) -> UpdateResponse;
}

#[cfg(any(test, feature = "test-support"))]
pub use memory::{MemoryStore, UpdateCall};

#[cfg(any(test, feature = "test-support"))]
mod memory {
    use super::OutlineStore;
    use crate::error::{OutlineError, Result};
    use crate::types::{Block, ChildPage, HeadingLevel, UpdateResponse};
    use async_trait::async_trait;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// Update request observed by [`MemoryStore`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct UpdateCall {
        pub block_id: String,
        pub level: HeadingLevel,
        pub text: String,
    }

    enum Scripted {
        Queue(VecDeque<UpdateResponse>),
        Always(UpdateResponse),
    }

    #[derive(Default)]
    struct State {
        pages: HashMap<String, String>,
        containers: HashMap<String, Vec<Block>>,
        scripted: HashMap<String, Scripted>,
        updates: Vec<UpdateCall>,
        list_calls: usize,
    }

    /// In-memory store that paginates, applies updates and replays scripted failures
    pub struct MemoryStore {
        page_size: usize,
        state: Mutex<State>,
    }

    impl MemoryStore {
        pub fn new(page_size: usize) -> Self {
            Self {
                page_size: page_size.max(1),
                state: Mutex::new(State::default()),
            }
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, State> {
            self.state
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        pub fn add_page(&self, title: &str, page_id: &str) {
            self.lock()
                .pages
                .insert(title.to_string(), page_id.to_string());
        }

        pub fn set_children(&self, container_id: &str, blocks: Vec<Block>) {
            self.lock()
                .containers
                .insert(container_id.to_string(), blocks);
        }

        /// Responses returned in order for `block_id`; `Ok` once drained
        pub fn script_updates(&self, block_id: &str, responses: Vec<UpdateResponse>) {
            self.lock()
                .scripted
                .insert(block_id.to_string(), Scripted::Queue(responses.into()));
        }

        /// Every update of `block_id` answers `response`
        pub fn always_respond(&self, block_id: &str, response: UpdateResponse) {
            self.lock()
                .scripted
                .insert(block_id.to_string(), Scripted::Always(response));
        }

        pub fn updates(&self) -> Vec<UpdateCall> {
            self.lock().updates.clone()
        }

        pub fn attempts_for(&self, block_id: &str) -> usize {
            self.lock()
                .updates
                .iter()
                .filter(|call| call.block_id == block_id)
                .count()
        }

        pub fn list_calls(&self) -> usize {
            self.lock().list_calls
        }

        pub fn text_of(&self, block_id: &str) -> Option<String> {
            self.lock()
                .containers
                .values()
                .flatten()
                .find(|block| block.id == block_id)
                .and_then(|block| block.text.clone())
        }
    }

    #[async_trait]
    impl OutlineStore for MemoryStore {
        async fn search(&self, query: &str) -> Result<String> {
            self.lock()
                .pages
                .get(query)
                .cloned()
                .ok_or_else(|| OutlineError::PageNotFound(query.to_string()))
        }

        async fn list_children(
            &self,
            container_id: &str,
            cursor: Option<&str>,
        ) -> Result<ChildPage> {
            let mut state = self.lock();
            state.list_calls += 1;
            let blocks = state
                .containers
                .get(container_id)
                .ok_or_else(|| OutlineError::Store(format!("unknown container {container_id}")))?;

            let start = match cursor {
                Some(raw) => raw
                    .parse::<usize>()
                    .map_err(|_| OutlineError::Store(format!("bad cursor {raw}")))?,
                None => 0,
            };
            let end = (start + self.page_size).min(blocks.len());
            let has_more = end < blocks.len();

            Ok(ChildPage {
                items: blocks[start.min(end)..end].to_vec(),
                next_cursor: has_more.then(|| end.to_string()),
                has_more,
            })
        }

        async fn update_heading(
            &self,
            block_id: &str,
            level: HeadingLevel,
            text: &str,
        ) -> UpdateResponse {
            let mut state = self.lock();
            state.updates.push(UpdateCall {
                block_id: block_id.to_string(),
                level,
                text: text.to_string(),
            });

            let response = match state.scripted.get_mut(block_id) {
                Some(Scripted::Always(response)) => response.clone(),
                Some(Scripted::Queue(queue)) => queue.pop_front().unwrap_or(UpdateResponse::Ok),
                None => UpdateResponse::Ok,
            };

            if response == UpdateResponse::Ok {
                if let Some(block) = state
                    .containers
                    .values_mut()
                    .flatten()
                    .find(|block| block.id == block_id)
                {
                    block.text = Some(text.to_string());
                }
            }
            response
        }
    }
}
