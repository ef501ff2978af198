//! # Outline Notion
//!
//! Notion REST implementation of [`outline_engine::OutlineStore`].
//!
//! - `POST /search` resolves a page title to its id
//! - `GET /blocks/{id}/children` pages through a container (`start_cursor`)
//! - `PATCH /blocks/{id}` rewrites a heading; `409` is reported as a conflict
//!
//! Headings are `heading_1..3` blocks. A duplicated `synced_block` points at
//! its original through `synced_from.block_id`; an original (`synced_from:
//! null`) is its own container.

mod client;
mod config;
mod error;
mod wire;

pub use client::NotionStore;
pub use config::{NotionConfig, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, NOTION_VERSION};
pub use error::{NotionError, Result};
