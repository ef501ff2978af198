//! JSON shapes of the Notion REST API used by the store.

use outline_engine::{Block, BlockKind, ChildPage, HeadingLevel};
use serde::Deserialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<ObjectRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ObjectRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChildrenResponse {
    #[serde(default)]
    pub results: Vec<RawBlock>,
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub heading_1: Option<HeadingPayload>,
    pub heading_2: Option<HeadingPayload>,
    pub heading_3: Option<HeadingPayload>,
    pub synced_block: Option<SyncedBlockPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HeadingPayload {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SyncedBlockPayload {
    /// `null` on the original block, set on every duplicate
    pub synced_from: Option<SyncedFrom>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SyncedFrom {
    pub block_id: Option<String>,
}

impl RawBlock {
    fn heading(&self) -> Option<(HeadingLevel, Option<&HeadingPayload>)> {
        match self.kind.as_str() {
            "heading_1" => Some((HeadingLevel::One, self.heading_1.as_ref())),
            "heading_2" => Some((HeadingLevel::Two, self.heading_2.as_ref())),
            "heading_3" => Some((HeadingLevel::Three, self.heading_3.as_ref())),
            _ => None,
        }
    }

    pub fn into_block(self) -> Block {
        if let Some((level, payload)) = self.heading() {
            // An empty rich_text array leaves the text unset; extraction rejects it.
            let text = payload
                .filter(|payload| !payload.rich_text.is_empty())
                .map(|payload| {
                    payload
                        .rich_text
                        .iter()
                        .map(|segment| segment.plain_text.as_str())
                        .collect::<String>()
                });
            return Block {
                id: self.id,
                kind: BlockKind::Heading(level),
                text,
            };
        }

        if self.kind != "synced_block" {
            return Block::other(self.id);
        }
        match self.synced_block.map(|synced| synced.synced_from) {
            Some(Some(SyncedFrom {
                block_id: Some(container_id),
            })) => Block::mirror(self.id, container_id),
            // The original holds its own children.
            Some(None) => {
                let container_id = self.id.clone();
                Block::mirror(self.id, container_id)
            }
            _ => {
                log::warn!("Synced block {} has no usable source; ignored", self.id);
                Block::other(self.id)
            }
        }
    }
}

impl From<ChildrenResponse> for ChildPage {
    fn from(response: ChildrenResponse) -> Self {
        ChildPage {
            items: response
                .results
                .into_iter()
                .map(RawBlock::into_block)
                .collect(),
            next_cursor: response.next_cursor,
            has_more: response.has_more,
        }
    }
}

/// PATCH body replacing a heading's text with plain, unannotated content
pub(crate) fn heading_update_body(level: HeadingLevel, text: &str) -> Value {
    let heading = json!({
        "rich_text": [
            {
                "type": "text",
                "text": { "content": text, "link": null },
                "annotations": {
                    "bold": false,
                    "italic": false,
                    "strikethrough": false,
                    "underline": false,
                    "code": false,
                    "color": "default"
                },
                "plain_text": text,
                "href": null
            }
        ],
        "is_toggleable": false,
        "color": "default"
    });

    let mut body = Map::new();
    body.insert(format!("heading_{}", level.as_u8()), heading);
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(value: Value) -> ChildPage {
        serde_json::from_value::<ChildrenResponse>(value)
            .unwrap()
            .into()
    }

    #[test]
    fn parses_children_page() {
        let page = parse(json!({
            "object": "list",
            "results": [
                {
                    "object": "block",
                    "id": "h1",
                    "type": "heading_1",
                    "heading_1": {
                        "rich_text": [
                            { "type": "text", "plain_text": "2 " },
                            { "type": "text", "plain_text": "Intro" }
                        ],
                        "is_toggleable": false,
                        "color": "default"
                    }
                },
                {
                    "object": "block",
                    "id": "s1",
                    "type": "synced_block",
                    "synced_block": { "synced_from": { "type": "block_id", "block_id": "orig" } }
                },
                {
                    "object": "block",
                    "id": "s0",
                    "type": "synced_block",
                    "synced_block": { "synced_from": null }
                },
                { "object": "block", "id": "p", "type": "paragraph", "paragraph": {} }
            ],
            "next_cursor": "cur-2",
            "has_more": true
        }));

        assert_eq!(
            page,
            ChildPage {
                items: vec![
                    Block::heading("h1", HeadingLevel::One, "2 Intro"),
                    Block::mirror("s1", "orig"),
                    Block::mirror("s0", "s0"),
                    Block::other("p"),
                ],
                next_cursor: Some("cur-2".to_string()),
                has_more: true,
            }
        );
    }

    #[test]
    fn heading_without_rich_text_has_no_text() {
        let page = parse(json!({
            "results": [
                { "id": "h", "type": "heading_3", "heading_3": { "rich_text": [] } },
                { "id": "g", "type": "heading_2" }
            ],
            "next_cursor": null,
            "has_more": false
        }));

        assert_eq!(page.items[0].text, None);
        assert_eq!(page.items[0].heading_level(), Some(HeadingLevel::Three));
        assert_eq!(page.items[1].text, None);
        assert!(!page.has_more);
    }

    #[test]
    fn update_body_targets_heading_level() {
        let body = heading_update_body(HeadingLevel::Two, "1.2 Scope");

        assert_eq!(body["heading_2"]["rich_text"][0]["text"]["content"], "1.2 Scope");
        assert_eq!(body["heading_2"]["rich_text"][0]["plain_text"], "1.2 Scope");
        assert_eq!(
            body["heading_2"]["rich_text"][0]["annotations"]["bold"],
            false
        );
        assert_eq!(body["heading_2"]["color"], "default");
        assert!(body.get("heading_1").is_none());
    }
}
