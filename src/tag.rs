use serde::{Deserialize, Serialize};

pub type TagId = i64;

/// Label shown for a post whose tag is not in the current tag collection.
pub const MISSING_TAG_LABEL: &str = "Không có";

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

impl Tag {
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

pub fn find_tag(tags: &[Tag], id: TagId) -> Option<&Tag> {
    tags.iter().find(|it| it.id == id)
}

/// Resolves the display name of `tag_id` through `tags`.
pub fn tag_label(tags: &[Tag], tag_id: Option<TagId>) -> &str {
    tag_id
        .and_then(|id| find_tag(tags, id))
        .map_or(MISSING_TAG_LABEL, |it| it.name.as_str())
}
