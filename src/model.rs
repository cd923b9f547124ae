use serde::{Deserialize, Serialize};

use crate::tag::TagId;

pub type PostId = i64;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// A community blog post.
///
/// The API sends the tag either flat (`tagId`) or nested (`tag: { id, .. }`),
/// both land in `tag_id`.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(from = "PostRepr", rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub likes: u64,
    pub tag_id: Option<TagId>,
    pub comments: Vec<Comment>,
}

#[derive(Deserialize)]
struct TagRef {
    id: TagId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostRepr {
    id: PostId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    likes: Option<u64>,
    #[serde(default)]
    tag_id: Option<TagId>,
    #[serde(default)]
    tag: Option<TagRef>,
    #[serde(default)]
    comments: Option<Vec<Comment>>,
}

impl From<PostRepr> for Post {
    fn from(repr: PostRepr) -> Self {
        Self {
            id: repr.id,
            title: repr.title,
            content: repr.content,
            image: repr.image.filter(|it| !it.is_empty()),
            likes: repr.likes.unwrap_or_default(),
            tag_id: repr.tag.map(|it| it.id).or(repr.tag_id),
            comments: repr.comments.unwrap_or_default(),
        }
    }
}

impl Post {
    pub fn new(id: PostId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            image: None,
            likes: 0,
            tag_id: None,
            comments: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag_id: TagId) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
