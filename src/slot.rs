use crate::{
    filter::Filter,
    image::ImageFile,
    model::{Post, PostId},
    tag::TagId,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DraftImage {
    /// The image the post already has, used as the preview.
    Keep(Option<String>),
    /// A newly chosen file and its `data:` URL preview.
    Replace { file: ImageFile, preview: String },
}

impl DraftImage {
    pub fn preview(&self) -> Option<&str> {
        match self {
            DraftImage::Keep(image) => image.as_deref(),
            DraftImage::Replace { preview, .. } => Some(preview),
        }
    }

    pub fn replacement(&self) -> Option<&ImageFile> {
        match self {
            DraftImage::Keep(_) => None,
            DraftImage::Replace { file, .. } => Some(file),
        }
    }
}

/// The in-progress copy of a post while its editor is open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
    pub tag_id: Option<TagId>,
    pub image: DraftImage,
}

impl Draft {
    pub fn of(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            tag_id: post.tag_id,
            image: DraftImage::Keep(post.image.clone()),
        }
    }

    pub fn choose_image(&mut self, file: ImageFile) {
        let preview = file.to_data_url();
        self.image = DraftImage::Replace { file, preview };
    }

    /// The post as it would look once the draft is saved locally.
    pub fn apply_to(&self, post: &Post) -> Post {
        Post {
            title: self.title.clone(),
            content: self.content.clone(),
            tag_id: self.tag_id,
            image: self.image.preview().map(str::to_owned),
            ..post.clone()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostSlot {
    Viewing { post: Post },
    Editing { post: Post, draft: Draft },
}

impl PostSlot {
    pub fn post(&self) -> &Post {
        match self {
            PostSlot::Viewing { post } | PostSlot::Editing { post, .. } => post,
        }
    }

    pub fn id(&self) -> PostId {
        self.post().id
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, PostSlot::Editing { .. })
    }

    fn close(&mut self) {
        if let PostSlot::Editing { post, .. } = self {
            *self = PostSlot::Viewing {
                post: std::mem::replace(post, Post::new(0, "", "")),
            };
        }
    }
}

/// Posts of a view, at most one of them open in an editor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostList {
    slots: Vec<PostSlot>,
}

impl PostList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[PostSlot] {
        &self.slots
    }

    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.slots.iter().map(PostSlot::post)
    }

    /// Slots whose post passes `filter`, in list order.
    pub fn filtered(&self, filter: &Filter) -> Vec<&PostSlot> {
        self.slots
            .iter()
            .filter(|it| filter.matches(it.post()))
            .collect()
    }

    pub fn get(&self, id: PostId) -> Option<&PostSlot> {
        self.slots.iter().find(|it| it.id() == id)
    }

    /// Replaces every post, dropping any open editor.
    pub fn replace_all(&mut self, posts: Vec<Post>) {
        self.slots = posts
            .into_iter()
            .map(|post| PostSlot::Viewing { post })
            .collect();
    }

    pub fn push(&mut self, post: Post) {
        self.slots.push(PostSlot::Viewing { post });
    }

    /// Removes the post with `id`. Returns whether it was present.
    pub fn remove(&mut self, id: PostId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|it| it.id() != id);
        self.slots.len() != before
    }

    /// Opens the editor on the first post with `id`, closing any other editor
    /// without saving. Reopening the post already being edited keeps its draft.
    pub fn begin_edit(&mut self, id: PostId) -> bool {
        let Some(target) = self.slots.iter().position(|it| it.id() == id) else {
            return false;
        };
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if index == target {
                if let PostSlot::Viewing { post } = slot {
                    let draft = Draft::of(post);
                    let post = std::mem::replace(post, Post::new(0, "", ""));
                    *slot = PostSlot::Editing { post, draft };
                }
            } else {
                slot.close();
            }
        }
        true
    }

    pub fn cancel_edit(&mut self) {
        for slot in &mut self.slots {
            slot.close();
        }
    }

    pub fn editing(&self) -> Option<(&Post, &Draft)> {
        self.slots.iter().find_map(|it| match it {
            PostSlot::Editing { post, draft } => Some((post, draft)),
            PostSlot::Viewing { .. } => None,
        })
    }

    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        self.slots.iter_mut().find_map(|it| match it {
            PostSlot::Editing { draft, .. } => Some(draft),
            PostSlot::Viewing { .. } => None,
        })
    }

    /// Writes the open draft into its post and closes the editor. Returns the
    /// saved post.
    pub fn commit_local(&mut self) -> Option<&Post> {
        let slot = self.slots.iter_mut().find(|it| it.is_editing())?;
        if let PostSlot::Editing { post, draft } = slot {
            let saved = draft.apply_to(post);
            *slot = PostSlot::Viewing { post: saved };
        }
        Some(slot.post())
    }
}
