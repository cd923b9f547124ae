//! Community board: lists every post, lets the reader add and edit posts in
//! local state only.

use rand::{seq::SliceRandom, Rng};
use tracing::{debug, error, info};

use crate::{
    api::Api,
    filter::Filter,
    image::ImageFile,
    misc::{is_filled, next_local_id},
    model::{Post, PostId},
    slot::{Draft, PostList, PostSlot},
    tag::{tag_label, Tag, TagId},
};

pub const NO_POSTS: &str = "Không có bài viết nào.";

/// Buttons under each post that are not wired to anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    Like,
    Delete,
}

/// Fields of the "new post" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
}

#[derive(Debug)]
pub struct Board {
    posts: PostList,
    tags: Vec<Tag>,
    search: String,
    selected_tag: Option<TagId>,
    form_open: bool,
    new_post: NewPost,
    preview: Option<String>,
    default_image: String,
    last_local_id: PostId,
}

impl Board {
    pub fn new(default_image: impl Into<String>) -> Self {
        Self {
            posts: PostList::new(),
            tags: Vec::new(),
            search: String::new(),
            selected_tag: None,
            form_open: false,
            new_post: NewPost::default(),
            preview: None,
            default_image: default_image.into(),
            last_local_id: 0,
        }
    }

    /// Fetches tags and posts. Each failure is logged and leaves its
    /// collection as it was.
    pub async fn mount(&mut self, api: &dyn Api) {
        let (tags, posts) = futures::join!(api.list_tags(), api.list_posts());
        match tags {
            Ok(tags) => self.tags = tags,
            Err(err) => error!(?err, "error fetching tags"),
        }
        match posts {
            Ok(posts) => {
                debug!(count = posts.len(), "board posts loaded");
                self.posts.replace_all(posts);
            }
            Err(err) => error!(?err, "error fetching blogs"),
        }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn posts(&self) -> &PostList {
        &self.posts
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn selected_tag(&self) -> Option<TagId> {
        self.selected_tag
    }

    pub fn select_tag(&mut self, tag: Option<TagId>) {
        self.selected_tag = tag;
    }

    /// Posts to render. Only the tag selector narrows the list; the search
    /// box is kept as typed but does not filter here.
    pub fn visible(&self) -> Vec<&PostSlot> {
        let filter = Filter::for_controls(self.selected_tag, "");
        let visible = self.posts.filtered(&filter);
        debug!(%filter, count = visible.len(), "board filtered");
        visible
    }

    /// Shown in place of the list when no post is visible.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.visible().is_empty().then_some(NO_POSTS)
    }

    pub fn tag_label(&self, post: &Post) -> &str {
        tag_label(&self.tags, post.tag_id)
    }

    /// Image to render for a post in its non-edit form.
    pub fn image_of<'a>(&'a self, post: &'a Post) -> &'a str {
        post.image.as_deref().unwrap_or(&self.default_image)
    }

    pub fn form_open(&self) -> bool {
        self.form_open
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    pub fn new_post(&self) -> &NewPost {
        &self.new_post
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.new_post.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.new_post.content = content.into();
    }

    pub fn attach_image(&mut self, file: &ImageFile) {
        let data_url = file.to_data_url();
        self.preview = Some(data_url.clone());
        self.new_post.image = Some(data_url);
    }

    pub fn create(&mut self) -> Option<PostId> {
        self.create_with(&mut rand::thread_rng())
    }

    /// Appends the form as a new local post. The tag is drawn at random from
    /// the loaded tags; the reader does not pick it. Empty title or content
    /// is silently refused.
    pub fn create_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<PostId> {
        if !is_filled(&self.new_post.title) || !is_filled(&self.new_post.content) {
            return None;
        }
        let form = std::mem::take(&mut self.new_post);
        self.last_local_id = next_local_id(self.last_local_id);
        let mut post = Post::new(self.last_local_id, form.title, form.content);
        post.tag_id = self.tags.choose(rng).map(|it| it.id);
        post.image = Some(form.image.unwrap_or_else(|| self.default_image.clone()));
        let id = post.id;
        info!(post = id, tag = ?post.tag_id, "post created locally");
        self.posts.push(post);

        self.preview = None;
        self.form_open = false;
        Some(id)
    }

    pub fn begin_edit(&mut self, id: PostId) -> bool {
        self.posts.begin_edit(id)
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.posts.editing().map(|(_, draft)| draft)
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        if let Some(draft) = self.posts.draft_mut() {
            draft.title = title.into();
        }
    }

    pub fn set_draft_content(&mut self, content: impl Into<String>) {
        if let Some(draft) = self.posts.draft_mut() {
            draft.content = content.into();
        }
    }

    pub fn attach_edit_image(&mut self, file: ImageFile) {
        if let Some(draft) = self.posts.draft_mut() {
            draft.choose_image(file);
        }
    }

    /// Replaces the edited post with its draft. Nothing is sent to the server.
    pub fn save_edit(&mut self) -> Option<PostId> {
        let id = self.posts.commit_local()?.id;
        debug!(post = id, "post edited locally");
        Some(id)
    }

    pub fn press(&mut self, id: PostId, action: ItemAction) {
        debug!(post = id, ?action, "button has no handler");
    }
}
