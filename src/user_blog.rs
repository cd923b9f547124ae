//! "My posts": the signed-in user's posts, persisted through the API.

use tracing::{debug, error, info, warn};

use crate::{
    api::{Api, PostForm},
    filter::Filter,
    host::{Host, Toast},
    image::ImageFile,
    misc::is_filled,
    model::{Post, PostId},
    session::AuthProvider,
    slot::{Draft, PostList, PostSlot},
    tag::{tag_label, Tag, TagId},
    Context, Result,
};

pub const NO_POSTS: &str = "Không tìm thấy bài viết nào.";

pub const CONFIRM_DELETE: &str = "Bạn có chắc chắn muốn xóa bài viết này không?";
pub const DELETE_SUCCEEDED: &str = "Xóa bài viết thành công";
pub const DELETE_FAILED: &str = "Xóa bài viết thất bại";
pub const UPDATE_SUCCEEDED: &str = "Cập nhật bài viết thành công!";
pub const UPDATE_FAILED: &str = "Cập nhật thất bại!";
pub const CREATE_SUCCEEDED: &str = "Đăng bài viết thành công!";
pub const CREATE_FAILED: &str = "Đăng bài viết thất bại!";

fn user_id(auth: &dyn AuthProvider) -> Result<String> {
    auth.user_id()
        .with_context(|| "no user id in local storage")
}

#[derive(Debug, Default)]
pub struct UserPosts {
    posts: PostList,
    tags: Vec<Tag>,
    search: String,
    selected_tag: Option<TagId>,
}

impl UserPosts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the user's posts and the tag collection side by side. Either
    /// may fail on its own; failures are only logged.
    pub async fn mount(&mut self, api: &dyn Api, auth: &dyn AuthProvider) {
        let (posts, tags) = futures::join!(Self::fetch_posts(api, auth), api.list_tags());
        self.apply_posts(posts);
        self.apply_tags(tags);
    }

    /// Re-reads the user's posts from the server.
    pub async fn refresh(&mut self, api: &dyn Api, auth: &dyn AuthProvider) {
        let posts = Self::fetch_posts(api, auth).await;
        self.apply_posts(posts);
    }

    async fn fetch_posts(api: &dyn Api, auth: &dyn AuthProvider) -> Result<Vec<Post>> {
        let user_id = user_id(auth)?;
        api.list_user_posts(&user_id).await
    }

    fn apply_posts(&mut self, posts: Result<Vec<Post>>) {
        match posts {
            Ok(posts) => {
                debug!(count = posts.len(), "user posts loaded");
                self.posts.replace_all(posts);
            }
            Err(err) => error!(?err, "error fetching blogs"),
        }
    }

    fn apply_tags(&mut self, tags: Result<Vec<Tag>>) {
        match tags {
            Ok(tags) => self.tags = tags,
            Err(err) => error!(?err, "error fetching tags"),
        }
    }

    pub fn posts(&self) -> &PostList {
        &self.posts
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn tag_label(&self, post: &Post) -> &str {
        tag_label(&self.tags, post.tag_id)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn select_tag(&mut self, tag: Option<TagId>) {
        self.selected_tag = tag;
    }

    pub fn filter(&self) -> Filter {
        Filter::for_controls(self.selected_tag, &self.search)
    }

    /// Posts passing both the tag selector and the search box.
    pub fn visible(&self) -> Vec<&PostSlot> {
        let filter = self.filter();
        let visible = self.posts.filtered(&filter);
        debug!(%filter, count = visible.len(), "user posts filtered");
        visible
    }

    /// Shown in place of the list when nothing passes the filters.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.visible().is_empty().then_some(NO_POSTS)
    }

    /// Deletes a post after the user confirms. On success the post is dropped
    /// locally without re-fetching. Returns whether it was deleted.
    pub async fn delete(
        &mut self,
        id: PostId,
        api: &dyn Api,
        auth: &dyn AuthProvider,
        host: &dyn Host,
    ) -> bool {
        if !host.confirm(CONFIRM_DELETE) {
            return false;
        }
        let result = match user_id(auth) {
            Ok(user_id) => api.delete_user_post(&user_id, id).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => {
                info!(post = id, "post deleted");
                host.toast(Toast::success(DELETE_SUCCEEDED));
                self.posts.remove(id);
                true
            }
            Err(err) => {
                error!(?err, post = id, "error deleting blog");
                host.toast(Toast::error(DELETE_FAILED));
                false
            }
        }
    }

    /// Opens the editor seeded from the post, its current image as preview.
    pub fn begin_edit(&mut self, id: PostId) -> bool {
        self.posts.begin_edit(id)
    }

    pub fn cancel_edit(&mut self) {
        self.posts.cancel_edit();
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

    pub fn set_draft_tag(&mut self, tag: Option<TagId>) {
        if let Some(draft) = self.posts.draft_mut() {
            draft.tag_id = tag;
        }
    }

    pub fn choose_image(&mut self, file: ImageFile) {
        if let Some(draft) = self.posts.draft_mut() {
            draft.choose_image(file);
        }
    }

    /// Sends the open draft to the server. The image is only sent when a new
    /// one was chosen. On success the list is re-read from the server; on
    /// failure the editor stays open as it was. Returns whether it saved.
    pub async fn save(&mut self, api: &dyn Api, auth: &dyn AuthProvider, host: &dyn Host) -> bool {
        let Some((post, draft)) = self.posts.editing() else {
            warn!("save without an open editor");
            return false;
        };
        let id = post.id;
        let form = PostForm {
            title: draft.title.clone(),
            content: draft.content.clone(),
            tag_id: draft.tag_id,
            image: draft.image.replacement().cloned(),
        };
        let result = match user_id(auth) {
            Ok(user_id) => api.update_user_post(&user_id, id, form).await,
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            error!(?err, post = id, "error updating blog");
            host.toast(Toast::error(UPDATE_FAILED));
            return false;
        }
        info!(post = id, "post updated");
        host.toast(Toast::success(UPDATE_SUCCEEDED));
        self.posts.cancel_edit();
        self.refresh(api, auth).await;
        true
    }

    /// Publishes a new post for the user. Blank title or content is silently
    /// refused. Returns whether the server accepted it.
    pub async fn create(
        &mut self,
        form: PostForm,
        api: &dyn Api,
        auth: &dyn AuthProvider,
        host: &dyn Host,
    ) -> bool {
        if !is_filled(&form.title) || !is_filled(&form.content) {
            return false;
        }
        let result = match user_id(auth) {
            Ok(user_id) => api.create_user_post(&user_id, form).await,
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            error!(?err, "error creating blog");
            host.toast(Toast::error(CREATE_FAILED));
            return false;
        }
        host.toast(Toast::success(CREATE_SUCCEEDED));
        self.refresh(api, auth).await;
        true
    }
}
