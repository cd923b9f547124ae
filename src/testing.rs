//! In-memory collaborators for view tests.

use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use crate::{
    anyhow,
    api::{Api, PostForm},
    host::{Host, Toast},
    model::{Post, PostId},
    route::Route,
    tag::Tag,
    user::{CurrentUser, Subscription},
    Result,
};

#[derive(Default)]
struct FakeState {
    subscription: Option<Subscription>,
    tags: Option<Vec<Tag>>,
    posts: Option<Vec<Post>>,
    user_posts: HashMap<String, Vec<Post>>,
    fail_user_posts: bool,
    fail_mutations: bool,
    next_id: PostId,
    calls: Vec<String>,
    forms: Vec<PostForm>,
}

/// Scripted API. Unset collections and flagged operations fail.
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.state().next_id = 1000;
        api
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    fn record(&self, call: impl Into<String>) {
        self.state().calls.push(call.into());
    }

    pub fn with_subscription(self, tier: &str) -> Self {
        self.set_subscription(tier);
        self
    }

    pub fn with_tags(self, tags: Vec<Tag>) -> Self {
        self.state().tags = Some(tags);
        self
    }

    pub fn with_posts(self, posts: Vec<Post>) -> Self {
        self.state().posts = Some(posts);
        self
    }

    pub fn with_user_posts(self, user_id: &str, posts: Vec<Post>) -> Self {
        self.state().user_posts.insert(user_id.to_owned(), posts);
        self
    }

    pub fn set_subscription(&self, tier: &str) {
        self.state().subscription = Some(Subscription::new(tier));
    }

    pub fn fail_current_user(&self) {
        self.state().subscription = None;
    }

    pub fn fail_user_posts(&self, fail: bool) {
        self.state().fail_user_posts = fail;
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.state().fail_mutations = fail;
    }

    /// Posts the fake server currently holds for `user_id`.
    pub fn server_posts(&self, user_id: &str) -> Vec<Post> {
        self.state()
            .user_posts
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn forms(&self) -> Vec<PostForm> {
        self.state().forms.clone()
    }
}

#[async_trait]
impl Api for FakeApi {
    async fn current_user(&self) -> Result<CurrentUser> {
        self.record("current_user");
        let subscription = self.state().subscription.clone();
        subscription
            .map(|subscription| CurrentUser { subscription })
            .ok_or_else(|| anyhow!(@NetworkError "current user unavailable"))
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        self.record("list_tags");
        let tags = self.state().tags.clone();
        tags.ok_or_else(|| anyhow!(@HttpStatus "tags unavailable"))
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        self.record("list_posts");
        let posts = self.state().posts.clone();
        posts.ok_or_else(|| anyhow!(@HttpStatus "posts unavailable"))
    }

    async fn list_user_posts(&self, user_id: &str) -> Result<Vec<Post>> {
        self.record(format!("list_user_posts {user_id}"));
        let state = self.state();
        if state.fail_user_posts {
            return Err(anyhow!(@NetworkError "user posts unavailable"));
        }
        Ok(state.user_posts.get(user_id).cloned().unwrap_or_default())
    }

    async fn create_user_post(&self, user_id: &str, form: PostForm) -> Result<()> {
        self.record(format!("create_user_post {user_id}"));
        let mut state = self.state();
        if state.fail_mutations {
            return Err(anyhow!(@HttpStatus "create rejected"));
        }
        state.next_id += 1;
        let mut post = Post::new(state.next_id, form.title.clone(), form.content.clone());
        post.tag_id = form.tag_id;
        state.forms.push(form);
        state
            .user_posts
            .entry(user_id.to_owned())
            .or_default()
            .push(post);
        Ok(())
    }

    async fn update_user_post(
        &self,
        user_id: &str,
        post_id: PostId,
        form: PostForm,
    ) -> Result<()> {
        self.record(format!("update_user_post {user_id} {post_id}"));
        let mut state = self.state();
        if state.fail_mutations {
            return Err(anyhow!(@HttpStatus "update rejected"));
        }
        let Some(post) = state
            .user_posts
            .get_mut(user_id)
            .and_then(|posts| posts.iter_mut().find(|it| it.id == post_id))
        else {
            return Err(anyhow!(@NotFound "no such post"));
        };
        post.title = form.title.clone();
        post.content = form.content.clone();
        post.tag_id = form.tag_id;
        if let Some(image) = &form.image {
            post.image = Some(format!("https://cdn.example/{}", image.file_name));
        }
        state.forms.push(form);
        Ok(())
    }

    async fn delete_user_post(&self, user_id: &str, post_id: PostId) -> Result<()> {
        self.record(format!("delete_user_post {user_id} {post_id}"));
        let mut state = self.state();
        if state.fail_mutations {
            return Err(anyhow!(@HttpStatus "delete rejected"));
        }
        if let Some(posts) = state.user_posts.get_mut(user_id) {
            posts.retain(|it| it.id != post_id);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Alert(String),
    Confirm(String),
    Toast(Toast),
    Navigate(Route),
}

/// Host that records every interaction and answers confirmations with a
/// preset value.
pub struct RecordingHost {
    answer: Mutex<bool>,
    events: Mutex<Vec<HostEvent>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            answer: Mutex::new(true),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn answer_confirm(&self, answer: bool) {
        *self.answer.lock().unwrap() = answer;
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.events()
            .into_iter()
            .filter_map(|it| match it {
                HostEvent::Toast(toast) => Some(toast),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: HostEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Host for RecordingHost {
    fn alert(&self, message: &str) {
        self.push(HostEvent::Alert(message.to_owned()));
    }

    fn confirm(&self, message: &str) -> bool {
        self.push(HostEvent::Confirm(message.to_owned()));
        *self.answer.lock().unwrap()
    }

    fn toast(&self, toast: Toast) {
        self.push(HostEvent::Toast(toast));
    }

    fn navigate(&self, route: Route) {
        self.push(HostEvent::Navigate(route));
    }
}
