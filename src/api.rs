use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Method, RequestBuilder, Response,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::{
    anyhow,
    config::Config,
    image::ImageFile,
    model::{Post, PostId},
    session::AuthProvider,
    tag::{Tag, TagId},
    user::CurrentUser,
    Context, ErrorKind, Result,
};

/// Fields of a post sent to the server as `multipart/form-data`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub tag_id: Option<TagId>,
    pub image: Option<ImageFile>,
}

impl PostForm {
    /// Text fields in wire order. `tagId` is sent empty when unset.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("content", self.content.clone()),
            (
                "tagId",
                self.tag_id.map(|it| it.to_string()).unwrap_or_default(),
            ),
        ]
    }

    pub fn into_multipart(self) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in self.fields() {
            form = form.text(name, value);
        }
        if let Some(image) = self.image {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime)
                .kind(ErrorKind::InvalidArgument)
                .with_context(|| "invalid image type")?;
            form = form.part("image", part);
        }
        Ok(form)
    }
}

/// The remote Maternity Care API.
#[async_trait]
pub trait Api: Send + Sync {
    async fn current_user(&self) -> Result<CurrentUser>;
    async fn list_tags(&self) -> Result<Vec<Tag>>;
    /// Every post of the community board.
    async fn list_posts(&self) -> Result<Vec<Post>>;
    async fn list_user_posts(&self, user_id: &str) -> Result<Vec<Post>>;
    async fn create_user_post(&self, user_id: &str, form: PostForm) -> Result<()>;
    async fn update_user_post(&self, user_id: &str, post_id: PostId, form: PostForm)
        -> Result<()>;
    async fn delete_user_post(&self, user_id: &str, post_id: PostId) -> Result<()>;
}

pub struct HttpApi {
    client: Client,
    base: Url,
    public_posts: Url,
    auth: Arc<dyn AuthProvider>,
}

impl HttpApi {
    pub fn new(config: &Config, auth: Arc<dyn AuthProvider>) -> Result<Self> {
        let mut base = Url::parse(&config.api_base).with_context(|| "invalid api_base")?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let public_posts =
            Url::parse(&config.public_blogs_url).with_context(|| "invalid public_blogs_url")?;
        Ok(Self {
            client: Client::new(),
            base,
            public_posts,
            auth,
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|err| anyhow!(@InvalidArgument ("path" => path) "invalid endpoint: {err}"))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match self.auth.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let resp = builder.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let url = resp.url().to_string();
            return Err(anyhow!(@HttpStatus ("status" => status.as_u16()) "{url} returned {status}")
                .with_kind(ErrorKind::from_status(status)));
        }
        Ok(resp)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let resp = self.send(self.request(Method::GET, url)).await?;
        Ok(resp.json::<T>().await?)
    }

    /// Reads a list, treating a `null` body as empty.
    async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        Ok(self
            .get_json::<Option<Vec<T>>>(url)
            .await?
            .unwrap_or_default())
    }

    /// Appends `segments` to the base, percent-encoding each one.
    fn segments(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!(@InvalidArgument ("base" => self.base) "api_base cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn user_posts(&self, user_id: &str) -> Result<Url> {
        self.segments(&["users", user_id, "blogs"])
    }

    fn user_post(&self, user_id: &str, post_id: PostId) -> Result<Url> {
        self.segments(&["users", user_id, "blogs", &post_id.to_string()])
    }
}

#[async_trait]
impl Api for HttpApi {
    async fn current_user(&self) -> Result<CurrentUser> {
        self.get_json(self.endpoint("authentications/current-user")?)
            .await
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        self.get_list(self.endpoint("tags")?).await
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        self.get_list(self.public_posts.clone()).await
    }

    async fn list_user_posts(&self, user_id: &str) -> Result<Vec<Post>> {
        self.get_list(self.user_posts(user_id)?).await
    }

    async fn create_user_post(&self, user_id: &str, form: PostForm) -> Result<()> {
        let url = self.user_posts(user_id)?;
        debug!(%url, "POST");
        let form = form.into_multipart()?;
        self.send(self.request(Method::POST, url).multipart(form))
            .await?;
        Ok(())
    }

    async fn update_user_post(
        &self,
        user_id: &str,
        post_id: PostId,
        form: PostForm,
    ) -> Result<()> {
        let url = self.user_post(user_id, post_id)?;
        debug!(%url, "PUT");
        let form = form.into_multipart()?;
        self.send(self.request(Method::PUT, url).multipart(form))
            .await?;
        Ok(())
    }

    async fn delete_user_post(&self, user_id: &str, post_id: PostId) -> Result<()> {
        let url = self.user_post(user_id, post_id)?;
        debug!(%url, "DELETE");
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}
