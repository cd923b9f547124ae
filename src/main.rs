use std::{path::Path, str::FromStr, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maternity_care::{
    api::HttpApi,
    blog::Board,
    config::Config,
    header::Header,
    host::{Host, LogHost},
    route::Route,
    session::{AuthProvider, StoredSession},
    storage,
    user_blog::UserPosts,
};

fn init_log() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_log();
    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "client.yaml".to_owned());
    let config = if Path::new(&config_path).exists() {
        Config::load(&config_path)?
    } else {
        warn!(path = config_path, "config not found, using defaults");
        Config::default()
    };

    let store = storage::parse_spec(&config.storage)?;
    let session = Arc::new(StoredSession::new(store.clone()));
    let api = HttpApi::new(&config, session.clone())?;
    let host = LogHost;

    let mut header = Header::new();
    header.mount(&api, &*session, &*store).await;
    info!(
        subscription = %header.subscription(),
        reminders = header.reminders().len(),
        "header mounted"
    );

    if let Some(path) = args.next() {
        let route = Route::from_str(&path)?;
        let gated = header
            .nav_links()
            .iter()
            .any(|it| it.gated && it.route == route);
        if gated {
            header.follow_gated(route, &api, &host).await;
        } else {
            host.navigate(route);
        }
    }

    let mut board = Board::new(config.default_image.clone());
    board.mount(&api).await;
    for slot in board.visible() {
        let post = slot.post();
        info!(id = post.id, title = post.title, tag = board.tag_label(post), "board post");
    }

    if session.user_id().is_some() {
        let mut mine = UserPosts::new();
        mine.mount(&api, &*session).await;
        info!(count = mine.visible().len(), "own posts");
    }

    Ok(())
}

