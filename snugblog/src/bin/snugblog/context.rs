use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use snugblog::{
    AppConfig, RedisStore, SocialService, Viewer,
    forms::LoginForm,
    routes::{self, LoginOutcome},
};

use crate::output::OutputManager;

/// Connection and identity settings shared by every command.
#[derive(Debug, Clone, Default)]
pub struct ConnectionArgs {
    pub config: Option<PathBuf>,
    pub redis_url: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct AppContext {
    pub service: SocialService<RedisStore>,
    credentials: Option<(String, String)>,
}

impl AppContext {
    pub async fn open(args: ConnectionArgs, output: &OutputManager) -> Result<Self> {
        let config = AppConfig::load(args.config.as_deref())
            .await?
            .with_redis_url(args.redis_url);
        output.verbose(&format!("connecting to {}", config.redis.url));
        let store = RedisStore::connect(&config.redis.url, config.redis.prefix.clone())
            .await
            .context("Failed to connect to Redis")?;
        output.verbose(&format!("using key prefix {}", store.prefix()));
        let service = SocialService::new(store, &config)?;
        let credentials = match (args.email, args.password) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        };
        Ok(Self { service, credentials })
    }

    /// Signs in with `--email`/`--password` and returns who the command acts as.
    pub async fn viewer(&self) -> Result<Viewer> {
        let Some((email, password)) = &self.credentials else {
            bail!("This command needs --email and --password (or SNUGBLOG_EMAIL and SNUGBLOG_PASSWORD)");
        };
        let form = LoginForm {
            email: email.clone(),
            password: password.clone(),
            remember: false,
        };
        match routes::login(&self.service, &form, None).await? {
            LoginOutcome::SignedIn { viewer, .. } => Ok(viewer),
            LoginOutcome::Refused(flash) => bail!("{}", flash.message),
        }
    }
}
