#![allow(dead_code, unused_imports)]

pub(crate) use std::sync::Arc;
pub(crate) use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) use snugblog::{
    AppConfig, MemoryStore, Post, RedisStore, Relationship, SearchOutcome, SocialError, SocialService, SocialStore,
    User, UserListKind, Viewer,
    config::SecuritySettings,
    forms::{CommentForm, LoginForm, MessageForm, PostForm, RegistrationForm, UpdateAccountForm},
    id::generate_token,
    routes::{self, FlashCategory, LoginOutcome, Reply, Response, Route},
};

pub(crate) const PASSWORD: &str = "correct horse";

/// Defaults with the cheapest argon2 cost so hashing stays fast in tests.
pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        security: SecuritySettings {
            argon2_memory_kib: 8,
            argon2_iterations: 1,
            argon2_parallelism: 1,
        },
        ..AppConfig::default()
    }
}

pub(crate) fn memory_service() -> SocialService<MemoryStore> {
    SocialService::new(MemoryStore::new(), &test_config()).expect("service")
}

pub(crate) fn registration(username: &str) -> RegistrationForm {
    RegistrationForm {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: PASSWORD.to_string(),
        confirm_password: PASSWORD.to_string(),
    }
}

pub(crate) async fn sign_up<S: SocialStore>(service: &SocialService<S>, username: &str) -> Viewer {
    let user = service.register(registration(username)).await.expect("register");
    Viewer::from(&user)
}

pub(crate) async fn write_post<S: SocialStore>(service: &SocialService<S>, author: &Viewer, title: &str) -> Post {
    let form = PostForm {
        title: title.to_string(),
        content: format!("{title} body"),
    };
    service.create_post(author, form).await.expect("create post")
}

pub(crate) fn message(content: &str) -> MessageForm {
    MessageForm {
        content: content.to_string(),
    }
}

pub(crate) static TEST_NAMESPACE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A key prefix no other test run shares; its keys are purged on [`TestNamespace::cleanup`].
pub(crate) struct TestNamespace {
    pub(crate) prefix: String,
}

impl TestNamespace {
    pub(crate) fn unique() -> Self {
        let idx = TEST_NAMESPACE_COUNTER.fetch_add(1, Ordering::SeqCst);
        Self {
            prefix: format!("snugblog_test_{idx}_{}", &generate_token()[..8]),
        }
    }

    pub(crate) async fn service(&self) -> SocialService<RedisStore> {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".to_string());
        let store = RedisStore::connect(&url, self.prefix.clone()).await.expect("redis store");
        SocialService::new(store, &test_config()).expect("service")
    }

    pub(crate) async fn cleanup(&self, service: &SocialService<RedisStore>) {
        let mut conn = service.store().connection();
        snugblog::purge_keys(&mut conn, &service.store().keys().service_pattern())
            .await
            .expect("purge test keys");
    }
}
