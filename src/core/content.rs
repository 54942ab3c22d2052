//! Live site content and the subscriber list, backed by a [`ContentStore`].

use std::{future::Future, sync::Arc, time::Duration};

use chrono::{SecondsFormat, Utc};
use parking_lot::RwLock;
use tracing::{error, info, warn};

use crate::{
    core::{
        data::ContentStore,
        defaults::default_translations,
        language::{self, Language},
    },
    error::{CmsError, Result},
    types::{Subscriber, Translations, WebsiteData},
};

pub struct ContentService {
    store: Arc<dyn ContentStore>,
    timeout: Duration,
    live: Arc<RwLock<Translations>>,
    // Held for save plus swap, so the store and the live copy see publishes in the same order.
    publishing: Arc<tokio::sync::Mutex<()>>,
    // Held across the store write so read-modify-write cycles don't interleave.
    subscribers: tokio::sync::Mutex<Vec<Subscriber>>,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>, timeout: Duration) -> Self {
        ContentService {
            store,
            timeout,
            live: Arc::new(RwLock::new(default_translations())),
            publishing: Arc::new(tokio::sync::Mutex::new(())),
            subscribers: tokio::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    /// Pulls translations and subscribers from the store. Never fails: an
    /// unreadable store leaves the built-in content in place.
    pub async fn load(&self) {
        let translations = match guarded(self.timeout, "load translations", self.store.load()).await
        {
            Ok(Some(translations)) => {
                info!("Loaded {} language(s) from {}", translations.len(), self.store.describe());
                translations
            }
            Ok(None) => {
                info!("No published content in {}, using defaults", self.store.describe());
                default_translations()
            }
            Err(error) => {
                warn!("Failed to load content, using defaults: {}", error);
                default_translations()
            }
        };
        *self.live.write() = translations;

        let subscribers =
            match guarded(self.timeout, "load subscribers", self.store.load_subscribers()).await {
                Ok(subscribers) => subscribers,
                Err(error) => {
                    warn!("Failed to load subscribers: {}", error);
                    Vec::new()
                }
            };
        *self.subscribers.lock().await = subscribers;
    }

    pub fn translations(&self) -> Translations {
        self.live.read().clone()
    }

    pub fn resolve(&self, language: Language) -> WebsiteData {
        language::resolve(&self.live.read(), language)
    }

    /// Persists `translations` and only then makes them live.
    ///
    /// Save and swap run together as their own task, so a caller that goes
    /// away mid-publish cannot leave the store and the live copy apart.
    pub async fn publish(&self, translations: Translations) -> Result<()> {
        let store = self.store.clone();
        let live = self.live.clone();
        let publishing = self.publishing.clone();
        let timeout = self.timeout;
        let task = actix_web::rt::spawn(async move {
            let _turn = publishing.lock().await;
            guarded(timeout, "save translations", store.save(&translations)).await?;
            *live.write() = translations;
            info!("Published content to {}", store.describe());
            Ok::<_, CmsError>(())
        });
        match task.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(error)) => {
                error!("Publish failed: {}", error);
                Err(error)
            }
            Err(error) => Err(CmsError::storage(format!("publish task aborted: {}", error))),
        }
    }

    pub async fn subscribers(&self) -> Vec<Subscriber> {
        self.subscribers.lock().await.clone()
    }

    /// Adds `email` at the head of the list. Returns `false` when it was
    /// already subscribed, in which case nothing is written.
    pub async fn add_subscriber(&self, email: &str) -> Result<bool> {
        let mut subscribers = self.subscribers.lock().await;
        if subscribers.iter().any(|subscriber| subscriber.email == email) {
            return Ok(false);
        }
        let mut next = Vec::with_capacity(subscribers.len() + 1);
        next.push(Subscriber {
            email: email.to_string(),
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        });
        next.extend(subscribers.iter().cloned());
        self.commit_subscribers(&mut subscribers, next).await?;
        info!("New subscriber {}", email);
        Ok(true)
    }

    pub async fn delete_subscriber(&self, email: &str) -> Result<bool> {
        let mut subscribers = self.subscribers.lock().await;
        let next: Vec<Subscriber> = subscribers
            .iter()
            .filter(|subscriber| subscriber.email != email)
            .cloned()
            .collect();
        if next.len() == subscribers.len() {
            return Ok(false);
        }
        self.commit_subscribers(&mut subscribers, next).await?;
        Ok(true)
    }

    pub async fn clear_subscribers(&self) -> Result<()> {
        let mut subscribers = self.subscribers.lock().await;
        self.commit_subscribers(&mut subscribers, Vec::new()).await
    }

    async fn commit_subscribers(
        &self,
        current: &mut Vec<Subscriber>,
        next: Vec<Subscriber>,
    ) -> Result<()> {
        guarded(
            self.timeout,
            "save subscribers",
            self.store.save_subscribers(&next),
        )
        .await
        .inspect_err(|error| error!("Failed to save subscribers: {}", error))?;
        *current = next;
        Ok(())
    }
}

/// Single attempt at a store call, bounded by `timeout`.
pub async fn guarded<T>(
    timeout: Duration,
    operation: &str,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(CmsError::storage(format!(
            "{} timed out after {}s",
            operation,
            timeout.as_secs()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{data::MemoryStore, defaults::default_bundle};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    /// Memory store whose writes take `delay` to land.
    #[derive(Default)]
    struct SlowStore {
        inner: MemoryStore,
        delay: Duration,
    }

    #[async_trait(?Send)]
    impl ContentStore for SlowStore {
        fn describe(&self) -> String {
            "slow".to_string()
        }

        async fn read_document(&self, name: &str) -> Result<Option<Vec<u8>>> {
            self.inner.read_document(name).await
        }

        async fn write_document(&self, name: &str, body: Vec<u8>) -> Result<()> {
            tokio::time::sleep(self.delay).await;
            self.inner.write_document(name, body).await
        }
    }

    fn edited(heading: &str) -> Translations {
        let mut translations = default_translations();
        translations.get_mut("en").unwrap().projects_heading = heading.to_string();
        translations
    }

    fn service() -> (Arc<MemoryStore>, ContentService) {
        let store = Arc::new(MemoryStore::new());
        let service = ContentService::new(store.clone(), Duration::from_secs(15));
        (store, service)
    }

    #[actix_web::test]
    async fn test_load_failure_falls_back_to_defaults() {
        let (store, service) = service();
        store.set_fail_reads(true);
        service.load().await;
        assert_eq!(service.translations(), default_translations());
        assert!(service.subscribers().await.is_empty());
    }

    #[actix_web::test]
    async fn test_publish_then_reload() {
        let (store, service) = service();
        let mut translations = default_translations();
        translations.insert("de".to_string(), default_bundle(Language::De));
        service.publish(translations.clone()).await.unwrap();

        let reloaded = ContentService::new(store, Duration::from_secs(15));
        reloaded.load().await;
        assert_eq!(reloaded.translations(), translations);
    }

    #[actix_web::test]
    async fn test_failed_publish_keeps_live_content() {
        let (store, service) = service();
        store.set_fail_writes(true);
        let mut translations = default_translations();
        translations.get_mut("en").unwrap().projects_heading = "Changed".to_string();

        let result = service.publish(translations).await;
        assert!(matches!(result, Err(CmsError::StorageUnavailable(_))));
        assert_eq!(service.translations(), default_translations());
    }

    #[actix_web::test]
    async fn test_add_subscriber_is_idempotent() {
        let (store, service) = service();
        assert!(service.add_subscriber("a@example.com").await.unwrap());
        assert!(!service.add_subscriber("a@example.com").await.unwrap());
        assert!(service.add_subscriber("b@example.com").await.unwrap());

        let emails: Vec<String> = service
            .subscribers()
            .await
            .into_iter()
            .map(|subscriber| subscriber.email)
            .collect();
        assert_eq!(emails, vec!["b@example.com", "a@example.com"]);
        assert_eq!(store.write_count(), 2);
    }

    #[actix_web::test]
    async fn test_subscriber_date_is_iso_utc() {
        let (_, service) = service();
        service.add_subscriber("a@example.com").await.unwrap();
        let date = service.subscribers().await[0].date.clone();
        assert!(date.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&date).is_ok());
    }

    #[actix_web::test]
    async fn test_delete_and_clear_subscribers() {
        let (store, service) = service();
        service.add_subscriber("a@example.com").await.unwrap();
        service.add_subscriber("b@example.com").await.unwrap();

        assert!(service.delete_subscriber("a@example.com").await.unwrap());
        assert!(!service.delete_subscriber("a@example.com").await.unwrap());
        assert_eq!(service.subscribers().await.len(), 1);

        service.clear_subscribers().await.unwrap();
        assert!(service.subscribers().await.is_empty());
        assert!(store.load_subscribers().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_failed_subscriber_save_is_not_committed() {
        let (store, service) = service();
        store.set_fail_writes(true);
        assert!(service.add_subscriber("a@example.com").await.is_err());
        assert!(service.subscribers().await.is_empty());
    }

    #[actix_web::test]
    async fn test_guard_times_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, CmsError>(())
        };
        let result = guarded(Duration::from_millis(10), "slow call", slow).await;
        assert!(matches!(result, Err(CmsError::StorageUnavailable(_))));
    }

    #[actix_web::test]
    async fn test_abandoned_publish_still_goes_live() {
        let store = Arc::new(SlowStore {
            delay: Duration::from_millis(50),
            ..Default::default()
        });
        let service = ContentService::new(store.clone(), Duration::from_secs(15));
        let next = edited("Published while the caller left");

        let abandoned =
            tokio::time::timeout(Duration::from_millis(10), service.publish(next.clone())).await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(store.load().await.unwrap(), Some(next.clone()));
        assert_eq!(service.translations(), next);
    }

    #[actix_web::test]
    async fn test_concurrent_publishes_agree_with_store() {
        let store = Arc::new(SlowStore {
            delay: Duration::from_millis(20),
            ..Default::default()
        });
        let service = Arc::new(ContentService::new(store.clone(), Duration::from_secs(15)));

        let first = actix_web::rt::spawn({
            let service = service.clone();
            async move { service.publish(edited("First")).await }
        });
        let second = actix_web::rt::spawn({
            let service = service.clone();
            async move { service.publish(edited("Second")).await }
        });
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        assert_eq!(store.load().await.unwrap(), Some(service.translations()));
    }
}
