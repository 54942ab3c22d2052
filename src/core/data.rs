//! Store adapters. Content lives in two JSON documents, `translations` and
//! `subscribers_list`, inside one collection of a document store.

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use awc::{http::StatusCode, Client};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::{
    core::settings::{Settings, StoreSettings},
    error::{CmsError, Result},
    types::{Subscriber, SubscriberList, Translations},
};

pub const TRANSLATIONS_DOC: &str = "translations";
pub const SUBSCRIBERS_DOC: &str = "subscribers_list";

/// Translations with inline images get large; the default body limit is far too small.
const MAX_DOCUMENT_BYTES: usize = 64 * 1024 * 1024;

/// Durable storage for the content bundle and the subscriber list.
///
/// Adapters only move whole documents; the typed operations are provided on
/// top of [`read_document`](ContentStore::read_document) and
/// [`write_document`](ContentStore::write_document). A write replaces the
/// document, so concurrent writers resolve as last-writer-wins.
#[async_trait(?Send)]
pub trait ContentStore: Send + Sync {
    fn describe(&self) -> String;

    /// Raw document bytes, or `None` when the document was never written.
    async fn read_document(&self, name: &str) -> Result<Option<Vec<u8>>>;

    async fn write_document(&self, name: &str, body: Vec<u8>) -> Result<()>;

    async fn load(&self) -> Result<Option<Translations>> {
        match self.read_document(TRANSLATIONS_DOC).await? {
            Some(body) => {
                debug!("Translations document size: {}", body.len());
                Ok(Some(serde_json::from_slice::<Translations>(&body)?))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, translations: &Translations) -> Result<()> {
        let body = serde_json::to_vec_pretty(translations)?;
        self.write_document(TRANSLATIONS_DOC, body).await
    }

    async fn load_subscribers(&self) -> Result<Vec<Subscriber>> {
        match self.read_document(SUBSCRIBERS_DOC).await? {
            Some(body) => Ok(serde_json::from_slice::<SubscriberList>(&body)?.subscribers),
            None => Ok(Vec::new()),
        }
    }

    async fn save_subscribers(&self, subscribers: &[Subscriber]) -> Result<()> {
        let document = SubscriberList {
            subscribers: subscribers.to_vec(),
        };
        self.write_document(SUBSCRIBERS_DOC, serde_json::to_vec_pretty(&document)?)
            .await
    }
}

pub fn open_store(settings: &Settings) -> Arc<dyn ContentStore> {
    let primary: Arc<dyn ContentStore> = match &settings.store {
        StoreSettings::Local { path } => Arc::new(LocalStore::new(path, &settings.collection)),
        StoreSettings::Remote { base_url, api_key } => Arc::new(RemoteStore::new(
            base_url,
            &settings.collection,
            api_key.clone(),
            settings.store_timeout(),
        )),
        StoreSettings::Memory => Arc::new(MemoryStore::new()),
    };
    match &settings.read_cache_path {
        Some(path) => {
            let cache = Arc::new(LocalStore::new(path, &settings.collection));
            Arc::new(CachedStore::new(primary, cache))
        }
        None => primary,
    }
}

/// One pretty-printed JSON file per document under `<root>/<collection>/`.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>, collection: &str) -> Self {
        LocalStore {
            dir: root.into().join(collection),
        }
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

#[async_trait(?Send)]
impl ContentStore for LocalStore {
    fn describe(&self) -> String {
        format!("local:{}", self.dir.display())
    }

    async fn read_document(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.document_path(name)).await {
            Ok(body) => Ok(Some(body)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(CmsError::storage(format!(
                "could not read {}: {}",
                self.document_path(name).display(),
                error
            ))),
        }
    }

    async fn write_document(&self, name: &str, body: Vec<u8>) -> Result<()> {
        let path = self.document_path(name);
        let staging = self.dir.join(format!(".{}.json.tmp", name));
        let write = async {
            tokio::fs::create_dir_all(&self.dir).await?;
            tokio::fs::write(&staging, &body).await?;
            tokio::fs::rename(&staging, &path).await
        };
        write.await.map_err(|error| {
            CmsError::storage(format!("could not write {}: {}", path.display(), error))
        })
    }
}

/// Document service reached over HTTP at `<base_url>/<collection>/<document>`.
///
/// `GET` returns the document (404 when absent) and `PUT` replaces it.
pub struct RemoteStore {
    base_url: String,
    collection: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl RemoteStore {
    pub fn new(
        base_url: &str,
        collection: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        RemoteStore {
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: collection.to_string(),
            api_key,
            timeout,
        }
    }

    fn url(&self, name: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.collection, name)
    }
}

#[async_trait(?Send)]
impl ContentStore for RemoteStore {
    fn describe(&self) -> String {
        format!("remote:{}/{}", self.base_url, self.collection)
    }

    async fn read_document(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let url = self.url(name);
        let client = Client::default();
        let mut request = client.get(&url).timeout(self.timeout);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let mut response = request
            .send()
            .await
            .map_err(|error| CmsError::storage(format!("GET {} failed: {}", url, error)))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(CmsError::storage(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }
        let body = response
            .body()
            .limit(MAX_DOCUMENT_BYTES)
            .await
            .map_err(|error| CmsError::storage(format!("could not read {}: {}", url, error)))?;
        Ok(Some(body.to_vec()))
    }

    async fn write_document(&self, name: &str, body: Vec<u8>) -> Result<()> {
        let url = self.url(name);
        let client = Client::default();
        let mut request = client
            .put(&url)
            .timeout(self.timeout)
            .content_type("application/json");
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request
            .send_body(body)
            .await
            .map_err(|error| CmsError::storage(format!("PUT {} failed: {}", url, error)))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(CmsError::storage(format!(
                "PUT {} returned {}",
                url,
                response.status()
            )))
        }
    }
}

/// Process-local documents. Reads and writes can be made to fail on demand.
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, Vec<u8>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait(?Send)]
impl ContentStore for MemoryStore {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    async fn read_document(&self, name: &str) -> Result<Option<Vec<u8>>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CmsError::storage("memory store is offline"));
        }
        Ok(self.documents.lock().get(name).cloned())
    }

    async fn write_document(&self, name: &str, body: Vec<u8>) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CmsError::storage("quota exceeded"));
        }
        self.documents.lock().insert(name.to_string(), body);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Mirrors every document seen on the primary store into a local cache and
/// answers reads from that cache while the primary is unreachable.
pub struct CachedStore {
    primary: Arc<dyn ContentStore>,
    cache: Arc<dyn ContentStore>,
}

impl CachedStore {
    pub fn new(primary: Arc<dyn ContentStore>, cache: Arc<dyn ContentStore>) -> Self {
        CachedStore { primary, cache }
    }

    async fn mirror(&self, name: &str, body: Vec<u8>) {
        if let Err(error) = self.cache.write_document(name, body).await {
            warn!("Could not refresh read-cache for {}: {}", name, error);
        }
    }
}

#[async_trait(?Send)]
impl ContentStore for CachedStore {
    fn describe(&self) -> String {
        format!(
            "{} (cached in {})",
            self.primary.describe(),
            self.cache.describe()
        )
    }

    async fn read_document(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match self.primary.read_document(name).await {
            Ok(Some(body)) => {
                self.mirror(name, body.clone()).await;
                Ok(Some(body))
            }
            Ok(None) => Ok(None),
            Err(error) => match self.cache.read_document(name).await {
                Ok(Some(body)) => {
                    info!("Serving {} from read-cache: {}", name, error);
                    Ok(Some(body))
                }
                _ => Err(error),
            },
        }
    }

    async fn write_document(&self, name: &str, body: Vec<u8>) -> Result<()> {
        self.primary.write_document(name, body.clone()).await?;
        self.mirror(name, body).await;
        Ok(())
    }
}
