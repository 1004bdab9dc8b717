//! Artifact storage
//!
//! Exported PDFs are uploaded into named buckets and handed back to the
//! caller as time-limited signed URLs. Each bucket has a size ceiling and a
//! list of accepted content types.

use crate::error::StorageError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path, PathBuf};
use tokio::sync::RwLock;

const MB: u64 = 1024 * 1024;

/// Content type used when an upload doesn't declare one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Cache-Control value used when an upload doesn't declare one
pub const DEFAULT_CACHE_CONTROL: &str = "3600";

/// Limits and visibility of one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketConfig {
    pub name: String,
    pub public: bool,
    pub file_size_limit: u64,
    /// Accepted content types; `*/*` accepts anything
    pub allowed_mime_types: Vec<String>,
}

impl BucketConfig {
    pub fn new(name: impl Into<String>, file_size_limit: u64) -> Self {
        Self {
            name: name.into(),
            public: false,
            file_size_limit,
            allowed_mime_types: vec!["*/*".to_string()],
        }
    }

    pub fn public(mut self) -> Self {
        self.public = true;
        self
    }

    pub fn with_mime_types(mut self, types: &[&str]) -> Self {
        self.allowed_mime_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    /// The standard bucket set
    pub fn defaults() -> Vec<BucketConfig> {
        vec![
            BucketConfig::new("documents", 50 * MB).with_mime_types(&[
                "application/pdf",
                "text/markdown",
                "text/plain",
            ]),
            BucketConfig::new("assets", 10 * MB).public().with_mime_types(&[
                "image/jpeg",
                "image/png",
                "image/webp",
                "image/svg+xml",
            ]),
            BucketConfig::new("repositories", 100 * MB)
                .with_mime_types(&["application/zip", "application/x-tar"]),
            BucketConfig::new("temp", 25 * MB),
        ]
    }

    pub fn accepts(&self, content_type: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|allowed| allowed == "*/*" || allowed == content_type)
    }
}

/// An object to store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub bucket: String,
    pub path: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub metadata: BTreeMap<String, String>,
    /// Replace an existing object at the same path
    pub upsert: bool,
    pub cache_control: Option<String>,
}

impl UploadRequest {
    pub fn new(bucket: impl Into<String>, path: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            bucket: bucket.into(),
            path: path.into(),
            bytes,
            content_type: None,
            metadata: BTreeMap::new(),
            upsert: false,
            cache_control: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_upsert(mut self, upsert: bool) -> Self {
        self.upsert = upsert;
        self
    }

    pub fn content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

/// Where an upload landed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub path: String,
    /// Public URL for public buckets, otherwise the object path
    pub url: String,
    pub size: u64,
    pub content_type: String,
}

/// Stored object attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    pub content_type: String,
    pub size: u64,
    pub cache_control: String,
    pub metadata: BTreeMap<String, String>,
    pub uploaded_at: DateTime<Utc>,
}

impl ObjectMetadata {
    fn from_request(request: &UploadRequest) -> Self {
        Self {
            content_type: request.content_type().to_string(),
            size: request.bytes.len() as u64,
            cache_control: request
                .cache_control
                .clone()
                .unwrap_or_else(|| DEFAULT_CACHE_CONTROL.to_string()),
            metadata: request.metadata.clone(),
            uploaded_at: Utc::now(),
        }
    }
}

/// Persistence collaborator for exported artifacts
#[trait_variant::make(Send)]
pub trait ArtifactStore: Send + Sync {
    async fn upload(&self, request: UploadRequest) -> Result<UploadResult, StorageError>;

    async fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>, StorageError>;

    /// A URL granting read access to the object for `expires_in` seconds
    async fn signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in: u64,
    ) -> Result<String, StorageError>;

    async fn delete(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError>;
}

/// Whether `path` is a relative object path without empty, `.` or `..` segments
pub fn is_valid_object_path(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.contains('\\')
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

/// Percent-encode each segment of an object path
pub fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn bucket_map(buckets: Vec<BucketConfig>) -> HashMap<String, BucketConfig> {
    buckets.into_iter().map(|b| (b.name.clone(), b)).collect()
}

fn find_bucket<'a>(
    buckets: &'a HashMap<String, BucketConfig>,
    name: &str,
) -> Result<&'a BucketConfig, StorageError> {
    buckets.get(name).ok_or_else(|| StorageError::invalid_bucket(name))
}

/// Bucket, size, content type and path checks shared by all stores
fn check_upload<'a>(
    buckets: &'a HashMap<String, BucketConfig>,
    request: &UploadRequest,
) -> Result<&'a BucketConfig, StorageError> {
    let bucket = find_bucket(buckets, &request.bucket)?;
    if request.bytes.len() as u64 > bucket.file_size_limit {
        return Err(StorageError::file_too_large(bucket.file_size_limit));
    }
    if !bucket.accepts(request.content_type()) {
        return Err(StorageError::upload_failed(format!(
            "content type {} not allowed in bucket {}",
            request.content_type(),
            bucket.name
        )));
    }
    if !is_valid_object_path(&request.path) {
        return Err(StorageError::upload_failed(format!(
            "invalid object path '{}'",
            request.path
        )));
    }
    Ok(bucket)
}

fn expiry(expires_in: u64) -> Result<DateTime<Utc>, StorageError> {
    if expires_in == 0 {
        return Err(StorageError::signed_url_failed("expiry must be positive"));
    }
    let seconds = i64::try_from(expires_in)
        .map_err(|_| StorageError::signed_url_failed("expiry out of range"))?;
    Duration::try_seconds(seconds)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| StorageError::signed_url_failed("expiry out of range"))
}

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    info: ObjectMetadata,
}

#[derive(Debug, Clone)]
struct SignedGrant {
    bucket: String,
    path: String,
    expires_at: DateTime<Utc>,
}

fn prune_expired(grants: &mut HashMap<String, SignedGrant>, now: DateTime<Utc>) {
    grants.retain(|_, grant| grant.expires_at > now);
}

/// Artifact store held in memory
#[derive(Debug)]
pub struct InMemoryArtifactStore {
    base_url: String,
    buckets: HashMap<String, BucketConfig>,
    objects: RwLock<HashMap<(String, String), StoredObject>>,
    grants: RwLock<HashMap<String, SignedGrant>>,
    upload_failure: RwLock<Option<String>>,
}

impl Default for InMemoryArtifactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryArtifactStore {
    /// Store with the standard buckets
    pub fn new() -> Self {
        Self::with_buckets(BucketConfig::defaults())
    }

    pub fn with_buckets(buckets: Vec<BucketConfig>) -> Self {
        Self {
            base_url: "memory://storage".to_string(),
            buckets: bucket_map(buckets),
            objects: RwLock::new(HashMap::new()),
            grants: RwLock::new(HashMap::new()),
            upload_failure: RwLock::new(None),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Make every following upload fail with `message`
    pub async fn fail_uploads_with(&self, message: impl Into<String>) {
        *self.upload_failure.write().await = Some(message.into());
    }

    /// Attributes of a stored object
    pub async fn metadata(&self, bucket: &str, path: &str) -> Option<ObjectMetadata> {
        self.objects
            .read()
            .await
            .get(&(bucket.to_string(), path.to_string()))
            .map(|object| object.info.clone())
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Read the object behind a signed URL, if the grant is still valid
    pub async fn open_signed(&self, url: &str) -> Result<Vec<u8>, StorageError> {
        let token = url
            .split_once("?token=")
            .map(|(_, token)| token)
            .ok_or_else(|| StorageError::download_failed("URL is not signed"))?;
        let now = Utc::now();
        let grant = {
            let mut grants = self.grants.write().await;
            let grant = grants.get(token).cloned();
            prune_expired(&mut grants, now);
            grant
        }
        .ok_or_else(|| StorageError::download_failed("unknown token"))?;
        if grant.expires_at <= now {
            return Err(StorageError::download_failed("signed URL expired"));
        }
        self.download(&grant.bucket, &grant.path).await
    }

    /// Signed URL grants that have not been pruned yet
    pub async fn grant_count(&self) -> usize {
        self.grants.read().await.len()
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.base_url,
            bucket,
            encode_object_path(path)
        )
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    async fn upload(&self, request: UploadRequest) -> Result<UploadResult, StorageError> {
        let bucket = check_upload(&self.buckets, &request)?;
        if let Some(message) = self.upload_failure.read().await.as_ref() {
            return Err(StorageError::upload_failed(message));
        }

        let key = (request.bucket.clone(), request.path.clone());
        let mut objects = self.objects.write().await;
        if !request.upsert && objects.contains_key(&key) {
            return Err(StorageError::upload_failed("The resource already exists"));
        }

        let info = ObjectMetadata::from_request(&request);
        let url = if bucket.public {
            self.public_url(&request.bucket, &request.path)
        } else {
            request.path.clone()
        };
        let result = UploadResult {
            path: request.path.clone(),
            url,
            size: info.size,
            content_type: info.content_type.clone(),
        };
        objects.insert(
            key,
            StoredObject {
                bytes: request.bytes,
                info,
            },
        );
        Ok(result)
    }

    async fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>, StorageError> {
        find_bucket(&self.buckets, bucket)?;
        self.objects
            .read()
            .await
            .get(&(bucket.to_string(), path.to_string()))
            .map(|object| object.bytes.clone())
            .ok_or_else(|| StorageError::download_failed("Object not found"))
    }

    async fn signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in: u64,
    ) -> Result<String, StorageError> {
        find_bucket(&self.buckets, bucket)?;
        let key = (bucket.to_string(), path.to_string());
        if !self.objects.read().await.contains_key(&key) {
            return Err(StorageError::signed_url_failed("Object not found"));
        }

        let expires_at = expiry(expires_in)?;
        let token = uuid::Uuid::new_v4().simple().to_string();
        let mut grants = self.grants.write().await;
        prune_expired(&mut grants, Utc::now());
        grants.insert(
            token.clone(),
            SignedGrant {
                bucket: bucket.to_string(),
                path: path.to_string(),
                expires_at,
            },
        );
        Ok(format!(
            "{}/object/sign/{}/{}?token={}",
            self.base_url,
            bucket,
            encode_object_path(path),
            token
        ))
    }

    async fn delete(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        find_bucket(&self.buckets, bucket)?;
        let mut objects = self.objects.write().await;
        for path in paths {
            objects.remove(&(bucket.to_string(), path.clone()));
        }
        Ok(())
    }
}

/// Artifact store writing objects under a root directory.
///
/// Objects live at `{root}/{bucket}/{path}` with their attributes in a
/// `.meta.json` file next to them.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
    buckets: HashMap<String, BucketConfig>,
}

impl FsArtifactStore {
    /// Store with the standard buckets
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_buckets(root, BucketConfig::defaults())
    }

    pub fn with_buckets(root: impl Into<PathBuf>, buckets: Vec<BucketConfig>) -> Self {
        Self {
            root: root.into(),
            buckets: bucket_map(buckets),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of an object
    pub fn object_path(&self, bucket: &str, path: &str) -> PathBuf {
        let mut full = self.root.join(bucket);
        for component in Path::new(path).components() {
            if let Component::Normal(part) = component {
                full.push(part);
            }
        }
        full
    }

    fn meta_path(object: &Path) -> PathBuf {
        let mut name = object.as_os_str().to_owned();
        name.push(".meta.json");
        PathBuf::from(name)
    }

    /// Attributes recorded for an object
    pub async fn metadata(&self, bucket: &str, path: &str) -> Result<ObjectMetadata, StorageError> {
        let meta = Self::meta_path(&self.object_path(bucket, path));
        let content = tokio::fs::read_to_string(&meta)
            .await
            .map_err(StorageError::download_failed)?;
        serde_json::from_str(&content).map_err(StorageError::download_failed)
    }

    fn file_url(&self, bucket: &str, path: &str) -> String {
        let absolute = std::path::absolute(self.object_path(bucket, path))
            .unwrap_or_else(|_| self.object_path(bucket, path));
        let encoded = absolute
            .to_string_lossy()
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("file://{encoded}")
    }
}

impl ArtifactStore for FsArtifactStore {
    async fn upload(&self, request: UploadRequest) -> Result<UploadResult, StorageError> {
        let bucket = check_upload(&self.buckets, &request)?;
        let object = self.object_path(&request.bucket, &request.path);

        let exists = tokio::fs::try_exists(&object)
            .await
            .map_err(StorageError::upload_failed)?;
        if exists && !request.upsert {
            return Err(StorageError::upload_failed("The resource already exists"));
        }

        if let Some(parent) = object.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(StorageError::upload_failed)?;
        }
        tokio::fs::write(&object, &request.bytes)
            .await
            .map_err(StorageError::upload_failed)?;

        let info = ObjectMetadata::from_request(&request);
        let meta = serde_json::to_string_pretty(&info).map_err(StorageError::upload_failed)?;
        tokio::fs::write(Self::meta_path(&object), meta)
            .await
            .map_err(StorageError::upload_failed)?;

        tracing::debug!("Stored {} bytes at {}", info.size, object.display());

        let url = if bucket.public {
            self.file_url(&request.bucket, &request.path)
        } else {
            request.path.clone()
        };
        Ok(UploadResult {
            path: request.path,
            url,
            size: info.size,
            content_type: info.content_type,
        })
    }

    async fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>, StorageError> {
        find_bucket(&self.buckets, bucket)?;
        if !is_valid_object_path(path) {
            return Err(StorageError::download_failed(format!("invalid object path '{path}'")));
        }
        tokio::fs::read(self.object_path(bucket, path))
            .await
            .map_err(StorageError::download_failed)
    }

    async fn signed_url(
        &self,
        bucket: &str,
        path: &str,
        expires_in: u64,
    ) -> Result<String, StorageError> {
        find_bucket(&self.buckets, bucket)?;
        if !is_valid_object_path(path) {
            return Err(StorageError::signed_url_failed(format!("invalid object path '{path}'")));
        }
        let exists = tokio::fs::try_exists(self.object_path(bucket, path))
            .await
            .map_err(StorageError::signed_url_failed)?;
        if !exists {
            return Err(StorageError::signed_url_failed("Object not found"));
        }

        let expires_at = expiry(expires_in)?;
        Ok(format!(
            "{}?expires={}&token={}",
            self.file_url(bucket, path),
            expires_at.timestamp(),
            uuid::Uuid::new_v4().simple()
        ))
    }

    async fn delete(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        find_bucket(&self.buckets, bucket)?;
        for path in paths {
            if !is_valid_object_path(path) {
                return Err(StorageError::delete_failed(format!("invalid object path '{path}'")));
            }
            let object = self.object_path(bucket, path);
            for file in [Self::meta_path(&object), object] {
                match tokio::fs::remove_file(&file).await {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(StorageError::delete_failed(e)),
                }
            }
        }
        Ok(())
    }
}
