//! In-memory object store that records every call.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::backend::{ObjectStore, StoreConnector};
use super::error::{StorageError, StorageResult};
use super::gateway::StorageGateway;
use super::options::SignedAccessOptions;
use super::uri::{decompose_uri, StorageUri};
use crate::config::StorageConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SignedUrl {
        object: StorageUri,
        options: SignedAccessOptions,
        issued_at: DateTime<Utc>,
    },
    ContainerExists(String),
    CreateContainer {
        container: String,
        location: String,
    },
    CopyObject {
        source: StorageUri,
        destination: StorageUri,
    },
    DownloadObject(StorageUri),
}

#[derive(Default)]
struct MockState {
    calls: Vec<Call>,
    connections: usize,
    containers: HashSet<String>,
    objects: HashMap<StorageUri, Vec<u8>>,
    failure: Option<String>,
    conflict_on_create: bool,
}

#[derive(Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<MockState>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(self, name: &str) -> Self {
        self.state.lock().unwrap().containers.insert(name.to_string());
        self
    }

    pub fn with_object(self, uri: &str, bytes: &[u8]) -> Self {
        let object = decompose_uri(uri);
        {
            let mut state = self.state.lock().unwrap();
            state.containers.insert(object.container.clone());
            state.objects.insert(object, bytes.to_vec());
        }
        self
    }

    /// Every backend call fails with a backend error.
    pub fn failing(self, message: &str) -> Self {
        self.state.lock().unwrap().failure = Some(message.to_string());
        self
    }

    /// Report missing containers, then lose the race when creating them.
    pub fn conflict_on_create(self) -> Self {
        self.state.lock().unwrap().conflict_on_create = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn connections(&self) -> usize {
        self.state.lock().unwrap().connections
    }

    pub fn has_container(&self, name: &str) -> bool {
        self.state.lock().unwrap().containers.contains(name)
    }

    pub fn gateway(&self, config: StorageConfig) -> StorageGateway {
        StorageGateway::new(Arc::new(self.clone()), config)
    }

    fn record(&self, call: Call) -> StorageResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match &state.failure {
            Some(message) => Err(StorageError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StoreConnector for MockStore {
    async fn connect(&self) -> StorageResult<Box<dyn ObjectStore>> {
        self.state.lock().unwrap().connections += 1;
        Ok(Box::new(self.clone()))
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn signed_url(
        &self,
        object: &StorageUri,
        options: &SignedAccessOptions,
        issued_at: DateTime<Utc>,
    ) -> StorageResult<String> {
        self.record(Call::SignedUrl {
            object: object.clone(),
            options: options.clone(),
            issued_at,
        })?;
        let ttl = options.ttl_from(issued_at)?;
        Ok(format!(
            "https://storage.googleapis.com/{}/{}?X-Goog-Expires={}",
            object.container,
            object.object_key,
            ttl.as_secs()
        ))
    }

    async fn container_exists(&self, container: &str) -> StorageResult<bool> {
        self.record(Call::ContainerExists(container.to_string()))?;
        Ok(self.has_container(container))
    }

    async fn create_container(&self, container: &str, location: &str) -> StorageResult<()> {
        self.record(Call::CreateContainer {
            container: container.to_string(),
            location: location.to_string(),
        })?;
        let mut state = self.state.lock().unwrap();
        if state.conflict_on_create || !state.containers.insert(container.to_string()) {
            return Err(StorageError::AlreadyExists(container.to_string()));
        }
        Ok(())
    }

    async fn copy_object(&self, source: &StorageUri, destination: &StorageUri) -> StorageResult<()> {
        self.record(Call::CopyObject {
            source: source.clone(),
            destination: destination.clone(),
        })?;
        let mut state = self.state.lock().unwrap();
        let bytes = state
            .objects
            .get(source)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(source.to_gs_uri()))?;
        state.objects.insert(destination.clone(), bytes);
        Ok(())
    }

    async fn download_object(&self, object: &StorageUri) -> StorageResult<Vec<u8>> {
        self.record(Call::DownloadObject(object.clone()))?;
        self.state
            .lock()
            .unwrap()
            .objects
            .get(object)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(object.to_gs_uri()))
    }
}
