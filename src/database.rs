use serde::{de::DeserializeOwned, Serialize};
use std::{fmt, path::Path, sync::Arc, time::Duration};
use thiserror::Error;
use tokio::{fs, sync::RwLock, time};
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Store is not connected")]
    Unavailable,
    #[error("No record with id {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Codec(String),
    #[error("Database error: {0}")]
    Custom(String),
}

impl DbError {
    /// Text shown to the user who invoked the failing command.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(_) => "❌ Record not found.".to_string(),
            Self::Validation(reason) => format!("⚠️ {}", reason),
            _ => "❌ The debate records are unavailable right now. Please try again in a moment."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Disconnected,
    Connecting,
    Ready,
    Closed,
}

impl fmt::Display for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connecting => write!(f, "connecting"),
            Self::Ready => write!(f, "ready"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Debug)]
struct DatabaseInner<T> {
    data: T,
    path: String,
    state: StoreState,
}

impl<T> DatabaseInner<T> {
    fn ensure_ready(&self) -> Result<(), DbError> {
        match self.state {
            StoreState::Ready => Ok(()),
            _ => Err(DbError::Unavailable),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Database<T: Serialize + DeserializeOwned + Default + Send + Sync + Clone + 'static> {
    inner: Arc<RwLock<DatabaseInner<T>>>,
}

impl<T: Serialize + DeserializeOwned + Default + Send + Sync + Clone + 'static> Database<T> {
    /// Creates a disconnected handle. Nothing touches the disk until [`Database::connect`].
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(DatabaseInner {
                data: T::default(),
                path: path.into(),
                state: StoreState::Disconnected,
            })),
        }
    }

    pub async fn state(&self) -> StoreState {
        self.inner.read().await.state
    }

    pub async fn connect(&self) -> Result<(), DbError> {
        let path = {
            let mut guard = self.inner.write().await;
            match guard.state {
                StoreState::Ready => return Ok(()),
                StoreState::Connecting => return Err(DbError::Unavailable),
                StoreState::Disconnected | StoreState::Closed => {}
            }
            guard.state = StoreState::Connecting;
            guard.path.clone()
        };

        match Self::load(&path).await {
            Ok(data) => {
                let mut guard = self.inner.write().await;
                guard.data = data;
                guard.state = StoreState::Ready;
                info!("Database {} is ready", path);
                Ok(())
            }
            Err(e) => {
                self.inner.write().await.state = StoreState::Disconnected;
                error!("Failed to connect database {}: {}", path, e);
                Err(e)
            }
        }
    }

    pub async fn close(&self) {
        let mut guard = self.inner.write().await;
        guard.state = StoreState::Closed;
        info!("Database {} closed", guard.path);
    }

    async fn load(path: &str) -> Result<T, DbError> {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                error!("Failed to create database directory: {}", e);
                DbError::Io(e)
            })?;
        }

        if !Path::new(path).exists() {
            return Ok(T::default());
        }

        let bytes = fs::read(path).await?;
        Ok(match bincode::deserialize(&bytes) {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to deserialize database {}: {}", path, e);
                T::default()
            }
        })
    }

    async fn save(path: &str, data: &T) -> Result<(), DbError> {
        let bytes = bincode::serialize(data).map_err(|e| DbError::Codec(e.to_string()))?;

        match time::timeout(Duration::from_secs(5), fs::write(path, bytes)).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                error!("Database save operation timed out");
                Err(DbError::Custom("Save operation timed out".into()))
            }
        }
    }

    /// Runs `f` on a copy of the data and commits it only if `f` succeeds and the save lands.
    pub async fn transaction<F, R>(&self, f: F) -> Result<R, DbError>
    where
        F: FnOnce(&mut T) -> Result<R, DbError>,
    {
        let mut guard = self.inner.write().await;
        guard.ensure_ready()?;

        let mut data = guard.data.clone();
        let result = f(&mut data)?;

        Self::save(&guard.path, &data).await?;
        guard.data = data;

        Ok(result)
    }

    pub async fn read<F, R>(&self, f: F) -> Result<R, DbError>
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.inner.read().await;
        guard.ensure_ready()?;
        Ok(f(&guard.data))
    }
}
