use std::path::Path;

use crate::database::{Database, DbError};
use crate::modules::debates::database::DebateDatabase;
use tracing::info;

#[derive(Debug)]
pub struct Databases {
    pub debates: Database<DebateDatabase>,
}

impl Databases {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            debates: Database::new(data_dir.join("debates.db").to_string_lossy()),
        }
    }

    pub async fn connect_all(&self) -> Result<(), DbError> {
        self.debates.connect().await?;
        info!("debate store is {}", self.debates.state().await);
        Ok(())
    }

    pub async fn close_all(&self) {
        self.debates.close().await;
    }
}
