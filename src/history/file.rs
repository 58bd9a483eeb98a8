use async_trait::async_trait;
use log::debug;
use std::io::ErrorKind;
use std::path::{ Path, PathBuf };
use tokio::fs;
use crate::history::{ HistoryError, HistoryStore };

/// One JSON file per key under a directory. Writes go to a temporary file
/// first and are renamed into place, so readers never see a partial blob.
pub struct FileHistoryStore {
    dir: PathBuf,
}

impl FileHistoryStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, HistoryError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>, HistoryError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, blob: &str) -> Result<(), HistoryError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, blob).await?;
        fs::rename(&tmp, &path).await?;
        debug!("Wrote {} bytes of history to {}", blob.len(), path.display());
        Ok(())
    }
}
