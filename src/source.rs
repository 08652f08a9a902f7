use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::error::SourceError;
use crate::model::SkillsData;

/// Relative path the portfolio site serves its skills dataset from.
pub const DEFAULT_DATA_PATH: &str = "public/data/skills-data.json";

/// Supplies the skills dataset to a radar component.
pub trait SkillsSource: Send + Sync {
    fn load(&self) -> impl Future<Output = Result<Arc<SkillsData>, SourceError>> + Send;
}

impl<S: SkillsSource> SkillsSource for Arc<S> {
    fn load(&self) -> impl Future<Output = Result<Arc<SkillsData>, SourceError>> + Send {
        self.as_ref().load()
    }
}

/// Reads the dataset from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The dataset at [`DEFAULT_DATA_PATH`] under `root`.
    pub fn in_site(root: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join(DEFAULT_DATA_PATH))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SkillsSource for FileSource {
    async fn load(&self) -> Result<Arc<SkillsData>, SourceError> {
        log::info!("Loading skills data from {}", self.path.display());
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| SourceError::Io {
                    path: self.path.clone(),
                    source,
                })?;
        let data = SkillsData::from_json(&contents)?;
        log::debug!(
            "Loaded {} skill categories from {}",
            data.skill_categories.len(),
            self.path.display()
        );
        Ok(Arc::new(data))
    }
}

/// A dataset already held in memory as JSON text.
#[derive(Debug, Clone)]
pub struct StaticSource {
    json: String,
}

impl StaticSource {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl SkillsSource for StaticSource {
    async fn load(&self) -> Result<Arc<SkillsData>, SourceError> {
        Ok(Arc::new(SkillsData::from_json(&self.json)?))
    }
}

/// Wraps a source so it is hit at most once successfully. Failed loads are
/// not cached, so a retry goes back to the inner source.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    cache: OnceCell<Arc<SkillsData>>,
}

impl<S: SkillsSource> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.initialized()
    }
}

impl<S: SkillsSource> SkillsSource for CachedSource<S> {
    async fn load(&self) -> Result<Arc<SkillsData>, SourceError> {
        if let Some(data) = self.cache.get() {
            log::debug!("Using cached skills data");
            return Ok(data.clone());
        }
        self.cache
            .get_or_try_init(|| self.inner.load())
            .await
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DATA: &str = r##"{"skillCategories": [
        {"id": "a", "name": "A", "icon": "A", "color": "#111111", "skills": [{"name": "x", "level": 4}]}
    ]}"##;

    struct CountingSource {
        calls: AtomicUsize,
        fail_first: bool,
    }

    impl SkillsSource for CountingSource {
        async fn load(&self) -> Result<Arc<SkillsData>, SourceError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && call == 0 {
                return Err(SourceError::Io {
                    path: PathBuf::from("offline.json"),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "offline"),
                });
            }
            Ok(Arc::new(SkillsData::from_json(DATA)?))
        }
    }

    #[tokio::test]
    async fn cached_source_loads_once() {
        let cached = CachedSource::new(CountingSource {
            calls: AtomicUsize::new(0),
            fail_first: false,
        });
        let first = cached.load().await.unwrap();
        let second = cached.load().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cached = CachedSource::new(CountingSource {
            calls: AtomicUsize::new(0),
            fail_first: true,
        });
        assert!(cached.load().await.is_err());
        assert!(!cached.is_loaded());
        assert!(cached.load().await.is_ok());
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let source = FileSource::in_site("/definitely/not/here");
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("skills-data.json"));
    }

    #[tokio::test]
    async fn static_source_validates() {
        assert!(StaticSource::new(DATA).load().await.is_ok());
        assert!(matches!(
            StaticSource::new("{}").load().await,
            Err(SourceError::Data(_))
        ));
    }
}
