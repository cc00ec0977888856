//! One-time loading of the charting library.
//!
//! The first caller of [`ChartLibrary::ensure_loaded`] starts the load; any
//! caller arriving while it is in flight waits on the same attempt. The
//! outcome is kept for the life of the value, failures included.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::OnceCell;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryLoadError {
    /// The library could not be fetched or initialized.
    #[error("chart library failed to load: {0}")]
    Failed(String),
    /// The library loaded but does not expose what the dashboard needs.
    #[error("chart library is missing {0}")]
    MissingCapability(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryInfo {
    pub name: String,
    pub version: String,
}

#[async_trait(?Send)]
pub trait LibraryLoader {
    async fn load(&self) -> Result<LibraryInfo, LibraryLoadError>;
}

pub struct ChartLibrary {
    loader: Box<dyn LibraryLoader>,
    cell: OnceCell<Result<LibraryInfo, LibraryLoadError>>,
}

impl ChartLibrary {
    pub fn new(loader: impl LibraryLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            cell: OnceCell::new(),
        }
    }

    pub async fn ensure_loaded(&self) -> Result<&LibraryInfo, LibraryLoadError> {
        let outcome = self
            .cell
            .get_or_init(|| async {
                let outcome = self.loader.load().await;
                match &outcome {
                    Ok(info) => log::info!("[farm] library: loaded {} {}", info.name, info.version),
                    Err(e) => log::error!("[farm] library: {}", e),
                }
                outcome
            })
            .await;
        outcome.as_ref().map_err(Clone::clone)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(_)))
    }

    /// The stored failure, once a load attempt has failed.
    pub fn failure(&self) -> Option<&LibraryLoadError> {
        self.cell.get().and_then(|outcome| outcome.as_ref().err())
    }
}

/// Loader for renderers compiled into the binary. Always succeeds.
#[derive(Debug, Clone)]
pub struct BundledLibrary {
    pub name: &'static str,
    pub version: &'static str,
}

#[async_trait(?Send)]
impl LibraryLoader for BundledLibrary {
    async fn load(&self) -> Result<LibraryInfo, LibraryLoadError> {
        Ok(LibraryInfo {
            name: self.name.to_string(),
            version: self.version.to_string(),
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts load attempts; fails every attempt when `fail` is set.
    pub struct CountingLoader {
        pub calls: Rc<Cell<usize>>,
        pub fail: bool,
    }

    #[async_trait(?Send)]
    impl LibraryLoader for CountingLoader {
        async fn load(&self) -> Result<LibraryInfo, LibraryLoadError> {
            self.calls.set(self.calls.get() + 1);
            tokio::task::yield_now().await;
            if self.fail {
                Err(LibraryLoadError::Failed("script blocked".into()))
            } else {
                Ok(LibraryInfo {
                    name: "test".into(),
                    version: "1".into(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::CountingLoader;
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[tokio::test]
    async fn concurrent_callers_share_one_load() {
        let calls = Rc::new(Cell::new(0));
        let library = ChartLibrary::new(CountingLoader {
            calls: Rc::clone(&calls),
            fail: false,
        });
        let (a, b) = tokio::join!(library.ensure_loaded(), library.ensure_loaded());
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(calls.get(), 1);
        assert!(library.is_loaded());
    }

    #[tokio::test]
    async fn failure_is_permanent() {
        let calls = Rc::new(Cell::new(0));
        let library = ChartLibrary::new(CountingLoader {
            calls: Rc::clone(&calls),
            fail: true,
        });
        assert!(library.ensure_loaded().await.is_err());
        let again = library.ensure_loaded().await.unwrap_err();
        assert_eq!(again, LibraryLoadError::Failed("script blocked".into()));
        assert_eq!(calls.get(), 1);
        assert!(!library.is_loaded());
        assert!(library.failure().is_some());
    }
}
