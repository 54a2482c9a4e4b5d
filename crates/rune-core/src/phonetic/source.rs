use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::{PhoneticError, PinyinTable};

/// A pluggable place to load the pinyin table from.
pub trait PhoneticSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch and parse the table. May block.
    fn load(&self) -> Result<PinyinTable, PhoneticError>;
}

/// Remote table fetched over HTTP(S).
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PhoneticSource for HttpSource {
    fn name(&self) -> &str {
        "remote"
    }

    fn load(&self) -> Result<PinyinTable, PhoneticError> {
        debug!(url = %self.url, "fetching pinyin table");
        let body = ureq::get(&self.url)
            .call()
            .map_err(|e| PhoneticError::Http(format!("{}: {e}", self.url)))?
            .into_body()
            .read_to_string()
            .map_err(|e| PhoneticError::Http(format!("{}: {e}", self.url)))?;
        PinyinTable::parse(&body)
    }
}

/// The table compiled into the crate.
pub struct BundledSource;

impl PhoneticSource for BundledSource {
    fn name(&self) -> &str {
        "bundled"
    }

    fn load(&self) -> Result<PinyinTable, PhoneticError> {
        PinyinTable::bundled()
    }
}

/// A table file on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PhoneticSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn load(&self) -> Result<PinyinTable, PhoneticError> {
        let content = fs::read_to_string(&self.path)?;
        PinyinTable::parse(&content)
    }
}
