use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use log::{debug, info, warn, error};
use crate::errors::WikiError;
use crate::types::{Page, Title};

const PAGE_EXTENSION: &str = "txt";

/// One `<title>.txt` file per page under a single directory
#[derive(Debug, Clone)]
pub struct PageStore {
    base_dir: PathBuf,
}

impl PageStore {
    /// Open the store, creating the pages directory if it is missing
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self, WikiError> {
        let base_dir = base_dir.into();
        debug!("Opening PageStore at {:?}", base_dir);

        if !base_dir.exists() {
            info!("Creating pages directory {:?}", base_dir);
            fs::create_dir_all(&base_dir).map_err(|e| {
                error!("Failed to create pages directory {:?}: {}", base_dir, e);
                WikiError::Io(e)
            })?;
        } else if !base_dir.is_dir() {
            error!("Pages path is not a directory: {:?}", base_dir);
            return Err(WikiError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", base_dir.display()),
            )));
        }

        Ok(Self { base_dir })
    }

    fn path_for(&self, title: &Title) -> PathBuf {
        self.base_dir.join(format!("{}.{}", title, PAGE_EXTENSION))
    }

    /// Write the page body, replacing whatever was there
    pub fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.path_for(&page.title);
        debug!("Saving page '{}' to {:?}", page.title, path);

        write_private(&path, &page.body).map_err(|e| {
            error!("Failed to write page {:?}: {}", path, e);
            WikiError::Io(e)
        })?;

        info!("Saved page '{}', {} bytes", page.title, page.body.len());
        Ok(())
    }

    /// Read a page; `NotFound` when no file exists for the title
    pub fn load(&self, title: &Title) -> Result<Page, WikiError> {
        let path = self.path_for(title);
        debug!("Loading page '{}' from {:?}", title, path);

        let body = fs::read(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                debug!("Page does not exist: {:?}", path);
                WikiError::NotFound
            } else {
                error!("Failed to read page {:?}: {}", path, e);
                WikiError::Io(e)
            }
        })?;

        Ok(Page::new(title.clone(), body))
    }

    /// Titles of every stored page, sorted
    pub fn list(&self) -> Result<Vec<Title>, WikiError> {
        let entries = fs::read_dir(&self.base_dir).map_err(|e| {
            error!("Failed to read directory {:?}: {}", self.base_dir, e);
            WikiError::Io(e)
        })?;

        let mut titles = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PAGE_EXTENSION) {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match Title::parse(stem) {
                Ok(title) => titles.push(title),
                Err(_) => debug!("Skipping file with non-title name: {:?}", path),
            }
        }

        titles.sort();
        info!("Listed {} pages in {:?}", titles.len(), self.base_dir);
        Ok(titles)
    }
}

#[cfg(unix)]
fn write_private(path: &Path, body: &[u8]) -> io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(body)
}

#[cfg(not(unix))]
fn write_private(path: &Path, body: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(body)
}
