//! Resource archive facade
//!
//! [`ResourceArchive::open_file`] is the one entry point the rest of the
//! engine uses. Every call opens the files it needs, reads the resource
//! completely and closes them again before returning, so no file handles
//! are held between requests.

use crate::cache::{CacheStats, ResourceCache};
use crate::config::{ArchiveConfig, Platform};
use crate::cursor::ByteCursor;
use crate::data_file::DataFileReader;
use crate::directory::{DirectoryEntry, DirectoryReader};
use crate::error::{ArchiveError, Result};
use crate::layout::{ArchiveHandle, LayoutKind, MAC_ST25_LAYOUT};
use crate::mac_audio::MacAudioTable;
use crate::resource::Resource;
use std::fs::File;
use std::io::{BufReader, Read};
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::{debug, info};

/// Read access to a game's resources
pub struct ResourceArchive {
    config: ArchiveConfig,
    handle: ArchiveHandle,
    cache: Option<ResourceCache>,
}

impl ResourceArchive {
    /// Create an archive for the configured installation
    ///
    /// No files are touched until the first request.
    pub fn new(config: ArchiveConfig) -> Self {
        let handle = ArchiveHandle::resolve(&config);
        let cache = NonZeroUsize::new(config.cache_capacity).map(ResourceCache::new);

        info!(
            "Resource archive for {:?} on {} at {} ({:?}{})",
            config.game_type,
            config.platform,
            config.data_path.display(),
            handle.kind,
            if handle.is_demo { ", demo" } else { "" }
        );

        Self {
            config,
            handle,
            cache,
        }
    }

    /// Configuration the archive was created with
    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Resolved container layout
    pub fn handle(&self) -> &ArchiveHandle {
        &self.handle
    }

    /// Open a resource by its 8.3 name
    ///
    /// The name may contain `*`, `?` and `#` wildcards; the first matching
    /// directory entry is used. The returned stream holds the complete
    /// decoded resource under the name of the matched entry.
    pub fn open_file(&self, name: &str) -> Result<Resource> {
        if let Some(resource) = self.cache.as_ref().and_then(|cache| cache.get(name)) {
            debug!("Serving '{}' from cache", name);
            return Ok(resource);
        }

        let resource = match self.handle.kind {
            LayoutKind::FlatFiles => self.read_flat(name)?,
            LayoutKind::Container => self.read_from_container(name)?,
        };

        if let Some(cache) = &self.cache {
            cache.insert(name, resource.clone());
        }

        Ok(resource)
    }

    /// Whether a resource with this name exists, without decoding it
    pub fn contains(&self, name: &str) -> Result<bool> {
        match self.handle.kind {
            LayoutKind::FlatFiles => Ok(self.handle.flat_path(name)?.is_file()),
            LayoutKind::Container => match self.directory()?.find_entry(name) {
                Ok(_) => Ok(true),
                Err(ArchiveError::FileNotFound(_)) => Ok(false),
                Err(e) => Err(e),
            },
        }
    }

    /// Every entry of the directory index, in file order
    pub fn entries(&self) -> Result<Vec<DirectoryEntry>> {
        match self.handle.kind {
            LayoutKind::FlatFiles => Err(ArchiveError::NoDirectory),
            LayoutKind::Container => self.directory()?.collect(),
        }
    }

    /// Read a sound from the Macintosh audio file
    pub fn open_mac_sound(&self, name: &str) -> Result<Resource> {
        if self.handle.platform != Platform::Macintosh {
            return Err(ArchiveError::UnsupportedPlatform {
                operation: "Macintosh sound lookup",
                platform: self.handle.platform,
            });
        }

        let path = self.handle.audio_path();
        let cursor = ByteCursor::new(BufReader::new(open(&path)?))?;
        let data = MacAudioTable::new(cursor, MAC_ST25_LAYOUT).read_sound(name)?;

        Ok(Resource::new(name, data))
    }

    /// Cache counters, if caching is enabled
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(ResourceCache::stats)
    }

    /// Drop all cached resources
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    fn read_flat(&self, name: &str) -> Result<Resource> {
        let path = self.handle.flat_path(name)?;
        debug!("Opening loose file {}", path.display());

        let mut data = Vec::new();
        open(&path)?.read_to_end(&mut data)?;
        Ok(Resource::new(name, data))
    }

    fn read_from_container(&self, name: &str) -> Result<Resource> {
        let entry = self.directory()?.find_entry(name)?;

        if entry.location.sub_file_count != 1 {
            return Err(ArchiveError::MultiPartNotSupported {
                name: entry.name,
                sub_file_count: entry.location.sub_file_count,
                sub_file_index: 0,
            });
        }

        debug!(
            "Found '{}' as {} at {:#x} in {}",
            name, entry.name, entry.location.offset, self.handle.data_file_name
        );

        let data_file = open(&self.handle.data_path())?;
        let cursor = ByteCursor::new(BufReader::new(data_file))?;
        let data = DataFileReader::new(cursor, self.handle.byte_order()).read_entry(&entry, 0)?;
        Ok(Resource::new(entry.name, data))
    }

    fn directory(&self) -> Result<DirectoryReader<BufReader<File>>> {
        let path = self.handle.index_path();
        debug!(
            "Opening directory {} at {:#x}",
            path.display(),
            self.handle.directory_offset
        );

        let mut cursor = ByteCursor::new(BufReader::new(open(&path)?))?;
        cursor.seek_to(self.handle.directory_offset)?;

        Ok(DirectoryReader::new(
            cursor,
            self.handle.is_demo,
            self.handle.byte_order(),
        ))
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| ArchiveError::ResourceNotFound {
        path: path.to_path_buf(),
        source,
    })
}
