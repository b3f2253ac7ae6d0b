//! Named resource lookup.
//!
//! Shader sources, meshes and textures are all resolved by name through an
//! [`AssetSource`], so the scene never touches the filesystem directly.

use std::{
    borrow::Cow,
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{SceneError, SceneResult};

pub trait AssetSource {
    fn load(&self, name: &str) -> SceneResult<Cow<'_, [u8]>>;

    fn load_string(&self, name: &str) -> SceneResult<String> {
        let bytes = self.load(name)?;
        String::from_utf8(bytes.into_owned()).map_err(|err| SceneError::AssetRead {
            name: name.to_string(),
            source: std::io::Error::new(ErrorKind::InvalidData, err),
        })
    }
}

/// Resolves asset names relative to a root directory.
#[derive(Debug, Clone)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirAssetSource {
    fn load(&self, name: &str) -> SceneResult<Cow<'_, [u8]>> {
        let path = self.root.join(name);
        log::debug!("Loading asset {}", path.display());

        match std::fs::read(&path) {
            Ok(bytes) => Ok(Cow::Owned(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(SceneError::AssetNotFound(name.to_string()))
            }
            Err(source) => Err(SceneError::AssetRead {
                name: name.to_string(),
                source,
            }),
        }
    }
}

/// Assets held in memory, e.g. blobs compiled in with `include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSource {
    assets: HashMap<String, Cow<'static, [u8]>>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, data: impl Into<Cow<'static, [u8]>>) {
        self.assets.insert(name.into(), data.into());
    }

    pub fn with(mut self, name: impl Into<String>, data: impl Into<Cow<'static, [u8]>>) -> Self {
        self.insert(name, data);
        self
    }
}

impl AssetSource for MemoryAssetSource {
    fn load(&self, name: &str) -> SceneResult<Cow<'_, [u8]>> {
        self.assets
            .get(name)
            .map(|data| Cow::Borrowed(data.as_ref()))
            .ok_or_else(|| SceneError::AssetNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_resolves_inserted_assets() {
        let assets = MemoryAssetSource::new().with("vertex.wgsl", b"fn main() {}".as_slice());

        assert_eq!(assets.load("vertex.wgsl").unwrap().as_ref(), b"fn main() {}");
        assert_eq!(assets.load_string("vertex.wgsl").unwrap(), "fn main() {}");
    }

    #[test]
    fn missing_assets_are_reported_by_name() {
        let assets = MemoryAssetSource::new();
        match assets.load("teapot.obj") {
            Err(SceneError::AssetNotFound(name)) => assert_eq!(name, "teapot.obj"),
            other => panic!("unexpected result {other:?}"),
        }

        let dir = DirAssetSource::new(std::env::temp_dir().join("teapot-missing-assets"));
        assert!(matches!(
            dir.load("flower.ppm"),
            Err(SceneError::AssetNotFound(_))
        ));
    }

    #[test]
    fn dir_source_reads_files_below_root() {
        let root = std::env::temp_dir().join(format!("teapot-assets-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("fragment.wgsl"), "// fragment").unwrap();

        let assets = DirAssetSource::new(&root);
        assert_eq!(assets.root(), root.as_path());
        assert_eq!(assets.load_string("fragment.wgsl").unwrap(), "// fragment");

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn non_utf8_sources_are_rejected() {
        let assets = MemoryAssetSource::new().with("bad.wgsl", vec![0xff, 0xfe]);
        assert!(matches!(
            assets.load_string("bad.wgsl"),
            Err(SceneError::AssetRead { .. })
        ));
    }
}
