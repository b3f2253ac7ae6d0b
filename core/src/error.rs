use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Asset `{0}` not found.")]
    AssetNotFound(String),
    #[error("Failed to read asset `{name}`: {source}")]
    AssetRead {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Shader `{name}` failed to compile: {reason}")]
    ShaderCompileFailed { name: String, reason: String },
    #[error("Program link failed: {0}")]
    ProgramLinkFailed(String),
    #[error("Invalid viewport {width}x{height}, both dimensions must be positive.")]
    InvalidViewport { width: i32, height: i32 },
    #[error("Mesh `{name}` could not be parsed: {reason}")]
    MeshParse { name: String, reason: String },
    #[error("Mesh `{0}` contains no triangles.")]
    EmptyMesh(String),
    #[error("Texture `{name}` could not be decoded: {source}")]
    TextureDecode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("No graphics adapter available.")]
    AdapterUnavailable,
    #[error("{0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("{0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
}

pub type SceneResult<T> = Result<T, SceneError>;
