use std::collections::HashMap;

use naga_oil::compose::{Composer, NagaModuleDescriptor, ShaderType};
use wgpu::naga::{
    self,
    valid::{Capabilities, ValidationFlags, Validator},
};

use crate::{asset::AssetSource, SceneError, SceneResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

/// A single compiled and validated WGSL stage.
#[derive(Debug, Clone)]
pub struct Shader {
    name: String,
    stage: ShaderStage,
    entry_point: String,
    module: naga::Module,
}

impl Shader {
    pub fn load(assets: &dyn AssetSource, name: &str, stage: ShaderStage) -> SceneResult<Self> {
        let source = assets.load_string(name)?;
        Self::compile(name, stage, &source)
    }

    pub fn compile(name: &str, stage: ShaderStage, source: &str) -> SceneResult<Self> {
        let compile_failed = |reason: String| SceneError::ShaderCompileFailed {
            name: name.to_string(),
            reason,
        };

        let mut composer = Composer::default();
        let module = composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path: name,
                shader_type: ShaderType::Wgsl,
                shader_defs: HashMap::default(),
                additional_imports: &[],
            })
            .map_err(|err| compile_failed(err.emit_to_string(&composer)))?;

        Validator::new(ValidationFlags::all(), Capabilities::empty())
            .validate(&module)
            .map_err(|err| compile_failed(err.into_inner().to_string()))?;

        let entry_point = module
            .entry_points
            .iter()
            .find(|ep| ep.stage == stage.to_naga())
            .map(|ep| ep.name.clone())
            .ok_or_else(|| compile_failed(format!("no {stage:?} entry point")))?;

        log::debug!("Compiled {stage:?} shader `{name}` (entry point `{entry_point}`).");

        Ok(Self {
            name: name.to_string(),
            stage,
            entry_point,
            module,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    #[inline]
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    #[inline]
    pub fn module(&self) -> &naga::Module {
        &self.module
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::MemoryAssetSource;

    const VERTEX: &str = r#"
@vertex
fn vertex(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 1.0);
}
"#;

    const FRAGMENT: &str = r#"
@fragment
fn fragment() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 1.0, 1.0);
}
"#;

    #[test]
    fn compiles_both_stages() {
        let vertex = Shader::compile("vertex.wgsl", ShaderStage::Vertex, VERTEX).unwrap();
        assert_eq!(vertex.entry_point(), "vertex");
        assert_eq!(vertex.stage(), ShaderStage::Vertex);

        let fragment = Shader::compile("fragment.wgsl", ShaderStage::Fragment, FRAGMENT).unwrap();
        assert_eq!(fragment.entry_point(), "fragment");
        assert_eq!(fragment.name(), "fragment.wgsl");
    }

    #[test]
    fn syntax_errors_fail_compilation() {
        let err = Shader::compile("broken.wgsl", ShaderStage::Vertex, "fn vertex( {").unwrap_err();
        match err {
            SceneError::ShaderCompileFailed { name, .. } => assert_eq!(name, "broken.wgsl"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn type_errors_fail_validation() {
        let source = r#"
@fragment
fn fragment() -> @location(0) vec4<f32> {
    let x: f32 = 1.0;
    return x;
}
"#;
        assert!(matches!(
            Shader::compile("mismatch.wgsl", ShaderStage::Fragment, source),
            Err(SceneError::ShaderCompileFailed { .. })
        ));
    }

    #[test]
    fn missing_stage_fails_compilation() {
        let err = Shader::compile("vertex.wgsl", ShaderStage::Fragment, VERTEX).unwrap_err();
        assert!(matches!(err, SceneError::ShaderCompileFailed { .. }));
    }

    #[test]
    fn shaders_resolve_through_assets() {
        let assets = MemoryAssetSource::new().with("vertex.wgsl", VERTEX.as_bytes());
        assert!(Shader::load(&assets, "vertex.wgsl", ShaderStage::Vertex).is_ok());
        assert!(matches!(
            Shader::load(&assets, "fragment.wgsl", ShaderStage::Fragment),
            Err(SceneError::AssetNotFound(_))
        ));
    }
}
