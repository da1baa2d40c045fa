use std::borrow::Cow;
use std::fmt;

use crate::paint::Color;

use super::handle::ProgramId;
use super::shaders;

/// Source text for one vertex + fragment program.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramSource {
    pub label: Cow<'static, str>,
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ProgramSource {
    pub fn new(
        label: impl Into<Cow<'static, str>>,
        vertex: impl Into<Cow<'static, str>>,
        fragment: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            label: label.into(),
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Pass-through positions, every fragment painted `color`.
    pub fn solid(label: impl Into<Cow<'static, str>>, color: Color) -> Self {
        Self::new(label, shaders::POSITION_VERTEX, shaders::solid_fragment(color))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Link,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Link => "link",
        };
        f.write_str(s)
    }
}

/// One error reported while compiling or linking.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub stage: ShaderStage,
    pub message: String,
}

/// Errors reported for one program. Empty means the program is valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileLog {
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileLog {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn push(&mut self, stage: ShaderStage, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            stage,
            message: message.into(),
        });
    }

    pub fn failed(&self, stage: ShaderStage) -> bool {
        self.diagnostics.iter().any(|d| d.stage == stage)
    }
}

/// Result of [`super::Graphics::compile_program`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledProgram {
    pub id: ProgramId,
    pub log: CompileLog,
}
