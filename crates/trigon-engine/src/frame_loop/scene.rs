use crate::geometry::Triangle;
use crate::gfx::ProgramSource;
use crate::input::Key;
use crate::paint::Color;

/// Static description of what a frame loop draws and which keys it obeys.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Background color the framebuffer is cleared to each frame.
    pub clear_color: Color,

    /// Drawn in order, one draw call each.
    pub triangles: Vec<Triangle>,

    /// Triangle `i` uses program `i % programs.len()`.
    pub programs: Vec<ProgramSource>,

    /// Key that requests close.
    pub close_key: Key,

    /// Key that toggles wireframe rendering. `None` disables the toggle.
    pub wireframe_key: Option<Key>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            clear_color: Color::rgb(0.2, 0.3, 0.3),
            triangles: Vec::new(),
            programs: Vec::new(),
            close_key: Key::Escape,
            wireframe_key: None,
        }
    }
}

impl Scene {
    pub fn new(clear_color: Color) -> Self {
        Self {
            clear_color,
            ..Self::default()
        }
    }

    pub fn triangle(mut self, triangle: Triangle) -> Self {
        self.triangles.push(triangle);
        self
    }

    pub fn program(mut self, program: ProgramSource) -> Self {
        self.programs.push(program);
        self
    }

    pub fn wireframe_key(mut self, key: Key) -> Self {
        self.wireframe_key = Some(key);
        self
    }
}
