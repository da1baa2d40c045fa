//! Embedded WGSL sources.
//!
//! Every program uses the entry points [`VERTEX_ENTRY`] and [`FRAGMENT_ENTRY`].

use crate::paint::Color;

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Passes `location(0)` positions straight through to clip space.
pub const POSITION_VERTEX: &str = r#"
@vertex
fn vs_main(@location(0) a_pos: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(a_pos.x, a_pos.y, a_pos.z, 1.0);
}
"#;

/// Fragment stage painting every fragment with `color`.
pub fn solid_fragment(color: Color) -> String {
    let c = color.clamped();
    // `{:?}` keeps the decimal point WGSL needs for float literals.
    format!(
        r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {{
    return vec4<f32>({:?}, {:?}, {:?}, {:?});
}}
"#,
        c.r, c.g, c.b, c.a
    )
}
