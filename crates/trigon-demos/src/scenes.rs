use trigon_engine::frame_loop::Scene;
use trigon_engine::geometry::Triangle;
use trigon_engine::gfx::ProgramSource;
use trigon_engine::input::Key;
use trigon_engine::paint::Color;
use trigon_engine::window::RuntimeConfig;

/// Window that only clears to pink.
pub fn hello_window() -> (RuntimeConfig, Scene) {
    let config = RuntimeConfig::new("LearnOpenGL", 800.0, 600.0);
    let clear = Color::rgba(245.0 / 255.0, 40.0 / 255.0, 145.0 / 255.0, 0.8);
    (config, Scene::new(clear))
}

pub const ORANGE: Color = Color::rgb(1.0, 0.5, 0.2);

/// One orange triangle in the middle of the window.
pub fn hello_triangle() -> (RuntimeConfig, Scene) {
    let config = RuntimeConfig::new("urmom", 800.0, 600.0);
    let scene = Scene::new(Color::rgb(0.2, 0.3, 0.3))
        .triangle(Triangle::flat([-0.5, -0.5], [0.5, -0.5], [0.0, 0.5]))
        .program(ProgramSource::solid("orange", ORANGE));
    (config, scene)
}

/// Three triangles meeting at the origin.
pub const TRIANGLES: [Triangle; 3] = [
    Triangle::flat([-1.0, 0.0], [-0.5, 0.866], [0.0, 0.0]),
    Triangle::flat([0.0, 0.0], [0.5, 0.866], [1.0, 0.0]),
    Triangle::flat([0.0, 0.0], [-0.5, -0.866], [0.5, -0.866]),
];

/// Red, green and blue triangles; space toggles wireframe.
pub fn triangles() -> (RuntimeConfig, Scene) {
    let config = RuntimeConfig::new("UrMOM", 800.0, 800.0);
    let scene = Scene {
        clear_color: Color::rgb(0.2, 0.3, 0.3),
        triangles: TRIANGLES.to_vec(),
        programs: vec![
            ProgramSource::solid("red", Color::RED),
            ProgramSource::solid("green", Color::GREEN),
            ProgramSource::solid("blue", Color::BLUE),
        ],
        wireframe_key: Some(Key::Space),
        ..Scene::default()
    };
    (config, scene)
}
