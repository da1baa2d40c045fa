use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::Result;

use trigon_engine::frame_loop::{FrameLoop, Scene};
use trigon_engine::geometry::{Triangle, Viewport};
use trigon_engine::gfx::{
    CompileLog, CompiledProgram, GeometryId, Graphics, ProgramId, ProgramSource, ShaderStage,
};
use trigon_engine::input::{FillMode, InputEvent, InputState, Key, KeyState};
use trigon_engine::paint::Color;

// ── recording backend ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Call {
    FillMode(FillMode),
    Viewport(Viewport),
    Clear(Color),
    Draw {
        geometry: GeometryId,
        program: ProgramId,
        vertices: u32,
    },
    Present,
}

/// Records every call; fails compilation of programs whose label starts
/// with "broken".
#[derive(Default)]
struct Recorder {
    next: u32,
    live_programs: HashMap<ProgramId, String>,
    live_geometry: HashMap<GeometryId, Triangle>,
    released_programs: Vec<ProgramId>,
    released_geometry: Vec<GeometryId>,
    double_releases: usize,
    /// Shared so releases stay observable after the loop is dropped.
    release_count: Rc<Cell<usize>>,
    fail_upload_at: Option<usize>,
    uploads: usize,
    calls: Vec<Call>,
}

impl Recorder {
    fn alloc(&mut self) -> u32 {
        self.next += 1;
        self.next
    }

    fn frame_draws(&self) -> Vec<(GeometryId, ProgramId, u32)> {
        let start = self
            .calls
            .iter()
            .rposition(|c| matches!(c, Call::Clear(_)))
            .unwrap_or(0);
        self.calls[start..]
            .iter()
            .filter_map(|c| match c {
                Call::Draw {
                    geometry,
                    program,
                    vertices,
                } => Some((*geometry, *program, *vertices)),
                _ => None,
            })
            .collect()
    }

    fn last_fill_mode(&self) -> Option<FillMode> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::FillMode(m) => Some(*m),
            _ => None,
        })
    }
}

impl Graphics for Recorder {
    fn compile_program(&mut self, source: &ProgramSource) -> CompiledProgram {
        let id = ProgramId::from_raw(self.alloc());
        let mut log = CompileLog::default();
        if source.label.starts_with("broken") {
            log.push(ShaderStage::Fragment, "error: expected `;`");
            log.push(ShaderStage::Link, "program not linked");
        }
        self.live_programs.insert(id, source.label.to_string());
        CompiledProgram { id, log }
    }

    fn upload_triangle(&mut self, triangle: &Triangle) -> Result<GeometryId> {
        if self.fail_upload_at == Some(self.uploads) {
            anyhow::bail!("out of device memory");
        }
        self.uploads += 1;
        let id = GeometryId::from_raw(self.alloc());
        self.live_geometry.insert(id, *triangle);
        Ok(id)
    }

    fn set_fill_mode(&mut self, mode: FillMode) {
        self.calls.push(Call::FillMode(mode));
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.calls.push(Call::Viewport(viewport));
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(Call::Clear(color));
    }

    fn draw(&mut self, geometry: GeometryId, program: ProgramId, vertex_count: u32) {
        self.calls.push(Call::Draw {
            geometry,
            program,
            vertices: vertex_count,
        });
    }

    fn present(&mut self) -> Result<()> {
        self.calls.push(Call::Present);
        Ok(())
    }

    fn release_geometry(&mut self, geometry: GeometryId) {
        if self.live_geometry.remove(&geometry).is_none() {
            self.double_releases += 1;
        }
        self.release_count.set(self.release_count.get() + 1);
        self.released_geometry.push(geometry);
    }

    fn release_program(&mut self, program: ProgramId) {
        if self.live_programs.remove(&program).is_none() {
            self.double_releases += 1;
        }
        self.release_count.set(self.release_count.get() + 1);
        self.released_programs.push(program);
    }
}

// ── helpers ───────────────────────────────────────────────────────────────

fn tri(offset: f32) -> Triangle {
    Triangle::flat([offset, 0.0], [offset + 0.5, 0.5], [offset + 1.0, 0.0])
}

fn scene(triangles: usize, programs: usize) -> Scene {
    let mut s = Scene::new(Color::rgb(0.2, 0.3, 0.3)).wireframe_key(Key::Space);
    for i in 0..triangles {
        s = s.triangle(tri(i as f32 * 0.1));
    }
    for i in 0..programs {
        s = s.program(ProgramSource::solid(format!("p{i}"), Color::RED));
    }
    s
}

fn rgb_scene() -> Scene {
    Scene::new(Color::rgb(0.2, 0.3, 0.3))
        .triangle(tri(-1.0))
        .triangle(tri(0.0))
        .triangle(tri(0.5))
        .program(ProgramSource::solid("red", Color::RED))
        .program(ProgramSource::solid("green", Color::GREEN))
        .program(ProgramSource::solid("blue", Color::BLUE))
        .wireframe_key(Key::Space)
}

fn set_key(input: &mut InputState, key: Key, down: bool) {
    let state = if down { KeyState::Pressed } else { KeyState::Released };
    input.apply_event(&InputEvent::Key {
        key,
        state,
        repeat: false,
    });
}

fn frame(fl: &mut FrameLoop<Recorder>, input: &InputState) {
    fl.poll_input(input);
    fl.render_frame();
    fl.present().unwrap();
}

// ── initialization ────────────────────────────────────────────────────────

#[test]
fn one_geometry_handle_per_triangle() {
    for n in [0, 1, 3, 7] {
        let fl = FrameLoop::initialize(&scene(n, 1), Recorder::default()).unwrap();
        assert_eq!(fl.geometry().len(), n);
        assert!(fl.failed_programs().is_empty());
        assert_eq!(fl.graphics().live_geometry.len(), n);
    }
}

#[test]
fn triangles_without_programs_is_a_setup_error() {
    let err = FrameLoop::initialize(&scene(2, 0), Recorder::default()).err();
    assert!(err.is_some());
}

#[test]
fn empty_scene_only_clears() {
    let mut fl = FrameLoop::initialize(&Scene::default(), Recorder::default()).unwrap();
    frame(&mut fl, &InputState::default());
    let calls = &fl.graphics().calls;
    assert!(calls.iter().any(|c| matches!(c, Call::Clear(_))));
    assert!(!calls.iter().any(|c| matches!(c, Call::Draw { .. })));
}

#[test]
fn failed_compile_is_reported_and_loop_proceeds() {
    let s = scene(2, 0)
        .program(ProgramSource::solid("broken", Color::RED))
        .program(ProgramSource::solid("ok", Color::GREEN));
    let mut fl = FrameLoop::initialize(&s, Recorder::default()).unwrap();
    assert_eq!(fl.programs().len(), 2);
    assert_eq!(fl.failed_programs(), &fl.programs()[..1]);

    frame(&mut fl, &InputState::default());
    let draws = fl.graphics().frame_draws();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].1, fl.programs()[0]);
    assert_eq!(fl.frames(), 1);
}

#[test]
fn upload_failure_releases_created_handles() {
    let released = Rc::new(Cell::new(0));
    let rec = Recorder {
        fail_upload_at: Some(2),
        release_count: Rc::clone(&released),
        ..Recorder::default()
    };

    let result = FrameLoop::initialize(&scene(3, 2), rec);
    let err = result.err().map(|e| format!("{e:#}"));
    assert!(err.is_some_and(|e| e.contains("triangle 2") && e.contains("out of device memory")));
    // 2 programs + the 2 triangles uploaded before the failure.
    assert_eq!(released.get(), 4);
}

// ── rendering ─────────────────────────────────────────────────────────────

#[test]
fn rgb_scene_draws_three_triangles_with_programs_in_order() {
    let mut fl = FrameLoop::initialize(&rgb_scene(), Recorder::default()).unwrap();
    let input = InputState::default();

    for _ in 0..3 {
        frame(&mut fl, &input);
        let draws = fl.graphics().frame_draws();
        let expected: Vec<_> = fl
            .geometry()
            .iter()
            .zip(fl.programs())
            .map(|(g, p)| (*g, *p, 3))
            .collect();
        assert_eq!(draws, expected);
    }

    let presents = fl.graphics().calls.iter().filter(|c| **c == Call::Present).count();
    assert_eq!(presents, 3);
}

#[test]
fn programs_cycle_when_triangles_outnumber_them() {
    let mut fl = FrameLoop::initialize(&scene(4, 2), Recorder::default()).unwrap();
    frame(&mut fl, &InputState::default());

    let programs = fl.programs().to_vec();
    let used: Vec<_> = fl.graphics().frame_draws().iter().map(|d| d.1).collect();
    assert_eq!(used, vec![programs[0], programs[1], programs[0], programs[1]]);
}

#[test]
fn frame_sets_fill_mode_before_clear() {
    let mut fl = FrameLoop::initialize(&scene(1, 1), Recorder::default()).unwrap();
    frame(&mut fl, &InputState::default());
    let calls = &fl.graphics().calls;
    assert_eq!(calls[0], Call::FillMode(FillMode::Filled));
    assert_eq!(calls[1], Call::Clear(Color::rgb(0.2, 0.3, 0.3)));
}

// ── input ─────────────────────────────────────────────────────────────────

#[test]
fn held_space_toggles_wireframe_once() {
    let mut fl = FrameLoop::initialize(&rgb_scene(), Recorder::default()).unwrap();
    let mut input = InputState::default();

    set_key(&mut input, Key::Space, true);
    let toggles = (0..50).filter(|_| fl.poll_input(&input).wireframe_toggled).count();
    assert_eq!(toggles, 1);
    assert_eq!(fl.fill_mode(), FillMode::Wireframe);

    fl.render_frame();
    assert_eq!(fl.graphics().last_fill_mode(), Some(FillMode::Wireframe));

    set_key(&mut input, Key::Space, false);
    fl.poll_input(&input);
    set_key(&mut input, Key::Space, true);
    assert!(fl.poll_input(&input).wireframe_toggled);
    assert_eq!(fl.fill_mode(), FillMode::Filled);
}

#[test]
fn space_is_ignored_without_a_wireframe_key() {
    let mut s = rgb_scene();
    s.wireframe_key = None;
    let mut fl = FrameLoop::initialize(&s, Recorder::default()).unwrap();
    let mut input = InputState::default();
    set_key(&mut input, Key::Space, true);
    assert!(!fl.poll_input(&input).wireframe_toggled);
    assert_eq!(fl.fill_mode(), FillMode::Filled);
}

#[test]
fn held_escape_requests_close_once() {
    let mut fl = FrameLoop::initialize(&rgb_scene(), Recorder::default()).unwrap();
    let mut input = InputState::default();
    assert!(!fl.should_close());

    set_key(&mut input, Key::Escape, true);
    let requests = (0..20).filter(|_| fl.poll_input(&input).close_requested).count();
    assert_eq!(requests, 1);
    assert!(fl.should_close());

    // Releasing does not reopen the loop.
    set_key(&mut input, Key::Escape, false);
    fl.poll_input(&input);
    assert!(fl.should_close());
}

#[test]
fn escape_suppresses_space_on_the_same_frame() {
    let mut fl = FrameLoop::initialize(&rgb_scene(), Recorder::default()).unwrap();
    let mut input = InputState::default();
    set_key(&mut input, Key::Escape, true);
    set_key(&mut input, Key::Space, true);

    let outcome = fl.poll_input(&input);
    assert!(outcome.close_requested);
    assert!(!outcome.wireframe_toggled);
    assert_eq!(fl.fill_mode(), FillMode::Filled);
}

// ── resize ────────────────────────────────────────────────────────────────

#[test]
fn resize_sets_viewport_with_zero_offset() {
    let mut fl = FrameLoop::initialize(&rgb_scene(), Recorder::default()).unwrap();
    fl.resize(800, 800);
    fl.resize(1024, 768);

    let expected = Viewport::new(0, 0, 1024, 768);
    assert_eq!(fl.viewport(), Some(expected));
    assert_eq!(fl.graphics().calls.last(), Some(&Call::Viewport(expected)));
}

// ── shutdown ──────────────────────────────────────────────────────────────

#[test]
fn shutdown_releases_every_handle_once() {
    let mut fl = FrameLoop::initialize(&rgb_scene(), Recorder::default()).unwrap();
    let programs = fl.programs().to_vec();
    let geometry = fl.geometry().to_vec();
    frame(&mut fl, &InputState::default());

    assert_eq!(fl.shutdown(), 6);
    assert_eq!(fl.shutdown(), 0);

    let g = fl.graphics();
    assert!(g.live_programs.is_empty());
    assert!(g.live_geometry.is_empty());
    assert_eq!(g.double_releases, 0);

    let mut released_p = g.released_programs.clone();
    let mut released_g = g.released_geometry.clone();
    released_p.sort();
    released_g.sort();
    assert_eq!(released_p, programs);
    assert_eq!(released_g, geometry);
}

#[test]
fn frame_after_shutdown_draws_nothing() {
    let mut fl = FrameLoop::initialize(&rgb_scene(), Recorder::default()).unwrap();
    fl.shutdown();
    frame(&mut fl, &InputState::default());
    assert!(fl.graphics().frame_draws().is_empty());
}
