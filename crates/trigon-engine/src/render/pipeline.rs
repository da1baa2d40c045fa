use crate::geometry::Vertex;
use crate::gfx::shaders::{FRAGMENT_ENTRY, VERTEX_ENTRY};
use crate::gfx::{CompileLog, ShaderStage};

/// Creates a shader module and appends its compile errors to `compile_log`.
///
/// Returns `None` when the stage did not compile.
pub(super) fn compile_stage(
    device: &wgpu::Device,
    label: &str,
    stage: ShaderStage,
    source: &str,
    compile_log: &mut CompileLog,
) -> Option<wgpu::ShaderModule> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let scoped = pollster::block_on(scope.pop());

    let info = pollster::block_on(module.get_compilation_info());
    let mut ok = true;
    for msg in info.messages {
        match msg.message_type {
            wgpu::CompilationMessageType::Error => {
                ok = false;
                compile_log.push(stage, msg.message);
            }
            wgpu::CompilationMessageType::Warning => {
                log::warn!("{label}: {}", msg.message);
            }
            wgpu::CompilationMessageType::Info => {
                log::debug!("{label}: {}", msg.message);
            }
        }
    }

    // Errors without a compilation message (e.g. a disabled feature).
    if let (true, Some(err)) = (ok, scoped) {
        ok = false;
        compile_log.push(stage, err.to_string());
    }

    ok.then_some(module)
}

/// Builds the pipeline for one program in one polygon mode.
///
/// Interface mismatches between the two stages surface here as validation
/// errors; they are appended to `compile_log` as link errors and `None` is
/// returned.
pub(super) fn build_pipeline(
    device: &wgpu::Device,
    label: &str,
    format: wgpu::TextureFormat,
    stages: (&wgpu::ShaderModule, &wgpu::ShaderModule),
    polygon_mode: wgpu::PolygonMode,
    compile_log: &mut CompileLog,
) -> Option<wgpu::RenderPipeline> {
    let (vertex, fragment) = stages;
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: vertex,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: fragment,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Both faces are drawn; scene triangles use either winding.
            cull_mode: None,
            polygon_mode,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    match pollster::block_on(scope.pop()) {
        Some(err) => {
            compile_log.push(ShaderStage::Link, err.to_string());
            None
        }
        None => Some(pipeline),
    }
}
