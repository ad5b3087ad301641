//! GPU backend on top of macroquad.
//!
//! Every grid is a render target with nearest filtering. Macroquad
//! flushes queued draws whenever the camera changes, and each kernel run
//! ends by restoring the default camera, so a target's writes are issued
//! before it can be sampled as the next front buffer.

use macroquad::prelude::*;

use super::shaders::{
    RESOLUTION_UNIFORM, SCREEN_FRAGMENT_SHADER, STATE_SAMPLER, VERTEX_SHADER, rule_fragment_shader,
};
use crate::config::MAX_GRID_SIDE;
use crate::domain::Rule;
use crate::error::{SimError, SimResult};
use crate::graphics::{ChannelLayout, GraphicsBackend, GridId};

const SAMPLE_SLOTS: usize = 4;

/// Compiled rule kernel
pub struct KernelProgram {
    material: Material,
    name: &'static str,
}

impl KernelProgram {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

pub struct MacroquadBackend {
    targets: Vec<RenderTarget>,
    render_target: Option<GridId>,
    sample_slots: [Option<GridId>; SAMPLE_SLOTS],
    screen: Material,
}

impl MacroquadBackend {
    /// Must be called from inside the macroquad main loop
    pub fn new() -> SimResult<Self> {
        let screen = load_material(
            ShaderSource::Glsl {
                vertex: VERTEX_SHADER,
                fragment: SCREEN_FRAGMENT_SHADER,
            },
            MaterialParams::default(),
        )
        .map_err(|e| SimError::resource(format!("screen program: {e:?}")))?;

        Ok(Self {
            targets: Vec::new(),
            render_target: None,
            sample_slots: [None; SAMPLE_SLOTS],
            screen,
        })
    }

    /// Compile `rule` into a fragment-shader kernel
    pub fn compile_rule(&self, rule: &dyn Rule) -> SimResult<KernelProgram> {
        let fragment = rule_fragment_shader(rule);
        let material = load_material(
            ShaderSource::Glsl {
                vertex: VERTEX_SHADER,
                fragment: &fragment,
            },
            MaterialParams {
                uniforms: vec![UniformDesc::new(RESOLUTION_UNIFORM, UniformType::Float2)],
                textures: vec![STATE_SAMPLER.to_string()],
                ..Default::default()
            },
        )
        .map_err(|e| SimError::resource(format!("{} kernel: {e:?}", rule.name())))?;

        tracing::info!("compiled {} kernel ({})", rule.name(), rule.notation());
        Ok(KernelProgram {
            material,
            name: rule.name(),
        })
    }

    fn target(&self, grid: GridId) -> SimResult<&RenderTarget> {
        self.targets
            .get(grid.0)
            .ok_or_else(|| SimError::kernel(format!("unknown grid {:?}", grid)))
    }
}

/// Camera rendering into `target` with one unit per texel
fn target_camera(target: &RenderTarget) -> Camera2D {
    let size = target.texture.size();
    let mut camera = Camera2D::from_display_rect(Rect::new(0.0, 0.0, size.x, size.y));
    camera.render_target = Some(target.clone());
    camera
}

impl GraphicsBackend for MacroquadBackend {
    type Program = KernelProgram;

    fn create_grid(&mut self, width: usize, height: usize, layout: ChannelLayout) -> SimResult<GridId> {
        if width == 0 || height == 0 || width > MAX_GRID_SIDE || height > MAX_GRID_SIDE {
            return Err(SimError::resource(format!("cannot allocate a {width}x{height} render target")));
        }
        debug_assert_eq!(layout.bytes_per_texel(), 4);

        let target = render_target(width as u32, height as u32);
        target.texture.set_filter(FilterMode::Nearest);
        self.targets.push(target);

        let id = GridId(self.targets.len() - 1);
        self.clear(id);
        tracing::debug!("created {width}x{height} render target {:?}", id);
        Ok(id)
    }

    fn bind_as_render_target(&mut self, grid: GridId) {
        self.render_target = Some(grid);
    }

    fn bind_as_sample_source(&mut self, grid: GridId, slot: usize) {
        match self.sample_slots.get_mut(slot) {
            Some(entry) => *entry = Some(grid),
            None => tracing::warn!("sampler slot {slot} out of range, binding ignored"),
        }
    }

    fn clear(&mut self, target: GridId) {
        let Some(rt) = self.targets.get(target.0) else {
            return;
        };
        set_camera(&target_camera(rt));
        clear_background(Color::new(0.0, 0.0, 0.0, 0.0));
        set_default_camera();
    }

    fn execute_kernel(&mut self, program: &Self::Program, target: GridId) -> SimResult<()> {
        if self.render_target != Some(target) {
            return Err(SimError::kernel(format!("{:?} is not the bound render target", target)));
        }
        let source = self.sample_slots[0]
            .ok_or_else(|| SimError::kernel("no sample source bound at slot 0"))?;
        if source == target {
            return Err(SimError::kernel("sample source and render target are the same grid"));
        }

        let rt = self.target(target)?;
        let state = self.target(source)?.texture.clone();
        let size = rt.texture.size();
        if state.size() != size {
            return Err(SimError::kernel("sample source and render target differ in size"));
        }

        set_camera(&target_camera(rt));
        gl_use_material(&program.material);
        program.material.set_uniform(RESOLUTION_UNIFORM, size);
        program.material.set_texture(STATE_SAMPLER, state);
        draw_rectangle(0.0, 0.0, size.x, size.y, WHITE);
        gl_use_default_material();
        set_default_camera();
        Ok(())
    }

    fn present(&mut self, grid: GridId) {
        let Some(rt) = self.targets.get(grid.0) else {
            tracing::warn!("present of unknown grid {:?} skipped", grid);
            return;
        };

        set_default_camera();
        gl_use_material(&self.screen);
        // Row 0 of the grid is the bottom of the screen
        draw_texture_ex(
            &rt.texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                flip_y: true,
                ..Default::default()
            },
        );
        gl_use_default_material();
    }

    fn write_region(&mut self, grid: GridId, data: &[u8], x: usize, y: usize, w: usize, h: usize) {
        let Some(rt) = self.targets.get(grid.0) else {
            tracing::warn!("write to unknown grid {:?} dropped", grid);
            return;
        };
        let image = Image {
            bytes: data.to_vec(),
            width: w as u16,
            height: h as u16,
        };
        rt.texture
            .update_part(&image, x as i32, y as i32, w as i32, h as i32);
    }

    fn now(&self) -> f64 {
        get_time()
    }

    fn display_size(&self) -> (f32, f32) {
        (screen_width(), screen_height())
    }
}
