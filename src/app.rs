use crate::error::SceneError;
use crate::io::config::Config;
use crate::io::image::save_framebuffer;
use crate::pipeline::passes::render_main_pass;
use crate::pipeline::renderer::Renderer;
use crate::scene::context::RenderContext;
use crate::scene::loader::init_scene_resources;
use crate::ui::input::InputController;
use crate::ui::overlay::draw_light_overlay;
use egui::{ColorImage, TextureHandle, TextureOptions, ViewportCommand};
use log::{debug, info};
use nalgebra::Vector3;
use std::time::Instant;

const WINDOW_TITLE: &str = "Scene with Materials and Lighting";

/// Interactive viewer: software-renders the scene every frame and shows it
/// as an egui texture under the parameter overlay.
pub struct SceneApp {
    context: RenderContext,
    renderer: Renderer,
    input: InputController,
    background: Vector3<f32>,
    texture: Option<TextureHandle>,
    /// Camera, light or overlay changed since the texture was last rendered.
    scene_dirty: bool,
}

impl SceneApp {
    pub fn new(config: &Config) -> Result<Self, SceneError> {
        let context = init_scene_resources(config)?;
        let mut renderer = Renderer::new(config.render.width, config.render.height, config.render.samples);
        renderer.set_cull_back_faces(config.render.cull_back_faces);

        Ok(Self {
            context,
            renderer,
            input: InputController::new(config.light.step),
            background: Vector3::from(config.render.background),
            texture: None,
            scene_dirty: true,
        })
    }

    fn render_to_texture(&mut self, ctx: &egui::Context) -> TextureHandle {
        render_main_pass(&self.context, &mut self.renderer, self.background);

        let fb = &self.renderer.framebuffer;
        let image = ColorImage::from_rgba_unmultiplied([fb.width, fb.height], &fb.to_rgba8());

        match &mut self.texture {
            Some(handle) => {
                handle.set(image, TextureOptions::LINEAR);
                handle.clone()
            }
            None => {
                let handle = ctx.load_texture("scene", image, TextureOptions::LINEAR);
                self.texture = Some(handle.clone());
                handle
            }
        }
    }
}

impl eframe::App for SceneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.input.quit_requested(ctx) {
            info!("Escape pressed, closing.");
            ctx.send_viewport_cmd(ViewportCommand::Close);
            return;
        }

        self.scene_dirty |= self.input.handle_keys(ctx, &mut self.context.light);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let size = ui.available_size();
                let resized = self
                    .renderer
                    .resize((size.x as usize).max(1), (size.y as usize).max(1));

                let texture = match self.texture.clone() {
                    Some(handle) if !resized && !self.scene_dirty => handle,
                    _ => {
                        self.scene_dirty = false;
                        self.render_to_texture(ctx)
                    }
                };
                let response = ui.add(
                    egui::Image::new(&texture)
                        .fit_to_exact_size(size)
                        .sense(egui::Sense::click_and_drag()),
                );
                // Picked up by the next frame.
                self.scene_dirty |= self
                    .input
                    .handle_viewport(ctx, &response, &mut self.context.camera);
            });

        let fps = self.context.stats.fps();
        self.scene_dirty |=
            draw_light_overlay(ctx, &mut self.context.light, &mut self.context.camera, fps);

        if let Some(fps) = self.context.stats.tick(Instant::now()) {
            debug!("FPS: {fps:.1}");
        }

        ctx.request_repaint();
    }
}

/// Opens the interactive window and blocks until it is closed.
pub fn run_gui(config: Config) -> Result<(), SceneError> {
    let (width, height) = (config.render.width, config.render.height);
    info!("Starting GUI mode ({}x{})...", width, height);
    info!("Controls: drag=orbit, wheel=zoom, I/K intensity, A/D Q/E W/S move light, R/G/B color, Esc quit");

    let app = SceneApp::new(&config)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([width as f32, height as f32]),
        ..Default::default()
    };

    eframe::run_native(WINDOW_TITLE, options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| SceneError::Gui(e.to_string()))
}

/// Renders one frame of the scene described by `config`.
pub fn render_still(config: &Config) -> Result<Renderer, SceneError> {
    let context = init_scene_resources(config)?;
    let mut renderer = Renderer::new(config.render.width, config.render.height, config.render.samples);
    renderer.set_cull_back_faces(config.render.cull_back_faces);

    let start_time = Instant::now();
    render_main_pass(&context, &mut renderer, Vector3::from(config.render.background));
    info!("Render completed in {:.2?}", start_time.elapsed());

    Ok(renderer)
}

/// Headless mode: one frame written to `render.output`.
pub fn run_cli(config: Config) -> Result<(), SceneError> {
    info!("Starting CLI mode...");
    let renderer = render_still(&config)?;
    save_framebuffer(&renderer.framebuffer, &config.render.output)?;
    info!("Done.");
    Ok(())
}
