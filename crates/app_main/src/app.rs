//! Application main loop
//!
//! Owns the window, the GPU surface, and the egui frame; everything the
//! gallery does flows through here as stage mutations and controller
//! gestures.

use anyhow::Result;
use app_core::{state, Animator, Command, CommandId, PreloadEvent, Preloader, RowController, Stage};
use app_ui::{
    components::{
        draw, CoverOverlay, GalleryRows, LoadingOverlay, PreviewAction, PreviewView, RowsAction,
        ScrollDeck,
    },
    InputHandler, Renderer, TextureStore, Theme,
};
use egui_wgpu::ScreenDescriptor;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowId},
};

/// Display names for the gallery rows, cycled when the config asks for
/// more rows than the list holds
const ROW_NAMES: [&str; 10] = [
    "Meridian", "Halcyon", "Vespera", "Cascade", "Umbra", "Aurelia", "Solstice", "Thalassa",
    "Ember", "Borealis",
];

fn row_labels(rows: usize) -> Vec<String> {
    (0..rows)
        .map(|i| {
            if i < ROW_NAMES.len() {
                ROW_NAMES[i].to_string()
            } else {
                format!("{} {}", ROW_NAMES[i % ROW_NAMES.len()], i / ROW_NAMES.len() + 1)
            }
        })
        .collect()
}

/// Main application state for the event loop
struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    egui_ctx: egui::Context,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,

    // Scene and interaction
    stage: Stage,
    controller: RowController,
    preloader: Preloader,
    textures: TextureStore,

    // Views
    rows_view: GalleryRows,
    preview_view: PreviewView,
    cover_view: CoverOverlay,
    loading_view: LoadingOverlay,
    deck_view: ScrollDeck,
    input_handler: Option<InputHandler>,
    theme: Theme,

    last_frame: Instant,
}

impl App {
    fn new() -> Self {
        let config = state().map(|s| s.config.read().clone()).unwrap_or_default();

        let labels = row_labels(config.assets.rows);
        let stage = Stage::new(&labels, config.assets.cells_per_row, config.assets.preview_cells);
        let controller = RowController::new(Animator::new(config.assets.rows, &config.motion));

        // One decoded asset per image node, row cells and preview cells alike
        let slots = stage.asset_count();
        let preloader = Preloader::spawn(&config.assets, slots);
        let textures = TextureStore::new(slots);

        Self {
            window: None,
            renderer: None,
            egui_ctx: egui::Context::default(),
            egui_state: None,
            egui_renderer: None,

            stage,
            controller,
            preloader,
            textures,

            rows_view: GalleryRows::new(),
            preview_view: PreviewView::new(),
            cover_view: CoverOverlay::new(),
            loading_view: LoadingOverlay::new(),
            deck_view: ScrollDeck::new(config.assets.rows, config.motion.seed),
            input_handler: None,
            theme: Theme::by_name(&config.theme.name, config.theme.accent.as_deref()),

            last_frame: Instant::now(),
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let config = state().map(|s| s.config.read().clone()).unwrap_or_default();

        let mut window_attrs = Window::default_attributes()
            .with_title(config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width,
                config.window.height,
            ));
        if config.window.start_fullscreen {
            window_attrs = window_attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(event_loop.create_window(window_attrs)?);

        // Initialize renderer
        let renderer = pollster::block_on(Renderer::new(window.clone(), config.window.vsync))?;

        // Initialize egui
        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &renderer.device,
            renderer.config.format,
            None,
            1,
            false,
        );

        // Initialize input handler
        let input_handler = InputHandler::new(&config.keybindings);

        // Apply theme
        self.theme.apply(&self.egui_ctx);

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
        self.input_handler = Some(input_handler);

        Ok(())
    }

    /// Move finished preload work onto the GPU / into egui
    fn drain_preload(&mut self) {
        while let Some(event) = self.preloader.try_next() {
            match event {
                PreloadEvent::Image {
                    index,
                    width,
                    height,
                    rgba,
                } => {
                    self.textures
                        .install(&self.egui_ctx, index, width, height, &rgba);
                }
                PreloadEvent::FontLoaded(bytes) => {
                    install_display_font(&self.egui_ctx, bytes);
                }
                PreloadEvent::Finished { loaded, failed } => {
                    tracing::info!(loaded, failed, "assets ready");
                    self.stage.set_loading(false);
                }
            }
        }
    }

    /// Execute a resolved command; returns whether it was handled
    fn execute_command(&mut self, cmd: &Command) -> bool {
        tracing::debug!("Executing command: {}", cmd.id.as_str());

        match cmd.id.as_str() {
            CommandId::GALLERY_CLOSE => self.controller.close(&mut self.stage),

            CommandId::VIEW_TOGGLE_FULLSCREEN => {
                if let (Some(window), Some(state)) = (&self.window, state()) {
                    let fullscreen = state.toggle_fullscreen();
                    window.set_fullscreen(fullscreen.then(|| Fullscreen::Borderless(None)));
                    true
                } else {
                    false
                }
            }

            other => {
                tracing::debug!("Unhandled command: {}", other);
                false
            }
        }
    }

    fn render(&mut self) {
        // Extract references we need, avoiding borrow conflicts
        let window = match &self.window {
            Some(w) => w.clone(),
            None => return,
        };

        // Wall-clock frame delta, clamped so a stall cannot teleport a
        // transition across its whole duration
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        self.drain_preload();
        self.controller.tick(dt, &mut self.stage);

        let renderer = match &self.renderer {
            Some(r) => r,
            None => return,
        };

        let egui_state = match &mut self.egui_state {
            Some(s) => s,
            None => return,
        };

        // Get surface texture
        let output = match renderer.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.handle_device_lost();
                }
                return;
            }
            Err(e) => {
                tracing::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Run egui - take input before borrowing self
        let raw_input = egui_state.take_egui_input(&window);

        // A close click is honored only in the settled open phase; the
        // view uses this for pointer feedback, the controller re-checks
        let accept_close = self.controller.is_open() && !self.controller.is_animating();

        // Track UI actions from the egui closure
        let mut row_actions: Vec<RowsAction> = Vec::new();
        let mut preview_action: Option<PreviewAction> = None;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.stage.set_viewport(draw::to_stage(ctx.screen_rect()));

            egui::CentralPanel::default().show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .enable_scrolling(!self.stage.overflow_hidden())
                    .show(ui, |ui| {
                        row_actions =
                            self.rows_view
                                .show(ui, &mut self.stage, &self.textures, &self.theme);
                        self.deck_view.show(ui, &self.textures, &self.theme);
                    });
            });

            self.cover_view.show(ctx, &self.stage, &self.theme);
            preview_action = self.preview_view.show(
                ctx,
                &mut self.stage,
                &self.textures,
                &self.theme,
                accept_close,
            );
            self.loading_view
                .show(ctx, &self.stage, &self.textures, &self.theme);
        });

        // Gestures resolve against the controller after the frame
        for action in row_actions {
            match action {
                RowsAction::Hovered(row) => self.controller.pointer_enter(row, &mut self.stage),
                RowsAction::Unhovered(row) => self.controller.pointer_leave(row, &mut self.stage),
                RowsAction::Clicked(row) => {
                    self.controller.open(row, &mut self.stage);
                }
            }
        }
        if let Some(PreviewAction::CloseClicked) = preview_action {
            self.controller.close(&mut self.stage);
        }

        // Handle platform output
        if let Some(egui_state) = &mut self.egui_state {
            egui_state.handle_platform_output(&window, full_output.platform_output);
        }

        let clipped_primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        // Get renderer and egui_renderer again for rendering
        let renderer = match &self.renderer {
            Some(r) => r,
            None => return,
        };

        let egui_renderer = match &mut self.egui_renderer {
            Some(r) => r,
            None => return,
        };

        // Render
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [renderer.size.0, renderer.size.1],
            pixels_per_point: window.scale_factor() as f32,
        };

        let mut encoder = renderer
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui encoder"),
            });

        // Update egui textures
        for (id, delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&renderer.device, &renderer.queue, *id, delta);
        }

        egui_renderer.update_buffers(
            &renderer.device,
            &renderer.queue,
            &mut encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.02,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // SAFETY: The render_pass is dropped before encoder.finish() is called,
            // so the borrow is valid even though we're transmuting the lifetime.
            // This is necessary because egui-wgpu 0.29 requires 'static lifetime.
            let render_pass_static: &mut wgpu::RenderPass<'static> =
                unsafe { std::mem::transmute(&mut render_pass) };

            egui_renderer.render(render_pass_static, &clipped_primitives, &screen_descriptor);
        }

        // Free textures
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        renderer.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to initialize window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let Some(egui_state) = &mut self.egui_state {
            if let Some(window) = &self.window {
                let response = egui_state.on_window_event(window, &event);
                if response.consumed {
                    window.request_redraw();
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize((size.width, size.height));
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(handler) = &self.input_handler {
                    if let Some(cmd) = handler.handle_key(&event) {
                        if cmd.id.as_str() == CommandId::APP_QUIT {
                            tracing::info!("Quit requested");
                            event_loop.exit();
                            return;
                        }
                        self.execute_command(&cmd);
                    }
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                if let Some(handler) = &mut self.input_handler {
                    handler.update_modifiers(modifiers.state());
                }
            }

            WindowEvent::RedrawRequested => {
                self.render();
            }

            _ => {}
        }

        // Request redraw
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Install the preloaded face as the first proportional font
fn install_display_font(ctx: &egui::Context, bytes: Vec<u8>) {
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("display".to_string(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, "display".to_string());
    ctx.set_fonts(fonts);
}

/// Run the application
pub fn run() -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
