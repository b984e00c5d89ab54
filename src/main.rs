use std::collections::HashSet;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use tile_raycaster::present::{StretchLut, blit_nearest};
use tile_raycaster::{
    ConfigSource, EngineConfig, Grid, InputState, MotionConfig, Pose, RenderContext, draw_commands,
    raster,
};

const DEFAULT_CONFIG: &str = "raycaster.toml";

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,

    ctx: RenderContext,
    grid: Grid,
    pose: Pose,
    motion: MotionConfig,
    show_minimap: bool,
    minimap_cell: usize,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Internal framebuffer at the configured resolution
    fb: Vec<u32>,
    fb_w: usize,
    fb_h: usize,

    stretch_lut: StretchLut,

    // Input
    keys_down: HashSet<KeyCode>,
    last_tick: Instant,
}

impl App {
    fn new(config: &EngineConfig) -> tile_raycaster::Result<Self> {
        let ctx = config.render_context()?;
        let grid = config.build_grid()?;
        let (fb_w, fb_h) = (ctx.projection.screen_width, ctx.projection.screen_height);

        Ok(Self {
            window: None,
            surface: None,
            ctx,
            grid,
            pose: config.start_pose(),
            motion: config.motion(),
            show_minimap: config.render.minimap,
            minimap_cell: config.render.minimap_cell,

            frame_counter: 0,
            last_fps_print: Instant::now(),

            fb: vec![0; fb_w * fb_h],
            fb_w,
            fb_h,

            stretch_lut: StretchLut::empty(),

            keys_down: HashSet::new(),
            last_tick: Instant::now(),
        })
    }

    fn input_state(&self) -> InputState {
        let down = |k: KeyCode| self.keys_down.contains(&k);
        InputState {
            forward: down(KeyCode::KeyW),
            backward: down(KeyCode::KeyS),
            strafe_left: down(KeyCode::KeyA),
            strafe_right: down(KeyCode::KeyD),
            turn_left: down(KeyCode::ArrowLeft),
            turn_right: down(KeyCode::ArrowRight),
        }
    }

    fn tick(&mut self) {
        // Compute dt with cap to avoid huge jumps if the app was paused
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).min(Duration::from_millis(100));
        self.last_tick = now;

        let input = self.input_state();
        self.pose
            .advance(dt.as_secs_f64() * 1000.0, &input, &self.motion);
    }

    fn draw(&mut self) -> tile_raycaster::Result<()> {
        let cmds = draw_commands(&self.ctx, &self.grid, &self.pose)?;
        raster::render_frame(&mut self.fb, self.fb_w, self.fb_h, &self.ctx, &cmds)?;
        if self.show_minimap {
            raster::draw_minimap(
                &mut self.fb,
                self.fb_w,
                self.fb_h,
                &self.grid,
                &self.pose,
                self.minimap_cell,
            );
        }
        Ok(())
    }

    fn count_frame(&mut self) {
        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            let fps = self.frame_counter as f32 / elapsed;
            info!("FPS: {:.1}", fps);
            if let Some(window) = &self.window {
                window.set_title(&format!("Raycaster {:.1}", fps));
            }
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("Raycaster")
            .with_inner_size(LogicalSize::new(self.fb_w as f64, self.fb_h as f64));

        let window = Rc::new(event_loop.create_window(attributes).expect("create window"));

        let context = softbuffer::Context::new(window.clone()).expect("softbuffer context");
        let surface =
            softbuffer::Surface::new(&context, window.clone()).expect("softbuffer surface");

        let size = window.inner_size();
        self.stretch_lut = StretchLut::new(
            size.width as usize,
            size.height as usize,
            self.fb_w,
            self.fb_h,
        );

        self.surface = Some(surface);
        self.last_tick = Instant::now();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    if code == KeyCode::Escape {
                        event_loop.exit();
                    } else if code == KeyCode::KeyM && !repeat {
                        self.show_minimap = !self.show_minimap;
                    }
                    self.keys_down.insert(code);
                }
                ElementState::Released => {
                    self.keys_down.remove(&code);
                }
            },

            WindowEvent::RedrawRequested => {
                self.tick();

                if let Err(e) = self.draw() {
                    error!("frame failed: {e}");
                    event_loop.exit();
                    return;
                }

                let (window, surface) = match (&self.window, &mut self.surface) {
                    (Some(w), Some(s)) if w.id() == id => (w, s),
                    _ => return,
                };

                let size = window.inner_size();
                let (Some(nw), Some(nh)) =
                    (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                else {
                    return; // Minimized window, skip drawing
                };
                let dw = size.width as usize;
                if self.stretch_lut.dst_size() != (dw, size.height as usize) {
                    self.stretch_lut =
                        StretchLut::new(dw, size.height as usize, self.fb_w, self.fb_h);
                }

                if let Err(e) = surface.resize(nw, nh) {
                    warn!("surface resize failed: {e}");
                    return;
                }
                let mut buf = match surface.buffer_mut() {
                    Ok(buf) => buf,
                    Err(e) => {
                        warn!("no surface buffer: {e}");
                        return;
                    }
                };
                blit_nearest(&mut buf, dw, &self.fb, self.fb_w, &self.stretch_lut);
                if let Err(e) = buf.present() {
                    warn!("present failed: {e}");
                }

                self.count_frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::Resized(new_size) => {
                self.stretch_lut = StretchLut::new(
                    new_size.width as usize,
                    new_size.height as usize,
                    self.fb_w,
                    self.fb_h,
                );
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let (config, source) = EngineConfig::load_or_default(&path)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.logging.level),
    )
    .init();
    match source {
        ConfigSource::File(p) => info!("loaded config from {}", p.display()),
        ConfigSource::Defaults => warn!("{} not found, using built-in defaults", path.display()),
    }

    let mut app = App::new(&config)?;
    info!(
        "{}x{} view, {} rays, {} wall cells",
        app.fb_w,
        app.fb_h,
        app.ctx.projection.num_rays,
        app.grid.wall_count()
    );

    let event_loop = EventLoop::new()?;
    // Poll keeps frames coming while keys are held
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;
    Ok(())
}
