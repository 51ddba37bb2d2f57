use std::collections::HashSet;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use dogenstein::controls::{Controls, InputFlags, MoveOutcome};
use dogenstein::scaler::{BlockLut, blit_nearest, build_block_lut};
use dogenstein::{Camera, Level, PixelSink, RenderConfig, Renderer, World};

/// Raycasting walk-through of a grid level.
#[derive(Parser, Debug)]
#[command(name = "dogenstein")]
#[command(version)]
struct Args {
    /// Render configuration TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Level TOML; the built-in level is used when absent
    #[arg(long)]
    level: Option<PathBuf>,

    /// Window pixels per frame pixel
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..=16))]
    blocks: u32,

    /// Log frames per second once a second
    #[arg(long)]
    fps: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

type Surface = softbuffer::Surface<Rc<Window>, Rc<Window>>;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<Surface>,
    renderer: Renderer,
    world: World,
    camera: Camera,
    controls: Controls,
    blocks: u32,

    // HUD
    show_fps: bool,
    frame_counter: u32,
    last_fps_print: Instant,

    lut: BlockLut,

    keys_down: HashSet<KeyCode>,
    last_tick: Instant,
}

impl App {
    fn new(renderer: Renderer, level: Level, blocks: u32, show_fps: bool) -> Self {
        Self {
            window: None,
            surface: None,
            renderer,
            world: level.world,
            camera: level.spawn,
            controls: Controls::default(),
            blocks,
            show_fps,
            frame_counter: 0,
            last_fps_print: Instant::now(),
            lut: BlockLut::empty(),
            keys_down: HashSet::new(),
            last_tick: Instant::now(),
        }
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<(), String> {
        let config = self.renderer.config();
        let size = PhysicalSize::new(
            config.screen_width as u32 * self.blocks,
            config.screen_height as u32 * self.blocks,
        );
        let attributes = Window::default_attributes()
            .with_title("Dogenstein")
            .with_inner_size(size)
            .with_resizable(false);

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| format!("create window: {e}"))?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| format!("softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| format!("softbuffer surface: {e}"))?;

        window.request_redraw();
        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn input(&self) -> InputFlags {
        let down = |keys: &[KeyCode]| keys.iter().any(|k| self.keys_down.contains(k));
        InputFlags {
            forward: down(&[KeyCode::KeyW, KeyCode::ArrowUp]),
            back: down(&[KeyCode::KeyS, KeyCode::ArrowDown]),
            strafe_left: down(&[KeyCode::KeyZ]),
            strafe_right: down(&[KeyCode::KeyC]),
            turn_left: down(&[KeyCode::KeyA, KeyCode::ArrowLeft]),
            turn_right: down(&[KeyCode::KeyD, KeyCode::ArrowRight]),
        }
    }

    fn tick(&mut self) {
        // Compute dt with cap to avoid huge jumps if the app was paused
        let now = Instant::now();
        let dt = now
            .duration_since(self.last_tick)
            .min(Duration::from_millis(100));
        self.last_tick = now;

        let input = self.input();
        let outcome = self
            .controls
            .apply(&mut self.camera, &self.world.map, input, dt.as_secs_f32());
        if outcome == MoveOutcome::Moved {
            log::trace!("camera at {:?}", self.camera.pos);
        }
    }

    fn draw(&mut self, id: WindowId) -> Result<(), softbuffer::SoftBufferError> {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip drawing
        };
        let (dw, dh) = (size.width as usize, size.height as usize);
        surface.resize(w, h)?;

        self.renderer.render(&self.world, &self.camera);

        let frame = self.renderer.frame();
        if self.lut.dst_width() != dw || self.lut.dst_height() != dh {
            self.lut = build_block_lut(dw, dh, frame.width(), frame.height());
        }
        let mut buf = surface.buffer_mut()?;
        blit_nearest(&mut buf, dw, frame.pixels(), frame.width(), &self.lut);
        buf.present()?;

        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            if self.show_fps {
                log::info!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            }
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_surface(event_loop) {
            log::error!("{e}");
            event_loop.exit();
            return;
        }
        self.last_tick = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window closed; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match (code, state) {
                (KeyCode::KeyQ | KeyCode::Escape, ElementState::Pressed) => {
                    log::info!("Quit requested");
                    event_loop.exit();
                }
                (_, ElementState::Pressed) => {
                    self.keys_down.insert(code);
                }
                (_, ElementState::Released) => {
                    self.keys_down.remove(&code);
                }
            },

            WindowEvent::RedrawRequested => {
                self.tick();
                if let Err(e) = self.draw(id) {
                    log::error!("presenting frame failed: {e}");
                    event_loop.exit();
                }
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
    let args = Args::parse();

    let env = env_logger::Env::default().default_filter_or(args.log_level.as_str());
    env_logger::Builder::from_env(env).init();

    let config = match &args.config {
        Some(path) => RenderConfig::load_from_file(path)?,
        None => RenderConfig::default(),
    };
    let level = match &args.level {
        Some(path) => Level::load(path)?,
        None => Level::default_level()?,
    };
    let renderer = Renderer::new(config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(renderer, level, args.blocks, args.fps);
    event_loop.run_app(&mut app)?;
    Ok(())
}
