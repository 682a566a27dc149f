use std::num::NonZeroU32;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowId};

use raycaster::config::{Config, WINDOW_TITLE};
use raycaster::error::EngineError;
use raycaster::framebuffer::FrameBuffer;
use raycaster::game::GameState;
use raycaster::input::{InputState, is_quit_key};
use raycaster::scaler::{ScaleLut, blit_bilinear_stretch, build_scale_lut};

const FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

struct App {
    config: Config,
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    game: GameState,
    input: InputState,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Internal frame, stretched to the window on present
    fb: FrameBuffer,
    scale_lut: ScaleLut,

    last_frame: Instant,
    fatal: Option<EngineError>,
}

impl App {
    fn new(config: Config, game: GameState) -> Self {
        Self {
            config,
            window: None,
            surface: None,
            game,
            input: InputState::default(),
            frame_counter: 0,
            last_fps_print: Instant::now(),
            fb: FrameBuffer::new(0, 0),
            scale_lut: ScaleLut::empty(),
            last_frame: Instant::now(),
            fatal: None,
        }
    }

    /// Fatal error: stop the loop and hand the error back to `main`.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: EngineError) {
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<(), EngineError> {
        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(
                self.config.width as f64,
                self.config.height as f64,
            ));

        let window = Rc::new(event_loop.create_window(attributes)?);
        let context = softbuffer::Context::new(window.clone())?;
        let surface = softbuffer::Surface::new(&context, window.clone())?;

        // Relative mouse look
        if window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
            .is_err()
        {
            warn!("cursor grab refused; mouse look may stop at the window edge");
        }
        window.set_cursor_visible(false);

        let size = window.inner_size();
        info!("window {}x{}", size.width, size.height);
        self.rebuild_internal_fb_and_lut(size.width as usize, size.height as usize);

        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn tick(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let mouse_dx = self.input.take_mouse_dx();
        self.game.tick(elapsed, mouse_dx, &self.input.held);
    }

    fn draw(&mut self, id: WindowId) -> Result<(), EngineError> {
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
        if self.scale_lut.dst_size() != (dw, dh) {
            self.scale_lut = build_scale_lut(dw, dh, self.fb.width(), self.fb.height());
        }

        surface.resize(w, h)?;

        self.game.render(&mut self.fb);

        let mut buf = surface.buffer_mut()?;
        blit_bilinear_stretch(&mut buf, dw, &self.fb, &self.scale_lut);
        buf.present()?;

        self.frame_counter += 1;
        let now = Instant::now();
        let since = now.duration_since(self.last_fps_print).as_secs_f32();
        if since >= 1.0 {
            let fps = (self.frame_counter as f32 / since).round() as u32;
            debug!("FPS: {fps}");
            window.set_title(&format!("{WINDOW_TITLE} - FPS: {fps}"));
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
        Ok(())
    }

    fn rebuild_internal_fb_and_lut(&mut self, dst_w: usize, dst_h: usize) {
        // Keep internal height fixed (controls pixel size look)
        let target_h = self.config.render_height as usize;
        let aspect = if dst_h > 0 {
            dst_w as f32 / dst_h as f32
        } else {
            1.0
        };

        // Derive width from aspect, rounded to even
        let mut target_w = (target_h as f32 * aspect).round() as usize;
        if target_w < 160 {
            target_w = 160;
        }
        if target_w % 2 != 0 {
            target_w += 1;
        }

        if target_w != self.fb.width() || target_h != self.fb.height() {
            self.fb = FrameBuffer::new(target_w, target_h);
        }
        self.scale_lut = build_scale_lut(dst_w, dst_h, self.fb.width(), self.fb.height());
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_surface(event_loop) {
            self.fail(event_loop, err);
            return;
        }
        self.last_frame = Instant::now();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
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
                        ..
                    },
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                if pressed && is_quit_key(code) {
                    info!("escape pressed; stopping");
                    event_loop.exit();
                    return;
                }
                self.input.on_key(code, pressed);
            }

            WindowEvent::Focused(false) => self.input.release_all(),

            WindowEvent::RedrawRequested => {
                self.tick();
                if let Err(err) = self.draw(id) {
                    self.fail(event_loop, err);
                }
            }

            WindowEvent::Resized(new_size) => {
                self.rebuild_internal_fb_and_lut(new_size.width as usize, new_size.height as usize);
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, _) } = event {
            self.input.on_mouse_motion(dx);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };
        let next = self.last_frame + FRAME_INTERVAL;
        if Instant::now() >= next {
            window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(next));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
        self.surface = None;
        self.window = None;
    }
}

fn run(config: Config) -> Result<(), EngineError> {
    let game = GameState::from_config(&config)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, game);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
