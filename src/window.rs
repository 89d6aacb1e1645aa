use glium::Surface;
use glutin::{
    dpi::LogicalSize,
    event::{DeviceEvent, ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};
use std::{sync::Arc, thread::JoinHandle};

use crate::{
    camera::Direction, expect, math::Vec3, renderer::RenderContext, routa_debug, routa_trace,
    routa_warn,
};

/// Camera translation per frame while a movement key is held.
const MOVE_SPEED: f32 = 0.5;

#[derive(Default)]
struct HeldKeys {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
}

/// The presentation window. Owns the GL context, uploads resolved frames and
/// feeds input back into the render context.
pub struct Window {
    event_loop: EventLoop<()>,
    display: glium::Display,
    ctx: Arc<RenderContext>,
    workers: Vec<JoinHandle<()>>,
    resolution_scale: f32,
}

impl Window {
    /// Creates a new `Window` with a grabbed cursor. `workers` are joined
    /// when the window closes.
    pub fn new(
        title: &str,
        resolution: (u32, u32),
        ctx: Arc<RenderContext>,
        workers: Vec<JoinHandle<()>>,
    ) -> Self {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_title(title.to_owned())
            .with_inner_size(LogicalSize::new(resolution.0 as f64, resolution.1 as f64));
        // Vsync is an easy way to limit framerate to a sane range
        let context_builder = glutin::ContextBuilder::new().with_vsync(true);
        let display = expect!(
            glium::Display::new(window_builder, context_builder, &event_loop),
            "Failed to initialize glium display"
        );

        {
            let gl_window = display.gl_window();
            let window = gl_window.window();
            if let Err(why) = window.set_cursor_grab(true) {
                routa_warn!("Couldn't grab the cursor: {}", why);
            }
            window.set_cursor_visible(false);
        }

        Self {
            event_loop,
            display,
            ctx,
            workers,
            resolution_scale: 1.0,
        }
    }

    /// Runs the event loop until the window closes. Never returns.
    pub fn main_loop(self) -> ! {
        let Window {
            event_loop,
            display,
            ctx,
            mut workers,
            resolution_scale,
        } = self;

        let mut held = HeldKeys::default();

        event_loop.run(move |event, _, control_flow| {
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        routa_debug!("main_loop: CloseRequested");
                        *control_flow = ControlFlow::Exit;
                    }
                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                virtual_keycode: Some(key),
                                state,
                                ..
                            },
                        ..
                    } => {
                        let down = state == ElementState::Pressed;
                        match key {
                            VirtualKeyCode::Escape => {
                                if down {
                                    *control_flow = ControlFlow::Exit;
                                }
                            }
                            VirtualKeyCode::W => held.forward = down,
                            VirtualKeyCode::S => held.backward = down,
                            VirtualKeyCode::A => held.left = down,
                            VirtualKeyCode::D => held.right = down,
                            _ => (),
                        }
                    }
                    _ => (),
                },
                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta: (dx, dy) },
                    ..
                } => {
                    // Restarts sampling on top of turning the camera
                    ctx.rotate_camera(dx as f32, dy as f32);
                }
                Event::MainEventsCleared => {
                    if held.forward {
                        ctx.translate_camera(Direction::Forward, MOVE_SPEED);
                    }
                    if held.backward {
                        ctx.translate_camera(Direction::Backward, MOVE_SPEED);
                    }
                    if held.left {
                        ctx.translate_camera(Direction::Left, MOVE_SPEED);
                    }
                    if held.right {
                        ctx.translate_camera(Direction::Right, MOVE_SPEED);
                    }
                    display.gl_window().window().request_redraw();
                }
                Event::RedrawRequested(_) => {
                    routa_trace!("main_loop: RedrawRequested");
                    let screen: (u32, u32) = display.gl_window().window().inner_size().into();
                    if screen.0 == 0 || screen.1 == 0 {
                        // Minimized
                        return;
                    }

                    let texture = ctx.present(resolution_scale, screen, |width, height, frame| {
                        upload_frame(&display, width, height, frame)
                    });

                    let mut target = display.draw();
                    target.clear_color(1.0, 1.0, 1.0, 1.0);
                    blit_frame(&texture, &mut target);
                    expect!(target.finish(), "Failed to present frame");
                }
                Event::LoopDestroyed => {
                    routa_debug!("main_loop: LoopDestroyed");
                    ctx.shutdown();
                    for handle in workers.drain(..) {
                        expect!(handle.join(), "Render worker panicked");
                    }
                }
                _ => (),
            }
        })
    }
}

// Uploads a resolved linear RGB frame into a fresh texture.
fn upload_frame(
    display: &glium::Display,
    width: usize,
    height: usize,
    frame: &[Vec3],
) -> glium::Texture2d {
    let mut data = Vec::with_capacity(frame.len() * 3);
    for pixel in frame {
        data.extend_from_slice(&[pixel.x, pixel.y, pixel.z]);
    }
    let image = glium::texture::RawImage2d::from_raw_rgb(data, (width as u32, height as u32));
    expect!(
        glium::Texture2d::new(display, image),
        "Failed to upload frame texture"
    )
}

// Stretches the frame texture over the whole backbuffer.
fn blit_frame(texture: &glium::Texture2d, target: &mut glium::Frame) {
    let source_rect = glium::Rect {
        left: 0,
        bottom: 0,
        width: texture.width(),
        height: texture.height(),
    };
    let (width, height) = target.get_dimensions();
    let target_rect = glium::BlitTarget {
        left: 0,
        bottom: 0,
        width: width as i32,
        height: height as i32,
    };
    texture.as_surface().blit_color(
        &source_rect,
        target,
        &target_rect,
        glium::uniforms::MagnifySamplerFilter::Nearest,
    );
}
