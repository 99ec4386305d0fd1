#![allow(dead_code)]
//! GL test utilities - hidden window + current context for backend tests
//!
//! winit allows one event loop per process and a GL context is current on
//! a single thread, so every GPU check runs inside one [`with_test_device`]
//! call.

use std::rc::Rc;

use glitch_viewer_renderer_gl::glitch::GlDevice;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextAttributesBuilder, NotCurrentGlContext};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::window::Window;

#[cfg(target_os = "windows")]
use winit::platform::windows::EventLoopBuilderExtWindows;

fn create_event_loop() -> EventLoop<()> {
    let mut builder = EventLoop::builder();
    #[cfg(target_os = "windows")]
    builder.with_any_thread(true);
    #[cfg(all(unix, not(target_os = "macos")))]
    winit::platform::x11::EventLoopBuilderExtX11::with_any_thread(&mut builder, true);
    builder.build().expect("Failed to create event loop")
}

/// Run `f` with a `GlDevice` over a hidden 64x64 window
pub fn with_test_device<F: FnOnce(Rc<GlDevice>)>(f: F) {
    let event_loop = create_event_loop();
    let window_attributes = Window::default_attributes()
        .with_title("GlDevice Test")
        .with_inner_size(LogicalSize::new(64, 64))
        .with_visible(false);

    let (window, gl_config) = DisplayBuilder::new()
        .with_window_attributes(Some(window_attributes))
        .build(&event_loop, ConfigTemplateBuilder::new(), |mut configs| {
            configs.next().expect("No GL config available")
        })
        .expect("Failed to build GL display");
    let window = window.expect("Window not created");

    let raw_window_handle = window.window_handle().ok().map(|handle| handle.as_raw());
    let gl_display = gl_config.display();
    let context_attributes = ContextAttributesBuilder::new().build(raw_window_handle);
    let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
        .expect("Failed to create GL context");

    let surface_attributes = window
        .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
        .expect("Failed to build surface attributes");
    let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
        .expect("Failed to create window surface");
    let context = not_current.make_current(&surface).expect("Failed to make context current");

    let device =
        unsafe { GlDevice::from_loader_function_cstr(|name| gl_display.get_proc_address(name)) }
            .expect("GL context too old for the viewer shaders");
    f(Rc::new(device));

    // Context before surface before window
    drop(context);
    drop(surface);
    drop(window);
}
