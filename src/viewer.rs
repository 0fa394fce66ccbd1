use std::sync::Arc;

use glam::{DVec2, UVec2};
use tracing::{debug, error, info, warn};
use vulkano::command_buffer::allocator::StandardCommandBufferAllocator;
use vulkano::command_buffer::{AutoCommandBufferBuilder, CommandBufferUsage, PrimaryAutoCommandBuffer, RenderPassBeginInfo, SubpassBeginInfo, SubpassContents};
use vulkano::device::physical::{PhysicalDevice, PhysicalDeviceType};
use vulkano::device::{Device, DeviceCreateInfo, DeviceExtensions, Queue, QueueCreateInfo, QueueFlags};
use vulkano::instance::{Instance, InstanceCreateInfo};
use vulkano::memory::allocator::StandardMemoryAllocator;
use vulkano::pipeline::graphics::viewport::Viewport;
use vulkano::render_pass::Framebuffer;
use vulkano::swapchain::{self, Surface, SwapchainPresentInfo};
use vulkano::sync::future::FenceSignalFuture;
use vulkano::sync::GpuFuture;
use vulkano::{Validated, VulkanError};
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, MouseScrollDelta, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;

use vecplane::{App, InputEvent, Key, PointerButton, SceneDescriptor};

use crate::line_renderer::LineRenderer;
use crate::window_surface::{build_window, WindowSurface};

const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Owns the GPU, the window and the [`App`] and pumps winit events into it.
pub struct Viewer {
    device : Arc<Device>,
    queue : Arc<Queue>,
    event_loop : EventLoop<()>,
    window_surface : WindowSurface,
    lines : LineRenderer,
    app : App,
}

fn select_physical_device(
    instance: &Arc<Instance>,
    surface: &Arc<Surface>,
    device_extensions: &DeviceExtensions,
) -> (Arc<PhysicalDevice>, u32) {
    instance
        .enumerate_physical_devices()
        .expect("failed to enumerate physical devices")
        .filter(|p| p.supported_extensions().contains(device_extensions))
        .filter_map(|p| {
            p.queue_family_properties()
                .iter()
                .enumerate()
                .position(|(i, q)| {
                    q.queue_flags.contains(QueueFlags::GRAPHICS)
                        && p.surface_support(i as u32, surface).unwrap_or(false)
                })
                .map(|q| (p, q as u32))
        })
        .min_by_key(|(p, _)| match p.properties().device_type {
            PhysicalDeviceType::DiscreteGpu => 0,
            PhysicalDeviceType::IntegratedGpu => 1,
            PhysicalDeviceType::VirtualGpu => 2,
            PhysicalDeviceType::Cpu => 3,
            _ => 4,
        })
        .expect("no device available")
}

impl Viewer {
    pub fn new(app : App) -> Self {
        let library = vulkano::VulkanLibrary::new().expect("no local vulkan library/DLL");
        let event_loop = EventLoop::new();

        let required_extensions = Surface::required_extensions(&event_loop);
        let instance = Instance::new(
            library,
            InstanceCreateInfo {
                enabled_extensions: required_extensions,
                ..Default::default()
            }
        ).expect("failed to create instance");

        let window = build_window(&event_loop, app.plane().window_size());
        let surface = Surface::from_window(instance.clone(), window.clone()).expect("failed to create surface");

        let device_extensions = DeviceExtensions {
            khr_swapchain: true,
            ..DeviceExtensions::empty()
        };

        let (physical_device, queue_family_index) = select_physical_device(&instance, &surface, &device_extensions);
        info!(device = %physical_device.properties().device_name, "using physical device");

        let (device, mut queues) = Device::new(
            physical_device,
            DeviceCreateInfo {
                queue_create_infos: vec![QueueCreateInfo {
                    queue_family_index,
                    ..Default::default()
                }],
                enabled_extensions: device_extensions,
                ..Default::default()
            }
        ).expect("failed to create device");

        let queue = queues.next().expect("device has no queue");

        let memory_allocator = Arc::new(StandardMemoryAllocator::new_default(device.clone()));
        let window_surface = WindowSurface::new(surface, device.clone(), window);
        let lines = LineRenderer::new(device.clone(), memory_allocator);

        Self {
            device,
            queue,
            event_loop,
            window_surface,
            lines,
            app,
        }
    }

    pub fn run(&mut self) {
        let Viewer { device, queue, event_loop, window_surface, lines, app } = self;

        let window_size = app.plane().window_size();
        let mut viewport = Viewport {
            offset: [0., 0.],
            extent: window_surface.inner_size().into(),
            depth_range: 0.0..=1.0,
        };

        let command_buffer_allocator = StandardCommandBufferAllocator::new(device.clone(), Default::default());

        lines.build_pipeline(window_surface.render_pass.clone(), viewport.clone());
        show_scene(&app.scene(), lines, window_surface, window_size);
        let mut command_buffers = get_command_buffers(&command_buffer_allocator, queue, &window_surface.framebuffers, lines);

        let mut cursor = DVec2::ZERO;
        let mut window_resized = false;
        let mut recreate_swapchain = false;
        let mut scene_changed = false;

        let frames_in_flight = window_surface.images.len();
        let mut fences: Vec<Option<Arc<FenceSignalFuture<_>>>> = vec![None; frames_in_flight];
        let mut previous_fence_i = 0;

        event_loop.run_return(|event, _, control_flow| {
            control_flow.set_wait();

            match event {
                Event::WindowEvent { event: WindowEvent::CloseRequested, .. } => {
                    *control_flow = ControlFlow::Exit;
                }
                Event::WindowEvent { event: WindowEvent::Resized(_), .. } => {
                    window_resized = true;
                }
                Event::WindowEvent { event: WindowEvent::CursorMoved { position, .. }, .. } => {
                    cursor = cursor_position(position, window_size.y);
                }
                Event::WindowEvent { event, .. } => {
                    if let Some(input) = translate(&event, cursor) {
                        debug!(?input, "input event");
                        scene_changed |= app.handle(input);
                    }
                }
                Event::MainEventsCleared => {
                    if window_resized || recreate_swapchain {
                        recreate_swapchain = false;

                        if let Err(e) = window_surface.recreate_swapchain() {
                            warn!("failed to recreate swapchain: {e}");
                            return;
                        }
                        if window_resized {
                            window_resized = false;
                            viewport.extent = window_surface.inner_size().into();
                            lines.build_pipeline(window_surface.render_pass.clone(), viewport.clone());
                        }
                        command_buffers = get_command_buffers(&command_buffer_allocator, queue, &window_surface.framebuffers, lines);
                    }

                    if scene_changed {
                        scene_changed = false;
                        show_scene(&app.scene(), lines, window_surface, window_size);
                        command_buffers = get_command_buffers(&command_buffer_allocator, queue, &window_surface.framebuffers, lines);
                    }

                    let (image_i, suboptimal, acquire_future) =
                        match swapchain::acquire_next_image(window_surface.swapchain.clone(), None).map_err(Validated::unwrap) {
                            Ok(r) => r,
                            Err(VulkanError::OutOfDate) => {
                                recreate_swapchain = true;
                                return;
                            }
                            Err(e) => {
                                error!("failed to acquire next image: {e}");
                                return;
                            }
                        };

                    if suboptimal {
                        recreate_swapchain = true;
                    }

                    if let Some(image_fence) = &fences[image_i as usize] {
                        if let Err(e) = image_fence.wait(None) {
                            warn!("failed to wait for frame fence: {e}");
                        }
                    }

                    let previous_future = match fences[previous_fence_i as usize].clone() {
                        None => {
                            let mut now = vulkano::sync::now(device.clone());
                            now.cleanup_finished();

                            now.boxed()
                        }
                        Some(fence) => fence.boxed(),
                    };

                    let future = previous_future
                        .join(acquire_future)
                        .then_execute(queue.clone(), command_buffers[image_i as usize].clone());

                    let future = match future {
                        Ok(future) => future,
                        Err(e) => {
                            error!("failed to execute command buffer: {e}");
                            return;
                        }
                    };

                    let future = future
                        .then_swapchain_present(
                            queue.clone(),
                            SwapchainPresentInfo::swapchain_image_index(window_surface.swapchain.clone(), image_i),
                        )
                        .then_signal_fence_and_flush();

                    fences[image_i as usize] = match future.map_err(Validated::unwrap) {
                        Ok(value) => Some(Arc::new(value)),
                        Err(VulkanError::OutOfDate) => {
                            recreate_swapchain = true;
                            None
                        }
                        Err(e) => {
                            warn!("failed to flush future: {e}");
                            None
                        }
                    };

                    previous_fence_i = image_i;
                }
                _ => (),
            }
        });
    }
}

/// Uploads the scene's lines and publishes its labels. Only lines are
/// rasterized; the newest label goes in the window title.
fn show_scene(scene : &SceneDescriptor, lines : &mut LineRenderer, window_surface : &WindowSurface, window_size : UVec2) {
    lines.upload(scene, window_size);

    for label in scene.labels() {
        debug!(text = %label.text, x = label.position.x, y = label.position.y, "label");
    }
    window_surface.set_title(scene.labels().last().map(|label| label.text.as_str()));
}

fn get_command_buffers(
    command_buffer_allocator: &StandardCommandBufferAllocator,
    queue: &Arc<Queue>,
    framebuffers: &[Arc<Framebuffer>],
    lines : &LineRenderer,
) -> Vec<Arc<PrimaryAutoCommandBuffer>> {
    framebuffers
        .iter()
        .map(|framebuffer| {
            let mut builder = AutoCommandBufferBuilder::primary(
                command_buffer_allocator,
                queue.queue_family_index(),
                CommandBufferUsage::MultipleSubmit,
            )
            .expect("failed to create command buffer builder");

            builder
                .begin_render_pass(
                    RenderPassBeginInfo {
                        clear_values: vec![Some(CLEAR_COLOR.into())],
                        ..RenderPassBeginInfo::framebuffer(framebuffer.clone())
                    },
                    SubpassBeginInfo {
                        contents: SubpassContents::Inline,
                        ..Default::default()
                    },
                )
                .expect("failed to begin render pass");

            lines.draw(&mut builder);

            builder.end_render_pass(Default::default())
                .expect("failed to end render pass");

            builder.build().expect("failed to build command buffer")
        })
        .collect()
}

/// Maps a winit window event onto the plane's input vocabulary. `cursor` is
/// the last known pointer position, winit does not repeat it on clicks.
pub fn translate(event : &WindowEvent, cursor : DVec2) -> Option<InputEvent> {
    match event {
        WindowEvent::MouseInput { state, button, .. } => {
            let button = pointer_button(*button);
            Some(match state {
                ElementState::Pressed => InputEvent::PointerDown { position: cursor, button },
                ElementState::Released => InputEvent::PointerUp { position: cursor, button },
            })
        }
        WindowEvent::KeyboardInput {
            input: KeyboardInput {
                state: ElementState::Released,
                virtual_keycode: Some(code),
                ..
            },
            ..
        } => Some(InputEvent::KeyUp(key(*code))),
        WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Scroll { delta_y: scroll_delta(*delta) }),
        _ => None,
    }
}

/// winit reports y growing downward from the top edge; the plane reads
/// pixels from the bottom-left corner.
pub fn cursor_position(position : PhysicalPosition<f64>, window_height : u32) -> DVec2 {
    DVec2::new(position.x, window_height as f64 - position.y)
}

pub fn pointer_button(button : MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        _ => PointerButton::Other,
    }
}

pub fn key(code : VirtualKeyCode) -> Key {
    match code {
        VirtualKeyCode::A => Key::Character('a'),
        VirtualKeyCode::S => Key::Character('s'),
        VirtualKeyCode::M => Key::Character('m'),
        _ => Key::Other,
    }
}

pub fn scroll_delta(delta : MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64,
        MouseScrollDelta::PixelDelta(position) => position.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vecplane::{CoordinateSpace, PlaneConfig};

    #[test]
    fn buttons_map_to_pointer_roles() {
        assert_eq!(pointer_button(MouseButton::Left), PointerButton::Primary);
        assert_eq!(pointer_button(MouseButton::Right), PointerButton::Secondary);
        assert_eq!(pointer_button(MouseButton::Middle), PointerButton::Other);
    }

    #[test]
    fn combine_keys_are_recognised() {
        assert_eq!(key(VirtualKeyCode::A), Key::Character('a'));
        assert_eq!(key(VirtualKeyCode::S), Key::Character('s'));
        assert_eq!(key(VirtualKeyCode::M), Key::Character('m'));
        assert_eq!(key(VirtualKeyCode::Escape), Key::Other);
    }

    #[test]
    fn scroll_uses_the_vertical_component() {
        assert_eq!(scroll_delta(MouseScrollDelta::LineDelta(3.0, -1.0)), -1.0);
        assert_eq!(scroll_delta(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 12.5))), 12.5);
    }

    #[test]
    fn cursor_is_read_from_the_bottom_left() {
        let size = UVec2::new(720, 720);
        assert_eq!(cursor_position(PhysicalPosition::new(10.0, 0.0), size.y), DVec2::new(10.0, 720.0));
        assert_eq!(cursor_position(PhysicalPosition::new(10.0, 720.0), size.y), DVec2::new(10.0, 0.0));

        // a click above the centre lands on positive plane y
        let plane = CoordinateSpace::new(DVec2::ONE, size, 16).unwrap();
        let above = plane.to_plane(cursor_position(PhysicalPosition::new(360.0, 120.0), size.y));
        assert!((above - DVec2::new(0.0, 2.0 / 3.0)).abs().max_element() < 1e-12);
    }

    #[test]
    #[allow(deprecated)]
    fn clicks_carry_the_tracked_cursor() {
        let mut app = App::new(&PlaneConfig::default()).unwrap();
        let cursor = cursor_position(PhysicalPosition::new(360.0, 120.0), 720);
        let released = translate(
            &WindowEvent::MouseInput {
                device_id: unsafe { winit::event::DeviceId::dummy() },
                state: ElementState::Released,
                button: MouseButton::Left,
                modifiers: Default::default(),
            },
            cursor,
        );
        assert_eq!(released, Some(InputEvent::PointerUp { position: DVec2::new(360.0, 600.0), button: PointerButton::Primary }));
        assert!(app.handle(released.unwrap()));
        assert!(app.plane().vectors()[0].endpoint().y > 0.0);
    }

    #[test]
    fn unrelated_events_are_dropped() {
        assert_eq!(translate(&WindowEvent::Focused(true), DVec2::ZERO), None);
    }
}
