use std::sync::Arc;

use glam::UVec2;
use vulkano::{device::Device, image::{view::ImageView, Image, ImageUsage}, render_pass::{Framebuffer, FramebufferCreateInfo, RenderPass}, swapchain::{Surface, Swapchain, SwapchainCreateInfo}, Validated, VulkanError};
use winit::{dpi::PhysicalSize, event_loop::EventLoop, window::{Window, WindowBuilder}};

pub const TITLE: &str = "vecplane";

pub struct WindowSurface {
    pub surface : Arc<Surface>,
    pub window: Arc<Window>,
    pub swapchain : Arc<Swapchain>,
    pub images : Vec<Arc<Image>>,
    pub render_pass : Arc<RenderPass>,
    pub framebuffers: Vec<Arc<Framebuffer>>,
}

/// Fixed size window the plane is drawn into.
pub fn build_window(event_loop : &EventLoop<()>, size : UVec2) -> Arc<Window> {
    Arc::new(
        WindowBuilder::new()
            .with_title(TITLE)
            .with_inner_size(PhysicalSize::new(size.x, size.y))
            .with_resizable(false)
            .build(event_loop)
            .expect("failed to create window"),
    )
}

impl WindowSurface {
    pub fn new(surface : Arc<Surface>, device : Arc<Device>, window : Arc<Window>) -> Self {
        let (swapchain, images) = {
            let caps = device
                .physical_device()
                .surface_capabilities(&surface, Default::default())
                .expect("failed to get surface capabilities");

            let dimension = window.inner_size();
            let composite_alpha = caps
                .supported_composite_alpha
                .into_iter()
                .next()
                .expect("surface supports no composite alpha mode");
            let image_format = device
                .physical_device()
                .surface_formats(&surface, Default::default())
                .expect("failed to get surface formats")[0]
                .0;

            Swapchain::new(
                device.clone(),
                surface.clone(),
                SwapchainCreateInfo {
                    min_image_count: caps.min_image_count,
                    image_format,
                    image_extent: dimension.into(),
                    image_usage: ImageUsage::COLOR_ATTACHMENT,
                    composite_alpha,
                    ..Default::default()
                },
            )
            .expect("failed to create swapchain")
        };

        let render_pass = get_render_pass(device, swapchain.clone());
        let framebuffers = get_framebuffers(&images, render_pass.clone());

        Self {
            surface,
            window,
            swapchain,
            images,
            render_pass,
            framebuffers
        }
    }

    pub fn inner_size(&self) -> PhysicalSize<u32> { self.window.inner_size() }

    pub fn set_title(&self, detail : Option<&str>) {
        match detail {
            Some(detail) => self.window.set_title(&format!("{TITLE} - {detail}")),
            None => self.window.set_title(TITLE),
        }
    }

    pub fn recreate_swapchain(&mut self) -> Result<(), Validated<VulkanError>> {
        let new_dimensions = self.inner_size();

        let (swapchain, images) = self.swapchain.recreate(SwapchainCreateInfo {
            image_extent: new_dimensions.into(),
            ..self.swapchain.create_info()
        })?;

        self.framebuffers = get_framebuffers(&images, self.render_pass.clone());
        self.swapchain = swapchain;
        self.images = images;
        Ok(())
    }
}

fn get_render_pass(device: Arc<Device>, swapchain: Arc<Swapchain>) -> Arc<RenderPass> {
    vulkano::single_pass_renderpass!(
        device,
        attachments: {
            color: {
                format: swapchain.image_format(), // set the format the same as the swapchain
                samples: 1,
                load_op: Clear,
                store_op: Store,
            },
        },
        pass: {
            color: [color],
            depth_stencil: {},
        },
    )
    .expect("failed to create render pass")
}

fn get_framebuffers(images: &[Arc<Image>], render_pass: Arc<RenderPass>) -> Vec<Arc<Framebuffer>> {
    images
        .iter()
        .map(|image| {
            let view = ImageView::new_default(image.clone()).expect("failed to create image view");
            Framebuffer::new(
                render_pass.clone(),
                FramebufferCreateInfo {
                    attachments: vec![view],
                    ..Default::default()
                },
            )
            .expect("failed to create framebuffer")
        })
        .collect::<Vec<_>>()
}
