//! The interactive globe viewer window

use crate::camera::OrbitCamera;
use crate::overlay;
use crate::picking;
use instant::Instant;
use std::path::PathBuf;
use std::sync::Arc;
use terraglobe_core::{Error, GlobeScene, Result, SceneConfig};
use terraglobe_render::{GlobeAssets, GlobeRenderer, OverlayFrame, RenderConfig};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::Key,
    window::WindowBuilder,
};

/// Pixels of accumulated drag below which a press/release pair counts as
/// a click
const CLICK_DRAG_TOLERANCE: f64 = 5.0;

/// Radians of orbit per pixel of drag
const ORBIT_SENSITIVITY: f32 = 0.005;

/// Viewer configuration
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    /// Equirectangular day texture; solid ocean blue when absent
    pub day_map: Option<PathBuf>,
    /// Equirectangular cloud texture; the cloud layer is skipped when absent
    pub cloud_map: Option<PathBuf>,
    pub scene: SceneConfig,
    pub render: RenderConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "terraglobe".to_string(),
            width: 1200.0,
            height: 800.0,
            day_map: None,
            cloud_map: None,
            scene: SceneConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

/// Interactive globe viewer.
///
/// Owns the scene and camera; the window, GPU renderer and egui state are
/// created when [`GlobeViewer::run`] takes over the thread.
pub struct GlobeViewer {
    config: ViewerConfig,
    scene: GlobeScene,
    camera: OrbitCamera,
    cursor_pos: Option<PhysicalPosition<f64>>,
    mouse_pressed: bool,
    drag_distance: f64,
}

impl GlobeViewer {
    pub fn new(config: ViewerConfig) -> Result<Self> {
        let scene = GlobeScene::new(config.scene.clone());
        Ok(Self {
            config,
            scene,
            camera: OrbitCamera::default(),
            cursor_pos: None,
            mouse_pressed: false,
            drag_distance: 0.0,
        })
    }

    /// Run the viewer until the window is closed
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()
            .map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&self.config.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.width,
                    self.config.height,
                ))
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
        );

        let assets = GlobeAssets::load(
            self.config.day_map.as_deref(),
            self.config.cloud_map.as_deref(),
        )?;
        let mut renderer = pollster::block_on(GlobeRenderer::new(
            window.clone(),
            assets,
            &self.config.scene,
            self.config.render.clone(),
        ))?;

        let size = window.inner_size();
        self.camera.aspect_ratio = size.width as f32 / size.height.max(1) as f32;

        let egui_ctx = egui::Context::default();
        let mut egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
        );

        let start = Instant::now();

        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Poll);

                match event {
                    Event::AboutToWait => window.request_redraw(),
                    Event::WindowEvent { event, .. } => {
                        let response = egui_state.on_window_event(&window, &event);

                        match event {
                            WindowEvent::CloseRequested => {
                                target.exit();
                            }
                            WindowEvent::Resized(new_size) => {
                                renderer.resize(new_size);
                                self.camera.aspect_ratio =
                                    new_size.width as f32 / new_size.height.max(1) as f32;
                            }
                            WindowEvent::RedrawRequested => {
                                // Per-frame update: rotation from the clock,
                                // camera easing, then the frame itself.
                                let elapsed = start.elapsed().as_secs_f32();
                                self.scene.update(elapsed);
                                self.camera.step();

                                let eye = self.camera.eye();
                                renderer.update_camera(
                                    self.camera.view_matrix(),
                                    self.camera.projection_matrix(),
                                    eye.coords,
                                );

                                let size = window.inner_size();
                                let raw_input = egui_state.take_egui_input(&window);
                                let full_output = egui_ctx.run(raw_input, |ctx| {
                                    overlay::draw_labels(
                                        ctx,
                                        &self.scene,
                                        &self.camera,
                                        (size.width, size.height),
                                        ctx.pixels_per_point(),
                                    );
                                });
                                egui_state
                                    .handle_platform_output(&window, full_output.platform_output);
                                let primitives = egui_ctx
                                    .tessellate(full_output.shapes, full_output.pixels_per_point);
                                let overlay_frame = OverlayFrame {
                                    textures_delta: full_output.textures_delta,
                                    primitives,
                                    pixels_per_point: full_output.pixels_per_point,
                                };

                                if let Err(e) =
                                    renderer.render(&self.scene, eye, Some(overlay_frame))
                                {
                                    eprintln!("Render error: {}", e);
                                }
                            }
                            _ if response.consumed => {}
                            WindowEvent::MouseInput {
                                state,
                                button: MouseButton::Left,
                                ..
                            } => match state {
                                ElementState::Pressed => {
                                    self.mouse_pressed = true;
                                    self.drag_distance = 0.0;
                                }
                                ElementState::Released => {
                                    self.mouse_pressed = false;
                                    if self.drag_distance < CLICK_DRAG_TOLERANCE {
                                        if let Some(cursor) = self.cursor_pos {
                                            let size = window.inner_size();
                                            let ray = picking::screen_ray(
                                                &self.camera,
                                                (cursor.x as f32, cursor.y as f32),
                                                (size.width, size.height),
                                            );
                                            if let Some(index) =
                                                picking::pick_pin(&self.scene, &ray)
                                            {
                                                if let Err(e) = self.scene.toggle_pin(index) {
                                                    eprintln!("Pick error: {}", e);
                                                }
                                            }
                                        }
                                    }
                                }
                            },
                            WindowEvent::CursorMoved { position, .. } => {
                                if let (true, Some(last)) = (self.mouse_pressed, self.cursor_pos) {
                                    let dx = (position.x - last.x) as f32;
                                    let dy = (position.y - last.y) as f32;
                                    self.drag_distance += (dx.abs() + dy.abs()) as f64;
                                    self.camera.orbit(
                                        dx * ORBIT_SENSITIVITY,
                                        dy * ORBIT_SENSITIVITY,
                                    );
                                }
                                self.cursor_pos = Some(position);
                            }
                            WindowEvent::MouseWheel { delta, .. } => {
                                let scroll = match delta {
                                    MouseScrollDelta::LineDelta(_, y) => y,
                                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                                };
                                self.camera.zoom(scroll * 0.1);
                            }
                            WindowEvent::KeyboardInput { event, .. } => {
                                if event.state == ElementState::Pressed {
                                    if let Key::Character(c) = &event.logical_key {
                                        if matches!(c.as_str(), "r" | "R") {
                                            self.camera.reset();
                                        }
                                    }
                                }
                            }
                            _ => {}
                        }
                    }
                    _ => {}
                }
            })
            .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))?;

        Ok(())
    }

    pub fn scene(&self) -> &GlobeScene {
        &self.scene
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_starts_with_the_configured_scene() {
        let viewer = GlobeViewer::new(ViewerConfig::default()).unwrap();
        assert_eq!(viewer.scene().pins().len(), 4);
        assert!(viewer.scene().pins().iter().all(|p| !p.is_visible()));
    }

    #[test]
    fn test_default_config_matches_the_original_viewport() {
        let config = ViewerConfig::default();
        assert_eq!(config.width, 1200.0);
        assert_eq!(config.height, 800.0);
        assert!(config.day_map.is_none());
        assert!(config.cloud_map.is_none());
    }
}
