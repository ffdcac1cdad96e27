//! BrainSlicer.
//!
//! Quad-View mit drei orthogonalen Schnittebenen und 3D-Ansicht,
//! komponiert aus einem Application-Descriptor und getrieben vom egui-Frame.

use anyhow::Context;
use brain_slicer::app::builtin::{
    apply_volume_material, brain_slicer_descriptor, builtin_registry, DEFAULT_MATERIAL,
};
use brain_slicer::app::mediators::ControlsReset;
use brain_slicer::app::{compose, Application, ApplicationDescriptor};
use brain_slicer::{ui, EngineOptions, QuadViewLayout, Shared};
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("BrainSlicer v{} startet...", env!("CARGO_PKG_VERSION"));

        let engine_options = EngineOptions::load_from_file(&EngineOptions::config_path());

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(engine_options.window_size)
                .with_title("BrainSlicer"),
            ..Default::default()
        };

        eframe::run_native(
            "BrainSlicer",
            options,
            Box::new(move |_cc| Ok(Box::new(SlicerApp::new(engine_options)?))),
        )
    }
}

/// Haupt-Anwendungsstruktur
struct SlicerApp {
    application: Application,
    layout: Shared<QuadViewLayout>,
    /// Optional: nur wenn der Descriptor einen `QuadViewControlsReset` enthält
    controls_reset: Option<Shared<ControlsReset>>,
}

impl SlicerApp {
    fn new(options: EngineOptions) -> anyhow::Result<Self> {
        let descriptor = match &options.descriptor_path {
            Some(path) => ApplicationDescriptor::load_from_file(std::path::Path::new(path))?,
            None => brain_slicer_descriptor()?,
        };
        let registry = builtin_registry(&options);
        let composition = compose(&descriptor, &registry, options.failure_policy)?;

        let layout = composition
            .views
            .values()
            .next()
            .and_then(|view| view.layout_as::<QuadViewLayout>())
            .context("Erster Canvas braucht ein XYZPerspectiveQuadView-Layout")?;

        if !apply_volume_material(
            &composition,
            DEFAULT_MATERIAL,
            options.volume_dimensions.into(),
        ) {
            log::warn!("Kein Material-Manager komponiert, Ebenen bleiben ohne Material");
        }

        let controls_reset = composition.find::<ControlsReset>();

        let mut application = composition.application;
        application.run();

        Ok(Self {
            application,
            layout,
            controls_reset,
        })
    }
}

impl eframe::App for SlicerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let pointer_events = ui::collect_pointer_events(ctx);
        let pointer_outside = ctx.input(|i| i.pointer.latest_pos().is_none());

        if ctx.input(|i| i.key_pressed(egui::Key::Home)) {
            if let Some(reset) = &self.controls_reset {
                reset.borrow().request_reset();
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, _response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

                {
                    let mut layout = self.layout.borrow_mut();
                    layout.resize(
                        glam::Vec2::new(rect.min.x, rect.min.y),
                        glam::Vec2::new(rect.width(), rect.height()),
                    );
                    if pointer_outside {
                        layout.pointer_left();
                    }
                    for event in &pointer_events {
                        layout.handle_pointer(event);
                    }
                }

                self.application.pump_frame();

                self.layout.borrow().paint(ui.painter());

                if let Some(error) = self.application.last_error() {
                    ui.painter().text(
                        rect.left_bottom() + egui::vec2(8.0, -8.0),
                        egui::Align2::LEFT_BOTTOM,
                        format!("{:#}", error),
                        egui::FontId::proportional(13.0),
                        egui::Color32::LIGHT_RED,
                    );
                }
            });

        if self.application.has_pending_frame() {
            ctx.request_repaint();
        }
    }
}

impl Drop for SlicerApp {
    fn drop(&mut self) {
        self.application.dispose();
    }
}
