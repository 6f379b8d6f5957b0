//! Main application module

mod keyboard;
pub mod styles;

use eframe::egui;

use crate::i18n;
use crate::presentation::ShellView;
use crate::state::{AppSettings, AppState};
use crate::ui::{header, legend, modal};
use crate::viewport::ViewportPanel;

/// Main application
pub struct PrismApp {
    state: AppState,
    viewport: ViewportPanel,
}

impl PrismApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        let state = AppState::new(settings);

        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let mut viewport = ViewportPanel::new(&cc.egui_ctx);

        // Initialize GL renderer if glow context is available
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl);
        }

        tracing::info!(
            "Diagram ready: {} blocks, {:?} prism",
            state.config.block_count(),
            state.config.shape
        );

        Self { state, viewport }
    }
}

impl eframe::App for PrismApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        keyboard::handle_keyboard(ctx, &mut self.state);

        let view = ShellView::build(&self.state, i18n::lang());

        // ── Header ────────────────────────────────────────────
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 10)))
            .show(ctx, |ui| {
                header::show(ui, &view, &mut self.state.show_legend);
            });

        // ── Legend ────────────────────────────────────────────
        if self.state.show_legend {
            egui::SidePanel::right("legend")
                .resizable(false)
                .default_width(200.0)
                .show(ctx, |ui| {
                    legend::show(ui, &view.legend);
                });
        }

        // ── Viewport ──────────────────────────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });

        // ── Sector modal ──────────────────────────────────────
        if let Some(modal_view) = &view.modal {
            if let Some(click) = modal::show(ctx, modal_view) {
                self.state.selection.handle_modal_click(click);
            }
        }
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        let mounted = self.viewport.is_mounted();
        self.viewport.dispose(gl);
        tracing::info!("Shutting down (scene was mounted: {mounted})");
    }
}
