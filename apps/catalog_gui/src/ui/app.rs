use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent, orchestration::dispatch_backend_command, FailurePolicy, HandleOutcome,
    ViewController,
};
use crate::ui::list_view::{ListView, Screen, LOADING_TEXT};

pub const WINDOW_TITLE: &str = "Product Catalog";

pub struct CatalogApp {
    controller: ViewController,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
}

impl CatalogApp {
    /// Builds the view and mounts it, queuing the initial fetch.
    pub fn new(
        policy: FailurePolicy,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let mut app = Self {
            controller: ViewController::new(policy),
            cmd_tx,
            ui_rx,
            status: String::new(),
        };
        app.mount();
        app
    }

    fn mount(&mut self) {
        let request = self.controller.mount();
        self.status = "Fetching catalog".to_string();
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchCatalog(request),
            &mut self.status,
        );
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match self.controller.handle(event) {
                HandleOutcome::Applied if self.controller.state().is_error() => {
                    self.status = "Catalog fetch failed; see logs".to_string();
                }
                HandleOutcome::Applied => {
                    self.status = format!("{} products", self.controller.state().entries().len());
                }
                HandleOutcome::LoggedOnly => {
                    self.status = "Catalog fetch failed; see logs".to_string();
                }
                HandleOutcome::Dropped => {}
            }
        }
    }

    fn show_list(ui: &mut egui::Ui, view: &ListView) {
        if view.is_empty() {
            return;
        }
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("catalog_rows")
                .striped(true)
                .num_columns(2)
                .show(ui, |ui| {
                    for row in view.rows() {
                        ui.label(row.name.as_str());
                        ui.label(egui::RichText::new(row.price.as_str()).monospace());
                        ui.end_row();
                    }
                });
        });
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Products");
            ui.separator();
            match self.controller.screen() {
                Screen::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(LOADING_TEXT);
                    });
                }
                Screen::List(view) => Self::show_list(ui, &view),
            }
        });

        if self.controller.state().is_loading() {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

impl Drop for CatalogApp {
    fn drop(&mut self) {
        if !self.controller.is_torn_down() {
            self.controller.teardown();
        }
        let _ = self.cmd_tx.try_send(BackendCommand::Shutdown);
    }
}
