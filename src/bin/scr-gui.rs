/*!
 * GUI application for scr-rs - country research-ranking explorer
 *
 * A cross-platform desktop application showing:
 * - A top-N ranking table driven by size/year/region/FLOP controls
 * - A log-log documents/citations scatter of the latest year
 * - CSV/JSON/chart export of the current view
 *
 * Platform support: Windows, macOS, Linux
 */

use eframe::egui;
use scr_rs::feed::FeedError;
use scr_rs::models::{REGION_WILDCARD, SIZE_CHOICES};
use scr_rs::scatter::{self, scale};
use scr_rs::{Client, Record, Selection, filter, storage, table};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

fn main() -> Result<(), eframe::Error> {
    // Enable logging for better debugging
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 900.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Country Research Rankings - scr-rs"),
        ..Default::default()
    };

    eframe::run_native(
        "Country Research Rankings",
        options,
        Box::new(|_cc| Ok(Box::new(ScrApp::new()))),
    )
}

/// Main application state
struct ScrApp {
    // Dataset, loaded once per session
    records: Vec<Record>,
    years: Vec<i32>,
    /// Wildcard placeholder first, then regions in first-occurrence order.
    regions: Vec<String>,
    /// Latest-year scatter, computed once at load; never filter-reactive.
    scene: Option<scatter::Scene>,

    // Control state, read fresh on every frame
    size: u32,
    year: Option<i32>,
    region: Option<String>,
    flop: bool,

    // Export options
    export_dir: String,

    // UI state
    is_loading: bool,
    status_message: String,
    error_message: String,

    // Background fetch
    load_receiver: Option<mpsc::Receiver<Result<Vec<Record>, FeedError>>>,
}

#[derive(Debug, Clone, PartialEq)]
enum ExportFormat {
    Csv,
    Json,
}

impl ScrApp {
    fn new() -> Self {
        // The fetch is the only asynchronous operation; everything else waits
        // for it.
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let client = Client::default();
            let _ = sender.send(client.fetch());
        });

        // Default to user's home directory for output
        let home_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .to_string_lossy()
            .to_string();

        Self {
            records: Vec::new(),
            years: Vec::new(),
            regions: Vec::new(),
            scene: None,

            size: SIZE_CHOICES[0],
            year: None,
            region: None,
            flop: false,

            export_dir: home_dir,

            is_loading: true,
            status_message: String::new(),
            error_message: String::new(),

            load_receiver: Some(receiver),
        }
    }

    fn current_selection(&self) -> Selection {
        Selection {
            size: self.size,
            year: self.year,
            region: self.region.clone(),
            flop: self.flop,
        }
    }

    fn check_load_result(&mut self) {
        if let Some(receiver) = &self.load_receiver
            && let Ok(result) = receiver.try_recv()
        {
            self.is_loading = false;
            self.load_receiver = None;

            match result {
                Ok(records) => {
                    self.years = filter::distinct_years(&records);
                    self.regions = filter::distinct_regions(&records);
                    self.scene = scatter::Scene::build(&records).ok();
                    self.records = records;
                }
                Err(err) => {
                    self.error_message = format!("Failed to fetch data: {err}");
                }
            }
        }
    }

    fn export_rows(&mut self, format: ExportFormat) {
        let matched = filter::filter(&self.records, &self.current_selection());
        let owned: Vec<Record> = matched.into_iter().cloned().collect();
        let dir = PathBuf::from(&self.export_dir);
        let result = match format {
            ExportFormat::Csv => {
                let path = dir.join("scr_top.csv");
                storage::save_csv(&owned, &path).map(|_| path)
            }
            ExportFormat::Json => {
                let path = dir.join("scr_top.json");
                storage::save_json(&owned, &path).map(|_| path)
            }
        };
        match result {
            Ok(path) => {
                self.status_message = format!("Saved {} rows to {}", owned.len(), path.display());
                self.error_message.clear();
            }
            Err(err) => {
                self.error_message = format!("Failed to save: {err}");
                self.status_message.clear();
            }
        }
    }

    fn export_chart(&mut self) {
        let path = PathBuf::from(&self.export_dir).join("scr_chart.svg");
        match scatter::plot_scatter(&self.records, &path, 1000, 600) {
            Ok(()) => {
                self.status_message = format!("Wrote chart to {}", path.display());
                self.error_message.clear();
            }
            Err(err) => {
                self.error_message = format!("Failed to create chart: {err}");
                self.status_message.clear();
            }
        }
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label("Choisir une taille");
            ui.horizontal(|ui| {
                for &s in &SIZE_CHOICES {
                    ui.radio_value(&mut self.size, s, s.to_string());
                }
            });

            ui.horizontal(|ui| {
                ui.label("Choisir une année");
                egui::ComboBox::from_id_salt("year_choice")
                    .selected_text(self.year.map_or_else(String::new, |y| y.to_string()))
                    .show_ui(ui, |ui| {
                        for &y in &self.years {
                            ui.selectable_value(&mut self.year, Some(y), y.to_string());
                        }
                    });
            });

            ui.checkbox(&mut self.flop, "FLOP");

            ui.horizontal(|ui| {
                ui.label("Choisir une région");
                egui::ComboBox::from_id_salt("region_choice")
                    .selected_text(
                        self.region
                            .clone()
                            .unwrap_or_else(|| REGION_WILDCARD.to_string()),
                    )
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.region, None, REGION_WILDCARD);
                        for r in self.regions.iter().skip(1) {
                            ui.selectable_value(&mut self.region, Some(r.clone()), r.as_str());
                        }
                    });
            });
        });
    }

    fn table_ui(&self, ui: &mut egui::Ui) {
        let matched = filter::filter(&self.records, &self.current_selection());
        let rows = table::layout(&matched, self.size);

        egui::Grid::new("table_top")
            .striped(true)
            .min_col_width(72.0)
            .show(ui, |ui| {
                for h in table::HEADERS {
                    ui.strong(h);
                }
                ui.end_row();
                for row in rows.iter().filter(|r| r.visible) {
                    for cell in &row.cells {
                        if cell.numeric {
                            ui.monospace(&cell.text);
                        } else {
                            ui.label(&cell.text);
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn export_ui(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label("Export");
            ui.horizontal(|ui| {
                ui.label("Output path:");
                ui.text_edit_singleline(&mut self.export_dir);
                if ui.button("Browse").clicked()
                    && let Some(path) = rfd::FileDialog::new().pick_folder()
                {
                    self.export_dir = path.to_string_lossy().to_string();
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Exporter CSV").clicked() {
                    self.export_rows(ExportFormat::Csv);
                }
                if ui.button("Exporter JSON").clicked() {
                    self.export_rows(ExportFormat::Json);
                }
                if ui.button("Exporter le graphique").clicked() {
                    self.export_chart();
                }
            });
        });
    }
}

impl eframe::App for ScrApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for the completed background fetch
        self.check_load_result();

        // Request repaint if loading (for spinner animation)
        if self.is_loading {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("TOP de l'année choisie");
                ui.add_space(10.0);

                if self.is_loading {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Chargement des données…");
                    });
                    return;
                }

                // A failed fetch leaves nothing meaningful to render.
                if self.records.is_empty() {
                    if !self.error_message.is_empty() {
                        ui.colored_label(egui::Color32::RED, &self.error_message);
                    } else {
                        ui.label("Aucune donnée");
                    }
                    return;
                }

                self.controls_ui(ui);
                ui.add_space(10.0);
                self.table_ui(ui);
                ui.add_space(10.0);

                match &self.scene {
                    Some(scene) => scatter_ui(ui, scene),
                    None => {
                        ui.label("Aucune donnée pour la dernière année");
                    }
                }

                ui.add_space(10.0);
                self.export_ui(ui);

                if !self.status_message.is_empty() {
                    ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
                }
                if !self.error_message.is_empty() {
                    ui.colored_label(egui::Color32::RED, &self.error_message);
                }
            });
        });
    }
}

/// Paint the scatter scene and drive its hover tooltip.
fn scatter_ui(ui: &mut egui::Ui, scene: &scatter::Scene) {
    let desired = egui::vec2(ui.available_width().max(320.0), 420.0);
    let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);

    // Gutters for tick labels and axis titles.
    let plot = egui::Rect::from_min_max(
        egui::pos2(rect.left() + 60.0, rect.top() + 18.0),
        egui::pos2(rect.right() - 18.0, rect.bottom() - 36.0),
    );

    let to_screen = |x: f64, y: f64| {
        egui::pos2(
            plot.left() + x as f32 * plot.width(),
            plot.bottom() - y as f32 * plot.height(),
        )
    };

    let axis_stroke = egui::Stroke::new(1.0, ui.visuals().weak_text_color());
    let text_color = ui.visuals().text_color();
    let font = egui::FontId::proportional(11.0);

    painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis_stroke);
    painter.line_segment([plot.left_top(), plot.left_bottom()], axis_stroke);

    for &(t, v) in &scene.x_ticks {
        let p = to_screen(t, 0.0);
        painter.line_segment([p, p + egui::vec2(0.0, 4.0)], axis_stroke);
        painter.text(
            p + egui::vec2(0.0, 6.0),
            egui::Align2::CENTER_TOP,
            scale::format_count(v),
            font.clone(),
            text_color,
        );
    }
    for &(t, v) in &scene.y_ticks {
        let p = to_screen(0.0, t);
        painter.line_segment([p, p + egui::vec2(-4.0, 0.0)], axis_stroke);
        painter.text(
            p + egui::vec2(-6.0, 0.0),
            egui::Align2::RIGHT_CENTER,
            scale::format_count(v),
            font.clone(),
            text_color,
        );
    }
    painter.text(
        egui::pos2(plot.center().x, rect.bottom() - 4.0),
        egui::Align2::CENTER_BOTTOM,
        format!("Documents ({})", scene.year),
        font.clone(),
        text_color,
    );
    painter.text(
        plot.left_top() + egui::vec2(4.0, 2.0),
        egui::Align2::LEFT_TOP,
        "Citations",
        font.clone(),
        text_color,
    );

    // Dashed reference lines at the latest-year averages.
    let dash_stroke = egui::Stroke::new(1.0, egui::Color32::GRAY);
    painter.extend(egui::Shape::dashed_line(
        &[to_screen(scene.avg_x, 0.0), to_screen(scene.avg_x, 1.0)],
        dash_stroke,
        3.0,
        3.0,
    ));
    painter.extend(egui::Shape::dashed_line(
        &[to_screen(0.0, scene.avg_y), to_screen(1.0, scene.avg_y)],
        dash_stroke,
        3.0,
        3.0,
    ));

    for p in &scene.points {
        let center = to_screen(p.x, p.y);
        let color = egui::Color32::from_rgba_unmultiplied(p.color.0, p.color.1, p.color.2, 178);
        painter.circle_filled(center, p.radius as f32, color);
    }

    // One tooltip surface for all points; topmost drawn point wins.
    if let Some(pos) = response.hover_pos()
        && let Some(p) = scene
            .points
            .iter()
            .rev()
            .find(|p| to_screen(p.x, p.y).distance(pos) <= p.radius as f32)
    {
        response
            .clone()
            .on_hover_text_at_pointer(p.country.clone());
    }
}
