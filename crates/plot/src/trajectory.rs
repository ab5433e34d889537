use bray_kinetics::{Render, Species, Trajectory};
use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

const DEFAULT_TITLE: &str = "Bray–Liebhafsky model (4 species)";

/// Room left for a panel's title above its plot, in points.
const PANEL_LABEL_HEIGHT: f32 = 24.0;

/// One species' time series, as drawn in its own panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub points: Vec<[f64; 2]>,
}

impl Panel {
    fn new(trajectory: &Trajectory, species: Species) -> Self {
        Self {
            title: species.to_string(),
            points: trajectory.points(species),
        }
    }
}

/// Renders a trajectory in a native window, one panel per species in a 2×2 grid.
///
/// Each panel plots concentration against time with gridlines; the window
/// carries a shared title.
#[derive(Debug, Clone)]
pub struct TrajectoryPlot {
    title: String,
    size: [f32; 2],
}

impl TrajectoryPlot {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            size: [1000.0, 750.0],
        }
    }

    /// Replaces the shared title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial window size, in points.
    #[must_use]
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = [width, height];
        self
    }

    /// The panels this plot draws for `trajectory`, in display order.
    #[must_use]
    pub fn panels(trajectory: &Trajectory) -> [Panel; 4] {
        Species::ALL.map(|species| Panel::new(trajectory, species))
    }
}

impl Default for TrajectoryPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for TrajectoryPlot {
    type Error = eframe::Error;

    /// Opens the window and blocks until the user closes it.
    fn render(&mut self, trajectory: &Trajectory) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size(self.size),
            ..Default::default()
        };
        let app = TrajectoryApp {
            title: self.title.clone(),
            panels: Self::panels(trajectory),
        };

        eframe::run_native(&self.title, options, Box::new(move |_cc| Ok(Box::new(app))))
    }
}

struct TrajectoryApp {
    title: String,
    panels: [Panel; 4],
}

impl eframe::App for TrajectoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(&self.title);
            });

            let panel_height = (ui.available_height() / 2.0 - PANEL_LABEL_HEIGHT).max(80.0);
            for row in self.panels.chunks(2) {
                ui.columns(2, |columns| {
                    for (ui, panel) in columns.iter_mut().zip(row) {
                        ui.label(&panel.title);
                        Plot::new(&panel.title)
                            .height(panel_height)
                            .x_axis_label("Time")
                            .y_axis_label("Concentration")
                            .show_grid(true)
                            .show(ui, |plot_ui| {
                                let points: PlotPoints = panel.points.iter().copied().collect();
                                plot_ui.line(Line::new(points).name(&panel.title));
                            });
                    }
                });
            }
        });
    }
}
