use bray_core::Observer;
use bray_kinetics::StepEvent;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

/// Configuration for rendering a [`PlotObserver`] result.
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// ```ignore
/// obs.show(ShowConfig::new().title("Step size").legend().log_y())?;
/// ```
pub struct ShowConfig {
    title: Option<String>,
    x_label: Option<String>,
    legend: bool,
    log_y: bool,
}

impl ShowConfig {
    /// Creates a new `ShowConfig` with defaults: no title, no legend, linear scale.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            x_label: None,
            legend: false,
            log_y: false,
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Labels the x-axis.
    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    /// Enables a legend labeling each trace by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Enables a logarithmic y-axis (base 10).
    ///
    /// y values are transformed with log₁₀ before plotting. Non-positive
    /// values are skipped.
    #[must_use]
    pub fn log_y(mut self) -> Self {
        self.log_y = true;
        self
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts plottable data from a solver event.
///
/// Return `None` from [`x`](Plottable::x) to skip the event entirely, or
/// `None` in a trace slot to skip only that trace.
pub trait Plottable<const N: usize> {
    /// The x-axis value for this event, or `None` to skip recording entirely.
    fn x(&self) -> Option<f64>;

    /// The y-axis values for each trace.
    fn traces(&self) -> [Option<f64>; N];
}

/// Step size against time, as two traces: accepted steps, then rejected trials.
impl Plottable<2> for StepEvent {
    fn x(&self) -> Option<f64> {
        Some(self.time())
    }

    fn traces(&self) -> [Option<f64>; 2] {
        match self {
            StepEvent::Accepted { step_size, .. } => [Some(*step_size), None],
            StepEvent::Rejected { step_size, .. } => [None, Some(*step_size)],
        }
    }
}

/// An observer that collects trace data during solving and displays it via egui.
///
/// The const generic `N` is the number of traces. Pass `&mut PlotObserver` as
/// the observer of any event type implementing [`Plottable<N>`], or call
/// [`record`](PlotObserver::record) directly from a closure. Call
/// [`show`](PlotObserver::show) once the run is over.
///
/// ```ignore
/// let mut obs = PlotObserver::new(["accepted", "rejected"]);
/// let trajectory = scenario.simulate_observed(&mut obs)?;
/// obs.show(ShowConfig::new().title("Step size").legend().log_y())?;
/// ```
pub struct PlotObserver<const N: usize> {
    names: [String; N],
    data: [Vec<[f64; 2]>; N],
}

impl<const N: usize> PlotObserver<N> {
    /// Creates a new `PlotObserver` with the given trace names.
    #[must_use]
    pub fn new(names: [&str; N]) -> Self {
        Self {
            names: names.map(str::to_owned),
            data: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Records a single data point across all traces.
    ///
    /// For each trace slot, `None` skips recording for that trace while
    /// leaving other traces unaffected.
    pub fn record(&mut self, x: f64, traces: [Option<f64>; N]) {
        for (i, y) in traces.into_iter().enumerate() {
            if let Some(y) = y {
                self.data[i].push([x, y]);
            }
        }
    }

    /// Points recorded so far for trace `index`.
    #[must_use]
    pub fn points(&self, index: usize) -> &[[f64; 2]] {
        &self.data[index]
    }

    /// Opens a blocking egui window displaying all collected traces.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions::default();
        let title = config.title.unwrap_or_default();
        let traces: Vec<(String, Vec<[f64; 2]>)> = self.names.into_iter().zip(self.data).collect();

        eframe::run_native(
            &title,
            options,
            Box::new(move |_cc| {
                Ok(Box::new(TraceApp {
                    traces,
                    x_label: config.x_label,
                    legend: config.legend,
                    log_y: config.log_y,
                }))
            }),
        )
    }
}

impl<const N: usize, E, A> Observer<E, A> for PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if let Some(x) = event.x() {
            self.record(x, event.traces());
        }
        None
    }
}

/// Lets `&mut PlotObserver<N>` be passed by value, so the observer can still
/// be shown after the run.
impl<const N: usize, E, A> Observer<E, A> for &mut PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}

struct TraceApp {
    traces: Vec<(String, Vec<[f64; 2]>)>,
    x_label: Option<String>,
    legend: bool,
    log_y: bool,
}

impl eframe::App for TraceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("plot_observer");
            if self.legend {
                plot = plot.legend(Legend::default());
            }
            if let Some(label) = &self.x_label {
                plot = plot.x_axis_label(label.clone());
            }
            if self.log_y {
                plot = plot.y_axis_label("log₁₀");
            }
            let log_y = self.log_y;
            plot.show(ui, |plot_ui| {
                for (name, points) in &self.traces {
                    let plot_points: PlotPoints = if log_y {
                        points
                            .iter()
                            .filter(|p| p[1] > 0.0)
                            .map(|p| [p[0], p[1].log10()])
                            .collect()
                    } else {
                        points.iter().copied().collect()
                    };
                    plot_ui.line(Line::new(plot_points).name(name));
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use bray_core::Snapshot;
    use bray_kinetics::{
        Action, Derivative, KineticsInput, Rates, SimulationConfig, State, simulate_observed,
    };

    fn accepted(time: f64, step_size: f64) -> StepEvent {
        StepEvent::Accepted {
            step: 1,
            time,
            step_size,
            snapshot: Snapshot::new(
                KineticsInput {
                    time,
                    state: State::default(),
                },
                Derivative::default(),
            ),
        }
    }

    fn rejected(time: f64, step_size: f64) -> StepEvent {
        StepEvent::Rejected {
            time,
            step_size,
            error_norm: 3.0,
        }
    }

    // Calls observe without naming the action type at each call site.
    fn feed(obs: &mut PlotObserver<2>, event: &StepEvent) {
        let _: Option<Action> = obs.observe(event);
    }

    #[test]
    fn step_events_split_into_accepted_and_rejected_traces() {
        let mut obs = PlotObserver::new(["accepted", "rejected"]);

        feed(&mut obs, &accepted(0.5, 0.5));
        feed(&mut obs, &rejected(0.5, 2.0));
        feed(&mut obs, &accepted(1.0, 0.5));

        assert_eq!(obs.points(0), [[0.5, 0.5], [1.0, 0.5]]);
        assert_eq!(obs.points(1), [[0.5, 2.0]]);
    }

    #[test]
    fn skips_only_affected_trace_when_y_is_none() {
        let mut obs: PlotObserver<2> = PlotObserver::new(["a", "b"]);
        obs.record(1.0, [Some(10.0), None]);
        obs.record(2.0, [None, Some(20.0)]);

        assert_eq!(obs.points(0), [[1.0, 10.0]]);
        assert_eq!(obs.points(1), [[2.0, 20.0]]);
    }

    #[test]
    fn records_a_whole_simulation_without_steering_it() {
        let mut obs = PlotObserver::new(["accepted", "rejected"]);
        let config = SimulationConfig {
            t_max: 20.0,
            n_points: 21,
            plot: false,
            ..SimulationConfig::default()
        };

        let trajectory =
            simulate_observed(&State::default(), &Rates::default(), &config, &mut obs).unwrap();

        assert_eq!(obs.points(0).len(), trajectory.stats().accepted);
        assert_eq!(obs.points(1).len(), trajectory.stats().rejected);
        assert_eq!(obs.points(0).last().map(|p| p[0]), Some(20.0));
    }
}
