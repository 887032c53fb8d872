use crate::color::{Color, ColorPalette, OrdinalScale, Set3Palette};
use crate::draw::svg::SvgDrawer;
use crate::draw::{Drawer, TextStyle};
use crate::store::{reduce, ChangeBatch, Collection, Record};
use kurbo::{Point, Size};
use once_cell::sync::Lazy;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::{fmt, fs, io, path::Path};
use tracing::{debug, warn};

mod interact;
pub mod layout;
mod render;
mod scene;

pub use interact::Tooltip;
pub use scene::{ArcSlice, FILL_TRANSITION, SHAPE_TRANSITION};

/// The default style used with [`DonutChart::new`].
pub static DEFAULT_STYLE: Lazy<ChartStyle> = Lazy::new(ChartStyle::default);

/// Logical canvas geometry. The donut is drawn at 300×300 with the legend to
/// its right.
#[derive(Debug, Clone, Copy)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

impl Dimensions {
    pub fn new() -> Self {
        Self {
            width: 300.0,
            height: 300.0,
            radius: 150.0,
        }
    }

    /// Where the inside of the donut starts.
    pub fn inner_radius(&self) -> f64 {
        self.radius / 2.0
    }

    /// Center of the donut on the surface.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0 + 5.0, self.height / 2.0 + 15.0)
    }

    /// Full drawing surface, with room for the legend.
    pub fn surface(&self) -> Size {
        Size::new(self.width + 150.0, self.height + 50.0)
    }

    pub fn legend_origin(&self) -> Point {
        Point::new(self.width + 10.0, 10.0)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct ChartStyle {
    pub background_color: Color,
    pub slice_stroke_color: Color,
    pub slice_stroke_width: f64,
    /// Fill a slice darkens to while hovered.
    pub highlight_color: Color,
    pub slice_colors: Box<dyn ColorPalette + Send + Sync>,
    pub legend_label: TextStyle,
    pub tooltip_label: TextStyle,
}

impl fmt::Debug for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ChartStyle")
            .field("background_color", &self.background_color)
            .field("slice_stroke_color", &self.slice_stroke_color)
            .field("slice_stroke_width", &self.slice_stroke_width)
            .field("highlight_color", &self.highlight_color)
            .field("slice_colors", &"dyn ColorPalette")
            .field("legend_label", &self.legend_label)
            .field("tooltip_label", &self.tooltip_label)
            .finish()
    }
}

impl ChartStyle {
    pub fn default() -> Self {
        let ink = Color::from_rgb8(0x24, 0x36, 0x42);
        Self {
            background_color: Color::TRANSPARENT,
            slice_stroke_color: ink,
            slice_stroke_width: 3.0,
            highlight_color: ink,
            slice_colors: Box::new(Set3Palette),
            legend_label: TextStyle::new(ink, 16.0),
            tooltip_label: TextStyle::new(Color::WHITE, 12.0),
        }
    }
}

/// The donut chart: retained slices, legend and tooltip.
///
/// Feed it full record lists via [`update`](Self::update), step transitions
/// with [`advance`](Self::advance), forward pointer traffic, and draw through
/// any [`Drawer`].
pub struct DonutChart {
    dimensions: Dimensions,
    style: ChartStyle,
    scale: OrdinalScale,
    scene: scene::Scene,
    legend: Vec<render::LegendEntry>,
    tooltip: Tooltip,
    hovered: Option<String>,
}

impl DonutChart {
    pub fn new() -> Self {
        Self::with_style(DEFAULT_STYLE.clone())
    }

    pub fn with_style(style: ChartStyle) -> Self {
        let scale = OrdinalScale::new(style.slice_colors.clone());
        Self {
            dimensions: Dimensions::new(),
            style,
            scale,
            scene: scene::Scene::new(),
            legend: Vec::new(),
            tooltip: Tooltip::hidden(),
            hovered: None,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Re-render from a full record list: rebuild the color domain, lay the
    /// slices out, reconcile the retained scene and refresh the legend.
    pub fn update(&mut self, records: &[Record]) {
        self.scale
            .set_domain(records.iter().map(|r| r.name.as_str()));
        let targets = layout::layout(records);
        let fills: Vec<Color> = records.iter().map(|r| self.scale.color(&r.name)).collect();
        self.scene.reconcile(records, &targets, &fills);
        self.legend = render::legend_entries(&self.scale);

        // a hovered slice that left the data no longer shows a tooltip
        if let Some(id) = &self.hovered {
            match self.scene.slice(id) {
                Some(slice) if !slice.is_exiting() => {}
                _ => {
                    self.hovered = None;
                    self.tooltip.hide();
                }
            }
        }
    }

    /// Step all running transitions by `dt` time units.
    pub fn advance(&mut self, dt: f64) {
        self.scene.advance(dt);
    }

    pub fn slices(&self) -> &[ArcSlice] {
        self.scene.slices()
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Snapshot the current scene as SVG.
    pub fn to_svg(&self, writer: impl io::Write) -> io::Result<()> {
        let mut drawer = SvgDrawer::new(self.dimensions.surface());
        self.draw(&mut drawer);
        drawer.write(writer)
    }

    pub fn to_svg_file(&self, filename: impl AsRef<Path>) -> io::Result<()> {
        let file = io::BufWriter::new(fs::File::create(filename)?);
        self.to_svg(file)
    }
}

impl Default for DonutChart {
    fn default() -> Self {
        Self::new()
    }
}

/// A chart wired to a live collection.
///
/// Owns the record list, the subscription receiver and the backend handle.
/// Everything runs on the caller's thread: [`pump`](Self::pump) drains
/// pending change batches, pointer entry points forward to the chart, and a
/// click issues a delete against the collection.
pub struct LiveDonut {
    chart: DonutChart,
    records: Vec<Record>,
    changes: Receiver<ChangeBatch>,
    collection: Arc<dyn Collection>,
    notices: Vec<String>,
    disconnected: bool,
}

impl LiveDonut {
    pub fn new(collection: Arc<dyn Collection>) -> Self {
        Self::with_chart(collection, DonutChart::new())
    }

    pub fn with_chart(collection: Arc<dyn Collection>, chart: DonutChart) -> Self {
        let changes = collection.subscribe();
        Self {
            chart,
            records: Vec::new(),
            changes,
            collection,
            notices: Vec::new(),
            disconnected: false,
        }
    }

    /// Drain pending change batches. Each batch is reduced into a new record
    /// list and triggers exactly one chart update; there is no backpressure.
    pub fn pump(&mut self) {
        loop {
            match self.changes.try_recv() {
                Ok(batch) => {
                    debug!(changes = batch.len(), "applying change batch");
                    self.records = reduce(&self.records, &batch);
                    self.chart.update(&self.records);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        warn!("change subscription disconnected");
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn chart(&self) -> &DonutChart {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut DonutChart {
        &mut self.chart
    }

    pub fn advance(&mut self, dt: f64) {
        self.chart.advance(dt);
    }

    pub fn pointer_moved(&mut self, position: Point) {
        self.chart.pointer_moved(position);
    }

    /// A click on a slice issues one delete request for its record. The local
    /// list is NOT touched; it changes only when the collection later reports
    /// the removal. A failed delete becomes a drainable notice.
    pub fn pointer_clicked(&mut self, position: Point) {
        let Some(id) = self.chart.slice_at(position).map(str::to_owned) else {
            return;
        };
        if let Err(err) = self.collection.delete(&id) {
            warn!(id = %id, error = %err, "delete request failed");
            self.notices.push(format!("could not delete item: {err}"));
        }
    }

    /// Non-blocking notifications (e.g. failed deletes) for the embedder to
    /// show; draining clears them.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    pub fn draw<D: Drawer>(&self, drawer: &mut D) {
        self.chart.draw(drawer);
    }

    pub fn to_svg(&self, writer: impl io::Write) -> io::Result<()> {
        self.chart.to_svg(writer)
    }

    pub fn to_svg_file(&self, filename: impl AsRef<Path>) -> io::Result<()> {
        self.chart.to_svg_file(filename)
    }
}
