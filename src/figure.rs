//! Chart specification types
//!
//! A [`Figure`] is the contract between the chart builders and whatever
//! renders them: a list of data traces plus layout metadata. The types
//! serialize to the JSON shape Plotly.js consumes directly, so the dashboard
//! page can hand the payload to `Plotly.react` without reshaping it:
//!
//! ```text
//! {
//!   "data":   [ { "type": "bar", "x": [...], "y": [...], ... } ],
//!   "layout": { "title": { "text": "..." }, "xaxis": { ... }, ... }
//! }
//! ```
//!
//! Everything optional is skipped when unset, keeping payloads small and
//! making the serialized form stable for comparison in tests.

use serde::Serialize;

/// A complete chart: traces plus layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// A figure with no data traces, only layout (empty-selection case)
    pub fn empty(layout: Layout) -> Self {
        Self { data: vec![], layout }
    }
}

/// Trace family understood by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Bar,
    Scatter,
}

/// Axis values: category labels or numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Coords {
    Labels(Vec<String>),
    Values(Vec<f64>),
}

/// One data series within a figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    pub x: Coords,
    pub y: Coords,
    /// Scatter drawing mode: "markers", "lines+markers"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Legend entry for this series
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Per-point text (bar labels, hover names)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<String>,
    /// Per-point hover payload, shown instead of the default hover
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertext: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

impl Trace {
    /// A bar trace over category labels
    pub fn bar(x: Vec<String>, y: Vec<f64>) -> Self {
        Self::new(TraceKind::Bar, Coords::Labels(x), Coords::Values(y))
    }

    /// A point-cloud scatter trace
    pub fn markers(x: Vec<f64>, y: Vec<f64>) -> Self {
        let mut t = Self::new(TraceKind::Scatter, Coords::Values(x), Coords::Values(y));
        t.mode = Some("markers".to_string());
        t
    }

    /// A connected time-series trace
    pub fn lines_markers(x: Vec<f64>, y: Vec<f64>) -> Self {
        let mut t = Self::new(TraceKind::Scatter, Coords::Values(x), Coords::Values(y));
        t.mode = Some("lines+markers".to_string());
        t
    }

    fn new(kind: TraceKind, x: Coords, y: Coords) -> Self {
        Self {
            kind,
            x,
            y,
            mode: None,
            name: None,
            text: None,
            textposition: None,
            hovertext: None,
            marker: None,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Number of data points in this trace
    pub fn len(&self) -> usize {
        match &self.x {
            Coords::Labels(v) => v.len(),
            Coords::Values(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Marker color: one color for the whole series, or per-point values
/// mapped through a colorscale
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerColor {
    Fixed(String),
    Values(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<MarkerColor>,
    /// Per-point sizes; paired with sizemode/sizeref for area scaling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizemode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizeref: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Named colorscale, e.g. "Viridis"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
}

impl Marker {
    pub fn fixed(color: &str, opacity: f64) -> Self {
        Self {
            color: Some(MarkerColor::Fixed(color.to_string())),
            opacity: Some(opacity),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: Text,
}

/// Wrapped text object (`{"text": "..."}`), the form Plotly expects for
/// titles on figures, axes, legends, and colorbars
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub text: String,
}

impl Text {
    pub fn new(text: &str) -> Self {
        Self { text: text.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Text>,
}

impl Axis {
    pub fn titled(title: &str) -> Self {
        Self { title: Some(Text::new(title)) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: Text,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    /// Bar placement for multi-trace bar charts ("group" = side by side)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

impl Layout {
    /// Title plus axis titles, the combination every chart here uses
    pub fn titled(title: &str, x_title: &str, y_title: &str) -> Self {
        Self {
            title: Some(Text::new(title)),
            xaxis: Some(Axis::titled(x_title)),
            yaxis: Some(Axis::titled(y_title)),
            ..Self::default()
        }
    }
}
