//! Style definitions for graphs, nodes, edges and clusters.
//!
//! Every type here is a typed stand-in for a group of Graphviz attributes.
//! The types do not know how they are serialized; exporters read them through
//! their accessors.
//!
//! # Overview
//!
//! - [`LineStyle`] - Solid, dashed or dotted lines for edges.
//! - [`RankDir`], [`Splines`] - Global layout direction and edge routing.
//! - [`Shape`] - Node shapes.
//! - [`Font`] - Font family and size.
//! - [`GraphStyle`] - Global layout attributes of a graph.
//! - [`NodeStyle`] - Per-node or default node attributes.
//! - [`EdgeStyle`] - Per-edge or default edge attributes.
//! - [`ClusterStyle`] - Attributes of a cluster boundary.

use std::{fmt, str::FromStr};

use crate::color::Color;

/// Line pattern of an edge.
///
/// Solid lines denote synchronous relationships, dashed lines denote
/// asynchronous or non-structural ones.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Returns the Graphviz `style` value for this line style.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }
}

impl FromStr for LineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ => Err(format!("unknown line style `{s}`")),
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction in which ranks are laid out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankDir {
    #[default]
    TopBottom,
    LeftRight,
    BottomTop,
    RightLeft,
}

impl RankDir {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopBottom => "TB",
            Self::LeftRight => "LR",
            Self::BottomTop => "BT",
            Self::RightLeft => "RL",
        }
    }
}

/// How edges are routed between nodes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Splines {
    #[default]
    Spline,
    Ortho,
    Polyline,
    Line,
    Curved,
}

impl Splines {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spline => "spline",
            Self::Ortho => "ortho",
            Self::Polyline => "polyline",
            Self::Line => "line",
            Self::Curved => "curved",
        }
    }
}

/// Node shape.
///
/// Table-labelled nodes use [`Shape::Plaintext`] so the table itself draws
/// the border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Box,
    Ellipse,
    Record,
    Plaintext,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Ellipse => "ellipse",
            Self::Record => "record",
            Self::Plaintext => "plaintext",
        }
    }
}

/// Horizontal justification of a cluster label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelJust {
    Left,
    Center,
    Right,
}

impl LabelJust {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "c",
            Self::Right => "r",
        }
    }
}

/// Font family and point size.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    family: String,
    size: f32,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}

/// Global layout attributes of a graph.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GraphStyle {
    rank_dir: RankDir,
    splines: Splines,
    node_sep: Option<f32>,
    rank_sep: Option<f32>,
    background: Option<Color>,
    dpi: Option<u32>,
}

impl GraphStyle {
    pub fn new(rank_dir: RankDir, splines: Splines) -> Self {
        Self {
            rank_dir,
            splines,
            ..Self::default()
        }
    }

    /// Sets minimum space between nodes of the same rank, in inches.
    pub fn with_node_sep(mut self, inches: f32) -> Self {
        self.node_sep = Some(inches);
        self
    }

    /// Sets minimum space between ranks, in inches.
    pub fn with_rank_sep(mut self, inches: f32) -> Self {
        self.rank_sep = Some(inches);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = Some(dpi);
        self
    }

    pub fn rank_dir(&self) -> RankDir {
        self.rank_dir
    }

    pub fn splines(&self) -> Splines {
        self.splines
    }

    pub fn node_sep(&self) -> Option<f32> {
        self.node_sep
    }

    pub fn rank_sep(&self) -> Option<f32> {
        self.rank_sep
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn dpi(&self) -> Option<u32> {
        self.dpi
    }
}

/// Node attributes. Used both per node and as the graph-wide default block.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NodeStyle {
    shape: Option<Shape>,
    filled: bool,
    fill_color: Option<Color>,
    font: Option<Font>,
}

impl NodeStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Fills the node with `color`.
    pub fn with_fill(mut self, color: Color) -> Self {
        self.filled = true;
        self.fill_color = Some(color);
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn shape(&self) -> Option<Shape> {
        self.shape
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Edge attributes. Used both per edge and as the graph-wide default block.
///
/// `constraint` defaults to `true`; an edge with `constraint == false` is a
/// layout hint only and does not affect node ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    color: Option<Color>,
    pen_width: Option<f32>,
    line_style: LineStyle,
    font: Option<Font>,
    font_color: Option<Color>,
    font_size: Option<f32>,
    arrow_size: Option<f32>,
    constraint: bool,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            color: None,
            pen_width: None,
            line_style: LineStyle::Solid,
            font: None,
            font_color: None,
            font_size: None,
            arrow_size: None,
            constraint: true,
        }
    }
}

impl EdgeStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Solid edge drawn in `color`.
    pub fn solid(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// Dashed edge drawn in `color`.
    pub fn dashed(color: Color) -> Self {
        Self {
            color: Some(color),
            line_style: LineStyle::Dashed,
            ..Self::default()
        }
    }

    pub fn with_pen_width(mut self, width: f32) -> Self {
        self.pen_width = Some(width);
        self
    }

    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.line_style = style;
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Sets the label color and size. Either may be left to the defaults.
    pub fn with_label_font(mut self, color: Option<Color>, size: Option<f32>) -> Self {
        self.font_color = color;
        self.font_size = size;
        self
    }

    pub fn with_arrow_size(mut self, size: f32) -> Self {
        self.arrow_size = Some(size);
        self
    }

    /// Excludes the edge from rank assignment.
    pub fn without_constraint(mut self) -> Self {
        self.constraint = false;
        self
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn pen_width(&self) -> Option<f32> {
        self.pen_width
    }

    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    pub fn font_color(&self) -> Option<Color> {
        self.font_color
    }

    pub fn font_size(&self) -> Option<f32> {
        self.font_size
    }

    pub fn arrow_size(&self) -> Option<f32> {
        self.arrow_size
    }

    pub fn is_constraint(&self) -> bool {
        self.constraint
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Attributes of a cluster boundary.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClusterStyle {
    fill_color: Option<Color>,
    border_color: Option<Color>,
    rounded: bool,
    font: Option<Font>,
    label_just: Option<LabelJust>,
    pen_width: Option<f32>,
    margin: Option<f32>,
}

impl ClusterStyle {
    /// Filled, rounded cluster using `color` for both fill and border.
    pub fn filled_rounded(color: Color) -> Self {
        Self {
            fill_color: Some(color),
            border_color: Some(color),
            rounded: true,
            ..Self::default()
        }
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_label_just(mut self, just: LabelJust) -> Self {
        self.label_just = Some(just);
        self
    }

    pub fn with_pen_width(mut self, width: f32) -> Self {
        self.pen_width = Some(width);
        self
    }

    /// Sets the space between the cluster boundary and its nodes, in points.
    pub fn with_margin(mut self, points: f32) -> Self {
        self.margin = Some(points);
        self
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    pub fn border_color(&self) -> Option<Color> {
        self.border_color
    }

    pub fn is_rounded(&self) -> bool {
        self.rounded
    }

    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    pub fn label_just(&self) -> Option<LabelJust> {
        self.label_just
    }

    pub fn pen_width(&self) -> Option<f32> {
        self.pen_width
    }

    pub fn margin(&self) -> Option<f32> {
        self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_style_from_str() {
        assert_eq!("solid".parse::<LineStyle>(), Ok(LineStyle::Solid));
        assert_eq!("dashed".parse::<LineStyle>(), Ok(LineStyle::Dashed));
        assert!("wavy".parse::<LineStyle>().is_err());
    }

    #[test]
    fn test_edge_style_defaults() {
        let style = EdgeStyle::default();
        assert_eq!(style.line_style(), LineStyle::Solid);
        assert!(style.is_constraint());
        assert!(style.is_empty());
    }

    #[test]
    fn test_dashed_without_constraint() {
        let color = Color::new("#E74C3C").unwrap();
        let style = EdgeStyle::dashed(color).without_constraint();

        assert_eq!(style.line_style(), LineStyle::Dashed);
        assert_eq!(style.color(), Some(color));
        assert!(!style.is_constraint());
        assert!(!style.is_empty());
    }

    #[test]
    fn test_node_style_fill_sets_filled() {
        let style = NodeStyle::new().with_fill(Color::new("lightblue").unwrap());
        assert!(style.is_filled());
        assert!(style.shape().is_none());
    }

    #[test]
    fn test_cluster_style_uses_color_for_fill_and_border() {
        let color = Color::new("#E3F2FD").unwrap();
        let style = ClusterStyle::filled_rounded(color).with_margin(20.0);

        assert_eq!(style.fill_color(), Some(color));
        assert_eq!(style.border_color(), Some(color));
        assert!(style.is_rounded());
        assert_eq!(style.margin(), Some(20.0));
    }

    #[test]
    fn test_rank_dir_values() {
        assert_eq!(RankDir::TopBottom.as_str(), "TB");
        assert_eq!(RankDir::LeftRight.as_str(), "LR");
    }
}
