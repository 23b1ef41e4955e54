//! Road style entities and their fill/casing layers.

use road_style_core::{
    make_layer, BrunnelMode, ClassScope, Expression, LayerDescriptor, LayerTemplate, Palette,
};

/// Fill stroke width in pixels.
pub const FILL_WIDTH: i64 = 2;

/// Casing stroke width in pixels.
pub const CASING_WIDTH: i64 = 4;

/// Blur applied to both strokes for anti-aliasing.
pub const LINE_BLUR: f64 = 0.5;

/// Zoom at which tunnel casings switch from solid to dashed.
pub const TUNNEL_DASH_ZOOM: f64 = 11.0;

/// Zoom-stepped dash pattern for tunnel casings.
///
/// Solid (`[1]`) below [`TUNNEL_DASH_ZOOM`], dashed (`[0.5, 0.25]`) at or above.
#[must_use]
pub fn tunnel_dasharray() -> Expression {
    Expression::zoom_step(
        serde_json::json!([1]),
        vec![(
            TUNNEL_DASH_ZOOM,
            Expression::literal(serde_json::json!([0.5, 0.25])),
        )],
    )
}

/// Everything a road entity needs to produce layers.
#[derive(Debug, Clone)]
pub struct StyleContext<'a> {
    /// Colour table.
    pub palette: &'a Palette,
    /// Template cloned into every layer.
    pub template: LayerTemplate,
    /// Whether entities narrow layers to their own class.
    pub class_scope: ClassScope,
    /// Maximum zoom for every layer.
    pub max_zoom: u8,
}

impl<'a> StyleContext<'a> {
    /// Creates a context with shared class scope and the default max zoom.
    #[must_use]
    pub fn new(palette: &'a Palette, template: LayerTemplate) -> Self {
        Self {
            palette,
            template,
            class_scope: ClassScope::Shared,
            max_zoom: LayerTemplate::DEFAULT_MAX_ZOOM,
        }
    }

    /// Sets the class scope.
    #[must_use]
    pub fn class_scope(mut self, scope: ClassScope) -> Self {
        self.class_scope = scope;
        self
    }

    /// Sets the maximum zoom.
    #[must_use]
    pub fn max_zoom(mut self, zoom: u8) -> Self {
        self.max_zoom = zoom;
        self
    }
}

/// Configuration for one road class's layers.
///
/// Road classes differ only in these values; [`fill`](Self::fill) and
/// [`casing`](Self::casing) are shared.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadStyle {
    name: &'static str,
    brunnel: BrunnelMode,
    min_zoom_fill: u8,
    min_zoom_casing: u8,
    sort_key: i64,
    filter: Option<Expression>,
}

impl RoadStyle {
    /// Creates an at-grade entity visible from the default minimum zoom.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            brunnel: BrunnelMode::Surface,
            min_zoom_fill: LayerTemplate::DEFAULT_MIN_ZOOM,
            min_zoom_casing: LayerTemplate::DEFAULT_MIN_ZOOM,
            sort_key: 0,
            filter: None,
        }
    }

    /// Sets the brunnel mode.
    #[must_use]
    pub fn brunnel(mut self, mode: BrunnelMode) -> Self {
        self.brunnel = mode;
        self
    }

    /// Sets the fill and casing minimum zoom.
    #[must_use]
    pub fn min_zoom(self, zoom: u8) -> Self {
        self.min_zoom_fill(zoom).min_zoom_casing(zoom)
    }

    /// Sets the fill minimum zoom.
    #[must_use]
    pub fn min_zoom_fill(mut self, zoom: u8) -> Self {
        self.min_zoom_fill = zoom;
        self
    }

    /// Sets the casing minimum zoom.
    #[must_use]
    pub fn min_zoom_casing(mut self, zoom: u8) -> Self {
        self.min_zoom_casing = zoom;
        self
    }

    /// Sets the draw order key.
    #[must_use]
    pub fn sort_key(mut self, key: i64) -> Self {
        self.sort_key = key;
        self
    }

    /// Sets the class-restricting filter.
    #[must_use]
    pub fn filter(mut self, filter: Expression) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Entity name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Brunnel mode.
    #[must_use]
    pub fn brunnel_mode(&self) -> &BrunnelMode {
        &self.brunnel
    }

    /// Fill minimum zoom.
    #[must_use]
    pub fn fill_min_zoom(&self) -> u8 {
        self.min_zoom_fill
    }

    /// Casing minimum zoom.
    #[must_use]
    pub fn casing_min_zoom(&self) -> u8 {
        self.min_zoom_casing
    }

    /// Draw order key.
    #[must_use]
    pub fn draw_order(&self) -> i64 {
        self.sort_key
    }

    /// Class-restricting filter, if any.
    #[must_use]
    pub fn class_filter(&self) -> Option<&Expression> {
        self.filter.as_ref()
    }

    /// The road fill layer.
    #[must_use]
    pub fn fill(&self, ctx: &StyleContext<'_>) -> LayerDescriptor {
        let mut layer = self.base_layer(ctx, "fill", self.min_zoom_fill);
        layer.set_paint("line-color", ctx.palette.color_expression().clone());
        layer.set_paint("line-width", FILL_WIDTH);
        layer
    }

    /// The wider casing layer drawn beneath the fill.
    #[must_use]
    pub fn casing(&self, ctx: &StyleContext<'_>) -> LayerDescriptor {
        let mut layer = self.base_layer(ctx, "casing", self.min_zoom_casing);
        layer.set_paint("line-color", ctx.palette.casing_expression());
        layer.set_paint("line-width", CASING_WIDTH);
        if self.brunnel.is_tunnel() {
            layer.set_paint("line-dasharray", tunnel_dasharray());
        }
        layer
    }

    fn base_layer(&self, ctx: &StyleContext<'_>, id: &str, minzoom: u8) -> LayerDescriptor {
        // Shared scope leaves the class filter out: every entity's layers
        // cover the whole allowlist.
        let constraint = match (ctx.class_scope, &self.filter) {
            (ClassScope::PerClass, Some(filter)) => filter.clone(),
            _ => Expression::always(),
        };
        let mut layer = make_layer(
            &ctx.template,
            id,
            Some(constraint),
            Some(&self.brunnel),
            minzoom,
            ctx.max_zoom,
        );
        layer.set_layout("line-cap", "round");
        layer.set_layout("line-join", "round");
        layer.set_layout("visibility", "visible");
        layer.set_layout("line-sort-key", self.sort_key);
        layer.set_paint("line-opacity", 1_i64);
        layer.set_paint("line-blur", LINE_BLUR);
        layer
    }
}
