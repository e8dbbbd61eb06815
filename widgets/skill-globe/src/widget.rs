use folio_engine::{
    ConfigError, Cursor, FrameContext, InputEvent, InputQueue, ListenerKind, ListenerSpec, Marker,
    MarkerInstance, Overrides, RenderContext, Rgba, SurfaceFit, Widget, WidgetConfig,
};
use glam::Vec2;
use serde::Deserialize;

use crate::catalog::{self, LabelPoint, LabelSpec};
use crate::drag::DragState;
use crate::sphere::{OrbitState, SphereConfig};
use crate::wireframe;

const OUTLINE: Rgba = Rgba::VIOLET.with_alpha(0.18);
const WIRE: Rgba = Rgba::VIOLET.with_alpha(0.15);
const WIRE_WIDTH: f32 = 0.8;
/// Presses start on the globe; moves and releases are tracked page-wide.
const LISTENERS: &[ListenerSpec] = &[
    ListenerSpec::surface(ListenerKind::PointerDown),
    ListenerSpec::surface(ListenerKind::TouchStart),
    ListenerSpec::window(ListenerKind::PointerMove),
    ListenerSpec::window(ListenerKind::TouchMove),
    ListenerSpec::window(ListenerKind::PointerUp),
    ListenerSpec::window(ListenerKind::TouchEnd),
    ListenerSpec::window(ListenerKind::Resize),
];
/// Core glow discs, outermost first.
const CORE_GLOW: [(f32, f32); 3] = [(64.0, 0.06), (44.0, 0.06), (24.0, 0.06)];

/// JSON shape accepted by [`SkillGlobe::configure`]. Every key is optional;
/// without `labels` the built-in catalog is used.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    sphere: SphereConfig,
    labels: Option<Vec<LabelSpec>>,
}

/// A label after projection for the current orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedLabel {
    /// Index into the catalog.
    pub index: usize,
    /// Offset from the sphere center, in pixels.
    pub offset: Vec2,
    /// Larger is nearer the viewer.
    pub depth: f32,
    pub scale: f32,
    pub opacity: f32,
}

/// Draggable globe of labels with idle auto-rotation.
pub struct SkillGlobe {
    sphere: SphereConfig,
    labels: Vec<LabelPoint>,
    orbit: OrbitState,
    drag: DragState,
    overrides: Overrides,
}

impl SkillGlobe {
    pub fn new() -> Self {
        Self::with_catalog(SphereConfig::default(), catalog::default_catalog())
    }

    pub fn with_catalog(sphere: SphereConfig, labels: Vec<LabelPoint>) -> Self {
        Self {
            orbit: OrbitState::new(&sphere),
            sphere,
            labels,
            drag: DragState::Idle,
            overrides: Overrides::new(),
        }
    }

    pub fn orbit(&self) -> OrbitState {
        self.orbit
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn labels(&self) -> &[LabelPoint] {
        &self.labels
    }

    pub fn sphere(&self) -> &SphereConfig {
        &self.sphere
    }

    /// All labels projected for the current orbit, farthest first.
    ///
    /// The sort is stable, so labels at equal depth keep catalog order.
    pub fn projected_labels(&self) -> Vec<ProjectedLabel> {
        let mut projected: Vec<ProjectedLabel> = self
            .labels
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let p = self.orbit.project(label.lat, label.lon, self.sphere.radius);
                ProjectedLabel {
                    index,
                    offset: Vec2::new(p.x, p.y),
                    depth: p.z,
                    scale: self.sphere.depth_scale(p.z),
                    opacity: self.sphere.depth_opacity(p.z),
                }
            })
            .collect();
        projected.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        projected
    }

    fn handle(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } | InputEvent::TouchStart { x, y } => {
                self.drag.begin(Vec2::new(x, y));
            }
            InputEvent::PointerMove { x, y } | InputEvent::TouchMove { x, y } => {
                if let Some(delta) = self.drag.moved(Vec2::new(x, y)) {
                    self.orbit.apply_drag(delta, &self.sphere);
                }
            }
            InputEvent::PointerUp { .. } | InputEvent::TouchEnd => self.drag.end(),
            InputEvent::Resize { .. } => {}
        }
    }
}

impl Default for SkillGlobe {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for SkillGlobe {
    fn config(&self) -> WidgetConfig {
        WidgetConfig {
            fit: SurfaceFit::Element,
            ..WidgetConfig::default()
        }
    }

    fn listeners(&self) -> &'static [ListenerSpec] {
        LISTENERS
    }

    fn update(&mut self, ctx: &mut FrameContext, input: &InputQueue) {
        for event in input.iter() {
            self.handle(event);
        }
        if !self.drag.is_dragging() {
            self.orbit.advance(self.sphere.auto_rotate_step);
        }
        ctx.cursor = if self.drag.is_dragging() {
            Cursor::Grabbing
        } else {
            Cursor::Grab
        };
    }

    fn render(&self, ctx: &mut RenderContext) {
        ctx.draw_list.clear_surface();
        if ctx.viewport.is_empty() {
            return;
        }

        let center = ctx.viewport.center();
        let radius = self.sphere.radius;

        ctx.draw_list.stroke_circle(center, radius, 1.0, OUTLINE);
        for curve in wireframe::curves(&self.orbit, radius) {
            let points = curve.iter().map(|p| center + Vec2::new(p.x, p.y)).collect();
            ctx.draw_list.stroke_polyline(points, WIRE_WIDTH, WIRE);
        }
        for (r, alpha) in CORE_GLOW {
            ctx.draw_list.fill_circle(center, r, Rgba::VIOLET.with_alpha(alpha));
        }

        for p in self.projected_labels() {
            let label = &self.labels[p.index];
            let at = center + p.offset;
            ctx.draw_list.marker(Marker {
                label: label.name.clone(),
                instance: MarkerInstance {
                    x: at.x,
                    y: at.y,
                    scale: p.scale,
                    opacity: p.opacity,
                    r: label.color.r,
                    g: label.color.g,
                    b: label.color.b,
                    label_index: p.index as f32,
                },
            });
        }
    }

    fn configure(&mut self, json: &str) -> Result<(), ConfigError> {
        let next = self.overrides.merged(json)?;
        let settings: Settings = next.decode()?;
        settings.sphere.validate()?;
        let labels = match settings.labels {
            Some(specs) => catalog::from_specs(specs)?,
            None => catalog::default_catalog(),
        };

        self.sphere = settings.sphere;
        self.orbit.clamp(&self.sphere);
        self.labels = labels;
        self.overrides = next;
        log::info!(
            "skill globe configured: radius {}, {} labels",
            self.sphere.radius,
            self.labels.len()
        );
        Ok(())
    }
}
