use folio_engine::{
    ConfigError, FrameContext, InputEvent, InputQueue, ListenerKind, ListenerSpec, Overrides,
    RenderContext, SurfaceFit, Widget, WidgetConfig,
};
use glam::Vec2;
use serde::Deserialize;

use crate::field::{FieldConfig, OFFSCREEN};
use crate::glow::GlowConfig;

const LISTENERS: &[ListenerSpec] = &[
    ListenerSpec::window(ListenerKind::PointerMove),
    ListenerSpec::window(ListenerKind::Resize),
];

/// JSON shape accepted by [`PointerField::configure`]. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    field: FieldConfig,
    glow: GlowConfig,
}

/// Full-page background layer: a faint dot grid lit up around the pointer.
pub struct PointerField {
    field: FieldConfig,
    glow: GlowConfig,
    overrides: Overrides,
    pointer: Vec2,
}

impl PointerField {
    pub fn new() -> Self {
        Self::with_config(FieldConfig::default(), GlowConfig::default())
    }

    pub fn with_config(field: FieldConfig, glow: GlowConfig) -> Self {
        Self {
            field,
            glow,
            overrides: Overrides::new(),
            pointer: OFFSCREEN,
        }
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn field(&self) -> &FieldConfig {
        &self.field
    }

    pub fn glow(&self) -> &GlowConfig {
        &self.glow
    }
}

impl Default for PointerField {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for PointerField {
    fn config(&self) -> WidgetConfig {
        WidgetConfig {
            fit: SurfaceFit::Viewport,
            max_vector_vertices: 131_072,
            max_markers: 0,
        }
    }

    fn listeners(&self) -> &'static [ListenerSpec] {
        LISTENERS
    }

    fn update(&mut self, _ctx: &mut FrameContext, input: &InputQueue) {
        for event in input.iter() {
            if let InputEvent::PointerMove { x, y } = *event {
                self.pointer = Vec2::new(x, y);
            }
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        ctx.draw_list.clear_surface();
        if self.pointer == OFFSCREEN {
            return;
        }

        self.glow.draw(ctx.draw_list, self.pointer);
        for dot in self.field.dots(self.pointer, ctx.viewport) {
            ctx.draw_list.fill_circle(
                dot.center,
                self.field.dot_radius,
                self.field.color.with_alpha(dot.opacity),
            );
        }
    }

    fn configure(&mut self, json: &str) -> Result<(), ConfigError> {
        let next = self.overrides.merged(json)?;
        let settings: Settings = next.decode()?;
        settings.field.validate()?;
        settings.glow.validate()?;
        self.field = settings.field;
        self.glow = settings.glow;
        self.overrides = next;
        log::info!(
            "pointer field configured: spacing {}, radius {}",
            self.field.spacing,
            self.field.radius
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_engine::{DrawCommand, DrawList, HeadlessHost, RecordingSurface, Rgba, Viewport};
    use folio_web::{Session, StoredConfig};

    fn frame(field: &mut PointerField, viewport: Viewport, events: &[InputEvent]) -> DrawList {
        let mut ctx = FrameContext::new(viewport);
        let mut input = InputQueue::new();
        for event in events {
            input.push(*event);
        }
        ctx.begin_frame(1.0 / 60.0);
        field.update(&mut ctx, &input);
        let mut list = DrawList::new();
        field.render(&mut RenderContext {
            draw_list: &mut list,
            viewport,
        });
        list
    }

    #[test]
    fn clears_then_draws_nothing_before_first_move() {
        let mut field = PointerField::new();
        let list = frame(&mut field, Viewport::new(1280.0, 720.0), &[]);
        assert_eq!(list.commands(), &[DrawCommand::Clear]);
        assert_eq!(field.pointer(), OFFSCREEN);
    }

    #[test]
    fn last_move_of_the_frame_wins() {
        let mut field = PointerField::new();
        frame(
            &mut field,
            Viewport::new(1280.0, 720.0),
            &[
                InputEvent::PointerMove { x: 10.0, y: 10.0 },
                InputEvent::PointerMove { x: 400.0, y: 300.0 },
            ],
        );
        assert_eq!(field.pointer(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn glow_sits_under_the_dots() {
        let mut field = PointerField::new();
        let vp = Viewport::new(1280.0, 720.0);
        let list = frame(&mut field, vp, &[InputEvent::PointerMove { x: 640.0, y: 360.0 }]);

        assert_eq!(list.commands()[0], DrawCommand::Clear);
        let circles: Vec<_> = list.filled_circles().collect();
        let layers = field.glow().discs().count();
        assert!(circles.len() > layers);
        assert!(circles[..layers].iter().all(|(c, _, _)| *c == Vec2::new(640.0, 360.0)));
        assert!(circles[layers..].iter().all(|(c, r, color)| {
            *r == 1.0 && vp.contains(*c) && color.a > 0.0 && color.a <= 0.2
        }));
    }

    #[test]
    fn dots_follow_the_pointer_across_frames() {
        let mut field = PointerField::new();
        let vp = Viewport::new(1280.0, 720.0);
        let first = frame(&mut field, vp, &[InputEvent::PointerMove { x: 100.0, y: 100.0 }]);
        let second = frame(&mut field, vp, &[]);
        assert_eq!(first, second);

        let third = frame(&mut field, vp, &[InputEvent::PointerMove { x: 900.0, y: 500.0 }]);
        assert_ne!(first, third);
    }

    #[test]
    fn empty_viewport_keeps_only_the_glow() {
        let mut field = PointerField::new();
        let list = frame(&mut field, Viewport::ZERO, &[InputEvent::PointerMove { x: 5.0, y: 5.0 }]);
        assert_eq!(list.filled_circles().count(), field.glow().discs().count());
    }

    #[test]
    fn configure_applies_overrides() {
        let mut field = PointerField::new();
        field
            .configure(r##"{"field": {"spacing": 40}, "glow": {"enabled": false}}"##)
            .unwrap();
        assert_eq!(field.field().spacing, 40.0);
        assert_eq!(field.field().radius, 340.0);
        assert!(!field.glow().enabled);
    }

    #[test]
    fn configure_rejects_whole_override() {
        let mut field = PointerField::new();
        let err = field.configure(r#"{"field": {"spacing": 40, "radius": -1}}"#);
        assert!(matches!(err, Err(ConfigError::NotPositive { field: "radius", .. })));
        assert_eq!(field.field().spacing, 24.0);

        assert!(matches!(field.configure("{not json"), Err(ConfigError::Json(_))));
        assert!(matches!(field.configure("[]"), Err(ConfigError::NotAnObject("array"))));
        assert!(matches!(
            field.configure(r#"{"field": {"color": "violet"}}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn subscribes_to_window_moves_and_resizes() {
        let field = PointerField::new();
        let listeners = field.listeners();
        assert!(listeners.contains(&ListenerSpec::window(ListenerKind::PointerMove)));
        assert!(listeners.contains(&ListenerSpec::window(ListenerKind::Resize)));
        assert_eq!(field.config().fit, SurfaceFit::Viewport);
    }

    #[test]
    fn successive_overrides_accumulate_and_survive_remount() {
        let first = r#"{"field": {"spacing": 40}}"#;
        let second = r##"{"field": {"color": "#06b6d4"}, "glow": {"layers": 3}}"##;

        let mut live = PointerField::new();
        let mut stored = StoredConfig::new();
        for json in [first, second] {
            live.configure(json).unwrap();
            stored.accept(json, PointerField::new()).unwrap();
        }
        assert_eq!(live.field().spacing, 40.0);
        assert_eq!(live.field().color, Rgba::rgb8(0x06, 0xb6, 0xd4));
        assert_eq!(live.glow().layers, 3);
        assert_eq!(live.field().radius, 340.0);

        let mut remounted = PointerField::new();
        stored.apply(&mut remounted).unwrap();
        assert_eq!(remounted.field(), live.field());
        assert_eq!(remounted.glow(), live.glow());
    }

    #[test]
    fn rejected_override_keeps_earlier_ones() {
        let mut field = PointerField::new();
        field.configure(r#"{"field": {"spacing": 40}}"#).unwrap();
        assert!(field.configure(r#"{"field": {"radius": -1}}"#).is_err());
        field.configure(r#"{"glow": {"enabled": false}}"#).unwrap();
        assert_eq!(field.field().spacing, 40.0);
        assert_eq!(field.field().radius, 340.0);
        assert!(!field.glow().enabled);
    }

    #[test]
    fn mount_unmount_cycles_leave_nothing_registered() {
        const N: u32 = 50;
        let view = Viewport::new(1280.0, 720.0);
        let host = HeadlessHost::new();
        let listeners = PointerField::new().listeners().len() as u32;

        for i in 0..N {
            let mut session: Session<PointerField, HeadlessHost, RecordingSurface> =
                Session::mount(PointerField::new(), host.clone(), Some(RecordingSurface::new()), view)
                    .unwrap();
            assert_eq!(host.active_listeners() as u32, listeners);
            assert_eq!(host.pending_frames(), 1);

            session.push_input(InputEvent::PointerMove { x: i as f32, y: 100.0 });
            for _ in 0..(i % 3) {
                let frame = host.next_frame().unwrap();
                assert!(host.fire_frame(frame));
                session.on_frame(1.0 / 60.0).unwrap();
            }
            drop(session);

            assert_eq!(host.active_listeners(), 0);
            assert_eq!(host.pending_frames(), 0);
        }

        let stats = host.stats();
        assert_eq!(stats.listens, listeners * N);
        assert_eq!(stats.unlistens, listeners * N);
        assert_eq!(stats.frames_requested - stats.frames_fired, N);
        assert_eq!(stats.frames_cancelled, N);
        assert_eq!(host.next_frame(), None);
    }
}
