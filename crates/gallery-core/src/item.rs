use crate::config::FieldTuning;
use crate::field::DisplacementField;
use crate::layout::{element_relative_pointer, ElementRect, LayoutError, PlaneLayout};
use crate::pointer::PointerState;
use crate::sink::{PlaneId, PlaneSink};
use crate::viewport::ViewportState;
use glam::Vec2;

/// Anything that can report a live bounding box in viewport pixels.
pub trait ElementSource {
    fn bounding_rect(&self) -> ElementRect;
}

impl<T: ElementSource + ?Sized> ElementSource for std::rc::Rc<T> {
    fn bounding_rect(&self) -> ElementRect {
        (**self).bounding_rect()
    }
}

/// One page element bound to one renderer plane and its displacement field.
pub struct MeshItem<E> {
    element: E,
    plane: PlaneId,
    field: DisplacementField,
    layout: PlaneLayout,
    mouse_pos: Vec2,
}

impl<E: ElementSource> MeshItem<E> {
    pub fn new(element: E, plane: PlaneId, field: DisplacementField) -> Self {
        Self {
            element,
            plane,
            field,
            layout: PlaneLayout::default(),
            mouse_pos: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn element(&self) -> &E {
        &self.element
    }

    #[inline]
    pub fn plane(&self) -> PlaneId {
        self.plane
    }

    #[inline]
    pub fn field(&self) -> &DisplacementField {
        &self.field
    }

    #[inline]
    pub fn layout(&self) -> &PlaneLayout {
        &self.layout
    }

    /// Element-relative pointer position, clamped to `[0, 1]`.
    #[inline]
    pub fn mouse_pos(&self) -> Vec2 {
        self.mouse_pos
    }

    /// Re-read the element rect and refresh layout and local pointer.
    ///
    /// On a degenerate rect the previous layout is kept and the local pointer
    /// is parked on the boundary so no energy is injected.
    pub fn reconcile(
        &mut self,
        pointer: &PointerState,
        viewport: &ViewportState,
    ) -> Result<(), LayoutError> {
        let rect = self.element.bounding_rect();
        let result = PlaneLayout::from_rect(&rect, viewport).and_then(|layout| {
            let mouse = element_relative_pointer(&rect, pointer.window_pos())?;
            Ok((layout, mouse))
        });
        match result {
            Ok((layout, mouse)) => {
                self.layout = layout;
                self.mouse_pos = mouse;
                Ok(())
            }
            Err(e) => {
                self.mouse_pos = Vec2::ZERO;
                Err(e)
            }
        }
    }

    /// Decay the field and inject the pointer's current velocity.
    pub fn update_field(&mut self, pointer: &PointerState, tuning: &FieldTuning) -> usize {
        self.field.step(self.mouse_pos, pointer.velocity(), tuning)
    }

    /// Push the transform, and the field texels when they changed.
    pub fn publish<S: PlaneSink + ?Sized>(&mut self, sink: &mut S) {
        sink.set_transform(self.plane, self.layout.transform());
        if self.field.take_dirty() {
            sink.upload_field(self.plane, self.field.size(), self.field.data());
        }
    }

    /// Layout, field, publish. The field still decays when layout fails.
    pub fn update<S: PlaneSink + ?Sized>(
        &mut self,
        pointer: &PointerState,
        viewport: &ViewportState,
        tuning: &FieldTuning,
        sink: &mut S,
    ) -> Result<(), LayoutError> {
        let layout = self.reconcile(pointer, viewport);
        self.update_field(pointer, tuning);
        self.publish(sink);
        layout
    }
}
