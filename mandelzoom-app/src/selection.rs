use mandelzoom_core::PixelRect;

/// A drag-to-zoom gesture in pixel space.
///
/// Created on press, updated on every drag event, and consumed on release.
/// The free end is always snapped so the box stays square, because the
/// kernel only renders square grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    start: (i32, i32),
    end: (i32, i32),
}

impl Selection {
    pub fn press(x: i32, y: i32) -> Self {
        Self {
            start: (x, y),
            end: (x, y),
        }
    }

    /// Move the free corner toward `(x, y)`, keeping the box square.
    ///
    /// The longer side is shortened to match the shorter one; the free
    /// corner stays on the side of the press point it was dragged to.
    pub fn drag_to(&mut self, x: i32, y: i32) {
        let (sx, sy) = self.start;
        let dx = x - sx;
        let dy = y - sy;
        self.end = if dy.abs() < dx.abs() {
            (sx + dy.abs() * dx.signum(), y)
        } else {
            (x, sy + dx.abs() * dy.signum())
        };
    }

    pub fn start(&self) -> (i32, i32) {
        self.start
    }

    pub fn end(&self) -> (i32, i32) {
        self.end
    }

    /// The box currently drawn, for overlay rendering.
    pub fn rect(&self) -> PixelRect {
        PixelRect::from_corners(self.start, self.end)
    }

    /// Finish the gesture and hand back the selected box.
    pub fn release(self) -> PixelRect {
        self.rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_drag_is_narrowed() {
        let mut s = Selection::press(100, 100);
        s.drag_to(180, 130);
        assert_eq!(s.end(), (130, 130));
        let r = s.release();
        assert_eq!((r.width(), r.height()), (30, 30));
    }

    #[test]
    fn tall_drag_is_shortened() {
        let mut s = Selection::press(100, 100);
        s.drag_to(120, 190);
        assert_eq!(s.end(), (120, 120));
    }

    #[test]
    fn direction_is_preserved_in_every_quadrant() {
        for &(dx, dy) in &[(40, 25), (-40, 25), (40, -25), (-40, -25), (25, -40), (-25, 40)] {
            let mut s = Selection::press(0, 0);
            s.drag_to(dx, dy);
            let (ex, ey) = s.end();
            assert_eq!(ex.signum(), dx.signum(), "drag ({dx}, {dy})");
            assert_eq!(ey.signum(), dy.signum(), "drag ({dx}, {dy})");
            assert_eq!(ex.abs(), ey.abs(), "drag ({dx}, {dy}) not square");
        }
    }

    #[test]
    fn latest_drag_wins() {
        let mut s = Selection::press(10, 10);
        s.drag_to(50, 50);
        s.drag_to(20, 60);
        assert_eq!(s.end(), (20, 20));
    }

    #[test]
    fn upward_drag_yields_ordered_rect() {
        let mut s = Selection::press(10, 50);
        s.drag_to(30, 30);
        assert_eq!(
            s.release(),
            PixelRect {
                x0: 10,
                y0: 30,
                x1: 30,
                y1: 50
            }
        );
    }

    #[test]
    fn click_without_drag_is_empty() {
        assert!(Selection::press(5, 5).release().is_empty());
    }

    #[test]
    fn horizontal_drag_collapses_to_nothing() {
        let mut s = Selection::press(5, 5);
        s.drag_to(60, 5);
        assert!(s.rect().is_empty());
    }
}
