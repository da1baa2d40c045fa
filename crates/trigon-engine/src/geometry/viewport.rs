/// Rendering viewport in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering a whole framebuffer of the given size.
    #[inline]
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clamps the viewport to a target of `target_w` x `target_h` pixels.
    ///
    /// Returns `None` when nothing of the viewport remains on the target.
    pub fn clamped_to(self, target_w: u32, target_h: u32) -> Option<Self> {
        let x = self.x.min(target_w);
        let y = self.y.min(target_h);
        let width = self.width.min(target_w - x);
        let height = self.height.min(target_h - y);
        let v = Self::new(x, y, width, height);
        if v.is_empty() { None } else { Some(v) }
    }
}
