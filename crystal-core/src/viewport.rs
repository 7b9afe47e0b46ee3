//! Output surface dimensions
use crate::error::{Error, Result};

/// Size of the output surface in its own units (pixels, or terminal sub-cells)
///
/// Only [`Viewport::new`] builds one, so both dimensions are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            Viewport::new(0, 10),
            Err(Error::InvalidViewport { width: 0, height: 10 })
        ));
        assert!(Viewport::new(10, 0).is_err());
    }

    #[test]
    fn test_dimensions() {
        let viewport = Viewport::new(1, 3).unwrap();
        assert_eq!((viewport.width(), viewport.height()), (1, 3));
    }

    #[test]
    fn test_aspect() {
        let viewport = Viewport::new(1920, 1080).unwrap();
        assert!((viewport.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }
}
