//! Shared pixel claiming for parallel rendering.
//!
//! Workers pull pixels one at a time from a single atomic cursor, so every
//! pixel of the image is handed out exactly once, in row-major order.

use std::sync::atomic::{AtomicUsize, Ordering};

/// A pixel position in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub column: u32,
    pub row: u32,
}

impl Pixel {
    /// Index of this pixel in row-major order.
    pub fn index(&self, width: u32) -> usize {
        self.row as usize * width as usize + self.column as usize
    }
}

/// Hands out the pixels of a `width` x `height` image.
#[derive(Debug)]
pub struct PixelCursor {
    width: u32,
    total: usize,
    next: AtomicUsize,
    /// Pixels between progress log lines (0 disables them)
    progress_interval: usize,
}

impl PixelCursor {
    /// Create a cursor logging progress every `progress_step` percent.
    pub fn new(width: u32, height: u32, progress_step: u32) -> Self {
        let total = width as usize * height as usize;
        let progress_interval = if progress_step == 0 {
            0
        } else {
            (total * progress_step.min(100) as usize / 100).max(1)
        };
        Self {
            width,
            total,
            next: AtomicUsize::new(0),
            progress_interval,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Claim the next unrendered pixel, or `None` once all are claimed.
    pub fn next_pixel(&self) -> Option<Pixel> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        if index >= self.total {
            return None;
        }

        if self.progress_interval > 0 && index > 0 && index % self.progress_interval == 0 {
            log::debug!("Rendering: {:.0}%", index as f64 * 100.0 / self.total as f64);
        }

        let width = self.width as usize;
        Some(Pixel {
            column: (index % width) as u32,
            row: (index / width) as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_sequential_order() {
        let cursor = PixelCursor::new(3, 2, 10);
        let pixels: Vec<Pixel> = std::iter::from_fn(|| cursor.next_pixel()).collect();

        assert_eq!(pixels.len(), 6);
        assert_eq!(pixels[0], Pixel { column: 0, row: 0 });
        assert_eq!(pixels[2], Pixel { column: 2, row: 0 });
        assert_eq!(pixels[3], Pixel { column: 0, row: 1 });
        assert_eq!(pixels[5].index(3), 5);

        // Exhausted stays exhausted
        assert!(cursor.next_pixel().is_none());
        assert!(cursor.next_pixel().is_none());
    }

    #[test]
    fn test_empty_image() {
        let cursor = PixelCursor::new(0, 10, 10);
        assert_eq!(cursor.total(), 0);
        assert!(cursor.next_pixel().is_none());
    }

    #[test]
    fn test_concurrent_claims_are_unique() {
        let cursor = Arc::new(PixelCursor::new(64, 48, 0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cursor = Arc::clone(&cursor);
                std::thread::spawn(move || {
                    std::iter::from_fn(|| cursor.next_pixel()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for pixel in handle.join().unwrap() {
                assert!(seen.insert(pixel.index(64)), "pixel claimed twice: {pixel:?}");
            }
        }
        assert_eq!(seen.len(), 64 * 48);
    }
}
