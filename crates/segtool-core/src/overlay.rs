use ndarray::Array2;

use crate::mask::Label;

/// Staging buffer for uncommitted brush edits.
///
/// Same dimensions as the label mask. `None` means "no pending edit at this
/// pixel". Overlapping paints and erases are last-write-wins by call order:
/// edits arrive as a dense stream of small motion-interpolated disks during a
/// drag gesture, not as one shape.
#[derive(Clone, Debug, PartialEq)]
pub struct BrushOverlay {
    pub data: Array2<Option<Label>>,
}

impl BrushOverlay {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: Array2::from_elem((height, width), None),
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Set every cell back to unset.
    pub fn clear(&mut self) {
        self.data.fill(None);
    }

    /// True when no cell holds a pending edit.
    pub fn is_clear(&self) -> bool {
        self.data.iter().all(|cell| cell.is_none())
    }

    /// Stamp a Euclidean disk of `label` centered at `center` (image coords).
    pub fn paint(&mut self, center: (f32, f32), radius: f32, label: Label) {
        self.set_disk(center, radius, Some(label));
    }

    /// Unset every cell within the disk.
    pub fn erase(&mut self, center: (f32, f32), radius: f32) {
        self.set_disk(center, radius, None);
    }

    fn set_disk(&mut self, center: (f32, f32), radius: f32, value: Option<Label>) {
        let (h, w) = self.data.dim();
        let (cx, cy) = center;
        let r = radius.max(0.0);

        let row_min = ((cy - r).floor().max(0.0)) as usize;
        let row_max = ((cy + r).ceil().min(h as f32 - 1.0)).max(0.0) as usize;
        let col_min = ((cx - r).floor().max(0.0)) as usize;
        let col_max = ((cx + r).ceil().min(w as f32 - 1.0)).max(0.0) as usize;

        if h == 0 || w == 0 || cy + r < 0.0 || cx + r < 0.0 {
            return;
        }

        for row in row_min..=row_max {
            for col in col_min..=col_max {
                let dx = col as f32 - cx;
                let dy = row as f32 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.data[[row, col]] = value;
                }
            }
        }
    }
}
