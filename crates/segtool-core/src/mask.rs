use ndarray::Array2;

/// Per-pixel segmentation label.
///
/// The numeric codes are the on-disk resume format and must not change:
/// foreground labels are exactly those with an odd code.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    DefiniteBackground = 0,
    DefiniteForeground = 1,
    ProbableBackground = 2,
    ProbableForeground = 3,
}

impl Label {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Label> {
        match code {
            0 => Some(Label::DefiniteBackground),
            1 => Some(Label::DefiniteForeground),
            2 => Some(Label::ProbableBackground),
            3 => Some(Label::ProbableForeground),
            _ => None,
        }
    }

    /// Binary view of the label. Odd codes are foreground.
    pub fn is_foreground(self) -> bool {
        self.code() & 1 == 1
    }

    pub fn is_probable(self) -> bool {
        matches!(self, Label::ProbableBackground | Label::ProbableForeground)
    }
}

/// A 4-level label mask with one cell per image pixel.
/// Shape = (height, width), row-major, always equal to the source image.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelMask {
    pub data: Array2<Label>,
}

impl LabelMask {
    /// All-background mask of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: Array2::from_elem((height, width), Label::DefiniteBackground),
        }
    }

    pub fn from_labels(data: Array2<Label>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Derived binary view: true where the label is foreground.
    pub fn binary_view(&self) -> Array2<bool> {
        self.data.map(|l| l.is_foreground())
    }
}
