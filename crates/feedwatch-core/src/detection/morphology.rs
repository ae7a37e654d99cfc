use ndarray::Array2;

/// A binary structuring element, stored as offsets from its center.
#[derive(Clone, Debug)]
pub struct StructuringElement {
    offsets: Vec<(isize, isize)>,
}

impl StructuringElement {
    /// Elliptical element inscribed in a `size` x `size` box.
    ///
    /// For size 5 this is the familiar plus-shaped disk:
    /// the top and bottom rows hold only the center pixel, the middle three are full.
    pub fn ellipse(size: usize) -> Self {
        let size = size.max(1);
        let r = (size / 2) as isize;
        let mut offsets = Vec::with_capacity(size * size);

        for i in 0..size as isize {
            let dy = i - r;
            let half_width = if r == 0 {
                0
            } else {
                let t = ((r * r - dy * dy) as f64 / (r * r) as f64).max(0.0);
                (r as f64 * t.sqrt()).round() as isize
            };
            for dx in -half_width..=half_width {
                offsets.push((dy, dx));
            }
        }

        Self { offsets }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn contains(&self, dy: isize, dx: isize) -> bool {
        self.offsets.contains(&(dy, dx))
    }
}

/// Morphological opening (erosion followed by dilation).
///
/// Removes foreground specks smaller than the element while preserving larger regions.
pub fn morphological_opening(mask: &Array2<bool>, element: &StructuringElement) -> Array2<bool> {
    let eroded = erode(mask, element);
    dilate(&eroded, element)
}

/// Morphological closing (dilation followed by erosion).
///
/// Fills holes and gaps smaller than the element inside foreground regions.
pub fn morphological_closing(mask: &Array2<bool>, element: &StructuringElement) -> Array2<bool> {
    let dilated = dilate(mask, element);
    erode(&dilated, element)
}

/// Binary erosion: a pixel stays true only if every in-bounds pixel under the element is true.
///
/// Out-of-bounds neighbors are ignored so regions touching the edge do not shrink.
fn erode(mask: &Array2<bool>, element: &StructuringElement) -> Array2<bool> {
    let (h, w) = mask.dim();
    Array2::from_shape_fn((h, w), |(row, col)| {
        mask[[row, col]]
            && element.offsets.iter().all(|&(dr, dc)| {
                neighbor(row, col, dr, dc, h, w).map_or(true, |(nr, nc)| mask[[nr, nc]])
            })
    })
}

/// Binary dilation: a pixel becomes true if any in-bounds pixel under the element is true.
fn dilate(mask: &Array2<bool>, element: &StructuringElement) -> Array2<bool> {
    let (h, w) = mask.dim();
    Array2::from_shape_fn((h, w), |(row, col)| {
        element.offsets.iter().any(|&(dr, dc)| {
            neighbor(row, col, dr, dc, h, w).is_some_and(|(nr, nc)| mask[[nr, nc]])
        })
    })
}

fn neighbor(
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    h: usize,
    w: usize,
) -> Option<(usize, usize)> {
    let nr = row as isize + dr;
    let nc = col as isize + dc;
    if nr < 0 || nr >= h as isize || nc < 0 || nc >= w as isize {
        None
    } else {
        Some((nr as usize, nc as usize))
    }
}
