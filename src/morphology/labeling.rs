//! Connected-component labeling of binary masks
//!
//! Components are grown with 4-connectivity: pixels sharing an edge merge,
//! diagonal neighbours stay separate. Labels are assigned in raster order of
//! each component's first pixel, starting at 1; 0 marks background.

use bitvec::prelude::*;
use ndarray::Array2;
use std::collections::VecDeque;

const EDGE_NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Labeled view of a binary mask
#[derive(Debug, Clone)]
pub struct Components {
    labels: Array2<usize>,
    regions: Vec<Vec<[usize; 2]>>,
}

impl Components {
    /// Label every 4-connected foreground region of `mask`
    pub fn label(mask: &Array2<bool>) -> Self {
        let (rows, cols) = mask.dim();
        let mut labels = Array2::zeros((rows, cols));
        let mut visited = bitvec![0; rows * cols];
        let mut regions = Vec::new();
        let mut queue = VecDeque::new();

        for ((row, col), &set) in mask.indexed_iter() {
            if !set || visited.get(row * cols + col).as_deref() == Some(&true) {
                continue;
            }

            let label = regions.len() + 1;
            let mut pixels = Vec::new();
            visited.set(row * cols + col, true);
            queue.push_back([row, col]);

            while let Some([r, c]) = queue.pop_front() {
                if let Some(slot) = labels.get_mut([r, c]) {
                    *slot = label;
                }
                pixels.push([r, c]);

                for (dr, dc) in EDGE_NEIGHBOURS {
                    let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc))
                    else {
                        continue;
                    };
                    if nr >= rows || nc >= cols {
                        continue;
                    }
                    let index = nr * cols + nc;
                    let foreground = mask.get([nr, nc]).copied().unwrap_or(false);
                    if foreground && visited.get(index).as_deref() == Some(&false) {
                        visited.set(index, true);
                        queue.push_back([nr, nc]);
                    }
                }
            }

            regions.push(pixels);
        }

        Self { labels, regions }
    }

    /// Number of distinct components
    pub fn count(&self) -> usize {
        self.regions.len()
    }

    /// Label grid (0 = background)
    pub const fn labels(&self) -> &Array2<usize> {
        &self.labels
    }

    /// Pixel coordinates `[row, col]` of every component, in label order
    pub fn regions(&self) -> &[Vec<[usize; 2]>] {
        &self.regions
    }

    /// Pixel count of every component, in label order
    pub fn sizes(&self) -> Vec<usize> {
        self.regions.iter().map(Vec::len).collect()
    }

    /// New mask keeping only components with at least `min_size` pixels
    pub fn retain_min_size(&self, min_size: usize) -> Array2<bool> {
        let mut kept = Array2::from_elem(self.labels.dim(), false);
        for pixels in self.regions.iter().filter(|pixels| pixels.len() >= min_size) {
            for &[row, col] in pixels {
                if let Some(slot) = kept.get_mut([row, col]) {
                    *slot = true;
                }
            }
        }
        kept
    }
}
