//! Tests for binary erosion, dilation, opening and closing

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use slicescan::morphology::binary::{close, count, dilate, erode, open};

    fn square(size: usize, start: usize, side: usize) -> Array2<bool> {
        Array2::from_shape_fn((size, size), |(r, c)| {
            (start..start + side).contains(&r) && (start..start + side).contains(&c)
        })
    }

    // Tests erosion of a square removes its one-pixel outline
    // Verified by using a 3x3 block element instead of the cross
    #[test]
    fn test_erode_square_shrinks_by_one() {
        let mask = square(9, 2, 5);
        let eroded = erode(&mask, 1);

        assert_eq!(eroded, square(9, 3, 3));
    }

    // Tests dilation of a single pixel produces the cross element
    // Verified by adding diagonal offsets to the element
    #[test]
    fn test_dilate_single_pixel_is_cross() {
        let mut mask = Array2::from_elem((5, 5), false);
        mask[[2, 2]] = true;

        let dilated = dilate(&mask, 1);

        assert_eq!(count(&dilated), 5);
        assert!(dilated[[1, 2]] && dilated[[3, 2]] && dilated[[2, 1]] && dilated[[2, 3]]);
        assert!(!dilated[[1, 1]]);
    }

    // Tests pixels outside the grid count as background during erosion
    // Verified by treating out-of-bounds neighbours as foreground
    #[test]
    fn test_erode_full_grid_loses_border() {
        let mask = Array2::from_elem((4, 4), true);
        let eroded = erode(&mask, 1);

        assert_eq!(count(&eroded), 4);
        assert!(!eroded[[0, 0]]);
        assert!(eroded[[1, 1]]);
    }

    // Tests opening removes isolated speckle but keeps larger blobs
    // Verified by swapping the order of erosion and dilation
    #[test]
    fn test_open_removes_speckle() {
        let mut mask = square(12, 3, 6);
        mask[[0, 11]] = true;

        let opened = open(&mask, 1);

        assert!(!opened[[0, 11]]);
        assert!(opened[[5, 5]]);
    }

    // Tests closing fills a one-pixel hole
    // Verified by returning the dilated mask without eroding back
    #[test]
    fn test_close_fills_hole() {
        let mut mask = square(9, 2, 5);
        mask[[4, 4]] = false;

        let closed = close(&mask, 1);

        assert!(closed[[4, 4]]);
        assert_eq!(closed, square(9, 2, 5));
    }

    // Tests zero iterations leave the mask untouched
    // Verified by forcing at least one pass
    #[test]
    fn test_zero_iterations_identity() {
        let mask = square(6, 1, 3);
        assert_eq!(erode(&mask, 0), mask);
        assert_eq!(dilate(&mask, 0), mask);
    }
}
