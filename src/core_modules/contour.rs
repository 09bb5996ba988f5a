// THEORY:
// The `contour` module finds the outer boundary of every outermost connected
// foreground region in a `BinaryMask`. It implements Suzuki-Abe topological
// border following over 8-connected foreground pixels.
//
// Key architectural principles & algorithm steps:
// 1.  **Padded Label Grid**: the mask is copied into an `i32` grid with a one-pixel
//     background frame. 0 is background, 1 is unvisited foreground, and every
//     border that gets followed stamps its pixels with its own id (`nbd`), made
//     negative where the pixel's right-hand neighbour is background. The frame
//     itself is border 1 and counts as a hole.
// 2.  **Raster Scan**: a border starts where a 1-pixel has background on its left
//     (outer border) or where a positive pixel has background on its right (hole
//     border). `lnbd` remembers the last border crossed on the current row, which
//     is enough to know the parent of every new border.
// 3.  **Border Following**: from the start pixel, search its neighbours clockwise
//     for the first foreground pixel, then walk the border by searching each
//     pixel's neighbours counter-clockwise, stopping when the walk returns to the
//     start through the same first step. A pixel with no foreground neighbour is
//     a one-pixel contour.
// 4.  **Outermost Only**: holes and anything nested inside a hole are followed (their
//     labels keep the hierarchy correct) but only outer borders whose parent is
//     the frame are returned.
// 5.  **Simple Chain Approximation**: straight runs collapse to their end points. The
//     start point is kept, then only points where the step direction changes, so
//     the polygon encloses exactly the same area as the full pixel chain.
//
// Vertices are pixel centres, so a filled `s x s` square becomes the four-corner
// polygon of side `s - 1`.

pub mod contour {
    use crate::core_modules::binary_mask::binary_mask::BinaryMask;
    use crate::core_modules::candidate::candidate::Point;
    use tracing::trace;

    /// Neighbour offsets, clockwise on screen (y grows downwards), starting east.
    const NEIGHBOURS: [(i32, i32); 8] = [
        (1, 0),
        (1, 1),
        (0, 1),
        (-1, 1),
        (-1, 0),
        (-1, -1),
        (0, -1),
        (1, -1),
    ];
    const EAST: usize = 0;
    const FRAME_ID: i32 = 1;

    /// A closed polygon tracing the outer boundary of one region, in discovery order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Contour {
        pub points: Vec<Point>,
    }

    impl Contour {
        pub fn len(&self) -> usize {
            self.points.len()
        }

        pub fn is_empty(&self) -> bool {
            self.points.is_empty()
        }
    }

    #[derive(Debug, Clone, Copy)]
    struct Border {
        is_hole: bool,
        parent: i32,
    }

    /// Label grid with a one-pixel background frame around the mask.
    struct LabelGrid {
        labels: Vec<i32>,
        stride: i32,
    }

    impl LabelGrid {
        fn from_mask(mask: &BinaryMask) -> Self {
            let (width, height) = mask.dimensions();
            let stride = width as i32 + 2;
            let mut labels = vec![0i32; stride as usize * (height as usize + 2)];
            for (x, y, value) in mask.as_gray().enumerate_pixels() {
                if value.0[0] != 0 {
                    labels[((y as i32 + 1) * stride + x as i32 + 1) as usize] = 1;
                }
            }
            Self { labels, stride }
        }

        #[inline]
        fn get(&self, p: Point) -> i32 {
            self.labels[(p.y * self.stride + p.x) as usize]
        }

        #[inline]
        fn set(&mut self, p: Point, value: i32) {
            self.labels[(p.y * self.stride + p.x) as usize] = value;
        }
    }

    #[inline]
    fn step(p: Point, direction: usize) -> Point {
        let (dx, dy) = NEIGHBOURS[direction];
        Point::new(p.x + dx, p.y + dy)
    }

    #[inline]
    fn direction_between(from: Point, to: Point) -> usize {
        let delta = (to.x - from.x, to.y - from.y);
        NEIGHBOURS.iter().position(|&d| d == delta).unwrap_or(EAST)
    }

    /// Follows one border starting at `start`, entered from the background pixel
    /// `outside`. Returns every visited pixel (padded coordinates) in walk order.
    fn follow_border(grid: &mut LabelGrid, start: Point, outside: Point, nbd: i32) -> Vec<Point> {
        let entry = direction_between(start, outside);
        let first = (0..8)
            .map(|k| step(start, (entry + k) % 8))
            .find(|&p| grid.get(p) != 0);

        let Some(first) = first else {
            grid.set(start, -nbd);
            return vec![start];
        };

        let mut points = vec![start];
        let mut previous = first;
        let mut current = start;
        loop {
            let back = direction_between(current, previous);
            let mut east_is_background = false;
            let mut next = previous;
            for k in 1..=8 {
                let direction = (back + 8 - k) % 8;
                let candidate = step(current, direction);
                if grid.get(candidate) != 0 {
                    next = candidate;
                    break;
                }
                if direction == EAST {
                    east_is_background = true;
                }
            }

            if east_is_background {
                grid.set(current, -nbd);
            } else if grid.get(current) == 1 {
                grid.set(current, nbd);
            }

            if next == start && current == first {
                break;
            }
            previous = current;
            current = next;
            points.push(current);
        }
        points
    }

    /// Keeps the first point and every point where the step direction changes.
    pub fn approximate_simple(chain: &[Point]) -> Vec<Point> {
        let n = chain.len();
        if n <= 2 {
            return chain.to_vec();
        }
        let delta = |a: Point, b: Point| (b.x - a.x, b.y - a.y);

        let mut vertices = Vec::with_capacity(n);
        vertices.push(chain[0]);
        for i in 1..n {
            let incoming = delta(chain[i - 1], chain[i]);
            let outgoing = delta(chain[i], chain[(i + 1) % n]);
            if incoming != outgoing {
                vertices.push(chain[i]);
            }
        }
        vertices
    }

    /// Traces the outer contours of all outermost 8-connected foreground regions,
    /// in raster order of each contour's first pixel.
    pub fn find_external_contours(mask: &BinaryMask) -> Vec<Contour> {
        let (width, height) = mask.dimensions();
        let mut grid = LabelGrid::from_mask(mask);

        // Index 0 is unused so that border ids index the table directly.
        let frame = Border {
            is_hole: true,
            parent: 0,
        };
        let mut borders = vec![frame, frame];
        let mut nbd = FRAME_ID;
        let mut contours = Vec::new();

        for y in 1..=height as i32 {
            let mut lnbd = FRAME_ID;
            for x in 1..=width as i32 {
                let here = Point::new(x, y);
                let value = grid.get(here);
                if value == 0 {
                    continue;
                }

                let left = Point::new(x - 1, y);
                let right = Point::new(x + 1, y);
                let start = if value == 1 && grid.get(left) == 0 {
                    Some((false, left))
                } else if value >= 1 && grid.get(right) == 0 {
                    if value > 1 {
                        lnbd = value;
                    }
                    Some((true, right))
                } else {
                    None
                };

                if let Some((is_hole, outside)) = start {
                    nbd += 1;
                    let last = borders[lnbd as usize];
                    let parent = if is_hole == last.is_hole {
                        last.parent
                    } else {
                        lnbd
                    };
                    borders.push(Border { is_hole, parent });

                    let chain = follow_border(&mut grid, here, outside, nbd);
                    if !is_hole && parent == FRAME_ID {
                        let points: Vec<Point> = approximate_simple(&chain)
                            .into_iter()
                            .map(|p| Point::new(p.x - 1, p.y - 1))
                            .collect();
                        trace!(id = nbd, vertices = points.len(), "traced outer contour");
                        contours.push(Contour { points });
                    }
                }

                let value = grid.get(here);
                if value != 1 {
                    lnbd = value.abs();
                }
            }
        }
        contours
    }
}

#[cfg(test)]
mod tests {
    use super::contour::*;
    use crate::core_modules::binary_mask::binary_mask::BinaryMask;
    use crate::core_modules::candidate::candidate::Point;
    use image::{GrayImage, Luma};

    fn mask_from_rows(rows: &[&str]) -> BinaryMask {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let gray = GrayImage::from_fn(width, height, |x, y| {
            if rows[y as usize].as_bytes()[x as usize] == b'#' {
                Luma([255])
            } else {
                Luma([0])
            }
        });
        BinaryMask::from_gray(&gray).unwrap()
    }

    fn sorted(points: &[Point]) -> Vec<(i32, i32)> {
        let mut v: Vec<(i32, i32)> = points.iter().map(|p| (p.x, p.y)).collect();
        v.sort();
        v
    }

    #[test]
    fn empty_mask_has_no_contours() {
        let mask = mask_from_rows(&["....", "....", "...."]);
        assert!(find_external_contours(&mask).is_empty());
    }

    #[test]
    fn filled_square_collapses_to_corners() {
        let mask = mask_from_rows(&[
            "......",
            ".####.",
            ".####.",
            ".####.",
            ".####.",
            "......",
        ]);
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].points[0], Point::new(1, 1));
        assert_eq!(
            sorted(&contours[0].points),
            vec![(1, 1), (1, 4), (4, 1), (4, 4)]
        );
    }

    #[test]
    fn single_pixel_is_one_point() {
        let mask = mask_from_rows(&["...", ".#.", "..."]);
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].points, vec![Point::new(1, 1)]);
    }

    #[test]
    fn horizontal_pair_is_two_points() {
        let mask = mask_from_rows(&["##"]);
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].points, vec![Point::new(0, 0), Point::new(1, 0)]);
    }

    #[test]
    fn diagonal_pixels_are_one_region() {
        let mask = mask_from_rows(&["#..", ".#.", "..#"]);
        assert_eq!(find_external_contours(&mask).len(), 1);
    }

    #[test]
    fn separate_regions_in_raster_order() {
        let mask = mask_from_rows(&[
            "......##",
            "##....##",
            "##......",
            "........",
            "...##...",
        ]);
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 3);
        assert_eq!(contours[0].points[0], Point::new(6, 0));
        assert_eq!(contours[1].points[0], Point::new(0, 1));
        assert_eq!(contours[2].points[0], Point::new(3, 4));
    }

    #[test]
    fn ring_reports_only_outer_border() {
        let mask = mask_from_rows(&[
            "#####",
            "#...#",
            "#...#",
            "#...#",
            "#####",
        ]);
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(
            sorted(&contours[0].points),
            vec![(0, 0), (0, 4), (4, 0), (4, 4)]
        );
    }

    #[test]
    fn island_inside_hole_is_not_reported() {
        let mask = mask_from_rows(&[
            "#######",
            "#.....#",
            "#.....#",
            "#..#..#",
            "#.....#",
            "#.....#",
            "#######",
            ".......",
            "##.....",
        ]);
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].points[0], Point::new(0, 0));
        assert_eq!(contours[1].points[0], Point::new(0, 8));
    }

    #[test]
    fn regions_touching_the_edge_are_traced() {
        let mask = mask_from_rows(&["###", "###"]);
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(
            sorted(&contours[0].points),
            vec![(0, 0), (0, 1), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn chain_approximation_drops_collinear_points() {
        let chain = [
            Point::new(0, 0),
            Point::new(0, 1),
            Point::new(0, 2),
            Point::new(1, 2),
            Point::new(2, 2),
            Point::new(2, 1),
            Point::new(2, 0),
            Point::new(1, 0),
        ];
        assert_eq!(
            approximate_simple(&chain),
            vec![
                Point::new(0, 0),
                Point::new(0, 2),
                Point::new(2, 2),
                Point::new(2, 0)
            ]
        );
    }
}
