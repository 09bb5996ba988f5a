// THEORY:
// The `moment` module turns a closed contour polygon into the three spatial
// moments the detector needs: `m00` (area), `m10` and `m01` (area-weighted x and
// y sums). They are computed exactly from the polygon vertices with Green's
// theorem, so a contour with a handful of corner vertices costs a handful of
// multiplications no matter how large the region is.
//
// For each edge (p, q) of the polygon, with c = p.x * q.y - q.x * p.y:
//     m00 = 1/2 * sum(c)
//     m10 = 1/6 * sum(c * (p.x + q.x))
//     m01 = 1/6 * sum(c * (p.y + q.y))
// The sign of the sums depends on the tracing direction. The moments are
// normalized so that `m00 >= 0`; the centroid ratio is unaffected either way.

pub mod moment {
    use crate::core_modules::candidate::candidate::Point;

    /// Below this mass a region is treated as degenerate and has no centroid.
    pub const MIN_MASS: f64 = 1e-9;

    /// Zeroth and first order spatial moments of a polygon.
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct Moments {
        pub m00: f64,
        pub m10: f64,
        pub m01: f64,
    }

    impl Moments {
        /// Moments of the closed polygon through `vertices` (last vertex joins the first).
        pub fn of_polygon(vertices: &[Point]) -> Self {
            if vertices.len() < 3 {
                return Self::default();
            }

            let mut a00 = 0.0_f64;
            let mut a10 = 0.0_f64;
            let mut a01 = 0.0_f64;
            let closing = vertices.iter().skip(1).chain(vertices.iter().take(1));
            for (p, q) in vertices.iter().zip(closing) {
                let (px, py) = (p.x as f64, p.y as f64);
                let (qx, qy) = (q.x as f64, q.y as f64);
                let cross = px * qy - qx * py;
                a00 += cross;
                a10 += cross * (px + qx);
                a01 += cross * (py + qy);
            }

            let sign = if a00 < 0.0 { -1.0 } else { 1.0 };
            Self {
                m00: sign * a00 / 2.0,
                m10: sign * a10 / 6.0,
                m01: sign * a01 / 6.0,
            }
        }

        /// Centroid truncated toward zero, or `None` for a massless polygon.
        pub fn centroid(&self) -> Option<Point> {
            if self.m00.abs() < MIN_MASS {
                return None;
            }
            Some(Point::new(
                (self.m10 / self.m00) as i32,
                (self.m01 / self.m00) as i32,
            ))
        }
    }

    /// Unsigned shoelace area of the closed polygon through `vertices`.
    pub fn polygon_area(vertices: &[Point]) -> f64 {
        Moments::of_polygon(vertices).m00
    }
}

#[cfg(test)]
mod tests {
    use super::moment::*;
    use crate::core_modules::candidate::candidate::Point;

    fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x0, y1),
            Point::new(x1, y1),
            Point::new(x1, y0),
        ]
    }

    #[test]
    fn rectangle_moments() {
        let m = Moments::of_polygon(&rect(10, 20, 14, 22));
        assert_eq!(m.m00, 8.0);
        // centroid (12, 21)
        assert!((m.m10 / m.m00 - 12.0).abs() < 1e-12);
        assert!((m.m01 / m.m00 - 21.0).abs() < 1e-12);
        assert_eq!(m.centroid(), Some(Point::new(12, 21)));
    }

    #[test]
    fn orientation_does_not_change_result() {
        let forward = rect(3, 3, 8, 10);
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(Moments::of_polygon(&forward), Moments::of_polygon(&backward));
        assert!(polygon_area(&backward) > 0.0);
    }

    #[test]
    fn centroid_truncates_toward_zero() {
        // 0..3 square has centroid 1.5
        let m = Moments::of_polygon(&rect(0, 0, 3, 3));
        assert_eq!(m.centroid(), Some(Point::new(1, 1)));
    }

    #[test]
    fn degenerate_polygons_have_no_centroid() {
        assert_eq!(Moments::of_polygon(&[]).centroid(), None);
        assert_eq!(Moments::of_polygon(&[Point::new(4, 4)]).centroid(), None);
        let line = [Point::new(0, 0), Point::new(5, 0), Point::new(9, 0)];
        assert_eq!(polygon_area(&line), 0.0);
        assert_eq!(Moments::of_polygon(&line).centroid(), None);
    }

    #[test]
    fn triangle_area() {
        let tri = [Point::new(0, 0), Point::new(4, 0), Point::new(0, 3)];
        assert_eq!(polygon_area(&tri), 6.0);
    }
}
