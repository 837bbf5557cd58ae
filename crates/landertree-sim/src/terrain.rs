use serde::{Deserialize, Serialize};

/// A mountain peak as three `(x, y)` corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle(pub [(f64, f64); 3]);

impl Triangle {
    pub fn new(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Self {
        Triangle([a, b, c])
    }

    /// Barycentric point test. Points on an edge are outside.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let [(x1, y1), (x2, y2), (x3, y3)] = self.0;

        let area = 0.5 * (-y2 * x3 + y1 * (-x2 + x3) + x1 * (y2 - y3) + x2 * y3);
        if area == 0.0 {
            return false;
        }

        let s = 1.0 / (2.0 * area) * (y1 * x3 - x1 * y3 + (y3 - y1) * px + (x1 - x3) * py);
        let t = 1.0 / (2.0 * area) * (x1 * y2 - y1 * x2 + (y1 - y2) * px + (x2 - x1) * py);

        s > 0.0 && t > 0.0 && (s + t) < 1.0
    }
}

/// Peaks around the landing pad.
pub fn default_peaks() -> Vec<Triangle> {
    vec![
        // left of the pad
        Triangle::new((0.0, 500.0), (100.0, 400.0), (200.0, 500.0)),
        Triangle::new((200.0, 500.0), (250.0, 450.0), (300.0, 500.0)),
        // right of the pad
        Triangle::new((500.0, 500.0), (550.0, 470.0), (600.0, 500.0)),
        Triangle::new((600.0, 500.0), (700.0, 450.0), (800.0, 500.0)),
        Triangle::new((800.0, 500.0), (900.0, 400.0), (1000.0, 500.0)),
        Triangle::new((1000.0, 500.0), (1050.0, 480.0), (1100.0, 500.0)),
    ]
}

/// True if the point lies inside any peak.
pub fn collides(peaks: &[Triangle], x: f64, y: f64) -> bool {
    peaks.iter().any(|peak| peak.contains(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_interior_and_outside() {
        let peak = Triangle::new((0.0, 500.0), (100.0, 400.0), (200.0, 500.0));
        assert!(peak.contains(100.0, 450.0));
        assert!(!peak.contains(100.0, 350.0));
        assert!(!peak.contains(250.0, 490.0));
    }

    #[test]
    fn edges_do_not_collide() {
        let peak = Triangle::new((0.0, 500.0), (100.0, 400.0), (200.0, 500.0));
        assert!(!peak.contains(100.0, 500.0));
        assert!(!peak.contains(0.0, 500.0));
    }

    #[test]
    fn landing_pad_is_clear() {
        let peaks = default_peaks();
        for x in [300.0, 350.0, 400.0, 450.0, 500.0] {
            assert!(!collides(&peaks, x, 499.0));
        }
        assert!(collides(&peaks, 700.0, 480.0));
    }

    #[test]
    fn degenerate_triangle_contains_nothing() {
        let flat = Triangle::new((0.0, 0.0), (1.0, 0.0), (2.0, 0.0));
        assert!(!flat.contains(1.0, 0.0));
    }
}
