//! Shape generation for 2D primitives
//!
//! Builders append into a shared vertex list in game coordinates; the
//! pipeline maps game space to NDC when the frame is drawn.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, with_alpha};

/// Append a solid axis-aligned rectangle
pub fn push_rect(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    let (x2, y2) = (x + w, y + h);
    out.push(Vertex::new(x, y, color));
    out.push(Vertex::new(x2, y, color));
    out.push(Vertex::new(x, y2, color));

    out.push(Vertex::new(x, y2, color));
    out.push(Vertex::new(x2, y, color));
    out.push(Vertex::new(x2, y2, color));
}

/// Append a rectangle with a vertical color gradient (top color fading into
/// bottom color). Used for skies and glow strips.
pub fn push_rect_gradient(
    out: &mut Vec<Vertex>,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    top: [f32; 4],
    bottom: [f32; 4],
) {
    let (x2, y2) = (x + w, y + h);
    out.push(Vertex::new(x, y, top));
    out.push(Vertex::new(x2, y, top));
    out.push(Vertex::new(x, y2, bottom));

    out.push(Vertex::new(x, y2, bottom));
    out.push(Vertex::new(x2, y, top));
    out.push(Vertex::new(x2, y2, bottom));
}

/// Append a single triangle
pub fn push_tri(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Append a filled circle as a triangle fan
pub fn push_circle(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Append a filled circle whose color fades vertically from `top` at the
/// disc's top edge to `bottom` at its bottom edge.
pub fn push_circle_gradient(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    top: [f32; 4],
    bottom: [f32; 4],
    segments: u32,
) {
    let shade = |y: f32| {
        let t = ((y - (center.y - radius)) / (2.0 * radius)).clamp(0.0, 1.0);
        [
            top[0] + (bottom[0] - top[0]) * t,
            top[1] + (bottom[1] - top[1]) * t,
            top[2] + (bottom[2] - top[2]) * t,
            top[3] + (bottom[3] - top[3]) * t,
        ]
    };

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let p1 = center + radius * Vec2::new(theta1.cos(), theta1.sin());
        let p2 = center + radius * Vec2::new(theta2.cos(), theta2.sin());

        out.push(Vertex::new(center.x, center.y, shade(center.y)));
        out.push(Vertex::new(p1.x, p1.y, shade(p1.y)));
        out.push(Vertex::new(p2.x, p2.y, shade(p2.y)));
    }
}

/// Append ghost rectangles for the runner trail, oldest faintest.
///
/// `samples` are screen-space top-left corners, oldest first.
pub fn push_trail(
    out: &mut Vec<Vertex>,
    samples: &[Vec2],
    w: f32,
    h: f32,
    color: [f32; 4],
    max_alpha: f32,
) {
    let len = samples.len() as f32;
    for (i, sample) in samples.iter().enumerate() {
        let age = (i + 1) as f32 / len;
        push_rect(
            out,
            sample.x,
            sample.y,
            w,
            h,
            with_alpha(color, age * max_alpha),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_is_two_triangles() {
        let mut out = Vec::new();
        push_rect(&mut out, 10.0, 20.0, 30.0, 40.0, [1.0; 4]);
        assert_eq!(out.len(), 6);

        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().all(|&x| x == 10.0 || x == 40.0));
        assert!(ys.iter().all(|&y| y == 20.0 || y == 60.0));
    }

    #[test]
    fn test_gradient_rect_colors_by_row() {
        let mut out = Vec::new();
        push_rect_gradient(&mut out, 0.0, 0.0, 10.0, 10.0, [1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]);
        for v in &out {
            if v.position[1] == 0.0 {
                assert_eq!(v.color, [1.0, 0.0, 0.0, 1.0]);
            } else {
                assert_eq!(v.color, [0.0, 0.0, 1.0, 1.0]);
            }
        }
    }

    #[test]
    fn test_circle_vertex_count() {
        let mut out = Vec::new();
        push_circle(&mut out, Vec2::ZERO, 5.0, [1.0; 4], 16);
        assert_eq!(out.len(), 16 * 3);
    }

    #[test]
    fn test_gradient_circle_shades_by_height() {
        let mut out = Vec::new();
        push_circle_gradient(
            &mut out,
            Vec2::new(0.0, 0.0),
            10.0,
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
            32,
        );
        assert_eq!(out.len(), 32 * 3);
        for v in &out {
            if v.position[1] < -9.9 {
                assert!(v.color[0] > 0.9);
            }
            if v.position[1] > 9.9 {
                assert!(v.color[2] > 0.9);
            }
        }
    }

    #[test]
    fn test_trail_fades_with_age() {
        let mut out = Vec::new();
        let samples = vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0)];
        push_trail(&mut out, &samples, 30.0, 48.0, [0.0, 1.0, 1.0, 1.0], 0.5);
        assert_eq!(out.len(), 18);
        // Oldest ghost is the faintest, newest the strongest.
        assert!(out[0].color[3] < out[12].color[3]);
        assert_eq!(out[12].color[3], 0.5);
    }
}
