//! Shape generation for 3D primitives
//!
//! Every function returns a triangle list, except `laser` which returns a
//! two-vertex line.

use glam::{Mat4, Vec3};

use super::vertex::{Vertex, colors};
use crate::consts::GROUND_Y;

/// Half extent of a ground segment on x and z
pub const GROUND_HALF_EXTENT: f32 = 10.0;
/// Half extent of the sky cube
pub const SKYBOX_HALF_EXTENT: f32 = 50.0;

fn tri(out: &mut Vec<Vertex>, a: Vec3, b: Vec3, c: Vec3, color: [f32; 4]) {
    out.push(Vertex::at(a, color));
    out.push(Vertex::at(b, color));
    out.push(Vertex::at(c, color));
}

fn quad(out: &mut Vec<Vertex>, a: Vec3, b: Vec3, c: Vec3, d: Vec3, color: [f32; 4]) {
    tri(out, a, b, c, color);
    tri(out, a, c, d, color);
}

/// Axis-aligned box spanning `min..max`
pub fn aabb(min: Vec3, max: Vec3, color: [f32; 4]) -> Vec<Vertex> {
    let corner = |x: bool, y: bool, z: bool| {
        Vec3::new(
            if x { max.x } else { min.x },
            if y { max.y } else { min.y },
            if z { max.z } else { min.z },
        )
    };
    let mut out = Vec::with_capacity(36);
    // -z, +z
    quad(&mut out, corner(false, false, false), corner(true, false, false), corner(true, true, false), corner(false, true, false), color);
    quad(&mut out, corner(false, false, true), corner(false, true, true), corner(true, true, true), corner(true, false, true), color);
    // -x, +x
    quad(&mut out, corner(false, false, false), corner(false, true, false), corner(false, true, true), corner(false, false, true), color);
    quad(&mut out, corner(true, false, false), corner(true, false, true), corner(true, true, true), corner(true, true, false), color);
    // -y, +y
    quad(&mut out, corner(false, false, false), corner(false, false, true), corner(true, false, true), corner(true, false, false), color);
    quad(&mut out, corner(false, true, false), corner(true, true, false), corner(true, true, true), corner(false, true, true), color);
    out
}

/// Cube centered at `center` with half extent `half`
pub fn cube(center: Vec3, half: f32, color: [f32; 4]) -> Vec<Vertex> {
    aabb(center - Vec3::splat(half), center + Vec3::splat(half), color)
}

/// Open-bottomed sky cube: four walls fading from `SKY_TOP` down to
/// `SKY_BOTTOM`, and a flat `SKY_TOP` ceiling. Drawn before everything else.
pub fn skybox() -> Vec<Vertex> {
    let e = SKYBOX_HALF_EXTENT;
    let (top, bottom) = (colors::SKY_TOP, colors::SKY_BOTTOM);
    let corners = [(-e, -e), (e, -e), (e, e), (-e, e)];
    let mut out = Vec::with_capacity(30);

    for (i, &(ax, az)) in corners.iter().enumerate() {
        let (bx, bz) = corners[(i + 1) % corners.len()];
        let a_hi = Vertex::new(ax, e, az, top);
        let b_hi = Vertex::new(bx, e, bz, top);
        let b_lo = Vertex::new(bx, -e, bz, bottom);
        let a_lo = Vertex::new(ax, -e, az, bottom);
        out.extend([a_hi, b_hi, b_lo, a_hi, b_lo, a_lo]);
    }

    quad(
        &mut out,
        Vec3::new(-e, e, -e),
        Vec3::new(e, e, -e),
        Vec3::new(e, e, e),
        Vec3::new(-e, e, e),
        top,
    );
    out
}

/// Ground quad of one terrain segment scrolled to `z_offset`
pub fn ground(z_offset: f32) -> Vec<Vertex> {
    let e = GROUND_HALF_EXTENT;
    let mut out = Vec::with_capacity(6);
    quad(
        &mut out,
        Vec3::new(-e, GROUND_Y, z_offset - e),
        Vec3::new(e, GROUND_Y, z_offset - e),
        Vec3::new(e, GROUND_Y, z_offset + e),
        Vec3::new(-e, GROUND_Y, z_offset + e),
        colors::GROUND,
    );
    out
}

/// Square pyramid standing on `base`
pub fn hill(base: Vec3, size: f32) -> Vec<Vertex> {
    let c = |x: f32, z: f32| base + Vec3::new(x * size, 0.0, z * size);
    let peak = base + Vec3::new(0.0, size, 0.0);
    let color = colors::HILL;
    let mut out = Vec::with_capacity(18);
    quad(&mut out, c(-1.0, -1.0), c(1.0, -1.0), c(1.0, 1.0), c(-1.0, 1.0), color);
    tri(&mut out, c(-1.0, -1.0), c(1.0, -1.0), peak, color);
    tri(&mut out, c(1.0, -1.0), c(1.0, 1.0), peak, color);
    tri(&mut out, c(1.0, 1.0), c(-1.0, 1.0), peak, color);
    tri(&mut out, c(-1.0, 1.0), c(-1.0, -1.0), peak, color);
    out
}

/// Trunk box with a four-sided cone of foliage on top
pub fn tree(base: Vec3) -> Vec<Vertex> {
    const TRUNK_HALF: f32 = 0.2;
    const TRUNK_HEIGHT: f32 = 0.5;
    const FOLIAGE_HALF: f32 = 0.5;
    const FOLIAGE_HEIGHT: f32 = 1.0;

    let mut out = aabb(
        base + Vec3::new(-TRUNK_HALF, 0.0, -TRUNK_HALF),
        base + Vec3::new(TRUNK_HALF, TRUNK_HEIGHT, TRUNK_HALF),
        colors::TRUNK,
    );
    let c = |x: f32, z: f32| base + Vec3::new(x * FOLIAGE_HALF, TRUNK_HEIGHT, z * FOLIAGE_HALF);
    let tip = base + Vec3::new(0.0, TRUNK_HEIGHT + FOLIAGE_HEIGHT, 0.0);
    let color = colors::FOLIAGE;
    tri(&mut out, c(-1.0, -1.0), c(1.0, -1.0), tip, color);
    tri(&mut out, c(1.0, -1.0), c(1.0, 1.0), tip, color);
    tri(&mut out, c(1.0, 1.0), c(-1.0, 1.0), tip, color);
    tri(&mut out, c(-1.0, 1.0), c(-1.0, -1.0), tip, color);
    out
}

/// Line segment for an enemy laser streak
pub fn laser(from: Vec3, to: Vec3) -> [Vertex; 2] {
    [Vertex::at(from, colors::LASER), Vertex::at(to, colors::LASER)]
}

/// The player's craft in model space (nose toward +z), then `model` applied
pub fn craft(model: Mat4) -> Vec<Vertex> {
    let v = Vec3::new;
    let white = colors::CRAFT;
    let blue = colors::CRAFT_TRIM;
    let mut out = Vec::with_capacity(96);

    // Fuselage
    tri(&mut out, v(0.0, 0.0, 2.0), v(-0.5, 0.0, 0.0), v(0.5, 0.0, 0.0), white);
    tri(&mut out, v(0.0, 0.3, 0.0), v(-0.5, 0.0, 0.0), v(0.5, 0.0, 0.0), white);
    tri(&mut out, v(0.0, -0.3, 0.0), v(-0.5, 0.0, 0.0), v(0.5, 0.0, 0.0), white);
    tri(&mut out, v(0.0, 0.3, 0.0), v(0.0, -0.3, 0.0), v(-0.5, 0.0, -1.0), white);
    tri(&mut out, v(0.0, 0.3, 0.0), v(0.0, -0.3, 0.0), v(0.5, 0.0, -1.0), white);

    // Wings with blue tips
    tri(&mut out, v(-0.5, 0.0, 0.0), v(-3.0, -0.5, 0.0), v(-0.5, 0.0, -1.0), white);
    tri(&mut out, v(0.5, 0.0, 0.0), v(3.0, -0.5, 0.0), v(0.5, 0.0, -1.0), white);
    tri(&mut out, v(-3.0, -0.5, 0.0), v(-2.0, -0.5, 0.0), v(-2.0, -0.5, -0.5), blue);
    tri(&mut out, v(3.0, -0.5, 0.0), v(2.0, -0.5, 0.0), v(2.0, -0.5, -0.5), blue);

    // Engines
    out.extend(aabb(v(-0.6, 0.0, -1.2), v(-0.4, 0.1, -1.0), blue));
    out.extend(aabb(v(0.4, 0.0, -1.2), v(0.6, 0.1, -1.0), blue));

    transform(out, model)
}

/// Procedural enemy fighter: cockpit pod, window and two wing panels
pub fn fighter(center: Vec3, scale: f32) -> Vec<Vertex> {
    const WING_HALF_WIDTH: f32 = 0.2;
    const WING_HALF_HEIGHT: f32 = 1.5;
    const WING_DEPTH: f32 = 0.1;
    const WINDOW_HALF: f32 = 0.2;

    let mut out = cube(Vec3::ZERO, 0.5, colors::FIGHTER_HULL);

    // Window just in front of the pod's -z face
    let w = WINDOW_HALF;
    let z = -0.51;
    quad(
        &mut out,
        Vec3::new(-w, -w, z),
        Vec3::new(w, -w, z),
        Vec3::new(w, w, z),
        Vec3::new(-w, w, z),
        colors::FIGHTER_WINDOW,
    );

    let offset = 0.5 + WING_HALF_WIDTH / 2.0;
    for side in [-1.0, 1.0] {
        let x = side * offset;
        out.extend(aabb(
            Vec3::new(x - WING_HALF_WIDTH, -WING_HALF_HEIGHT, 0.0),
            Vec3::new(x + WING_HALF_WIDTH, WING_HALF_HEIGHT, WING_DEPTH),
            colors::FIGHTER_HULL,
        ));
    }

    transform(out, Mat4::from_translation(center) * Mat4::from_scale(Vec3::splat(scale)))
}

/// Apply `model` to every vertex position
pub fn transform(mut vertices: Vec<Vertex>, model: Mat4) -> Vec<Vertex> {
    for v in &mut vertices {
        v.position = model.transform_point3(v.pos()).to_array();
    }
    vertices
}
