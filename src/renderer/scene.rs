//! Frame composition: walks the world and the theme tables and emits one
//! triangle list for the pipeline.
//!
//! Everything here is pure CPU geometry. The camera offset is floored once
//! per frame so world-aligned shapes stay pixel-stable, and no randomness is
//! consumed; animation keys off the world's frame counter.

use glam::Vec2;

use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::settings::Settings;
use crate::sim::{
    Particle, Platform, Player, Powerup, Trap, TrapKind, World, visible_columns,
};
use crate::world_to_screen;

use super::shapes::{
    push_circle, push_circle_gradient, push_rect, push_rect_gradient, push_trail, push_tri,
};
use super::theme::{
    BuildingLayer, DecorKind, GoalKind, GoalStyle, LandmarkKind, LandmarkStyle, SunStyle,
    ThemeStyle, theme_style,
};
use super::vertex::{Vertex, colors, particle_color, with_alpha};

/// Goal scenery is drawn within this many units of the viewport.
const GOAL_DRAW_RANGE: f32 = 540.0;

const TRAP_DIM: [f32; 4] = [0.6, 0.06, 0.2, 1.0];
const TRAP_POLE: [f32; 4] = [0.35, 0.02, 0.1, 1.0];
const PLATFORM_BASE: [f32; 4] = [0.03, 0.015, 0.07, 1.0];
const FACADE_RAIL: [f32; 4] = [0.13, 0.13, 0.13, 1.0];

/// Build the full frame for the current world state.
pub fn build_scene(world: &World, settings: &Settings) -> Vec<Vertex> {
    let style = theme_style(world.config.theme);
    let cam_x = world.camera.x.floor();
    let frame = world.frame_count;
    let mut out = Vec::with_capacity(4096);

    push_sky(&mut out, style);
    push_sun(&mut out, &style.sun);
    if settings.quality.landmarks_enabled() {
        push_landmark(&mut out, &style.landmark, &style.sun, cam_x);
    }

    let decor = settings.quality.decor_enabled();
    if settings.quality.background_layers() >= 3 {
        push_building_layer(&mut out, &style.far, cam_x, decor);
    }
    push_building_layer(&mut out, &style.mid, cam_x, decor);
    push_building_layer(&mut out, &style.rooftop, cam_x, decor);

    push_platforms(&mut out, &world.geometry.platforms, cam_x);
    push_goal(&mut out, &style.goal, world.geometry.goal_x, cam_x, frame);
    push_traps(&mut out, &world.geometry.traps, cam_x, frame);
    push_powerups(&mut out, &world.geometry.powerups, cam_x, frame);
    push_player(&mut out, &world.player, cam_x, frame, settings);
    if settings.particles {
        push_particles(&mut out, world.particles.particles(), cam_x);
    }

    out
}

/// Stacked vertical gradient bands between the sky stops.
fn push_sky(out: &mut Vec<Vertex>, style: &ThemeStyle) {
    for pair in style.sky.windows(2) {
        let (f0, top) = pair[0];
        let (f1, bottom) = pair[1];
        let y0 = f0 * GAME_HEIGHT;
        let y1 = f1 * GAME_HEIGHT;
        push_rect_gradient(out, 0.0, y0, GAME_WIDTH, y1 - y0, top, bottom);
    }
}

/// Retro sun: gradient disc with horizontal cut bands over the lower half.
fn push_sun(out: &mut Vec<Vertex>, sun: &SunStyle) {
    let center = Vec2::new(sun.x_frac * GAME_WIDTH, sun.y_frac * GAME_HEIGHT);
    push_circle_gradient(out, center, sun.radius, sun.top, sun.bottom, 48);

    let mut y = center.y + 20.0;
    let mut i = 0;
    while y < center.y + sun.radius {
        let thickness = 2.0 + i as f32 * 1.4;
        push_rect(
            out,
            center.x - sun.radius - 10.0,
            y,
            2.0 * sun.radius + 20.0,
            thickness,
            sun.band,
        );
        y += 14.0;
        i += 1;
    }
}

fn push_landmark(out: &mut Vec<Vertex>, style: &LandmarkStyle, sun: &SunStyle, cam_x: f32) {
    match style.kind {
        LandmarkKind::HarborWater => {
            let horizon = GAME_HEIGHT * 0.72;
            push_rect_gradient(
                out,
                0.0,
                horizon,
                GAME_WIDTH,
                GAME_HEIGHT - horizon,
                style.primary,
                [0.02, 0.02, 0.06, 1.0],
            );
            // Sun reflection wedge on the water.
            let sun_x = sun.x_frac * GAME_WIDTH;
            push_tri(
                out,
                Vec2::new(sun_x - 70.0, horizon),
                Vec2::new(sun_x + 70.0, horizon),
                Vec2::new(sun_x, GAME_HEIGHT),
                style.secondary,
            );
        }
        LandmarkKind::GateArch => {
            let base = GAME_HEIGHT * 0.75;
            for sx in repeated_positions(style, cam_x, 280.0) {
                push_rect(out, sx, 170.0, 26.0, base - 170.0, style.primary);
                push_rect(out, sx + 254.0, 170.0, 26.0, base - 170.0, style.primary);
                push_rect(out, sx - 36.0, 132.0, 352.0, 24.0, style.primary);
                push_rect(out, sx - 36.0, 124.0, 352.0, 10.0, style.secondary);
                push_rect(out, sx, 196.0, 280.0, 16.0, style.primary);
            }
        }
        LandmarkKind::LatticeTower => {
            let base = GAME_HEIGHT * 0.7;
            for sx in repeated_positions(style, cam_x, 70.0) {
                push_tri(
                    out,
                    Vec2::new(sx - 70.0, base),
                    Vec2::new(sx + 70.0, base),
                    Vec2::new(sx, base - 340.0),
                    style.primary,
                );
                push_rect(out, sx - 52.0, base - 110.0, 104.0, 7.0, style.primary);
                push_rect(out, sx - 30.0, base - 210.0, 60.0, 6.0, style.primary);
                push_rect(out, sx - 4.0, base - 372.0, 8.0, 32.0, style.primary);

                // Domed basilica on the next hill over.
                let dome_x = sx + 650.0;
                push_circle(out, Vec2::new(dome_x, base - 36.0), 36.0, style.secondary, 20);
                push_circle(out, Vec2::new(dome_x - 55.0, base - 22.0), 18.0, style.secondary, 14);
                push_circle(out, Vec2::new(dome_x + 55.0, base - 22.0), 18.0, style.secondary, 14);
                push_rect(out, dome_x - 70.0, base - 36.0, 140.0, 36.0, style.secondary);
            }
        }
    }
}

/// Screen-x anchors of every on-screen repetition of a spaced landmark.
fn repeated_positions(
    style: &LandmarkStyle,
    cam_x: f32,
    width: f32,
) -> impl Iterator<Item = f32> {
    let offset = cam_x * style.speed;
    let spacing = style.spacing;
    let speed = style.speed;
    let start = (offset / spacing).floor() * spacing - spacing;
    let count = ((offset + GAME_WIDTH + width - start) / spacing).ceil() as usize;
    (0..count).map(move |i| {
        let world_x = start + i as f32 * spacing + 200.0;
        world_to_screen(world_x, cam_x, speed)
    })
}

fn push_building_layer(out: &mut Vec<Vertex>, layer: &BuildingLayer, cam_x: f32, decor: bool) {
    for col in visible_columns(layer.spec, cam_x, GAME_WIDTH) {
        let h = col.height + layer.lift;
        let x = col.screen_x;
        let y = layer.y_base - h;
        let w = col.width;
        push_rect(out, x, y, w, h, layer.body);

        if !decor {
            continue;
        }
        match layer.decor {
            DecorKind::Plain => {}
            DecorKind::NeonStrips => {
                if col.world_x.sin() > 0.0 && h > 90.0 {
                    push_rect(out, x + 5.0, y + 20.0, 10.0, 60.0, layer.accent);
                }
            }
            DecorKind::WindowRows => {
                if (col.world_x * 0.01).sin().abs() > 0.3 {
                    let lit = if (col.world_x / w) as i64 % 2 == 0 {
                        layer.accent
                    } else {
                        layer.detail
                    };
                    for row in 0..5 {
                        let wy = y + 20.0 + row as f32 * 20.0;
                        if wy + 2.0 < layer.y_base {
                            push_rect(out, x + 5.0, wy, w - 10.0, 2.0, lit);
                        }
                    }
                }
                if (col.world_x * 0.02).cos() > 0.8 {
                    push_rect(
                        out,
                        x + w / 2.0 - 2.0,
                        y + 10.0,
                        4.0,
                        h - 10.0,
                        with_alpha(colors::WHITE, 0.5),
                    );
                }
            }
            DecorKind::Facade => {
                // Mansard roof band with sloped ends.
                push_rect(out, x + 8.0, y - 24.0, w - 16.0, 24.0, layer.accent);
                push_tri(
                    out,
                    Vec2::new(x - 4.0, y),
                    Vec2::new(x + 8.0, y - 24.0),
                    Vec2::new(x + 8.0, y),
                    layer.accent,
                );
                push_tri(
                    out,
                    Vec2::new(x + w + 4.0, y),
                    Vec2::new(x + w - 8.0, y - 24.0),
                    Vec2::new(x + w - 8.0, y),
                    layer.accent,
                );
                for row in 0..4 {
                    let wy = y + 20.0 + row as f32 * 30.0;
                    if wy + 20.0 >= layer.y_base {
                        break;
                    }
                    push_rect(out, x + 12.0, wy, 18.0, 20.0, layer.detail);
                    push_rect(out, x + w - 30.0, wy, 18.0, 20.0, layer.detail);
                    if row == 1 {
                        push_rect(out, x + 8.0, wy + 15.0, w - 16.0, 4.0, FACADE_RAIL);
                    }
                }
            }
            DecorKind::Rooftop => {
                push_rect(out, x, y, w, 5.0, layer.accent);
                push_rect(out, x, y - 14.0, w, 3.0, layer.accent);
                let mut post = 0.0;
                while post <= w - 3.0 {
                    push_rect(out, x + post, y - 12.0, 3.0, 12.0, layer.accent);
                    post += 25.0;
                }
                if (col.world_x * 0.5).sin().abs() > 0.5 {
                    push_rect(out, x + 20.0, y - 30.0, 40.0, 30.0, layer.detail);
                    push_rect(out, x + 18.0, y - 33.0, 44.0, 4.0, layer.detail);
                }
                if col.world_x.cos() > 0.0 && w >= 160.0 {
                    push_rect(out, x + w - 60.0, y + 20.0, 40.0, 28.0, layer.detail);
                }
            }
        }
    }
}

fn push_platforms(out: &mut Vec<Vertex>, platforms: &[Platform], cam_x: f32) {
    for p in platforms {
        if p.x + p.w < cam_x || p.x > cam_x + GAME_WIDTH {
            continue;
        }
        let x = p.x - cam_x;
        push_rect_gradient(out, x, p.y, p.w, p.h, colors::GROUND, PLATFORM_BASE);
        push_rect(out, x, p.y, p.w, 4.0, colors::GROUND_EDGE);
    }
}

fn push_goal(out: &mut Vec<Vertex>, goal: &GoalStyle, goal_x: f32, cam_x: f32, frame: u64) {
    let gx = goal_x - cam_x;
    if gx < -GOAL_DRAW_RANGE || gx > GAME_WIDTH + GOAL_DRAW_RANGE {
        return;
    }
    let h = GAME_HEIGHT;
    let pulse = (frame as f32 * 0.05).sin().abs();
    let field = with_alpha(goal.field, goal.field[3] * (0.6 + 0.4 * pulse));

    match goal.kind {
        GoalKind::NeonPortal => {
            push_rect(out, gx, 100.0, 20.0, h - 100.0, goal.frame);
            push_rect(out, gx + 120.0, 100.0, 20.0, h - 100.0, goal.frame);
            push_rect(out, gx, 80.0, 140.0, 20.0, goal.frame);
            push_rect(out, gx + 20.0, 100.0, 100.0, h - 100.0, field);
        }
        GoalKind::ToriiGate => {
            push_rect(out, gx, 150.0, 15.0, h - 150.0, goal.frame);
            push_rect(out, gx + 120.0, 150.0, 15.0, h - 150.0, goal.frame);
            push_rect(out, gx - 2.0, h - 10.0, 19.0, 10.0, goal.cap);
            push_rect(out, gx + 118.0, h - 10.0, 19.0, 10.0, goal.cap);
            // Kasagi with flared ends, topped by a dark cap strip.
            push_rect(out, gx - 20.0, 108.0, 175.0, 22.0, goal.frame);
            push_tri(
                out,
                Vec2::new(gx - 20.0, 130.0),
                Vec2::new(gx - 20.0, 108.0),
                Vec2::new(gx - 34.0, 130.0),
                goal.frame,
            );
            push_tri(
                out,
                Vec2::new(gx + 155.0, 130.0),
                Vec2::new(gx + 155.0, 108.0),
                Vec2::new(gx + 169.0, 130.0),
                goal.frame,
            );
            push_rect(out, gx - 20.0, 103.0, 175.0, 7.0, goal.cap);
            push_rect(out, gx, 160.0, 135.0, 15.0, goal.frame);
            push_rect(out, gx + 57.0, 115.0, 20.0, 25.0, goal.cap);
            push_rect(out, gx + 15.0, 130.0, 105.0, h - 130.0, field);
        }
        GoalKind::StoneArch => {
            push_rect(out, gx, 150.0, 30.0, h - 150.0, goal.frame);
            push_rect(out, gx + 120.0, 150.0, 30.0, h - 150.0, goal.frame);
            push_tri(
                out,
                Vec2::new(gx, 150.0),
                Vec2::new(gx + 75.0, 50.0),
                Vec2::new(gx + 30.0, 150.0),
                goal.frame,
            );
            push_tri(
                out,
                Vec2::new(gx + 120.0, 150.0),
                Vec2::new(gx + 75.0, 50.0),
                Vec2::new(gx + 150.0, 150.0),
                goal.frame,
            );
            push_tri(
                out,
                Vec2::new(gx + 55.0, 95.0),
                Vec2::new(gx + 75.0, 60.0),
                Vec2::new(gx + 95.0, 95.0),
                goal.cap,
            );
            push_rect(out, gx + 30.0, 110.0, 90.0, h - 110.0, field);
            push_rect(
                out,
                gx + 60.0,
                150.0,
                30.0,
                h - 150.0,
                with_alpha(colors::WHITE, 0.2 + 0.35 * pulse),
            );
        }
    }
}

fn push_traps(out: &mut Vec<Vertex>, traps: &[Trap], cam_x: f32, frame: u64) {
    let flash = (frame / 10) % 2 == 0;
    let main = if flash { colors::TRAP } else { TRAP_DIM };

    for t in traps {
        if t.destroyed || t.x + t.w < cam_x || t.x > cam_x + GAME_WIDTH {
            continue;
        }
        let x = t.x - cam_x;
        match t.kind {
            TrapKind::Small => {
                push_tri(
                    out,
                    Vec2::new(x, t.y + t.h),
                    Vec2::new(x + t.w / 2.0, t.y),
                    Vec2::new(x + t.w, t.y + t.h),
                    main,
                );
                push_rect(out, x, t.y + t.h - 4.0, t.w, 4.0, TRAP_POLE);
                push_circle(out, Vec2::new(x + t.w / 2.0, t.y), 3.0, colors::YELLOW, 8);
            }
            TrapKind::Tall => {
                push_rect(out, x + t.w / 2.0 - 5.0, t.y, 10.0, t.h, TRAP_POLE);
                push_rect(out, x - 2.0, t.y, t.w + 4.0, 30.0, main);
                let blink = (frame / 15) % 2 == 0;
                let light = if blink {
                    [1.0, 0.67, 0.67, 1.0]
                } else {
                    [0.33, 0.0, 0.0, 1.0]
                };
                push_circle(out, Vec2::new(x + t.w / 2.0, t.y + 15.0), 7.0, light, 10);
            }
        }
    }
}

fn push_powerups(out: &mut Vec<Vertex>, powerups: &[Powerup], cam_x: f32, frame: u64) {
    let bob = (frame as f32 * 0.1).sin() * 5.0;
    for p in powerups {
        if !p.active || p.x + p.w < cam_x || p.x > cam_x + GAME_WIDTH {
            continue;
        }
        let cx = p.x - cam_x + p.w / 2.0;
        let cy = p.y + p.h / 2.0 + bob;

        push_circle(
            out,
            Vec2::new(cx, cy),
            14.0,
            with_alpha(colors::POWERUP, 0.3),
            12,
        );
        push_diamond(out, cx, cy, 9.0, 12.0, colors::POWERUP);
        push_diamond(out, cx, cy, 3.0, 4.0, colors::WHITE);
    }
}

fn push_diamond(out: &mut Vec<Vertex>, cx: f32, cy: f32, rx: f32, ry: f32, color: [f32; 4]) {
    let top = Vec2::new(cx, cy - ry);
    let right = Vec2::new(cx + rx, cy);
    let bottom = Vec2::new(cx, cy + ry);
    let left = Vec2::new(cx - rx, cy);
    push_tri(out, top, right, left, color);
    push_tri(out, right, bottom, left, color);
}

/// The runner sprite: trail ghosts, then the pixel-art body assembled from
/// quads in the player's local frame.
fn push_player(
    out: &mut Vec<Vertex>,
    player: &Player,
    cam_x: f32,
    frame: u64,
    settings: &Settings,
) {
    let charged = player.invulnerable();

    if settings.trails && !player.trail.is_empty() {
        let samples: Vec<Vec2> = player
            .trail
            .iter()
            .map(|p| Vec2::new(p.x - cam_x, p.y))
            .collect();
        let (color, max_alpha) = if charged {
            (colors::YELLOW, 0.8)
        } else {
            (colors::CYAN, 0.4)
        };
        push_trail(out, &samples, player.w, player.h, color, max_alpha);
    }

    let jitter = if charged && settings.effective_strobe() {
        (frame as f32 * 1.7).sin() * 2.0
    } else {
        0.0
    };
    let px = player.pos.x - cam_x + jitter;
    let py = player.pos.y;
    let quad = |out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, c: [f32; 4]| {
        push_rect(out, px + x, py + y, w, h, c);
    };

    // Legs, four-pose run cycle on the ground, tucked pose in the air.
    let legs: [(f32, f32, f32, f32); 2] = if player.grounded {
        match (frame / 5) % 4 {
            0 | 2 => [(5.0, 30.0, 8.0, 18.0), (17.0, 30.0, 8.0, 18.0)],
            1 => [(5.0, 28.0, 8.0, 15.0), (17.0, 32.0, 8.0, 16.0)],
            _ => [(5.0, 32.0, 8.0, 16.0), (17.0, 28.0, 8.0, 15.0)],
        }
    } else {
        [(4.0, 28.0, 8.0, 14.0), (18.0, 32.0, 8.0, 16.0)]
    };
    for (x, y, w, h) in legs {
        quad(out, x, y, w, h, colors::PLAYER_TIGHTS);
    }

    quad(out, 5.0, 16.0, 20.0, 16.0, colors::PLAYER_CLOTHES);
    quad(out, 6.0, 0.0, 18.0, 16.0, colors::PLAYER_SKIN);

    let hair = if charged {
        colors::PLAYER_HAIR_CHARGED
    } else {
        colors::PLAYER_HAIR
    };
    quad(out, 4.0, -4.0, 22.0, 8.0, hair);
    quad(out, 2.0, 0.0, 6.0, 18.0, hair);
    quad(out, 24.0, 0.0, 6.0, 18.0, hair);
    // Ponytail streams up while falling.
    if player.vel.y > 0.0 {
        quad(out, 8.0, -8.0, 8.0, 6.0, hair);
    } else {
        quad(out, 8.0, -2.0, 8.0, 6.0, hair);
    }

    quad(out, 20.0, 6.0, 2.0, 4.0, colors::PLAYER_TIGHTS);
}

fn push_particles(out: &mut Vec<Vertex>, particles: &[Particle], cam_x: f32) {
    for p in particles {
        let color = with_alpha(particle_color(p.color), p.life.clamp(0.0, 1.0));
        push_rect(
            out,
            p.pos.x - cam_x - p.size / 2.0,
            p.pos.y - p.size / 2.0,
            p.size,
            p.size,
            color,
        );
    }
}
