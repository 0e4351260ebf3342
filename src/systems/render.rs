use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::animation::Animation;
use crate::components::mapposition::MapPosition;
use crate::components::zindex::ZIndex;
use crate::resources::texturestore::TextureStore;

/// Draw every animated sprite, blended by `alpha`.
///
/// We render inside raylib's drawing scope and query the ECS World directly.
/// Entities are collected, sorted by [`ZIndex`] (painter's algorithm) and
/// culled against the screen rectangle before drawing. Sampling an
/// [`Animation`] is a pure read, so calling this any number of times between
/// two simulation ticks is safe.
pub fn render_pass(world: &mut World, d: &mut RaylibDrawHandle, alpha: f32) {
    let screen_w = d.get_screen_width() as f32;
    let screen_h = d.get_screen_height() as f32;

    // Query: (Animation, Position, ZIndex); collect, sort by z, then draw.
    let mut to_draw: Vec<(Animation, MapPosition, ZIndex)> = {
        let mut q = world.query::<(&Animation, &MapPosition, &ZIndex)>();
        q.iter(world)
            .map(|(a, p, z)| (a.clone(), *p, *z))
            .collect()
    };
    to_draw.sort_by_key(|(_, _, z)| *z);

    let textures = world.resource::<TextureStore>();

    for (animation, position, _z) in to_draw.iter() {
        let sample = animation.sample(alpha);
        let keyframe = sample.keyframe;

        let tex = match keyframe.tex_key().and_then(|key| textures.get(key)) {
            Some(tex) => tex,
            None => continue,
        };

        // Source cell within the sheet
        let src = keyframe.region();

        // Screen-space AABB with MapPosition as the pivot (origin), for
        // culling against the window rectangle.
        let origin = keyframe.origin();
        let min = Vector2 {
            x: position.pos.x - origin.x * sample.scale,
            y: position.pos.y - origin.y * sample.scale,
        };
        let max = Vector2 {
            x: min.x + src.width * sample.scale,
            y: min.y + src.height * sample.scale,
        };
        if max.x < 0.0 || min.x > screen_w || max.y < 0.0 || min.y > screen_h {
            continue;
        }

        if sample.is_neutral() {
            // Unmodified cell: no tint or scale compositing
            d.draw_texture_rec(tex, src, min, Color::WHITE);
        } else {
            let dest = Rectangle {
                x: position.pos.x,
                y: position.pos.y,
                width: src.width * sample.scale,
                height: src.height * sample.scale,
            };
            let pivot = Vector2 {
                x: origin.x * sample.scale,
                y: origin.y * sample.scale,
            };
            let tint = Color::new(
                255,
                255,
                255,
                (sample.opacity.clamp(0.0, 1.0) * 255.0) as u8,
            );
            d.draw_texture_pro(tex, src, dest, pivot, 0.0, tint);
        }
    }
}
