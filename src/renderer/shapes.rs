//! Shape generation for 2D primitives
//!
//! Everything in the game is drawn as axis-aligned quads in viewport pixel
//! coordinates; the pipeline maps them to clip space.

use super::vertex::{Vertex, colors};
use crate::sim::{HealthTier, Rect, World};

/// Vertices per quad (two triangles)
pub const QUAD_VERTICES: usize = 6;

/// Append a filled rectangle as two triangles
pub fn push_rect(vertices: &mut Vec<Vertex>, rect: &Rect, color: [f32; 4]) {
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());

    vertices.push(Vertex::new(l, t, color));
    vertices.push(Vertex::new(l, b, color));
    vertices.push(Vertex::new(r, t, color));

    vertices.push(Vertex::new(r, t, color));
    vertices.push(Vertex::new(l, b, color));
    vertices.push(Vertex::new(r, b, color));
}

/// Fill color of a barricade block
pub fn barricade_color(tier: HealthTier) -> [f32; 4] {
    match tier {
        HealthTier::Full => colors::BARRICADE_FULL,
        HealthTier::Damaged => colors::BARRICADE_DAMAGED,
        HealthTier::Critical => colors::BARRICADE_CRITICAL,
    }
}

/// Ship: hull plus a cockpit strip on top
fn push_player(vertices: &mut Vec<Vertex>, hull: &Rect) {
    push_rect(vertices, hull, colors::PLAYER);
    let cockpit = Rect::new(
        hull.center_x() - hull.size.x / 8.0,
        hull.top(),
        hull.size.x / 4.0,
        hull.size.y / 3.0,
    );
    push_rect(vertices, &cockpit, colors::PLAYER_COCKPIT);
}

/// Invader: body plus two dark eyes
fn push_invader(vertices: &mut Vec<Vertex>, body: &Rect) {
    push_rect(vertices, body, colors::INVADER);
    let eye_w = body.size.x / 5.0;
    let eye_h = body.size.y / 4.0;
    let eye_y = body.top() + body.size.y / 4.0;
    for eye_x in [body.left() + eye_w, body.right() - 2.0 * eye_w] {
        push_rect(vertices, &Rect::new(eye_x, eye_y, eye_w, eye_h), colors::INVADER_EYES);
    }
}

/// Build the triangle list for one frame
pub fn scene(world: &World) -> Vec<Vertex> {
    let quads = 2
        + world.invaders.len() * 3
        + world.bullets.len()
        + world.invader_bullets.len()
        + world.barricades.len();
    let mut vertices = Vec::with_capacity(quads * QUAD_VERTICES);

    for block in &world.barricades {
        push_rect(&mut vertices, &block.rect, barricade_color(block.tier()));
    }
    for invader in &world.invaders {
        push_invader(&mut vertices, &invader.rect);
    }
    for bullet in &world.bullets {
        push_rect(&mut vertices, &bullet.rect, colors::PLAYER_BULLET);
    }
    for bullet in &world.invader_bullets {
        push_rect(&mut vertices, &bullet.rect, colors::INVADER_BULLET);
    }
    push_player(&mut vertices, &world.player.hitbox());

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BarricadeBlock, Bullet};
    use crate::tuning::Tuning;

    #[test]
    fn test_rect_covers_corners() {
        let mut vertices = Vec::new();
        push_rect(&mut vertices, &Rect::new(10.0, 20.0, 30.0, 40.0), colors::PLAYER);
        assert_eq!(vertices.len(), QUAD_VERTICES);

        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().all(|&x| x == 10.0 || x == 40.0));
        assert!(ys.iter().all(|&y| y == 20.0 || y == 60.0));
    }

    #[test]
    fn test_barricade_colors_by_tier() {
        assert_eq!(barricade_color(HealthTier::Full), colors::BARRICADE_FULL);
        assert_eq!(barricade_color(HealthTier::Damaged), colors::BARRICADE_DAMAGED);
        assert_eq!(barricade_color(HealthTier::Critical), colors::BARRICADE_CRITICAL);
    }

    #[test]
    fn test_scene_vertex_count() {
        let mut world = World::new(800.0, 600.0, &Tuning::default());
        world.bullets.push(Bullet {
            rect: Rect::new(100.0, 100.0, 5.0, 15.0),
        });
        world.invader_bullets.push(Bullet {
            rect: Rect::new(200.0, 200.0, 4.0, 10.0),
        });

        let vertices = scene(&world);
        let quads = world.barricades.len() + world.invaders.len() * 3 + 1 + 1 + 2;
        assert_eq!(vertices.len(), quads * QUAD_VERTICES);
    }

    #[test]
    fn test_damaged_block_drawn_in_its_tier_color() {
        let mut world = World::new(800.0, 600.0, &Tuning::default());
        world.invaders.clear();
        let mut block = BarricadeBlock::new(Rect::new(0.0, 0.0, 8.0, 8.0));
        block.hit();
        block.hit();
        world.barricades = vec![block];

        let vertices = scene(&world);
        // Blocks are drawn first
        assert_eq!(vertices[0].color, colors::BARRICADE_CRITICAL);
        assert!(
            vertices
                .iter()
                .any(|v| v.color == colors::PLAYER_COCKPIT)
        );
    }
}
