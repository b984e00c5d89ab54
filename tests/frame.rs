//! Whole-frame behaviour: grid + pose in, ordered draw commands out.

use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_relative_eq;
use tile_raycaster::{
    Cell, EngineConfig, Error, Grid, InputState, Material, MaterialTable, Pose, Projection,
    RenderContext, Side, cast_frame, cast_ray, draw_commands, raster,
};

fn classic_ctx() -> RenderContext {
    let projection = Projection::new(800, 600, PI / 3.0, 400, 30).unwrap();
    RenderContext::new(projection, MaterialTable::classic(false, 64))
}

#[test]
fn single_wall_south_of_player() {
    let ctx = classic_ctx();
    let grid = Grid::from_cells([(Cell::new(1, 1), 2)]);
    let pose = Pose::new(1.5, 0.5, FRAC_PI_2);
    let centre = ctx.projection.num_rays / 2;

    let hit = cast_ray(&ctx.projection, &grid, &pose, centre).unwrap();

    assert_eq!(hit.tile_type, 2);
    assert_eq!(hit.side, Side::Horizontal);
    assert_relative_eq!(hit.distance, 0.5, epsilon = 1e-6);
    assert_relative_eq!(hit.texture_offset, 0.5, epsilon = 1e-3);

    let cmds = draw_commands(&ctx, &grid, &pose).unwrap();
    let cmd = cmds.iter().find(|c| c.ray_index == centre).unwrap();
    assert_eq!(cmd.tile_type, 2);
    assert_eq!(cmd.screen_x, (centre * 2) as u32);
    assert!(cmd.height > ctx.projection.screen_dist as f32);
}

#[test]
fn surrounded_player_hits_on_every_ray() {
    let ctx = classic_ctx();
    let mut cells = Vec::new();
    for row in 0..3 {
        for col in 0..3 {
            if (col, row) != (1, 1) {
                cells.push((Cell::new(col, row), 3));
            }
        }
    }
    let grid = Grid::from_cells(cells);

    for k in 0..32 {
        let pose = Pose::new(1.5, 1.5, k as f64 * PI / 16.0 + 0.01);
        let hits = cast_frame(&ctx, &grid, &pose);

        assert_eq!(hits.len(), ctx.projection.num_rays);
        for hit in &hits {
            let hit = hit.as_ref().expect("every ray must hit");
            assert_eq!(hit.tile_type, 3);
            assert!(hit.distance <= 1.0);
            assert!((0.0..1.0).contains(&hit.texture_offset));
        }
    }
}

#[test]
fn empty_grid_draws_nothing() {
    let ctx = classic_ctx();
    let grid = Grid::default();

    for k in 0..8 {
        let pose = Pose::new(3.7, -2.2, k as f64 * 0.8);
        assert!(cast_frame(&ctx, &grid, &pose).iter().all(Option::is_none));
        assert!(draw_commands(&ctx, &grid, &pose).unwrap().is_empty());
    }
}

#[test]
fn parallel_cast_matches_sequential_order() {
    let ctx = classic_ctx();
    let grid = EngineConfig::default().build_grid().unwrap();
    let pose = Pose::new(1.5, 5.0, 5.2);

    let parallel = cast_frame(&ctx, &grid, &pose);
    let sequential: Vec<_> = (0..ctx.projection.num_rays)
        .map(|i| cast_ray(&ctx.projection, &grid, &pose, i))
        .collect();

    assert_eq!(parallel, sequential);

    let cmds = draw_commands(&ctx, &grid, &pose).unwrap();
    assert!(!cmds.is_empty());
    assert!(cmds.windows(2).all(|w| w[0].screen_x < w[1].screen_x));
}

#[test]
fn nearer_wall_is_taller() {
    let ctx = classic_ctx();
    let centre = ctx.projection.num_rays / 2;
    let grid = Grid::from_cells([(Cell::new(5, 0), 2)]);

    let near = cast_ray(&ctx.projection, &grid, &Pose::new(3.5, 0.5, 0.0), centre).unwrap();
    let far = cast_ray(&ctx.projection, &grid, &Pose::new(0.5, 0.5, 0.0), centre).unwrap();

    assert!(near.distance < far.distance);
    assert!(near.projected_height > far.projected_height);
}

#[test]
fn default_config_renders_a_frame() {
    let config = EngineConfig::default();
    let ctx = config.render_context().unwrap();
    let grid = config.build_grid().unwrap();
    let mut pose = config.start_pose();
    let motion = config.motion();

    let (w, h) = (config.view.width, config.view.height);
    let mut buf = vec![0u32; w * h];

    let turn = InputState {
        turn_right: true,
        forward: true,
        ..InputState::default()
    };
    for _ in 0..60 {
        pose.advance(16.0, &turn, &motion);
        let cmds = draw_commands(&ctx, &grid, &pose).unwrap();
        raster::render_frame(&mut buf, w, h, &ctx, &cmds).unwrap();
    }
}

#[test]
fn flat_config_renders_a_frame() {
    let config = EngineConfig::from_toml_str("[render]\ntextured = false").unwrap();
    let ctx = config.render_context().unwrap();
    let grid = config.build_grid().unwrap();
    let pose = Pose::new(2.5, 4.5, 3.0 * FRAC_PI_2); // facing north into the block

    let cmds = draw_commands(&ctx, &grid, &pose).unwrap();
    assert!(!cmds.is_empty());

    let mut buf = vec![0u32; 800 * 600];
    raster::render_frame(&mut buf, 800, 600, &ctx, &cmds).unwrap();
    assert!(buf.iter().any(|&p| p != ctx.background));
}

#[test]
fn unknown_tile_without_fallback_is_missing_asset() {
    let projection = Projection::new(800, 600, PI / 3.0, 400, 30).unwrap();
    let mut materials = MaterialTable::new();
    materials.insert(1, Material::Solid(0xFFFFFF));
    let ctx = RenderContext::new(projection, materials);

    let grid = Grid::from_cells([(Cell::new(3, 0), 9)]);
    let pose = Pose::new(0.5, 0.5, 0.0);

    assert!(matches!(
        draw_commands(&ctx, &grid, &pose),
        Err(Error::MissingAsset { tile_type: 9 })
    ));
}
