use std::sync::Arc;

use creature_pack_core::{
    BakedPlayer, PackAsset, PackError, PackManager, PackPlayer, PlayerBounds, PlayerHandle,
};
use creature_pack_test_fixtures::packs;

fn manager_with(name: &str) -> (PackManager<BakedPlayer>, PlayerHandle) {
    let mut mgr = PackManager::default();
    let bytes = packs::bytes(name).unwrap();
    mgr.register_asset(name, &bytes).unwrap();
    let h = mgr.create_player(name).unwrap();
    (mgr, h)
}

/// it should compute exact bounds for the triangle fixture
#[test]
fn triangle_bounds() {
    let (mut mgr, h) = manager_with("triangle");
    mgr.step(h, 0.0).unwrap();
    assert_eq!(
        mgr.bounds(h).unwrap(),
        PlayerBounds {
            x1: -1.0,
            y1: 0.0,
            x2: 5.0,
            y2: 7.0
        }
    );
}

/// it should size every buffer from the asset's point and index counts
#[test]
fn buffers_match_asset_sizes() {
    let (mgr, h) = manager_with("walk_cycle");
    let asset = mgr.player(h).unwrap().asset();
    let n = asset.point_count();
    assert_eq!(n, 4);
    assert_eq!(asset.index_count(), 6);

    assert_eq!(mgr.points(h).unwrap().len(), n * 2);
    assert_eq!(mgr.uvs(h).unwrap().len(), n * 2);
    assert_eq!(mgr.colors(h).unwrap().len(), n * 4);
    assert_eq!(mgr.indices(h).unwrap().len(), 6);
}

/// it should bundle the same zero-copy views in a render frame
#[test]
fn render_frame_borrows_player_buffers() {
    let (mut mgr, h) = manager_with("walk_cycle");
    mgr.step(h, 0.5).unwrap();

    let frame = mgr.render_frame(h).unwrap();
    assert_eq!(frame.point_count(), 4);
    assert!(std::ptr::eq(frame.points, mgr.points(h).unwrap()));
    assert!(std::ptr::eq(frame.indices, mgr.indices(h).unwrap()));
    assert_eq!(frame.uvs, &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
    assert_eq!(&frame.colors[..4], &[255, 0, 0, 255]);
    assert_eq!(frame.bounds(), mgr.bounds(h).ok());
    assert_eq!(
        frame.bounds().unwrap(),
        PlayerBounds {
            x1: 2.0,
            y1: 0.0,
            x2: 3.0,
            y2: 1.0
        }
    );
}

/// it should share one index buffer between players of the same asset
#[test]
fn players_share_asset_indices() {
    let (mut mgr, a) = manager_with("walk_cycle");
    let b = mgr.create_player("walk_cycle").unwrap();
    assert!(std::ptr::eq(mgr.indices(a).unwrap(), mgr.indices(b).unwrap()));
    assert!(!std::ptr::eq(mgr.points(a).unwrap(), mgr.points(b).unwrap()));
}

mod empty {
    use super::*;

    /// Asset with no points at all.
    pub struct Empty;

    impl PackAsset for Empty {
        type Error = String;
        fn decode(_: &[u8]) -> Result<Self, String> {
            Ok(Empty)
        }
        fn point_count(&self) -> usize {
            0
        }
        fn indices(&self) -> &[u32] {
            &[]
        }
    }

    pub struct EmptyPlayer(pub Arc<Empty>);

    impl PackPlayer for EmptyPlayer {
        type Asset = Empty;
        fn new(asset: Arc<Empty>) -> Self {
            EmptyPlayer(asset)
        }
        fn asset(&self) -> &Empty {
            &self.0
        }
        fn set_active_animation(&mut self, _: &str) {}
        fn blend_to_animation(&mut self, _: &str, _: f32) {}
        fn step_time(&mut self, _: f32) {}
        fn sync_render_data(&mut self) {}
        fn run_time(&self) -> f32 {
            0.0
        }
        fn is_looping(&self) -> bool {
            false
        }
        fn set_looping(&mut self, _: bool) {}
        fn render_points(&self) -> &[f32] {
            &[]
        }
        fn render_colors(&self) -> &[u8] {
            &[]
        }
        fn render_uvs(&self) -> &[f32] {
            &[]
        }
    }
}

/// it should report EmptyRenderData instead of reading point 0 of an empty buffer
#[test]
fn bounds_of_empty_mesh_is_an_error() {
    let mut mgr = PackManager::<empty::EmptyPlayer>::default();
    mgr.register_asset("empty", &[]).unwrap();
    let h = mgr.create_player("empty").unwrap();
    mgr.step(h, 1.0).unwrap();

    assert_eq!(mgr.points(h).unwrap().len(), 0);
    assert_eq!(
        mgr.bounds(h),
        Err(PackError::EmptyRenderData { handle: h })
    );
}
