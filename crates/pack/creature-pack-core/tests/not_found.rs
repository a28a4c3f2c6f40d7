use creature_pack_core::{BakedPlayer, PackError, PackManager, PlayerHandle};
use creature_pack_test_fixtures::packs;

fn not_found(handle: PlayerHandle) -> PackError {
    PackError::PlayerNotFound { handle }
}

/// Run every handle-taking operation against `h` and assert each one fails
/// with PlayerNotFound.
fn assert_all_fail(mgr: &mut PackManager<BakedPlayer>, h: PlayerHandle) {
    assert_eq!(mgr.set_active_animation(h, "walk"), Err(not_found(h)));
    assert_eq!(mgr.blend_to_animation(h, "run", 0.5), Err(not_found(h)));
    assert_eq!(mgr.step(h, 0.25), Err(not_found(h)));
    assert_eq!(mgr.run_time(h), Err(not_found(h)));
    assert_eq!(mgr.set_loop(h, false), Err(not_found(h)));
    assert_eq!(mgr.is_looping(h), Err(not_found(h)));
    assert_eq!(mgr.points(h), Err(not_found(h)));
    assert_eq!(mgr.colors(h), Err(not_found(h)));
    assert_eq!(mgr.uvs(h), Err(not_found(h)));
    assert_eq!(mgr.indices(h), Err(not_found(h)));
    assert_eq!(mgr.bounds(h), Err(not_found(h)));
    assert!(mgr.render_frame(h).is_err());
    assert!(mgr.player(h).is_err());
    assert_eq!(mgr.remove_player(h), Err(not_found(h)));
}

/// it should fail every operation for a handle that was never issued
#[test]
fn never_issued_handles_fail_softly() {
    let mut mgr = PackManager::<BakedPlayer>::default();
    let bytes = packs::bytes("walk_cycle").unwrap();
    mgr.register_asset("walk_cycle", &bytes).unwrap();
    let live = mgr.create_player("walk_cycle").unwrap();
    mgr.step(live, 0.5).unwrap();

    for raw in [0u32, 2, 99, u32::MAX] {
        assert_all_fail(&mut mgr, PlayerHandle(raw));
    }

    // The live player was not touched by any of the failed calls.
    assert_eq!(mgr.player_handles(), vec![live]);
    assert_eq!(mgr.run_time(live), Ok(0.5));
    assert_eq!(mgr.is_looping(live), Ok(true));
}

/// it should fail every operation for a handle whose player was removed
#[test]
fn removed_handles_fail_softly() {
    let mut mgr = PackManager::<BakedPlayer>::default();
    let bytes = packs::bytes("walk_cycle").unwrap();
    mgr.register_asset("walk_cycle", &bytes).unwrap();
    let a = mgr.create_player("walk_cycle").unwrap();
    let b = mgr.create_player("walk_cycle").unwrap();
    mgr.remove_player(a).unwrap();

    assert_all_fail(&mut mgr, a);
    assert_eq!(mgr.player_handles(), vec![b]);
    assert_eq!(mgr.player_count(), 1);
}

/// it should return AssetNotFound for unknown asset names without allocating a handle
#[test]
fn unknown_asset_does_not_consume_a_handle() {
    let mut mgr = PackManager::<BakedPlayer>::default();
    assert_eq!(
        mgr.create_player("walk_cycle"),
        Err(PackError::AssetNotFound {
            name: "walk_cycle".into()
        })
    );
    assert_eq!(mgr.unregister_asset("walk_cycle").unwrap_err().category(), "not_found");

    let bytes = packs::bytes("walk_cycle").unwrap();
    mgr.register_asset("walk_cycle", &bytes).unwrap();
    assert_eq!(mgr.create_player("walk_cycle"), Ok(PlayerHandle(1)));
}
