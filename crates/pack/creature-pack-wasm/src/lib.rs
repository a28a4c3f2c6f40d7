use std::sync::Once;

use js_sys::{Float32Array, Uint32Array, Uint8Array};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use creature_pack_core::{BakedPlayer, Config, PackError, PlayerHandle};

type CoreManager = creature_pack_core::PackManager<BakedPlayer>;

static INIT_LOGGING: Once = Once::new();

/// JS-facing registry of pack assets and players.
///
/// Mutators and getters keep the host contract of plain `bool` / `-1` / `0.0`
/// results; the core logs the reason for a failure to the console. Buffer getters
/// return typed-array views straight into wasm memory: read them before the
/// next call into this module, since any call may reallocate or overwrite them.
#[wasm_bindgen(js_name = PackManager)]
pub struct WasmPackManager {
    core: CoreManager,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn handle_from_js(raw: i32) -> PlayerHandle {
    // Handle 0 is never issued, so negative input fails like any unknown handle.
    PlayerHandle::from_raw(raw).unwrap_or(PlayerHandle(0))
}

fn to_js_error(e: PackError) -> JsError {
    JsError::new(&e.to_string())
}

#[wasm_bindgen(js_class = PackManager)]
impl WasmPackManager {
    /// Create a new manager. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new PackManager({ player_capacity: 256 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmPackManager, JsError> {
        console_error_panic_hook::set_once();
        INIT_LOGGING.call_once(|| {
            // Fails only when the host already installed a logger.
            let _ = console_log::init_with_level(log::Level::Info);
        });

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(WasmPackManager {
            core: CoreManager::new(cfg),
        })
    }

    /// Decode a pack from bytes and register it under `name`. False if the
    /// name is taken or the bytes do not decode.
    #[wasm_bindgen(js_name = addPackLoader)]
    pub fn add_pack_loader(&mut self, name: String, data: &[u8]) -> bool {
        self.core.register_asset(&name, data).is_ok()
    }

    /// Forget a registered pack name; existing players keep playing.
    #[wasm_bindgen(js_name = removePackLoader)]
    pub fn remove_pack_loader(&mut self, name: String) -> bool {
        self.core.unregister_asset(&name).is_ok()
    }

    /// Create a player for a registered pack. Returns its handle, or -1.
    #[wasm_bindgen(js_name = addPackPlayer)]
    pub fn add_pack_player(&mut self, loader_name: String) -> i32 {
        match self.core.create_player(&loader_name) {
            Ok(handle) => handle.to_raw(),
            Err(_) => -1,
        }
    }

    #[wasm_bindgen(js_name = removePackPlayer)]
    pub fn remove_pack_player(&mut self, handle: i32) -> bool {
        self.core.remove_player(handle_from_js(handle)).is_ok()
    }

    /// Cut to an animation without blending.
    #[wasm_bindgen(js_name = setPlayerActiveAnimation)]
    pub fn set_player_active_animation(&mut self, handle: i32, name: String) -> bool {
        self.core.set_active_animation(handle_from_js(handle), &name).is_ok()
    }

    /// Blend into an animation, 0.0 < blend_delta <= 1.0.
    #[wasm_bindgen(js_name = setPlayerBlendToAnimation)]
    pub fn set_player_blend_to_animation(
        &mut self,
        handle: i32,
        name: String,
        blend_delta: f32,
    ) -> bool {
        self.core.blend_to_animation(handle_from_js(handle), &name, blend_delta).is_ok()
    }

    /// Step the player by `delta` seconds and refresh its render buffers.
    #[wasm_bindgen(js_name = stepPlayer)]
    pub fn step_player(&mut self, handle: i32, delta: f32) -> bool {
        self.core.step(handle_from_js(handle), delta).is_ok()
    }

    /// Current run time in seconds; 0.0 for an unknown handle.
    #[wasm_bindgen(js_name = getPlayerRunTime)]
    pub fn get_player_run_time(&self, handle: i32) -> f32 {
        self.core.run_time(handle_from_js(handle)).unwrap_or(0.0)
    }

    #[wasm_bindgen(js_name = setPlayerLoop)]
    pub fn set_player_loop(&mut self, handle: i32, should_loop: bool) -> bool {
        self.core.set_loop(handle_from_js(handle), should_loop).is_ok()
    }

    /// Interleaved x, y points as a view into wasm memory.
    #[wasm_bindgen(js_name = getPlayerPoints)]
    pub fn get_player_points(&self, handle: i32) -> Result<Float32Array, JsError> {
        let points = self.core.points(handle_from_js(handle)).map_err(to_js_error)?;
        // SAFETY: the view is handed straight to JS and documented as valid
        // only until the next call into this module.
        Ok(unsafe { Float32Array::view(points) })
    }

    /// Interleaved RGBA bytes as a view into wasm memory.
    #[wasm_bindgen(js_name = getPlayerColors)]
    pub fn get_player_colors(&self, handle: i32) -> Result<Uint8Array, JsError> {
        let colors = self.core.colors(handle_from_js(handle)).map_err(to_js_error)?;
        // SAFETY: see get_player_points.
        Ok(unsafe { Uint8Array::view(colors) })
    }

    /// Interleaved u, v pairs as a view into wasm memory.
    #[wasm_bindgen(js_name = getPlayerUVs)]
    pub fn get_player_uvs(&self, handle: i32) -> Result<Float32Array, JsError> {
        let uvs = self.core.uvs(handle_from_js(handle)).map_err(to_js_error)?;
        // SAFETY: see get_player_points.
        Ok(unsafe { Float32Array::view(uvs) })
    }

    /// Triangle indices of the player's pack as a view into wasm memory.
    #[wasm_bindgen(js_name = getPlayerIndices)]
    pub fn get_player_indices(&self, handle: i32) -> Result<Uint32Array, JsError> {
        let indices = self.core.indices(handle_from_js(handle)).map_err(to_js_error)?;
        // SAFETY: see get_player_points.
        Ok(unsafe { Uint32Array::view(indices) })
    }

    /// Bounds of the current points as `{ x1, y1, x2, y2 }`.
    ///
    /// Older bindings returned a four-element array `[x1, y1, x2, y2]`;
    /// callers indexing the result positionally need to read the fields instead.
    #[wasm_bindgen(js_name = getPlayerBounds)]
    pub fn get_player_bounds(&self, handle: i32) -> Result<JsValue, JsError> {
        let bounds = self.core.bounds(handle_from_js(handle)).map_err(to_js_error)?;
        swb::to_value(&bounds).map_err(|e| JsError::new(&format!("bounds error: {e}")))
    }

    /// Number of live players.
    #[wasm_bindgen(js_name = getPlayerCount)]
    pub fn get_player_count(&self) -> u32 {
        self.core.player_count() as u32
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
