//! 軸平行矩形の2次元物理エンジン
//!
//! ゲームなどに組み込むための物理バックエンドです。
//! 重力・抵抗・外力による移動と、スイープ（連続）衝突検出による衝突解決を行います。

use wasm_bindgen::prelude::*;

// モジュール宣言
pub mod physics;
pub mod utils;

pub use physics::{
    Body, BodyHandle, ContactFlags, ForceScaling, PhysicsConfig, PhysicsError, PhysicsWorld, RayHit,
};
pub use utils::math::{Rect, Vec2};

// 初期化用のエントリーポイント
#[wasm_bindgen(start)]
pub fn start() {
    // エラーをコンソールにパニックフックとして表示
    console_error_panic_hook::set_once();

    // ロガーの初期化
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("physics module initialized");
}

fn to_js_error(err: PhysicsError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// JavaScriptからアクセス可能な物理ワールド
#[wasm_bindgen]
pub struct PhysicsInstance {
    world: PhysicsWorld,
}

#[wasm_bindgen]
impl PhysicsInstance {
    /// デフォルト設定で作成
    #[wasm_bindgen(constructor)]
    pub fn new() -> PhysicsInstance {
        PhysicsInstance {
            world: PhysicsWorld::new(),
        }
    }

    /// JSON形式の設定から作成
    pub fn from_config_json(json: &str) -> Result<PhysicsInstance, JsValue> {
        let config = PhysicsConfig::from_json(json).map_err(to_js_error)?;
        let world = PhysicsWorld::with_config(config).map_err(to_js_error)?;
        Ok(PhysicsInstance { world })
    }

    /// ボディを追加してハンドルを返す
    pub fn add_body(
        &mut self,
        name: Option<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mass: f64,
        movable: bool,
    ) -> Result<u32, JsValue> {
        self.world
            .add_body(name.as_deref(), Vec2::new(x, y), Vec2::new(width, height), mass, movable)
            .map(|handle| handle.0)
            .map_err(to_js_error)
    }

    /// 名前からハンドルを取得
    pub fn handle_of(&self, name: &str) -> Option<u32> {
        self.world.handle_of(name).map(|handle| handle.0)
    }

    pub fn push(&mut self, handle: u32, fx: f64, fy: f64) -> Result<(), JsValue> {
        self.world.push(BodyHandle(handle), fx, fy).map_err(to_js_error)
    }

    pub fn move_body(&mut self, handle: u32, dx: f64, dy: f64) -> Result<(), JsValue> {
        self.world.move_body(BodyHandle(handle), dx, dy).map_err(to_js_error)
    }

    /// シミュレーションを1ティック進める
    pub fn step(&mut self, delta_time: f64) {
        self.world.step(delta_time);
    }

    pub fn position_x(&self, handle: u32) -> Option<f64> {
        self.world.body(BodyHandle(handle)).map(|body| body.position().x)
    }

    pub fn position_y(&self, handle: u32) -> Option<f64> {
        self.world.body(BodyHandle(handle)).map(|body| body.position().y)
    }

    pub fn velocity_x(&self, handle: u32) -> Option<f64> {
        self.world.body(BodyHandle(handle)).map(|body| body.velocity().x)
    }

    pub fn velocity_y(&self, handle: u32) -> Option<f64> {
        self.world.body(BodyHandle(handle)).map(|body| body.velocity().y)
    }

    /// 接地しているか
    pub fn is_grounded(&self, handle: u32) -> bool {
        self.world
            .body(BodyHandle(handle))
            .map(Body::is_grounded)
            .unwrap_or(false)
    }

    /// 接触フラグを上・下・左・右の順のビットで取得
    pub fn contact_bits(&self, handle: u32) -> u8 {
        self.world
            .body(BodyHandle(handle))
            .map(|body| {
                let contacts = body.contacts();
                (contacts.up as u8)
                    | (contacts.down as u8) << 1
                    | (contacts.left as u8) << 2
                    | (contacts.right as u8) << 3
            })
            .unwrap_or(0)
    }

    pub fn body_count(&self) -> usize {
        self.world.body_count()
    }
}

impl Default for PhysicsInstance {
    fn default() -> Self {
        Self::new()
    }
}
