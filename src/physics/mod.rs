//! 物理システムモジュール
//!
//! このモジュールは、軸平行な矩形ボディの2次元物理シミュレーションを担当します。
//! 重力、抵抗、外力による速度の更新と、連続的な衝突検出による衝突解決を行います。
//!
//! `step`、`push`、`move_body` はすべて `&mut self` を取るため、更新中のワールドを
//! 別の場所から同時に変更することはできません。スレッド間で共有する場合は、
//! 呼び出し側でロックを用意してください。

use std::cmp::Ordering;
use std::collections::HashMap;

pub mod body;
pub mod collision;
pub mod config;
pub mod dynamics;
pub mod error;

pub use body::{Body, BodyHandle, ContactFlags};
pub use collision::{ray_vs_rect, sweep_rect, RayHit};
pub use config::{ForceScaling, PhysicsConfig};
pub use error::PhysicsError;

use crate::utils::id_generator::BodyNameGenerator;
use crate::utils::math::{approx_zero, Vec2};

/// 物理ワールド
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    /// 設定（生存期間中は不変）
    config: PhysicsConfig,
    /// ボディのアリーナ（インデックス = ハンドル）
    bodies: Vec<Body>,
    /// ボディ名（インデックス = ハンドル）
    names: Vec<String>,
    /// 名前からハンドルへの対応
    handles: HashMap<String, BodyHandle>,
    /// 名前の自動生成器
    name_generator: BodyNameGenerator,
    /// 実行したティック数
    tick_count: u64,
    /// `step` に渡された経過時間の合計
    simulated_time: f64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// デフォルト設定で新しい物理ワールドを作成
    pub fn new() -> Self {
        Self::from_valid_config(PhysicsConfig::default())
    }

    /// 設定を指定して物理ワールドを作成
    pub fn with_config(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: PhysicsConfig) -> Self {
        log::info!(
            "physics world created (gravity: {}, friction: {}, scaling: {:?})",
            config.gravity,
            config.friction,
            config.force_scaling
        );

        Self {
            config,
            bodies: Vec::new(),
            names: Vec::new(),
            handles: HashMap::new(),
            name_generator: BodyNameGenerator::new(),
            tick_count: 0,
            simulated_time: 0.0,
        }
    }

    /// ボディを作成して追加
    ///
    /// # 引数
    ///
    /// * `name` - ボディ名（`None` の場合は自動生成）
    /// * `position` - x と y が最小となる隅
    /// * `size` - 幅と高さ
    /// * `mass` - 質量
    /// * `movable` - シミュレーションで動かすかどうか
    ///
    /// # 戻り値
    ///
    /// * 追加されたボディのハンドル
    pub fn add_body(
        &mut self,
        name: Option<&str>,
        position: Vec2,
        size: Vec2,
        mass: f64,
        movable: bool,
    ) -> Result<BodyHandle, PhysicsError> {
        let body = Body::new(position, size, mass, movable).map_err(|err| {
            log::debug!("rejected body {:?}: {}", name, err);
            err
        })?;
        self.insert_body(name, body)
    }

    /// 作成済みのボディを追加
    pub fn insert_body(&mut self, name: Option<&str>, body: Body) -> Result<BodyHandle, PhysicsError> {
        let name = match name {
            Some(name) if self.handles.contains_key(name) => {
                return Err(PhysicsError::DuplicateName(name.to_string()));
            }
            Some(name) => name.to_string(),
            None => {
                let handles = &self.handles;
                self.name_generator.next_free(|candidate| handles.contains_key(candidate))
            }
        };

        let handle = BodyHandle(self.bodies.len() as u32);
        log::debug!(
            "added body {} '{}' at ({}, {}) movable: {}",
            handle,
            name,
            body.position().x,
            body.position().y,
            body.is_movable()
        );

        self.bodies.push(body);
        self.names.push(name.clone());
        self.handles.insert(name, handle);

        Ok(handle)
    }

    /// ボディを取得
    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.index())
    }

    /// ボディを可変で取得
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle.index())
    }

    /// 名前からハンドルを取得
    pub fn handle_of(&self, name: &str) -> Option<BodyHandle> {
        self.handles.get(name).copied()
    }

    /// ハンドルから名前を取得
    pub fn name_of(&self, handle: BodyHandle) -> Option<&str> {
        self.names.get(handle.index()).map(String::as_str)
    }

    /// ボディに力を加える（次のティックで消費される）
    pub fn push(&mut self, handle: BodyHandle, fx: f64, fy: f64) -> Result<(), PhysicsError> {
        self.body_mut(handle)
            .ok_or(PhysicsError::UnknownBody(handle))?
            .push(fx, fy);
        Ok(())
    }

    /// ボディを相対的に移動
    pub fn move_body(&mut self, handle: BodyHandle, dx: f64, dy: f64) -> Result<(), PhysicsError> {
        self.body_mut(handle)
            .ok_or(PhysicsError::UnknownBody(handle))?
            .move_by(dx, dy);
        Ok(())
    }

    /// すべてのボディをハンドル順に列挙
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(index, body)| (BodyHandle(index as u32), body))
    }

    /// ボディ数を取得
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn gravity(&self) -> f64 {
        self.config.gravity
    }

    pub fn friction(&self) -> f64 {
        self.config.friction
    }

    /// 実行したティック数
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// `step` に渡された経過時間の合計
    pub fn simulated_time(&self) -> f64 {
        self.simulated_time
    }

    /// 物理シミュレーションを1ティック進める
    ///
    /// 動くボディを順番に、力の積分、他の全ボディとのスイープ判定、
    /// 衝突時刻順の衝突解決、位置の積分の順で更新します。
    ///
    /// # 引数
    ///
    /// * `delta_time` - 経過時間（`ForceScaling::TimeScaled` の場合のみ力に影響）
    pub fn step(&mut self, delta_time: f64) {
        for index in 0..self.bodies.len() {
            if self.bodies[index].is_movable() {
                self.step_body(index, delta_time);
            }
        }

        self.tick_count += 1;
        self.simulated_time += delta_time;
    }

    fn step_body(&mut self, index: usize, delta_time: f64) {
        let epsilon = self.config.epsilon;

        let body = &mut self.bodies[index];
        *body.contacts_mut() = ContactFlags::default();

        let force = dynamics::net_force(body, &self.config, delta_time);
        dynamics::integrate_velocity(body, force);

        let mover = body.rect();
        let mut velocity = body.velocity();

        // 他の全ボディとの衝突候補を集める
        let mut candidates: Vec<(f64, usize)> = self
            .bodies
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != index)
            .filter_map(|(other, target)| {
                sweep_rect(&mover, velocity, &target.rect(), epsilon).map(|hit| (hit.time, other))
            })
            .collect();

        // 衝突時刻の昇順、同時刻ならハンドル順
        candidates.sort_by(|a, b| impact_order(a.0, b.0).then(a.1.cmp(&b.1)));

        let mut contacts = ContactFlags::default();
        for &(_, other) in &candidates {
            // 先の解決で速度が変わっているので判定し直す
            let target = self.bodies[other].rect();
            if let Some(hit) = sweep_rect(&mover, velocity, &target, epsilon) {
                velocity = dynamics::apply_contact(velocity, &hit);
                contacts.record(hit.contact_normal);

                log::trace!(
                    "body #{} hit #{} at t = {} normal ({}, {})",
                    index,
                    other,
                    hit.time,
                    hit.contact_normal.x,
                    hit.contact_normal.y
                );
            }
        }

        // このティックで地面から離れたボディは接地していない
        if !approx_zero(velocity.y) {
            contacts.down = false;
        }

        let body = &mut self.bodies[index];
        body.set_linear_velocity(velocity);
        *body.contacts_mut() = contacts;
        dynamics::integrate_position(body);
        body.clear_force();
    }

    /// 線分に最初に当たるボディを検索
    ///
    /// # 引数
    ///
    /// * `origin` - 線分の始点
    /// * `end` - 線分の終点
    ///
    /// # 戻り値
    ///
    /// * 最も近いボディのハンドルと交差情報（同時刻ならハンドルの小さい方）
    pub fn raycast(&self, origin: Vec2, end: Vec2) -> Option<(BodyHandle, RayHit)> {
        self.bodies()
            .filter_map(|(handle, body)| {
                ray_vs_rect(origin, end, &body.rect(), self.config.epsilon).map(|hit| (handle, hit))
            })
            .min_by(|a, b| impact_order(a.1.time, b.1.time).then(a.0.cmp(&b.0)))
    }
}

/// 衝突時刻の比較
///
/// 辺に接した状態からの衝突は `-0.0` になることがあるので、`+0.0` と同時刻として扱う。
fn impact_order(a: f64, b: f64) -> Ordering {
    (a + 0.0).total_cmp(&(b + 0.0))
}
