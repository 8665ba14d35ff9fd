//! 物理演算モジュール
//!
//! 1ティック分の力の計算、速度と位置の積分、衝突による速度の補正を提供します。

use crate::physics::body::Body;
use crate::physics::collision::RayHit;
use crate::physics::config::{ForceScaling, PhysicsConfig};
use crate::utils::math::Vec2;

/// ボディにかかる合力を計算
///
/// 外力 + 速度に比例する抵抗、y方向にはさらに `質量 * 重力` を引きます。
///
/// # 引数
///
/// * `body` - 対象のボディ
/// * `config` - ワールドの設定
/// * `delta_time` - 経過時間（`ForceScaling::TimeScaled` の場合のみ使用）
///
/// # 戻り値
///
/// * 合力
pub fn net_force(body: &Body, config: &PhysicsConfig, delta_time: f64) -> Vec2 {
    let applied = body.force();
    let velocity = body.velocity();

    let total = Vec2::new(
        applied.x + (config.friction * (-velocity.x)),
        applied.y + (config.friction * (-velocity.y)) - (body.mass() * config.gravity),
    );

    match config.force_scaling {
        ForceScaling::Unscaled => total,
        ForceScaling::TimeScaled => total * delta_time,
    }
}

/// 合力から速度を更新 (a = F / m)
pub fn integrate_velocity(body: &mut Body, force: Vec2) {
    let acceleration = Vec2::new(force.x / body.mass(), force.y / body.mass());
    body.set_linear_velocity(body.velocity() + acceleration);
}

/// 衝突に応じて速度を補正
///
/// 法線方向の速度成分を、衝突が早いほど大きく打ち消します（反転することもあります）。
///
/// # 引数
///
/// * `velocity` - 現在の速度
/// * `hit` - 衝突情報
///
/// # 戻り値
///
/// * 補正後の速度
pub fn apply_contact(velocity: Vec2, hit: &RayHit) -> Vec2 {
    let normal = hit.contact_normal;
    let remaining = 1.0 - hit.time;

    Vec2::new(
        velocity.x + normal.x * velocity.x.abs() * remaining,
        velocity.y + normal.y * velocity.y.abs() * remaining,
    )
}

/// 速度で位置を進める（陽的オイラー法）
pub fn integrate_position(body: &mut Body) {
    let velocity = body.velocity();
    body.move_by(velocity.x, velocity.y);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn falling_body(mass: f64) -> Body {
        Body::new(Vec2::new(0.0, 100.0), Vec2::new(20.0, 20.0), mass, true).unwrap()
    }

    #[test]
    fn test_gravity_only_force() {
        let body = falling_body(2.0);
        let force = net_force(&body, &PhysicsConfig::default(), 1.0);

        assert_eq!(force, Vec2::new(0.0, -2.0));
    }

    #[test]
    fn test_drag_opposes_velocity() {
        let mut body = falling_body(1.0);
        body.set_velocity(Vec2::new(10.0, -5.0));
        body.push(3.0, 0.0);

        let force = net_force(&body, &PhysicsConfig::default(), 1.0);

        assert_eq!(force.x, 3.0 + 0.1 * -10.0);
        assert_eq!(force.y, 0.1 * 5.0 - 1.0);
    }

    #[test]
    fn test_time_scaled_force() {
        let config = PhysicsConfig {
            force_scaling: ForceScaling::TimeScaled,
            ..PhysicsConfig::default()
        };
        let mut body = falling_body(1.0);
        body.push(4.0, 0.0);

        let force = net_force(&body, &config, 0.5);
        assert_eq!(force, Vec2::new(2.0, -0.5));

        // Unscaled では経過時間を無視する
        let force = net_force(&body, &PhysicsConfig::default(), 0.5);
        assert_eq!(force, Vec2::new(4.0, -1.0));
    }

    #[test]
    fn test_integrate_velocity_divides_by_mass() {
        let mut body = falling_body(4.0);
        integrate_velocity(&mut body, Vec2::new(2.0, -8.0));

        assert_eq!(body.velocity(), Vec2::new(0.5, -2.0));
    }

    #[test]
    fn test_apply_contact_stops_at_impact() {
        let hit = RayHit {
            contact_point: Vec2::zero(),
            contact_normal: Vec2::new(0.0, 1.0),
            time: 0.25,
        };

        let velocity = apply_contact(Vec2::new(3.0, -8.0), &hit);

        // 法線方向は衝突時刻までの分だけ残る
        assert_eq!(velocity, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_apply_contact_at_time_zero_cancels_normal_component() {
        let hit = RayHit {
            contact_point: Vec2::zero(),
            contact_normal: Vec2::new(-1.0, 0.0),
            time: 0.0,
        };

        let velocity = apply_contact(Vec2::new(7.0, 1.5), &hit);
        assert_eq!(velocity, Vec2::new(0.0, 1.5));
    }

    #[test]
    fn test_integrate_position() {
        let mut body = falling_body(1.0);
        body.set_velocity(Vec2::new(1.5, -2.5));
        integrate_position(&mut body);

        assert_eq!(body.position(), Vec2::new(1.5, 97.5));
        assert_eq!(body.center(), Vec2::new(11.5, 107.5));
    }
}
