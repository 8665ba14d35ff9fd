//! 衝突検出モジュール
//!
//! このモジュールは、連続的（スイープ）な衝突検出アルゴリズムを提供します。
//! 線分と軸平行矩形の交差（スラブ法）と、それを利用した
//! 移動矩形と静止矩形の衝突判定（ミンコフスキー和）をサポートしています。

use crate::utils::math::{Rect, Vec2};

/// 線分と矩形の交差結果
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// 接触点
    pub contact_point: Vec2,
    /// 接触法線（衝突した面の向き、軸方向の単位ベクトル）
    pub contact_normal: Vec2,
    /// 衝突時刻（線分上の正規化された位置、0〜1）
    pub time: f64,
}

/// 方向成分がゼロの場合に符号付きイプシロンへ置き換える
///
/// 始点が矩形の中心以前にあれば負、中心より後ろにあれば正の値を使います。
fn nonzero_direction(component: f64, origin: f64, rect_center: f64, epsilon: f64) -> f64 {
    if component != 0.0 {
        component
    } else if origin <= rect_center {
        -epsilon
    } else {
        epsilon
    }
}

/// 線分と軸平行矩形の交差判定（スラブ法）
///
/// # 引数
///
/// * `origin` - 線分の始点
/// * `end` - 線分の終点
/// * `target` - 判定する矩形
/// * `epsilon` - 方向成分がゼロの場合に代わりに使う微小値
///
/// # 戻り値
///
/// * `Some(RayHit)` - 0 ≤ t ≤ 1 の範囲で最初に交差した点
/// * `None` - 交差しない
pub fn ray_vs_rect(origin: Vec2, end: Vec2, target: &Rect, epsilon: f64) -> Option<RayHit> {
    let center = target.center();
    let direction = Vec2::new(
        nonzero_direction(end.x - origin.x, origin.x, center.x, epsilon),
        nonzero_direction(end.y - origin.y, origin.y, center.y, epsilon),
    );

    let mut near_x = (target.position.x - origin.x) / direction.x;
    let mut far_x = (target.right() - origin.x) / direction.x;

    // yは上向きが正の座標系なので、近い側と遠い側をxと逆にする
    let mut near_y = (target.top() - origin.y) / direction.y;
    let mut far_y = (target.position.y - origin.y) / direction.y;

    if near_x > far_x {
        std::mem::swap(&mut near_x, &mut far_x);
    }
    if near_y > far_y {
        std::mem::swap(&mut near_y, &mut far_y);
    }

    if near_x > far_y || near_y > far_x {
        return None;
    }

    let hit_near = near_x.max(near_y);
    let hit_far = far_x.min(far_y);

    // 線分の後ろ側、または線分の先での交差
    if hit_far < 0.0 || hit_near > 1.0 || hit_near < 0.0 {
        return None;
    }

    // 角に同時に当たった場合（near_x == near_y）は垂直方向の法線を採用する
    let contact_normal = if near_x > near_y {
        Vec2::new(-direction.x.signum(), 0.0)
    } else {
        Vec2::new(0.0, -direction.y.signum())
    };

    Some(RayHit {
        contact_point: origin + direction * hit_near,
        contact_normal,
        time: hit_near,
    })
}

/// 移動する矩形と静止した矩形の衝突判定
///
/// 1ティック分の速度で移動する矩形が、静止した目標に最初に接触する時刻を求めます。
/// 目標を移動矩形の大きさで拡張し、移動矩形の中心から `中心 + 速度` への線分で判定します。
///
/// # 引数
///
/// * `mover` - 移動する矩形
/// * `velocity` - 1ティックあたりの移動量
/// * `target` - 静止した矩形
/// * `epsilon` - 線分判定で使う微小値
///
/// # 戻り値
///
/// * `Some(RayHit)` - 衝突情報（接触点は拡張後の空間、つまり移動矩形の中心の位置）
/// * `None` - 衝突しない、または速度が厳密に (0, 0)
pub fn sweep_rect(mover: &Rect, velocity: Vec2, target: &Rect, epsilon: f64) -> Option<RayHit> {
    // 静止している矩形はスイープ衝突しない
    if velocity.is_zero() {
        return None;
    }

    let expanded = target.expanded_by(mover.size);
    let origin = mover.center();

    ray_vs_rect(origin, origin + velocity, &expanded, epsilon)
}
