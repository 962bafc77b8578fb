//! 排序服务 - 业务能力层
//!
//! 排序规则（按优先级）：
//! 1. 分数降序
//! 2. 评分降序
//! 3. 距离升序
//! 4. 餐厅名称升序（区分大小写）
//!
//! 全部相同时保持输入顺序。

use crate::models::ScoredRestaurant;
use std::cmp::Ordering;

/// 默认保留的记录数
pub const DEFAULT_TOP_K: usize = 10;

/// 组合比较器，`Less` 表示 `a` 排在 `b` 前面
pub fn compare(a: &ScoredRestaurant, b: &ScoredRestaurant) -> Ordering {
    cmp_f64(b.score, a.score)
        .then_with(|| cmp_f64(b.restaurant.rating_value(), a.restaurant.rating_value()))
        .then_with(|| {
            cmp_f64(
                a.restaurant.distance_value(),
                b.restaurant.distance_value(),
            )
        })
        .then_with(|| a.restaurant.restaurant_name.cmp(&b.restaurant.restaurant_name))
}

/// 排序并截取前 `top_k` 条
pub fn rank(mut records: Vec<ScoredRestaurant>, top_k: usize) -> Vec<ScoredRestaurant> {
    // sort_by 是稳定排序
    records.sort_by(compare);
    records.truncate(top_k);
    records
}

// JSON 里没有 NaN，记录中的数值都是有限数
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
