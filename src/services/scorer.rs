//! 打分服务 - 业务能力层
//!
//! 只负责"给一条记录打分"，不关心排序和输出

use crate::error::RecordError;
use crate::models::{Restaurant, ScoredRestaurant};

/// 计算单条记录的分数
///
/// ```text
/// raw   = (rating * 10 - distance_from_me * 0.5 + sin(id) * 2) * 100 + 0.5
/// score = round(raw / 100, 2)
/// ```
///
/// 运算顺序不能化简，否则在两位小数边界上会得到不同的结果。
pub fn score(restaurant: &Restaurant) -> Result<f64, RecordError> {
    let rating = restaurant.rating_value();
    let distance = restaurant.distance_value();
    let id = restaurant.id_value();

    let raw = (rating * 10.0 - distance * 0.5 + id.sin() * 2.0) * 100.0 + 0.5;
    let value = round_to_cents(raw / 100.0);

    if value.is_finite() {
        Ok(value)
    } else {
        Err(RecordError::NonFiniteScore {
            id: restaurant.id.to_string(),
        })
    }
}

/// 打分并生成新的已打分记录
pub fn score_restaurant(restaurant: Restaurant) -> Result<ScoredRestaurant, RecordError> {
    let score = score(&restaurant)?;
    Ok(ScoredRestaurant { restaurant, score })
}

/// 保留两位小数
///
/// 按二进制值的精确十进制展开取舍，再读回最接近的 f64。
/// `(x * 100.0).round() / 100.0` 在乘法时会引入误差，不能替代。
fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;

    fn restaurant(id: i64, rating: f64, distance: f64) -> Restaurant {
        Restaurant {
            id: Number::from(id),
            restaurant_name: format!("R{id}"),
            rating: Number::from_f64(rating).unwrap(),
            distance_from_me: Number::from_f64(distance).unwrap(),
        }
    }

    #[test]
    fn test_known_scores() {
        assert_eq!(score(&restaurant(1, 4.0, 2.0)).unwrap(), 40.69);
        assert_eq!(score(&restaurant(2, 4.0, 1.0)).unwrap(), 41.32);
        assert_eq!(score(&restaurant(7, 4.5, 1.2)).unwrap(), 45.72);
        assert_eq!(score(&restaurant(100, 5.0, 10.0)).unwrap(), 43.99);
        assert_eq!(score(&restaurant(42, 4.2, 3.7)).unwrap(), 38.32);
    }

    #[test]
    fn test_rounding_follows_binary_value() {
        // 30.005 的二进制值略小于 30.005
        assert_eq!(score(&restaurant(0, 3.0, 0.0)).unwrap(), 30.0);
    }

    #[test]
    fn test_matches_formula() {
        for (id, rating, distance) in [(3, 4.7, 0.3), (11, 2.0, 8.25), (-5, 1.5, 0.0)] {
            let r = restaurant(id, rating, distance);
            let raw = (rating * 10.0 - distance * 0.5 + (id as f64).sin() * 2.0) * 100.0 + 0.5;
            let expected: f64 = format!("{:.2}", raw / 100.0).parse().unwrap();
            assert_eq!(score(&r).unwrap(), expected);
        }
    }

    #[test]
    fn test_integer_and_float_inputs_agree() {
        let int_rating = Restaurant {
            id: Number::from(1),
            restaurant_name: "A".to_string(),
            rating: Number::from(4),
            distance_from_me: Number::from(2),
        };
        assert_eq!(
            score(&int_rating).unwrap(),
            score(&restaurant(1, 4.0, 2.0)).unwrap()
        );
    }

    #[test]
    fn test_overflow_is_rejected() {
        let r = restaurant(1, f64::MAX, 0.0);
        assert!(matches!(
            score(&r),
            Err(RecordError::NonFiniteScore { .. })
        ));
    }

    #[test]
    fn test_score_restaurant_keeps_record() {
        let r = restaurant(2, 4.0, 1.0);
        let scored = score_restaurant(r.clone()).unwrap();
        assert_eq!(scored.restaurant, r);
        assert_eq!(scored.score, 41.32);
    }
}
