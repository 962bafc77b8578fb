use crate::error::RecordError;
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// 输入中的一条餐厅记录
///
/// 数值字段保留原始 JSON 表示，输出时整数仍写成整数。
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: Number,
    pub restaurant_name: String,
    pub rating: Number,
    pub distance_from_me: Number,
}

/// 已打分的记录，创建后不再修改
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRestaurant {
    pub restaurant: Restaurant,
    pub score: f64,
}

/// 输出与提交使用的结果记录，字段顺序固定
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub id: Number,
    pub restaurant_name: String,
    pub rating: Number,
    pub distance_from_me: Number,
    pub score: f64,
}

impl Restaurant {
    /// 从原始 JSON 记录解析
    ///
    /// 字段按 `rating`、`distance_from_me`、`id`、`restaurant_name` 的顺序校验，
    /// 报告遇到的第一个问题。
    pub fn from_json(value: &Value) -> Result<Self, RecordError> {
        let obj = value.as_object().ok_or(RecordError::TypeMismatch {
            field: "record",
            expected: "object",
            found: json_type_name(value),
        })?;

        let rating = number_field(obj, "rating")?;
        let distance_from_me = number_field(obj, "distance_from_me")?;
        let id = number_field(obj, "id")?;
        let restaurant_name = string_field(obj, "restaurant_name")?;

        Ok(Self {
            id,
            restaurant_name,
            rating,
            distance_from_me,
        })
    }

    pub fn rating_value(&self) -> f64 {
        as_f64(&self.rating)
    }

    pub fn distance_value(&self) -> f64 {
        as_f64(&self.distance_from_me)
    }

    pub fn id_value(&self) -> f64 {
        as_f64(&self.id)
    }
}

impl ScoredRestaurant {
    /// 投影为输出记录
    pub fn to_result(&self) -> ResultRecord {
        ResultRecord {
            id: self.restaurant.id.clone(),
            restaurant_name: self.restaurant.restaurant_name.clone(),
            rating: self.restaurant.rating.clone(),
            distance_from_me: self.restaurant.distance_from_me.clone(),
            score: self.score,
        }
    }
}

impl std::fmt::Display for ScoredRestaurant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} [评分: {}, 距离: {}, 分数: {:.2}]",
            self.restaurant.id,
            self.restaurant.restaurant_name,
            self.restaurant.rating,
            self.restaurant.distance_from_me,
            self.score
        )
    }
}

fn number_field(obj: &Map<String, Value>, field: &'static str) -> Result<Number, RecordError> {
    match obj.get(field) {
        None => Err(RecordError::MissingField { field }),
        Some(Value::Number(n)) => Ok(n.clone()),
        Some(other) => Err(RecordError::TypeMismatch {
            field,
            expected: "number",
            found: json_type_name(other),
        }),
    }
}

fn string_field(obj: &Map<String, Value>, field: &'static str) -> Result<String, RecordError> {
    match obj.get(field) {
        None => Err(RecordError::MissingField { field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(RecordError::TypeMismatch {
            field,
            expected: "string",
            found: json_type_name(other),
        }),
    }
}

// 不启用 arbitrary_precision 时任意 Number 都能转为 f64
fn as_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

/// JSON 值的类型名称，用于错误信息
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
