//! 中国范围的粗略矩形判断，只是过滤器，不是国界。

use crate::error::{ConvertError, Result};
use crate::Coordinate;

pub const CHINA_MIN_LAT: f64 = 0.8293;
pub const CHINA_MAX_LAT: f64 = 55.8271;
pub const CHINA_MIN_LNG: f64 = 72.004;
pub const CHINA_MAX_LNG: f64 = 137.8347;

// 检查坐标是否在中国范围内（闭区间）
pub fn is_in_china_bbox(coord: Coordinate) -> bool {
    (CHINA_MIN_LNG..=CHINA_MAX_LNG).contains(&coord.lng)
        && (CHINA_MIN_LAT..=CHINA_MAX_LAT).contains(&coord.lat)
}

/// Strict variant for callers that would rather reject than pass through.
pub fn ensure_in_china(coord: Coordinate) -> Result<Coordinate> {
    if is_in_china_bbox(coord) {
        Ok(coord)
    } else {
        Err(ConvertError::OutOfChina(coord))
    }
}

/// 开启检查且坐标在范围外时记录警告并返回 `false`，调用方应原样返回输入。
pub(crate) fn should_transform(coord: Coordinate, check_china: bool) -> bool {
    if check_china && !is_in_china_bbox(coord) {
        log::warn!("Non-Chinese coords found, returning as-is: {}", coord);
        return false;
    }
    true
}
