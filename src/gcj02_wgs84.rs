//! WGS84 与 GCJ02 之间的转换。
//!
//! 正向是一个多项式加正弦噪声的偏移模型，偏移量以米为单位，再按
//! 克拉索夫斯基椭球的弧长换算成度。反向没有闭式解，单步版本只做一次
//! 线性修正，精确版本交给 [`Refiner`](crate::refine::Refiner) 迭代。

use std::f64::consts::PI;

use crate::refine::Refiner;
use crate::region::should_transform;
use crate::Coordinate;

/// 克拉索夫斯基 1940 椭球长半轴
pub const GCJ_A: f64 = 6378245.0;
/// 偏心率平方。与 WGS84 椭球混用是原始加密算法的一部分，不要“修正”。
pub const GCJ_EE: f64 = 0.00669342162296594323;

/// 偏移模型的中心点，约为中国的几何中心
const ORIGIN_LNG: f64 = 105.0;
const ORIGIN_LAT: f64 = 35.0;

/// GCJ02 -> WGS84 的迭代反算器
pub const REFINER: Refiner = Refiner::new(wgs84_to_gcj02, gcj02_to_wgs84);

fn transform_lat(x: f64, y: f64) -> f64 {
    -100.0
        + 2.0 * x
        + 3.0 * y
        + 0.2 * y * y
        + 0.1 * x * y
        + 0.2 * x.abs().sqrt()
        + (2.0 * (x * 6.0 * PI).sin()
            + 2.0 * (x * 2.0 * PI).sin()
            + 2.0 * (y * PI).sin()
            + 4.0 * (y / 3.0 * PI).sin()
            + 16.0 * (y / 12.0 * PI).sin()
            + 32.0 * (y / 30.0 * PI).sin())
            * 20.0
            / 3.0
}

fn transform_lon(x: f64, y: f64) -> f64 {
    300.0
        + x
        + 2.0 * y
        + 0.1 * x * x
        + 0.1 * x * y
        + 0.1 * x.abs().sqrt()
        + (2.0 * (x * 6.0 * PI).sin()
            + 2.0 * (x * 2.0 * PI).sin()
            + 2.0 * (x * PI).sin()
            + 4.0 * (x / 3.0 * PI).sin()
            + 15.0 * (x / 12.0 * PI).sin()
            + 30.0 * (x / 30.0 * PI).sin())
            * 20.0
            / 3.0
}

/// 以米为单位的偏移量 `(d_lng, d_lat)`，尚未换算成度。
///
/// 在 (105E, 35N) 处正好是 `(300, -100)`。
pub fn distortion_meters(coord: Coordinate) -> (f64, f64) {
    let x = coord.lng - ORIGIN_LNG;
    let y = coord.lat - ORIGIN_LAT;
    (transform_lon(x, y), transform_lat(x, y))
}

fn delta(coord: Coordinate) -> Coordinate {
    let (d_lon, d_lat) = distortion_meters(coord);

    let rad_lat = coord.lat.to_radians();
    let magic = 1.0 - GCJ_EE * rad_lat.sin().powi(2);

    // 纬度、经度每度对应的弧长
    let lat_deg_arclen = (GCJ_A * (1.0 - GCJ_EE) * magic.powf(1.5)).to_radians();
    let lon_deg_arclen = (GCJ_A * rad_lat.cos() / magic.sqrt()).to_radians();

    Coordinate::new(d_lon / lon_deg_arclen, d_lat / lat_deg_arclen)
}

/// WGS84 转 GCJ02。`check_china` 为真且坐标不在中国范围内时原样返回并记录警告。
pub fn wgs84_to_gcj02(coord: Coordinate, check_china: bool) -> Coordinate {
    if !should_transform(coord, check_china) {
        return coord;
    }
    coord + delta(coord)
}

/// GCJ02 转 WGS84 的单步近似，误差在米级。
pub fn gcj02_to_wgs84(coord: Coordinate, check_china: bool) -> Coordinate {
    coord - (wgs84_to_gcj02(coord, check_china) - coord)
}

/// GCJ02 转 WGS84，迭代到 [`PRC_EPS`](crate::refine::PRC_EPS) 以内。
pub fn gcj02_to_wgs84_precise(coord: Coordinate, check_china: bool) -> Coordinate {
    REFINER.refine(coord, check_china)
}
