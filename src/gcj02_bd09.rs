//! GCJ02 与 BD09 之间的转换：极坐标扰动加固定偏移。

use crate::refine::Refiner;
use crate::Coordinate;

/// 百度坐标的人为偏移量
pub const BD_DLAT: f64 = 0.0060;
pub const BD_DLON: f64 = 0.0065;

/// BD09 -> GCJ02 的迭代反算器
pub const REFINER: Refiner = Refiner::new(gcj02_to_bd09_leg, bd09_to_gcj02_leg);

pub fn gcj02_to_bd09(coord: Coordinate) -> Coordinate {
    let x = coord.lng;
    let y = coord.lat;
    let z = (x * x + y * y).sqrt() + 0.00002 * (y.to_radians() * 3000.0).sin();
    let theta = y.atan2(x) + 0.000003 * (x.to_radians() * 3000.0).cos();

    Coordinate::new(z * theta.cos() + BD_DLON, z * theta.sin() + BD_DLAT)
}

/// BD09 转 GCJ02 的近似反算。
///
/// 扰动项在去掉偏移后的坐标上求值，与正向的求值点不同，所以不是严格的
/// 反函数，残差在亚米级。需要更高精度时用 [`bd09_to_gcj02_precise`]。
pub fn bd09_to_gcj02(coord: Coordinate) -> Coordinate {
    let x = coord.lng - BD_DLON;
    let y = coord.lat - BD_DLAT;
    let z = (x * x + y * y).sqrt() - 0.00002 * (y.to_radians() * 3000.0).sin();
    let theta = y.atan2(x) - 0.000003 * (x.to_radians() * 3000.0).cos();

    Coordinate::new(z * theta.cos(), z * theta.sin())
}

pub fn bd09_to_gcj02_precise(coord: Coordinate) -> Coordinate {
    REFINER.refine(coord, false)
}

// 迭代器统一使用 (坐标, 区域检查) 的签名，百度转换不做区域检查
fn gcj02_to_bd09_leg(coord: Coordinate, _check_china: bool) -> Coordinate {
    gcj02_to_bd09(coord)
}

fn bd09_to_gcj02_leg(coord: Coordinate, _check_china: bool) -> Coordinate {
    bd09_to_gcj02(coord)
}
