//! 中国地图坐标系转换：WGS84、GCJ02（火星坐标）、BD09（百度坐标）。
//!
//! 正向转换是闭式公式。反向转换提供两种：单步近似（一次正向求值，米级误差）
//! 和精确版本（不动点迭代，收敛到 [`PRC_EPS`] 度以内）。
//!
//! 只有 WGS84 一端做中国范围检查；范围外的坐标原样返回，并通过 `log`
//! 记录一条警告，而不是报错。

pub mod coordinate;
pub mod error;
pub mod gcj02_bd09;
pub mod gcj02_wgs84;
pub mod refine;
pub mod region;

pub use coordinate::{Coordinate, EARTH_R};
pub use error::{ConvertError, Result};
pub use gcj02_bd09::{bd09_to_gcj02, bd09_to_gcj02_precise, gcj02_to_bd09};
pub use gcj02_wgs84::{distortion_meters, gcj02_to_wgs84, gcj02_to_wgs84_precise, wgs84_to_gcj02};
pub use refine::{RefineOptions, Refined, Refiner, PRC_EPS};
pub use region::{ensure_in_china, is_in_china_bbox};

// 定义坐标系类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordSystem {
    WGS84,
    GCJ02,
    BD09,
}

/// BD09 -> WGS84 的迭代反算器
pub const BD_WGS_REFINER: Refiner = Refiner::new(wgs84_to_bd09, bd09_to_wgs84);

/// WGS84 转 BD09，经由 GCJ02。区域检查只作用于 WGS84 一端。
pub fn wgs84_to_bd09(coord: Coordinate, check_china: bool) -> Coordinate {
    gcj02_to_bd09(wgs84_to_gcj02(coord, check_china))
}

/// BD09 转 WGS84 的单步近似。
pub fn bd09_to_wgs84(coord: Coordinate, check_china: bool) -> Coordinate {
    gcj02_to_wgs84(bd09_to_gcj02(coord), check_china)
}

pub fn bd09_to_wgs84_precise(coord: Coordinate, check_china: bool) -> Coordinate {
    BD_WGS_REFINER.refine(coord, check_china)
}

// 核心转换实现
pub fn transform(coord: Coordinate, from: CoordSystem, to: CoordSystem) -> Coordinate {
    match (from, to) {
        (CoordSystem::WGS84, CoordSystem::GCJ02) => wgs84_to_gcj02(coord, true),
        (CoordSystem::GCJ02, CoordSystem::WGS84) => gcj02_to_wgs84(coord, true),
        (CoordSystem::GCJ02, CoordSystem::BD09) => gcj02_to_bd09(coord),
        (CoordSystem::BD09, CoordSystem::GCJ02) => bd09_to_gcj02(coord),
        (CoordSystem::WGS84, CoordSystem::BD09) => wgs84_to_bd09(coord, true),
        (CoordSystem::BD09, CoordSystem::WGS84) => bd09_to_wgs84(coord, true),
        _ => coord, // 相同坐标系直接返回
    }
}

/// 与 [`transform`] 相同，但反向转换走迭代精确版本；迭代未收敛时返回
/// [`ConvertError::NotConverged`]。
pub fn transform_precise(
    coord: Coordinate,
    from: CoordSystem,
    to: CoordSystem,
    options: &RefineOptions,
) -> Result<Coordinate> {
    let refiner = match (from, to) {
        (CoordSystem::GCJ02, CoordSystem::WGS84) => gcj02_wgs84::REFINER,
        (CoordSystem::BD09, CoordSystem::GCJ02) => gcj02_bd09::REFINER,
        (CoordSystem::BD09, CoordSystem::WGS84) => BD_WGS_REFINER,
        _ => return Ok(transform(coord, from, to)),
    };
    refiner.refine_with(coord, true, options).into_result()
}
