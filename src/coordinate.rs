use std::fmt;
use std::ops::{Add, Sub};

/// 地球平均半径（米），仅用于半正矢距离
pub const EARTH_R: f64 = 6_371_000.0;

// 定义坐标结构体
//
// 经纬度均为十进制度数。加减运算只把坐标当作二维向量使用，
// 用于施加或去除计算出的偏移量，没有大地测量意义。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// 把 (lat, lng) 视为平面向量的欧氏长度，只用作收敛判据。
    pub fn magnitude(&self) -> f64 {
        self.lat.hypot(self.lng)
    }

    /// Haversine distance in meters. Only meaningful over short separations,
    /// e.g. checking conversion deviation.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        fn hav(theta: f64) -> f64 {
            (theta / 2.0).sin().powi(2)
        }

        let delta = *self - *other;
        let h = hav(delta.lat.to_radians())
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * hav(delta.lng.to_radians());
        // 浮点误差可能让 h 略大于 1
        2.0 * EARTH_R * h.sqrt().min(1.0).asin()
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, other: Coordinate) -> Coordinate {
        Coordinate::new(self.lng + other.lng, self.lat + other.lat)
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, other: Coordinate) -> Coordinate {
        Coordinate::new(self.lng - other.lng, self.lat - other.lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}
