//! 通用的不动点迭代，把廉价的单步反算提升为高精度反算。
//!
//! 给定正向转换 `F` 和它的单步近似反算 `G`，从 `G(target)` 出发，反复
//! 计算 `F(estimate) - target` 并从估计值中减去，直到残差小于阈值或达到
//! 迭代上限。残差以坐标自身的度数计，不是米。

use crate::error::{ConvertError, Result};
use crate::Coordinate;

/// 默认收敛阈值（度）
pub const PRC_EPS: f64 = 1e-5;
/// 默认迭代上限，同时也是正向转换的最大调用次数
pub const MAX_ITERATIONS: u32 = 10;

/// 转换函数的统一签名：`(坐标, 是否检查中国范围)`
pub type TransformFn = fn(Coordinate, bool) -> Coordinate;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RefineOptions {
    pub epsilon: f64,
    pub max_iterations: u32,
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            epsilon: PRC_EPS,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

/// 一次迭代反算的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refined {
    pub coord: Coordinate,
    /// 正向转换的调用次数
    pub iterations: u32,
    /// 最后一次正向转换与目标之差的长度
    pub residual: f64,
    pub converged: bool,
}

impl Refined {
    /// Turns a run that stopped at the iteration cap into an error.
    pub fn into_result(self) -> Result<Coordinate> {
        if self.converged {
            Ok(self.coord)
        } else {
            Err(ConvertError::NotConverged {
                iterations: self.iterations,
                residual: self.residual,
            })
        }
    }
}

#[derive(Clone, Copy)]
pub struct Refiner {
    forward: TransformFn,
    reverse: TransformFn,
}

impl Refiner {
    pub const fn new(forward: TransformFn, reverse: TransformFn) -> Self {
        Self { forward, reverse }
    }

    /// 使用默认参数迭代，到达上限时静默返回当前最优估计。
    pub fn refine(&self, target: Coordinate, check_china: bool) -> Coordinate {
        self.refine_with(target, check_china, &RefineOptions::default())
            .coord
    }

    /// `check_china` 只传给初始的单步反算；迭代中的估计值可能暂时越出
    /// 中国范围，所以正向转换一律不做检查。
    pub fn refine_with(
        &self,
        target: Coordinate,
        check_china: bool,
        options: &RefineOptions,
    ) -> Refined {
        let mut estimate = (self.reverse)(target, check_china);
        let mut residual = f64::INFINITY;
        let mut iterations = 0;

        while iterations < options.max_iterations && residual > options.epsilon {
            let diff = (self.forward)(estimate, false) - target;
            estimate = estimate - diff;
            residual = diff.magnitude();
            iterations += 1;
            log::trace!("refine #{}: estimate {}, residual {:e}", iterations, estimate, residual);
        }

        let converged = residual <= options.epsilon;
        if !converged {
            log::debug!(
                "refinement of {} stopped after {} iterations, residual {:e}",
                target,
                iterations,
                residual
            );
        }

        Refined {
            coord: estimate,
            iterations,
            residual,
            converged,
        }
    }
}

impl std::fmt::Debug for Refiner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refiner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    thread_local! {
        static CALLS: Cell<u32> = const { Cell::new(0) };
    }

    // 一个永远不收敛的正向转换：每次都把点推远
    fn diverging(coord: Coordinate, _check_china: bool) -> Coordinate {
        CALLS.with(|c| c.set(c.get() + 1));
        Coordinate::new(coord.lng * 3.0 + 1.0, coord.lat * 3.0 + 1.0)
    }

    fn identity(coord: Coordinate, _check_china: bool) -> Coordinate {
        coord
    }

    fn shift(coord: Coordinate, _check_china: bool) -> Coordinate {
        Coordinate::new(coord.lng + 0.5, coord.lat - 0.25)
    }

    #[test]
    fn test_iteration_cap() {
        CALLS.with(|c| c.set(0));
        let refiner = Refiner::new(diverging, identity);
        let refined = refiner.refine_with(Coordinate::new(1.0, 1.0), true, &RefineOptions::default());
        assert_eq!(refined.iterations, MAX_ITERATIONS);
        assert_eq!(CALLS.with(|c| c.get()), MAX_ITERATIONS);
        assert!(!refined.converged);
        assert!(matches!(
            refined.into_result(),
            Err(ConvertError::NotConverged { iterations: 10, .. })
        ));
    }

    #[test]
    fn test_exact_inverse_converges_immediately() {
        let refiner = Refiner::new(shift, |c, _| Coordinate::new(c.lng - 0.5, c.lat + 0.25));
        let target = Coordinate::new(100.0, 30.0);
        let refined = refiner.refine_with(target, false, &RefineOptions::default());
        assert_eq!(refined.iterations, 1);
        assert!(refined.converged);
        assert!((shift(refined.coord, false) - target).magnitude() < PRC_EPS);
    }

    #[test]
    fn test_poor_initial_guess_still_converges() {
        // 初值完全不对，线性正向转换一步就能修正
        let refiner = Refiner::new(shift, identity);
        let target = Coordinate::new(100.0, 30.0);
        let refined = refiner.refine_with(target, false, &RefineOptions::default());
        assert!(refined.converged);
        assert_eq!(refined.iterations, 2);
        assert_eq!(refined.into_result(), Ok(Coordinate::new(99.5, 30.25)));
    }

    #[test]
    fn test_zero_iterations() {
        let refiner = Refiner::new(shift, identity);
        let options = RefineOptions {
            max_iterations: 0,
            ..Default::default()
        };
        let target = Coordinate::new(100.0, 30.0);
        let refined = refiner.refine_with(target, false, &options);
        assert_eq!(refined.iterations, 0);
        assert_eq!(refined.coord, target);
        assert!(!refined.converged);
    }
}
