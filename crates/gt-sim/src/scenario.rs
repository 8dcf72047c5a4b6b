//! Ready-made road layouts.

use gt_core::{Direction, Point, Rect};
use gt_road::{RoadNetwork, RoadNetworkBuilder, RoadResult};

/// World extent of [`two_lane_road`].
pub const TWO_LANE_WIDTH: f64 = 1800.0;
pub const TWO_LANE_HEIGHT: f64 = 300.0;

/// One horizontal two-lane road with a single crosswalk in the middle.
///
/// ```text
///   world       1800 × 300
///   road        y ∈ [25, 275]
///   lane 0      y ∈ [25, 150]    East-bound
///   lane 1      y ∈ [150, 275]   West-bound
///   crosswalk   x ∈ [875, 925]   over both lanes
/// ```
pub fn two_lane_road() -> RoadResult<RoadNetwork> {
    let rect = |x0, y0, x1, y1| Rect::new(Point::new(x0, y0), Point::new(x1, y1));

    let mut b = RoadNetworkBuilder::new(TWO_LANE_WIDTH, TWO_LANE_HEIGHT);
    let road = b.add_road(rect(0.0, 25.0, TWO_LANE_WIDTH, 275.0)?);
    b.add_lane(road, rect(0.0, 25.0, TWO_LANE_WIDTH, 150.0)?, Direction::East)?;
    b.add_lane(road, rect(0.0, 150.0, TWO_LANE_WIDTH, 275.0)?, Direction::West)?;
    b.add_crosswalk(rect(875.0, 25.0, 925.0, 275.0)?);
    b.build()
}
