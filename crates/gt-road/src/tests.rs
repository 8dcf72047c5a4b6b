//! Unit tests for gt-road.
//!
//! All tests use hand-built networks.

#[cfg(test)]
mod helpers {
    use gt_core::{Direction, LaneId, Point, Rect};

    use crate::{RoadNetwork, RoadNetworkBuilder};

    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect::new(Point::new(x0, y0), Point::new(x1, y1)).unwrap()
    }

    /// Horizontal road y ∈ [100, 200] across a 1000 × 300 world:
    ///
    /// ```text
    ///   lane 0  y ∈ [100, 150]  East-bound
    ///   lane 1  y ∈ [150, 200]  West-bound
    ///   crosswalk 0  x ∈ [200, 250]
    ///   crosswalk 1  x ∈ [600, 650]
    /// ```
    pub fn two_crosswalk_road() -> (RoadNetwork, [LaneId; 2]) {
        let mut b = RoadNetworkBuilder::new(1000.0, 300.0);
        let road = b.add_road(rect(0.0, 100.0, 1000.0, 200.0));
        let east = b.add_lane(road, rect(0.0, 100.0, 1000.0, 150.0), Direction::East).unwrap();
        let west = b.add_lane(road, rect(0.0, 150.0, 1000.0, 200.0), Direction::West).unwrap();
        b.add_crosswalk(rect(200.0, 100.0, 250.0, 200.0));
        b.add_crosswalk(rect(600.0, 100.0, 650.0, 200.0));
        (b.build().unwrap(), [east, west])
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use gt_core::{CrosswalkId, Direction, LaneId, RoadId};

    use super::helpers::{rect, two_crosswalk_road};
    use crate::{RoadError, RoadNetworkBuilder};

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new(10.0, 10.0).build().unwrap();
        assert!(net.lanes.is_empty());
        assert!(net.crosswalks.is_empty());
    }

    #[test]
    fn overlap_lanes_derived_from_intersection() {
        let (net, [east, west]) = two_crosswalk_road();
        assert_eq!(net.crosswalks[0].overlap_lanes, vec![east, west]);
        assert_eq!(net.roads[0].lanes, vec![east, west]);
    }

    #[test]
    fn incoming_slots_match_overlap_lanes_before_refresh() {
        let (net, _) = two_crosswalk_road();
        for cw in &net.crosswalks {
            assert_eq!(cw.incoming().len(), cw.overlap_lanes.len());
            assert!(cw.incoming().iter().all(Option::is_none));
        }
    }

    #[test]
    fn lane_on_unknown_road_errors() {
        let mut b = RoadNetworkBuilder::new(10.0, 10.0);
        let err = b
            .add_lane(RoadId(3), rect(0.0, 0.0, 10.0, 5.0), Direction::East)
            .unwrap_err();
        assert!(matches!(err, RoadError::UnknownRoad(RoadId(3))));
    }

    #[test]
    fn explicit_overlap_with_unknown_lane_errors() {
        let mut b = RoadNetworkBuilder::new(10.0, 10.0);
        b.add_crosswalk_over(rect(0.0, 0.0, 1.0, 1.0), &[LaneId(0)]);
        assert!(matches!(b.build(), Err(RoadError::UnknownLane(LaneId(0)))));
    }

    #[test]
    fn explicit_overlap_sorted_and_deduped() {
        let mut b = RoadNetworkBuilder::new(100.0, 100.0);
        let road = b.add_road(rect(0.0, 0.0, 100.0, 20.0));
        let l0 = b.add_lane(road, rect(0.0, 0.0, 100.0, 10.0), Direction::East).unwrap();
        let l1 = b.add_lane(road, rect(0.0, 10.0, 100.0, 20.0), Direction::East).unwrap();
        let cw = b.add_crosswalk_over(rect(40.0, 0.0, 50.0, 20.0), &[l1, l0, l1]);
        let net = b.build().unwrap();
        assert_eq!(cw, CrosswalkId(0));
        assert_eq!(net.crosswalks[0].overlap_lanes, vec![l0, l1]);
        assert_eq!(net.crosswalks[0].incoming().len(), 2);
    }
}

// ── Crosswalk ahead ───────────────────────────────────────────────────────────

#[cfg(test)]
mod crosswalk_ahead {
    use gt_core::{CrosswalkId, Direction, Point};

    use super::helpers::{rect, two_crosswalk_road};
    use crate::RoadNetworkBuilder;

    #[test]
    fn east_picks_nearest_in_front() {
        let (net, _) = two_crosswalk_road();
        let pos = Point::new(100.0, 90.0);
        assert_eq!(net.crosswalk_ahead(pos, Direction::East), Some(CrosswalkId(0)));
    }

    #[test]
    fn east_skips_crosswalks_behind() {
        let (net, _) = two_crosswalk_road();
        // Past crosswalk 0's right edge (250): only crosswalk 1 qualifies
        // even though crosswalk 0 is closer.
        let pos = Point::new(300.0, 90.0);
        assert_eq!(net.crosswalk_ahead(pos, Direction::East), Some(CrosswalkId(1)));
    }

    #[test]
    fn west_uses_left_edge() {
        let (net, _) = two_crosswalk_road();
        let pos = Point::new(620.0, 90.0);
        // Both have left edges < 620; crosswalk 1 centre (625) is nearer.
        assert_eq!(net.crosswalk_ahead(pos, Direction::West), Some(CrosswalkId(1)));
        let pos = Point::new(100.0, 90.0);
        assert_eq!(net.crosswalk_ahead(pos, Direction::West), None);
    }

    #[test]
    fn south_and_north() {
        let (net, _) = two_crosswalk_road();
        // Pedestrian on the north kerb above crosswalk 0 heading South.
        let kerb = Point::new(225.0, 100.0);
        assert_eq!(net.crosswalk_ahead(kerb, Direction::South), Some(CrosswalkId(0)));
        // Below the road heading South: nothing ahead.
        assert_eq!(net.crosswalk_ahead(Point::new(225.0, 250.0), Direction::South), None);
        // Below the road heading North.
        assert_eq!(
            net.crosswalk_ahead(Point::new(640.0, 250.0), Direction::North),
            Some(CrosswalkId(1))
        );
    }

    #[test]
    fn no_crosswalks_is_none() {
        let net = RoadNetworkBuilder::new(10.0, 10.0).build().unwrap();
        assert_eq!(net.crosswalk_ahead(Point::new(1.0, 1.0), Direction::East), None);
    }

    #[test]
    fn equidistant_tie_goes_to_lowest_id() {
        let mut b = RoadNetworkBuilder::new(100.0, 100.0);
        // Two crosswalks mirrored above/below the query point.
        b.add_crosswalk(rect(40.0, 60.0, 60.0, 70.0));
        b.add_crosswalk(rect(40.0, 30.0, 60.0, 40.0));
        let net = b.build().unwrap();
        let pos = Point::new(0.0, 50.0);
        assert_eq!(net.crosswalk_ahead(pos, Direction::East), Some(CrosswalkId(0)));
    }
}

// ── Lane resolution ───────────────────────────────────────────────────────────

#[cfg(test)]
mod lane_resolution {
    use gt_core::{CrosswalkId, Direction, Point};

    use super::helpers::{rect, two_crosswalk_road};
    use crate::RoadNetworkBuilder;

    #[test]
    fn nearest_lane_centre_wins() {
        let (net, [east, west]) = two_crosswalk_road();
        let north_kerb = Point::new(225.0, 100.0);
        let south_kerb = Point::new(225.0, 200.0);
        assert_eq!(net.closest_overlap_lane(CrosswalkId(0), north_kerb), Some(east));
        assert_eq!(net.closest_overlap_lane(CrosswalkId(0), south_kerb), Some(west));
    }

    #[test]
    fn tie_goes_to_lowest_lane_id() {
        let (net, [east, _]) = two_crosswalk_road();
        // Exactly on the boundary between lane 0 and lane 1 centres.
        let mid = Point::new(225.0, 150.0);
        assert_eq!(net.closest_overlap_lane(CrosswalkId(0), mid), Some(east));
    }

    #[test]
    fn crosswalk_without_lanes_is_none() {
        let mut b = RoadNetworkBuilder::new(100.0, 100.0);
        let cw = b.add_crosswalk(rect(0.0, 0.0, 10.0, 10.0));
        let net = b.build().unwrap();
        assert_eq!(net.closest_overlap_lane(cw, Point::new(5.0, 5.0)), None);
        assert_eq!(net.closest_overlap_lane(CrosswalkId(9), Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn adjacent_lane_same_direction_only() {
        let mut b = RoadNetworkBuilder::new(100.0, 100.0);
        let road = b.add_road(rect(0.0, 0.0, 100.0, 30.0));
        let l0 = b.add_lane(road, rect(0.0, 0.0, 100.0, 10.0), Direction::East).unwrap();
        let l1 = b.add_lane(road, rect(0.0, 10.0, 100.0, 20.0), Direction::East).unwrap();
        let l2 = b.add_lane(road, rect(0.0, 20.0, 100.0, 30.0), Direction::West).unwrap();
        let net = b.build().unwrap();
        // For an East-bound vehicle, "left" is North and "right" is South.
        assert_eq!(net.adjacent_lane(l1, Direction::East.left()), Some(l0));
        assert_eq!(net.adjacent_lane(l0, Direction::East.right()), Some(l1));
        assert_eq!(net.adjacent_lane(l1, Direction::East.right()), None, "l2 is opposite traffic");
        assert_eq!(net.adjacent_lane(l2, Direction::North), None);
    }
}

// ── Incoming vehicles ─────────────────────────────────────────────────────────

#[cfg(test)]
mod incoming {
    use gt_core::{AgentId, Direction, LaneId};

    use super::helpers::{rect, two_crosswalk_road};
    use crate::{VehicleFootprint, approach_gap};

    fn car(id: u32, lane: LaneId, x0: f64, y0: f64, direction: Direction) -> VehicleFootprint {
        VehicleFootprint {
            agent: AgentId(id),
            lane,
            rect: rect(x0, y0, x0 + 100.0, y0 + 50.0),
            direction,
        }
    }

    #[test]
    fn slot_count_matches_after_refresh() {
        let (mut net, [east, west]) = two_crosswalk_road();
        let vehicles = [car(1, east, 0.0, 100.0, Direction::East), car(2, west, 900.0, 150.0, Direction::West)];
        net.refresh_incoming(&vehicles);
        for cw in &net.crosswalks {
            assert_eq!(cw.incoming().len(), cw.overlap_lanes.len());
        }
        net.refresh_incoming(&[]);
        for cw in &net.crosswalks {
            assert_eq!(cw.incoming().len(), cw.overlap_lanes.len());
            assert!(cw.incoming().iter().all(Option::is_none));
        }
    }

    #[test]
    fn nearest_approaching_vehicle_per_lane() {
        let (mut net, [east, west]) = two_crosswalk_road();
        let vehicles = [
            car(1, east, 0.0, 100.0, Direction::East),    // front at 100, gap 100
            car(2, east, 50.0, 100.0, Direction::East),   // front at 150, gap 50
            car(3, west, 400.0, 150.0, Direction::West),  // front at 400, gap 150
        ];
        net.refresh_incoming(&vehicles);
        let cw = &net.crosswalks[0];
        let e = cw.incoming_in(east).unwrap();
        assert_eq!(e.agent, AgentId(2));
        assert_eq!(e.gap, 50.0);
        let w = cw.incoming_in(west).unwrap();
        assert_eq!(w.agent, AgentId(3));
        assert_eq!(w.gap, 150.0);
    }

    #[test]
    fn cleared_vehicle_is_ignored() {
        let (mut net, [east, _]) = two_crosswalk_road();
        // Rear at 260 > crosswalk 0 far edge 250: already through.
        net.refresh_incoming(&[car(1, east, 260.0, 100.0, Direction::East)]);
        assert!(net.crosswalks[0].incoming_in(east).is_none());
        // Still approaching crosswalk 1.
        assert_eq!(net.crosswalks[1].incoming_in(east).unwrap().gap, 240.0);
    }

    #[test]
    fn vehicle_inside_crosswalk_has_zero_gap() {
        let (mut net, [east, _]) = two_crosswalk_road();
        net.refresh_incoming(&[car(5, east, 120.0, 100.0, Direction::East)]);
        let slot = net.crosswalks[0].incoming_in(east).unwrap();
        assert_eq!(slot.gap, 0.0);
    }

    #[test]
    fn equal_gap_tie_goes_to_lowest_agent() {
        let (mut net, [east, _]) = two_crosswalk_road();
        net.refresh_incoming(&[
            car(9, east, 0.0, 100.0, Direction::East),
            car(4, east, 0.0, 100.0, Direction::East),
        ]);
        assert_eq!(net.crosswalks[0].incoming_in(east).unwrap().agent, AgentId(4));
    }

    #[test]
    fn approach_gap_uses_leading_edge_per_heading() {
        let cw = rect(200.0, 100.0, 250.0, 200.0);
        assert_eq!(approach_gap(&cw, &rect(0.0, 120.0, 100.0, 170.0), Direction::East), Some(100.0));
        assert_eq!(approach_gap(&cw, &rect(300.0, 120.0, 400.0, 170.0), Direction::West), Some(50.0));
        assert_eq!(approach_gap(&cw, &rect(210.0, 10.0, 240.0, 60.0), Direction::South), Some(40.0));
        assert_eq!(approach_gap(&cw, &rect(210.0, 260.0, 240.0, 310.0), Direction::North), Some(60.0));
    }

    #[test]
    fn approach_gap_zero_inside_and_none_once_through() {
        let cw = rect(200.0, 100.0, 250.0, 200.0);
        assert_eq!(approach_gap(&cw, &rect(130.0, 120.0, 230.0, 170.0), Direction::East), Some(0.0));
        assert_eq!(approach_gap(&cw, &rect(240.0, 120.0, 340.0, 170.0), Direction::East), Some(0.0));
        assert_eq!(approach_gap(&cw, &rect(250.0, 120.0, 350.0, 170.0), Direction::East), None);
    }
}
