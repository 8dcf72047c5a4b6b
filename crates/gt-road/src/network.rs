//! Road network representation, builder, and hazard queries.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over crosswalk centres answers "which crosswalk
//! lies ahead of this pedestrian" by walking crosswalks in increasing
//! distance order and stopping at the first one past the directional filter.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use gt_core::{CrosswalkId, Direction, LaneId, Point, Rect, RoadId};

use crate::{Crosswalk, Lane, Road, RoadError, RoadResult, VehicleFootprint};

// ── R-tree crosswalk entry ────────────────────────────────────────────────────

#[derive(Clone)]
struct CrosswalkEntry {
    center: [f64; 2],
    id:     CrosswalkId,
}

impl RTreeObject for CrosswalkEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.center)
    }
}

impl PointDistance for CrosswalkEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.center[0] - point[0];
        let dy = self.center[1] - point[1];
        dx * dx + dy * dy
    }
}

/// `true` when the crosswalk's relevant boundary lies beyond `pos` in the
/// direction of travel.
#[inline]
fn is_ahead(rect: &Rect, pos: Point, direction: Direction) -> bool {
    match direction {
        Direction::East  => rect.bottom_right().x > pos.x,
        Direction::West  => rect.top_left().x < pos.x,
        Direction::North => rect.top_left().y < pos.y,
        Direction::South => rect.bottom_right().y > pos.y,
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Lanes, roads, and crosswalks of one environment, indexed by id.
///
/// Do not construct directly; use [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    /// World extent in x.
    pub width:      f64,
    /// World extent in y.
    pub height:     f64,
    /// Indexed by `RoadId`.
    pub roads:      Vec<Road>,
    /// Indexed by `LaneId`.
    pub lanes:      Vec<Lane>,
    /// Indexed by `CrosswalkId`.
    pub crosswalks: Vec<Crosswalk>,

    crosswalk_idx: RTree<CrosswalkEntry>,
}

impl RoadNetwork {
    /// A network with no roads, lanes, or crosswalks.
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            roads:         Vec::new(),
            lanes:         Vec::new(),
            crosswalks:    Vec::new(),
            crosswalk_idx: RTree::new(),
        }
    }

    #[inline]
    pub fn lane(&self, id: LaneId) -> Option<&Lane> {
        self.lanes.get(id.index())
    }

    #[inline]
    pub fn road(&self, id: RoadId) -> Option<&Road> {
        self.roads.get(id.index())
    }

    #[inline]
    pub fn crosswalk(&self, id: CrosswalkId) -> Option<&Crosswalk> {
        self.crosswalks.get(id.index())
    }

    /// `true` when `p` lies inside the world bounds.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }

    /// World extent along the axis `direction` travels on.
    #[inline]
    pub fn extent_along(&self, direction: Direction) -> f64 {
        if direction.is_horizontal() { self.width } else { self.height }
    }

    // ── Hazard queries ────────────────────────────────────────────────────

    /// The crosswalk structurally ahead of an agent at `pos` heading
    /// `direction`: among crosswalks whose relevant boundary lies beyond
    /// `pos`, the one whose centre is nearest.  Ties go to the lowest id.
    ///
    /// `None` means nothing is ahead; callers treat it as "no hazard".
    pub fn crosswalk_ahead(&self, pos: Point, direction: Direction) -> Option<CrosswalkId> {
        let mut best: Option<(f64, CrosswalkId)> = None;
        for (entry, dist) in self
            .crosswalk_idx
            .nearest_neighbor_iter_with_distance_2(&[pos.x, pos.y])
        {
            if let Some((best_dist, _)) = best {
                if dist > best_dist {
                    break; // iterator is distance-ordered
                }
            }
            let rect = &self.crosswalks[entry.id.index()].rect;
            if !is_ahead(rect, pos, direction) {
                continue;
            }
            match best {
                Some((_, best_id)) if best_id <= entry.id => {}
                _ => best = Some((dist, entry.id)),
            }
        }
        best.map(|(_, id)| id)
    }

    /// The overlap lane of `crosswalk` whose centre is nearest to `pos`
    /// (squared Euclidean distance).  Ties go to the lowest `LaneId`.
    pub fn closest_overlap_lane(&self, crosswalk: CrosswalkId, pos: Point) -> Option<LaneId> {
        let cw = self.crosswalk(crosswalk)?;
        let mut best: Option<(f64, LaneId)> = None;
        // overlap_lanes is ascending, so strict `<` keeps the lowest id on ties.
        for lane in cw.overlap_lanes.iter().filter_map(|&id| self.lane(id)) {
            let d = pos.distance_sq(lane.center());
            if best.is_none_or(|(best_d, _)| d < best_d) {
                best = Some((d, lane.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Nearest lane of the same road and direction as `lane`, lying on the
    /// `side` of it.  Used for lane changes.
    pub fn adjacent_lane(&self, lane: LaneId, side: Direction) -> Option<LaneId> {
        let current = self.lane(lane)?;
        let road = self.road(current.road)?;
        let here = current.center().along(side);
        let sign = if side.is_positive() { 1.0 } else { -1.0 };

        road.lanes
            .iter()
            .filter_map(|&id| self.lane(id))
            .filter(|l| l.id != lane && l.direction == current.direction)
            .map(|l| (sign * (l.center().along(side) - here), l.id))
            .filter(|&(offset, _)| offset > 0.0)
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(_, id)| id)
    }

    /// Refresh the incoming-vehicle slots of every crosswalk.
    pub fn refresh_incoming(&mut self, vehicles: &[VehicleFootprint]) {
        for cw in &mut self.crosswalks {
            cw.refresh_incoming(vehicles);
        }
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use gt_core::{Direction, Point, Rect};
/// use gt_road::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new(200.0, 100.0);
/// let road = b.add_road(Rect::new(Point::new(0.0, 40.0), Point::new(200.0, 60.0)).unwrap());
/// b.add_lane(road, Rect::new(Point::new(0.0, 40.0), Point::new(200.0, 60.0)).unwrap(), Direction::East)
///     .unwrap();
/// b.add_crosswalk(Rect::new(Point::new(90.0, 40.0), Point::new(110.0, 60.0)).unwrap());
/// let net = b.build().unwrap();
/// assert_eq!(net.crosswalks[0].overlap_lanes.len(), 1);
/// ```
pub struct RoadNetworkBuilder {
    width:      f64,
    height:     f64,
    roads:      Vec<Road>,
    lanes:      Vec<Lane>,
    crosswalks: Vec<RawCrosswalk>,
}

struct RawCrosswalk {
    rect:  Rect,
    /// `None` = derive from rectangle intersection at build time.
    lanes: Option<Vec<LaneId>>,
}

impl RoadNetworkBuilder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            roads:      Vec::new(),
            lanes:      Vec::new(),
            crosswalks: Vec::new(),
        }
    }

    /// Add a road and return its `RoadId` (sequential from 0).
    pub fn add_road(&mut self, rect: Rect) -> RoadId {
        let id = RoadId(self.roads.len() as u32);
        self.roads.push(Road { id, rect, lanes: Vec::new() });
        id
    }

    /// Add a lane to `road` and return its `LaneId` (sequential from 0).
    pub fn add_lane(&mut self, road: RoadId, rect: Rect, direction: Direction) -> RoadResult<LaneId> {
        let id = LaneId(self.lanes.len() as u32);
        let r = self
            .roads
            .get_mut(road.index())
            .ok_or(RoadError::UnknownRoad(road))?;
        r.lanes.push(id);
        self.lanes.push(Lane { id, road, rect, direction });
        Ok(id)
    }

    /// Add a crosswalk whose overlap lanes are every lane its rectangle
    /// intersects.
    pub fn add_crosswalk(&mut self, rect: Rect) -> CrosswalkId {
        let id = CrosswalkId(self.crosswalks.len() as u32);
        self.crosswalks.push(RawCrosswalk { rect, lanes: None });
        id
    }

    /// Add a crosswalk with an explicit overlap-lane list.
    pub fn add_crosswalk_over(&mut self, rect: Rect, lanes: &[LaneId]) -> CrosswalkId {
        let id = CrosswalkId(self.crosswalks.len() as u32);
        self.crosswalks.push(RawCrosswalk { rect, lanes: Some(lanes.to_vec()) });
        id
    }

    pub fn lane_count(&self) -> usize { self.lanes.len() }
    pub fn crosswalk_count(&self) -> usize { self.crosswalks.len() }

    /// Consume the builder, resolve overlap lanes, and bulk-load the R-tree.
    pub fn build(self) -> RoadResult<RoadNetwork> {
        let lanes = self.lanes;

        let mut crosswalks = Vec::with_capacity(self.crosswalks.len());
        for (i, raw) in self.crosswalks.into_iter().enumerate() {
            let mut overlap = match raw.lanes {
                Some(ids) => {
                    if let Some(&bad) = ids.iter().find(|id| id.index() >= lanes.len()) {
                        return Err(RoadError::UnknownLane(bad));
                    }
                    ids
                }
                None => lanes
                    .iter()
                    .filter(|l| l.rect.intersects(&raw.rect))
                    .map(|l| l.id)
                    .collect(),
            };
            overlap.sort_unstable();
            overlap.dedup();
            crosswalks.push(Crosswalk::new(CrosswalkId(i as u32), raw.rect, overlap));
        }

        let entries: Vec<CrosswalkEntry> = crosswalks
            .iter()
            .map(|cw| {
                let c = cw.rect.center();
                CrosswalkEntry { center: [c.x, c.y], id: cw.id }
            })
            .collect();

        Ok(RoadNetwork {
            width:         self.width,
            height:        self.height,
            roads:         self.roads,
            lanes,
            crosswalks,
            crosswalk_idx: RTree::bulk_load(entries),
        })
    }
}
