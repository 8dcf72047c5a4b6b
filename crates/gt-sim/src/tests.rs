//! Integration tests for gt-sim.

use gt_agent::{Pedestrian, Vehicle, VehicleModel};
use gt_core::{AgentId, Direction, LaneId, Point, Rect, RoadId, SimConfig};
use gt_road::{RoadNetwork, RoadNetworkBuilder};

use crate::{EnvBuilder, TrafficEnv, scenario};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(max_steps: u64) -> SimConfig {
    SimConfig { max_steps, seed: 7, snapshot_interval: 1 }
}

fn kerb_ped(id: u32) -> Pedestrian {
    Pedestrian::stop_go(AgentId(id), Point::new(900.0, 25.0), Direction::South, 5.0, 50.0)
}

/// East-bound car in lane 0 of the two-lane scenario.
fn east_car(id: u32, x: f64, speed: f64) -> Vehicle {
    Vehicle::new(AgentId(id), Point::new(x, 50.0), Direction::East, 100.0, 50.0, RoadId(0), LaneId(0))
        .unwrap()
        .with_speed(speed)
}

fn two_lane_env(max_steps: u64, peds: &[Pedestrian], cars: &[Vehicle]) -> TrafficEnv {
    let mut b = EnvBuilder::new(test_config(max_steps), scenario::two_lane_road().unwrap());
    for p in peds {
        b = b.pedestrian(*p);
    }
    for v in cars {
        b = b.vehicle(*v);
    }
    b.build().unwrap()
}

/// 500 × 100 world with two East-bound lanes on one road.
fn parallel_lanes() -> RoadNetwork {
    let rect = |x0, y0, x1, y1| Rect::new(Point::new(x0, y0), Point::new(x1, y1)).unwrap();
    let mut b = RoadNetworkBuilder::new(500.0, 100.0);
    let road = b.add_road(rect(0.0, 0.0, 500.0, 100.0));
    b.add_lane(road, rect(0.0, 0.0, 500.0, 50.0), Direction::East).unwrap();
    b.add_lane(road, rect(0.0, 50.0, 500.0, 100.0), Direction::East).unwrap();
    b.build().unwrap()
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn builds_two_lane_scenario() {
        let env = two_lane_env(10, &[kerb_ped(0)], &[east_car(1, 0.0, 10.0)]);
        assert_eq!(env.width(), 1800.0);
        assert_eq!(env.height(), 300.0);
        assert_eq!(env.lanes().len(), 2);
        assert_eq!(env.crosswalks().len(), 1);
        assert_eq!(env.crosswalks()[0].overlap_lanes, vec![LaneId(0), LaneId(1)]);
        assert_eq!(env.ped_agents().len(), 1);
        assert_eq!(env.vehicle_agents().len(), 1);
        assert_eq!(env.tick(), gt_core::Tick::ZERO);
    }

    #[test]
    fn unknown_lane_rejected() {
        let mut car = east_car(1, 0.0, 10.0);
        car.in_lane = LaneId(9);
        let err = EnvBuilder::new(test_config(10), scenario::two_lane_road().unwrap())
            .vehicle(car)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Road(_)));
    }

    #[test]
    fn lane_from_other_road_rejected() {
        let mut car = east_car(1, 0.0, 10.0);
        car.in_road = RoadId(4);
        let err = EnvBuilder::new(test_config(10), scenario::two_lane_road().unwrap())
            .vehicle(car)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Road(_)));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = EnvBuilder::new(test_config(10), scenario::two_lane_road().unwrap())
            .pedestrian(kerb_ped(3))
            .vehicle(east_car(3, 0.0, 10.0))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Agent(_)));
    }

    #[test]
    fn zero_max_steps_rejected() {
        let err = EnvBuilder::new(test_config(0), scenario::two_lane_road().unwrap())
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }
}

// ── Motion ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod motion_tests {
    use super::*;
    use gt_behavior::{Action, Verb};

    #[test]
    fn keep_moves_by_speed() {
        let walker = Pedestrian::walker(AgentId(0), Point::new(100.0, 0.0), Direction::South, 5.0);
        let mut env = two_lane_env(10, &[walker], &[east_car(1, 0.0, 10.0)]);
        let out = env.step(&[]).unwrap();
        assert_eq!(out.observation.pedestrians, vec![(AgentId(0), Point::new(100.0, 5.0))]);
        assert_eq!(out.observation.vehicles[0].1.top_left(), Point::new(10.0, 50.0));
        assert_eq!(out.observation.tick, gt_core::Tick(1));
    }

    #[test]
    fn parked_vehicle_stays() {
        let car = east_car(1, 0.0, 10.0).with_model(VehicleModel::Parked);
        let mut env = two_lane_env(10, &[], &[car]);
        env.run_ticks(5, &mut crate::NoopObserver).unwrap();
        assert_eq!(env.vehicle_agents()[&AgentId(1)].core.position, Point::new(0.0, 50.0));
    }

    #[test]
    fn accelerate_and_slowdown_respect_bounds() {
        let car = east_car(1, 0.0, 10.0).with_max_speed(11.0);
        let mut env = two_lane_env(10, &[], &[car]);
        env.step(&[Action::new(AgentId(1), Verb::Accelerate)]).unwrap();
        env.step(&[Action::new(AgentId(1), Verb::Accelerate)]).unwrap();
        let v = &env.vehicle_agents()[&AgentId(1)];
        assert_eq!(v.core.speed, 11.0);
        assert_eq!(v.core.position.x, 22.0);

        env.step(&[Action::new(AgentId(1), Verb::Slowdown)]).unwrap();
        let v = &env.vehicle_agents()[&AgentId(1)];
        assert_eq!(v.core.speed, 10.0);
        assert_eq!(v.core.position.x, 32.0);
    }

    #[test]
    fn lane_change_to_adjacent_lane() {
        let car = Vehicle::new(AgentId(0), Point::new(0.0, 0.0), Direction::East, 20.0, 10.0, RoadId(0), LaneId(0))
            .unwrap()
            .with_speed(5.0);
        let mut env = EnvBuilder::new(test_config(10), parallel_lanes()).vehicle(car).build().unwrap();

        // Right of East-bound is South: lane 1.
        env.step(&[Action::new(AgentId(0), Verb::LaneRight)]).unwrap();
        let v = &env.vehicle_agents()[&AgentId(0)];
        assert_eq!(v.in_lane, LaneId(1));
        assert_eq!(v.core.position, Point::new(5.0, 50.0));

        // No lane further right: stays in lane 1 but still moves.
        env.step(&[Action::new(AgentId(0), Verb::LaneRight)]).unwrap();
        let v = &env.vehicle_agents()[&AgentId(0)];
        assert_eq!(v.in_lane, LaneId(1));
        assert_eq!(v.core.position, Point::new(10.0, 50.0));

        env.step(&[Action::new(AgentId(0), Verb::LaneLeft)]).unwrap();
        assert_eq!(env.vehicle_agents()[&AgentId(0)].in_lane, LaneId(0));
    }

    #[test]
    fn lane_change_refused_into_oncoming_lane() {
        let mut env = two_lane_env(10, &[], &[east_car(1, 0.0, 10.0)]);
        env.step(&[Action::new(AgentId(1), Verb::LaneRight)]).unwrap();
        assert_eq!(env.vehicle_agents()[&AgentId(1)].in_lane, LaneId(0));
    }
}

// ── Stop/go in the loop ───────────────────────────────────────────────────────

#[cfg(test)]
mod crossing_tests {
    use super::*;
    use crate::SimError;
    use gt_behavior::{Action, Verb};

    #[test]
    fn waits_for_vehicle_to_clear_then_crosses() {
        let mut env = two_lane_env(100, &[kerb_ped(0)], &[east_car(1, 850.0, 10.0)]);
        // Rear edge passes 850, 860, ..., 920 with the front on the crosswalk: clearance 0.
        for _ in 0..8 {
            let out = env.step(&[]).unwrap();
            assert_eq!(out.observation.pedestrians[0].1, Point::new(900.0, 25.0));
            assert!(out.info.actions.contains(&Action::new(AgentId(0), Verb::Stop)));
        }
        // At 930 the car has cleared the crosswalk.
        env.step(&[]).unwrap();
        let ped = &env.ped_agents()[&AgentId(0)];
        assert_eq!(ped.position(), Point::new(900.0, 30.0));
        assert_eq!(ped.steps_planned, 49);
    }

    #[test]
    fn supplied_action_overrides_hook() {
        let mut env = two_lane_env(100, &[kerb_ped(0)], &[east_car(1, 850.0, 10.0)]);
        env.step(&[Action::new(AgentId(0), Verb::Keep)]).unwrap();
        let ped = &env.ped_agents()[&AgentId(0)];
        assert_eq!(ped.position(), Point::new(900.0, 30.0));
        assert_eq!(ped.steps_planned, 0, "the hook never ran");
    }

    #[test]
    fn invalid_action_lists_rejected() {
        let mut env = two_lane_env(100, &[kerb_ped(0)], &[]);
        let twice = [Action::new(AgentId(0), Verb::Keep), Action::new(AgentId(0), Verb::Stop)];
        assert!(matches!(env.step(&twice), Err(SimError::DuplicateAction(AgentId(0)))));
        assert!(matches!(
            env.step(&[Action::new(AgentId(5), Verb::Keep)]),
            Err(SimError::Agent(_))
        ));
        assert_eq!(env.tick(), gt_core::Tick::ZERO, "rejected steps do not advance");
    }

    #[test]
    fn collision_costs_reward() {
        let walker = Pedestrian::walker(AgentId(0), Point::new(150.0, 45.0), Direction::South, 10.0);
        let parked = east_car(1, 100.0, 0.0).with_model(VehicleModel::Parked);
        let mut env = two_lane_env(100, &[walker], &[parked]);
        let out = env.step(&[]).unwrap();
        assert_eq!(out.info.collisions, vec![(AgentId(0), AgentId(1))]);
        assert_eq!(out.reward, -1.0);

        let mut clear = two_lane_env(100, &[kerb_ped(0)], &[]);
        assert_eq!(clear.step(&[]).unwrap().reward, 0.0);
    }
}

// ── Episode control ───────────────────────────────────────────────────────────

#[cfg(test)]
mod episode_tests {
    use super::*;
    use gt_agent::AgentRegistry;
    use gt_core::Tick;

    use crate::{NoopObserver, SimError, SimObserver};

    #[test]
    fn done_after_max_steps() {
        let mut env = two_lane_env(3, &[kerb_ped(0)], &[]);
        assert!(!env.step(&[]).unwrap().done);
        assert!(!env.step(&[]).unwrap().done);
        assert!(env.step(&[]).unwrap().done);
    }

    #[test]
    fn done_when_every_pedestrian_left() {
        let walker = Pedestrian::walker(AgentId(0), Point::new(900.0, 295.0), Direction::South, 10.0);
        let mut env = two_lane_env(100, &[walker], &[]);
        assert!(env.step(&[]).unwrap().done);
    }

    #[test]
    fn run_stops_at_done() {
        let mut env = two_lane_env(12, &[kerb_ped(0)], &[east_car(1, 0.0, 10.0)]);
        env.run(&mut NoopObserver).unwrap();
        assert_eq!(env.tick(), Tick(12));
    }

    #[test]
    fn reset_restores_registration_state() {
        let mut env = two_lane_env(100, &[kerb_ped(0)], &[east_car(1, 0.0, 10.0)]);
        let first = env.reset();
        let draw = env.rng().uniform();

        env.run_ticks(10, &mut NoopObserver).unwrap();
        assert_ne!(env.observation(), first);

        let again = env.reset();
        assert_eq!(again, first);
        assert_eq!(env.tick(), Tick::ZERO);
        assert_eq!(env.ped_agents()[&AgentId(0)].steps_planned, 0);
        assert_eq!(env.rng().uniform(), draw);
    }

    #[test]
    fn added_and_removed_agents() {
        let mut env = two_lane_env(100, &[], &[]);
        env.add_ped_agent(kerb_ped(0)).unwrap();
        env.add_vehicle_agent(east_car(1, 0.0, 10.0)).unwrap();
        assert!(env.add_ped_agent(kerb_ped(1)).is_err());

        env.remove_vehicle_agent(AgentId(1)).unwrap();
        assert!(env.remove_vehicle_agent(AgentId(1)).is_err());
        env.reset();
        assert!(env.vehicle_agents().is_empty());
        assert_eq!(env.ped_agents().len(), 1);
        assert!(env.crosswalks()[0].incoming().iter().all(Option::is_none));
    }

    #[test]
    fn removal_mid_episode_survives_reset() {
        let mut env = two_lane_env(100, &[kerb_ped(0)], &[]);
        env.run_ticks(3, &mut NoopObserver).unwrap();
        env.add_vehicle_agent(east_car(1, 0.0, 10.0)).unwrap();
        env.run_ticks(2, &mut NoopObserver).unwrap();

        assert_eq!(env.remove_vehicle_agent(AgentId(1)).unwrap().core.position, Point::new(20.0, 50.0));
        env.remove_ped_agent(AgentId(0)).unwrap();
        assert!(matches!(env.remove_ped_agent(AgentId(0)), Err(SimError::Agent(_))));

        env.reset();
        assert!(env.ped_agents().is_empty());
        assert!(env.vehicle_agents().is_empty());
    }

    #[test]
    fn fixed_seed_runs_are_identical() {
        let build = || {
            two_lane_env(
                60,
                &[kerb_ped(0), Pedestrian::walker(AgentId(1), Point::new(880.0, 290.0), Direction::North, 4.0)],
                &[east_car(2, 600.0, 10.0), east_car(3, 300.0, 8.0)],
            )
        };
        let record = |env: &mut TrafficEnv| {
            let mut obs = vec![env.reset()];
            loop {
                let out = env.step(&[]).unwrap();
                obs.push(out.observation);
                if out.done {
                    break;
                }
            }
            obs
        };
        let mut a = build();
        let mut b = build();
        let run_a = record(&mut a);
        assert_eq!(run_a, record(&mut b));
        assert_eq!(run_a, record(&mut a), "reset replays the same episode");
    }

    #[derive(Default)]
    struct Counter {
        resets:    usize,
        starts:    usize,
        step_ends: Vec<Tick>,
        ended:     Option<Tick>,
    }

    impl SimObserver for Counter {
        fn on_reset(&mut self, _agents: &AgentRegistry) {
            self.resets += 1;
        }
        fn on_tick_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }
        fn on_step_end(&mut self, tick: Tick, _agents: &AgentRegistry) {
            self.step_ends.push(tick);
        }
        fn on_sim_end(&mut self, final_tick: Tick) {
            self.ended = Some(final_tick);
        }
    }

    #[test]
    fn observer_callbacks_follow_snapshot_interval() {
        let mut env = two_lane_env(6, &[kerb_ped(0)], &[]);
        env.config.snapshot_interval = 2;
        let mut counter = Counter::default();
        env.reset_with(&mut counter);
        env.run(&mut counter).unwrap();
        assert_eq!(counter.resets, 1);
        assert_eq!(counter.starts, 6);
        assert_eq!(counter.step_ends, vec![Tick(2), Tick(4), Tick(6)]);
        assert_eq!(counter.ended, Some(Tick(6)));
    }
}
