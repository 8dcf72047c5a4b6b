//! Integration tests for gt-output.

#[cfg(test)]
mod helpers {
    use gt_agent::{Pedestrian, Vehicle};
    use gt_core::{AgentId, Direction, LaneId, Point, RoadId, SimConfig};
    use gt_sim::{EnvBuilder, TrafficEnv, scenario};

    use crate::TtcSample;

    /// Pedestrian on the north kerb, vehicle 400 units behind it and 63
    /// units into the road, moving fast enough to arrive in three steps.
    pub fn ttc_env() -> TrafficEnv {
        env_with(2, 21.0, true)
    }

    pub fn car() -> Vehicle {
        Vehicle::new(
            AgentId(1),
            Point::new(400.0, 63.0),
            Direction::East,
            100.0,
            50.0,
            RoadId(0),
            LaneId(0),
        )
        .unwrap()
        .with_speed(134.0)
    }

    /// The kerb pedestrian at `ped_speed`, with or without the car.
    pub fn env_with(max_steps: u64, ped_speed: f64, with_car: bool) -> TrafficEnv {
        let ped = Pedestrian::walker(AgentId(0), Point::new(900.0, 25.0), Direction::South, ped_speed);
        let config = SimConfig { max_steps, seed: 1, snapshot_interval: 1 };
        let mut builder = EnvBuilder::new(config, scenario::two_lane_road().unwrap()).pedestrian(ped);
        if with_car {
            builder = builder.vehicle(car());
        }
        builder.build().unwrap()
    }

    pub fn sample(i: f64) -> TtcSample {
        TtcSample { ped_x: 900.0, ped_y: 25.0 + i, veh_x: 500.5 + i, veh_y: 88.0, ttc: Some(3.0 - i) }
    }
}

// ── Time to collision ─────────────────────────────────────────────────────────

#[cfg(test)]
mod ttc_tests {
    use gt_core::{Direction, Point};

    use crate::time_to_collision;

    #[test]
    fn whole_steps_until_front_reaches_pedestrian() {
        let ped = Point::new(900.0, 25.0);
        assert_eq!(time_to_collision(ped, Point::new(500.0, 88.0), 134.0, Direction::East), Some(3.0));
        assert_eq!(time_to_collision(ped, Point::new(634.0, 88.0), 134.0, Direction::East), Some(2.0));
        assert_eq!(time_to_collision(ped, Point::new(900.0, 88.0), 134.0, Direction::East), Some(0.0));
    }

    #[test]
    fn passed_or_stationary_vehicle_has_none() {
        let ped = Point::new(900.0, 25.0);
        assert_eq!(time_to_collision(ped, Point::new(901.0, 88.0), 10.0, Direction::East), None);
        assert_eq!(time_to_collision(ped, Point::new(500.0, 88.0), 0.0, Direction::East), None);
    }

    #[test]
    fn negative_directions_measure_backwards() {
        let ped = Point::new(900.0, 25.0);
        assert_eq!(time_to_collision(ped, Point::new(1000.0, 200.0), 50.0, Direction::West), Some(2.0));
        assert_eq!(time_to_collision(ped, Point::new(880.0, 200.0), 50.0, Direction::West), None);
        assert_eq!(time_to_collision(ped, Point::new(0.0, 125.0), 50.0, Direction::North), Some(2.0));
    }
}

// ── Collector ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod collector_tests {
    use gt_core::{AgentId, Corner, Direction, Point, Tick};
    use gt_sim::NoopObserver;

    use super::helpers::{car, env_with, ttc_env};
    use crate::{MetricCollector, episode_samples};

    #[test]
    fn records_initial_state_and_every_step() {
        let mut env = ttc_env();
        let mut collector = MetricCollector::new();
        env.reset_with(&mut collector);
        env.run(&mut collector).unwrap();

        assert_eq!(collector.ticks(), &[Tick(0), Tick(1), Tick(2)]);
        let (peds, vehs) = collector.positions();
        assert_eq!(
            peds[&AgentId(0)],
            vec![Point::new(900.0, 25.0), Point::new(900.0, 46.0), Point::new(900.0, 67.0)]
        );
        let corners = &vehs[&AgentId(1)];
        assert_eq!(corners.len(), 3);
        assert_eq!(corners[&Corner::TopLeft][2], Point::new(668.0, 63.0));
        assert_eq!(corners[&Corner::BottomRight][0], Point::new(500.0, 113.0));
        assert_eq!(corners[&Corner::Center][1], Point::new(584.0, 88.0));
    }

    #[test]
    fn reset_clears_previous_episode() {
        let mut env = ttc_env();
        let mut collector = MetricCollector::new();
        env.reset_with(&mut collector);
        env.run_ticks(2, &mut collector).unwrap();
        assert_eq!(collector.len(), 3);

        env.reset_with(&mut collector);
        assert_eq!(collector.len(), 1);
        assert_eq!(collector.positions().0[&AgentId(0)].len(), 1);
    }

    #[test]
    fn unobserved_steps_are_not_recorded() {
        let mut env = ttc_env();
        let mut collector = MetricCollector::new();
        env.reset_with(&mut collector);
        env.run_ticks(2, &mut NoopObserver).unwrap();
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn episode_samples_count_down() {
        let mut env = ttc_env();
        let mut collector = MetricCollector::new();
        env.reset_with(&mut collector);
        env.run(&mut collector).unwrap();

        let rows = episode_samples(&collector, AgentId(0), AgentId(1), 134.0, Direction::East);
        let ttc: Vec<_> = rows.iter().map(|r| r.ttc).collect();
        assert_eq!(ttc, vec![Some(3.0), Some(2.0), Some(1.0)]);
        assert_eq!((rows[0].veh_x, rows[0].veh_y), (500.0, 88.0));
        assert_eq!((rows[2].ped_x, rows[2].ped_y), (900.0, 67.0));
    }

    #[test]
    fn passed_vehicle_keeps_its_rows() {
        let mut env = env_with(6, 0.0, true);
        let mut collector = MetricCollector::new();
        env.reset_with(&mut collector);
        env.run(&mut collector).unwrap();

        let rows = episode_samples(&collector, AgentId(0), AgentId(1), 134.0, Direction::East);
        assert_eq!(rows.len(), 7);
        let ttc: Vec<_> = rows.iter().map(|r| r.ttc).collect();
        assert_eq!(ttc, vec![Some(3.0), Some(2.0), Some(1.0), None, None, None, None]);
    }

    #[test]
    fn vehicle_added_mid_episode_joins_on_tick() {
        let mut env = env_with(10, 21.0, false);
        let mut collector = MetricCollector::new();
        env.reset_with(&mut collector);
        env.run_ticks(2, &mut collector).unwrap();
        env.add_vehicle_agent(car()).unwrap();
        env.run_ticks(2, &mut collector).unwrap();

        assert_eq!(collector.pedestrian_ticks(AgentId(0)), &[Tick(0), Tick(1), Tick(2), Tick(3), Tick(4)]);
        assert_eq!(collector.vehicle_ticks(AgentId(1)), &[Tick(3), Tick(4)]);

        let rows = episode_samples(&collector, AgentId(0), AgentId(1), 134.0, Direction::East);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].ped_y, rows[0].veh_x, rows[0].ttc), (88.0, 634.0, Some(2.0)));
        assert_eq!((rows[1].ped_y, rows[1].veh_x, rows[1].ttc), (109.0, 768.0, Some(1.0)));
    }

    #[test]
    fn unknown_agents_yield_no_rows() {
        let collector = MetricCollector::new();
        assert!(episode_samples(&collector, AgentId(0), AgentId(1), 1.0, Direction::East).is_empty());
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use gt_core::{AgentId, Corner, Direction};

    use super::helpers::{env_with, sample};
    use crate::csv::CSV_FILE;
    use crate::{CsvWriter, MetricCollector, SampleWriter, episode_samples, read_samples};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(CSV_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["pedX", "pedY", "vehX", "vehY", "TTC"]);
        assert!(read_samples(&dir.path().join(CSV_FILE)).unwrap().is_empty());
    }

    #[test]
    fn csv_round_trip() {
        let dir = tmp();
        let rows = vec![sample(0.0), sample(1.0), sample(2.0)];
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_samples(&rows[..2]).unwrap();
        w.write_samples(&rows[2..]).unwrap();
        w.finish().unwrap();

        assert_eq!(read_samples(&dir.path().join(CSV_FILE)).unwrap(), rows);
    }

    #[test]
    fn recorded_episode_survives_export() {
        let mut env = env_with(6, 0.0, true);
        let mut collector = MetricCollector::new();
        env.reset_with(&mut collector);
        env.run(&mut collector).unwrap();
        let rows = episode_samples(&collector, AgentId(0), AgentId(1), 134.0, Direction::East);

        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_samples(&rows).unwrap();
        w.finish().unwrap();
        let reloaded = read_samples(&dir.path().join(CSV_FILE)).unwrap();
        assert_eq!(reloaded, rows);

        let (peds, vehs) = collector.positions();
        let ped_track: Vec<_> = reloaded.iter().map(|r| (r.ped_x, r.ped_y)).collect();
        let recorded: Vec<_> = peds[&AgentId(0)].iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(ped_track, recorded);

        let fronts: Vec<_> = reloaded.iter().map(|r| r.veh_x).collect();
        let recorded: Vec<_> = vehs[&AgentId(1)][&Corner::BottomRight].iter().map(|p| p.x).collect();
        assert_eq!(fronts, recorded);
        assert!(reloaded[3..].iter().all(|r| r.ttc.is_none()));
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_overwrites_previous_export() {
        let dir = tmp();
        let mut first = CsvWriter::new(dir.path()).unwrap();
        first.write_samples(&[sample(0.0), sample(1.0)]).unwrap();
        first.finish().unwrap();

        let mut second = CsvWriter::new(dir.path()).unwrap();
        second.write_samples(&[sample(2.0)]).unwrap();
        second.finish().unwrap();

        assert_eq!(read_samples(&dir.path().join(CSV_FILE)).unwrap(), vec![sample(2.0)]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tmp();
        assert!(read_samples(&dir.path().join("absent.csv")).is_err());
    }
}

// ── SQLite ────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use rusqlite::Connection;
    use tempfile::TempDir;

    use super::helpers::sample;
    use crate::{SampleWriter, SqliteWriter};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_rows_written() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_samples(&[sample(0.0), sample(1.0)]).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let conn = Connection::open(dir.path().join("TTC.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM ttc_samples", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
        let ttc: f64 = conn
            .query_row("SELECT TTC FROM ttc_samples WHERE vehX = 501.5", [], |r| r.get(0))
            .unwrap();
        assert_eq!(ttc, 2.0);
    }

    #[test]
    fn sqlite_reopen_replaces_table() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_samples(&[sample(0.0)]).unwrap();
        w.finish().unwrap();
        drop(w);

        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        let conn = Connection::open(dir.path().join("TTC.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM ttc_samples", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}

// ── Parquet ───────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use std::fs::File;

    use arrow::array::{Array, Float64Array};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::TempDir;

    use super::helpers::sample;
    use crate::{ParquetWriter, SampleWriter};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn parquet_round_trip() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_samples(&[sample(0.0), sample(1.0), sample(2.0)]).unwrap();
        w.finish().unwrap();

        let file = File::open(dir.path().join("TTC.parquet")).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file).unwrap().build().unwrap();
        let batches: Vec<_> = reader.map(|b| b.unwrap()).collect();
        let total: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total, 3);

        let ttc = batches[0]
            .column_by_name("TTC")
            .unwrap()
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(ttc.len(), 3);
        assert_eq!(ttc.value(0), 3.0);
        assert_eq!(ttc.value(2), 1.0);
    }
}
