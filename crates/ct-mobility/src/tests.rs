//! Unit tests for ct-mobility.

#[cfg(test)]
mod vehicle {
    use ct_core::{CellCoord, Point};

    use crate::{MoveOutcome, Vehicle};

    fn path(v: &[(i32, i32)]) -> Vec<CellCoord> {
        v.iter().map(|&(x, y)| CellCoord::new(x, y)).collect()
    }

    #[test]
    fn starts_on_origin_facing_next() {
        let v = Vehicle::new(path(&[(2, 3), (2, 2)]), 3.0, 0.25, 0.3);
        assert_eq!(v.position, Point::new(2.0, 3.0));
        assert_eq!(v.next_waypoint(), Some(CellCoord::new(2, 2)));
        // North is -y.
        assert!((v.heading + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        let front = v.front_probe();
        assert!((front.y - 2.75).abs() < 1e-6);
        let back = v.back_probe();
        assert!((back.y - 3.25).abs() < 1e-6);
    }

    #[test]
    fn arrives_and_empties_queue() {
        let mut v = Vehicle::new(path(&[(0, 0), (1, 0)]), 10.0, 0.25, 0.3);
        assert_eq!(v.step(100.0, false, 0.1), MoveOutcome::Arrived);
        assert!(v.is_arrived());
        assert_eq!(v.position, Point::new(1.0, 0.0));
    }

    #[test]
    fn throttled_step_is_a_tenth() {
        let mut free = Vehicle::new(path(&[(0, 0), (9, 0)]), 1.0, 0.25, 0.3);
        let mut slow = free.clone();
        free.step(1000.0, false, 0.1);
        slow.step(1000.0, true, 0.1);
        assert!((free.position.x - 1.0).abs() < 1e-5);
        assert!((slow.position.x - 0.1).abs() < 1e-5);
    }

    #[test]
    fn pops_within_twice_the_step() {
        let mut v = Vehicle::new(path(&[(0, 0), (1, 0), (2, 0)]), 4.0, 0.25, 0.3);
        // step = 0.4: distance 1.0 ≥ 0.8, keep the waypoint.
        assert_eq!(v.step(100.0, false, 0.1), MoveOutcome::EnRoute);
        assert_eq!(v.path.len(), 2);
        // distance 0.6 < 0.8: consumed.
        v.step(100.0, false, 0.1);
        assert_eq!(v.path.len(), 1);
        assert_eq!(v.next_waypoint(), Some(CellCoord::new(2, 0)));
    }

    #[test]
    fn turns_towards_each_waypoint() {
        let mut v = Vehicle::new(path(&[(0, 0), (1, 0), (1, 1)]), 10.0, 0.25, 0.3);
        assert!(v.heading.abs() < 1e-6);
        v.step(100.0, false, 0.1);
        v.step(100.0, false, 0.1);
        assert!((v.heading - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn zero_dt_makes_no_progress() {
        let mut v = Vehicle::new(path(&[(0, 0), (3, 0)]), 5.0, 0.25, 0.3);
        assert_eq!(v.step(0.0, false, 0.1), MoveOutcome::EnRoute);
        assert_eq!(v.position, Point::new(0.0, 0.0));
    }

    #[test]
    fn empty_path_is_arrived() {
        let mut v = Vehicle::new(Vec::new(), 5.0, 0.25, 0.3);
        assert_eq!(v.step(16.0, false, 0.1), MoveOutcome::Arrived);
    }
}

#[cfg(test)]
mod traffic {
    use ct_core::CellCoord;

    use crate::{TrafficSnapshot, Vehicle, throttle_flags};

    fn car(v: &[(i32, i32)]) -> Vehicle {
        let path = v.iter().map(|&(x, y)| CellCoord::new(x, y)).collect();
        Vehicle::new(path, 2.0, 0.25, 0.3)
    }

    fn flags(cars: &[Vehicle]) -> Vec<bool> {
        let pairs: Vec<(usize, &Vehicle)> = cars.iter().enumerate().collect();
        let snap = TrafficSnapshot::build(pairs.iter().copied());
        throttle_flags(&snap, &pairs)
    }

    #[test]
    fn lone_vehicle_is_never_blocked() {
        let cars = vec![car(&[(0, 0), (3, 0)])];
        assert_eq!(flags(&cars), vec![false]);
    }

    #[test]
    fn follower_slows_leader_does_not() {
        let follower = car(&[(0, 0), (5, 0)]);
        let mut leader = car(&[(0, 0), (5, 0)]);
        leader.position.x = 0.5;
        assert_eq!(flags(&[follower, leader]), vec![true, false]);
    }

    #[test]
    fn opposite_lanes_pass_freely() {
        let mut cars = vec![car(&[(0, 1), (4, 1)]), car(&[(4, 0), (0, 0)])];
        for _ in 0..40 {
            let f = flags(&cars);
            assert_eq!(f, vec![false, false]);
            for (v, throttled) in cars.iter_mut().zip(f) {
                v.step(100.0, throttled, 0.1);
            }
        }
    }

    #[test]
    fn perpendicular_approach_throttles_both_then_clears() {
        let mut cars = vec![
            car(&[(0, 0), (1, 0), (2, 0), (3, 0)]),
            car(&[(1, -1), (1, 0), (1, 1), (1, 2)]),
        ];
        let mut both_throttled = false;
        let mut ticks = 0;
        while !cars.iter().all(Vehicle::is_arrived) {
            let f = flags(&cars);
            if f == vec![true, true] {
                both_throttled = true;
            }
            for (v, throttled) in cars.iter_mut().zip(f) {
                v.step(100.0, throttled, 0.1);
            }
            ticks += 1;
            assert!(ticks < 500, "vehicles deadlocked");
        }
        assert!(both_throttled);
    }

    #[test]
    fn throttle_clears_after_separation() {
        let mut cars = vec![
            car(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]),
            car(&[(1, -1), (1, 0), (1, 1), (1, 2), (1, 3)]),
        ];
        let mut seen_throttle = false;
        let mut resumed = false;
        for _ in 0..500 {
            let f = flags(&cars);
            if f.iter().any(|&b| b) {
                seen_throttle = true;
            } else if seen_throttle {
                resumed = true;
                break;
            }
            for (v, throttled) in cars.iter_mut().zip(f) {
                v.step(100.0, throttled, 0.1);
            }
        }
        assert!(seen_throttle && resumed);
        assert!(cars.iter().all(|v| !v.is_arrived()));
    }

    #[test]
    fn snapshot_size() {
        let cars = [car(&[(0, 0), (1, 0)]), car(&[(5, 5), (6, 5)])];
        let snap = TrafficSnapshot::build(cars.iter().enumerate());
        assert_eq!(snap.len(), 2);
        assert!(!snap.is_empty());
    }
}
