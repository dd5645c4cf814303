use tracing::trace;

/// Initial velocity and constant per-tick friction for a punch motion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Punch {
    pub velocity: f32,
    pub friction: f32,
}

impl Punch {
    /// Solve for a motion that covers `distance` in `ticks` steps of
    /// `position += velocity; velocity += friction`.
    ///
    /// Friction is the constant deceleration `2D / T²`. The initial velocity
    /// comes from rewinding the motion from the target: starting at rest
    /// (up to the half-step residual `friction / 2`) and undoing one tick at
    /// a time until the whole budget is spent.
    pub fn solve(distance: f32, ticks: u32) -> Self {
        if ticks == 0 || distance == 0.0 {
            return Self::default();
        }

        let t = ticks as f32;
        let acceleration = 2.0 * distance / (t * t);
        let friction = -acceleration;

        let mut velocity = friction / 2.0;
        let mut position = distance;
        for _ in 0..ticks {
            velocity -= friction;
            position -= velocity;
        }

        trace!(distance, ticks, velocity, friction, residual = position, "punch solved");
        Self { velocity, friction }
    }

    /// Advance `position` by one tick, decelerating the motion.
    pub fn step(&mut self, position: &mut f32) {
        *position += self.velocity;
        self.velocity += self.friction;
    }

    /// Drop any residual velocity so further steps hold position.
    pub fn stop(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn integrate(mut punch: Punch, ticks: u32) -> (f32, Vec<f32>) {
        let mut position = 0.0;
        let mut speeds = Vec::new();
        for _ in 0..ticks {
            speeds.push(punch.velocity.abs());
            punch.step(&mut position);
        }
        speeds.push(punch.velocity.abs());
        (position, speeds)
    }

    #[test]
    fn zero_distance_is_still() {
        assert_eq!(Punch::solve(0.0, 60), Punch::default());
        assert_eq!(Punch::solve(3.0, 0), Punch::default());
    }

    #[test]
    fn friction_is_constant_deceleration() {
        let p = Punch::solve(1.8, 60);
        assert!((p.friction + 2.0 * 1.8 / 3600.0).abs() < 1e-7);
        assert!((p.velocity - 1.8 * 119.0 / 3600.0).abs() < 1e-5);
    }

    #[test]
    fn lands_on_target() {
        for distance in [2.25 * PI, 0.5, 4.05, -1.3, 0.01] {
            let (position, _) = integrate(Punch::solve(distance, 60), 60);
            assert!(
                (position - distance).abs() < 1e-4 * distance.abs().max(1.0),
                "distance {distance} landed at {position}"
            );
        }
    }

    #[test]
    fn speed_decreases_to_friction() {
        for distance in [2.25 * PI, 0.5, -1.3] {
            let punch = Punch::solve(distance, 60);
            let (_, speeds) = integrate(punch, 60);
            for pair in speeds[..60].windows(2) {
                assert!(pair[1] < pair[0], "speed must fall: {pair:?}");
            }
            assert!(speeds[60] <= punch.friction.abs() + 1e-7);
        }
    }

    #[test]
    fn stopped_motion_holds_position() {
        let mut punch = Punch::solve(2.25 * PI, 60);
        let mut position = 0.0;
        for _ in 0..60 {
            punch.step(&mut position);
        }
        punch.stop();
        let landed = position;
        for _ in 0..8 {
            punch.step(&mut position);
        }
        assert_eq!(position, landed);
        assert_eq!(punch, Punch::default());
    }

    #[test]
    fn moves_in_direction_of_target() {
        let p = Punch::solve(-2.0, 60);
        assert!(p.velocity < 0.0);
        assert!(p.friction > 0.0);
    }
}
