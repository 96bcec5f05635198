//! Landing impact: a short squash of the capsule and camera after a hard
//! landing, followed by a hold and a recovery.

use serde::{Deserialize, Serialize};

use super::config::LocomotionConfig;
use super::ground::GroundState;
use super::transition::{Pose, Progress, Tween};

/// Phase of a running impact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ImpactPhase {
    Dip(Tween),
    Hold { remaining: f32 },
    Recover(Tween),
}

/// A running dip, hold and recover sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingImpact {
    phase: ImpactPhase,
    rest: Pose,
    dipped: Pose,
    hold: f32,
    recover_time: f32,
    reduction: f32,
}

impl LandingImpact {
    /// Advance the sequence. Each phase snaps to its end pose before the
    /// next one starts.
    pub fn advance(&mut self, dt: f32) -> Progress {
        match &mut self.phase {
            ImpactPhase::Dip(tween) => {
                let progress = tween.advance(dt);
                if progress.is_finished() {
                    self.phase = ImpactPhase::Hold { remaining: self.hold };
                }
                Progress::Running(progress.pose())
            }
            ImpactPhase::Hold { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.phase = ImpactPhase::Recover(Tween::new(self.dipped, self.rest, self.recover_time));
                }
                Progress::Running(self.dipped)
            }
            ImpactPhase::Recover(tween) => tween.advance(dt),
        }
    }

    pub fn phase(&self) -> &ImpactPhase {
        &self.phase
    }

    /// Height lost at the bottom of the dip.
    pub fn reduction(&self) -> f32 {
        self.reduction
    }

    /// Pose at the bottom of the dip.
    pub fn dipped(&self) -> Pose {
        self.dipped
    }

    /// Pose the sequence returns to.
    pub fn rest(&self) -> Pose {
        self.rest
    }
}

/// Detects hard landings and builds impact sequences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingImpactController {
    air_time_threshold: f32,
    height_reduction: f32,
    dip_time: f32,
    hold_time: f32,
    recover_time: f32,
    velocity_penalty: f32,
}

impl LandingImpactController {
    pub fn new(config: &LocomotionConfig) -> Self {
        Self {
            air_time_threshold: config.air_time_threshold,
            height_reduction: config.landing_height_reduction,
            dip_time: config.landing_dip_time,
            hold_time: config.landing_hold_time,
            recover_time: config.landing_recover_time,
            velocity_penalty: config.landing_velocity_penalty,
        }
    }

    /// Air time of a hard landing this tick, if there was one.
    pub fn check(&self, ground: &GroundState) -> Option<f32> {
        (ground.just_landed() && ground.air_time >= self.air_time_threshold).then_some(ground.air_time)
    }

    /// Height reduction for a landing after `air_time` seconds.
    pub fn reduction_for(&self, air_time: f32) -> f32 {
        self.height_reduction * (air_time / self.air_time_threshold).clamp(0.0, 1.0)
    }

    /// Start an impact from the `current` pose that settles back at `rest`.
    pub fn begin(&self, current: Pose, rest: Pose, air_time: f32) -> LandingImpact {
        let reduction = self.reduction_for(air_time);
        let dipped = rest.lowered(reduction);
        LandingImpact {
            phase: ImpactPhase::Dip(Tween::new(current, dipped, self.dip_time)),
            rest,
            dipped,
            hold: self.hold_time,
            recover_time: self.recover_time,
            reduction,
        }
    }

    /// Horizontal velocity multiplier applied once at touchdown.
    pub fn velocity_penalty(&self) -> f32 {
        self.velocity_penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locomotion::posture::{ActiveTransition, PostureController};

    const DT: f32 = 1.0 / 60.0;

    fn landed_after(air_time: f32) -> GroundState {
        GroundState {
            is_grounded: true,
            was_grounded_last_frame: false,
            air_time,
            slope: None,
        }
    }

    #[test]
    fn test_threshold() {
        let controller = LandingImpactController::new(&LocomotionConfig::default());

        assert_eq!(controller.check(&landed_after(0.05)), None);
        assert_eq!(controller.check(&landed_after(0.2)), Some(0.2));

        // Still grounded from last tick: not a landing
        let standing = GroundState {
            was_grounded_last_frame: true,
            ..landed_after(0.2)
        };
        assert_eq!(controller.check(&standing), None);
    }

    #[test]
    fn test_reduction_is_proportional_and_capped() {
        let controller = LandingImpactController::new(&LocomotionConfig {
            air_time_threshold: 0.4,
            ..Default::default()
        });

        assert!((controller.reduction_for(0.2) - 0.05).abs() < 1e-6);
        assert_eq!(controller.reduction_for(0.4), 0.1);
        assert_eq!(controller.reduction_for(3.0), 0.1);
    }

    #[test]
    fn test_sequence_dips_holds_and_recovers() {
        let config = LocomotionConfig::default();
        let controller = LandingImpactController::new(&config);
        let rest = config.standing_pose();

        let mut impact = controller.begin(rest, rest, 0.2);
        assert_eq!(impact.dipped().height, rest.height - 0.1);

        let mut lowest = rest.height;
        let mut last = Progress::Running(rest);
        for _ in 0..60 {
            last = impact.advance(DT);
            lowest = lowest.min(last.pose().height);
            if last.is_finished() {
                break;
            }
        }

        assert_eq!(lowest, rest.height - 0.1);
        assert_eq!(last, Progress::Finished(rest));
    }

    #[test]
    fn test_hold_keeps_dipped_pose() {
        let config = LocomotionConfig::default();
        let controller = LandingImpactController::new(&config);
        let rest = config.standing_pose();
        let mut impact = controller.begin(rest, rest, 1.0);

        // Past the 0.1s dip
        for _ in 0..7 {
            impact.advance(DT);
        }
        assert!(matches!(impact.phase(), ImpactPhase::Hold { .. }));
        assert_eq!(impact.advance(DT).pose(), impact.dipped());
    }

    fn dip_start(active: &ActiveTransition) -> Pose {
        match active {
            ActiveTransition::LandingImpact(impact) => match impact.phase() {
                ImpactPhase::Dip(tween) => tween.start(),
                other => panic!("expected a fresh dip, got {other:?}"),
            },
            other => panic!("expected landing impact, got {other:?}"),
        }
    }

    #[test]
    fn test_second_landing_mid_dip_restarts_from_current_pose() {
        let config = LocomotionConfig::default();
        let controller = LandingImpactController::new(&config);
        let mut posture = PostureController::new(&config);

        posture.begin_landing_impact(controller.begin(posture.pose(), posture.rest_pose(), 1.0));
        for _ in 0..3 {
            posture.advance(DT);
        }
        let interrupted = posture.pose();
        assert!(interrupted.height < config.standing_height);
        assert!(interrupted.height > config.standing_height - config.landing_height_reduction);

        posture.begin_landing_impact(controller.begin(posture.pose(), posture.rest_pose(), 0.5));
        assert_eq!(dip_start(posture.active()), interrupted);

        // Continues smoothly from where the first dip left off
        let next = posture.advance(DT);
        assert!((next.height - interrupted.height).abs() < 0.05);
    }

    #[test]
    fn test_second_landing_mid_recovery_restarts_from_current_pose() {
        let config = LocomotionConfig::default();
        let controller = LandingImpactController::new(&config);
        let mut posture = PostureController::new(&config);
        posture.begin_landing_impact(controller.begin(posture.pose(), posture.rest_pose(), 1.0));

        let mut recovering = false;
        for _ in 0..120 {
            posture.advance(DT);
            if let ActiveTransition::LandingImpact(impact) = posture.active() {
                if matches!(impact.phase(), ImpactPhase::Recover(_)) {
                    recovering = true;
                    break;
                }
            }
        }
        assert!(recovering, "never reached recovery");
        posture.advance(DT);
        let interrupted = posture.pose();

        let second = controller.begin(posture.pose(), posture.rest_pose(), 1.0);
        posture.begin_landing_impact(second);
        assert_eq!(dip_start(posture.active()), interrupted);
        assert_eq!(second.rest(), config.standing_pose());

        for _ in 0..600 {
            if !posture.is_transitioning() {
                break;
            }
            posture.advance(DT);
        }
        assert_eq!(posture.pose(), config.standing_pose());
    }
}
