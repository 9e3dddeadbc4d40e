use std::ops::RangeInclusive;
use thiserror::Error;

use crate::map::lines::Segment;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnimationError {
    #[error("segment {index} has a non-finite endpoint ({lat}, {lng})")]
    NonFinite { index: usize, lat: f64, lng: f64 },
}

/// Accepted line growth speeds, degrees per second.
pub const SPEED_RANGE: RangeInclusive<f64> = 10.0..=720.0;

/// Pulls a configured speed into `SPEED_RANGE`; non-finite values fall back
/// to `fallback`.
pub fn sanitize_speed(speed: f64, fallback: f64) -> f64 {
    let speed = if speed.is_finite() { speed } else { fallback };
    speed.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end())
}

struct SnakeRun {
    segments: Vec<Segment>,
    drawn: f64,
    longest: f64,
}

/// Grows a node's neighbor lines outward from the node ("snake in").
/// One run at a time; `start` is refused while a run is still drawing.
pub struct LineAnimator {
    /// Degrees per second.
    pub speed: f64,
    run: Option<SnakeRun>,
    tracked: Option<usize>,
}

impl LineAnimator {
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            run: None,
            tracked: None,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.run.as_ref().is_some_and(|r| r.drawn < r.longest)
    }

    /// Whether a start was already attempted for `owner` since the last clear.
    pub fn tracks(&self, owner: usize) -> bool {
        self.tracked == Some(owner)
    }

    /// Returns `Ok(true)` when a new run began.
    pub fn start(&mut self, owner: usize, segments: Vec<Segment>) -> Result<bool, AnimationError> {
        if self.is_animating() {
            return Ok(false);
        }
        self.tracked = Some(owner);
        if segments.is_empty() {
            self.run = None;
            return Ok(false);
        }

        for (index, seg) in segments.iter().enumerate() {
            for p in [seg.from, seg.to] {
                if !p.is_finite() {
                    self.run = None;
                    return Err(AnimationError::NonFinite {
                        index,
                        lat: p.lat,
                        lng: p.lng,
                    });
                }
            }
        }

        let longest = segments.iter().map(Segment::length).fold(0.0, f64::max);
        self.run = Some(SnakeRun {
            segments,
            drawn: 0.0,
            longest,
        });
        Ok(true)
    }

    /// Advances the run; returns `true` on the frame the run completes.
    pub fn advance(&mut self, dt: f64) -> bool {
        let speed = self.speed.max(0.0);
        let Some(run) = self.run.as_mut() else {
            return false;
        };
        if run.drawn >= run.longest {
            return false;
        }
        run.drawn = (run.drawn + dt * speed).min(run.longest);
        run.drawn >= run.longest
    }

    /// Visible part of every segment; each grows at the same rate.
    pub fn visible_segments(&self) -> Vec<Segment> {
        let Some(run) = self.run.as_ref() else {
            return Vec::new();
        };
        run.segments
            .iter()
            .map(|seg| {
                let len = seg.length();
                if len <= f64::EPSILON {
                    *seg
                } else {
                    seg.partial(run.drawn / len)
                }
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.run = None;
        self.tracked = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::projection::LatLng;

    fn seg(to_lat: f64) -> Segment {
        Segment {
            from: LatLng::new(0.0, 0.0),
            to: LatLng::new(to_lat, 0.0),
            neighbor: 1,
        }
    }

    #[test]
    fn second_start_is_refused_while_running() {
        let mut anim = LineAnimator::new(10.0);
        assert_eq!(anim.start(0, vec![seg(10.0)]), Ok(true));
        assert!(anim.is_animating());
        assert_eq!(anim.start(5, vec![seg(20.0)]), Ok(false));
        assert!(anim.tracks(0));
        assert!(!anim.tracks(5));
    }

    #[test]
    fn run_completes_and_exposes_full_segments() {
        let mut anim = LineAnimator::new(10.0);
        anim.start(0, vec![seg(10.0), seg(5.0)]).unwrap();

        assert!(!anim.advance(0.5));
        let half = anim.visible_segments();
        assert_eq!(half[0].to, LatLng::new(5.0, 0.0));
        assert_eq!(half[1].to, LatLng::new(5.0, 0.0));

        assert!(anim.advance(1.0));
        assert!(!anim.is_animating());
        let full = anim.visible_segments();
        assert_eq!(full[0].to, LatLng::new(10.0, 0.0));
        assert_eq!(full[1].to, LatLng::new(5.0, 0.0));

        // a finished run no longer blocks new ones
        assert_eq!(anim.start(3, vec![seg(1.0)]), Ok(true));
    }

    #[test]
    fn non_finite_positions_abort_the_run() {
        let mut anim = LineAnimator::new(10.0);
        let bad = Segment {
            from: LatLng::new(0.0, 0.0),
            to: LatLng::new(f64::NAN, 1.0),
            neighbor: 2,
        };
        let err = anim.start(0, vec![seg(1.0), bad]).unwrap_err();
        assert!(matches!(err, AnimationError::NonFinite { index: 1, .. }));
        assert!(!anim.is_animating());
        assert!(anim.visible_segments().is_empty());
        assert!(anim.tracks(0));
    }

    #[test]
    fn configured_speed_is_kept_in_range() {
        assert_eq!(sanitize_speed(0.0, 90.0), 10.0);
        assert_eq!(sanitize_speed(-40.0, 90.0), 10.0);
        assert_eq!(sanitize_speed(5000.0, 90.0), 720.0);
        assert_eq!(sanitize_speed(f64::NAN, 90.0), 90.0);
        assert_eq!(sanitize_speed(120.0, 90.0), 120.0);
    }

    #[test]
    fn clear_forgets_owner() {
        let mut anim = LineAnimator::new(10.0);
        anim.start(4, vec![seg(1.0)]).unwrap();
        anim.clear();
        assert!(!anim.tracks(4));
        assert!(anim.visible_segments().is_empty());
    }
}
