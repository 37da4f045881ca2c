//! Piecewise-linear depth profile for plotting collaborators.
//!
//! A visual approximation only: constant-speed descent and ascent legs
//! sampled once per second, not derived from the force model. Depths are
//! negative below the surface.

/// Sampled (time s, depth m) polyline for one dive.
///
/// The descent leg covers `[0, time_descent)` and the ascent leg
/// `[time_descent, time_descent + time_ascent)`, so the series stops one
/// sample short of resurfacing.
pub fn depth_series(time_descent: f64, time_ascent: f64, depth_max: f64) -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    let mut t = 0.0;
    while t < time_descent {
        points.push((t, -depth_max * t / time_descent));
        t += 1.0;
    }
    let mut t = 0.0;
    while t < time_ascent {
        points.push((time_descent + t, depth_max * t / time_ascent - depth_max));
        t += 1.0;
    }
    points
}

/// The samples where the diver enters and leaves the gliding zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlideMarkers {
    /// First sample deeper than the descent glide depth.
    pub descent: Option<(f64, f64)>,
    /// Last sample deeper than the ascent glide depth.
    pub ascent: Option<(f64, f64)>,
}

/// Locate the glide-window markers on a depth series.
///
/// Glide depths are positive metres below the surface.
pub fn glide_markers(
    track: &[(f64, f64)],
    depth_gliding_descent: f64,
    depth_gliding_ascent: f64,
) -> GlideMarkers {
    GlideMarkers {
        descent: track
            .iter()
            .copied()
            .find(|(_, depth)| depth + depth_gliding_descent < 0.0),
        ascent: track
            .iter()
            .copied()
            .rev()
            .find(|(_, depth)| depth + depth_gliding_ascent < 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_shape() {
        let track = depth_series(120.0, 94.0, 125.0);
        assert_eq!(track.len(), 214);
        assert_eq!(track[0], (0.0, 0.0));

        // Deepest sample sits at the descent/ascent turn.
        let (t_deepest, deepest) = track
            .iter()
            .copied()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        assert_eq!(t_deepest, 120.0);
        assert_eq!(deepest, -125.0);

        // Last ascent sample is one step short of the surface.
        let (t_last, last) = *track.last().unwrap();
        assert_eq!(t_last, 213.0);
        assert!(last < 0.0);
    }

    #[test]
    fn test_series_is_monotone_down_then_up() {
        let track = depth_series(120.0, 94.0, 125.0);
        for pair in track[..120].windows(2) {
            assert!(pair[1].1 < pair[0].1, "descent must deepen: {pair:?}");
        }
        for pair in track[120..].windows(2) {
            assert!(pair[1].1 > pair[0].1, "ascent must shallow: {pair:?}");
        }
    }

    #[test]
    fn test_glide_markers_bracket_the_deep_phase() {
        let track = depth_series(120.0, 94.0, 125.0);
        let markers = glide_markers(&track, 27.5, 7.5);

        let (t_descent, depth_descent) = markers.descent.unwrap();
        let (t_ascent, depth_ascent) = markers.ascent.unwrap();

        assert!(depth_descent < -27.5);
        assert!(depth_ascent < -7.5);
        assert!(t_descent < t_ascent);

        // Every sample before the descent marker is shallower than the
        // descent glide depth; every sample after the ascent marker is
        // shallower than the ascent glide depth.
        for (t, depth) in track.iter().copied() {
            if t < t_descent {
                assert!(depth + 27.5 >= 0.0);
            }
            if t > t_ascent {
                assert!(depth + 7.5 >= 0.0);
            }
        }
    }

    #[test]
    fn test_markers_absent_on_a_shallow_dive() {
        let track = depth_series(30.0, 30.0, 10.0);
        let markers = glide_markers(&track, 27.5, 7.5);
        assert_eq!(markers.descent, None);
        assert!(markers.ascent.is_some());
    }
}
