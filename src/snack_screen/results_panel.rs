use crate::config::PanelConfig;
use std::time::{Duration, Instant};

/// Where the result panel is drawn: vertical offset from its resting place
/// and opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame {
    pub offset: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy)]
enum Animation {
    Idle(PanelFrame),
    Showing { start: Instant, from_alpha: f32 },
    Hiding { start: Instant, from: PanelFrame },
}

/// Slide-and-fade animation of the result panel.
#[derive(Debug, Clone)]
pub struct ResultsPanel {
    config: PanelConfig,
    animation: Animation,
}

impl ResultsPanel {
    pub fn new(config: PanelConfig) -> Self {
        let hidden = PanelFrame {
            offset: config.hidden_offset,
            alpha: 0.0,
        };
        Self {
            config,
            animation: Animation::Idle(hidden),
        }
    }

    /// Jumps to the hidden offset, then springs into view after `delay`.
    /// Opacity picks up from wherever it currently is.
    pub fn show(&mut self, now: Instant, delay: Duration) {
        let from_alpha = self.frame(now).alpha;
        self.animation = Animation::Showing {
            start: now + delay,
            from_alpha,
        };
    }

    /// Fades out from wherever the panel currently is.
    pub fn hide(&mut self, now: Instant) {
        let from = self.frame(now);
        self.animation = Animation::Hiding { start: now, from };
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        match self.animation {
            Animation::Idle(_) => false,
            Animation::Showing { start, .. } => now < start + self.config.show_duration,
            Animation::Hiding { start, .. } => now < start + self.config.hide_duration,
        }
    }

    pub fn frame(&self, now: Instant) -> PanelFrame {
        match self.animation {
            Animation::Idle(frame) => frame,
            Animation::Showing { start, from_alpha } => {
                let (hidden, shown) = (self.config.hidden_offset, self.config.shown_offset);
                if now <= start {
                    return PanelFrame {
                        offset: hidden,
                        alpha: from_alpha,
                    };
                }
                let t = progress(now - start, self.config.show_duration);
                let p = spring(t, self.config.spring_damping, self.config.spring_velocity);
                PanelFrame {
                    offset: hidden + (shown - hidden) * p,
                    alpha: (from_alpha * (1.0 - p) + p).clamp(0.0, 1.0),
                }
            }
            Animation::Hiding { start, from } => {
                let t = progress(now.saturating_duration_since(start), self.config.hide_duration);
                PanelFrame {
                    offset: from.offset,
                    alpha: from.alpha * (1.0 - ease_in_out(t)),
                }
            }
        }
    }
}

fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

/// Normalized step response of an underdamped spring over `t` in `[0, 1]`,
/// starting at 0 with the given initial velocity and settled at 1 when `t == 1`.
pub fn spring(t: f32, damping: f32, initial_velocity: f32) -> f32 {
    if t >= 1.0 {
        return 1.0;
    }
    let damping = damping.clamp(0.05, 0.99);
    // Envelope has decayed to under 1% by the end of the animation
    let omega = 4.6 / damping;
    let decay = damping * omega;
    let omega_d = omega * (1.0 - damping * damping).sqrt();
    let envelope = (-decay * t).exp();
    1.0 - envelope
        * ((omega_d * t).cos() + ((decay - initial_velocity) / omega_d) * (omega_d * t).sin())
}

fn ease_in_out(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> ResultsPanel {
        ResultsPanel::new(PanelConfig::default())
    }

    #[test]
    fn test_starts_hidden() {
        let panel = panel();
        let now = Instant::now();
        assert_eq!(
            panel.frame(now),
            PanelFrame {
                offset: 100.0,
                alpha: 0.0
            }
        );
        assert!(!panel.is_animating(now));
    }

    #[test]
    fn test_show_waits_for_delay_then_settles() {
        let mut panel = panel();
        let now = Instant::now();
        panel.show(now, Duration::from_millis(500));

        let waiting = panel.frame(now + Duration::from_millis(400));
        assert_eq!(waiting.offset, 100.0);
        assert_eq!(waiting.alpha, 0.0);

        let moving = panel.frame(now + Duration::from_millis(700));
        assert!(moving.offset < 100.0);
        assert!(moving.alpha > 0.0);
        assert!(panel.is_animating(now + Duration::from_millis(700)));

        let settled = panel.frame(now + Duration::from_millis(1000));
        assert_eq!(settled.offset, -10.0);
        assert_eq!(settled.alpha, 1.0);
        assert!(!panel.is_animating(now + Duration::from_millis(1000)));
    }

    #[test]
    fn test_hide_fades_alpha_only() {
        let mut panel = panel();
        let now = Instant::now();
        panel.show(now, Duration::ZERO);

        let shown_at = now + Duration::from_secs(1);
        panel.hide(shown_at);

        let halfway = panel.frame(shown_at + Duration::from_millis(150));
        assert_eq!(halfway.offset, -10.0);
        assert!((halfway.alpha - 0.5).abs() < 1e-4);

        let gone = panel.frame(shown_at + Duration::from_millis(300));
        assert_eq!(gone.alpha, 0.0);
        assert_eq!(gone.offset, -10.0);
    }

    #[test]
    fn test_show_during_fade_out_keeps_current_alpha() {
        let mut panel = panel();
        let now = Instant::now();
        panel.show(now, Duration::ZERO);

        let hidden_at = now + Duration::from_secs(1);
        panel.hide(hidden_at);

        let shown_at = hidden_at + Duration::from_millis(150);
        let before = panel.frame(shown_at).alpha;
        assert!((before - 0.5).abs() < 1e-4);

        panel.show(shown_at, Duration::from_millis(100));

        // Still waiting out the delay: opacity holds instead of snapping to zero
        let waiting = panel.frame(shown_at + Duration::from_millis(50));
        assert_eq!(waiting.alpha, before);
        assert_eq!(waiting.offset, 100.0);

        let moving = panel.frame(shown_at + Duration::from_millis(200));
        assert!(moving.alpha > before);

        let settled = panel.frame(shown_at + Duration::from_secs(1));
        assert_eq!(settled.alpha, 1.0);
        assert_eq!(settled.offset, -10.0);
    }

    #[test]
    fn test_hide_while_hidden_stays_hidden() {
        let mut panel = panel();
        let now = Instant::now();
        panel.hide(now);
        assert_eq!(panel.frame(now + Duration::from_millis(100)).alpha, 0.0);
    }

    #[test]
    fn test_spring_endpoints_and_overshoot() {
        assert!(spring(0.0, 0.6, 0.6).abs() < 1e-6);
        assert_eq!(spring(1.0, 0.6, 0.6), 1.0);

        let peak = (1..100)
            .map(|i| spring(i as f32 / 100.0, 0.6, 0.6))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "a damping of 0.6 should overshoot");
        assert!(peak < 1.2);
    }
}
