//! Entry animation played after every render pass.
//!
//! The plan is pure data. [`EntryAnimation::stylesheet`] and
//! [`EntryAnimation::inline_style`] turn it into CSS so the browser runs the
//! timers; nothing here ever waits on an animation.

pub const POLYGON_DELAY_MS: u32 = 100;
pub const VERTEX_BASE_DELAY_MS: u32 = 200;
pub const VERTEX_STAGGER_MS: u32 = 100;
pub const LABEL_BASE_DELAY_MS: u32 = 400;
pub const LABEL_STAGGER_MS: u32 = 80;
pub const ELEMENT_DURATION_MS: u32 = 600;
/// Length used for the polygon's stroke-dash draw-in.
pub const STROKE_DASH_LENGTH: u32 = 1000;
/// Swipe toast stays fully visible this long before fading.
pub const TOAST_HOLD_MS: u32 = 1000;
pub const TOAST_FADE_MS: u32 = 300;

pub const OVERSHOOT_EASING: &str = "cubic-bezier(0.68, -0.55, 0.265, 1.55)";
pub const EASE: &str = "ease";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationTarget {
    Polygon,
    Vertex(usize),
    Label(usize),
}

impl AnimationTarget {
    fn keyframes(self) -> &'static str {
        match self {
            AnimationTarget::Polygon => "radar-draw",
            AnimationTarget::Vertex(_) => "radar-pop",
            AnimationTarget::Label(_) => "radar-rise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationStep {
    pub target: AnimationTarget,
    pub delay_ms: u32,
    pub duration_ms: u32,
    pub easing: &'static str,
}

impl AnimationStep {
    pub fn end_ms(&self) -> u32 {
        self.delay_ms + self.duration_ms
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryAnimation {
    pub duration_ms: u32,
    pub steps: Vec<AnimationStep>,
}

impl EntryAnimation {
    /// Builds the staggered reveal for `point_count` vertices and labels.
    pub fn plan(point_count: usize, duration_ms: u32) -> Self {
        let mut steps = Vec::with_capacity(1 + point_count * 2);
        if point_count > 0 {
            steps.push(AnimationStep {
                target: AnimationTarget::Polygon,
                delay_ms: POLYGON_DELAY_MS,
                duration_ms,
                easing: EASE,
            });
        }
        for idx in 0..point_count {
            steps.push(AnimationStep {
                target: AnimationTarget::Vertex(idx),
                delay_ms: VERTEX_BASE_DELAY_MS + idx as u32 * VERTEX_STAGGER_MS,
                duration_ms: ELEMENT_DURATION_MS,
                easing: OVERSHOOT_EASING,
            });
        }
        for idx in 0..point_count {
            steps.push(AnimationStep {
                target: AnimationTarget::Label(idx),
                delay_ms: LABEL_BASE_DELAY_MS + idx as u32 * LABEL_STAGGER_MS,
                duration_ms: ELEMENT_DURATION_MS,
                easing: EASE,
            });
        }
        Self { duration_ms, steps }
    }

    pub fn step_for(&self, target: AnimationTarget) -> Option<&AnimationStep> {
        self.steps.iter().find(|step| step.target == target)
    }

    /// Time until the last element settles.
    pub fn total_ms(&self) -> u32 {
        self.steps.iter().map(AnimationStep::end_ms).max().unwrap_or(0)
    }

    /// Keyframes shared by every animated element.
    pub fn stylesheet() -> String {
        format!(
            "@keyframes radar-draw {{ from {{ stroke-dashoffset: {dash}; fill-opacity: 0; }} to {{ stroke-dashoffset: 0; fill-opacity: 1; }} }}\
@keyframes radar-pop {{ from {{ transform: scale(0); }} to {{ transform: scale(1); }} }}\
@keyframes radar-rise {{ from {{ opacity: 0; transform: translateY(10px); }} to {{ opacity: 1; transform: translateY(0); }} }}\
.radar-point {{ transform-box: fill-box; transform-origin: center; }}\
{toast}",
            dash = STROKE_DASH_LENGTH,
            toast = Self::toast_keyframes()
        )
    }

    /// Keyframes for the swipe toast, which fades out and stays hidden.
    pub fn toast_keyframes() -> &'static str {
        "@keyframes radar-toast { from { opacity: 1; } to { opacity: 0; visibility: hidden; } }"
    }

    /// Inline `animation` value for the swipe toast.
    pub fn toast_style() -> String {
        format!("animation: radar-toast {TOAST_FADE_MS}ms {EASE} {TOAST_HOLD_MS}ms forwards")
    }

    /// Value for the `style` attribute of an animated element, if it has a step.
    pub fn inline_style(&self, target: AnimationTarget) -> Option<String> {
        self.step_for(target).map(|step| {
            format!(
                "animation: {} {}ms {} {}ms both",
                target.keyframes(),
                step.duration_ms,
                step.easing,
                step.delay_ms
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_and_labels_are_staggered() {
        let plan = EntryAnimation::plan(3, 1200);
        assert_eq!(plan.steps.len(), 7);

        let vertex_delays: Vec<u32> = (0..3)
            .map(|idx| plan.step_for(AnimationTarget::Vertex(idx)).unwrap().delay_ms)
            .collect();
        assert_eq!(vertex_delays, vec![200, 300, 400]);

        let label_delays: Vec<u32> = (0..3)
            .map(|idx| plan.step_for(AnimationTarget::Label(idx)).unwrap().delay_ms)
            .collect();
        assert_eq!(label_delays, vec![400, 480, 560]);

        let vertex = plan.step_for(AnimationTarget::Vertex(0)).unwrap();
        assert_eq!(vertex.easing, OVERSHOOT_EASING);
    }

    #[test]
    fn polygon_uses_configured_duration() {
        let plan = EntryAnimation::plan(2, 800);
        let polygon = plan.step_for(AnimationTarget::Polygon).unwrap();
        assert_eq!(polygon.duration_ms, 800);
        assert_eq!(polygon.delay_ms, POLYGON_DELAY_MS);
        assert_eq!(plan.total_ms(), 1080);
    }

    #[test]
    fn empty_plan_has_no_steps() {
        let plan = EntryAnimation::plan(0, 1200);
        assert!(plan.steps.is_empty());
        assert_eq!(plan.total_ms(), 0);
        assert!(plan.inline_style(AnimationTarget::Polygon).is_none());
    }

    #[test]
    fn toast_fades_after_hold() {
        assert_eq!(
            EntryAnimation::toast_style(),
            "animation: radar-toast 300ms ease 1000ms forwards"
        );
        assert!(EntryAnimation::stylesheet().contains("@keyframes radar-toast"));
    }

    #[test]
    fn inline_style_encodes_delay_and_easing() {
        let plan = EntryAnimation::plan(2, 1200);
        assert_eq!(
            plan.inline_style(AnimationTarget::Vertex(1)).unwrap(),
            "animation: radar-pop 600ms cubic-bezier(0.68, -0.55, 0.265, 1.55) 300ms both"
        );
    }
}
