use std::time::{Duration, Instant};

/// What the chart is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Every category.
    #[default]
    Idle,
    /// Only the named category, with its detail panel open.
    Filtered(String),
}

impl ViewState {
    pub fn selected(&self) -> Option<&str> {
        match self {
            ViewState::Idle => None,
            ViewState::Filtered(id) => Some(id.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved right to left; advances to the next category.
    Left,
    /// Finger moved left to right; goes back to the previous category.
    Right,
}

impl SwipeDirection {
    pub fn feedback(self) -> &'static str {
        match self {
            SwipeDirection::Left => "Next Category",
            SwipeDirection::Right => "Previous Category",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadarEvent {
    /// A filter button. `None` is the "All Skills" button.
    FilterClicked(Option<String>),
    VertexClicked(String),
    Swiped(SwipeDirection),
    Resized,
}

impl RadarEvent {
    /// Events that come from pointer or touch input rather than the window.
    pub fn is_pointer(&self) -> bool {
        !matches!(self, RadarEvent::Resized)
    }
}

/// The single transition function of the chart's interaction state.
pub fn transition(state: &ViewState, event: &RadarEvent, category_ids: &[&str]) -> ViewState {
    match event {
        RadarEvent::FilterClicked(None) => ViewState::Idle,
        RadarEvent::FilterClicked(Some(id)) | RadarEvent::VertexClicked(id) => {
            if !category_ids.contains(&id.as_str()) {
                log::debug!("Ignoring selection of unknown category \"{id}\"");
                return state.clone();
            }
            toggle(state, id)
        }
        RadarEvent::Swiped(direction) => cycle(state, *direction, category_ids),
        RadarEvent::Resized => state.clone(),
    }
}

fn toggle(state: &ViewState, id: &str) -> ViewState {
    if state.selected() == Some(id) {
        ViewState::Idle
    } else {
        ViewState::Filtered(id.to_string())
    }
}

fn cycle(state: &ViewState, direction: SwipeDirection, category_ids: &[&str]) -> ViewState {
    let count = category_ids.len();
    if count == 0 {
        return state.clone();
    }
    let current = state
        .selected()
        .and_then(|id| category_ids.iter().position(|candidate| *candidate == id));
    let next = match (direction, current) {
        (SwipeDirection::Left, None) => 0,
        (SwipeDirection::Right, None) => count - 1,
        (SwipeDirection::Left, Some(idx)) => (idx + 1) % count,
        (SwipeDirection::Right, Some(idx)) => (idx + count - 1) % count,
    };
    ViewState::Filtered(category_ids[next].to_string())
}

/// Thresholds separating a swipe from a tap or a slow drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThresholds {
    pub min_distance: f32,
    pub max_duration: Duration,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            min_distance: 50.0,
            max_duration: Duration::from_millis(300),
        }
    }
}

pub fn recognize_swipe(
    delta_x: f32,
    elapsed: Duration,
    thresholds: SwipeThresholds,
) -> Option<SwipeDirection> {
    if delta_x.abs() <= thresholds.min_distance || elapsed >= thresholds.max_duration {
        return None;
    }
    if delta_x > 0.0 {
        Some(SwipeDirection::Right)
    } else {
        Some(SwipeDirection::Left)
    }
}

/// Pairs touch start and end positions into swipe gestures.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    thresholds: SwipeThresholds,
    start: Option<(f32, Instant)>,
}

impl SwipeTracker {
    pub fn new(thresholds: SwipeThresholds) -> Self {
        Self {
            thresholds,
            start: None,
        }
    }

    pub fn touch_start(&mut self, x: f32, at: Instant) {
        self.start = Some((x, at));
    }

    pub fn touch_end(&mut self, x: f32, at: Instant) -> Option<SwipeDirection> {
        let (start_x, started) = self.start.take()?;
        recognize_swipe(x - start_x, at.saturating_duration_since(started), self.thresholds)
    }
}
