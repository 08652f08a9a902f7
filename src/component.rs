//! The mounted radar component.
//!
//! A [`RadarComponent`] ties a [`SkillsSource`] to a [`Mount`]: it loads the
//! dataset once, renders the component markup into the mount and re-renders on
//! every accepted interaction. Resizes are debounced on the tokio timer, so
//! the component must live inside a tokio runtime.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;

use crate::animation::EntryAnimation;
use crate::config::{Config, RadarOptions, ResolvedOptions};
use crate::controller::{RadarEvent, SwipeThresholds, SwipeTracker, ViewState, transition};
use crate::debounce::Debouncer;
use crate::error::RadarError;
use crate::layout::{compute_radar_layout, filtered_categories};
use crate::model::SkillsData;
use crate::render::{ComponentView, RenderPass, render_component, render_error};
use crate::sizing::ChartSize;
use crate::source::{CachedSource, SkillsSource};
use crate::theme::Theme;

/// A place rendered markup is written to.
pub trait Mount: Send + Sync {
    fn id(&self) -> &str;
    /// Replaces everything previously written.
    fn replace_content(&self, markup: String);
}

#[derive(Debug, Default)]
struct MountContent {
    markup: String,
    writes: usize,
}

/// Keeps the last written markup in memory.
#[derive(Debug, Default)]
pub struct MemoryMount {
    id: String,
    content: Mutex<MountContent>,
}

impl MemoryMount {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: Mutex::new(MountContent::default()),
        }
    }

    pub fn content(&self) -> String {
        self.content.lock().markup.clone()
    }

    pub fn write_count(&self) -> usize {
        self.content.lock().writes
    }
}

impl Mount for MemoryMount {
    fn id(&self) -> &str {
        &self.id
    }

    fn replace_content(&self, markup: String) {
        let mut content = self.content.lock();
        content.markup = markup;
        content.writes += 1;
    }
}

/// The set of mount targets a component can be attached to.
#[derive(Default, Clone)]
pub struct Page {
    mounts: Vec<Arc<dyn Mount>>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mount(mut self, mount: Arc<dyn Mount>) -> Self {
        self.add(mount);
        self
    }

    pub fn add(&mut self, mount: Arc<dyn Mount>) {
        self.mounts.push(mount);
    }

    pub fn find(&self, id: &str) -> Option<Arc<dyn Mount>> {
        self.mounts.iter().find(|mount| mount.id() == id).cloned()
    }
}

/// Everything a render pass needs besides the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizationState {
    pub size: ChartSize,
    pub view: ViewState,
    pub interactive: bool,
    pub show_tooltips: bool,
    pub animation_duration_ms: u32,
    pub theme: Theme,
}

impl VisualizationState {
    fn from_resolved(resolved: ResolvedOptions) -> Self {
        Self {
            size: resolved.size,
            view: ViewState::Idle,
            interactive: resolved.interactive,
            show_tooltips: resolved.show_tooltips,
            animation_duration_ms: resolved.animation_duration_ms,
            theme: resolved.theme,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.size.tier.is_mobile()
    }

    pub fn is_tablet(&self) -> bool {
        self.size.tier.is_tablet()
    }
}

struct Inner {
    container_id: String,
    mount: Option<Arc<dyn Mount>>,
    config: Config,
    options: RadarOptions,
    state: VisualizationState,
    data: Option<Arc<SkillsData>>,
    renders: u64,
    swipe: SwipeTracker,
    resize: Debouncer,
    feedback: Option<&'static str>,
    destroyed: bool,
}

impl Inner {
    fn render(&mut self) {
        let (Some(mount), Some(data)) = (self.mount.clone(), self.data.clone()) else {
            return;
        };
        self.renders += 1;
        let categories = filtered_categories(&data, self.state.view.selected());
        let layout = compute_radar_layout(&categories, self.state.size, &self.config.layout);
        let pass = RenderPass::new(format!("{}-{}", self.container_id, self.renders))
            .with_tooltips(self.state.show_tooltips)
            .with_animation(EntryAnimation::plan(
                layout.points.len(),
                self.state.animation_duration_ms,
            ));
        let feedback = self.feedback.take();
        let markup = render_component(&ComponentView {
            data: &data,
            layout: &layout,
            selected: self.state.view.selected(),
            theme: &self.state.theme,
            pass: &pass,
            feedback,
        });
        log::debug!(
            "Render pass {} for #{}: {} categories",
            self.renders,
            self.container_id,
            layout.points.len()
        );
        mount.replace_content(markup);
    }

    fn show_error(&self, message: &str) {
        if let Some(mount) = &self.mount {
            mount.replace_content(render_error(message, &self.state.theme));
        }
    }

    fn apply_event(&mut self, event: RadarEvent) -> bool {
        if self.destroyed {
            return false;
        }
        let Some(data) = self.data.clone() else {
            log::debug!("Ignoring {event:?} before data is loaded");
            return false;
        };
        if event.is_pointer() && !self.state.interactive {
            log::debug!("Ignoring {event:?} on a non-interactive radar");
            return false;
        }
        if matches!(event, RadarEvent::Swiped(_)) && !self.state.is_mobile() {
            return false;
        }
        let ids = data.category_ids();
        let next = transition(&self.state.view, &event, &ids);
        if next == self.state.view {
            return false;
        }
        if let RadarEvent::Swiped(direction) = event {
            self.feedback = Some(direction.feedback());
        }
        self.state.view = next;
        self.render();
        true
    }

    fn apply_resize(&mut self, viewport_width: f32) {
        if self.destroyed {
            return;
        }
        let resolved = self.options.resolve(viewport_width, &self.config.theme);
        let resized = resolved
            .size
            .differs_significantly(&self.state.size, self.config.layout.resize_threshold);
        let tier_changed = resolved.size.tier != self.state.size.tier;
        if !resized && !tier_changed {
            log::debug!("Ignoring resize to {viewport_width}px, chart size unchanged");
            return;
        }
        if resized {
            self.state.size = resolved.size;
        } else {
            // Small pixel change across a breakpoint: keep the size, move the tier.
            self.state.size.tier = resolved.size.tier;
        }
        self.state.show_tooltips = resolved.show_tooltips;
        self.state.animation_duration_ms = resolved.animation_duration_ms;
        self.render();
    }
}

pub struct RadarComponent<S> {
    container_id: String,
    source: CachedSource<S>,
    inner: Arc<Mutex<Inner>>,
}

impl<S: SkillsSource> RadarComponent<S> {
    /// Attaches to the mount named `container_id` on `page`. A missing mount
    /// is reported by [`RadarComponent::init`].
    pub fn new(
        container_id: impl Into<String>,
        page: &Page,
        source: S,
        options: RadarOptions,
        viewport_width: f32,
    ) -> Self {
        Self::with_config(
            container_id,
            page,
            source,
            options,
            viewport_width,
            Config::default(),
        )
    }

    pub fn with_config(
        container_id: impl Into<String>,
        page: &Page,
        source: S,
        options: RadarOptions,
        viewport_width: f32,
        config: Config,
    ) -> Self {
        let container_id = container_id.into();
        let resolved = options.resolve(viewport_width, &config.theme);
        let swipe = SwipeTracker::new(SwipeThresholds {
            min_distance: config.layout.swipe_min_distance,
            max_duration: Duration::from_millis(config.layout.swipe_max_duration_ms),
        });
        let resize = Debouncer::new(Duration::from_millis(config.layout.resize_debounce_ms));
        let inner = Inner {
            container_id: container_id.clone(),
            mount: page.find(&container_id),
            config,
            options,
            state: VisualizationState::from_resolved(resolved),
            data: None,
            renders: 0,
            swipe,
            resize,
            feedback: None,
            destroyed: false,
        };
        Self {
            container_id,
            source: CachedSource::new(source),
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Loads the dataset and performs the first render. Any failure renders
    /// the error panel (when the mount exists) and is returned.
    pub async fn init(&self) -> Result<(), RadarError> {
        let (mount, destroyed) = {
            let inner = self.inner.lock();
            (inner.mount.clone(), inner.destroyed)
        };
        if destroyed {
            log::debug!("Skipping init of destroyed radar #{}", self.container_id);
            return Ok(());
        }
        if mount.is_none() {
            let err = RadarError::ContainerMissing(self.container_id.clone());
            log::error!("Failed to initialize skills radar: {err}");
            return Err(err);
        }

        match self.source.load().await {
            Ok(data) => {
                let mut inner = self.inner.lock();
                let count = data.skill_categories.len();
                inner.data = Some(data);
                inner.render();
                log::info!(
                    "Skills radar #{} initialized with {count} categories",
                    self.container_id
                );
                Ok(())
            }
            Err(err) => {
                let err = RadarError::from(err);
                log::error!("Failed to initialize skills radar: {err}");
                self.inner.lock().show_error(&err.to_string());
                Err(err)
            }
        }
    }

    /// The error panel's "Try Again" action.
    pub async fn retry(&self) -> Result<(), RadarError> {
        log::info!("Retrying skills radar #{}", self.container_id);
        self.init().await
    }

    /// Feeds one interaction through the state machine. Returns whether the
    /// chart was re-rendered.
    pub fn handle(&self, event: RadarEvent) -> bool {
        self.inner.lock().apply_event(event)
    }

    pub fn touch_start(&self, x: f32) {
        let now = tokio::time::Instant::now().into_std();
        let mut inner = self.inner.lock();
        if inner.destroyed || !inner.state.is_mobile() || !inner.state.interactive {
            return;
        }
        inner.swipe.touch_start(x, now);
    }

    /// Completes a touch; a recognized swipe cycles the selected category.
    pub fn touch_end(&self, x: f32) -> bool {
        let now = tokio::time::Instant::now().into_std();
        let mut inner = self.inner.lock();
        match inner.swipe.touch_end(x, now) {
            Some(direction) => inner.apply_event(RadarEvent::Swiped(direction)),
            None => false,
        }
    }

    /// Schedules a re-layout for a new viewport width. Bursts collapse into
    /// one trailing resize, which re-renders only if the chart size moved by
    /// more than the configured threshold.
    pub fn resize(&self, viewport_width: f32) {
        let weak: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        let mut inner = self.inner.lock();
        if inner.destroyed {
            return;
        }
        inner.resize.schedule(move || {
            if let Some(inner) = weak.upgrade() {
                inner.lock().apply_resize(viewport_width);
            }
        });
    }

    /// Cancels the pending resize and turns every later call into a no-op.
    pub fn destroy(&self) {
        let mut inner = self.inner.lock();
        if inner.destroyed {
            return;
        }
        inner.destroyed = true;
        inner.resize.cancel();
        log::debug!("Destroyed skills radar #{}", self.container_id);
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn state(&self) -> VisualizationState {
        self.inner.lock().state.clone()
    }

    pub fn data(&self) -> Option<Arc<SkillsData>> {
        self.inner.lock().data.clone()
    }

    /// Completed render passes, excluding error panels.
    pub fn render_count(&self) -> u64 {
        self.inner.lock().renders
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.lock().destroyed
    }

    pub fn is_resize_pending(&self) -> bool {
        self.inner.lock().resize.is_pending()
    }
}

impl<S> Drop for RadarComponent<S> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock();
        inner.destroyed = true;
        inner.resize.cancel();
    }
}
