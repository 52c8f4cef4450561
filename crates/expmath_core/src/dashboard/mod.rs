//! Reactive engine shared by every visualization.
//!
//! A dashboard owns the widgets of one visualization, the data sink the
//! renderer reads and the bindings that tie widget names to recomputes.
//! Widget writes are grouped into change batches: reactions run first and
//! may rewrite further widgets, then every dirty recompute runs once
//! against a single snapshot and its output replaces the sink entries.

pub mod animation;
pub mod error;
pub mod history;
pub mod settings;
pub mod sink;
pub mod snapshot;
pub mod widget;

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt::Debug;

use tracing::{debug, trace, warn};

pub use animation::{advance, AnimationEvent, AnimationHandle, AnimationSpec, Animator};
pub use error::{DashboardError, DashboardResult};
pub use history::History;
pub use settings::DashboardSettings;
pub use sink::{Column, ColumnData, DataSink, Frame, Update};
pub use snapshot::Snapshot;
pub use widget::{Bounds, Choice, Widget, WidgetKind, WidgetValue};

/// Who wrote a widget value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    Reaction,
    Animation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub widget: String,
    pub old: WidgetValue,
    pub new: WidgetValue,
    pub origin: Origin,
}

impl Change {
    pub fn is(&self, name: &str) -> bool {
        self.widget == name
    }
}

/// Ties a recompute to the widgets whose changes make it dirty.
///
/// A binding without triggers only runs on populate and refresh.
#[derive(Debug, Clone)]
pub struct Binding<R> {
    pub recompute: R,
    pub triggers: Vec<&'static str>,
}

impl<R> Binding<R> {
    pub fn new(recompute: R, triggers: &[&'static str]) -> Self {
        Self {
            recompute,
            triggers: triggers.to_vec(),
        }
    }
}

/// One interactive exploration: its widgets, recomputes and reactions.
///
/// A visualization is cloned at the start of every change batch so that
/// state touched by reactions can be restored when the batch fails.
pub trait Visualization: Clone {
    type Recompute: Copy + Eq + Debug;

    fn widgets(&self) -> Vec<Widget>;

    fn bindings(&self) -> Vec<Binding<Self::Recompute>>;

    /// Produces whole sink entries from the snapshot alone.
    fn recompute(&self, which: Self::Recompute, snapshot: &Snapshot) -> DashboardResult<Update>;

    /// Rewrites other widgets in response to a change.
    fn react(&mut self, _change: &Change, _controls: &mut Controls<'_>) -> DashboardResult<()> {
        Ok(())
    }

    fn animation(&self) -> Option<AnimationSpec> {
        None
    }
}

/// Widget access handed to reactions.
///
/// Value writes become part of the current batch. A write to a widget that
/// has already been a source in this batch is skipped, which stops two
/// widgets from rewriting each other forever.
pub struct Controls<'a> {
    widgets: &'a mut [Widget],
    sources: &'a HashSet<String>,
    pending: Vec<Change>,
    touched: BTreeSet<String>,
}

impl<'a> Controls<'a> {
    fn new(widgets: &'a mut [Widget], sources: &'a HashSet<String>) -> Self {
        Self {
            widgets,
            sources,
            pending: Vec::new(),
            touched: BTreeSet::new(),
        }
    }

    fn widget_mut(&mut self, name: &str) -> DashboardResult<&mut Widget> {
        self.widgets
            .iter_mut()
            .find(|w| w.name == name)
            .ok_or_else(|| DashboardError::UnknownWidget(name.to_string()))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_widgets(&*self.widgets)
    }

    pub fn value(&self, name: &str) -> DashboardResult<WidgetValue> {
        self.widgets
            .iter()
            .find(|w| w.name == name)
            .map(|w| w.value)
            .ok_or_else(|| DashboardError::UnknownWidget(name.to_string()))
    }

    pub fn number(&self, name: &str) -> DashboardResult<f64> {
        self.snapshot().number(name)
    }

    pub fn flag(&self, name: &str) -> DashboardResult<bool> {
        self.snapshot().flag(name)
    }

    pub fn choice<C: Choice>(&self, name: &str) -> DashboardResult<C> {
        self.snapshot().choice(name)
    }

    /// Returns whether the write was applied and queued.
    pub fn set_value(&mut self, name: &str, value: WidgetValue) -> DashboardResult<bool> {
        let is_source = self.sources.contains(name);
        let widget = self.widget_mut(name)?;
        let value = checked_value(widget, value, OutOfBounds::Clamp)?;
        if widget.value == value {
            return Ok(false);
        }
        if is_source {
            warn!(widget = name, "skipping write back to a source widget");
            return Ok(false);
        }
        let old = std::mem::replace(&mut widget.value, value);
        self.touched.insert(name.to_string());
        self.pending.push(Change {
            widget: name.to_string(),
            old,
            new: value,
            origin: Origin::Reaction,
        });
        Ok(true)
    }

    pub fn set_number(&mut self, name: &str, value: f64) -> DashboardResult<bool> {
        self.set_value(name, WidgetValue::Number(value))
    }

    pub fn set_choice<C: Choice>(&mut self, name: &str, choice: C) -> DashboardResult<bool> {
        self.set_value(name, WidgetValue::Index(choice.index()))
    }

    pub fn set_range(&mut self, name: &str, lo: f64, hi: f64) -> DashboardResult<bool> {
        self.set_value(name, WidgetValue::Range(lo, hi))
    }

    pub fn set_flag(&mut self, name: &str, flag: bool) -> DashboardResult<bool> {
        self.set_value(name, WidgetValue::Flag(flag))
    }

    pub fn set_title(&mut self, name: &str, title: &str) -> DashboardResult<()> {
        let widget = self.widget_mut(name)?;
        if widget.title != title {
            widget.title = title.to_string();
            self.touched.insert(name.to_string());
        }
        Ok(())
    }

    pub fn set_bounds(&mut self, name: &str, bounds: Bounds) -> DashboardResult<()> {
        let widget = self.widget_mut(name)?;
        if widget.bounds != Some(bounds) {
            widget.bounds = Some(bounds);
            self.touched.insert(name.to_string());
        }
        Ok(())
    }

    pub fn set_visible(&mut self, name: &str, visible: bool) -> DashboardResult<()> {
        let widget = self.widget_mut(name)?;
        if widget.visible != visible {
            widget.visible = visible;
            self.touched.insert(name.to_string());
        }
        Ok(())
    }

    /// Retitles and rebounds a slider, then writes its value.
    pub fn configure_slider(
        &mut self,
        name: &str,
        title: &str,
        bounds: Bounds,
        value: f64,
    ) -> DashboardResult<()> {
        self.set_title(name, title)?;
        self.set_bounds(name, bounds)?;
        self.set_number(name, value)?;
        Ok(())
    }

    fn finish(self) -> (Vec<Change>, BTreeSet<String>) {
        (self.pending, self.touched)
    }
}

/// What to do with a slider value outside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutOfBounds {
    /// User writes are refused.
    Reject,
    /// Reactions move the value to the nearest bound, as a slider would.
    Clamp,
}

/// Slack for values that miss a bound by rounding only.
const BOUNDS_TOLERANCE: f64 = 1e-9;

/// Checks `value` against the kind, choices and bounds of `widget`.
fn checked_value(
    widget: &Widget,
    value: WidgetValue,
    policy: OutOfBounds,
) -> DashboardResult<WidgetValue> {
    if !widget.value.same_kind(&value) {
        return Err(DashboardError::KindMismatch {
            name: widget.name.clone(),
            expected: widget.value.kind_name(),
            found: value.kind_name(),
        });
    }
    match value {
        WidgetValue::Index(index) if index >= widget.choices() => {
            Err(DashboardError::ChoiceOutOfRange {
                name: widget.name.clone(),
                index,
                len: widget.choices(),
            })
        }
        WidgetValue::Number(v) => Ok(WidgetValue::Number(fit_bounds(widget, v, policy)?)),
        WidgetValue::Range(lo, hi) => {
            if lo > hi {
                return Err(DashboardError::ReversedRange {
                    name: widget.name.clone(),
                    lo,
                    hi,
                });
            }
            Ok(WidgetValue::Range(
                fit_bounds(widget, lo, policy)?,
                fit_bounds(widget, hi, policy)?,
            ))
        }
        other => Ok(other),
    }
}

fn fit_bounds(widget: &Widget, value: f64, policy: OutOfBounds) -> DashboardResult<f64> {
    let Some(bounds) = widget.bounds else {
        return if value.is_finite() {
            Ok(value)
        } else {
            Err(DashboardError::OutOfRange {
                name: widget.name.clone(),
                value,
                start: f64::NEG_INFINITY,
                end: f64::INFINITY,
            })
        };
    };
    let slack = BOUNDS_TOLERANCE * (bounds.end - bounds.start).abs().max(1.0);
    let outside = value < bounds.start - slack || value > bounds.end + slack;
    if !value.is_finite() || (outside && policy == OutOfBounds::Reject) {
        return Err(DashboardError::OutOfRange {
            name: widget.name.clone(),
            value,
            start: bounds.start,
            end: bounds.end,
        });
    }
    Ok(value.max(bounds.start).min(bounds.end))
}

pub struct Dashboard<V: Visualization> {
    visualization: V,
    widgets: Vec<Widget>,
    bindings: Vec<Binding<V::Recompute>>,
    order: Vec<V::Recompute>,
    sink: DataSink,
    animator: Animator,
    settings: DashboardSettings,
    recomputes_run: usize,
}

impl<V: Visualization> Dashboard<V> {
    pub fn new(visualization: V, settings: DashboardSettings) -> DashboardResult<Self> {
        let widgets = visualization.widgets();
        let mut names = HashSet::new();
        for widget in &widgets {
            if !names.insert(widget.name.as_str()) {
                return Err(DashboardError::DuplicateWidget(widget.name.clone()));
            }
            checked_value(widget, widget.value, OutOfBounds::Reject)?;
        }

        let bindings = visualization.bindings();
        let mut order = Vec::new();
        for binding in &bindings {
            for trigger in &binding.triggers {
                if !names.contains(trigger) {
                    return Err(DashboardError::UnknownWidget(trigger.to_string()));
                }
            }
            if !order.contains(&binding.recompute) {
                order.push(binding.recompute);
            }
        }

        if let Some(spec) = visualization.animation() {
            if !names.contains(spec.toggle) {
                return Err(DashboardError::UnknownWidget(spec.toggle.to_string()));
            }
            let target = widgets
                .iter()
                .find(|w| w.name == spec.target)
                .ok_or_else(|| DashboardError::UnknownWidget(spec.target.to_string()))?;
            if target.bounds.is_none() || !matches!(target.value, WidgetValue::Number(_)) {
                return Err(DashboardError::InvalidAnimationTarget(
                    spec.target.to_string(),
                ));
            }
        }

        Ok(Self {
            visualization,
            widgets,
            bindings,
            order,
            sink: DataSink::default(),
            animator: Animator::default(),
            settings,
            recomputes_run: 0,
        })
    }

    pub fn visualization(&self) -> &V {
        &self.visualization
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn widget(&self, name: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.name == name)
    }

    pub fn sink(&self) -> &DataSink {
        &self.sink
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_widgets(&self.widgets)
    }

    /// Total number of recomputes run since construction.
    pub fn recomputes_run(&self) -> usize {
        self.recomputes_run
    }

    pub fn animation_handle(&self) -> Option<AnimationHandle> {
        self.animator.active()
    }

    /// Runs every recompute once so the sink reflects the initial widgets.
    pub fn populate(&mut self) -> DashboardResult<Frame> {
        let order = self.order.clone();
        let mut frame = self.run_recomputes(&order)?;
        frame.widgets = self.widgets.clone();
        debug!(recomputes = frame.recomputes, "populated dashboard");
        Ok(frame)
    }

    /// Re-runs all recomputes against the unchanged widgets.
    pub fn refresh(&mut self) -> DashboardResult<Frame> {
        self.populate()
    }

    pub fn set_value(&mut self, name: &str, value: WidgetValue) -> DashboardResult<Frame> {
        self.apply_batch(&[(name.to_string(), value)])
    }

    pub fn set_number(&mut self, name: &str, value: f64) -> DashboardResult<Frame> {
        self.set_value(name, WidgetValue::Number(value))
    }

    pub fn set_index(&mut self, name: &str, index: usize) -> DashboardResult<Frame> {
        self.set_value(name, WidgetValue::Index(index))
    }

    pub fn set_choice<C: Choice>(&mut self, name: &str, choice: C) -> DashboardResult<Frame> {
        self.set_value(name, WidgetValue::Index(choice.index()))
    }

    pub fn set_flag(&mut self, name: &str, flag: bool) -> DashboardResult<Frame> {
        self.set_value(name, WidgetValue::Flag(flag))
    }

    pub fn set_range(&mut self, name: &str, lo: f64, hi: f64) -> DashboardResult<Frame> {
        self.set_value(name, WidgetValue::Range(lo, hi))
    }

    /// Applies several user writes as one batch.
    pub fn apply_batch(&mut self, writes: &[(String, WidgetValue)]) -> DashboardResult<Frame> {
        self.run_batch(writes, Origin::User)
    }

    /// Advances the animated slider if `handle` is still the live one.
    pub fn tick(&mut self, handle: AnimationHandle) -> DashboardResult<Frame> {
        if !self.animator.is_current(handle) {
            debug!(handle = handle.id(), "ignoring tick from a stale animation");
            return Ok(Frame::default());
        }
        let Some(spec) = self.visualization.animation() else {
            return Ok(Frame::default());
        };
        let widget = self
            .widget(spec.target)
            .ok_or_else(|| DashboardError::UnknownWidget(spec.target.to_string()))?;
        let (WidgetValue::Number(current), Some(bounds)) = (widget.value, widget.bounds) else {
            return Err(DashboardError::InvalidAnimationTarget(spec.target.to_string()));
        };
        let next = advance(current, bounds);
        self.run_batch(
            &[(spec.target.to_string(), WidgetValue::Number(next))],
            Origin::Animation,
        )
    }

    /// Runs one change batch. A failed batch leaves the widgets, the
    /// visualization state, the animation and the sink as they were.
    fn run_batch(
        &mut self,
        writes: &[(String, WidgetValue)],
        origin: Origin,
    ) -> DashboardResult<Frame> {
        let widgets = self.widgets.clone();
        let visualization = self.visualization.clone();
        let animator = self.animator.clone();
        let result = self.apply_changes(writes, origin);
        if let Err(err) = &result {
            warn!(%err, "change batch failed, restoring previous widgets");
            self.widgets = widgets;
            self.visualization = visualization;
            self.animator = animator;
        }
        result
    }

    fn apply_changes(
        &mut self,
        writes: &[(String, WidgetValue)],
        origin: Origin,
    ) -> DashboardResult<Frame> {
        let mut staged = Vec::with_capacity(writes.len());
        for (name, value) in writes {
            let widget = self
                .widget(name)
                .ok_or_else(|| DashboardError::UnknownWidget(name.clone()))?;
            staged.push((name, checked_value(widget, *value, OutOfBounds::Reject)?));
        }

        let mut queue = VecDeque::new();
        let mut touched = BTreeSet::new();
        for (name, value) in staged {
            let Some(widget) = self.widgets.iter_mut().find(|w| &w.name == name) else {
                return Err(DashboardError::UnknownWidget(name.clone()));
            };
            if widget.value == value {
                continue;
            }
            let old = std::mem::replace(&mut widget.value, value);
            if origin != Origin::User {
                touched.insert(name.clone());
            }
            queue.push_back(Change {
                widget: name.clone(),
                old,
                new: value,
                origin,
            });
        }
        if queue.is_empty() {
            trace!("batch holds only no-op writes");
            return Ok(Frame::default());
        }

        let mut sources = HashSet::new();
        let mut dirty = Vec::new();
        let mut reactions = 0usize;
        let mut animation = None;
        let animation_spec = self.visualization.animation();

        while let Some(change) = queue.pop_front() {
            sources.insert(change.widget.clone());

            if let Some(spec) = animation_spec {
                if change.widget == spec.toggle {
                    animation = self.toggle_animation(change.new).or(animation);
                }
            }

            let mut controls = Controls::new(&mut self.widgets, &sources);
            self.visualization.react(&change, &mut controls)?;
            let (pending, changed) = controls.finish();
            reactions += pending.len();
            if reactions > self.settings.max_reactions {
                return Err(DashboardError::ReactionOverflow {
                    limit: self.settings.max_reactions,
                });
            }
            touched.extend(changed);
            queue.extend(pending);

            for binding in &self.bindings {
                if binding.triggers.contains(&change.widget.as_str())
                    && !dirty.contains(&binding.recompute)
                {
                    dirty.push(binding.recompute);
                }
            }
        }

        let ordered: Vec<V::Recompute> = self
            .order
            .iter()
            .copied()
            .filter(|r| dirty.contains(r))
            .collect();
        let mut frame = self.run_recomputes(&ordered)?;
        frame.widgets = self
            .widgets
            .iter()
            .filter(|w| touched.contains(&w.name))
            .cloned()
            .collect();
        frame.animation = animation;
        debug!(
            recomputes = frame.recomputes,
            widgets = frame.widgets.len(),
            "applied change batch"
        );
        Ok(frame)
    }

    fn toggle_animation(&mut self, value: WidgetValue) -> Option<AnimationEvent> {
        match value {
            WidgetValue::Flag(true) => {
                let (handle, replaced) = self.animator.start();
                debug!(handle = handle.id(), "animation started");
                Some(AnimationEvent::Started {
                    handle,
                    interval_ms: self.settings.animation_interval_ms,
                    replaced,
                })
            }
            WidgetValue::Flag(false) => self.animator.stop().map(|handle| {
                debug!(handle = handle.id(), "animation stopped");
                AnimationEvent::Stopped { handle }
            }),
            _ => None,
        }
    }

    /// Runs `which` against one snapshot and commits the results only once
    /// every recompute has succeeded.
    fn run_recomputes(&mut self, which: &[V::Recompute]) -> DashboardResult<Frame> {
        let snapshot = self.snapshot();
        let mut updates = Vec::with_capacity(which.len());
        for recompute in which {
            trace!(?recompute, "running recompute");
            let update = self.visualization.recompute(*recompute, &snapshot)?;
            update.validate()?;
            updates.push(update);
        }

        let mut frame = Frame::default();
        for update in updates {
            let (entries, texts) = update.into_parts();
            for (key, data) in entries {
                self.sink.replace(&key, data.clone())?;
                frame.sinks.insert(key, data);
            }
            for (key, text) in texts {
                self.sink.set_text(&key, text.clone());
                frame.texts.insert(key, text);
            }
            frame.recomputes += 1;
            self.recomputes_run += 1;
        }
        Ok(frame)
    }
}

/// Object-safe view of a dashboard, used by the catalog and the wasm bridge.
pub trait DashboardSession {
    fn populate(&mut self) -> DashboardResult<Frame>;
    fn refresh(&mut self) -> DashboardResult<Frame>;
    fn set_value(&mut self, name: &str, value: WidgetValue) -> DashboardResult<Frame>;
    fn apply_batch(&mut self, writes: &[(String, WidgetValue)]) -> DashboardResult<Frame>;
    fn tick(&mut self, handle: AnimationHandle) -> DashboardResult<Frame>;
    fn widgets(&self) -> &[Widget];
    fn sink(&self) -> &DataSink;
    fn snapshot(&self) -> Snapshot;
    fn animation_handle(&self) -> Option<AnimationHandle>;
    fn settings(&self) -> &DashboardSettings;
}

impl<V: Visualization> DashboardSession for Dashboard<V> {
    fn populate(&mut self) -> DashboardResult<Frame> {
        Dashboard::populate(self)
    }

    fn refresh(&mut self) -> DashboardResult<Frame> {
        Dashboard::refresh(self)
    }

    fn set_value(&mut self, name: &str, value: WidgetValue) -> DashboardResult<Frame> {
        Dashboard::set_value(self, name, value)
    }

    fn apply_batch(&mut self, writes: &[(String, WidgetValue)]) -> DashboardResult<Frame> {
        Dashboard::apply_batch(self, writes)
    }

    fn tick(&mut self, handle: AnimationHandle) -> DashboardResult<Frame> {
        Dashboard::tick(self, handle)
    }

    fn widgets(&self) -> &[Widget] {
        Dashboard::widgets(self)
    }

    fn sink(&self) -> &DataSink {
        Dashboard::sink(self)
    }

    fn snapshot(&self) -> Snapshot {
        Dashboard::snapshot(self)
    }

    fn animation_handle(&self) -> Option<AnimationHandle> {
        Dashboard::animation_handle(self)
    }

    fn settings(&self) -> &DashboardSettings {
        Dashboard::settings(self)
    }
}
