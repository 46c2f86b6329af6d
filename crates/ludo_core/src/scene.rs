//! Single-active-scene lifecycle.
//!
//! A scene is constructed by application code and handed to the
//! `SceneManager`, which owns it while it is active:
//!
//!   1. `on_enter(data)` -- once per activation
//!   2. `update` / `draw` -- every frame while active
//!   3. `on_exit()` -- once, when replaced; the scene is dropped afterwards
//!
//! Scenes request transitions through the `SceneContext` they receive in
//! `on_enter` and `update`. Requests are transition records applied in FIFO
//! order before the manager call that produced them returns, so a change
//! never straddles a frame boundary. The outgoing scene's `on_exit` always
//! runs before the incoming scene's `on_enter`.

use std::collections::VecDeque;
use std::fmt;

use crate::canvas::Canvas;
use crate::input::Input;

/// Opaque payload handed from the requester to the incoming scene's
/// `on_enter`.
pub type SceneData = serde_json::Map<String, serde_json::Value>;

pub trait Scene {
    /// Short name used in logs and the debug overlay.
    fn name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    fn on_enter(&mut self, _ctx: &mut SceneContext, _data: Option<SceneData>) {}

    fn on_exit(&mut self) {}

    /// `dt` is the elapsed seconds supplied by the host loop.
    fn update(&mut self, ctx: &mut SceneContext, input: &Input, dt: f64);

    fn draw(&self, canvas: &mut dyn Canvas);
}

/// A pending change: the scene to activate and what to hand it.
pub struct Transition {
    pub incoming: Box<dyn Scene>,
    pub data: Option<SceneData>,
}

/// A scene's handle to the manager that is currently driving it.
#[derive(Default)]
pub struct SceneContext {
    requests: VecDeque<Transition>,
}

impl SceneContext {
    pub fn change_scene(&mut self, target: Box<dyn Scene>, data: Option<SceneData>) {
        self.requests.push_back(Transition {
            incoming: target,
            data,
        });
    }

    pub fn has_pending(&self) -> bool {
        !self.requests.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// `start` was called while a scene was already active or after a
    /// previous `start`.
    AlreadyStarted,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStarted => f.write_str("scene manager was already started"),
        }
    }
}

impl std::error::Error for SceneError {}

#[derive(Default)]
pub struct SceneManager {
    active: Option<Box<dyn Scene>>,
    started: bool,
    transition_count: u64,
}

impl SceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activates the first scene. Fails without side effects if a scene is
    /// already active or `start` already ran.
    pub fn start(
        &mut self,
        initial: Box<dyn Scene>,
        data: Option<SceneData>,
    ) -> Result<(), SceneError> {
        if self.started || self.active.is_some() {
            log::error!(
                "SceneManager::start({}) rejected: already started",
                initial.name()
            );
            return Err(SceneError::AlreadyStarted);
        }
        self.started = true;
        log::info!("Starting with scene {}", initial.name());
        self.activate(initial, data);
        Ok(())
    }

    /// Exits the active scene (if any), then enters `next` and makes it
    /// active.
    pub fn change(&mut self, next: Box<dyn Scene>, data: Option<SceneData>) {
        match self.active.take() {
            Some(mut outgoing) => {
                log::info!("Scene change: {} -> {}", outgoing.name(), next.name());
                outgoing.on_exit();
            }
            None => log::info!("Scene change: (none) -> {}", next.name()),
        }
        self.activate(next, data);
    }

    pub fn update(&mut self, input: &Input, dt: f64) {
        let Some(scene) = self.active.as_mut() else {
            return;
        };
        let mut ctx = SceneContext::default();
        scene.update(&mut ctx, input, dt);
        self.apply_requests(ctx);
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(scene) = &self.active {
            scene.draw(canvas);
        }
    }

    pub fn active_scene_name(&self) -> Option<&'static str> {
        self.active.as_ref().map(|scene| scene.name())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Number of activations so far, including the initial one.
    pub fn transition_count(&self) -> u64 {
        self.transition_count
    }

    fn activate(&mut self, mut scene: Box<dyn Scene>, data: Option<SceneData>) {
        let mut ctx = SceneContext::default();
        scene.on_enter(&mut ctx, data);
        self.active = Some(scene);
        self.transition_count += 1;
        self.apply_requests(ctx);
    }

    fn apply_requests(&mut self, mut ctx: SceneContext) {
        while let Some(Transition { incoming, data }) = ctx.requests.pop_front() {
            self.change(incoming, data);
        }
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawList;
    use crate::input::{Input, Keymap};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// What a recording scene does when it gets a lifecycle call.
    enum Behavior {
        Idle,
        ChangeOnUpdate(Option<Box<RecordingScene>>),
        ChangeOnEnter(Option<Box<RecordingScene>>),
    }

    struct RecordingScene {
        label: &'static str,
        log: Log,
        behavior: Behavior,
    }

    impl RecordingScene {
        fn new(label: &'static str, log: &Log) -> Self {
            Self {
                label,
                log: Rc::clone(log),
                behavior: Behavior::Idle,
            }
        }

        fn with(mut self, behavior: Behavior) -> Self {
            self.behavior = behavior;
            self
        }

        fn record(&self, event: &str) {
            self.log.borrow_mut().push(format!("{}.{}", self.label, event));
        }
    }

    impl Scene for RecordingScene {
        fn name(&self) -> &'static str {
            self.label
        }

        fn on_enter(&mut self, ctx: &mut SceneContext, data: Option<SceneData>) {
            match data.as_ref().and_then(|d| d.get("tag")) {
                Some(tag) => self.record(&format!("enter({})", tag.as_str().unwrap_or("?"))),
                None => self.record("enter"),
            }
            if let Behavior::ChangeOnEnter(next) = &mut self.behavior {
                if let Some(next) = next.take() {
                    ctx.change_scene(next, None);
                }
            }
        }

        fn on_exit(&mut self) {
            self.record("exit");
        }

        fn update(&mut self, ctx: &mut SceneContext, _input: &Input, _dt: f64) {
            self.record("update");
            if let Behavior::ChangeOnUpdate(next) = &mut self.behavior {
                if let Some(next) = next.take() {
                    ctx.change_scene(next, None);
                    self.record("requested");
                }
            }
        }

        fn draw(&self, canvas: &mut dyn Canvas) {
            self.record("draw");
            canvas.text(0, 0, self.label, 7);
        }
    }

    fn no_input() -> Input {
        Input::new(Keymap::new())
    }

    fn events(log: &Log) -> Vec<String> {
        log.borrow().clone()
    }

    #[test]
    fn start_then_change_orders_lifecycle_calls() {
        let log = Log::default();
        let input = no_input();
        let mut manager = SceneManager::new();
        let mut canvas = DrawList::new();

        manager
            .start(Box::new(RecordingScene::new("s1", &log)), None)
            .expect("first start");
        manager.update(&input, 1.0 / 30.0);
        manager.change(Box::new(RecordingScene::new("s2", &log)), None);
        manager.update(&input, 1.0 / 30.0);
        manager.draw(&mut canvas);

        assert_eq!(
            events(&log),
            vec!["s1.enter", "s1.update", "s1.exit", "s2.enter", "s2.update", "s2.draw"]
        );
        assert_eq!(manager.active_scene_name(), Some("s2"));
        assert_eq!(manager.transition_count(), 2);
    }

    #[test]
    fn start_twice_is_rejected_without_side_effects() {
        let log = Log::default();
        let mut manager = SceneManager::new();
        manager
            .start(Box::new(RecordingScene::new("s1", &log)), None)
            .expect("first start");
        let err = manager
            .start(Box::new(RecordingScene::new("s2", &log)), None)
            .expect_err("second start must fail");

        assert_eq!(err, SceneError::AlreadyStarted);
        assert_eq!(manager.active_scene_name(), Some("s1"));
        assert_eq!(events(&log), vec!["s1.enter"]);
    }

    #[test]
    fn change_without_start_only_enters() {
        let log = Log::default();
        let mut manager = SceneManager::new();
        manager.change(Box::new(RecordingScene::new("s1", &log)), None);
        assert_eq!(events(&log), vec!["s1.enter"]);
        assert_eq!(manager.active_scene_name(), Some("s1"));
        assert!(!manager.is_started());
    }

    #[test]
    fn update_and_draw_without_scene_are_noops() {
        let manager_input = no_input();
        let mut manager = SceneManager::new();
        let mut canvas = DrawList::new();
        manager.update(&manager_input, 0.016);
        manager.draw(&mut canvas);
        assert!(canvas.is_empty());
        assert_eq!(manager.active_scene_name(), None);
    }

    #[test]
    fn data_is_handed_to_incoming_scene() {
        let log = Log::default();
        let mut manager = SceneManager::new();
        let mut data = SceneData::new();
        data.insert("tag".to_string(), serde_json::json!("hello"));
        manager
            .start(Box::new(RecordingScene::new("s1", &log)), Some(data))
            .expect("start");
        assert_eq!(events(&log), vec!["s1.enter(hello)"]);
    }

    #[test]
    fn change_requested_in_update_completes_before_update_returns() {
        let log = Log::default();
        let input = no_input();
        let mut manager = SceneManager::new();
        let next = RecordingScene::new("s2", &log);
        let first = RecordingScene::new("s1", &log)
            .with(Behavior::ChangeOnUpdate(Some(Box::new(next))));

        manager.start(Box::new(first), None).expect("start");
        manager.update(&input, 0.016);

        assert_eq!(
            events(&log),
            vec!["s1.enter", "s1.update", "s1.requested", "s1.exit", "s2.enter"]
        );
        assert_eq!(manager.active_scene_name(), Some("s2"));
    }

    #[test]
    fn change_requested_in_on_enter_is_applied_before_start_returns() {
        let log = Log::default();
        let mut manager = SceneManager::new();
        let target = RecordingScene::new("menu", &log);
        let splash = RecordingScene::new("splash", &log)
            .with(Behavior::ChangeOnEnter(Some(Box::new(target))));

        manager.start(Box::new(splash), None).expect("start");

        assert_eq!(events(&log), vec!["splash.enter", "splash.exit", "menu.enter"]);
        assert_eq!(manager.active_scene_name(), Some("menu"));
        assert_eq!(manager.transition_count(), 2);
    }

    #[test]
    fn retired_scene_receives_no_further_calls() {
        let log = Log::default();
        let input = no_input();
        let mut manager = SceneManager::new();
        let mut canvas = DrawList::new();
        manager
            .start(Box::new(RecordingScene::new("s1", &log)), None)
            .expect("start");
        manager.change(Box::new(RecordingScene::new("s2", &log)), None);
        log.borrow_mut().clear();

        manager.update(&input, 0.016);
        manager.draw(&mut canvas);
        assert!(events(&log).iter().all(|e| e.starts_with("s2.")));
    }

    #[test]
    fn context_tracks_pending_requests() {
        let log = Log::default();
        let mut ctx = SceneContext::default();
        assert!(!ctx.has_pending());
        ctx.change_scene(Box::new(RecordingScene::new("s1", &log)), None);
        assert!(ctx.has_pending());
    }

    #[test]
    fn short_type_name_strips_paths_and_generics() {
        assert_eq!(short_type_name("ludo_game::scenes::TitleScene"), "TitleScene");
        assert_eq!(short_type_name("a::Wrapper<b::Inner>"), "Wrapper");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn scene_error_displays_reason() {
        assert!(SceneError::AlreadyStarted.to_string().contains("already started"));
    }
}
