use std::rc::Rc;

use ludo_core::{Canvas, Input, Scene, SceneContext, SceneData};
use serde_json::json;

use super::{GameScene, Shared, START};

const BLINK_FRAMES: u64 = 20;

pub struct TitleScene {
    shared: Rc<Shared>,
    frames: u64,
}

impl TitleScene {
    pub fn new(shared: Rc<Shared>) -> Self {
        Self { shared, frames: 0 }
    }

    fn prompt_visible(&self) -> bool {
        (self.frames / BLINK_FRAMES) % 2 == 0
    }
}

impl Scene for TitleScene {
    fn on_enter(&mut self, _ctx: &mut SceneContext, _data: Option<SceneData>) {
        self.frames = 0;
    }

    fn update(&mut self, ctx: &mut SceneContext, input: &Input, _dt: f64) {
        self.frames += 1;
        if input.triggered(START) {
            let mut data = SceneData::new();
            data.insert("stage".to_string(), json!(1));
            ctx.change_scene(Box::new(GameScene::new(Rc::clone(&self.shared))), Some(data));
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.cls(0);
        canvas.text(40, 50, "Ludorium", 7);
        if self.prompt_visible() {
            canvas.text(20, 80, "Press SPACE to start", 7);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludo_core::{AssetRegistry, DrawCommand, DrawList, Keymap, RawKey, SceneManager};

    const SPACE: RawKey = 32;

    fn shared() -> Rc<Shared> {
        Rc::new(Shared {
            assets: AssetRegistry::new(),
            screen: (160, 120),
        })
    }

    fn input() -> Input {
        let mut keymap = Keymap::new();
        keymap.insert(START.to_string(), vec![SPACE]);
        Input::new(keymap)
    }

    #[test]
    fn start_trigger_switches_to_game() {
        let mut manager = SceneManager::new();
        let mut input = input();
        manager
            .start(Box::new(TitleScene::new(shared())), None)
            .expect("start");

        input.update(&|_code: RawKey| false);
        manager.update(&input, 1.0 / 30.0);
        assert_eq!(manager.active_scene_name(), Some("TitleScene"));

        input.update(&|code: RawKey| code == SPACE);
        manager.update(&input, 1.0 / 30.0);
        assert_eq!(manager.active_scene_name(), Some("GameScene"));
    }

    #[test]
    fn holding_start_does_not_retrigger() {
        let mut manager = SceneManager::new();
        let mut input = input();
        manager
            .start(Box::new(TitleScene::new(shared())), None)
            .expect("start");

        input.update(&|code: RawKey| code == SPACE);
        manager.update(&input, 1.0 / 30.0);
        assert_eq!(manager.active_scene_name(), Some("GameScene"));

        // Still held: the game scene must not bounce back to the title.
        input.update(&|code: RawKey| code == SPACE);
        manager.update(&input, 1.0 / 30.0);
        assert_eq!(manager.active_scene_name(), Some("GameScene"));
    }

    #[test]
    fn draw_shows_title_and_blinking_prompt() {
        let mut scene = TitleScene::new(shared());
        let mut canvas = DrawList::new();
        scene.draw(&mut canvas);
        assert_eq!(canvas.commands()[0], DrawCommand::Cls { color: 0 });
        assert_eq!(canvas.len(), 3);

        scene.frames = BLINK_FRAMES;
        canvas.clear();
        scene.draw(&mut canvas);
        assert_eq!(canvas.len(), 2);
    }
}
