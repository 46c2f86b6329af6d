use std::rc::Rc;

use ludo_core::{Canvas, Input, Scene, SceneContext, SceneData, SpriteUv};

use super::{Shared, TitleScene, START};

/// Hero speed in virtual pixels per second.
const HERO_SPEED: f64 = 60.0;
const HERO_SPRITE: &str = "hero";
const PLACEHOLDER_SIZE: i32 = 8;

pub struct GameScene {
    shared: Rc<Shared>,
    hero: Option<SpriteUv>,
    stage: u64,
    frames: u64,
    x: f64,
    y: f64,
}

impl GameScene {
    pub fn new(shared: Rc<Shared>) -> Self {
        let hero = match shared.assets.sprite_uv(HERO_SPRITE) {
            Ok(uv) => Some(uv),
            Err(err) => {
                log::debug!("GameScene: {err}; drawing placeholder");
                None
            }
        };
        let (width, height) = shared.screen;
        Self {
            shared,
            hero,
            stage: 1,
            frames: 0,
            x: f64::from(width) / 2.0,
            y: f64::from(height) / 2.0,
        }
    }

    pub fn stage(&self) -> u64 {
        self.stage
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn hero_size(&self) -> (i32, i32) {
        match self.hero {
            Some(uv) => (uv.w.abs(), uv.h.abs()),
            None => (PLACEHOLDER_SIZE, PLACEHOLDER_SIZE),
        }
    }
}

impl Scene for GameScene {
    fn on_enter(&mut self, _ctx: &mut SceneContext, data: Option<SceneData>) {
        self.frames = 0;
        self.stage = data
            .as_ref()
            .and_then(|data| data.get("stage"))
            .and_then(|stage| stage.as_u64())
            .unwrap_or(1);
        log::info!("Entering stage {}", self.stage);
    }

    fn update(&mut self, ctx: &mut SceneContext, input: &Input, dt: f64) {
        self.frames += 1;

        if input.triggered(START) {
            ctx.change_scene(Box::new(TitleScene::new(Rc::clone(&self.shared))), None);
            return;
        }

        let axis = |negative: &str, positive: &str| {
            let held = |name: &str| f64::from(u8::from(input.pressed(name)));
            held(positive) - held(negative)
        };
        let step = HERO_SPEED * dt;
        let (w, h) = self.hero_size();
        let (width, height) = self.shared.screen;
        let max_x = f64::from(width as i32 - w).max(0.0);
        let max_y = f64::from(height as i32 - h).max(0.0);
        self.x = (self.x + axis("LEFT", "RIGHT") * step).clamp(0.0, max_x);
        self.y = (self.y + axis("UP", "DOWN") * step).clamp(0.0, max_y);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.cls(0);
        canvas.text(50, 60, "Game", 11);
        canvas.text(4, 4, &format!("STAGE {}", self.stage), 7);

        let (x, y) = (self.x as i32, self.y as i32);
        match self.hero {
            Some(uv) => canvas.blt(x, y, uv),
            None => canvas.rect(x, y, PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, 8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludo_core::{AssetRegistry, DrawCommand, DrawList, Keymap, RawKey, SceneManager};
    use serde_json::json;

    const SPACE: RawKey = 32;
    const RIGHT: RawKey = 0x4000_004f;
    const LEFT: RawKey = 0x4000_0050;

    fn shared(with_hero: bool) -> Rc<Shared> {
        let mut assets = AssetRegistry::new();
        if with_hero {
            assets.register_sprite("hero", 0, 0, 0, 16, 16);
        }
        Rc::new(Shared {
            assets,
            screen: (160, 120),
        })
    }

    fn input() -> Input {
        let mut keymap = Keymap::new();
        keymap.insert(START.to_string(), vec![SPACE]);
        keymap.insert("LEFT".to_string(), vec![LEFT]);
        keymap.insert("RIGHT".to_string(), vec![RIGHT]);
        keymap.insert("UP".to_string(), vec![]);
        keymap.insert("DOWN".to_string(), vec![]);
        Input::new(keymap)
    }

    #[test]
    fn on_enter_reads_stage_from_data() {
        let mut scene = GameScene::new(shared(false));
        let mut ctx = SceneContext::default();
        let mut data = SceneData::new();
        data.insert("stage".to_string(), json!(3));
        scene.on_enter(&mut ctx, Some(data));
        assert_eq!(scene.stage(), 3);

        scene.on_enter(&mut ctx, None);
        assert_eq!(scene.stage(), 1);
    }

    #[test]
    fn held_direction_moves_hero_and_clamps_to_screen() {
        let mut scene = GameScene::new(shared(true));
        let mut ctx = SceneContext::default();
        let mut input = input();
        let (start_x, start_y) = scene.position();

        input.update(&|code: RawKey| code == RIGHT);
        scene.update(&mut ctx, &input, 0.5);
        assert_eq!(scene.position(), (start_x + 30.0, start_y));

        for _ in 0..20 {
            scene.update(&mut ctx, &input, 0.5);
        }
        assert_eq!(scene.position().0, 144.0);

        input.update(&|code: RawKey| code == LEFT || code == RIGHT);
        scene.update(&mut ctx, &input, 0.5);
        assert_eq!(scene.position().0, 144.0);
        assert!(!ctx.has_pending());
    }

    #[test]
    fn draw_uses_sprite_when_registered() {
        let mut canvas = DrawList::new();
        GameScene::new(shared(true)).draw(&mut canvas);
        assert_eq!(canvas.sprite_count(), 1);
        assert!(canvas.commands().contains(&DrawCommand::Text {
            x: 50,
            y: 60,
            text: "Game".to_string(),
            color: 11,
        }));

        canvas.clear();
        GameScene::new(shared(false)).draw(&mut canvas);
        assert_eq!(canvas.sprite_count(), 0);
        assert!(matches!(
            canvas.commands().last(),
            Some(DrawCommand::Rect { w: 8, h: 8, .. })
        ));
    }

    #[test]
    fn start_returns_to_title() {
        let mut manager = SceneManager::new();
        let mut input = input();
        manager
            .start(Box::new(TitleScene::new(shared(true))), None)
            .expect("start");

        let mut held = false;
        for expected in ["GameScene", "GameScene", "TitleScene", "TitleScene"] {
            held = !held;
            let down = held;
            input.update(&move |code: RawKey| down && code == SPACE);
            manager.update(&input, 1.0 / 30.0);
            assert_eq!(manager.active_scene_name(), Some(expected));
        }
        assert_eq!(manager.transition_count(), 3);
    }
}
