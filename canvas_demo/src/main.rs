//! Headless demo: a menu scene and a level scene with a bouncing box
//!
//! Usage: `canvas_demo [config.toml|config.ron]`

use canvas_engine::foundation::logging;
use canvas_engine::prelude::*;
use thiserror::Error;

const MENU_FRAMES: u32 = 30;
const LEVEL_FRAMES: u32 = 90;
const BOX_SIZE: f32 = 16.0;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Config error: {0}")]
    Config(#[from] canvas_engine::config::ConfigError),

    #[error("Stage error: {0}")]
    Stage(#[from] StageError),

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),
}

/// Score keeper built as a hooks component
fn score_board(hooks: &HooksSystem, start: &f64) -> Result<Value, ComponentError> {
    let points = hooks.use_field("points", *start)?;
    let add_point = NativeFunction::new(move |_| {
        let next = points.get().as_number().unwrap_or(0.0) + 1.0;
        points.set(next);
        Ok(Value::from(next))
    });
    Ok(Value::Object(
        Object::new()
            .with("label", "bounces")
            .with("add_point", add_point),
    ))
}

/// Box moving across the canvas, scoring a point on every wall hit
struct BouncingBox {
    position: (f32, f32),
    velocity: (f32, f32),
    bounds: (f32, f32),
    score: ComponentApi,
}

impl BouncingBox {
    fn new(canvas: &Canvas, score: ComponentApi) -> Self {
        Self {
            position: (canvas.width_f32() / 2.0, canvas.height_f32() / 3.0),
            velocity: (180.0, 140.0),
            bounds: (canvas.width_f32() - BOX_SIZE, canvas.height_f32() - BOX_SIZE),
            score,
        }
    }

    fn bounce(&self) -> Result<(), SceneError> {
        self.score
            .call("add_point", &[])
            .map(|_| ())
            .map_err(|e| SceneError::entity(e.to_string()))
    }
}

impl SceneEntity for BouncingBox {
    fn update(&mut self, delta: f32) -> Result<(), SceneError> {
        self.position.0 += self.velocity.0 * delta;
        self.position.1 += self.velocity.1 * delta;

        if self.position.0 <= 0.0 || self.position.0 >= self.bounds.0 {
            self.velocity.0 = -self.velocity.0;
            self.position.0 = self.position.0.clamp(0.0, self.bounds.0);
            self.bounce()?;
        }
        if self.position.1 <= 0.0 || self.position.1 >= self.bounds.1 {
            self.velocity.1 = -self.velocity.1;
            self.position.1 = self.position.1.clamp(0.0, self.bounds.1);
            self.bounce()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame<'_>) -> Result<(), SceneError> {
        frame.context.set_fill_style("orange");
        frame
            .context
            .fill_rect(self.position.0, self.position.1, BOX_SIZE, BOX_SIZE);
        Ok(())
    }
}

/// Static title card
struct Title;

impl SceneEntity for Title {
    fn draw(&self, frame: &mut Frame<'_>) -> Result<(), SceneError> {
        let (w, h) = (frame.canvas.width_f32(), frame.canvas.height_f32());
        frame.context.set_stroke_style("white");
        frame.context.stroke_rect(w * 0.25, h * 0.4, w * 0.5, h * 0.2);
        Ok(())
    }
}

struct DemoApp {
    config: ApplicationConfig,
    hooks: HooksSystem,
    world: World,
}

impl DemoApp {
    fn new(config: ApplicationConfig) -> Self {
        Self {
            config,
            hooks: HooksSystem::new(),
            world: World::new(),
        }
    }

    fn run(&mut self) -> Result<(), DemoError> {
        let mut stage = Stage::new(&self.config)?;
        let canvas = *stage.canvas();

        let player = self.world.create_named_entity("player");
        let score = instantiate_named(&self.hooks, "ScoreBoard", score_board, &0.0, player)?;

        let menu = Scene::with_clear_color("").into_ref();
        menu.borrow_mut().add_child(EntityRef::new(Title));

        let level = Scene::with_clear_color("").into_ref();
        level
            .borrow_mut()
            .add_child(EntityRef::new(BouncingBox::new(&canvas, score.clone())));

        stage.root().borrow_mut().add_child(level.clone());
        stage.root().borrow_mut().present(menu);

        let step = self.config.engine.target_frame_time().unwrap_or(1.0 / 60.0);
        let mut buffer = CommandBuffer::new();

        for _ in 0..MENU_FRAMES {
            stage.frame_with_delta(step, &mut buffer)?;
        }
        log::info!("Menu recorded {} draw commands", buffer.take_commands().len());

        stage.root().borrow_mut().present(level);
        for _ in 0..LEVEL_FRAMES {
            stage.frame_with_delta(step, &mut buffer)?;
        }
        log::info!(
            "Level recorded {} draw commands ({} fills)",
            buffer.len(),
            buffer.fill_count()
        );
        log::info!(
            "Simulated {:.2}s over {} frames, {} = {:?}",
            stage.timer().total_time(),
            stage.timer().frame_count(),
            score.get("label").as_str().unwrap_or("score"),
            score.get("points")
        );

        Ok(())
    }
}

fn load_config() -> Result<ApplicationConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(ApplicationConfig::load_from_file(path)?),
        None => Ok(ApplicationConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    logging::init_from_config(&config.engine);

    log::info!("Starting canvas demo");

    let mut app = DemoApp::new(config);
    match app.run() {
        Ok(()) => {
            log::info!("Canvas demo completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Canvas demo failed: {:?}", e);
            Err(e.into())
        }
    }
}
