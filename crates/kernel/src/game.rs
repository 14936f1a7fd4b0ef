use crate::config::{AnimationConfig, GameConfig};
use crate::scheduler::{CancelToken, FrameScheduler};
use aviator_input::{InputEvent, ViewState};
use aviator_render::Renderer;
use aviator_scene::{
    LightCommand, Lighting, PerspectiveCamera, SceneGraph, SceneObjects, Viewport, create_scene,
    populate,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("scene setup failed: {0}")]
    Setup(&'static str),
}

/// Result of driving the loop until its scheduler or a cancel stopped it.
#[derive(Debug)]
pub struct RunOutcome<O> {
    pub frames: u64,
    pub last: Option<O>,
}

/// The loop controller and all the state it animates.
///
/// Input handlers write `ViewState`; `frame` reads it once per tick.
#[derive(Debug)]
pub struct Game {
    animation: AnimationConfig,
    view: ViewState,
    viewport: Viewport,
    camera: PerspectiveCamera,
    scene: SceneGraph,
    objects: SceneObjects,
    frames: u64,
}

impl Game {
    /// Build camera, scene, lights and objects for a viewport.
    pub fn new(viewport: Viewport, config: &GameConfig) -> Result<Self, GameError> {
        let mut scene = create_scene();
        let root = scene.root();
        let mut objects =
            populate(&mut scene, root, config.sky_seed).ok_or(GameError::Setup("populate"))?;
        objects.airplane = objects
            .airplane
            .with_propeller_step(config.animation.propeller_step);
        if let Some(lighting) = scene.lighting.as_mut() {
            lighting.apply(LightCommand::SetShadowMapSize(config.shadow_map_size));
            for command in config.lights.commands() {
                lighting.apply(command);
            }
        }

        tracing::info!(
            width = viewport.width,
            height = viewport.height,
            "game initialized"
        );

        Ok(Self {
            animation: config.animation,
            view: ViewState::default(),
            viewport,
            camera: PerspectiveCamera::for_viewport(viewport),
            scene,
            objects,
            frames: 0,
        })
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn objects(&self) -> &SceneObjects {
        &self.objects
    }

    /// Ticks run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn lighting(&self) -> Option<&Lighting> {
        self.scene.lighting.as_ref()
    }

    /// Route a light edit through the lighting setters.
    pub fn apply_light(&mut self, command: LightCommand) {
        if let Some(lighting) = self.scene.lighting.as_mut() {
            lighting.apply(command);
        }
    }

    pub fn handle<R: Renderer>(&mut self, event: InputEvent, renderer: &mut R) {
        match event {
            InputEvent::PointerMoved { x, y } => self.pointer_moved(x, y),
            InputEvent::Resized { width, height } => self.resize(width, height, renderer),
        }
    }

    /// Record the cursor position in device units for the next frame.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.view
            .pointer_moved(x, y, self.viewport.width, self.viewport.height);
    }

    /// Resize the renderer and refit the camera to the new viewport.
    pub fn resize<R: Renderer>(&mut self, width: u32, height: u32, renderer: &mut R) {
        self.viewport = Viewport::new(width, height);
        renderer.resize(width, height);
        self.camera.aspect = self.viewport.aspect();
        self.camera.update_projection_matrix();
        tracing::debug!(width, height, aspect = self.camera.aspect, "resized");
    }

    /// Advance every animated transform by one tick.
    pub fn update(&mut self) {
        let SceneObjects { airplane, sea, sky } = self.objects;
        airplane.update(&mut self.scene, self.view.pointer());
        sea.rotate(&mut self.scene, self.animation.sea_step);
        sky.rotate(&mut self.scene, self.animation.sky_step);
        self.frames += 1;
    }

    /// One full tick: update, draw, then ask for the next frame.
    pub fn frame<R: Renderer, S: FrameScheduler>(
        &mut self,
        renderer: &mut R,
        scheduler: &mut S,
    ) -> R::Output {
        self.update();
        let output = renderer.render(&self.scene, &self.camera);
        scheduler.request_frame();
        output
    }

    /// Pull frames from `scheduler` until it runs dry or `cancel` fires.
    pub fn run<R: Renderer, S: FrameScheduler>(
        &mut self,
        renderer: &mut R,
        scheduler: &mut S,
        cancel: &CancelToken,
    ) -> RunOutcome<R::Output> {
        let mut outcome = RunOutcome {
            frames: 0,
            last: None,
        };
        while !cancel.is_cancelled() && scheduler.next_frame() {
            outcome.last = Some(self.frame(renderer, scheduler));
            outcome.frames += 1;
        }
        tracing::debug!(frames = outcome.frames, "loop stopped");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::FixedTicks;
    use aviator_common::{Axis, Color};
    use aviator_render::DebugTextRenderer;
    use glam::{Vec2, Vec3};
    use std::f32::consts::TAU;

    /// Counts calls; the loop under test never inspects output.
    #[derive(Default)]
    struct CountingRenderer {
        renders: u64,
        size: Option<(u32, u32)>,
    }

    impl Renderer for CountingRenderer {
        type Output = u64;

        fn render(&mut self, _scene: &SceneGraph, _camera: &PerspectiveCamera) -> u64 {
            self.renders += 1;
            self.renders
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.size = Some((width, height));
        }
    }

    fn game() -> Game {
        Game::new(Viewport::new(800, 600), &GameConfig::default()).unwrap()
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn n_ticks_apply_fixed_increments() {
        let mut game = game();
        let mut renderer = CountingRenderer::default();
        let mut scheduler = FixedTicks::new(100);
        let outcome = game.run(&mut renderer, &mut scheduler, &CancelToken::new());

        assert_eq!(outcome.frames, 100);
        assert_eq!(outcome.last, Some(100));
        assert_eq!(renderer.renders, 100);
        assert_eq!(game.frames(), 100);
        let objects = *game.objects();
        assert!(close(objects.sea.rotation(game.scene()), 100.0 * 0.005));
        assert!(close(objects.sky.rotation(game.scene()), 100.0 * 0.01));
    }

    #[test]
    fn long_runs_wrap_rotation() {
        let mut game = game();
        let mut renderer = CountingRenderer::default();
        game.run(&mut renderer, &mut FixedTicks::new(1000), &CancelToken::new());
        let sky = game.objects().sky.rotation(game.scene());
        // 1000 * 0.01 = 10 rad, one full turn removed
        assert!((0.0..TAU).contains(&sky));
        assert!((sky - (10.0 - TAU)).abs() < 1e-2);
    }

    #[test]
    fn every_frame_requests_the_next() {
        let mut game = game();
        let mut renderer = CountingRenderer::default();
        let mut scheduler = FixedTicks::new(5);
        game.run(&mut renderer, &mut scheduler, &CancelToken::new());
        assert_eq!(scheduler.requests(), 5);
    }

    #[test]
    fn cancelled_loop_runs_no_frames() {
        let mut game = game();
        let mut renderer = CountingRenderer::default();
        let cancel = CancelToken::new();
        cancel.cancel();
        let outcome = game.run(&mut renderer, &mut FixedTicks::new(10), &cancel);
        assert_eq!(outcome.frames, 0);
        assert!(outcome.last.is_none());
    }

    #[test]
    fn pointer_drives_airplane() {
        let mut game = game();
        let mut renderer = CountingRenderer::default();
        // top-left corner of an 800x600 viewport
        game.handle(InputEvent::PointerMoved { x: 0.0, y: 0.0 }, &mut renderer);
        assert_eq!(game.view_state().pointer(), Vec2::new(-1.0, 1.0));
        game.update();
        let pos = game.objects().airplane.position(game.scene());
        assert_eq!(pos, Vec3::new(-100.0, 175.0, 0.0));
    }

    #[test]
    fn airplane_position_is_stable_under_constant_pointer() {
        let mut game = game();
        game.pointer_moved(600.0, 450.0);
        game.update();
        let first = game.objects().airplane.position(game.scene());
        game.update();
        assert_eq!(game.objects().airplane.position(game.scene()), first);
        let spin = game.objects().airplane.propeller_rotation(game.scene());
        assert!(close(spin, 1.8));
    }

    #[test]
    fn resize_sets_exact_aspect() {
        let mut game = game();
        let mut renderer = CountingRenderer::default();
        game.handle(
            InputEvent::Resized {
                width: 1920,
                height: 1080,
            },
            &mut renderer,
        );
        assert_eq!(game.camera().aspect, 1920.0 / 1080.0);
        assert_eq!(game.viewport(), Viewport::new(1920, 1080));
        assert_eq!(renderer.size, Some((1920, 1080)));
    }

    #[test]
    fn resize_rescales_pointer_mapping() {
        let mut game = game();
        let mut renderer = CountingRenderer::default();
        game.resize(400, 400, &mut renderer);
        game.pointer_moved(400.0, 0.0);
        assert_eq!(game.view_state().pointer(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn light_commands_reach_the_scene() {
        let mut game = game();
        game.apply_light(LightCommand::SetShadowPosition(Axis::X, -50.0));
        assert_eq!(game.lighting().unwrap().shadow().position().x, -50.0);
    }

    #[test]
    fn config_overrides_apply() {
        let mut config = GameConfig::default();
        config.animation.sea_step = 0.1;
        config.shadow_map_size = 1024;
        let mut game = Game::new(Viewport::new(800, 600), &config).unwrap();
        game.update();
        assert!(close(game.objects().sea.rotation(game.scene()), 0.1));
        assert_eq!(game.lighting().unwrap().shadow().shadow.map_size, 1024);
    }

    #[test]
    fn configured_light_colors_are_applied() {
        let mut config = GameConfig::default();
        config.lights.shadow_color = Color(0xffeedd);
        config.lights.hemisphere_color = Color(0x112233);
        let game = Game::new(Viewport::new(800, 600), &config).unwrap();
        let lighting = game.lighting().unwrap();
        assert_eq!(lighting.shadow().color(), Color(0xffeedd));
        assert_eq!(lighting.hemisphere().sky, Color(0x112233));
    }

    /// Cancels the shared token once it has drawn `at` frames.
    struct CancelAfter {
        at: u64,
        renders: u64,
        cancel: CancelToken,
    }

    impl Renderer for CancelAfter {
        type Output = u64;

        fn render(&mut self, _scene: &SceneGraph, _camera: &PerspectiveCamera) -> u64 {
            self.renders += 1;
            if self.renders == self.at {
                self.cancel.cancel();
            }
            self.renders
        }
    }

    #[test]
    fn cancel_during_run_stops_before_next_frame() {
        let mut game = game();
        let cancel = CancelToken::new();
        let mut renderer = CancelAfter {
            at: 3,
            renders: 0,
            cancel: cancel.clone(),
        };
        let mut scheduler = FixedTicks::new(10);
        let outcome = game.run(&mut renderer, &mut scheduler, &cancel);
        assert_eq!(outcome.frames, 3);
        assert_eq!(outcome.last, Some(3));
        assert_eq!(game.frames(), 3);
        assert!(close(game.objects().sea.rotation(game.scene()), 3.0 * 0.005));
    }

    #[test]
    fn text_renderer_sees_animated_scene() {
        let mut game = game();
        let mut renderer = DebugTextRenderer::new(800, 600);
        let outcome = game.run(&mut renderer, &mut FixedTicks::new(2), &CancelToken::new());
        let text = outcome.last.unwrap();
        assert!(text.contains("=== Frame 2 (800x600) ==="));
        assert!(text.contains("airplane [group]"));
        assert!(text.contains("sea [mesh #68c3c0]"));
    }
}
