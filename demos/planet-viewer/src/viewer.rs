//! Planet Viewer: one planet, a starfield, and an info panel.
//!
//! The host searches by name (`query`) or selects by catalog index
//! (custom event). Clicking the planet gives it an extra spin.

use glam::{Vec2, Vec3};
use globe_engine::*;

use crate::catalog::{PlanetCatalog, PlanetRecord};
use crate::panel::InfoPanel;
use crate::settings::SceneSettings;

// ── Custom event kinds from the host ────────────────────────────────

/// Select a planet by catalog index (`a` = index).
pub const CUSTOM_SELECT_PLANET: u32 = 1;

// ── Viewer event kinds to the host ──────────────────────────────────

/// Current planet: `a` = catalog index (-1 before any selection), `b` = size, `c` = moons.
pub const EVENT_PLANET: f32 = 1.0;

// ── Scene ───────────────────────────────────────────────────────────

const PLANET_TAG: &str = "planet";
const STARS_TAG: &str = "stars";
const PLANET_SHININESS: f32 = 20.0;
const PLANET_SPECULAR: u32 = 0x111111;
const DEFAULT_AMBIENT: u32 = 0x333333;

const NOT_FOUND_NOTICE: &str = "Planet not found! Try 'Mars' or 'Jupiter'.";

pub struct PlanetViewer {
    catalog: PlanetCatalog,
    settings: SceneSettings,
    tweens: TweenState,
    planet_id: Option<EntityId>,
    stars_id: Option<EntityId>,
    /// Catalog index of the planet on display.
    current: Option<usize>,
    panel: Option<InfoPanel>,
    /// Where the active press started, in CSS pixels.
    press: Option<Vec2>,
    dragged: bool,
}

impl PlanetViewer {
    pub fn new() -> Self {
        let catalog = PlanetCatalog::load().unwrap_or_else(|err| {
            log::error!("planet table failed to load: {err}");
            PlanetCatalog::default()
        });
        Self::with_catalog(catalog)
    }

    pub fn with_catalog(catalog: PlanetCatalog) -> Self {
        Self {
            catalog,
            settings: SceneSettings::default(),
            tweens: TweenState::new(),
            planet_id: None,
            stars_id: None,
            current: None,
            panel: None,
            press: None,
            dragged: false,
        }
    }

    pub fn catalog(&self) -> &PlanetCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn panel(&self) -> Option<&InfoPanel> {
        self.panel.as_ref()
    }

    pub fn planet_id(&self) -> Option<EntityId> {
        self.planet_id
    }

    /// Switch the displayed planet by name. Unknown names leave everything as it was
    /// and queue a notice for the user.
    pub fn update_planet(&mut self, ctx: &mut EngineContext, typed_name: &str) -> bool {
        let (index, record) = match self.catalog.find(typed_name) {
            Ok((index, record)) => (index, record.clone()),
            Err(err) => {
                log::warn!("search failed: {err}");
                ctx.notify(NOT_FOUND_NOTICE);
                return false;
            }
        };
        self.show(ctx, index, &record, typed_name);
        true
    }

    /// Switch by catalog index. Out-of-range indices are ignored.
    pub fn select_index(&mut self, ctx: &mut EngineContext, index: usize) -> bool {
        let record = match self.catalog.get(index) {
            Some(record) => record.clone(),
            None => {
                log::warn!("no planet at index {index}");
                return false;
            }
        };
        self.show(ctx, index, &record, &record.name);
        true
    }

    fn show(&mut self, ctx: &mut EngineContext, index: usize, record: &PlanetRecord, typed_name: &str) {
        let planet_id = match self.planet_id {
            Some(id) => id,
            None => return,
        };
        let texture = if self.settings.textures && record.texture.is_some() {
            Some(index as u32)
        } else {
            None
        };
        let transition = self.settings.transition_secs;

        self.tweens.remove_entity(planet_id);
        if let Some(planet) = ctx.scene.get_mut(planet_id) {
            let target_scale = Vec3::ONE * record.size;
            match &mut planet.mesh {
                Some(mesh) if transition > 0.0 => {
                    let from_color = mesh.material.color;
                    mesh.material.texture = texture;
                    self.tweens.add(
                        planet_id,
                        Tween::scale(planet.scale, target_scale, transition, Easing::CubicOut),
                    );
                    self.tweens.add(
                        planet_id,
                        Tween::color(from_color, record.color, transition, Easing::CubicOut),
                    );
                }
                Some(mesh) => {
                    mesh.material.color = record.color;
                    mesh.material.texture = texture;
                    planet.scale = target_scale;
                }
                None => planet.scale = target_scale,
            }
        }

        self.current = Some(index);
        let panel = InfoPanel::new(typed_name, index, record);
        ctx.publish_panel(&panel);
        log::info!("showing {} (size {}, {} moons)", panel.name, record.size, record.moons);
        self.panel = Some(panel);
    }

    fn handle_click(&mut self, ctx: &mut EngineContext, at: Vec2) {
        let planet_id = match self.planet_id {
            Some(id) => id,
            None => return,
        };
        let ndc = ctx.camera.screen_to_ndc(at);
        let hits = Raycaster::from_camera(&ctx.camera, ndc).intersect_entities(&ctx.scene, &[planet_id]);
        if hits.is_empty() {
            return;
        }
        if let Some(planet) = ctx.scene.get_mut(planet_id) {
            planet.rotation.y += self.settings.click_spin;
        }
        let name = self.panel.as_ref().map_or("", |p| p.name.as_str());
        ctx.notify(format!("You clicked on {name}!"));
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => {
                    self.press = Some(Vec2::new(x, y));
                    self.dragged = false;
                }
                InputEvent::PointerMove { x, y } => {
                    if let Some(start) = self.press {
                        if start.distance(Vec2::new(x, y)) > self.settings.drag_threshold {
                            self.dragged = true;
                        }
                    }
                }
                InputEvent::PointerUp { x, y } => {
                    let at = Vec2::new(x, y);
                    if let Some(start) = self.press.take() {
                        let moved = start.distance(at) > self.settings.drag_threshold;
                        if !self.dragged && !moved {
                            self.handle_click(ctx, at);
                        }
                    }
                    self.dragged = false;
                }
                InputEvent::Custom { kind: CUSTOM_SELECT_PLANET, a, .. } => {
                    if a.is_finite() && a >= 0.0 {
                        self.select_index(ctx, a as usize);
                    }
                }
                _ => {}
            }
        }
    }
}

impl Default for PlanetViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewer for PlanetViewer {
    fn config(&self) -> ViewerConfig {
        ViewerConfig {
            max_sphere_instances: 4,
            max_point_instances: self.settings.star_count.max(1) as usize,
            max_events: 8,
            ..ViewerConfig::default()
        }
    }

    fn apply_settings(&mut self, json: &str) -> Result<(), serde_json::Error> {
        self.settings = SceneSettings::from_json(json)?;
        Ok(())
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let s = &self.settings;

        ctx.camera.fov_y_deg = s.camera_fov;
        ctx.camera.position = Vec3::new(0.0, 0.0, s.camera_distance);
        ctx.camera.look_at(Vec3::ZERO);

        let ambient = Color::parse_hex(&s.ambient_color).unwrap_or_else(|err| {
            log::warn!("ambient color: {err}");
            Color::from_hex(DEFAULT_AMBIENT)
        });
        ctx.lights.set_ambient(ambient);
        ctx.lights.add(PointLight::new(
            Vec3::from_array(s.light_position),
            Color::WHITE,
            s.light_intensity,
        ));

        // The planet starts as a unit sphere in the initial planet's color;
        // its size only applies once a planet is chosen.
        let initial = match self.catalog.find(&s.initial_planet) {
            Ok((index, record)) => Some((index, record.clone(), s.initial_planet.clone())),
            Err(err) => {
                let fallback = self.catalog.get(0).cloned();
                log::warn!(
                    "initial planet: {err}; falling back to {}",
                    fallback.as_ref().map_or("nothing", |r| r.name.as_str())
                );
                fallback.map(|record| {
                    let name = record.name.clone();
                    (0, record, name)
                })
            }
        };
        let color = initial
            .as_ref()
            .map_or(Color::from_hex(0x2e86de), |(_, record, _)| record.color);

        let planet_id = ctx.next_id();
        let material = PhongMaterial::new(color)
            .with_shininess(PLANET_SHININESS)
            .with_specular(Color::from_hex(PLANET_SPECULAR));
        ctx.scene.spawn(
            Entity::new(planet_id)
                .with_tag(PLANET_TAG)
                .with_pos(Vec3::new(s.planet_offset, 0.0, 0.0))
                .with_mesh(MeshComponent::sphere(1.0, material)),
        );
        self.planet_id = Some(planet_id);

        let stars = StarfieldConfig {
            count: s.star_count,
            spread: s.star_spread,
            seed: s.star_seed,
            size: s.star_size,
            color: Color::WHITE,
        };
        let stars_id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(stars_id)
                .with_tag(STARS_TAG)
                .with_points(starfield_points(&stars)),
        );
        self.stars_id = Some(stars_id);

        if let Some((index, record, shown_name)) = initial {
            self.current = Some(index);
            let panel = InfoPanel::new(&shown_name, index, &record);
            ctx.publish_panel(&panel);
            self.panel = Some(panel);
        }

        log::info!(
            "planet viewer ready: {} planets, {} stars",
            self.catalog.len(),
            self.settings.star_count
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        if let Some(planet) = self.planet_id.and_then(|id| ctx.scene.get_mut(id)) {
            planet.rotation.y += self.settings.planet_spin;
        }
        if let Some(stars) = self.stars_id.and_then(|id| ctx.scene.get_mut(id)) {
            stars.rotation.y -= self.settings.star_spin;
        }

        self.tweens.tick(ctx.dt, &mut ctx.scene);
        self.handle_input(ctx, input);

        let (index, size, moons) = match self.current.and_then(|i| self.catalog.get(i).map(|r| (i, r))) {
            Some((i, record)) => (i as f32, record.size, record.moons as f32),
            None => (-1.0, 0.0, 0.0),
        };
        ctx.emit_event(ViewerEvent::new(EVENT_PLANET, index, size, moons));
    }

    fn query(&mut self, ctx: &mut EngineContext, text: &str) -> bool {
        self.update_planet(ctx, text)
    }
}
