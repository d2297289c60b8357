use serde::Deserialize;

/// Scene tuning, overridable from the host with a JSON object.
/// Missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Planet spin per tick, radians.
    pub planet_spin: f32,
    /// Starfield spin per tick, radians (applied in the opposite direction).
    pub star_spin: f32,
    pub star_count: u32,
    /// Stars are spread over a cube of this edge length around the origin.
    pub star_spread: f32,
    pub star_seed: u64,
    pub star_size: f32,
    /// Planet center along X.
    pub planet_offset: f32,
    pub camera_distance: f32,
    pub camera_fov: f32,
    pub light_position: [f32; 3],
    pub light_intensity: f32,
    pub ambient_color: String,
    /// Extra spin added to the planet when clicked.
    pub click_spin: f32,
    /// Pointer travel (CSS px) beyond which a press is a drag, not a click.
    pub drag_threshold: f32,
    /// Planet switch animation length in seconds; zero switches instantly.
    pub transition_secs: f32,
    pub initial_planet: String,
    /// Use texture slots for planets that have an image.
    pub textures: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            planet_spin: 0.002,
            star_spin: 0.0005,
            star_count: 2000,
            star_spread: 50.0,
            star_seed: 0x5EED_57A2,
            star_size: 0.02,
            planet_offset: 2.0,
            camera_distance: 5.0,
            camera_fov: 75.0,
            light_position: [5.0, 3.0, 5.0],
            light_intensity: 1.5,
            ambient_color: String::from("#333333"),
            click_spin: 0.5,
            drag_threshold: 5.0,
            transition_secs: 0.0,
            initial_planet: String::from("earth"),
            textures: false,
        }
    }
}

impl SceneSettings {
    /// Most stars the scene will generate; each one is a point instance per frame.
    pub const MAX_STAR_COUNT: u32 = 50_000;

    /// Parse an override. Out-of-range values are replaced with a warning,
    /// only a malformed object is an error.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        if self.star_count > Self::MAX_STAR_COUNT {
            log::warn!("star_count {} exceeds {}; capping", self.star_count, Self::MAX_STAR_COUNT);
            self.star_count = Self::MAX_STAR_COUNT;
        }
        self.planet_spin = checked("planet_spin", self.planet_spin, d.planet_spin, f32::is_finite);
        self.star_spin = checked("star_spin", self.star_spin, d.star_spin, f32::is_finite);
        self.click_spin = checked("click_spin", self.click_spin, d.click_spin, f32::is_finite);
        self.planet_offset = checked("planet_offset", self.planet_offset, d.planet_offset, f32::is_finite);
        self.transition_secs = checked("transition_secs", self.transition_secs, d.transition_secs, non_negative);
        self.star_size = checked("star_size", self.star_size, d.star_size, non_negative);
        self.drag_threshold = checked("drag_threshold", self.drag_threshold, d.drag_threshold, non_negative);
        self.light_intensity = checked("light_intensity", self.light_intensity, d.light_intensity, non_negative);
        self.star_spread = checked("star_spread", self.star_spread, d.star_spread, positive);
        self.camera_distance = checked("camera_distance", self.camera_distance, d.camera_distance, positive);
        self.camera_fov = checked("camera_fov", self.camera_fov, d.camera_fov, |fov| positive(fov) && fov < 180.0);
        if !self.light_position.iter().all(|v| v.is_finite()) {
            log::warn!("light_position {:?} is not finite; using default", self.light_position);
            self.light_position = d.light_position;
        }
        self
    }
}

fn non_negative(v: f32) -> bool {
    v.is_finite() && v >= 0.0
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn checked(field: &str, value: f32, default: f32, valid: impl Fn(f32) -> bool) -> f32 {
    if valid(value) {
        value
    } else {
        log::warn!("{field} {value} is out of range; using {default}");
        default
    }
}
