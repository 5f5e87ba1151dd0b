use crate::error::SceneError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub sphere: SphereConfig,
    #[serde(default)]
    pub cone: ConeConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    /// Supersampling factor per axis (1 = off).
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub background: [f32; 3],
    #[serde(default = "default_true")]
    pub cull_back_faces: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            samples: default_samples(),
            output: default_output(),
            background: [0.0; 3],
            cull_back_faces: true,
        }
    }
}

fn default_width() -> usize {
    800
}
fn default_height() -> usize {
    600
}
fn default_samples() -> usize {
    1
}
fn default_output() -> String {
    "orbit_scene.png".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_angle")]
    pub angle_x: f32,
    #[serde(default = "default_angle")]
    pub angle_y: f32,
    #[serde(default = "default_distance")]
    pub distance: f32,
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    #[serde(default = "default_drag_sensitivity")]
    pub drag_sensitivity: f32,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f32,
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            angle_x: default_angle(),
            angle_y: default_angle(),
            distance: default_distance(),
            min_distance: default_min_distance(),
            drag_sensitivity: default_drag_sensitivity(),
            zoom_step: default_zoom_step(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_angle() -> f32 {
    45.0
}
fn default_distance() -> f32 {
    5.0
}
fn default_min_distance() -> f32 {
    1.0
}
fn default_drag_sensitivity() -> f32 {
    0.1
}
fn default_zoom_step() -> f32 {
    0.1
}
fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    1.0
}
fn default_far() -> f32 {
    100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_position")]
    pub position: [f32; 3],
    #[serde(default = "default_light_color")]
    pub color: [f32; 3],
    #[serde(default = "default_intensity")]
    pub intensity: f32,
    /// Keyboard increment for position and intensity.
    #[serde(default = "default_step")]
    pub step: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: default_light_position(),
            color: default_light_color(),
            intensity: default_intensity(),
            step: default_step(),
        }
    }
}

fn default_light_position() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_light_color() -> [f32; 3] {
    [0.8, 0.8, 0.8]
}
fn default_intensity() -> f32 {
    1.0
}
fn default_step() -> f32 {
    0.1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereConfig {
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_sectors")]
    pub sectors: u32,
    #[serde(default = "default_stacks")]
    pub stacks: u32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            sectors: default_sectors(),
            stacks: default_stacks(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConeConfig {
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_cone_height")]
    pub height: f32,
    #[serde(default = "default_sectors")]
    pub sectors: u32,
}

impl Default for ConeConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            height: default_cone_height(),
            sectors: default_sectors(),
        }
    }
}

fn default_radius() -> f32 {
    0.5
}
fn default_sectors() -> u32 {
    36
}
fn default_stacks() -> u32 {
    18
}
fn default_cone_height() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Averaging window of the FPS counter.
    #[serde(default = "default_fps_window")]
    pub fps_window_secs: f32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            fps_window_secs: default_fps_window(),
        }
    }
}

fn default_fps_window() -> f32 {
    1.0
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| SceneError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a TOML document; missing keys take defaults.
    pub fn from_toml(content: &str) -> Result<Self, SceneError> {
        let config: Config =
            toml::from_str(content).map_err(|e| SceneError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, SceneError> {
        toml::to_string_pretty(self).map_err(|e| SceneError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        self.ensure_all_finite()?;

        let r = &self.render;
        if r.width == 0 || r.height == 0 {
            return Err(SceneError::invalid(
                "render.width/height",
                format!("must be non-zero, got {}x{}", r.width, r.height),
            ));
        }
        if !(1..=4).contains(&r.samples) {
            return Err(SceneError::invalid(
                "render.samples",
                format!("must be in 1..=4, got {}", r.samples),
            ));
        }

        let c = &self.camera;
        if !(c.min_distance > 0.0) {
            return Err(SceneError::invalid(
                "camera.min_distance",
                format!("must be positive, got {}", c.min_distance),
            ));
        }
        if !(c.fov > 0.0 && c.fov < 180.0) {
            return Err(SceneError::invalid(
                "camera.fov",
                format!("must be in (0, 180) degrees, got {}", c.fov),
            ));
        }
        if !(c.near > 0.0 && c.far > c.near) {
            return Err(SceneError::invalid(
                "camera.near/far",
                format!("need 0 < near < far, got {} / {}", c.near, c.far),
            ));
        }

        if !(0.0..=1.0).contains(&self.light.intensity) {
            return Err(SceneError::invalid(
                "light.intensity",
                format!("must be in [0, 1], got {}", self.light.intensity),
            ));
        }

        if self.sphere.sectors < 3 || self.sphere.stacks < 2 {
            return Err(SceneError::invalid(
                "sphere.sectors/stacks",
                format!(
                    "need at least 3 sectors and 2 stacks, got {} / {}",
                    self.sphere.sectors, self.sphere.stacks
                ),
            ));
        }
        if self.cone.sectors < 3 {
            return Err(SceneError::invalid(
                "cone.sectors",
                format!("need at least 3, got {}", self.cone.sectors),
            ));
        }

        if !(self.stats.fps_window_secs > 0.0) {
            return Err(SceneError::invalid(
                "stats.fps_window_secs",
                format!("must be positive, got {}", self.stats.fps_window_secs),
            ));
        }
        Ok(())
    }

    /// TOML accepts `inf` and `nan`; none of the float settings may hold them.
    fn ensure_all_finite(&self) -> Result<(), SceneError> {
        let c = &self.camera;
        let l = &self.light;
        let checks: [(&'static str, &[f32]); 13] = [
            ("render.background", &self.render.background),
            ("camera.angle_x/angle_y", &[c.angle_x, c.angle_y]),
            ("camera.distance", &[c.distance]),
            ("camera.min_distance", &[c.min_distance]),
            ("camera.drag_sensitivity/zoom_step", &[c.drag_sensitivity, c.zoom_step]),
            ("camera.fov", &[c.fov]),
            ("camera.near/far", &[c.near, c.far]),
            ("light.position", &l.position),
            ("light.color", &l.color),
            ("light.intensity/step", &[l.intensity, l.step]),
            ("sphere.radius", &[self.sphere.radius]),
            ("cone.radius/height", &[self.cone.radius, self.cone.height]),
            ("stats.fps_window_secs", &[self.stats.fps_window_secs]),
        ];
        for (name, values) in checks {
            if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
                return Err(SceneError::invalid(name, format!("must be finite, got {bad}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.render.width, 800);
        assert_eq!(config.camera.near, 1.0);
        assert_eq!(config.light.color, [0.8, 0.8, 0.8]);
        assert_eq!(config.sphere.stacks, 18);
        assert_eq!(config.stats.fps_window_secs, 1.0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            [render]
            width = 320
            samples = 2

            [light]
            intensity = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.render.width, 320);
        assert_eq!(config.render.height, 600);
        assert_eq!(config.render.samples, 2);
        assert_eq!(config.light.intensity, 0.5);
        assert_eq!(config.light.position, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn defaults_survive_serialization() {
        let text = Config::default().to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), Config::default());
    }

    #[test]
    fn bad_tessellation_is_rejected() {
        let err = Config::from_toml("[sphere]\nsectors = 2\n").unwrap_err();
        assert!(matches!(
            err,
            SceneError::InvalidParameter {
                name: "sphere.sectors/stacks",
                ..
            }
        ));
        assert!(Config::from_toml("[cone]\nsectors = 1\n").is_err());
    }

    #[test]
    fn bad_camera_values_are_rejected() {
        assert!(Config::from_toml("[camera]\nnear = 10.0\nfar = 5.0\n").is_err());
        assert!(Config::from_toml("[camera]\nmin_distance = 0.0\n").is_err());
        assert!(Config::from_toml("[light]\nintensity = 1.5\n").is_err());
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = Config::from_toml("[render\nwidth = ").unwrap_err();
        assert!(matches!(err, SceneError::Config(_)));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        for doc in [
            "[stats]\nfps_window_secs = inf\n",
            "[camera]\nfar = inf\n",
            "[camera]\nnear = nan\n",
            "[camera]\ndistance = inf\n",
            "[camera]\nangle_y = -inf\n",
            "[light]\nposition = [1.0, nan, 1.0]\n",
        ] {
            let err = Config::from_toml(doc).unwrap_err();
            assert!(
                matches!(err, SceneError::InvalidParameter { .. }),
                "{doc:?} gave {err}"
            );
        }
    }

    #[test]
    fn load_reports_bad_tessellation_as_invalid_parameter() {
        let path = std::env::temp_dir().join(format!("orbit_scene_bad_tess_{}.toml", std::process::id()));
        fs::write(&path, "[sphere]\nsectors = 2\n").unwrap();
        let result = Config::load(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(
            result,
            Err(SceneError::InvalidParameter {
                name: "sphere.sectors/stacks",
                ..
            })
        ));
    }

    #[test]
    fn load_reports_syntax_errors_with_the_path() {
        let path = std::env::temp_dir().join(format!("orbit_scene_bad_syntax_{}.toml", std::process::id()));
        fs::write(&path, "[render\n").unwrap();
        let result = Config::load(&path);
        fs::remove_file(&path).ok();
        match result {
            Err(SceneError::Config(msg)) => assert!(msg.contains("orbit_scene_bad_syntax")),
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, SceneError::Io(_)));
    }
}
