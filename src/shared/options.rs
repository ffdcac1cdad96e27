//! Zentrale Konfiguration für BrainSlicer.
//!
//! `EngineOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Fenster ─────────────────────────────────────────────────────────

/// Standard-Fenstergröße in Pixeln.
pub const WINDOW_SIZE: [f32; 2] = [1280.0, 720.0];

// ── Kamera ──────────────────────────────────────────────────────────

/// Minimaler Zoom-Faktor.
pub const CAMERA_ZOOM_MIN: f32 = 0.1;
/// Maximaler Zoom-Faktor.
pub const CAMERA_ZOOM_MAX: f32 = 100.0;
/// Zoom-Schritt bei Mausrad-Scroll.
pub const CAMERA_SCROLL_ZOOM_STEP: f32 = 1.1;
/// Pan-Weg in Welteinheiten pro (zoom-kompensiertem) Drag-Pixel.
pub const CAMERA_PAN_SPEED: f32 = 0.5;

// ── Ebenen ──────────────────────────────────────────────────────────

/// Ebenen-Verschiebung in Millimetern pro Drag-Pixel.
pub const PLANE_SHIFT_SPEED: f32 = 0.25;
/// Volumen-Abmessungen (x, y, z) in mm: MNI-Raum mit 1mm-Voxeln.
pub const VOLUME_DIMENSIONS: [f32; 3] = [193.0, 229.0, 193.0];

// ── Fehlerbehandlung ────────────────────────────────────────────────

/// Verhalten bei fehlschlagenden Komponenten-Updates im Frame-Loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Fehler loggen und mit der nächsten Komponente weitermachen
    #[default]
    Isolate,
    /// Frame abbrechen und die Application stoppen
    FailFast,
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `brain_slicer.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineOptions {
    // ── Fenster ─────────────────────────────────────────────────
    /// Fenstergröße beim Start
    pub window_size: [f32; 2],
    /// Pfad zum Application-Descriptor (JSON/TOML). `None` = eingebauter BrainSlicer.
    #[serde(default)]
    pub descriptor_path: Option<String>,

    // ── Frame-Loop ──────────────────────────────────────────────
    /// Umgang mit fehlschlagenden Komponenten-Updates
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    // ── Kamera ──────────────────────────────────────────────────
    /// Minimaler Zoom-Faktor (konfigurierbar)
    pub camera_zoom_min: f32,
    /// Maximaler Zoom-Faktor (konfigurierbar)
    pub camera_zoom_max: f32,
    /// Zoom-Schritt bei Mausrad-Scroll
    pub camera_scroll_zoom_step: f32,
    /// Pan-Geschwindigkeit (Welteinheiten pro Drag-Pixel)
    pub camera_pan_speed: f32,

    // ── Ebenen ──────────────────────────────────────────────────
    /// Ebenen-Verschiebung pro Drag-Pixel
    pub plane_shift_speed: f32,
    /// Volumen-Abmessungen in mm
    #[serde(default = "default_volume_dimensions")]
    pub volume_dimensions: [f32; 3],
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            window_size: WINDOW_SIZE,
            descriptor_path: None,
            failure_policy: FailurePolicy::Isolate,
            camera_zoom_min: CAMERA_ZOOM_MIN,
            camera_zoom_max: CAMERA_ZOOM_MAX,
            camera_scroll_zoom_step: CAMERA_SCROLL_ZOOM_STEP,
            camera_pan_speed: CAMERA_PAN_SPEED,
            plane_shift_speed: PLANE_SHIFT_SPEED,
            volume_dimensions: VOLUME_DIMENSIONS,
        }
    }
}

/// Serde-Default für `volume_dimensions` (Abwärtskompatibilität).
fn default_volume_dimensions() -> [f32; 3] {
    VOLUME_DIMENSIONS
}

impl EngineOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("brain_slicer"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("brain_slicer.toml")
    }
}
