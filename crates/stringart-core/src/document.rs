//! Persisted JSON document.
//!
//! Lines are stored in full in `lineData`; fans refer to their boundary lines
//! by index into that array. Every record carries a `type` tag naming its
//! entity kind.

use crate::scene::Scene;
use crate::shapes::{Fan, Line, LineId, StringColor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while loading a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Malformed document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected a {expected} record at {array}[{index}]")]
    UnexpectedRecord {
        array: &'static str,
        index: usize,
        expected: &'static str,
    },
    #[error("Fan {fan} references missing line {line}")]
    DanglingLine { fan: usize, line: usize },
    #[error("Fan {fan} has an invalid nail count: {value}")]
    InvalidNailCount { fan: usize, value: String },
    #[error("Fan {fan} has an invalid stroke width: {value}")]
    InvalidStrokeWidth { fan: usize, value: String },
    #[error("Fan {fan} has an invalid color: {value:?}")]
    InvalidColor { fan: usize, value: String },
}

/// A number that older documents may have stored as form text.
///
/// Variants are tried in order, so whole numbers read back as `Integer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Integer(u64),
    Number(f64),
    Text(String),
}

impl Numeric {
    fn value(&self) -> Option<f64> {
        match self {
            Numeric::Integer(n) => Some(*n as f64),
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) => s.trim().parse().ok(),
        }
        .filter(|n| n.is_finite())
    }

    fn describe(&self) -> String {
        match self {
            Numeric::Integer(n) => n.to_string(),
            Numeric::Number(n) => n.to_string(),
            Numeric::Text(s) => format!("{s:?}"),
        }
    }
}

/// A fan with its boundary lines as `lineData` indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FanRecord {
    pub line1: usize,
    pub line2: usize,
    pub color: String,
    pub stroke_width: Numeric,
    pub num_nails: Numeric,
}

/// One serialized entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Record {
    Line(Line),
    Fan(FanRecord),
}

/// The serialized form of a [`Scene`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDocument {
    #[serde(default)]
    pub line_data: Vec<Record>,
    #[serde(default)]
    pub fan_data: Vec<Record>,
}

impl SceneDocument {
    /// Snapshot a scene, keeping both z-orders.
    pub fn from_scene(scene: &Scene) -> Self {
        let index: HashMap<LineId, usize> = scene
            .line_ids()
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();

        let line_data = scene.lines().map(|(_, line)| Record::Line(*line)).collect();
        let fan_data = scene
            .fans()
            .map(|(_, fan)| {
                Record::Fan(FanRecord {
                    line1: index[&fan.line1],
                    line2: index[&fan.line2],
                    color: fan.color.to_string(),
                    stroke_width: Numeric::Number(fan.stroke_width),
                    num_nails: Numeric::Integer(u64::from(fan.num_nails)),
                })
            })
            .collect();

        Self { line_data, fan_data }
    }

    /// Rebuild a scene, resolving fan line indices back to ids.
    pub fn to_scene(&self) -> Result<Scene, DocumentError> {
        let mut scene = Scene::new();

        let mut ids = Vec::with_capacity(self.line_data.len());
        for (index, record) in self.line_data.iter().enumerate() {
            let Record::Line(line) = record else {
                return Err(DocumentError::UnexpectedRecord {
                    array: "lineData",
                    index,
                    expected: "Line",
                });
            };
            ids.push(scene.add_line(*line));
        }

        for (index, record) in self.fan_data.iter().enumerate() {
            let Record::Fan(fan) = record else {
                return Err(DocumentError::UnexpectedRecord {
                    array: "fanData",
                    index,
                    expected: "Fan",
                });
            };
            scene.add_fan(fan.resolve(index, &ids)?);
        }

        log::info!(
            "Loaded document with {} lines and {} fans",
            scene.line_count(),
            scene.fan_count()
        );
        Ok(scene)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FanRecord {
    fn resolve(&self, fan: usize, ids: &[LineId]) -> Result<Fan, DocumentError> {
        let line = |line: usize| {
            ids.get(line)
                .copied()
                .ok_or(DocumentError::DanglingLine { fan, line })
        };
        let line1 = line(self.line1)?;
        let line2 = line(self.line2)?;

        let color = StringColor::parse(&self.color).ok_or_else(|| DocumentError::InvalidColor {
            fan,
            value: self.color.clone(),
        })?;

        let stroke_width = self
            .stroke_width
            .value()
            .filter(|&w| w >= 0.0)
            .ok_or_else(|| DocumentError::InvalidStrokeWidth {
                fan,
                value: self.stroke_width.describe(),
            })?;

        let num_nails = self
            .num_nails
            .value()
            .filter(|&n| n.fract() == 0.0 && n >= f64::from(Fan::MIN_NAILS) && n <= f64::from(u32::MAX))
            .ok_or_else(|| DocumentError::InvalidNailCount {
                fan,
                value: self.num_nails.describe(),
            })? as u32;

        Ok(Fan::new(line1, line2, color, stroke_width, num_nails))
    }
}
