//! Enemy mesh loading
//!
//! Enemies are drawn with an external Wavefront OBJ when one is configured and
//! readable, otherwise with the procedural fighter from `shapes`. The choice
//! is made once at startup; the simulation never knows which is in use.

use std::path::Path;

use glam::{Mat4, Vec3};

use super::shapes;
use super::vertex::{Vertex, colors};

#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("failed to read mesh: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("mesh has no faces")]
    Empty,
}

fn parse_error(line: usize, message: impl Into<String>) -> MeshError {
    MeshError::Parse {
        line,
        message: message.into(),
    }
}

/// Resolve an OBJ vertex reference (1-based, or negative from the end)
fn resolve_index(token: &str, count: usize, line: usize) -> Result<usize, MeshError> {
    let raw = token.split('/').next().unwrap_or_default();
    let index: i64 = raw
        .parse()
        .map_err(|_| parse_error(line, format!("bad vertex index '{}'", token)))?;
    let resolved = if index > 0 {
        index - 1
    } else if index < 0 {
        count as i64 + index
    } else {
        return Err(parse_error(line, "vertex index 0"));
    };
    if resolved < 0 || resolved as usize >= count {
        return Err(parse_error(line, format!("vertex index {} out of range", index)));
    }
    Ok(resolved as usize)
}

/// Parse OBJ text into a flat triangle list.
///
/// Only `v` and `f` records matter; polygons are fan-triangulated.
pub fn parse_obj(source: &str, color: [f32; 4]) -> Result<Vec<Vertex>, MeshError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut triangles = Vec::new();

    for (i, text) in source.lines().enumerate() {
        let line = i + 1;
        let mut tokens = text.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let coords: Vec<f32> = tokens
                    .take(3)
                    .map(|t| t.parse::<f32>())
                    .collect::<Result<_, _>>()
                    .map_err(|e| parse_error(line, e.to_string()))?;
                if coords.len() != 3 {
                    return Err(parse_error(line, "vertex needs three coordinates"));
                }
                positions.push(Vec3::new(coords[0], coords[1], coords[2]));
            }
            Some("f") => {
                let corners: Vec<usize> = tokens
                    .map(|t| resolve_index(t, positions.len(), line))
                    .collect::<Result<_, _>>()?;
                if corners.len() < 3 {
                    return Err(parse_error(line, "face needs at least three vertices"));
                }
                for pair in corners[1..].windows(2) {
                    for &index in &[corners[0], pair[0], pair[1]] {
                        triangles.push(Vertex::at(positions[index], color));
                    }
                }
            }
            _ => {}
        }
    }

    if triangles.is_empty() {
        return Err(MeshError::Empty);
    }
    Ok(triangles)
}

/// Load an OBJ file into a triangle list
pub fn load_obj(path: &Path, color: [f32; 4]) -> Result<Vec<Vertex>, MeshError> {
    let source = std::fs::read_to_string(path)?;
    parse_obj(&source, color)
}

/// How enemies are drawn
#[derive(Debug, Clone)]
pub enum EnemyModel {
    /// Triangles loaded from a mesh file, in model space
    Mesh(Vec<Vertex>),
    /// Built-in procedural fighter
    Procedural,
}

impl EnemyModel {
    /// Use the mesh at `path` if it loads, else the procedural fighter
    pub fn load_or_fallback(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return EnemyModel::Procedural;
        };
        match load_obj(path, colors::ENEMY) {
            Ok(triangles) => {
                log::info!(
                    "Loaded enemy mesh {} ({} triangles)",
                    path.display(),
                    triangles.len() / 3
                );
                EnemyModel::Mesh(triangles)
            }
            Err(e) => {
                log::warn!(
                    "Enemy mesh {} unusable ({}), using procedural fighter",
                    path.display(),
                    e
                );
                EnemyModel::Procedural
            }
        }
    }

    /// Triangles for one enemy at `pos`
    pub fn instance(&self, pos: Vec3) -> Vec<Vertex> {
        match self {
            EnemyModel::Mesh(triangles) => {
                shapes::transform(triangles.clone(), Mat4::from_translation(pos))
            }
            EnemyModel::Procedural => shapes::fighter(pos, 1.0),
        }
    }
}
