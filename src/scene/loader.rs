use std::collections::HashSet;
use std::fs;
use std::path::Path;

use glam::DVec3;
use thiserror::Error;

use super::{BoundingBox, Scene, SceneObject};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot open file: {0}")]
    FileNotFound(String),
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },
    #[error("Line {line} has {actual} fields, expected 7 (name and two corners)")]
    WrongFieldCount { line: usize, actual: usize },
    #[error("Line {line} repeats object name '{name}'")]
    DuplicateName { line: usize, name: String },
    #[error("File is empty")]
    EmptyFile,
}

/// Parse a single finite coordinate
fn parse_coordinate(s: &str, line: usize) -> Result<f64, LoadError> {
    let value: f64 = s.parse().map_err(|_| LoadError::ParseError {
        line,
        message: format!("expected number, got '{}'", s),
    })?;
    if !value.is_finite() {
        return Err(LoadError::ParseError {
            line,
            message: format!("coordinate '{}' is not finite", s),
        });
    }
    Ok(value)
}

fn parse_corner(fields: &[&str], line: usize) -> Result<DVec3, LoadError> {
    Ok(DVec3::new(
        parse_coordinate(fields[0], line)?,
        parse_coordinate(fields[1], line)?,
        parse_coordinate(fields[2], line)?,
    ))
}

/// Load a scene from a description file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|_| LoadError::FileNotFound(path.display().to_string()))?;

    parse_scene_content(&content)
}

/// Parse scene content string (useful for testing)
///
/// Each non-empty line is `name min_x min_y min_z max_x max_y max_z`.
/// Text after `#` is ignored.
pub fn parse_scene_content(content: &str) -> Result<Scene, LoadError> {
    let mut objects = Vec::new();
    let mut names = HashSet::new();

    for (line_idx, line) in content.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = match line.split_once('#') {
            Some((before, _)) => before,
            None => line,
        }
        .trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 7 {
            return Err(LoadError::WrongFieldCount {
                line: line_no,
                actual: fields.len(),
            });
        }

        let name = fields[0].to_string();
        if !names.insert(name.clone()) {
            return Err(LoadError::DuplicateName {
                line: line_no,
                name,
            });
        }

        let min = parse_corner(&fields[1..4], line_no)?;
        let max = parse_corner(&fields[4..7], line_no)?;
        objects.push(SceneObject {
            name,
            bounds: BoundingBox::new(min, max),
        });
    }

    log::debug!("parsed scene with {} objects", objects.len());
    Scene::new(objects).ok_or(LoadError::EmptyFile)
}
