//! Multi-board support.
//!
//! This module handles board discovery, naming conventions, and per-board
//! file management. Boards are stored as individual JSON files with the
//! naming convention: `<board_name>_board.json`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::board::Board;

/// A named board and the file backing it.
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub display_name: String,
    pub file_path: PathBuf,
}

impl Project {
    /// Create a new board entry with the given display name.
    pub fn new(display_name: &str, boards_dir: &Path) -> Self {
        let name = sanitize_board_name(display_name);
        let file_path = boards_dir.join(format!("{}_board.json", name));

        Project {
            name,
            display_name: display_name.to_string(),
            file_path,
        }
    }

    /// Load a board entry from an existing file path.
    pub fn from_file(file_path: PathBuf) -> Option<Self> {
        let file_name = file_path.file_stem()?.to_str()?;
        let name = file_name.strip_suffix("_board")?;
        if name.is_empty() {
            return None;
        }

        Some(Project {
            name: name.to_string(),
            display_name: name.replace('_', " "),
            file_path,
        })
    }

    /// Create the board file if it doesn't exist.
    pub fn create_if_not_exists(&self) -> Result<(), std::io::Error> {
        if !self.file_path.exists() {
            Board::default().save(&self.file_path)?;
        }
        Ok(())
    }

    /// Load the board behind this entry.
    pub fn load_board(&self) -> Board {
        Board::load(&self.file_path)
    }
}

/// Convert a display name to a safe board name for file naming.
/// Lowercases and collapses anything non-alphanumeric to underscores.
pub fn sanitize_board_name(display_name: &str) -> String {
    display_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Discover all existing boards in the boards directory.
pub fn discover_projects(boards_dir: &Path) -> Result<Vec<Project>, std::io::Error> {
    let mut projects = Vec::new();

    if !boards_dir.exists() {
        return Ok(projects);
    }

    for entry in fs::read_dir(boards_dir)? {
        let path = entry?.path();
        if path.is_file() {
            if let Some(project) = Project::from_file(path) {
                projects.push(project);
            }
        }
    }

    projects.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    Ok(projects)
}

/// Get the default board file (board.json) as a special "legacy" entry.
pub fn get_legacy_project(boards_dir: &Path) -> Option<Project> {
    let legacy_path = boards_dir.join("board.json");
    if legacy_path.exists() {
        Some(Project {
            name: "default".to_string(),
            display_name: "Default (Legacy)".to_string(),
            file_path: legacy_path,
        })
    } else {
        None
    }
}

/// Create a new board with the given name.
pub fn create_project(
    display_name: &str,
    boards_dir: &Path,
) -> Result<Project, Box<dyn std::error::Error>> {
    if display_name.trim().is_empty() {
        return Err("Board name cannot be empty".into());
    }

    let project = Project::new(display_name, boards_dir);

    if project.file_path.exists() {
        return Err(format!("Board '{}' already exists", display_name).into());
    }

    project.create_if_not_exists()?;
    Ok(project)
}

/// Find the most recently modified board in the boards directory.
pub fn get_most_recent_project(boards_dir: &Path) -> Result<Option<Project>, std::io::Error> {
    let mut projects = discover_projects(boards_dir)?;

    if let Some(legacy) = get_legacy_project(boards_dir) {
        projects.push(legacy);
    }

    let mut most_recent: Option<(Project, std::time::SystemTime)> = None;
    for project in projects {
        let Ok(metadata) = fs::metadata(&project.file_path) else {
            continue;
        };
        let Ok(modified) = metadata.modified() else {
            continue;
        };
        let newer = match most_recent {
            None => true,
            Some((_, current)) => modified > current,
        };
        if newer {
            most_recent = Some((project, modified));
        }
    }

    Ok(most_recent.map(|(project, _)| project))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_board_name() {
        assert_eq!(sanitize_board_name("My Board"), "my_board");
        assert_eq!(sanitize_board_name("Side-Project 2026"), "side_project_2026");
        assert_eq!(sanitize_board_name("Weird!!Chars??"), "weird_chars");
        assert_eq!(sanitize_board_name("  Lots   of  space "), "lots_of_space");
        assert_eq!(sanitize_board_name(""), "");
    }

    #[test]
    fn test_from_file_requires_board_suffix() {
        assert!(Project::from_file(PathBuf::from("/tmp/work_board.json")).is_some());
        assert!(Project::from_file(PathBuf::from("/tmp/work.json")).is_none());
        assert!(Project::from_file(PathBuf::from("/tmp/_board.json")).is_none());
    }
}
