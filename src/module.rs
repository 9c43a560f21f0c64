//! Derives module names for report files from Maven or Ant build descriptors.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

const MAVEN_POM: &str = "pom.xml";
const ANT_PROJECT: &str = "build.xml";

pub struct ModuleDetector {
    root: PathBuf,
    parent_block: Regex,
    pom_name: Regex,
    artifact_id: Regex,
    ant_project_name: Regex,
}

impl ModuleDetector {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            parent_block: Regex::new(r"(?s)<parent>.*?</parent>").expect("Invalid regex"),
            pom_name: Regex::new(r"(?s)<name>\s*([^<]*?)\s*</name>").expect("Invalid regex"),
            artifact_id: Regex::new(r"(?s)<artifactId>\s*([^<]*?)\s*</artifactId>")
                .expect("Invalid regex"),
            ant_project_name: Regex::new(r#"<project[^>]*?\bname\s*=\s*"([^"]*)""#)
                .expect("Invalid regex"),
        }
    }

    /// Name of the module owning `file`, from the nearest descriptor between
    /// the file and the workspace root. `None` if there is no descriptor.
    #[must_use]
    pub fn guess_module_name(&self, file: &Path) -> Option<String> {
        let start = file.parent()?;
        for dir in start.ancestors() {
            if let Some(name) = self.module_in(dir) {
                return Some(name);
            }
            if dir == self.root || !dir.starts_with(&self.root) {
                break;
            }
        }
        None
    }

    fn module_in(&self, dir: &Path) -> Option<String> {
        let pom = dir.join(MAVEN_POM);
        if pom.is_file() {
            let name = fs::read_to_string(&pom)
                .ok()
                .and_then(|content| self.maven_module_name(&content));
            return Some(name.unwrap_or_else(|| directory_name(dir)));
        }

        let ant = dir.join(ANT_PROJECT);
        if ant.is_file() {
            let name = fs::read_to_string(&ant)
                .ok()
                .and_then(|content| self.ant_module_name(&content));
            return Some(name.unwrap_or_else(|| directory_name(dir)));
        }

        None
    }

    fn maven_module_name(&self, pom: &str) -> Option<String> {
        let own = self.parent_block.replace_all(pom, "");
        first_capture(&self.pom_name, &own).or_else(|| first_capture(&self.artifact_id, &own))
    }

    fn ant_module_name(&self, build: &str) -> Option<String> {
        first_capture(&self.ant_project_name, build)
    }
}

fn first_capture(regex: &Regex, text: &str) -> Option<String> {
    regex
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn directory_name(dir: &Path) -> String {
    dir.file_name()
        .map_or_else(String::new, |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
#[path = "module_tests.rs"]
mod tests;
