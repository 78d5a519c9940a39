//! Rendering of diagram files with the PlantUML jar
//!
//! The jar is run as `java -jar <plantuml.jar> <diagram> -o <output-dir>`. Standard
//! output and standard error are captured and returned together so a failure can be
//! reported with whatever PlantUML printed.

use derive_new::new;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unable to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PlantUML failed with {}:\n{output}", exit_code.map_or("a signal".to_string(), |code| format!("exit code {code}")))]
    Failed {
        exit_code: Option<i32>,
        output: String,
    },
}

#[derive(Debug, Clone, new)]
pub struct PlantUml {
    /// Java launcher, `java` unless configured otherwise
    java: String,
    jar: PathBuf,
}

impl PlantUml {
    /// Render `diagram` into `output_dir` and return the combined output of the run
    pub fn render(&self, diagram: &Path, output_dir: &Path) -> Result<String, RenderError> {
        let mut command = Command::new(&self.java);
        command
            .arg("-jar")
            .arg(&self.jar)
            .arg(diagram)
            .arg("-o")
            .arg(output_dir);

        debug!(?command, "running PlantUML");
        let output = command.output().map_err(|source| RenderError::Spawn {
            program: self.java.clone(),
            source,
        })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(RenderError::Failed {
                exit_code: output.status.code(),
                output: combined,
            });
        }

        info!(diagram = %diagram.display(), output_dir = %output_dir.display(), "rendered diagram");
        Ok(combined)
    }
}
