use crate::areas::repository::Repository;
use crate::artifacts::diagram::emitter::emit;
use crate::artifacts::diagram::renderer::PlantUml;
use crate::artifacts::graph::node::GraphNode;
use crate::artifacts::graph::walker::GraphWalker;
use anyhow::Context;
use colored::Colorize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct GraphOptions {
    /// Starting object; the configured branch when unset
    pub revision: Option<String>,
    /// Run PlantUML on the written diagram
    pub render: bool,
}

impl Repository {
    /// Every object reachable from `revision`, as a tree of nodes
    pub fn object_graph(&self, revision: Option<&str>) -> anyhow::Result<GraphNode> {
        let tip = self.resolve_revision(revision)?;

        GraphWalker::new(self.database(), self.settings().walk_options())
            .resolve(&tip)
            .with_context(|| format!("Unable to build the object graph from {tip}"))
    }

    /// Print the diagram instead of writing it to a file
    pub fn emit_diagram(&self, revision: Option<&str>) -> anyhow::Result<()> {
        let diagram = emit(&self.object_graph(revision)?);
        writeln!(self.writer(), "{diagram}")?;

        Ok(())
    }

    /// Write the diagram file, and render it when asked to
    ///
    /// Nothing is written when any reachable object cannot be read.
    pub fn graph(&self, opts: &GraphOptions) -> anyhow::Result<()> {
        let diagram = emit(&self.object_graph(opts.revision.as_deref())?);

        let output_path = &self.settings().output_path;
        if let Some(parent) = output_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory {}", parent.display()))?;
        }
        std::fs::write(output_path, &diagram)
            .with_context(|| format!("Unable to write diagram to {}", output_path.display()))?;

        info!(path = %output_path.display(), bytes = diagram.len(), "wrote diagram");
        writeln!(
            self.writer(),
            "Diagram written to {}",
            output_path.display().to_string().green()
        )?;

        if opts.render {
            self.render_diagram(output_path)?;
        }

        Ok(())
    }

    pub(crate) fn render_diagram(&self, diagram_path: &Path) -> anyhow::Result<()> {
        let settings = self.settings();
        let jar = settings
            .plantuml_path
            .clone()
            .context("Rendering requires plantuml_path to be configured")?;

        let output_dir = settings.render_dir();
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Unable to create directory {}", output_dir.display()))?;
        // PlantUML resolves a relative -o against the diagram's directory
        let output_dir = output_dir.canonicalize()?;

        let output =
            PlantUml::new(settings.java_path.clone(), jar).render(diagram_path, &output_dir)?;

        write!(self.writer(), "{output}")?;
        writeln!(
            self.writer(),
            "Diagram rendered into {}",
            output_dir.display().to_string().green()
        )?;

        Ok(())
    }
}
