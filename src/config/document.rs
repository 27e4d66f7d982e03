use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::lines::{SourceLines, SourceLocation};
use crate::config::model::TestCardConfig;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{TsgError, TsgResult};
use crate::scheduler::descriptor::WidgetDescriptor;
use crate::scheduler::frame::SchedulerOpts;
use crate::scheduler::pipeline::CANVAS_WIDGET_TYPE;

/// A validated test-card document plus what it needs for diagnostics and asset lookup.
#[derive(Clone, Debug)]
pub struct TestCard {
    config: TestCardConfig,
    sources: Vec<Vec<Option<SourceLocation>>>,
    base_dir: Option<PathBuf>,
}

impl TestCard {
    /// Read and validate the document at `path`.
    pub fn from_path(path: &Path) -> TsgResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            TsgError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut card = Self::parse(Some(path), &text)?;
        card.base_dir = path.parent().map(Path::to_path_buf);
        Ok(card)
    }

    /// Parse and validate a document held in memory.
    pub fn from_json_str(text: &str) -> TsgResult<Self> {
        Self::parse(None, text)
    }

    /// Wrap an already-built configuration; no source lines are known.
    pub fn from_config(config: TestCardConfig) -> TsgResult<Self> {
        config.validate()?;
        let sources = config
            .frames
            .iter()
            .map(|f| vec![None; f.widgets.len()])
            .collect();
        Ok(Self {
            config,
            sources,
            base_dir: None,
        })
    }

    fn parse(file: Option<&Path>, text: &str) -> TsgResult<Self> {
        let config: TestCardConfig = serde_json::from_str(text).map_err(|e| match file {
            Some(p) => TsgError::config(format!("{}: {e}", p.display())),
            None => TsgError::config(e.to_string()),
        })?;
        config.validate()?;

        let lines = SourceLines::scan(file, text);
        let all = lines.locate(
            config
                .frames
                .iter()
                .flat_map(|f| f.widgets.iter().map(|w| w.alias.as_str())),
        );
        let mut rest = all.into_iter();
        let sources = config
            .frames
            .iter()
            .map(|f| rest.by_ref().take(f.widgets.len()).collect())
            .collect();

        Ok(Self {
            config,
            sources,
            base_dir: None,
        })
    }

    /// The parsed document.
    pub fn config(&self) -> &TestCardConfig {
        &self.config
    }

    /// Directory of the source file, used as the first asset search root.
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.config.frames.len()
    }

    /// Name of frame `index`.
    pub fn frame_name(&self, index: usize) -> TsgResult<&str> {
        self.config
            .frames
            .get(index)
            .map(|f| f.name.as_str())
            .ok_or_else(|| frame_out_of_range(index, self.frame_count()))
    }

    /// Widget descriptors of frame `index`; z-positions follow declaration order.
    pub fn descriptors(&self, index: usize) -> TsgResult<Vec<WidgetDescriptor>> {
        let frame = self
            .config
            .frames
            .get(index)
            .ok_or_else(|| frame_out_of_range(index, self.frame_count()))?;
        let sources = &self.sources[index];
        Ok(frame
            .widgets
            .iter()
            .enumerate()
            .map(|(z, w)| {
                let cs = w
                    .colour_space
                    .clone()
                    .unwrap_or_else(|| self.config.canvas.colour_space.clone());
                WidgetDescriptor::new(&w.alias, &w.widget_type, z, w.location.clone(), &w.props)
                    .with_colour_space(cs)
                    .with_source(sources.get(z).cloned().flatten())
            })
            .collect())
    }

    /// Background of frame `index`: the last canvas placeholder's `background`, else the
    /// canvas default.
    pub fn frame_background(&self, index: usize) -> TsgResult<Rgba8> {
        let frame = self
            .config
            .frames
            .get(index)
            .ok_or_else(|| frame_out_of_range(index, self.frame_count()))?;
        let mut bg = self.config.canvas.background;
        for w in frame.widgets.iter().filter(|w| w.widget_type == CANVAS_WIDGET_TYPE) {
            if let Some(v) = w.props.get("background") {
                bg = serde_json::from_value(v.clone()).map_err(|e| {
                    TsgError::config(format!("canvas widget '{}' background: {e}", w.alias))
                })?;
            }
        }
        Ok(bg)
    }

    /// `base` with the document's scheduler overrides applied.
    pub fn scheduler_opts(&self, base: SchedulerOpts) -> SchedulerOpts {
        let Some(s) = self.config.scheduler else {
            return base;
        };
        SchedulerOpts {
            runner_slots: s.runner_slots.unwrap_or(base.runner_slots),
            queue_deadline: s
                .queue_deadline_ms
                .map(Duration::from_millis)
                .or(base.queue_deadline),
            ..base
        }
    }
}

fn frame_out_of_range(index: usize, count: usize) -> TsgError {
    TsgError::config(format!("frame index {index} out of range ({count} frames)"))
}

#[cfg(test)]
#[path = "../../tests/unit/config/document.rs"]
mod tests;
