use crate::serializer::{serialize, ExportOptions, SerializeMode};
use docsmith_composer::{snapshot, CaptureSource, ComposeError, Composer};
use docsmith_model::{EntityStore, OrderModel, Page};
use thiserror::Error;
use tracing::{error, info, instrument};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Compose error: {0}")]
    Compose(#[from] ComposeError),
}

/// One export run's results: the populated document and the reusable
/// template, composed from the same node tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutput {
    pub literal: String,
    pub template: String,
}

/// Export boundary.
///
/// Each call runs the full pipeline — capture snapshot → compose →
/// serialize both modes — as one synchronous pass over read-only state.
/// A failing run surfaces a single error and leaves the previously
/// exported output untouched; retry is always an explicit re-invocation.
pub struct Exporter {
    composer: Composer,
    options: ExportOptions,
    last: Option<ExportOutput>,
}

impl Exporter {
    pub fn new() -> Self {
        Self::with_options(ExportOptions::default())
    }

    pub fn with_options(options: ExportOptions) -> Self {
        Self {
            composer: Composer::new(),
            options,
            last: None,
        }
    }

    #[instrument(skip_all)]
    pub fn export(
        &mut self,
        page: &Page,
        store: &EntityStore,
        orders: &OrderModel,
        capture: &dyn CaptureSource,
    ) -> Result<&ExportOutput, ExportError> {
        let live = snapshot(page, capture);
        info!(live_values = live.len(), "Starting export");

        let tree = match self.composer.compose(page, store, orders, &live) {
            Ok(tree) => tree,
            Err(e) => {
                error!(error = %e, "Export failed; previous output retained");
                return Err(e.into());
            }
        };

        let output = ExportOutput {
            literal: serialize(&tree, SerializeMode::Literal, &self.options),
            template: serialize(&tree, SerializeMode::Template, &self.options),
        };

        info!(
            literal_bytes = output.literal.len(),
            template_bytes = output.template.len(),
            "Export complete"
        );
        Ok(self.last.insert(output))
    }

    /// The most recent successful output, if any
    pub fn last_output(&self) -> Option<&ExportOutput> {
        self.last.as_ref()
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}
