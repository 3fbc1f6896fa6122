//! Report generation port trait.

use std::path::Path;

use crate::domain::error::SmacrossError;
use crate::domain::pipeline::PipelineOutput;

/// Port for exporting the annotated series of a finished run.
pub trait ReportPort {
    fn write(&self, output: &PipelineOutput, output_path: &Path) -> Result<(), SmacrossError>;
}
