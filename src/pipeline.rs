//! Two-layer embedding pipeline.
//!
//! Pass 1 hands the carrier file to the external container tool; pass 2
//! embeds a second message in-buffer, using the tool's output as its
//! carrier. The passes run strictly sequentially, and a pass-1 failure
//! aborts the run before the dependent pass produces anything.
//!
//! Extraction mirrors that: the in-buffer layer decodes the final file,
//! while the container layer must read the intermediate file — the second
//! pass rewrites the sample bits the tool stored into, so both artifacts
//! are kept.

use crate::audio;
use crate::codec::Technique;
use crate::error::Result;
use crate::external::ContainerTool;
use crate::framing::Framer;
use std::path::Path;

/// Orchestrates a container-tool pass chained with an in-buffer pass.
///
/// Built from explicit collaborators; holds no carrier state between calls.
pub struct LayeredPipeline<'a> {
    tool: &'a dyn ContainerTool,
    technique: Technique,
    framer: Framer,
}

impl<'a> LayeredPipeline<'a> {
    pub fn new(tool: &'a dyn ContainerTool, technique: Technique, framer: Framer) -> Self {
        Self {
            tool,
            technique,
            framer,
        }
    }

    /// Run both embedding passes.
    ///
    /// `intermediate` receives the container tool's output (pass 1) and is a
    /// required artifact for later extraction; `output` receives the final
    /// stego audio (pass 2).
    pub fn embed(
        &self,
        carrier: &Path,
        outer_payload: &Path,
        password: &str,
        inner_message: &[u8],
        intermediate: &Path,
        output: &Path,
    ) -> Result<()> {
        log::info!("layer 1/2: {} container embed", self.tool.name());
        self.tool
            .embed(carrier, outer_payload, intermediate, password)?;

        log::info!("layer 2/2: in-buffer embed over container output");
        let buffer = audio::read(intermediate)?;
        let bits = self.framer.encode(inner_message);
        let stego = self.technique.encode(&buffer, &bits)?;
        audio::write(output, &stego)
    }

    /// Recover both layers.
    ///
    /// Decodes the in-buffer message from `output`, then extracts the
    /// container payload from `intermediate` into `recovered_payload`.
    /// Returns the in-buffer message.
    pub fn extract(
        &self,
        output: &Path,
        intermediate: &Path,
        password: &str,
        recovered_payload: &Path,
    ) -> Result<Vec<u8>> {
        let buffer = audio::read(output)?;
        let inner = self.technique.decode(&buffer, &self.framer)?;

        self.tool.extract(intermediate, recovered_payload, password)?;
        Ok(inner)
    }
}
