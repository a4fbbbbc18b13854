use std::collections::VecDeque;

use crate::{
    compose::svg::compose,
    foundation::core::Size,
    foundation::error::MeshResult,
    foundation::rng::Rng64,
    raster::bridge::{PreviewOutcome, RasterBridge, RasterOpts},
    raster::encode::{ExportFormat, encode_surface},
    raster::surface::Surface,
    scene::model::SceneDocument,
};

/// Options controlling an [`Editor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditorOpts {
    /// Maximum number of undo snapshots kept. Oldest snapshots are dropped first.
    pub history_capacity: usize,
    /// Seed for every stochastic operation the editor runs.
    pub seed: u64,
    /// Raster bridge options used by preview and export.
    pub raster: RasterOpts,
}

impl Default for EditorOpts {
    fn default() -> Self {
        Self {
            history_capacity: 50,
            seed: 0x6d65_7368,
            raster: RasterOpts::default(),
        }
    }
}

/// Application-edge owner of one Scene Document.
///
/// Every committed change snapshots the whole previous document onto a bounded undo stack.
/// Mutations run on a working copy, so a failed edit is never observable.
#[derive(Clone, Debug)]
pub struct Editor {
    doc: SceneDocument,
    rng: Rng64,
    undo: VecDeque<SceneDocument>,
    redo: Vec<SceneDocument>,
    bridge: RasterBridge,
    opts: EditorOpts,
}

impl Editor {
    /// Take ownership of a validated document.
    pub fn new(doc: SceneDocument, opts: EditorOpts) -> MeshResult<Self> {
        doc.validate()?;
        Ok(Self {
            doc,
            rng: Rng64::new(opts.seed),
            undo: VecDeque::new(),
            redo: Vec::new(),
            bridge: RasterBridge::new(opts.raster),
            opts,
        })
    }

    /// Start from a built-in preset, generating its shapes with the editor seed.
    pub fn from_preset(name: &str, opts: EditorOpts) -> MeshResult<Self> {
        let mut rng = Rng64::new(opts.seed);
        let doc = SceneDocument::from_preset(name, &mut rng)?;
        let mut editor = Self::new(doc, opts)?;
        editor.rng = rng;
        Ok(editor)
    }

    /// Current document.
    pub fn doc(&self) -> &SceneDocument {
        &self.doc
    }

    /// Give up the editor and keep the document.
    pub fn into_doc(self) -> SceneDocument {
        self.doc
    }

    /// Options in use.
    pub fn opts(&self) -> &EditorOpts {
        &self.opts
    }

    /// Apply `f` to a working copy and commit it if `f` succeeds.
    ///
    /// On error the document and history are untouched. A successful edit that changes nothing
    /// records no snapshot.
    pub fn edit<T>(
        &mut self,
        f: impl FnOnce(&mut SceneDocument) -> MeshResult<T>,
    ) -> MeshResult<T> {
        let mut next = self.doc.clone();
        let out = f(&mut next)?;
        self.commit(next);
        Ok(out)
    }

    /// Replace all shapes with a fresh mesh for the current palette and spread.
    pub fn regenerate(&mut self) {
        let mut next = self.doc.clone();
        next.regenerate(&mut self.rng);
        self.commit(next);
    }

    /// Nudge all shapes by one shared random offset, clamped to the canvas.
    pub fn randomize(&mut self) {
        let mut next = self.doc.clone();
        next.randomize(&mut self.rng);
        self.commit(next);
    }

    /// Resize the palette and regenerate shapes for it, as one undo step.
    pub fn set_palette_size(&mut self, n: usize) {
        let mut next = self.doc.clone();
        next.set_palette_size(n);
        next.regenerate(&mut self.rng);
        self.commit(next);
    }

    /// Reorder the palette. Shapes keep their indices.
    pub fn shuffle_palette(&mut self) {
        let mut next = self.doc.clone();
        next.shuffle_palette(&mut self.rng);
        self.commit(next);
    }

    /// Step back one snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(std::mem::replace(&mut self.doc, prev));
        true
    }

    /// Re-apply the last undone snapshot. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let prev = std::mem::replace(&mut self.doc, next);
        self.push_undo(prev);
        true
    }

    /// Number of snapshots available to [`Editor::undo`].
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of snapshots available to [`Editor::redo`].
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Compose at the surface size and draw through the preview cache.
    pub fn preview(&self, surface: &mut Surface) -> PreviewOutcome {
        let markup = compose(&self.doc, Some(surface.size()));
        self.bridge.render_preview(&markup, surface)
    }

    /// Render a fresh, uncached image and encode it.
    ///
    /// `output_size` defaults to the logical canvas size.
    #[tracing::instrument(skip(self))]
    pub fn export(&self, output_size: Option<Size>, format: ExportFormat) -> MeshResult<Vec<u8>> {
        let size = output_size.unwrap_or(self.doc.canvas.size());
        let markup = compose(&self.doc, Some(size));
        let mut surface = Surface::with_size(size)?;
        self.bridge.render_export(&markup, &mut surface)?;
        encode_surface(&surface, format)
    }

    fn commit(&mut self, next: SceneDocument) {
        if next == self.doc {
            return;
        }
        let prev = std::mem::replace(&mut self.doc, next);
        self.push_undo(prev);
        self.redo.clear();
        tracing::debug!(undo = self.undo.len(), "committed scene snapshot");
    }

    fn push_undo(&mut self, doc: SceneDocument) {
        self.undo.push_back(doc);
        while self.undo.len() > self.opts.history_capacity {
            self.undo.pop_front();
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/editor.rs"]
mod tests;
