//! One persona editing session
//!
//! A session owns the current form and the card rendered from it. Editing
//! the form does not touch the card; only [`Session::render`] (or
//! [`Session::randomize`]) replaces it.

use std::path::PathBuf;

use rand::Rng;
use tracing::debug;

use crate::export::{ExportError, Exporter, Rasterizer};
use crate::persona::{random_persona, FormUpdate, PersonaForm};
use crate::renderer::RenderedPersonaImage;
use crate::{render_image, RenderConfig};

/// Current form plus the last rendered card
#[derive(Debug, Clone, Default)]
pub struct Session {
    form: PersonaForm,
    image: Option<RenderedPersonaImage>,
    config: RenderConfig,
}

impl Session {
    /// Start a session with a default form and no rendered card
    pub fn new(config: RenderConfig) -> Self {
        Self {
            form: PersonaForm::default(),
            image: None,
            config,
        }
    }

    /// Current form
    pub fn form(&self) -> &PersonaForm {
        &self.form
    }

    /// Last rendered card, if any
    pub fn image(&self) -> Option<&RenderedPersonaImage> {
        self.image.as_ref()
    }

    /// Apply one edit to the form
    pub fn update(&mut self, update: FormUpdate) {
        debug!(?update, "form update");
        self.form = std::mem::take(&mut self.form).apply(update);
    }

    /// Replace the whole form
    pub fn replace_form(&mut self, form: PersonaForm) {
        self.form = form;
    }

    /// Render the current form, replacing the previous card
    pub fn render(&mut self) -> &RenderedPersonaImage {
        self.image.insert(render_image(&self.form, &self.config))
    }

    /// Replace the form with a random example persona and render it
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &RenderedPersonaImage {
        self.form = random_persona(rng);
        self.render()
    }

    /// Export the last rendered card as SVG
    pub fn export_svg<R: Rasterizer>(
        &self,
        exporter: &mut Exporter<R>,
    ) -> Result<Option<PathBuf>, ExportError> {
        exporter.export_svg(self.image.as_ref(), &self.form.name)
    }

    /// Export the last rendered card as PNG
    pub fn export_png<R: Rasterizer>(
        &self,
        exporter: &mut Exporter<R>,
    ) -> Result<Option<PathBuf>, ExportError> {
        exporter.export_png(self.image.as_ref(), &self.form.name)
    }
}
