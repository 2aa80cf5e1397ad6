//! Render composition.
//!
//! A [`Render`] describes what a caller wants drawn this frame. The context
//! flattens it and draws every model with the standard pipeline in submission
//! order, so later entries are drawn on top of earlier ones at equal depth.

use crate::data_structures::{model::Model, sprite::Sprite};

/// Specifies what should be rendered.
///
/// # Variants
///
/// - `None` renders nothing
/// - `Model(&Model)` renders a single model
/// - `Models(Vec<&Model>)` renders a batch of models
/// - `Composed(Vec<Render>)` recursively renders a composition of renders
#[derive(Debug, Default)]
pub enum Render<'a> {
    #[default]
    None,
    Model(&'a Model),
    Models(Vec<&'a Model>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    /// The models in submission order.
    pub fn flatten(&self) -> Vec<&'a Model> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect(&self, out: &mut Vec<&'a Model>) {
        match self {
            Render::None => {}
            Render::Model(model) => out.push(model),
            Render::Models(models) => out.extend(models.iter().copied()),
            Render::Composed(renders) => renders.iter().for_each(|r| r.collect(out)),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Render::None => true,
            Render::Model(_) => false,
            Render::Models(models) => models.is_empty(),
            Render::Composed(renders) => renders.iter().all(Render::is_empty),
        }
    }
}

impl<'a> From<&'a Model> for Render<'a> {
    fn from(model: &'a Model) -> Self {
        Render::Model(model)
    }
}

impl<'a> From<&'a Sprite> for Render<'a> {
    fn from(sprite: &'a Sprite) -> Self {
        Render::Model(sprite.model())
    }
}

impl<'a> From<Vec<&'a Model>> for Render<'a> {
    fn from(models: Vec<&'a Model>) -> Self {
        Render::Models(models)
    }
}

impl<'a> From<Vec<Render<'a>>> for Render<'a> {
    fn from(renders: Vec<Render<'a>>) -> Self {
        Render::Composed(renders)
    }
}
