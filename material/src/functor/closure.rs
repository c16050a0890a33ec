use std::fmt;

use redlilium_core::material::MaterialPropertyFlags;

use super::{EditorContext, MaterialFunctor, RuntimeContext};

type RuntimeFn = dyn Fn(&mut RuntimeContext<'_>) + Send + Sync;
type EditorFn = dyn Fn(&mut EditorContext<'_>) + Send + Sync;

/// A functor made of closures.
///
/// ```
/// use redlilium_core::material::MaterialPropertyFlags;
/// use redlilium_material::functor::{MaterialFunctor, MaterialFunctorFn};
///
/// let functor = MaterialFunctorFn::new(MaterialPropertyFlags::new(4))
///     .with_label("twoSided")
///     .with_runtime(|context| {
///         context.set_shader_option_value("o_twoSided", true);
///     });
/// assert_eq!(functor.label(), Some("twoSided"));
/// ```
pub struct MaterialFunctorFn {
    dependencies: MaterialPropertyFlags,
    runtime: Option<Box<RuntimeFn>>,
    editor: Option<Box<EditorFn>>,
    label: Option<String>,
}

impl MaterialFunctorFn {
    pub fn new(dependencies: MaterialPropertyFlags) -> Self {
        Self {
            dependencies,
            runtime: None,
            editor: None,
            label: None,
        }
    }

    #[must_use]
    pub fn with_runtime<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut RuntimeContext<'_>) + Send + Sync + 'static,
    {
        self.runtime = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_editor<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut EditorContext<'_>) + Send + Sync + 'static,
    {
        self.editor = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl MaterialFunctor for MaterialFunctorFn {
    fn material_property_dependencies(&self) -> &MaterialPropertyFlags {
        &self.dependencies
    }

    fn process_runtime(&self, context: &mut RuntimeContext<'_>) {
        if let Some(f) = &self.runtime {
            f(context);
        }
    }

    fn process_editor(&self, context: &mut EditorContext<'_>) {
        if let Some(f) = &self.editor {
            f(context);
        }
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl fmt::Debug for MaterialFunctorFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterialFunctorFn")
            .field("label", &self.label)
            .field("dependencies", &self.dependencies)
            .field("runtime", &self.runtime.is_some())
            .field("editor", &self.editor.is_some())
            .finish()
    }
}
