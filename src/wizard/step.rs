use std::fmt;
use std::sync::Arc;

/// Step-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

type ValidatorCallback<D> = dyn Fn(&D) -> Result<(), ValidationError> + Send + Sync;
type RendererCallback<D> = dyn Fn(&D) -> Vec<String> + Send + Sync;

/// Pure predicate deciding whether a step may be left in the forward direction.
pub struct StepValidator<D> {
    check: Arc<ValidatorCallback<D>>,
}

impl<D> Clone for StepValidator<D> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
        }
    }
}

impl<D: 'static> StepValidator<D> {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&D) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// Validator that accepts any form state.
    pub fn always() -> Self {
        Self::new(|_| Ok(()))
    }
}

impl<D> StepValidator<D> {
    pub fn check(&self, data: &D) -> Result<(), ValidationError> {
        (self.check)(data)
    }

    pub fn is_valid(&self, data: &D) -> bool {
        self.check(data).is_ok()
    }
}

/// Rendered content of the visible step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub index: usize,
    pub key: &'static str,
    pub title: &'static str,
    pub lines: Vec<String>,
}

/// Declarative description of a single wizard step.
pub struct StepDescriptor<D> {
    pub index: usize,
    pub key: &'static str,
    pub title: &'static str,
    pub validator: StepValidator<D>,
    renderer: Option<Arc<RendererCallback<D>>>,
}

impl<D: 'static> StepDescriptor<D> {
    pub fn new(key: &'static str, title: &'static str) -> Self {
        Self {
            index: 0,
            key,
            title,
            validator: StepValidator::always(),
            renderer: None,
        }
    }

    pub fn with_validator<F>(mut self, check: F) -> Self
    where
        F: Fn(&D) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.validator = StepValidator::new(check);
        self
    }

    pub fn with_renderer<F>(mut self, render: F) -> Self
    where
        F: Fn(&D) -> Vec<String> + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(render));
        self
    }
}

impl<D> StepDescriptor<D> {
    pub fn render(&self, data: &D) -> StepView {
        StepView {
            index: self.index,
            key: self.key,
            title: self.title,
            lines: self
                .renderer
                .as_ref()
                .map(|render| render(data))
                .unwrap_or_default(),
        }
    }
}

impl<D> fmt::Debug for StepDescriptor<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDescriptor")
            .field("index", &self.index)
            .field("key", &self.key)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}
