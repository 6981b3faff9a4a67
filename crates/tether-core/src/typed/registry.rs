//! WorkRegistry - maps a job class discriminator to its payload.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::JobClass;

use super::work::Work;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("work for job class '{0}' is already registered")]
    AlreadyRegistered(JobClass),

    #[error("no work registered for job class '{0}'")]
    UnknownClass(JobClass),
}

/// Registry of payloads, keyed by the `klass` discriminator carried in job
/// records.
#[derive(Default, Clone)]
pub struct WorkRegistry {
    works: HashMap<JobClass, Arc<dyn Work>>,
}

impl WorkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<W: Work + 'static>(
        &mut self,
        klass: impl Into<JobClass>,
        work: W,
    ) -> Result<(), RegistryError> {
        let klass = klass.into();
        if self.works.contains_key(&klass) {
            return Err(RegistryError::AlreadyRegistered(klass));
        }
        self.works.insert(klass, Arc::new(work));
        Ok(())
    }

    pub fn get(&self, klass: &JobClass) -> Result<Arc<dyn Work>, RegistryError> {
        self.works
            .get(klass)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownClass(klass.clone()))
    }

    pub fn contains(&self, klass: &JobClass) -> bool {
        self.works.contains_key(klass)
    }

    /// Registered classes, sorted.
    pub fn registered_classes(&self) -> Vec<JobClass> {
        let mut classes: Vec<JobClass> = self.works.keys().cloned().collect();
        classes.sort();
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::NoopWork;

    #[test]
    fn register_then_get() {
        let mut registry = WorkRegistry::new();
        registry.register("FetchJob", NoopWork).unwrap();

        assert!(registry.get(&JobClass::new("FetchJob")).is_ok());
        assert!(registry.contains(&JobClass::new("FetchJob")));
    }

    #[test]
    fn double_registration_is_rejected() {
        let mut registry = WorkRegistry::new();
        registry.register("FetchJob", NoopWork).unwrap();

        let result = registry.register("FetchJob", NoopWork);
        assert!(matches!(result, Err(RegistryError::AlreadyRegistered(_))));
    }

    #[test]
    fn unknown_class_is_reported() {
        let registry = WorkRegistry::new();
        let result = registry.get(&JobClass::new("Missing"));
        assert!(matches!(result, Err(RegistryError::UnknownClass(k)) if k.as_str() == "Missing"));
    }

    #[test]
    fn registered_classes_are_sorted() {
        let mut registry = WorkRegistry::new();
        registry.register("b", NoopWork).unwrap();
        registry.register("a", NoopWork).unwrap();

        assert_eq!(
            registry.registered_classes(),
            vec![JobClass::new("a"), JobClass::new("b")]
        );
    }
}
