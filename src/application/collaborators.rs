//! Startup collaborators
//!
//! Components that start after the first navigation and then follow every
//! screen change. Each entry is tracked separately so one can be retried or
//! disabled without touching the others.

use crate::domain::repositories::StoryCatalog;
use crate::story::StoryRuntime;
use crate::types::event::ScreenChange;
use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

#[async_trait(?Send)]
pub trait Collaborator {
    fn name(&self) -> &str;

    /// One-time startup; an error marks the collaborator as failed
    async fn start(&self) -> anyhow::Result<()>;

    /// Called for every completed navigation while active
    async fn on_transition(&self, _change: &ScreenChange) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorStatus {
    Pending,
    Active,
    Failed(String),
    Disabled,
}

struct Entry {
    collaborator: Rc<dyn Collaborator>,
    status: RefCell<CollaboratorStatus>,
}

impl Entry {
    fn status(&self) -> CollaboratorStatus {
        self.status.borrow().clone()
    }

    fn set_status(&self, status: CollaboratorStatus) {
        *self.status.borrow_mut() = status;
    }
}

#[derive(Default)]
pub struct CollaboratorRegistry {
    entries: Vec<Entry>,
}

impl CollaboratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, collaborator: Rc<dyn Collaborator>) {
        self.entries.push(Entry {
            collaborator,
            status: RefCell::new(CollaboratorStatus::Pending),
        });
    }

    /// Start every pending collaborator; returns how many failed
    pub async fn start_all(&self) -> usize {
        let mut failed = 0;
        for entry in &self.entries {
            if entry.status() != CollaboratorStatus::Pending {
                continue;
            }
            let status = start_entry(entry.collaborator.as_ref()).await;
            if matches!(status, CollaboratorStatus::Failed(_)) {
                failed += 1;
            }
            entry.set_status(status);
        }
        failed
    }

    /// Start a failed or pending collaborator again
    pub async fn retry(&self, name: &str) -> Option<CollaboratorStatus> {
        let entry = self.find(name)?;
        if matches!(
            entry.status(),
            CollaboratorStatus::Pending | CollaboratorStatus::Failed(_)
        ) {
            let status = start_entry(entry.collaborator.as_ref()).await;
            entry.set_status(status);
        }
        Some(entry.status())
    }

    /// Stop delivering transitions to a collaborator
    pub fn disable(&self, name: &str) -> bool {
        match self.find(name) {
            Some(entry) => {
                entry.set_status(CollaboratorStatus::Disabled);
                log::info!("[boot] disabled {}", name);
                true
            }
            None => false,
        }
    }

    pub fn status(&self, name: &str) -> Option<CollaboratorStatus> {
        self.find(name).map(Entry::status)
    }

    /// Forward a transition to every active collaborator, in registration order
    pub async fn notify(&self, change: &ScreenChange) {
        for entry in &self.entries {
            if entry.status() == CollaboratorStatus::Active {
                entry.collaborator.on_transition(change).await;
            }
        }
    }

    fn find(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.collaborator.name() == name)
    }
}

async fn start_entry(collaborator: &dyn Collaborator) -> CollaboratorStatus {
    match collaborator.start().await {
        Ok(()) => {
            log::debug!("[boot] started {}", collaborator.name());
            CollaboratorStatus::Active
        }
        Err(e) => {
            log::warn!("[boot] {} failed to start: {:#}", collaborator.name(), e);
            CollaboratorStatus::Failed(e.to_string())
        }
    }
}

/// Warms the story catalog
pub struct CatalogPreloader {
    catalog: Arc<dyn StoryCatalog>,
}

impl CatalogPreloader {
    pub fn new(catalog: Arc<dyn StoryCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait(?Send)]
impl Collaborator for CatalogPreloader {
    fn name(&self) -> &str {
        "catalog"
    }

    async fn start(&self) -> anyhow::Result<()> {
        self.catalog.preload().await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl Collaborator for StoryRuntime {
    fn name(&self) -> &str {
        "story"
    }

    async fn start(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn on_transition(&self, change: &ScreenChange) {
        self.on_screen_change(change).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Flaky {
        failures_left: Cell<u32>,
        seen: RefCell<Vec<String>>,
    }

    impl Flaky {
        fn new(failures: u32) -> Rc<Self> {
            Rc::new(Self {
                failures_left: Cell::new(failures),
                seen: RefCell::new(Vec::new()),
            })
        }
    }

    #[async_trait(?Send)]
    impl Collaborator for Flaky {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn start(&self) -> anyhow::Result<()> {
            let left = self.failures_left.get();
            if left > 0 {
                self.failures_left.set(left - 1);
                anyhow::bail!("not yet");
            }
            Ok(())
        }

        async fn on_transition(&self, change: &ScreenChange) {
            self.seen.borrow_mut().push(change.screen.to_string());
        }
    }

    fn change(screen: &str) -> ScreenChange {
        ScreenChange {
            screen: screen.into(),
            generation: 1,
        }
    }

    #[tokio::test]
    async fn failed_collaborator_can_be_retried() {
        let flaky = Flaky::new(1);
        let mut registry = CollaboratorRegistry::new();
        registry.register(flaky.clone());

        assert_eq!(registry.start_all().await, 1);
        assert_eq!(
            registry.status("flaky"),
            Some(CollaboratorStatus::Failed("not yet".to_string()))
        );

        registry.notify(&change("menu")).await;
        assert!(flaky.seen.borrow().is_empty());

        assert_eq!(registry.retry("flaky").await, Some(CollaboratorStatus::Active));
        registry.notify(&change("menu")).await;
        assert_eq!(*flaky.seen.borrow(), vec!["menu"]);
    }

    #[tokio::test]
    async fn disabled_collaborator_stops_receiving_transitions() {
        let flaky = Flaky::new(0);
        let mut registry = CollaboratorRegistry::new();
        registry.register(flaky.clone());
        registry.start_all().await;

        assert!(registry.disable("flaky"));
        assert!(!registry.disable("missing"));
        registry.notify(&change("menu")).await;
        assert!(flaky.seen.borrow().is_empty());
        assert_eq!(registry.retry("flaky").await, Some(CollaboratorStatus::Disabled));
        assert_eq!(registry.retry("missing").await, None);
    }
}
