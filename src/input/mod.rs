//! Pointer input routing for interactive regions

use crate::domain::value_objects::ScreenId;
use crate::navigation::NavigationController;
use crate::types::event::{PointerEvent, PointerKind};
use std::rc::Rc;

/// The only action regions currently perform
pub const GO_ACTION: &str = "go";

/// What happened to a pointer event
#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    /// Not an activation, or no region under the pointer
    Ignored,
    /// A `go` region was activated; carries the screen that became active
    Navigated(Option<ScreenId>),
    /// A region was hit but its action is not understood
    Unhandled {
        action: String,
        arg: Option<String>,
    },
}

/// Routes pointer-up and click events on the active screen's regions
pub struct InputDispatcher {
    navigation: Rc<NavigationController>,
}

impl InputDispatcher {
    pub fn new(navigation: Rc<NavigationController>) -> Self {
        Self { navigation }
    }

    /// Handle one pointer event; hits on a region always suppress default handling
    pub async fn dispatch(&self, event: &mut PointerEvent) -> InputOutcome {
        if !matches!(event.kind, PointerKind::Up | PointerKind::Click) {
            return InputOutcome::Ignored;
        }

        let hit = {
            let stage = self.navigation.stage().borrow();
            stage
                .region_at(event.x, event.y)
                .map(|region| (region.action.clone(), region.arg.clone()))
        };
        let Some((action, arg)) = hit else {
            return InputOutcome::Ignored;
        };
        event.prevent_default();

        let action = action
            .map(|a| a.trim().to_lowercase())
            .unwrap_or_default();
        let arg = arg
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        if action == GO_ACTION
            && let Some(target) = &arg
        {
            log::debug!("[input] go {}", target);
            return InputOutcome::Navigated(self.navigation.follow(target).await);
        }

        log::warn!("[input] unhandled action {:?} ({:?})", action, arg);
        InputOutcome::Unhandled { action, arg }
    }
}
