use std::fmt;

use tweenline_animation::TweenSpec;

use crate::operation::{Operation, OperationCore, OperationKind};

enum Action {
    Once(Box<dyn FnMut()>),
    Progress(Box<dyn FnMut(f32)>),
}

/// Operation that runs a closure, either once or every tick over a duration.
pub struct LambdaOperation {
    core: OperationCore,
    action: Action,
}

impl LambdaOperation {
    /// Run `action` once on the first tick, then expire.
    pub fn once(action: impl FnMut() + 'static) -> Self {
        Self {
            core: OperationCore::without_default_expiration(),
            action: Action::Once(Box::new(action)),
        }
    }

    /// Call `action` with the eased progress on every tick for the length of
    /// `spec`.
    pub fn over(spec: TweenSpec, action: impl FnMut(f32) + 'static) -> Self {
        Self {
            core: OperationCore::new().with_spec(&spec),
            action: Action::Progress(Box::new(action)),
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.core.set_delay(delay);
        self
    }
}

impl Operation for LambdaOperation {
    fn core(&self) -> &OperationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut OperationCore {
        &mut self.core
    }

    fn kind(&self) -> OperationKind {
        OperationKind::Lambda
    }

    fn on_tick(&mut self) {
        match &mut self.action {
            Action::Once(action) => {
                action();
                self.core.stop();
            }
            Action::Progress(action) => action(self.core.eased_progress()),
        }
    }
}

impl fmt::Debug for LambdaOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.action {
            Action::Once(_) => "once",
            Action::Progress(_) => "progress",
        };
        f.debug_struct("LambdaOperation")
            .field("action", &action)
            .field("core", &self.core)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/lambda_tests.rs"]
mod tests;
