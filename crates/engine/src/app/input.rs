#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

const ACTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub(crate) fn clear(&mut self) {
        self.down = [false; ACTION_COUNT];
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
        }
    }
}

/// Per-tick view of the input devices: held movement plus one-shot edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    actions: ActionStates,
    interact_pressed: bool,
    cancel_pressed: bool,
    zoom_delta_steps: i32,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_action_down(mut self, action: InputAction) -> Self {
        self.actions.set(action, true);
        self
    }

    pub fn with_interact_pressed(mut self) -> Self {
        self.interact_pressed = true;
        self
    }

    pub fn with_cancel_pressed(mut self) -> Self {
        self.cancel_pressed = true;
        self
    }

    pub fn with_zoom_delta_steps(mut self, steps: i32) -> Self {
        self.zoom_delta_steps = steps;
        self
    }

    pub(crate) fn new(
        actions: ActionStates,
        interact_pressed: bool,
        cancel_pressed: bool,
        zoom_delta_steps: i32,
    ) -> Self {
        Self {
            actions,
            interact_pressed,
            cancel_pressed,
            zoom_delta_steps,
        }
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn interact_pressed(&self) -> bool {
        self.interact_pressed
    }

    pub fn cancel_pressed(&self) -> bool {
        self.cancel_pressed
    }

    pub fn zoom_delta_steps(&self) -> i32 {
        self.zoom_delta_steps
    }
}
