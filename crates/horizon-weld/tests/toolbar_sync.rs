//! End-to-end tests driving the public API against the headless host.

use std::sync::Arc;

use parking_lot::Mutex;

use horizon_weld::WeldError;
use horizon_weld::native::comctl;
use horizon_weld::native::headless::{CreatedToolBar, HeadlessContainer};
use horizon_weld::native::{ButtonState, ButtonStyle, Notification, WindowMessage};
use horizon_weld::widget::{Action, ToolBar};

fn horizontal() -> (ToolBar, CreatedToolBar) {
    let parent = HeadlessContainer::new();
    let tool_bar = ToolBar::new(&parent).unwrap();
    let created = parent.last_created().unwrap();
    (tool_bar, created)
}

#[test]
fn two_plain_actions_then_clear() {
    // Two actions with no image on a horizontal bar, then a clear sweep.
    let (tool_bar, created) = horizontal();

    tool_bar.actions().add(Arc::new(Action::new("A"))).unwrap();
    tool_bar.actions().add(Arc::new(Action::new("B"))).unwrap();

    let buttons = created.control.buttons();
    assert_eq!(buttons.len(), 2);
    for button in &buttons {
        assert_eq!(button.image, -1);
        assert!(button.style.contains(ButtonStyle::AUTOSIZE));
        assert!(!button.state.contains(ButtonState::WRAP));
    }
    assert_eq!(buttons[0].id_command, 1);
    assert_eq!(buttons[1].id_command, 2);

    tool_bar.actions().clear().unwrap();

    assert_eq!(
        created.control.command_names(),
        vec![
            "TB_BUTTONSTRUCTSIZE",
            "TB_INSERTBUTTON",
            "TB_AUTOSIZE",
            "TB_BUTTONSTRUCTSIZE",
            "TB_INSERTBUTTON",
            "TB_AUTOSIZE",
            "TB_DELETEBUTTON",
            "TB_DELETEBUTTON",
        ]
    );

    let deletes: Vec<Option<usize>> = created
        .control
        .commands()
        .iter()
        .filter(|record| record.name == "TB_DELETEBUTTON")
        .map(|record| record.index)
        .collect();
    assert_eq!(deletes, vec![Some(1), Some(0)]);
}

#[test]
fn width_limit_rejection_leaves_stored_limits() {
    let (mut tool_bar, created) = horizontal();
    tool_bar.set_button_width_limits(10, 50).unwrap();

    created.control.reject_next("TB_SETBUTTONWIDTH");
    let err = tool_bar.set_button_width_limits(20, 60).unwrap_err();
    assert!(matches!(err, WeldError::CommandRejected(_)));
    assert_eq!(tool_bar.button_width_limits(), (10, 50));
    assert_eq!(created.control.button_width(), Some((10, 50)));
}

#[test]
fn button_array_stays_isomorphic_through_a_session() {
    let (tool_bar, created) = horizontal();
    let actions = tool_bar.actions();

    let open = Arc::new(Action::new("Open"));
    let save = Arc::new(Action::new("Save"));
    let bold = Arc::new(Action::new("Bold").with_checkable(true));

    actions.add(open.clone()).unwrap();
    actions.add(save.clone()).unwrap();
    actions.insert(1, bold.clone()).unwrap();
    assert_eq!(created.control.buttons().len(), 3);
    assert_eq!(created.control.buttons()[1].text, "Bold");

    bold.set_checked(true).unwrap();
    assert!(created.control.buttons()[1].state.contains(ButtonState::CHECKED));

    actions.remove(&open).unwrap();
    assert_eq!(created.control.buttons().len(), 2);
    assert_eq!(created.control.buttons()[0].text, "Bold");

    actions.clear().unwrap();
    assert!(created.control.buttons().is_empty());
    assert!(actions.is_empty());

    // A fresh insert after the clear starts a new button array.
    actions.add(save).unwrap();
    assert_eq!(created.control.buttons().len(), 1);
    assert_eq!(created.control.buttons()[0].text, "Save");
}

#[test]
fn one_action_shared_by_two_toolbars() {
    let parent = HeadlessContainer::new();
    let first = ToolBar::new(&parent).unwrap();
    let first_created = parent.last_created().unwrap();
    let second = ToolBar::vertical(&parent).unwrap();
    let second_created = parent.last_created().unwrap();

    let action = Arc::new(Action::new("Shared"));
    first.actions().add(action.clone()).unwrap();
    second.actions().add(action.clone()).unwrap();

    // One change fans out to both controls.
    action.set_enabled(false).unwrap();
    assert!(!first_created.control.buttons()[0].state.contains(ButtonState::ENABLED));
    assert!(!second_created.control.buttons()[0].state.contains(ButtonState::ENABLED));

    // Removing from one toolbar leaves the other subscribed.
    first.actions().remove(&action).unwrap();
    action.set_enabled(true).unwrap();
    assert!(second_created.control.buttons()[0].state.contains(ButtonState::ENABLED));
    assert!(first_created.control.buttons().is_empty());
}

#[test]
fn clicks_route_per_toolbar() {
    let parent = HeadlessContainer::new();
    let first = ToolBar::new(&parent).unwrap();
    let first_created = parent.last_created().unwrap();
    let second = ToolBar::new(&parent).unwrap();
    let second_created = parent.last_created().unwrap();

    let fired = Arc::new(Mutex::new(Vec::new()));

    for (tool_bar, label) in [(&first, "first"), (&second, "second")] {
        let action = Arc::new(Action::new(label));
        let fired_clone = fired.clone();
        action.triggered.connect(move |_| {
            fired_clone.lock().push(label);
        });
        tool_bar.actions().add(action).unwrap();
    }

    let click_first = WindowMessage::Notify(Notification {
        code: comctl::NM_CLICK,
        item: first_created.control.buttons()[0].id_command as usize,
    });
    first.window_proc(&click_first);

    let click_second = WindowMessage::Notify(Notification {
        code: comctl::NM_CLICK,
        item: second_created.control.buttons()[0].id_command as usize,
    });
    second.window_proc(&click_second);

    assert_eq!(*fired.lock(), vec!["first", "second"]);
}

#[test]
fn checkable_click_cycle_keeps_model_authoritative() {
    let (tool_bar, created) = horizontal();
    let bold = Arc::new(Action::new("Bold").with_checkable(true));

    // The application flips the checked state in response to the trigger;
    // the toolbar pushes it back into the native button.
    let bold_for_handler = Arc::downgrade(&bold);
    bold.triggered.connect(move |&checked| {
        if let Some(bold) = bold_for_handler.upgrade() {
            bold.set_checked(!checked).unwrap();
        }
    });
    tool_bar.actions().add(bold.clone()).unwrap();

    let click = WindowMessage::Notify(Notification {
        code: comctl::NM_CLICK,
        item: created.control.buttons()[0].id_command as usize,
    });

    tool_bar.window_proc(&click);
    assert!(bold.is_checked());
    assert!(created.control.buttons()[0].state.contains(ButtonState::CHECKED));

    tool_bar.window_proc(&click);
    assert!(!bold.is_checked());
    assert!(!created.control.buttons()[0].state.contains(ButtonState::CHECKED));
}
