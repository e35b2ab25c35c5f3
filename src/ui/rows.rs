/// Entry list rows and toast stack
use patternfly_yew::prelude::*;
use uuid::Uuid;
use yew::prelude::*;

use crate::entry::{Entry, FrameState};
use crate::notify::{Level, Toasts};
use crate::selection::Direction;
use crate::workspace::Flag;

#[derive(Properties, PartialEq)]
pub struct EntryRowProps {
    pub index: usize,
    pub entry: Entry,
    pub selected: bool,
    pub is_first: bool,
    pub is_last: bool,
    /// (index, multi-select)
    pub on_select: Callback<(usize, bool)>,
    pub on_toggle: Callback<(usize, Flag)>,
    pub on_move: Callback<(usize, Direction)>,
    pub on_delete: Callback<usize>,
}

fn status(state: FrameState) -> (&'static str, &'static str) {
    match state {
        FrameState::NoFrame => ("status-disabled", "Disabled"),
        FrameState::FrameHidden => ("status-hidden", "Hidden"),
        FrameState::FrameVisibleInactive => ("status-loaded", "Loaded"),
        FrameState::FrameActive => ("status-active", "Active"),
    }
}

#[function_component(EntryRow)]
pub fn entry_row(props: &EntryRowProps) -> Html {
    let index = props.index;
    let entry = &props.entry;
    let (status_class, status_label) = status(entry.frame_state());

    let on_row_click = props
        .on_select
        .reform(move |e: MouseEvent| (index, e.ctrl_key() || e.meta_key()));

    // Controls inside the row must not also select it
    let on_flag = |flag: Flag| {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_toggle.emit((index, flag));
        })
    };
    let on_move = |direction: Direction| {
        let on_move = props.on_move.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_move.emit((index, direction));
        })
    };
    let on_delete = {
        let on_delete = props.on_delete.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_delete.emit(index);
        })
    };

    html! {
        <div
            class={classes!("app-item", props.selected.then_some("selected"), (!entry.enabled).then_some("disabled"))}
            onclick={on_row_click}
        >
            <div class="app-toggles">
                <label title="Visible">
                    <input type="checkbox" checked={entry.visible} onclick={on_flag(Flag::Visible)} />
                </label>
                <label title="Enabled">
                    <input type="checkbox" checked={entry.enabled} onclick={on_flag(Flag::Enabled)} />
                </label>
            </div>
            <div class="app-info">
                <span class={classes!("app-status", status_class)} title={status_label}></span>
                <span class="app-title">{&entry.title}</span>
                <span class="app-url">{&entry.address}</span>
            </div>
            <div class="app-actions">
                <Button onclick={on_move(Direction::Up)} variant={ButtonVariant::Plain} disabled={props.is_first}>
                    {"▲"}
                </Button>
                <Button onclick={on_move(Direction::Down)} variant={ButtonVariant::Plain} disabled={props.is_last}>
                    {"▼"}
                </Button>
                <Button onclick={on_delete} variant={ButtonVariant::Danger}>
                    {"✕"}
                </Button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub toasts: Toasts,
    pub on_dismiss: Callback<Uuid>,
}

fn alert_type(level: Level) -> AlertType {
    match level {
        Level::Success => AlertType::Success,
        Level::Error => AlertType::Danger,
        Level::Warning => AlertType::Warning,
        Level::Info => AlertType::Info,
    }
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="toast-container">
            {for props.toasts.iter().map(|toast| {
                let id = toast.id;
                html! {
                    <div key={id.to_string()} class="toast" onclick={props.on_dismiss.reform(move |_| id)}>
                        <Alert
                            r#type={alert_type(toast.notification.level)}
                            title={toast.notification.message.clone()}
                            inline={true}
                        >
                        </Alert>
                    </div>
                }
            })}
        </div>
    }
}
