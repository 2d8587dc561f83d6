use leptos::{
    component, create_rw_signal, ev::MouseEvent, view, For, IntoView, RwSignal, SignalGet,
    SignalUpdate,
};
use tracing::debug;

use super::timeline::{StepState, WorkflowTimeline};

const STEPS: [(&str, &str); 6] = [
    (
        "Data collection",
        "Voltage, current and power are sampled from the pack and exported as CSV.",
    ),
    (
        "Parsing",
        "Each row becomes a labelled reading, malformed cells are kept as NaN.",
    ),
    (
        "Analytics",
        "Minimum, maximum and average voltage, average current and peak power.",
    ),
    (
        "Health scoring",
        "Voltage and current standard deviations are mapped to a 0-100 score.",
    ),
    (
        "Status classification",
        "The latest reading is checked against the critical and warning limits.",
    ),
    (
        "Visualisation",
        "Each quantity is charted against its safe, warning and critical levels.",
    ),
];

/// A fresh timeline is created every time the page is entered.
#[component]
pub fn Workflow() -> impl IntoView {
    let timeline = create_rw_signal(WorkflowTimeline::new(STEPS.len()));

    view! {
        <section class="workflow">
            <div
                class="workflow-line-progress"
                style:height=move || format!("{}px", timeline.get().progress_height())
            ></div>
            <ol>
                <For
                    each=move || STEPS.into_iter().enumerate()
                    key=|(index, _)| *index
                    children=move |(index, (title, description))| {
                        let step = index + 1;
                        view! { <WorkflowStep timeline step title description /> }
                    }
                />
            </ol>
        </section>
    }
}

#[component]
fn WorkflowStep(
    timeline: RwSignal<WorkflowTimeline>,
    step: usize,
    title: &'static str,
    description: &'static str,
) -> impl IntoView {
    let state = move || timeline.get().step_state(step);

    let handle_click = move |_evt: MouseEvent| {
        timeline.update(|timeline| {
            if timeline.reveal_after(step) {
                debug!(step = timeline.current(), "workflow step revealed");
            }
        });
    };

    view! {
        <li
            class="workflow-step"
            class:visible=move || state() != StepState::Hidden
            class:active=move || state() == StepState::Active
            class:completed=move || state() == StepState::Completed
        >
            <button
                class="workflow-node"
                on:click=handle_click
                title=move || {
                    timeline.get().can_reveal_after(step).then_some("Click to reveal next step")
                }
            >
                {step}
            </button>
            <strong>{title}</strong>
            <p>{description}</p>
        </li>
    }
}
