use std::rc::Rc;

use ev::MouseEvent;
use leptos::{component, ev, view, IntoView, Signal, SignalGet, SignalSet};

use crate::telemetry::{snapshot::Snapshot, summary::format_value};

use super::create_chart::{create_chart, CreateChartReturn};

#[component]
pub fn Chart(#[prop(into)] snapshot: Signal<Option<Rc<Snapshot>>>) -> impl IntoView {
    let CreateChartReturn {
        canvas_node_ref,
        set_mouse_x,

        quantity,
        hovered,
        canvas_actual_width,
        canvas_actual_height,
    } = create_chart(snapshot);

    let handle_mousemove = move |evt: MouseEvent| {
        let Some(canvas_node) = canvas_node_ref.get() else {
            return;
        };

        let dom_rect = canvas_node.get_bounding_client_rect();
        set_mouse_x.set(Some(f64::from(evt.client_x()) - dom_rect.left()));
    };

    let handle_mouseleave = move |_evt: MouseEvent| {
        set_mouse_x.set(None);
    };

    move || {
        let Some(quantity) = quantity.get() else {
            return view! { <h1>"Not Found"</h1> }.into_view();
        };

        view! {
            <article>
                <header>
                    <strong>{quantity.to_string()}</strong>
                </header>
                <canvas
                    class="w-full"
                    node_ref=canvas_node_ref
                    width=canvas_actual_width
                    height=canvas_actual_height
                    style:width="100%"
                    style:height="400px"
                    on:mousemove=handle_mousemove
                    on:mouseleave=handle_mouseleave
                />
                <footer>
                    {move || {
                        hovered
                            .get()
                            .map_or_else(
                                || "Hover the chart to inspect a reading.".to_string(),
                                |hovered| {
                                    format!(
                                        "{}: {} {}",
                                        hovered.label,
                                        format_value(Some(hovered.value)),
                                        quantity.unit(),
                                    )
                                },
                            )
                    }}
                </footer>
            </article>
        }
        .into_view()
    }
}
