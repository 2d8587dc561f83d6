use std::rc::Rc;

use leptos::html::Canvas as CanvasNode;
use leptos::{create_effect, create_node_ref, create_signal, NodeRef, Signal, SignalGet, SignalSet};
use leptos_use::{use_device_pixel_ratio, use_element_size, UseElementSizeReturn};
use tracing::error;

use super::canvas::ChartCanvas;

pub struct UseChartCanvasReturn {
    pub node_ref: NodeRef<CanvasNode>,
    pub canvas: Signal<Option<Rc<ChartCanvas>>>,
    pub dpr: Signal<f64>,
    pub width: Signal<f64>,
    pub height: Signal<f64>,
    pub actual_width: Signal<f64>,
    pub actual_height: Signal<f64>,
}

/// Tracks the css and backing-store sizes of a canvas and acquires its 2d
/// context once the node is mounted.
pub fn use_chart_canvas() -> UseChartCanvasReturn {
    let node_ref = create_node_ref::<CanvasNode>();
    let dpr = use_device_pixel_ratio();
    let UseElementSizeReturn { width, height } = use_element_size(node_ref);
    let actual_width = move || width.get() * dpr.get();
    let actual_height = move || height.get() * dpr.get();

    let (canvas, set_canvas) = create_signal::<Option<Rc<ChartCanvas>>>(None);

    create_effect(move |_| {
        let Some(node) = node_ref.get() else {
            return;
        };

        match ChartCanvas::try_new(&node) {
            Ok(chart_canvas) => set_canvas.set(Some(Rc::new(chart_canvas))),
            Err(err) => error!("chart canvas failed to initialize: {err}"),
        }
    });

    UseChartCanvasReturn {
        node_ref,
        canvas: canvas.into(),
        dpr,
        width,
        height,
        actual_width: actual_width.into(),
        actual_height: actual_height.into(),
    }
}
