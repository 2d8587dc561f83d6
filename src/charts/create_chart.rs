use std::rc::Rc;

use leptos::{
    create_effect, create_memo, create_signal, html::Canvas, NodeRef, Params, Signal, SignalGet,
    SignalWith, WriteSignal,
};
use leptos_router::{use_params, Params};

use crate::telemetry::snapshot::Snapshot;

use super::{
    canvas::PlotArea,
    types::{ChartPayload, Quantity},
    use_canvas::{use_chart_canvas, UseChartCanvasReturn},
};

#[derive(Debug, Clone, PartialEq)]
pub struct HoveredReading {
    pub label: String,
    pub value: f64,
}

pub struct CreateChartReturn {
    pub canvas_node_ref: NodeRef<Canvas>,
    pub set_mouse_x: WriteSignal<Option<f64>>,

    pub quantity: Signal<Option<Quantity>>,
    pub hovered: Signal<Option<HoveredReading>>,
    pub canvas_actual_width: Signal<f64>,
    pub canvas_actual_height: Signal<f64>,
}

pub fn create_chart(snapshot: Signal<Option<Rc<Snapshot>>>) -> CreateChartReturn {
    let quantity = use_params_quantity();

    let UseChartCanvasReturn {
        node_ref: canvas_node_ref,
        canvas,
        dpr,
        width: canvas_width,
        height: canvas_height,
        actual_width: canvas_actual_width,
        actual_height: canvas_actual_height,
    } = use_chart_canvas();

    let (mouse_x, set_mouse_x) = create_signal::<Option<f64>>(None);

    let payload = create_memo(move |_| {
        let quantity = quantity.get()?;
        snapshot.with(|snapshot| {
            snapshot
                .as_ref()
                .map(|snapshot| snapshot.chart(quantity).clone())
        })
    });

    let hovered_index = create_memo(move |_| {
        let mouse_x = mouse_x.get()?;
        let len = payload.with(|payload| payload.as_ref().map(|payload| payload.labels.len()))?;
        PlotArea::new(canvas_width.get(), canvas_height.get()).x_to_index(mouse_x, len)
    });

    let hovered = create_memo(move |_| {
        let index = hovered_index.get()?;
        payload.with(|payload| hovered_reading(payload.as_ref()?, index))
    });

    create_effect(move |_| {
        let Some(canvas) = canvas.get() else {
            return;
        };

        let width = canvas_width.get();
        let height = canvas_height.get();
        let dpr = dpr.get();
        let hovered_index = hovered_index.get();

        payload.with(|payload| {
            if let Some(payload) = payload {
                canvas.render(payload, width, height, dpr, hovered_index);
            }
        });
    });

    CreateChartReturn {
        canvas_node_ref,
        set_mouse_x,

        quantity,
        hovered: hovered.into(),
        canvas_actual_width,
        canvas_actual_height,
    }
}

#[derive(Params, PartialEq)]
struct ChartParams {
    quantity: Option<Quantity>,
}

fn use_params_quantity() -> Signal<Option<Quantity>> {
    let params = use_params::<ChartParams>();
    let quantity = move || {
        params.with(|params| {
            params
                .as_ref()
                .ok()
                .and_then(|params| params.quantity)
        })
    };
    quantity.into()
}

fn hovered_reading(payload: &ChartPayload, index: usize) -> Option<HoveredReading> {
    Some(HoveredReading {
        label: payload.labels.get(index)?.clone(),
        value: *payload.live.values.get(index)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::build_chart;
    use crate::telemetry::parser::parse_csv;

    #[test]
    fn hovered_reading_of_live_series() {
        let dataset = parse_csv("time,voltage,current,power\nt0,3.9,7.0,27.3\nt1,3.85,7.2,27.7\n");
        let payload = build_chart(Quantity::Power, &dataset);

        let hovered = hovered_reading(&payload, 1).unwrap();
        assert_eq!(hovered.label, "t1");
        assert!((hovered.value - 27.7).abs() < f64::EPSILON);
        assert_eq!(hovered_reading(&payload, 2), None);
    }
}
