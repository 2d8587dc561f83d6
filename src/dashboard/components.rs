use std::rc::Rc;

use leptos::{component, view, IntoView, Signal, SignalGet, SignalWith};

use crate::{
    components::{Pill, Spinner},
    datetime::display_loaded_at,
    request::{csv_href, CSV_PATH},
    telemetry::{
        snapshot::Snapshot,
        status::StatusThresholds,
        summary::{format_value, format_with_unit, to_fixed, PLACEHOLDER},
    },
};

use super::create_dashboard::DashboardState;

#[component]
pub fn Dashboard(state: DashboardState) -> impl IntoView {
    let snapshot = state.snapshot;
    let latest = move || snapshot.with(|snapshot| snapshot.as_ref().map(|snapshot| snapshot.latest));

    view! {
        <section>
            <LoadingIndicator state />
            <div class="grid">
                <ReadingCard
                    title="Voltage"
                    unit="V"
                    value=Signal::derive(move || latest().and_then(|latest| latest.voltage))
                />
                <ReadingCard
                    title="Current"
                    unit="A"
                    value=Signal::derive(move || latest().and_then(|latest| latest.current))
                />
                <ReadingCard
                    title="Power"
                    unit="W"
                    value=Signal::derive(move || latest().and_then(|latest| latest.power))
                />
            </div>
            <div class="grid">
                <HealthCard snapshot />
                <StatusCard snapshot />
            </div>
            <LoadedAt snapshot />
        </section>
    }
}

#[component]
fn LoadingIndicator(state: DashboardState) -> impl IntoView {
    move || {
        let first_load = state.snapshot.with(Option::is_none);
        (state.is_loading.get() && first_load).then(|| view! { <Spinner /> })
    }
}

#[component]
fn ReadingCard(title: &'static str, unit: &'static str, value: Signal<Option<f64>>) -> impl IntoView {
    view! {
        <article class="reading">
            <header>{title}</header>
            <h2>{move || format_value(value.get())} " " <small>{unit}</small></h2>
        </article>
    }
}

#[component]
fn HealthCard(#[prop(into)] snapshot: Signal<Option<Rc<Snapshot>>>) -> impl IntoView {
    let health = move || snapshot.with(|snapshot| snapshot.as_ref().and_then(|snapshot| snapshot.health()));

    view! {
        <article>
            <header>"Battery Health"</header>
            <h2>
                {move || health().map_or_else(|| PLACEHOLDER.to_string(), |health| health.display_score())}
            </h2>
            {move || {
                health()
                    .map(|health| {
                        view! { <Pill class=health.severity_class() label=health.label.to_string() /> }
                    })
            }}
            <p>
                <small>"Based on voltage stability and current variation."</small>
            </p>
        </article>
    }
}

#[component]
fn StatusCard(#[prop(into)] snapshot: Signal<Option<Rc<Snapshot>>>) -> impl IntoView {
    let status = move || snapshot.with(|snapshot| snapshot.as_ref().and_then(|snapshot| snapshot.status));
    let StatusThresholds {
        nominal_voltage,
        min_safe_voltage,
        critical_voltage,
        high_current,
    } = StatusThresholds::DEFAULT;

    view! {
        <article>
            <header>"Battery Status"</header>
            <h2 class=move || status().map_or("status-none", |status| status.css_class())>
                {move || status().map_or_else(|| "No data".to_string(), |status| status.label.to_string())}
            </h2>
            <p>{move || status().map_or("Waiting for battery readings.", |status| status.description())}</p>
            <p>
                {move || {
                    status()
                        .map(|status| {
                            format!(
                                "Latest reading {} V, {} A",
                                to_fixed(status.voltage, 2),
                                to_fixed(status.current, 2),
                            )
                        })
                }}
            </p>
            <p>
                <small>
                    {format!(
                        "Nominal {nominal_voltage:.2} V, warning below {min_safe_voltage:.2} V or from {high_current:.2} A, critical at {critical_voltage:.2} V.",
                    )}
                </small>
            </p>
        </article>
    }
}

#[component]
fn LoadedAt(#[prop(into)] snapshot: Signal<Option<Rc<Snapshot>>>) -> impl IntoView {
    move || {
        snapshot
            .get()
            .map(|snapshot| {
                view! {
                    <p>
                        <small>
                            {format!(
                                "{} readings from {}, loaded {}",
                                snapshot.dataset.len(),
                                snapshot.source,
                                display_loaded_at(snapshot.loaded_at),
                            )}
                        </small>
                    </p>
                }
            })
    }
}

#[component]
pub fn Analytics(state: DashboardState) -> impl IntoView {
    let summary = move || state.snapshot.with(|snapshot| snapshot.as_ref().map(|snapshot| snapshot.summary));

    view! {
        <section>
            <LoadingIndicator state />
            <table class="striped">
                <thead>
                    <tr>
                        <th scope="col">"Metric"</th>
                        <th scope="col">"Value"</th>
                    </tr>
                </thead>
                <tbody>
                    <SummaryRow
                        metric="Min Voltage"
                        value=Signal::derive(move || {
                            format_with_unit(summary().and_then(|summary| summary.min_voltage), "V")
                        })
                    />
                    <SummaryRow
                        metric="Max Voltage"
                        value=Signal::derive(move || {
                            format_with_unit(summary().and_then(|summary| summary.max_voltage), "V")
                        })
                    />
                    <SummaryRow
                        metric="Average Voltage"
                        value=Signal::derive(move || {
                            format_with_unit(summary().map(|summary| summary.avg_voltage), "V")
                        })
                    />
                    <SummaryRow
                        metric="Average Current"
                        value=Signal::derive(move || {
                            format_with_unit(summary().map(|summary| summary.avg_current), "A")
                        })
                    />
                    <SummaryRow
                        metric="Peak Power"
                        value=Signal::derive(move || {
                            format_with_unit(summary().and_then(|summary| summary.peak_power), "W")
                        })
                    />
                </tbody>
            </table>
            <DataActions state />
            <LoadedAt snapshot=state.snapshot />
        </section>
    }
}

#[component]
fn SummaryRow(metric: &'static str, value: Signal<String>) -> impl IntoView {
    view! {
        <tr>
            <th scope="row">{metric}</th>
            <td>{value}</td>
        </tr>
    }
}

#[component]
fn DataActions(state: DashboardState) -> impl IntoView {
    view! {
        <div class="grid">
            <button
                on:click=move |_| state.reload()
                aria-busy=move || state.is_loading.get().to_string()
            >
                "Reload Data"
            </button>
            <a href=csv_href() download=CSV_PATH role="button" class="secondary">
                "Download Dataset"
            </a>
        </div>
    }
}
