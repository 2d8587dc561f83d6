use anyhow::{anyhow, Result};
use leptos::{
    component, create_rw_signal, ev::MouseEvent, view, IntoView, RwSignal, SignalGet, SignalUpdate,
};
use tracing::{debug, warn};
use web_sys::Storage;

pub const THEME_STORAGE_KEY: &str = "bhms-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    fn toggle_icon(self) -> &'static str {
        match self {
            Self::Dark => "☀️",
            Self::Light => "🌙",
        }
    }

    fn toggle_label(self) -> &'static str {
        match self {
            Self::Dark => "Switch to light mode",
            Self::Light => "Switch to dark mode",
        }
    }
}

/// Theme of the previous visit, dark when nothing usable was stored.
pub fn create_theme() -> RwSignal<Theme> {
    let theme = match load_theme() {
        Ok(theme) => theme,
        Err(err) => {
            warn!("theme couldn't be loaded: {err}");
            Theme::default()
        }
    };

    debug!(theme = theme.as_str(), "theme loaded");

    create_rw_signal(theme)
}

fn local_storage() -> Result<Storage> {
    leptos::window()
        .local_storage()
        .map_err(|err| anyhow!("local storage error: {err:?}"))?
        .ok_or_else(|| anyhow!("local storage unavailable"))
}

fn load_theme() -> Result<Theme> {
    let value = local_storage()?
        .get_item(THEME_STORAGE_KEY)
        .map_err(|err| anyhow!("local storage read error: {err:?}"))?;

    Ok(Theme::from_stored(value.as_deref()))
}

fn store_theme(theme: Theme) -> Result<()> {
    local_storage()?
        .set_item(THEME_STORAGE_KEY, theme.as_str())
        .map_err(|err| anyhow!("local storage write error: {err:?}"))
}

#[component]
pub fn ThemeToggle(theme: RwSignal<Theme>) -> impl IntoView {
    let handle_click = move |_evt: MouseEvent| {
        theme.update(|theme| *theme = theme.toggled());
        if let Err(err) = store_theme(theme.get()) {
            warn!("theme couldn't be stored: {err}");
        }
    };

    view! {
        <button class="outline" on:click=handle_click aria-label=move || theme.get().toggle_label()>
            {move || theme.get().toggle_icon()}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_values() {
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("sepia")), Theme::Dark);
        assert_eq!(Theme::from_stored(None), Theme::Dark);
    }

    #[test]
    fn toggle_roundtrip() {
        let theme = Theme::default();

        assert_eq!(theme.toggled(), Theme::Light);
        assert_eq!(theme.toggled().toggled(), theme);
        assert_eq!(Theme::from_stored(Some(theme.toggled().as_str())), Theme::Light);
    }
}
