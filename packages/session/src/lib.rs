#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Application state for the heat retrofit explorer.
//!
//! The whole UI state is one serializable [`AppState`] value. Every user
//! event becomes an [`Action`], and [`reduce`] returns the next state
//! without mutating the previous one. The calculation core only ever sees
//! slices of this state.

use heat_retrofit_impact::selection;
use heat_retrofit_impact_models::{ActiveSet, Assessment, Era};
use heat_retrofit_reference::ReferenceData;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// How the current selection was made.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionMode {
    /// The selection was last replaced by a curated package.
    Package {
        /// ID of the package that populated the selection.
        id: String,
    },
    /// The user is composing a selection retrofit by retrofit.
    #[default]
    Custom,
}

/// Which top-level view is showing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Dashboard,
    Story,
    Brief,
}

/// Everything the explorer needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Selected development, if any.
    pub development_id: Option<String>,
    pub active_retrofits: ActiveSet,
    pub mode: SelectionMode,
    /// Era the timeline is focused on.
    pub era: Era,
    pub view: ViewMode,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            development_id: None,
            active_retrofits: ActiveSet::new(),
            mode: SelectionMode::Custom,
            era: Era::Current,
            view: ViewMode::Dashboard,
        }
    }
}

/// A user event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Navigate to a development. Clears the selection if it differs from
    /// the current one.
    SelectDevelopment { id: String },
    /// Toggle one retrofit under the mutual-exclusion policy.
    ToggleRetrofit { id: String },
    /// Replace the selection with a curated package.
    SelectPackage { id: String },
    /// Mark the selection as user-composed without changing it.
    SwitchToCustom,
    SelectEra { era: Era },
    SetView { view: ViewMode },
    /// Return to the initial state.
    Reset,
}

/// Returns the state that results from applying `action` to `state`.
///
/// Actions naming an unknown development, retrofit, or package return the
/// state unchanged.
#[must_use]
pub fn reduce(data: &ReferenceData, state: &AppState, action: &Action) -> AppState {
    let mut next = state.clone();

    match action {
        Action::SelectDevelopment { id } => {
            if data.development(id).is_none() {
                log::warn!("Ignoring selection of unknown development '{id}'");
                return next;
            }
            if state.development_id.as_deref() != Some(id.as_str()) {
                next.development_id = Some(id.clone());
                next.active_retrofits = selection::reset();
                next.mode = SelectionMode::Custom;
            }
        }
        Action::ToggleRetrofit { id } => {
            if data.retrofit(id).is_none() {
                log::warn!("Ignoring toggle of unknown retrofit '{id}'");
                return next;
            }
            next.active_retrofits = selection::toggle(data, &state.active_retrofits, id);
            next.mode = SelectionMode::Custom;
        }
        Action::SelectPackage { id } => {
            if data.package(id).is_none() {
                log::warn!("Ignoring selection of unknown package '{id}'");
                return next;
            }
            next.active_retrofits = selection::select_package(data, &state.active_retrofits, id);
            next.mode = SelectionMode::Package { id: id.clone() };
        }
        Action::SwitchToCustom => {
            next.mode = SelectionMode::Custom;
        }
        Action::SelectEra { era } => {
            next.era = *era;
        }
        Action::SetView { view } => {
            next.view = *view;
        }
        Action::Reset => {
            next = AppState::default();
        }
    }

    next
}

/// Applies `actions` in order, starting from `state`.
#[must_use]
pub fn replay<'a>(
    data: &ReferenceData,
    state: &AppState,
    actions: impl IntoIterator<Item = &'a Action>,
) -> AppState {
    actions
        .into_iter()
        .fold(state.clone(), |acc, action| reduce(data, &acc, action))
}

/// What the presentation layer renders for the selected development.
pub type Evaluation = Assessment;

/// Assessment of the selected development under the current selection.
///
/// `None` when no development is selected or the selected ID is unknown.
#[must_use]
pub fn evaluate(data: &ReferenceData, state: &AppState) -> Option<Evaluation> {
    let id = state.development_id.as_deref()?;
    heat_retrofit_impact::assess_by_id(data, id, &state.active_retrofits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heat_retrofit_reference::reference;

    fn select_development(id: &str) -> Action {
        Action::SelectDevelopment { id: id.to_string() }
    }

    fn toggle(id: &str) -> Action {
        Action::ToggleRetrofit { id: id.to_string() }
    }

    fn package(id: &str) -> Action {
        Action::SelectPackage { id: id.to_string() }
    }

    fn ids(state: &AppState) -> Vec<&str> {
        state.active_retrofits.iter().map(String::as_str).collect()
    }

    #[test]
    fn initial_state_is_empty_custom() {
        let state = AppState::default();
        assert!(state.development_id.is_none());
        assert!(state.active_retrofits.is_empty());
        assert_eq!(state.mode, SelectionMode::Custom);
        assert!(evaluate(reference(), &state).is_none());
    }

    #[test]
    fn changing_development_clears_selection() {
        let data = reference();
        let state = replay(
            data,
            &AppState::default(),
            &[
                select_development("BRV001"),
                toggle("ac_electric"),
                select_development("QBR001"),
            ],
        );
        assert_eq!(state.development_id.as_deref(), Some("QBR001"));
        assert!(state.active_retrofits.is_empty());
    }

    #[test]
    fn reselecting_same_development_keeps_selection() {
        let data = reference();
        let state = replay(
            data,
            &AppState::default(),
            &[
                select_development("BRV001"),
                toggle("ac_electric"),
                select_development("BRV001"),
            ],
        );
        assert_eq!(ids(&state), vec!["ac_electric"]);
    }

    #[test]
    fn unknown_development_is_noop() {
        let data = reference();
        let before = replay(
            data,
            &AppState::default(),
            &[select_development("BRV001"), toggle("ac_electric")],
        );
        assert_eq!(reduce(data, &before, &select_development("NOPE01")), before);
    }

    #[test]
    fn package_then_toggle_switches_to_custom() {
        let data = reference();
        let state = replay(
            data,
            &AppState::default(),
            &[select_development("BRV001"), package("emergency")],
        );
        assert_eq!(
            state.mode,
            SelectionMode::Package {
                id: "emergency".to_string()
            }
        );
        assert_eq!(ids(&state), vec!["ac_electric", "cool_roof"]);

        let state = reduce(data, &state, &toggle("vrf_system"));
        assert_eq!(state.mode, SelectionMode::Custom);
        assert_eq!(ids(&state), vec!["cool_roof", "vrf_system"]);
    }

    #[test]
    fn switching_to_custom_keeps_selection() {
        let data = reference();
        let state = replay(
            data,
            &AppState::default(),
            &[
                select_development("BRV001"),
                package("climate_ready"),
                Action::SwitchToCustom,
            ],
        );
        assert_eq!(state.mode, SelectionMode::Custom);
        assert_eq!(state.active_retrofits.len(), 6);
    }

    #[test]
    fn package_replaces_prior_selection() {
        let data = reference();
        let state = replay(
            data,
            &AppState::default(),
            &[
                select_development("RHK001"),
                toggle("vrf_system"),
                toggle("bioswale"),
                package("emergency"),
            ],
        );
        assert_eq!(ids(&state), vec!["ac_electric", "cool_roof"]);
    }

    #[test]
    fn unknown_retrofit_and_package_are_noops() {
        let data = reference();
        let state = replay(
            data,
            &AppState::default(),
            &[select_development("BRV001"), package("emergency")],
        );
        assert_eq!(reduce(data, &state, &toggle("flux_capacitor")), state);
        assert_eq!(reduce(data, &state, &package("nope")), state);
    }

    #[test]
    fn era_and_view_are_independent_of_selection() {
        let data = reference();
        let state = replay(
            data,
            &AppState::default(),
            &[
                select_development("BRV001"),
                toggle("ac_electric"),
                Action::SelectEra {
                    era: Era::Projected,
                },
                Action::SetView {
                    view: ViewMode::Brief,
                },
            ],
        );
        assert_eq!(state.era, Era::Projected);
        assert_eq!(state.view, ViewMode::Brief);
        assert_eq!(ids(&state), vec!["ac_electric"]);
    }

    #[test]
    fn reset_returns_to_default() {
        let data = reference();
        let state = replay(
            data,
            &AppState::default(),
            &[select_development("BRV001"), toggle("ac_electric"), Action::Reset],
        );
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn evaluate_reflects_current_selection() {
        let data = reference();
        let state = replay(
            data,
            &AppState::default(),
            &[select_development("BRV001"), package("emergency")],
        );
        let assessment = evaluate(data, &state).unwrap();
        assert_eq!(assessment.impact.peak_indoor_temp_f, 77);
        assert_eq!(assessment.development_id, "BRV001");
    }

    #[test]
    fn state_and_actions_round_trip_through_json() {
        let data = reference();
        let state = replay(
            data,
            &AppState::default(),
            &[select_development("BRV001"), package("emergency")],
        );
        let json = serde_json::to_string(&state).unwrap();
        let parsed: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);

        let action: Action =
            serde_json::from_str(r#"{"type":"toggle_retrofit","id":"cool_roof"}"#).unwrap();
        assert_eq!(action, toggle("cool_roof"));
        let action: Action =
            serde_json::from_str(r#"{"type":"select_era","era":"projected"}"#).unwrap();
        assert_eq!(
            action,
            Action::SelectEra {
                era: Era::Projected
            }
        );
    }
}
