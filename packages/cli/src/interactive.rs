//! Interactive explorer session.
//!
//! Every menu choice becomes a session [`Action`] applied with
//! [`heat_retrofit_session::reduce`], so the terminal session follows the
//! same rules as the API.

use dialoguer::{Confirm, Input, Select};
use heat_retrofit_impact::aggregate;
use heat_retrofit_impact_models::Assessment;
use heat_retrofit_reference::ReferenceData;
use heat_retrofit_reference_models::Development;
use heat_retrofit_session::{Action, AppState, SelectionMode};

use crate::report;

/// Top-level menu once a development is selected.
enum MenuItem {
    ToggleRetrofit,
    ApplyPackage,
    ShowImpact,
    ShowAlignment,
    ChangeDevelopment,
    StartServer,
    Quit,
}

impl MenuItem {
    const ALL: &[Self] = &[
        Self::ToggleRetrofit,
        Self::ApplyPackage,
        Self::ShowImpact,
        Self::ShowAlignment,
        Self::ChangeDevelopment,
        Self::StartServer,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::ToggleRetrofit => "Toggle a retrofit",
            Self::ApplyPackage => "Apply a package",
            Self::ShowImpact => "Show impact",
            Self::ShowAlignment => "Show alignment",
            Self::ChangeDevelopment => "Change development",
            Self::StartServer => "Start server",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the interactive session until the user quits.
///
/// # Errors
///
/// Returns an error if a prompt fails or the server cannot start.
pub fn run(data: &ReferenceData) -> Result<(), Box<dyn std::error::Error>> {
    println!("Heat Retrofit Explorer");
    println!();

    let mut state = AppState::default();
    state = pick_development(data, &state)?;

    loop {
        println!();
        println!("{}", selection_line(data, &state));

        let labels: Vec<&str> = MenuItem::ALL.iter().map(MenuItem::label).collect();
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match MenuItem::ALL[idx] {
            MenuItem::ToggleRetrofit => {
                state = toggle_retrofit(data, &state)?;
            }
            MenuItem::ApplyPackage => {
                state = apply_package(data, &state)?;
            }
            MenuItem::ShowImpact => {
                if let Some((dev, assessment)) = evaluate(data, &state) {
                    println!("{}", report::impact(data, dev, &assessment));
                }
            }
            MenuItem::ShowAlignment => {
                if let Some((dev, assessment)) = evaluate(data, &state) {
                    println!("{}", report::alignment(dev, &assessment));
                }
            }
            MenuItem::ChangeDevelopment => {
                state = pick_development(data, &state)?;
            }
            MenuItem::StartServer => {
                start_server(data, &state)?;
                return Ok(());
            }
            MenuItem::Quit => return Ok(()),
        }
    }
}

fn evaluate<'a>(
    data: &'a ReferenceData,
    state: &AppState,
) -> Option<(&'a Development, Assessment)> {
    let dev = data.development(state.development_id.as_deref()?)?;
    let assessment = heat_retrofit_session::evaluate(data, state)?;
    Some((dev, assessment))
}

fn pick_development(
    data: &ReferenceData,
    state: &AppState,
) -> Result<AppState, dialoguer::Error> {
    let labels: Vec<String> = data
        .developments()
        .iter()
        .map(|d| format!("{} ({}, {} units)", d.name, d.borough.label(), d.unit_count))
        .collect();

    let current = state
        .development_id
        .as_deref()
        .and_then(|id| data.developments().iter().position(|d| d.id == id))
        .unwrap_or(0);

    let idx = Select::new()
        .with_prompt("Development")
        .items(&labels)
        .default(current)
        .interact()?;

    let action = Action::SelectDevelopment {
        id: data.developments()[idx].id.clone(),
    };
    Ok(heat_retrofit_session::reduce(data, state, &action))
}

fn toggle_retrofit(data: &ReferenceData, state: &AppState) -> Result<AppState, dialoguer::Error> {
    let labels: Vec<String> = data
        .retrofits()
        .iter()
        .map(|r| {
            let mark = if state.active_retrofits.contains(&r.id) {
                "[x]"
            } else {
                "[ ]"
            };
            format!("{mark} {} ({})", r.name, r.category)
        })
        .collect();

    let idx = Select::new()
        .with_prompt("Retrofit")
        .items(&labels)
        .default(0)
        .interact()?;

    let id = data.retrofits()[idx].id.clone();
    let action = Action::ToggleRetrofit { id: id.clone() };
    let next = heat_retrofit_session::reduce(data, state, &action);

    if next.active_retrofits.contains(&id) {
        for dropped in state.active_retrofits.difference(&next.active_retrofits) {
            println!("Deselected {dropped} (conflicts with {id})");
        }
    }

    Ok(next)
}

fn apply_package(data: &ReferenceData, state: &AppState) -> Result<AppState, dialoguer::Error> {
    let Some(dev) = state
        .development_id
        .as_deref()
        .and_then(|id| data.development(id))
    else {
        return Ok(state.clone());
    };

    let summaries = aggregate::package_summaries(data, dev);
    let labels: Vec<String> = summaries
        .iter()
        .map(|s| {
            format!(
                "{}: {}/unit, {}°F",
                s.name,
                heat_retrofit_cli_utils::format_usd(s.actual_cost_per_unit),
                s.actual_temp_delta_f
            )
        })
        .collect();

    let idx = Select::new()
        .with_prompt("Package")
        .items(&labels)
        .default(0)
        .interact()?;

    let action = Action::SelectPackage {
        id: summaries[idx].package_id.clone(),
    };
    Ok(heat_retrofit_session::reduce(data, state, &action))
}

/// Prompts for a bind address and port, then serves the API until it is
/// stopped.
fn start_server(data: &ReferenceData, state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(heat_retrofit_server::DEFAULT_BIND_ADDR.to_string())
        .interact_text()?;

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(heat_retrofit_server::DEFAULT_PORT)
        .validate_with(validate_port)
        .interact_text()?;

    println!("{}", server_summary(data, state, &bind_addr, port));

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()?
    {
        println!("Cancelled.");
        return Ok(());
    }

    actix_web::rt::System::new().block_on(heat_retrofit_server::run_server_on(bind_addr, port))?;
    Ok(())
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn validate_port(port: &u16) -> Result<(), &'static str> {
    if *port == 0 {
        Err("Port must be non-zero")
    } else {
        Ok(())
    }
}

/// What the server will expose, with the package endpoint for the
/// development picked in this session.
fn server_summary(data: &ReferenceData, state: &AppState, bind_addr: &str, port: u16) -> String {
    let mut out = format!(
        "Serving {} developments, {} retrofits, {} packages at http://{bind_addr}:{port}/api",
        data.developments().len(),
        data.retrofits().len(),
        data.packages().len()
    );
    if let Some(dev) = state
        .development_id
        .as_deref()
        .and_then(|id| data.development(id))
    {
        out.push_str(&format!(
            "\nPackages at {}: http://{bind_addr}:{port}/api/developments/{}/packages",
            dev.name, dev.id
        ));
    }
    out
}

/// One-line summary of the current development and selection.
fn selection_line(data: &ReferenceData, state: &AppState) -> String {
    let name = state
        .development_id
        .as_deref()
        .and_then(|id| data.development(id))
        .map_or("(none)", |d| d.name.as_str());

    let mode = match &state.mode {
        SelectionMode::Package { id } => data
            .package(id)
            .map_or_else(|| id.clone(), |p| p.name.clone()),
        SelectionMode::Custom => "Custom".to_string(),
    };

    let active: Vec<&str> = state.active_retrofits.iter().map(String::as_str).collect();
    format!(
        "{name} | {mode} | {}",
        if active.is_empty() {
            "no retrofits".to_string()
        } else {
            active.join(", ")
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use heat_retrofit_reference::reference;

    #[test]
    fn selection_line_names_package_mode() {
        let data = reference();
        let state = heat_retrofit_session::replay(
            data,
            &AppState::default(),
            &[
                Action::SelectDevelopment {
                    id: "BRV001".to_string(),
                },
                Action::SelectPackage {
                    id: "emergency".to_string(),
                },
            ],
        );
        let line = selection_line(data, &state);
        assert!(line.ends_with("ac_electric, cool_roof"), "{line}");
        assert!(!line.contains("Custom"), "{line}");
    }

    #[test]
    fn selection_line_without_development() {
        let line = selection_line(reference(), &AppState::default());
        assert_eq!(line, "(none) | Custom | no retrofits");
    }

    #[test]
    fn port_zero_is_rejected() {
        assert_eq!(validate_port(&0), Err("Port must be non-zero"));
        assert_eq!(validate_port(&8080), Ok(()));
    }

    #[test]
    fn server_summary_links_selected_development() {
        let data = reference();
        let state = heat_retrofit_session::reduce(
            data,
            &AppState::default(),
            &Action::SelectDevelopment {
                id: "BRV001".to_string(),
            },
        );
        let text = server_summary(data, &state, "127.0.0.1", 9000);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2, "{text}");
        assert!(
            lines[0].starts_with(&format!("Serving {} developments", data.developments().len())),
            "{text}"
        );
        assert!(lines[0].ends_with("http://127.0.0.1:9000/api"), "{text}");
        assert!(
            lines[1].ends_with("http://127.0.0.1:9000/api/developments/BRV001/packages"),
            "{text}"
        );
    }

    #[test]
    fn server_summary_without_development_is_one_line() {
        let text = server_summary(reference(), &AppState::default(), "0.0.0.0", 8080);
        assert_eq!(text.lines().count(), 1, "{text}");
    }

    #[test]
    fn menu_labels_are_unique() {
        let mut labels: Vec<&str> = MenuItem::ALL.iter().map(MenuItem::label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), MenuItem::ALL.len());
    }
}
