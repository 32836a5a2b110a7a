//! Plain-text rendering of catalog listings and assessments.

use heat_retrofit_cli_utils::{format_alignment_matrix, format_delta, format_usd};
use heat_retrofit_impact::{aggregate, cost, selection};
use heat_retrofit_impact_models::{Assessment, PackageSummary};
use heat_retrofit_reference::ReferenceData;
use heat_retrofit_reference_models::{Development, Retrofit, RetrofitPackage};

/// One line per development: ID, name, borough, year, units.
#[must_use]
pub fn developments<'a>(developments: impl IntoIterator<Item = &'a Development>) -> String {
    let mut out = format!(
        "{:<8} {:<36} {:<14} {:>5} {:>6}\n",
        "ID", "NAME", "BOROUGH", "BUILT", "UNITS"
    );
    let mut count = 0;
    for dev in developments {
        out.push_str(&format!(
            "{:<8} {:<36} {:<14} {:>5} {:>6}\n",
            dev.id,
            dev.name,
            dev.borough.label(),
            dev.year_built,
            dev.unit_count
        ));
        count += 1;
    }
    out.push_str(&format!("\n{count} development(s)"));
    out
}

/// One line per retrofit with its catalog cost, effects, and conflicts.
#[must_use]
pub fn retrofits<'a>(
    data: &ReferenceData,
    retrofits: impl IntoIterator<Item = &'a Retrofit>,
) -> String {
    let mut out = format!(
        "{:<20} {:<11} {:>10} {:<16} {:>6} {:>7}  EXCLUDES\n",
        "ID", "CATEGORY", "COST", "BASIS", "TEMP", "ENERGY"
    );
    for r in retrofits {
        let excludes: Vec<&str> = data.exclusions(&r.id).iter().map(String::as_str).collect();
        out.push_str(&format!(
            "{:<20} {:<11} {:>10} {:<16} {:>6} {:>7}  {}\n",
            r.id,
            r.category.to_string(),
            format_usd(r.cost_low),
            r.cost_basis.to_string(),
            format_delta(r.temp_delta_f, "°F"),
            format_delta(r.energy_delta_pct, "%"),
            excludes.join(", ")
        ));
    }
    out
}

/// Curated packages with their advertised figures.
#[must_use]
pub fn packages(packages: &[RetrofitPackage]) -> String {
    let mut out = String::new();
    for p in packages {
        out.push_str(&format!(
            "{} ({}): {}/unit, -{}°F advertised\n    {}\n",
            p.name,
            p.id,
            format_usd(p.nominal_cost_per_unit),
            p.nominal_temp_reduction_f,
            p.retrofits.join(", ")
        ));
    }
    out
}

/// Packages recomputed at one development, next to their advertised
/// figures.
#[must_use]
pub fn package_summaries(development: &Development, summaries: &[PackageSummary]) -> String {
    let mut out = format!("Packages at {} ({})\n\n", development.name, development.id);
    for s in summaries {
        out.push_str(&format!(
            "{} ({}): {} total, {}/unit, {}\n",
            s.name,
            s.package_id,
            format_usd(s.actual_cost),
            format_usd(s.actual_cost_per_unit),
            format_delta(s.actual_temp_delta_f, "°F"),
        ));
        if s.diverges_from_nominal {
            out.push_str(&format!(
                "    advertised {}/unit, -{}°F\n",
                format_usd(s.nominal_cost_per_unit),
                s.nominal_temp_reduction_f
            ));
        }
    }
    out
}

/// Cost, temperature, and energy effects of an assessed selection, with
/// each retrofit's cost range.
#[must_use]
pub fn impact(data: &ReferenceData, development: &Development, assessment: &Assessment) -> String {
    let summary = &assessment.impact;
    let mut out = format!("{} ({})\n", development.name, development.id);

    if assessment.active_retrofits.is_empty() {
        out.push_str("No retrofits selected\n");
    }
    for r in selection::resolve(data, &assessment.active_retrofits) {
        let range = cost::cost_range(r, development);
        out.push_str(&format!(
            "  {:<32} {} - {}\n",
            r.name,
            format_usd(range.low),
            format_usd(range.high)
        ));
    }

    out.push_str(&format!(
        "\nTotal cost:        {}\n\
         Cost per unit:     {}\n\
         Temperature:       {}\n\
         Energy use:        {}\n\
         Peak indoor temp:  {}°F",
        format_usd(summary.total_cost),
        format_usd(cost::cost_per_unit(
            summary.total_cost,
            development.unit_count
        )),
        format_delta(summary.temp_delta_f, "°F"),
        format_delta(summary.energy_delta_pct, "%"),
        aggregate::display_peak_indoor_temp(summary),
    ));
    out
}

/// Alignment matrix, current conditions, and the headline gate.
#[must_use]
pub fn alignment(development: &Development, assessment: &Assessment) -> String {
    let conditions = &assessment.conditions;
    let coverage = &assessment.coverage;
    let mut out = format!(
        "{} ({})\n\
         HVI {}, {} complaints per 1,000 units, {:.1}% seniors\n\
         Coverage: {} cooling, {} envelope, {} mechanical, {} site\n\n",
        development.name,
        development.id,
        conditions.heat_vulnerability_index,
        conditions.complaints_per_1000_units,
        conditions.pct_seniors,
        coverage.cooling,
        coverage.envelope,
        coverage.mechanical,
        coverage.site,
    );
    out.push_str(&format_alignment_matrix(&assessment.alignment));
    out.push('\n');
    out.push_str(if assessment.comprehensively_aligned {
        "Comprehensively aligned"
    } else {
        "Not comprehensively aligned"
    });
    out
}
