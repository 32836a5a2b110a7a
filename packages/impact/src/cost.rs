//! Cost Calculator.
//!
//! Scales a retrofit's catalog cost to a development according to its
//! [`CostBasis`]. Totals always use the low end of the range; the high end
//! is only reported through [`cost_range`].

use heat_retrofit_impact_models::{CostRange, SQFT_PER_UNIT};
use heat_retrofit_reference::ReferenceData;
use heat_retrofit_reference_models::{CostBasis, Development, Retrofit, RetrofitPackage};

fn scale(amount: u64, basis: CostBasis, development: &Development) -> u64 {
    match basis {
        CostBasis::PerUnit => amount * u64::from(development.unit_count),
        CostBasis::PerBuilding => amount * u64::from(development.building_count),
        CostBasis::PerSqft => amount * u64::from(development.unit_count) * SQFT_PER_UNIT,
        CostBasis::PerDevelopment => amount,
    }
}

/// Dollar cost of `retrofit` at `development`, using the low end of the
/// catalog range.
#[must_use]
pub fn retrofit_cost(retrofit: &Retrofit, development: &Development) -> u64 {
    scale(retrofit.cost_low, retrofit.cost_basis, development)
}

/// Low and high dollar cost of `retrofit` at `development`, for display.
#[must_use]
pub fn cost_range(retrofit: &Retrofit, development: &Development) -> CostRange {
    CostRange {
        low: scale(retrofit.cost_low, retrofit.cost_basis, development),
        high: scale(retrofit.cost_high, retrofit.cost_basis, development),
    }
}

/// Cost of the retrofit with `id`, or zero if it is not in the catalog.
#[must_use]
pub fn cost_by_id(data: &ReferenceData, id: &str, development: &Development) -> u64 {
    data.retrofit(id).map_or_else(
        || {
            log::debug!("Unknown retrofit '{id}' contributes no cost");
            0
        },
        |r| retrofit_cost(r, development),
    )
}

/// Recomputed cost of a package: the sum of its member retrofits' costs.
///
/// The package's nominal cost figure is not consulted.
#[must_use]
pub fn package_cost(
    data: &ReferenceData,
    package: &RetrofitPackage,
    development: &Development,
) -> u64 {
    package
        .retrofits
        .iter()
        .map(|id| cost_by_id(data, id, development))
        .sum()
}

/// `total` spread over `unit_count` units, rounded to the nearest dollar.
///
/// Returns zero when `unit_count` is zero.
#[must_use]
pub fn cost_per_unit(total: u64, unit_count: u32) -> u64 {
    let units = u64::from(unit_count);
    if units == 0 {
        return 0;
    }
    (total + units / 2) / units
}

#[cfg(test)]
mod tests {
    use super::*;
    use heat_retrofit_reference::reference;

    fn brevoort() -> &'static Development {
        reference().development("BRV001").unwrap()
    }

    fn retrofit(id: &str) -> &'static Retrofit {
        reference().retrofit(id).unwrap()
    }

    #[test]
    fn per_unit_cost_scales_with_units() {
        assert_eq!(retrofit_cost(retrofit("ac_electric"), brevoort()), 3_345_000);
    }

    #[test]
    fn per_sqft_cost_assumes_850_sqft_per_unit() {
        assert_eq!(
            retrofit_cost(retrofit("cool_roof"), brevoort()),
            8 * 1338 * 850
        );
    }

    #[test]
    fn per_building_cost_scales_with_buildings() {
        assert_eq!(
            retrofit_cost(retrofit("green_roof"), brevoort()),
            275_000 * 27
        );
    }

    #[test]
    fn per_development_cost_is_flat() {
        let data = reference();
        let flat = retrofit("building_automation");
        for dev in data.developments() {
            assert_eq!(retrofit_cost(flat, dev), 650_000, "{}", dev.id);
        }
    }

    #[test]
    fn cost_range_uses_both_ends() {
        let range = cost_range(retrofit("ac_electric"), brevoort());
        assert_eq!(range.low, 2500 * 1338);
        assert_eq!(range.high, 4000 * 1338);
        assert!(range.low <= range.high);
    }

    #[test]
    fn unknown_retrofit_costs_nothing() {
        assert_eq!(cost_by_id(reference(), "flux_capacitor", brevoort()), 0);
    }

    #[test]
    fn package_cost_sums_members_not_nominal() {
        let data = reference();
        let emergency = data.package("emergency").unwrap();
        let cost = package_cost(data, emergency, brevoort());
        assert_eq!(cost, 2500 * 1338 + 8 * 1338 * 850);
        assert_eq!(cost_per_unit(cost, 1338), 9300);
        assert_ne!(
            cost_per_unit(cost, 1338),
            emergency.nominal_cost_per_unit,
            "emergency package nominal cost is expected to diverge from its members"
        );
    }

    #[test]
    fn cost_per_unit_rounds_to_nearest() {
        assert_eq!(cost_per_unit(10, 4), 3);
        assert_eq!(cost_per_unit(9, 4), 2);
        assert_eq!(cost_per_unit(42_892_700, 1338), 32_057);
    }

    #[test]
    fn cost_per_unit_with_no_units_is_zero() {
        assert_eq!(cost_per_unit(1_000_000, 0), 0);
    }

    #[test]
    fn empty_development_only_pays_flat_costs() {
        let mut empty = brevoort().clone();
        empty.unit_count = 0;
        empty.building_count = 0;
        for r in reference().retrofits() {
            let cost = retrofit_cost(r, &empty);
            if r.cost_basis == CostBasis::PerDevelopment {
                assert_eq!(cost, r.cost_low);
            } else {
                assert_eq!(cost, 0, "{}", r.id);
            }
        }
    }
}
