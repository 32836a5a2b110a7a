//! Selection Policy.
//!
//! Toggling a retrofit on silently drops any active retrofit it conflicts
//! with. Selecting a package replaces the whole selection. Conflicts are
//! never reported as errors.

use heat_retrofit_impact_models::ActiveSet;
use heat_retrofit_reference::ReferenceData;
use heat_retrofit_reference_models::Retrofit;

/// Returns the selection after toggling `id`.
///
/// An active retrofit is removed without touching the rest of the
/// selection. An inactive one first evicts every active retrofit in its
/// exclusion set, then is added. IDs not in the catalog leave the
/// selection unchanged.
#[must_use]
pub fn toggle(data: &ReferenceData, active: &ActiveSet, id: &str) -> ActiveSet {
    if data.retrofit(id).is_none() {
        log::debug!("Ignoring toggle of unknown retrofit '{id}'");
        return active.clone();
    }

    let mut next = active.clone();
    if next.remove(id) {
        return next;
    }

    let conflicts = data.exclusions(id);
    next.retain(|current| {
        let keep = !conflicts.contains(current);
        if !keep {
            log::debug!("Selecting '{id}' deselects conflicting '{current}'");
        }
        keep
    });
    next.insert(id.to_string());
    next
}

/// Returns the selection after choosing the package `package_id`.
///
/// The result is exactly the package's member list; the prior selection
/// is discarded. An unknown package leaves `active` unchanged.
#[must_use]
pub fn select_package(data: &ReferenceData, active: &ActiveSet, package_id: &str) -> ActiveSet {
    data.package(package_id).map_or_else(
        || {
            log::debug!("Ignoring selection of unknown package '{package_id}'");
            active.clone()
        },
        |package| package.retrofits.iter().cloned().collect(),
    )
}

/// The selection a newly chosen development starts with.
#[must_use]
pub fn reset() -> ActiveSet {
    ActiveSet::new()
}

/// Active retrofits that resolve in the catalog, in ID order.
pub fn resolve<'a>(
    data: &'a ReferenceData,
    active: &'a ActiveSet,
) -> impl Iterator<Item = &'a Retrofit> + 'a {
    active.iter().filter_map(|id| data.retrofit(id))
}
