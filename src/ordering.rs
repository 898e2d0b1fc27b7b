// ABOUTME: Section order engine - reordering, toggling and renumbering of draft sections
// Enabled sections always carry orders 1..N; disabled ones keep a stale, ignored order

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::SectionCatalog;
use crate::error::{BuilderError, BuilderResult};
use crate::models::SectionConfiguration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Split into (enabled sorted by order, disabled in original relative order).
/// The sort is stable, so ties keep their list position.
fn partition(configurations: &[SectionConfiguration]) -> (Vec<SectionConfiguration>, Vec<SectionConfiguration>) {
    let (mut enabled, disabled): (Vec<_>, Vec<_>) =
        configurations.iter().cloned().partition(|c| c.enabled);
    enabled.sort_by_key(|c| c.order);
    (enabled, disabled)
}

fn renumber(enabled: &mut [SectionConfiguration]) {
    for (config, order) in enabled.iter_mut().zip(1u32..) {
        config.order = order;
    }
}

fn assemble(mut enabled: Vec<SectionConfiguration>, disabled: Vec<SectionConfiguration>) -> Vec<SectionConfiguration> {
    renumber(&mut enabled);
    enabled.extend(disabled);
    enabled
}

/// Reassign 1..N to the enabled subset, keeping its relative order
pub fn normalize(configurations: &[SectionConfiguration]) -> Vec<SectionConfiguration> {
    let (enabled, disabled) = partition(configurations);
    assemble(enabled, disabled)
}

/// Swap a section with its enabled neighbour.
///
/// Unknown or disabled ids and moves past either end return the input
/// unchanged; a caller may race a disable, so this is not an error.
pub fn move_section(
    configurations: &[SectionConfiguration],
    section_id: &str,
    direction: Direction,
) -> Vec<SectionConfiguration> {
    let (mut enabled, disabled) = partition(configurations);

    let Some(index) = enabled.iter().position(|c| c.section_id == section_id) else {
        debug!("move_section: '{}' is not enabled, nothing to move", section_id);
        return configurations.to_vec();
    };

    let target = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => (index + 1 < enabled.len()).then_some(index + 1),
    };
    let Some(target) = target else {
        return configurations.to_vec();
    };

    enabled.swap(index, target);
    assemble(enabled, disabled)
}

/// Enable or disable a section.
///
/// Enabling appends the section after the current enabled ones (adding it
/// from the catalog when the draft does not list it yet). Disabling a
/// required section is rejected with the input left untouched.
pub fn set_enabled(
    configurations: &[SectionConfiguration],
    section_id: &str,
    enabled: bool,
    catalog: &dyn SectionCatalog,
) -> BuilderResult<Vec<SectionConfiguration>> {
    if !enabled && catalog.is_required(section_id) {
        return Err(BuilderError::InvalidOperation(format!(
            "section '{section_id}' is required and cannot be disabled"
        )));
    }

    let current = configurations.iter().find(|c| c.section_id == section_id);
    match current {
        Some(config) if config.enabled == enabled => return Ok(configurations.to_vec()),
        None if !enabled => return Ok(configurations.to_vec()),
        _ => {}
    }

    let mut list = normalize(configurations);
    let enabled_count = list.iter().filter(|c| c.enabled).count();
    let next_order = u32::try_from(enabled_count)
        .map_err(|_| BuilderError::InvalidOperation("too many sections".to_string()))?
        + 1;

    if let Some(config) = list.iter_mut().find(|c| c.section_id == section_id) {
        config.enabled = enabled;
        if enabled {
            config.order = next_order;
        }
    } else {
        // Only reachable when enabling an id the draft does not carry yet
        let section = catalog.get_section(section_id)?;
        list.push(SectionConfiguration::new(section.id.clone(), true, next_order));
    }

    Ok(normalize(&list))
}

/// Enabled sections in display order
pub fn enabled_in_order(configurations: &[SectionConfiguration]) -> Vec<&SectionConfiguration> {
    let mut enabled: Vec<&SectionConfiguration> = configurations.iter().filter(|c| c.enabled).collect();
    enabled.sort_by_key(|c| c.order);
    enabled
}

/// Whether enabled orders are exactly 1..N with no ties
pub fn is_normalized(configurations: &[SectionConfiguration]) -> bool {
    let mut orders: Vec<u32> = configurations.iter().filter(|c| c.enabled).map(|c| c.order).collect();
    orders.sort_unstable();
    orders.iter().zip(1u32..).all(|(order, expected)| *order == expected)
}
